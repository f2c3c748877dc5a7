//! Diagnostics collected across a front-end stage. A stage either finishes
//! with an empty buffer or fails by surfacing the whole buffer to its caller.

use std::error::Error;
use std::fmt::Display;

use crate::source::SourceRef;

/// A single diagnostic tied to a place in the source text.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ErrorRecord {
    pub source_ref: SourceRef,
    pub message: String,
}

impl Display for ErrorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "In line {} in column {} error:\n{}",
            self.source_ref.line, self.source_ref.column, self.message
        )
    }
}

impl Error for ErrorRecord {}

/// Ordered collection of diagnostics, carried by value through a stage.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ErrorBuffer {
    records: Vec<ErrorRecord>,
}

impl ErrorBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source_ref: SourceRef, message: impl Into<String>) {
        self.records.push(ErrorRecord {
            source_ref,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    pub fn message(&self) -> String {
        self.records
            .iter()
            .map(ErrorRecord::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Display for ErrorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl Error for ErrorBuffer {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn some_ref() -> SourceRef {
        SourceRef::new(Rc::from("test.pl"), 3, 7)
    }

    #[test]
    fn test_record_format() {
        let mut errors = ErrorBuffer::new();
        errors.push(some_ref(), "Colon expected here");
        assert_eq!(
            "In line 3 in column 7 error:\nColon expected here",
            errors.message()
        );
    }

    #[test]
    fn test_records_keep_order() {
        let mut errors = ErrorBuffer::new();
        errors.push(some_ref(), "first");
        errors.push(some_ref(), "second");
        assert_eq!(2, errors.len());
        assert_eq!("first", errors.records()[0].message);
        assert_eq!("second", errors.records()[1].message);
    }
}
