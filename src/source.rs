//! In-memory model of a source file: an ordered sequence of lines, each
//! carrying a back-reference to its place in the original text.

use std::fs;
use std::io;
use std::path::Path;
use std::rc::Rc;

/// Location of a single character in the original source text.
///
/// The filename is shared between all refs of a file; line and column are
/// 1-based. Refs never take part in token or tree comparisons.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceRef {
    pub filename: Rc<str>,
    pub line: usize,
    pub column: usize,
}

impl SourceRef {
    pub fn new(filename: Rc<str>, line: usize, column: usize) -> Self {
        Self {
            filename,
            line,
            column,
        }
    }

    /// Same file and line, different column.
    pub fn in_same_line(&self, column: usize) -> SourceRef {
        SourceRef {
            column,
            ..self.clone()
        }
    }
}

impl Default for SourceRef {
    fn default() -> Self {
        Self {
            filename: Rc::from(""),
            line: 0,
            column: 0,
        }
    }
}

impl std::fmt::Display for SourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// A single line of source text together with its origin.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SourceLine {
    pub text: String,
    pub source_ref: SourceRef,
}

impl SourceLine {
    pub fn new(text: impl Into<String>, source_ref: SourceRef) -> Self {
        Self {
            text: text.into(),
            source_ref,
        }
    }

    /// Ref pointing at the given 1-based column of this line.
    pub fn make_ref(&self, column: usize) -> SourceRef {
        self.source_ref.in_same_line(column)
    }
}

/// An ordered sequence of source lines belonging to one file.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SourceFile {
    filename: Rc<str>,
    pub lines: Vec<SourceLine>,
}

impl SourceFile {
    pub fn new(filename: impl AsRef<str>) -> Self {
        Self {
            filename: Rc::from(filename.as_ref()),
            lines: Vec::new(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let lines = contents.lines().collect::<Vec<_>>();
        Ok(Self::from_lines(&lines, &path.to_string_lossy()))
    }

    pub fn from_lines(lines: &[&str], filename: &str) -> Self {
        let mut file = Self::new(filename);
        for line in lines {
            file.push_line(*line);
        }
        file
    }

    /// Appends a line, assigning it the next 1-based line number.
    pub fn push_line(&mut self, text: impl Into<String>) {
        let number = self.lines.len() + 1;
        let source_ref = SourceRef::new(Rc::clone(&self.filename), number, 1);
        self.lines.push(SourceLine::new(text, source_ref));
    }

    /// Appends a line that keeps the ref it already carries.
    pub fn push_existing(&mut self, line: SourceLine) {
        self.lines.push(line);
    }

    pub fn filename(&self) -> &Rc<str> {
        &self.filename
    }
}
