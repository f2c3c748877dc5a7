//! Comment removal. Runs before the lexer and keeps line identities intact,
//! so every surviving character still maps to its original (line, column).

use crate::source::SourceFile;

/// Strips `#` line comments and drops lines that end up empty.
///
/// Both quote kinds shield a `#` from being treated as a comment marker, and
/// a quote inside the opposite kind of quotes does not toggle its flag. The
/// lexer itself only accepts `"` as a string delimiter; the apostrophe is
/// honored here solely for comment skipping.
pub fn preprocess(source: &SourceFile) -> SourceFile {
    let mut result = SourceFile::new(source.filename());
    for line in &source.lines {
        let mut in_single = false;
        let mut in_double = false;
        let mut cut = line.text.len();
        for (i, sym) in line.text.char_indices() {
            match sym {
                '\'' if !in_double => in_single = !in_single,
                '"' if !in_single => in_double = !in_double,
                '#' if !in_single && !in_double => {
                    cut = i;
                    break;
                }
                _ => {}
            }
        }
        if cut != 0 {
            let mut kept = line.clone();
            kept.text.truncate(cut);
            result.push_existing(kept);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(file: &SourceFile) -> Vec<(&str, usize)> {
        file.lines
            .iter()
            .map(|line| (line.text.as_str(), line.source_ref.line))
            .collect()
    }

    #[test]
    fn test_strips_trailing_comment() {
        let file = SourceFile::from_lines(&["x = 1 # set x"], "test.pl");
        let result = preprocess(&file);
        assert_eq!(vec![("x = 1 ", 1)], lines_of(&result));
    }

    #[test]
    fn test_drops_comment_only_and_empty_lines() {
        let file = SourceFile::from_lines(&["# header", "", "x = 1"], "test.pl");
        let result = preprocess(&file);
        assert_eq!(vec![("x = 1", 3)], lines_of(&result));
    }

    #[test]
    fn test_hash_inside_double_quotes_survives() {
        let file = SourceFile::from_lines(&["x = \"a#b\""], "test.pl");
        let result = preprocess(&file);
        assert_eq!(vec![("x = \"a#b\"", 1)], lines_of(&result));
    }

    #[test]
    fn test_hash_inside_single_quotes_survives() {
        let file = SourceFile::from_lines(&["x = 'a#b' # cut here"], "test.pl");
        let result = preprocess(&file);
        assert_eq!(vec![("x = 'a#b' ", 1)], lines_of(&result));
    }

    #[test]
    fn test_opposite_quote_does_not_toggle() {
        // The apostrophe sits inside double quotes, so it must not open a
        // single-quoted string; the # afterwards is a real comment.
        let file = SourceFile::from_lines(&["x = \"it's\" # gone"], "test.pl");
        let result = preprocess(&file);
        assert_eq!(vec![("x = \"it's\" ", 1)], lines_of(&result));
    }

    #[test]
    fn test_line_of_spaces_is_kept() {
        let file = SourceFile::from_lines(&["    "], "test.pl");
        let result = preprocess(&file);
        assert_eq!(vec![("    ", 1)], lines_of(&result));
    }

    #[test]
    fn test_idempotence() {
        let file = SourceFile::from_lines(
            &["def main() -> None: # entry", "    x = \"a#b\"", "# done"],
            "test.pl",
        );
        let once = preprocess(&file);
        let twice = preprocess(&once);
        assert_eq!(once, twice);
    }
}
