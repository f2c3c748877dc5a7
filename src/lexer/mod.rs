//! Line-oriented lexer. Every line is tokenized independently and ends with
//! a single `EndOfExpression` marker; leading four-space groups become
//! explicit `Indentation` tokens for the parser's block detection.

mod token;

pub use token::*;

use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;

use crate::errors::ErrorBuffer;
use crate::source::{SourceFile, SourceLine};

static KEYWORDS: Lazy<HashMap<&'static str, Keyword>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for kw in [
        Keyword::Bool,
        Keyword::Int,
        Keyword::Float,
        Keyword::Str,
        Keyword::List,
        Keyword::None,
        Keyword::True,
        Keyword::False,
        Keyword::If,
        Keyword::Else,
        Keyword::Elif,
        Keyword::While,
        Keyword::For,
        Keyword::Range,
        Keyword::In,
        Keyword::Break,
        Keyword::Continue,
        Keyword::Return,
        Keyword::Import,
        Keyword::Definition,
        Keyword::Or,
        Keyword::And,
        Keyword::Not,
    ] {
        map.insert(kw.as_str(), kw);
    }
    map
});

/// Turns a preprocessed source file into a flat token stream.
///
/// Diagnostics are accumulated across the whole file; the stage fails as a
/// whole if any line produced one.
pub fn lex(source: &SourceFile) -> Result<TokenList, ErrorBuffer> {
    let mut tokens = TokenList::new();
    let mut errors = ErrorBuffer::new();
    for line in &source.lines {
        lex_line(line, &mut tokens, &mut errors);
    }
    debug!(
        "lexed {} token(s) from {} ({} diagnostic(s))",
        tokens.len(),
        source.filename(),
        errors.len()
    );
    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

fn is_ident_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn lex_line(line: &SourceLine, tokens: &mut TokenList, errors: &mut ErrorBuffer) {
    let text = line.text.as_str();
    let bytes = text.as_bytes();

    let space_count = bytes.iter().take_while(|byte| **byte == b' ').count();
    // A line of nothing but spaces yields no tokens at all, not even the
    // end-of-expression marker.
    if space_count == bytes.len() {
        return;
    }

    if space_count % 4 != 0 {
        errors.push(
            line.make_ref(1),
            "Extra spaces at the beginning of line are not allowed",
        );
    }
    for level in 0..space_count / 4 {
        tokens.push(Token::new(
            Special::Indentation,
            line.make_ref(level * 4 + 1),
        ));
    }

    let mut pos = space_count;
    while pos < bytes.len() {
        let byte = bytes[pos];
        match byte {
            b' ' | b'\t' => pos += 1,
            _ if is_ident_start(byte) => {
                let start = pos;
                while pos < bytes.len() && is_ident_char(bytes[pos]) {
                    pos += 1;
                }
                let word = &text[start..pos];
                match KEYWORDS.get(word) {
                    Some(kw) => tokens.push(Token::new(*kw, line.make_ref(start + 1))),
                    None => tokens.push(Token::identifier(word, line.make_ref(start + 1))),
                }
            }
            b'0'..=b'9' => {
                let start = pos;
                while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    pos += 1;
                }
                let mut is_float = false;
                if pos < bytes.len() && bytes[pos] == b'.' {
                    is_float = true;
                    pos += 1;
                    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                        pos += 1;
                    }
                }
                if pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
                    errors.push(
                        line.make_ref(pos + 1),
                        "Unexpected characters in numeric literal",
                    );
                }
                let literal = text[start..pos].to_string();
                let value = if is_float {
                    TokenValue::FloatingPointLiteral(literal)
                } else {
                    TokenValue::IntegerLiteral(literal)
                };
                tokens.push(Token::new(value, line.make_ref(start + 1)));
            }
            b'"' => {
                let opening = pos;
                pos += 1;
                let start = pos;
                while pos < bytes.len() && bytes[pos] != b'"' {
                    pos += 1;
                }
                tokens.push(Token::new(
                    TokenValue::StringLiteral(text[start..pos].to_string()),
                    line.make_ref(opening + 1),
                ));
                if pos == bytes.len() {
                    errors.push(
                        line.make_ref(bytes.len() + 1),
                        "No matching closing quote found",
                    );
                    break;
                }
                pos += 1;
            }
            b'=' | b'!' | b'<' | b'>' => {
                let start = pos;
                let followed_by_eq = pos + 1 < bytes.len() && bytes[pos + 1] == b'=';
                let op = match (byte, followed_by_eq) {
                    (b'=', true) => Some(Operator::Equal),
                    (b'=', false) => Some(Operator::Assign),
                    (b'!', true) => Some(Operator::NotEqual),
                    // A lone `!` matches no operator and produces no token.
                    (b'!', false) => None,
                    (b'<', true) => Some(Operator::LessEqual),
                    (b'<', false) => Some(Operator::Less),
                    (b'>', true) => Some(Operator::GreaterEqual),
                    (b'>', false) => Some(Operator::Greater),
                    _ => None,
                };
                if let Some(op) = op {
                    tokens.push(Token::new(op, line.make_ref(start + 1)));
                }
                pos += if followed_by_eq { 2 } else { 1 };
            }
            b'-' => {
                if pos + 1 < bytes.len() && bytes[pos + 1] == b'>' {
                    tokens.push(Token::new(Special::Arrow, line.make_ref(pos + 1)));
                    pos += 2;
                } else {
                    tokens.push(Token::new(Operator::Sub, line.make_ref(pos + 1)));
                    pos += 1;
                }
            }
            b':' => {
                tokens.push(Token::new(Special::Colon, line.make_ref(pos + 1)));
                pos += 1;
            }
            b'+' | b'*' | b'/' | b'%' | b'.' | b',' | b'(' | b')' | b'[' | b']' => {
                let op = match byte {
                    b'+' => Operator::Add,
                    b'*' => Operator::Mult,
                    b'/' => Operator::Div,
                    b'%' => Operator::Mod,
                    b'.' => Operator::Dot,
                    b',' => Operator::Comma,
                    b'(' => Operator::LeftBrace,
                    b')' => Operator::RightBrace,
                    b'[' => Operator::RectLeftBrace,
                    _ => Operator::RectRightBrace,
                };
                tokens.push(Token::new(op, line.make_ref(pos + 1)));
                pos += 1;
            }
            _ => {
                errors.push(
                    line.make_ref(pos + 1),
                    format!("Unexpected symbol {}", byte as char),
                );
                break;
            }
        }
    }

    tokens.push(Token::new(
        Special::EndOfExpression,
        line.make_ref(text.len() + 1),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_str(text: &str) -> Result<TokenList, ErrorBuffer> {
        let lines = text.lines().collect::<Vec<_>>();
        lex(&SourceFile::from_lines(&lines, "test.pl"))
    }

    fn values(tokens: &[Token]) -> Vec<TokenValue> {
        tokens.iter().map(|token| token.value.clone()).collect()
    }

    #[test]
    fn test_lex_keywords_and_identifier() {
        let tokens = lex_str("if foo").unwrap();
        assert_eq!(
            vec![
                TokenValue::Keyword(Keyword::If),
                TokenValue::Identifier("foo".into()),
                TokenValue::Special(Special::EndOfExpression),
            ],
            values(&tokens)
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        let tokens = lex_str("True true None").unwrap();
        assert_eq!(
            vec![
                TokenValue::Keyword(Keyword::True),
                TokenValue::Identifier("true".into()),
                TokenValue::Keyword(Keyword::None),
                TokenValue::Special(Special::EndOfExpression),
            ],
            values(&tokens)
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let tokens = lex_str("if2").unwrap();
        assert_eq!(
            vec![
                TokenValue::Identifier("if2".into()),
                TokenValue::Special(Special::EndOfExpression),
            ],
            values(&tokens)
        );
    }

    #[test]
    fn test_lex_numeric_literals() {
        let tokens = lex_str("42 3.14 7.").unwrap();
        assert_eq!(
            vec![
                TokenValue::IntegerLiteral("42".into()),
                TokenValue::FloatingPointLiteral("3.14".into()),
                TokenValue::FloatingPointLiteral("7.".into()),
                TokenValue::Special(Special::EndOfExpression),
            ],
            values(&tokens)
        );
    }

    #[test]
    fn test_numeric_literal_with_trailing_letters() {
        let errors = lex_str("12ab").unwrap_err();
        assert_eq!(1, errors.len());
        assert_eq!(
            "Unexpected characters in numeric literal",
            errors.records()[0].message
        );
        assert_eq!(3, errors.records()[0].source_ref.column);
    }

    #[test]
    fn test_lex_two_character_operators() {
        let tokens = lex_str("== != <= >= < > =").unwrap();
        assert_eq!(
            vec![
                TokenValue::Operator(Operator::Equal),
                TokenValue::Operator(Operator::NotEqual),
                TokenValue::Operator(Operator::LessEqual),
                TokenValue::Operator(Operator::GreaterEqual),
                TokenValue::Operator(Operator::Less),
                TokenValue::Operator(Operator::Greater),
                TokenValue::Operator(Operator::Assign),
                TokenValue::Special(Special::EndOfExpression),
            ],
            values(&tokens)
        );
    }

    #[test]
    fn test_arrow_and_colon_are_special() {
        let tokens = lex_str("-> : -").unwrap();
        assert_eq!(
            vec![
                TokenValue::Special(Special::Arrow),
                TokenValue::Special(Special::Colon),
                TokenValue::Operator(Operator::Sub),
                TokenValue::Special(Special::EndOfExpression),
            ],
            values(&tokens)
        );
    }

    #[test]
    fn test_indentation_tokens() {
        let tokens = lex_str("        x = 1").unwrap();
        assert_eq!(TokenValue::Special(Special::Indentation), tokens[0].value);
        assert_eq!(TokenValue::Special(Special::Indentation), tokens[1].value);
        assert_eq!(TokenValue::Identifier("x".into()), tokens[2].value);
        assert_eq!(1, tokens[0].source_ref.column);
        assert_eq!(5, tokens[1].source_ref.column);
    }

    #[test]
    fn test_extra_spaces_are_reported_but_lexing_continues() {
        let errors = lex_str("   x = 1").unwrap_err();
        assert_eq!(1, errors.len());
        assert_eq!(
            "Extra spaces at the beginning of line are not allowed",
            errors.records()[0].message
        );
        assert_eq!(1, errors.records()[0].source_ref.column);
    }

    #[test]
    fn test_blank_line_produces_no_tokens() {
        let tokens = lex_str("x = 1\n    \ny = 2").unwrap();
        let ends = tokens
            .iter()
            .filter(|token| token.is(Special::EndOfExpression))
            .count();
        assert_eq!(2, ends);
    }

    #[test]
    fn test_every_line_ends_with_end_of_expression() {
        let tokens = lex_str("x = 1\ny = 2").unwrap();
        assert!(tokens[3].is(Special::EndOfExpression));
        assert!(tokens.last().unwrap().is(Special::EndOfExpression));
        // one past the last character of "y = 2"
        assert_eq!(6, tokens.last().unwrap().source_ref.column);
    }

    #[test]
    fn test_string_literal() {
        let tokens = lex_str("x = \"hello world\"").unwrap();
        assert_eq!(
            TokenValue::StringLiteral("hello world".into()),
            tokens[2].value
        );
        assert_eq!(5, tokens[2].source_ref.column);
    }

    #[test]
    fn test_unclosed_string_still_emits_partial_literal() {
        let errors = lex_str("x = \"oops").unwrap_err();
        assert_eq!(
            "No matching closing quote found",
            errors.records()[0].message
        );
    }

    #[test]
    fn test_single_quote_is_not_a_string_delimiter() {
        let errors = lex_str("x = 'y'").unwrap_err();
        assert!(errors
            .records()
            .iter()
            .any(|record| record.message == "Unexpected symbol '"));
    }

    #[test]
    fn test_unexpected_symbol_stops_the_line() {
        let errors = lex_str("x @ y").unwrap_err();
        assert_eq!(1, errors.len());
        assert_eq!("Unexpected symbol @", errors.records()[0].message);
        assert_eq!(3, errors.records()[0].source_ref.column);
    }

    #[test]
    fn test_bare_bang_produces_no_token() {
        let tokens = lex_str("a ! b").unwrap();
        assert_eq!(
            vec![
                TokenValue::Identifier("a".into()),
                TokenValue::Identifier("b".into()),
                TokenValue::Special(Special::EndOfExpression),
            ],
            values(&tokens)
        );
    }

    #[test]
    fn test_function_header() {
        let tokens = lex_str("def main(a: int) -> None:").unwrap();
        assert_eq!(
            vec![
                TokenValue::Keyword(Keyword::Definition),
                TokenValue::Identifier("main".into()),
                TokenValue::Operator(Operator::LeftBrace),
                TokenValue::Identifier("a".into()),
                TokenValue::Special(Special::Colon),
                TokenValue::Keyword(Keyword::Int),
                TokenValue::Operator(Operator::RightBrace),
                TokenValue::Special(Special::Arrow),
                TokenValue::Keyword(Keyword::None),
                TokenValue::Special(Special::Colon),
                TokenValue::Special(Special::EndOfExpression),
            ],
            values(&tokens)
        );
    }
}
