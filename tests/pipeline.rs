//! End-to-end tests over the whole front end:
//! preprocess -> lex -> parse, checked against golden dumps.

use pylet::lexer::dump_tokens;
use pylet::source::SourceFile;
use pylet::{lex, parse, preprocess};

fn source(text: &str) -> SourceFile {
    let lines = text.lines().collect::<Vec<_>>();
    SourceFile::from_lines(&lines, "main.pl")
}

#[test]
fn lexes_a_commented_program_into_the_expected_token_dump() {
    let file = source(
        "# greatest program ever written\n\
         def main() -> None:\n\
         \x20   x: int = 42 # the answer\n",
    );
    let tokens = lex(&preprocess(&file)).unwrap();
    assert_eq!(
        "Keyword              : def\n\
         Identifier           : main\n\
         Operator             : (\n\
         Operator             : )\n\
         Special              : Arrow\n\
         Keyword              : None\n\
         Special              : Colon\n\
         Special              : EndOfExpression\n\
         Special              : Indentation\n\
         Identifier           : x\n\
         Special              : Colon\n\
         Keyword              : int\n\
         Operator             : =\n\
         IntegerLiteral       : 42\n\
         Special              : EndOfExpression\n",
        dump_tokens(&tokens)
    );
}

#[test]
fn token_dump_distinguishes_every_payload() {
    let file = source("x 42 4.2 \"42\"\n");
    let tokens = lex(&preprocess(&file)).unwrap();
    let dumps = tokens
        .iter()
        .map(|token| token.dump())
        .collect::<std::collections::HashSet<_>>();
    // Integer 42 and string "42" carry the same text but must dump
    // differently; all five tokens stay distinct.
    assert_eq!(tokens.len(), dumps.len());
}

#[test]
fn parses_a_small_program_into_the_expected_tree_dump() {
    let file = source(
        "def fib(n: int) -> int:\n\
         \x20   if n < 2:\n\
         \x20       return n\n\
         \x20   return fib(n - 1) + fib(n - 2)\n",
    );
    let tree = parse(&lex(&preprocess(&file)).unwrap()).unwrap();
    assert_eq!(
        "ProgramRoot\n\
         \x20 FunctionDefinition\n\
         \x20   FunctionName: fib\n\
         \x20   FunctionArguments\n\
         \x20     FunctionArgument\n\
         \x20       TypeName: IntType\n\
         \x20       VariableName: n\n\
         \x20   FunctionReturnType: IntType\n\
         \x20   BranchRoot\n\
         \x20     IfStatement\n\
         \x20       Expression\n\
         \x20         BinaryOperation: Less\n\
         \x20           VariableName: n\n\
         \x20           IntegerLiteralValue: 2\n\
         \x20       BranchRoot\n\
         \x20         ReturnStatement\n\
         \x20           Expression\n\
         \x20             VariableName: n\n\
         \x20     ReturnStatement\n\
         \x20       Expression\n\
         \x20         BinaryOperation: Add\n\
         \x20           FunctionCall\n\
         \x20             FunctionName: fib\n\
         \x20             FunctionArguments\n\
         \x20               Expression\n\
         \x20                 BinaryOperation: Sub\n\
         \x20                   VariableName: n\n\
         \x20                   IntegerLiteralValue: 1\n\
         \x20           FunctionCall\n\
         \x20             FunctionName: fib\n\
         \x20             FunctionArguments\n\
         \x20               Expression\n\
         \x20                 BinaryOperation: Sub\n\
         \x20                   VariableName: n\n\
         \x20                   IntegerLiteralValue: 2\n",
        tree.dump()
    );
}

#[test]
fn comments_and_blank_lines_do_not_change_the_tree() {
    let plain = source(
        "def main() -> None:\n\
         \x20   x: int = 1\n",
    );
    let commented = source(
        "# leading comment\n\
         def main() -> None:\n\
         \n\
         \x20   x: int = 1 # trailing comment\n\
         # closing comment\n",
    );
    let plain_tree = parse(&lex(&preprocess(&plain)).unwrap()).unwrap();
    let commented_tree = parse(&lex(&preprocess(&commented)).unwrap()).unwrap();
    assert_eq!(plain_tree, commented_tree);
}

#[test]
fn hash_inside_a_string_survives_the_whole_pipeline() {
    let file = source(
        "def main() -> None:\n\
         \x20   x: str = \"a#b\"\n",
    );
    let tree = parse(&lex(&preprocess(&file)).unwrap()).unwrap();
    assert!(tree.dump().contains("StringLiteralValue: a#b"));
}

#[test]
fn diagnostics_carry_line_and_column() {
    let file = source(
        "def main() -> None:\n\
         \x20   x: int = @\n",
    );
    let errors = lex(&preprocess(&file)).unwrap_err();
    let record = &errors.records()[0];
    assert_eq!(2, record.source_ref.line);
    assert_eq!(14, record.source_ref.column);
    assert_eq!(
        "In line 2 in column 14 error:\nUnexpected symbol @",
        record.to_string()
    );
}

#[test]
fn lexer_collects_errors_from_every_line_before_failing() {
    let file = source(
        "def main() -> None:\n\
         \x20  x = 1\n\
         \x20   y = \"unterminated\n",
    );
    let errors = lex(&preprocess(&file)).unwrap_err();
    let messages = errors
        .records()
        .iter()
        .map(|record| record.message.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        vec![
            "Extra spaces at the beginning of line are not allowed",
            "No matching closing quote found",
        ],
        messages
    );
}

#[test]
fn functions_table_starts_empty_for_the_semantic_stage() {
    let file = source(
        "def main() -> None:\n\
         \x20   return\n",
    );
    let tree = parse(&lex(&preprocess(&file)).unwrap()).unwrap();
    assert!(tree.functions.is_empty());
}
