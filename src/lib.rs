//! Front end of the Pylet compiler: preprocessor, lexer and parser for a
//! small whitespace-significant scripting language. Later stages (semantic
//! analysis, IR generation) consume the [`ast::SyntaxTree`] produced here.

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod preprocessor;
pub mod source;

pub use lexer::lex;
pub use parser::parse;
pub use preprocessor::preprocess;
