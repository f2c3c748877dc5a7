//! Recursive-descent parser driven by a subparser dispatch table. The table
//! maps the current AST node's type to the function that knows how to extend
//! it; `ParserContext::propagate` performs the lookup, so the tree spine
//! doubles as the parser's stack.

mod context;
mod expression;
mod statements;
mod type_registry;

pub use context::*;
pub use type_registry::*;

use std::collections::HashMap;

use log::debug;

use crate::ast::{NodeType, SyntaxTree};
use crate::errors::ErrorBuffer;
use crate::lexer::TokenList;

pub type Subparser = fn(&mut ParserContext);

/// The dispatch table is built fresh on every parse entry; there is no
/// global registration.
fn subparsers() -> HashMap<NodeType, Subparser> {
    HashMap::from([
        (NodeType::ProgramRoot, statements::parse_program_root as Subparser),
        (NodeType::FunctionDefinition, statements::parse_function_definition as Subparser),
        (NodeType::FunctionArguments, statements::parse_function_arguments as Subparser),
        (NodeType::BranchRoot, statements::parse_branch_root as Subparser),
        (NodeType::IfStatement, statements::parse_if_statement as Subparser),
        (NodeType::ElifStatement, statements::parse_elif_statement as Subparser),
        (NodeType::ElseStatement, statements::parse_else_statement as Subparser),
        (NodeType::WhileStatement, statements::parse_while_statement as Subparser),
        (NodeType::ReturnStatement, statements::parse_return_statement as Subparser),
        (NodeType::VariableDeclaration, statements::parse_variable_declaration as Subparser),
        (NodeType::ListStatement, statements::parse_list_statement as Subparser),
        (NodeType::Expression, expression::parse_expression as Subparser),
    ])
}

/// Builds a syntax tree from the token stream.
///
/// All diagnostics of the run are accumulated; the parse fails as a whole if
/// any were recorded. The returned tree's functions table is empty; it is
/// populated by the semantic analyzer.
pub fn parse(tokens: &TokenList) -> Result<SyntaxTree, ErrorBuffer> {
    let subparsers = subparsers();
    let mut tree = SyntaxTree::new();
    let errors = {
        let mut ctx = ParserContext::new(&subparsers, &mut tree, tokens);
        ctx.propagate();
        ctx.errors
    };
    debug!(
        "parsed {} node(s), {} diagnostic(s)",
        tree.len(),
        errors.len()
    );
    if errors.is_empty() {
        Ok(tree)
    } else {
        Err(errors)
    }
}
