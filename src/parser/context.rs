use std::collections::HashMap;

use crate::ast::{NodeId, NodeType, SyntaxTree};
use crate::errors::ErrorBuffer;
use crate::lexer::{Special, Token};
use crate::parser::type_registry::TypeRegistry;
use crate::parser::Subparser;
use crate::source::SourceRef;

/// Mutable state threaded through every subparser: the tree under
/// construction, the cursor into the token stream, the expected block
/// nesting, and the diagnostics collected so far.
pub struct ParserContext<'a> {
    subparsers: &'a HashMap<NodeType, Subparser>,
    pub tree: &'a mut SyntaxTree,
    pub node: NodeId,
    pub(crate) tokens: &'a [Token],
    pub pos: usize,
    pub nesting_level: usize,
    pub errors: ErrorBuffer,
    pub types: TypeRegistry,
}

impl<'a> ParserContext<'a> {
    pub fn new(
        subparsers: &'a HashMap<NodeType, Subparser>,
        tree: &'a mut SyntaxTree,
        tokens: &'a [Token],
    ) -> Self {
        let node = tree.root();
        Self {
            subparsers,
            tree,
            node,
            tokens,
            pos: 0,
            nesting_level: 0,
            errors: ErrorBuffer::new(),
            types: TypeRegistry::new(),
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Token under the cursor, if any.
    pub fn token(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Token `offset` positions ahead of the cursor.
    pub fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    pub fn token_at(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn go_next_token(&mut self) {
        self.pos += 1;
    }

    /// Skips until just past the next `EndOfExpression`.
    pub fn go_next_expression(&mut self) {
        while let Some(token) = self.token() {
            let done = token.is(Special::EndOfExpression);
            self.go_next_token();
            if done {
                return;
            }
        }
    }

    pub fn go_parent_node(&mut self) {
        if let Some(parent) = self.tree.parent(self.node) {
            self.node = parent;
        }
    }

    /// Invokes the subparser registered for the current node's type.
    pub fn propagate(&mut self) {
        let node_type = self.tree.node(self.node).node_type;
        match self.subparsers.get(&node_type).copied() {
            Some(subparser) => subparser(self),
            None => unreachable!("no subparser registered for {node_type:?}"),
        }
    }

    /// Ref of the token under the cursor, or of the stream end.
    pub fn current_ref(&self) -> SourceRef {
        match self.token().or_else(|| self.tokens.last()) {
            Some(token) => token.source_ref.clone(),
            None => SourceRef::default(),
        }
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        let source_ref = self.current_ref();
        self.errors.push(source_ref, message);
    }

    /// Appends a child under the current node, stamped with the current
    /// token's ref, and returns its id.
    pub fn push_child_node(&mut self, node_type: NodeType) -> NodeId {
        let source_ref = self.current_ref();
        self.tree.push_child(self.node, node_type, source_ref)
    }
}
