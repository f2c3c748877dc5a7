//! Fluent builder for constructing syntax trees by hand, mostly in tests
//! that compare an expected tree against parser output.

use crate::ast::node::{NodeType, NodeValue};
use crate::ast::tree::{NodeId, SyntaxTree};
use crate::source::SourceRef;

/// Builds a tree top-down. `node` adds a sibling under the current parent;
/// `with_children`/`end_children` move the parent focus down and up.
#[derive(Debug, Clone)]
pub struct DeclarativeTree {
    tree: SyntaxTree,
    parent: NodeId,
    current: Option<NodeId>,
}

impl Default for DeclarativeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarativeTree {
    pub fn new() -> Self {
        let tree = SyntaxTree::new();
        let parent = tree.root();
        Self {
            tree,
            parent,
            current: None,
        }
    }

    pub fn node(&mut self, node_type: NodeType) -> &mut Self {
        let id = self
            .tree
            .push_child(self.parent, node_type, SourceRef::default());
        self.current = Some(id);
        self
    }

    pub fn node_with(&mut self, node_type: NodeType, value: impl Into<NodeValue>) -> &mut Self {
        self.node(node_type);
        if let Some(id) = self.current {
            self.tree.set_value(id, value);
        }
        self
    }

    /// Makes the most recently added node the parent of what follows.
    pub fn with_children(&mut self) -> &mut Self {
        if let Some(id) = self.current {
            self.parent = id;
        }
        self.current = None;
        self
    }

    /// Returns the focus to the grandparent level.
    pub fn end_children(&mut self) -> &mut Self {
        if let Some(up) = self.tree.parent(self.parent) {
            self.parent = up;
        }
        self.current = None;
        self
    }

    pub fn make_tree(&self) -> SyntaxTree {
        self.tree.clone()
    }
}
