use std::collections::BTreeMap;

use crate::ast::node::{Node, NodeType, NodeValue};
use crate::ast::types::TypeId;
use crate::source::SourceRef;

/// Handle to a node inside the arena of a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NodeId(usize);

/// Signature of a function as recorded by the semantic analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Function {
    pub return_type: TypeId,
    pub arguments_types: Vec<TypeId>,
}

pub type FunctionsTable = BTreeMap<String, Function>;

/// The syntax tree: an arena of nodes rooted at a `ProgramRoot`, plus the
/// functions table the semantic analyzer fills in later. The arena owns all
/// node storage; parent links are indices and never own anything upward.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
    pub functions: FunctionsTable,
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeType::ProgramRoot, None, SourceRef::default())],
            root: NodeId(0),
            functions: FunctionsTable::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every node id in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Creates a node that is not yet attached to any parent. Used for
    /// subtrees (function calls, list accessors) that are built before their
    /// place in the tree is known.
    pub fn add_detached(&mut self, node_type: NodeType, source_ref: SourceRef) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(node_type, None, source_ref));
        id
    }

    /// Appends a new child to `parent` and returns its id.
    pub fn push_child(
        &mut self,
        parent: NodeId,
        node_type: NodeType,
        source_ref: SourceRef,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(node_type, Some(parent), source_ref));
        self.node_mut(parent).children.push(id);
        id
    }

    /// Prepends a new child to `parent` and returns its id.
    pub fn unshift_child(
        &mut self,
        parent: NodeId,
        node_type: NodeType,
        source_ref: SourceRef,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(node_type, Some(parent), source_ref));
        self.node_mut(parent).children.insert(0, id);
        id
    }

    /// Prepends an already-built detached subtree to `parent`.
    pub fn attach_front(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.insert(0, child);
    }

    pub fn set_value(&mut self, id: NodeId, value: impl Into<NodeValue>) {
        self.node_mut(id).value = value.into();
    }

    /// Indented dump of the whole tree, two spaces per depth level.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.root, 0, &mut out);
        out
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&self.node(id).label());
        out.push('\n');
        for &child in self.children(id) {
            self.dump_node(child, depth + 1, out);
        }
    }

    fn subtree_eq(&self, id: NodeId, other: &SyntaxTree, other_id: NodeId) -> bool {
        let a = self.node(id);
        let b = other.node(other_id);
        a.node_type == b.node_type
            && a.value == b.value
            && a.children.len() == b.children.len()
            && a.children
                .iter()
                .zip(b.children.iter())
                .all(|(x, y)| self.subtree_eq(*x, other, *y))
    }
}

/// Structural comparison from the roots down; refs and the functions table
/// never take part.
impl PartialEq for SyntaxTree {
    fn eq(&self, other: &Self) -> bool {
        self.subtree_eq(self.root, other, other.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::node::BinaryOperation;

    #[test]
    fn test_push_and_unshift_order() {
        let mut tree = SyntaxTree::new();
        let root = tree.root();
        let first = tree.push_child(root, NodeType::FunctionDefinition, SourceRef::default());
        let _second = tree.push_child(root, NodeType::FunctionDefinition, SourceRef::default());
        let front = tree.unshift_child(root, NodeType::FunctionDefinition, SourceRef::default());
        assert_eq!(vec![front, first, _second], tree.children(root).to_vec());
        assert_eq!(Some(root), tree.parent(front));
    }

    #[test]
    fn test_structural_equality_ignores_refs() {
        let mut left = SyntaxTree::new();
        let child = left.push_child(
            left.root(),
            NodeType::IntegerLiteralValue,
            SourceRef::default(),
        );
        left.set_value(child, 1i64);

        let mut right = SyntaxTree::new();
        let mut source_ref = SourceRef::default();
        source_ref.line = 42;
        let child = right.push_child(right.root(), NodeType::IntegerLiteralValue, source_ref);
        right.set_value(child, 1i64);

        assert_eq!(left, right);
        right.set_value(child, 2i64);
        assert_ne!(left, right);
    }

    #[test]
    fn test_dump_indentation() {
        let mut tree = SyntaxTree::new();
        let def = tree.push_child(tree.root(), NodeType::FunctionDefinition, SourceRef::default());
        let name = tree.push_child(def, NodeType::FunctionName, SourceRef::default());
        tree.set_value(name, "main");
        let op = tree.push_child(def, NodeType::BinaryOperation, SourceRef::default());
        tree.set_value(op, BinaryOperation::Add);
        assert_eq!(
            "ProgramRoot\n  FunctionDefinition\n    FunctionName: main\n    BinaryOperation: Add\n",
            tree.dump()
        );
    }

    #[test]
    fn test_attach_front_sets_parent() {
        let mut tree = SyntaxTree::new();
        let expr = tree.push_child(tree.root(), NodeType::Expression, SourceRef::default());
        let call = tree.add_detached(NodeType::FunctionCall, SourceRef::default());
        assert_eq!(None, tree.parent(call));
        tree.attach_front(expr, call);
        assert_eq!(Some(expr), tree.parent(call));
        assert_eq!(&[call], tree.children(expr));
    }
}
