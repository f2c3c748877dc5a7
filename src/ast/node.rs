use crate::ast::tree::NodeId;
use crate::ast::types::{type_name, TypeId};
use crate::source::SourceRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum NodeType {
    BinaryOperation,
    BooleanLiteralValue,
    BranchRoot,
    ElifStatement,
    ElseStatement,
    Expression,
    FloatingPointLiteralValue,
    FunctionArgument,
    FunctionArguments,
    FunctionCall,
    FunctionDefinition,
    FunctionName,
    FunctionReturnType,
    IfStatement,
    IntegerLiteralValue,
    ListAccessor,
    ListStatement,
    ProgramRoot,
    ReturnStatement,
    StringLiteralValue,
    TypeConversion,
    TypeName,
    UnaryOperation,
    VariableDeclaration,
    VariableName,
    WhileStatement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BinaryOperation {
    Add,
    Sub,
    Mult,
    Div,
    And,
    Or,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Assign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum UnaryOperation {
    Not,
    Negative,
}

/// Payload of an AST node. Which variant is legal depends on the node type;
/// an illegal pairing is a bug, which is why the typed accessors panic.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum NodeValue {
    None,
    Integer(i64),
    FloatingPoint(f64),
    Boolean(bool),
    String(String),
    Type(TypeId),
    BinaryOperation(BinaryOperation),
    UnaryOperation(UnaryOperation),
}

impl Default for NodeValue {
    fn default() -> Self {
        NodeValue::None
    }
}

impl From<i64> for NodeValue {
    fn from(value: i64) -> Self {
        NodeValue::Integer(value)
    }
}

impl From<f64> for NodeValue {
    fn from(value: f64) -> Self {
        NodeValue::FloatingPoint(value)
    }
}

impl From<bool> for NodeValue {
    fn from(value: bool) -> Self {
        NodeValue::Boolean(value)
    }
}

impl From<&str> for NodeValue {
    fn from(value: &str) -> Self {
        NodeValue::String(value.into())
    }
}

impl From<String> for NodeValue {
    fn from(value: String) -> Self {
        NodeValue::String(value)
    }
}

impl From<BinaryOperation> for NodeValue {
    fn from(value: BinaryOperation) -> Self {
        NodeValue::BinaryOperation(value)
    }
}

impl From<UnaryOperation> for NodeValue {
    fn from(value: UnaryOperation) -> Self {
        NodeValue::UnaryOperation(value)
    }
}

/// A syntax tree node. Nodes live in the arena of their [`SyntaxTree`]; the
/// parent link is a plain index used for navigation only.
///
/// [`SyntaxTree`]: crate::ast::SyntaxTree
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Node {
    pub node_type: NodeType,
    pub value: NodeValue,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    pub source_ref: SourceRef,
}

impl Node {
    pub fn new(node_type: NodeType, parent: Option<NodeId>, source_ref: SourceRef) -> Self {
        Self {
            node_type,
            value: NodeValue::None,
            children: Vec::new(),
            parent,
            source_ref,
        }
    }

    pub fn int_num(&self) -> i64 {
        match self.value {
            NodeValue::Integer(value) => value,
            ref other => panic!("node value {other:?} does not hold an integer"),
        }
    }

    pub fn fp_num(&self) -> f64 {
        match self.value {
            NodeValue::FloatingPoint(value) => value,
            ref other => panic!("node value {other:?} does not hold a floating-point number"),
        }
    }

    pub fn boolean(&self) -> bool {
        match self.value {
            NodeValue::Boolean(value) => value,
            ref other => panic!("node value {other:?} does not hold a boolean"),
        }
    }

    pub fn str(&self) -> &str {
        match &self.value {
            NodeValue::String(value) => value,
            other => panic!("node value {other:?} does not hold a string"),
        }
    }

    pub fn type_id(&self) -> TypeId {
        match self.value {
            NodeValue::Type(value) => value,
            ref other => panic!("node value {other:?} does not hold a type id"),
        }
    }

    pub fn bin_op(&self) -> BinaryOperation {
        match self.value {
            NodeValue::BinaryOperation(value) => value,
            ref other => panic!("node value {other:?} does not hold a binary operation"),
        }
    }

    pub fn un_op(&self) -> UnaryOperation {
        match self.value {
            NodeValue::UnaryOperation(value) => value,
            ref other => panic!("node value {other:?} does not hold a unary operation"),
        }
    }

    /// One-line label used by the tree dump.
    pub fn label(&self) -> String {
        match &self.value {
            NodeValue::None => format!("{:?}", self.node_type),
            NodeValue::Integer(value) => format!("{:?}: {}", self.node_type, value),
            NodeValue::FloatingPoint(value) => format!("{:?}: {}", self.node_type, value),
            NodeValue::Boolean(value) => format!("{:?}: {}", self.node_type, value),
            NodeValue::String(value) => format!("{:?}: {}", self.node_type, value),
            NodeValue::Type(value) => format!("{:?}: {}", self.node_type, type_name(*value)),
            NodeValue::BinaryOperation(value) => format!("{:?}: {:?}", self.node_type, value),
            NodeValue::UnaryOperation(value) => format!("{:?}: {:?}", self.node_type, value),
        }
    }
}
