//! The abstract syntax tree shared by every stage after the lexer: typed
//! nodes with child lists and non-owning parent back-links, stored in an
//! arena owned by the tree.

mod declarative;
mod node;
mod tree;
mod types;

pub use declarative::*;
pub use node::*;
pub use tree::*;
pub use types::*;
