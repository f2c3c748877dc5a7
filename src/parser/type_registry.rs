use std::collections::HashMap;

use crate::ast::{
    TypeId, BOOL_TYPE, BUILTIN_TYPES_COUNT, FLOAT_TYPE, INT_TYPE, LIST_TYPE, NONE_TYPE, STR_TYPE,
    UNKNOWN_TYPE,
};
use crate::lexer::{Keyword, Token};

/// Maps recognized type names to ids. One registry lives inside each parse
/// invocation, so user-defined types cannot leak between programs.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    user_defined: HashMap<String, TypeId>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_typename(&self, token: &Token) -> bool {
        token.is(Keyword::Int)
            || token.is(Keyword::Float)
            || token.is(Keyword::Bool)
            || token.is(Keyword::Str)
            || token.is(Keyword::None)
            || token.is(Keyword::List)
            || (token.is_identifier() && self.user_defined.contains_key(token.id()))
    }

    pub fn type_id(&self, token: &Token) -> TypeId {
        if token.is_identifier() {
            return self
                .user_defined
                .get(token.id())
                .copied()
                .unwrap_or(UNKNOWN_TYPE);
        }
        if token.is(Keyword::Int) {
            INT_TYPE
        } else if token.is(Keyword::Float) {
            FLOAT_TYPE
        } else if token.is(Keyword::Bool) {
            BOOL_TYPE
        } else if token.is(Keyword::Str) {
            STR_TYPE
        } else if token.is(Keyword::List) {
            LIST_TYPE
        } else if token.is(Keyword::None) {
            NONE_TYPE
        } else {
            UNKNOWN_TYPE
        }
    }

    /// Registers a user-defined type name, returning its id. Registering the
    /// same name twice returns the existing id.
    pub fn register(&mut self, name: impl Into<String>) -> TypeId {
        let next = BUILTIN_TYPES_COUNT + self.user_defined.len();
        *self.user_defined.entry(name.into()).or_insert(next)
    }
}
