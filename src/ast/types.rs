/// Opaque handle to a recognized type name.
pub type TypeId = usize;

pub const UNKNOWN_TYPE: TypeId = 0;
pub const INT_TYPE: TypeId = 1;
pub const FLOAT_TYPE: TypeId = 2;
pub const BOOL_TYPE: TypeId = 3;
pub const STR_TYPE: TypeId = 4;
pub const LIST_TYPE: TypeId = 5;
pub const NONE_TYPE: TypeId = 6;

/// First id handed out to user-defined types.
pub const BUILTIN_TYPES_COUNT: usize = 7;

/// Name used in tree dumps.
pub fn type_name(id: TypeId) -> String {
    match id {
        UNKNOWN_TYPE => "UnknownType".into(),
        INT_TYPE => "IntType".into(),
        FLOAT_TYPE => "FloatType".into(),
        BOOL_TYPE => "BoolType".into(),
        STR_TYPE => "StrType".into(),
        LIST_TYPE => "ListType".into(),
        NONE_TYPE => "NoneType".into(),
        other => format!("UserType({other})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_type_names() {
        assert_eq!("UnknownType", type_name(UNKNOWN_TYPE));
        assert_eq!("IntType", type_name(INT_TYPE));
        assert_eq!("NoneType", type_name(NONE_TYPE));
        assert_eq!("UserType(7)", type_name(BUILTIN_TYPES_COUNT));
    }
}
