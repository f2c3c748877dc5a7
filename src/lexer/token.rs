use crate::source::SourceRef;

/// Reserved words of the language. Case-sensitive; only the literal
/// keywords `True`, `False` and `None` are capitalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Keyword {
    Bool,
    Int,
    Float,
    Str,
    List,
    None,
    True,
    False,
    If,
    Else,
    Elif,
    While,
    For,
    Range,
    In,
    Break,
    Continue,
    Return,
    Import,
    Definition,
    Or,
    And,
    Not,
}

impl Keyword {
    /// Source spelling of the keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Bool => "bool",
            Keyword::Int => "int",
            Keyword::Float => "float",
            Keyword::Str => "str",
            Keyword::List => "list",
            Keyword::None => "None",
            Keyword::True => "True",
            Keyword::False => "False",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::Elif => "elif",
            Keyword::While => "while",
            Keyword::For => "for",
            Keyword::Range => "range",
            Keyword::In => "in",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
            Keyword::Return => "return",
            Keyword::Import => "import",
            Keyword::Definition => "def",
            Keyword::Or => "or",
            Keyword::And => "and",
            Keyword::Not => "not",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Operator {
    Dot,
    Comma,
    Assign,
    Add,
    Sub,
    Mult,
    Div,
    Mod,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    LeftBrace,
    RightBrace,
    RectLeftBrace,
    RectRightBrace,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Dot => ".",
            Operator::Comma => ",",
            Operator::Assign => "=",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mult => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::LessEqual => "<=",
            Operator::GreaterEqual => ">=",
            Operator::LeftBrace => "(",
            Operator::RightBrace => ")",
            Operator::RectLeftBrace => "[",
            Operator::RectRightBrace => "]",
        }
    }
}

/// Markers that carry structure rather than content: block nesting, logical
/// line ends, and the two pieces of function-header punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Special {
    Indentation,
    EndOfExpression,
    Arrow,
    Colon,
}

impl Special {
    pub fn as_str(&self) -> &'static str {
        match self {
            Special::Indentation => "Indentation",
            Special::EndOfExpression => "EndOfExpression",
            Special::Arrow => "Arrow",
            Special::Colon => "Colon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TokenType {
    Keyword,
    Identifier,
    Operator,
    Special,
    IntegerLiteral,
    FloatingPointLiteral,
    StringLiteral,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Keyword => "Keyword",
            TokenType::Identifier => "Identifier",
            TokenType::Operator => "Operator",
            TokenType::Special => "Special",
            TokenType::IntegerLiteral => "IntegerLiteral",
            TokenType::FloatingPointLiteral => "FloatingPointLiteral",
            TokenType::StringLiteral => "StringLiteral",
        }
    }
}

/// Payload of a token. Literals keep their source spelling; numeric parsing
/// happens later, in the expression parser.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TokenValue {
    Keyword(Keyword),
    Identifier(String),
    Operator(Operator),
    Special(Special),
    IntegerLiteral(String),
    FloatingPointLiteral(String),
    StringLiteral(String),
}

impl From<Keyword> for TokenValue {
    fn from(value: Keyword) -> Self {
        TokenValue::Keyword(value)
    }
}

impl From<Operator> for TokenValue {
    fn from(value: Operator) -> Self {
        TokenValue::Operator(value)
    }
}

impl From<Special> for TokenValue {
    fn from(value: Special) -> Self {
        TokenValue::Special(value)
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Token {
    pub value: TokenValue,
    pub source_ref: SourceRef,
}

/// Positions never take part in comparisons.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Token {
    pub fn new(value: impl Into<TokenValue>, source_ref: SourceRef) -> Self {
        Self {
            value: value.into(),
            source_ref,
        }
    }

    pub fn identifier(name: impl Into<String>, source_ref: SourceRef) -> Self {
        Self {
            value: TokenValue::Identifier(name.into()),
            source_ref,
        }
    }

    pub fn token_type(&self) -> TokenType {
        match self.value {
            TokenValue::Keyword(_) => TokenType::Keyword,
            TokenValue::Identifier(_) => TokenType::Identifier,
            TokenValue::Operator(_) => TokenType::Operator,
            TokenValue::Special(_) => TokenType::Special,
            TokenValue::IntegerLiteral(_) => TokenType::IntegerLiteral,
            TokenValue::FloatingPointLiteral(_) => TokenType::FloatingPointLiteral,
            TokenValue::StringLiteral(_) => TokenType::StringLiteral,
        }
    }

    pub fn is(&self, value: impl Into<TokenValue>) -> bool {
        self.value == value.into()
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self.value, TokenValue::Identifier(_))
    }

    /// Identifier payload. Panics on any other token kind; asking for the
    /// wrong payload is a bug in the caller.
    pub fn id(&self) -> &str {
        match &self.value {
            TokenValue::Identifier(name) => name,
            other => panic!("token {other:?} is not an identifier"),
        }
    }

    /// Literal payload (integer, floating-point or string).
    pub fn literal(&self) -> &str {
        match &self.value {
            TokenValue::IntegerLiteral(text)
            | TokenValue::FloatingPointLiteral(text)
            | TokenValue::StringLiteral(text) => text,
            other => panic!("token {other:?} is not a literal"),
        }
    }

    pub fn kw(&self) -> Keyword {
        match self.value {
            TokenValue::Keyword(kw) => kw,
            ref other => panic!("token {other:?} is not a keyword"),
        }
    }

    pub fn op(&self) -> Operator {
        match self.value {
            TokenValue::Operator(op) => op,
            ref other => panic!("token {other:?} is not an operator"),
        }
    }

    pub fn spec(&self) -> Special {
        match self.value {
            TokenValue::Special(spec) => spec,
            ref other => panic!("token {other:?} is not a special token"),
        }
    }

    /// One-line fixed-width rendering used by golden tests and the driver.
    pub fn dump(&self) -> String {
        let payload = match &self.value {
            TokenValue::Keyword(kw) => kw.as_str(),
            TokenValue::Identifier(name) => name,
            TokenValue::Operator(op) => op.as_str(),
            TokenValue::Special(spec) => spec.as_str(),
            TokenValue::IntegerLiteral(text)
            | TokenValue::FloatingPointLiteral(text)
            | TokenValue::StringLiteral(text) => text,
        };
        format!("{:<21}: {}", self.token_type().as_str(), payload)
    }
}

pub type TokenList = Vec<Token>;

/// Dump of a whole token list, one token per line.
pub fn dump_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&token.dump());
        out.push('\n');
    }
    out
}
