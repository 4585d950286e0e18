use crate::enums::{OperatorTag, ValueType};

/// Error types for clause validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UnknownField(String),
    OperatorNotAllowed(String, OperatorTag),
    TypeMismatch {
        field: String,
        expected: ValueType,
        raw: String,
    },
    EmptyValue(String),
    WrongValueCount {
        operator: OperatorTag,
        expected: &'static str,
        got: usize,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::UnknownField(name) => write!(f, "Unknown field: {}", name),
            ValidationError::OperatorNotAllowed(field, op) => {
                write!(f, "Operator {} not allowed for field {}", op, field)
            }
            ValidationError::TypeMismatch {
                field,
                expected,
                raw,
            } => write!(
                f,
                "Type mismatch for field {}: expected {}, got {:?}",
                field, expected, raw
            ),
            ValidationError::EmptyValue(field) => {
                write!(f, "Empty value sequence for field {}", field)
            }
            ValidationError::WrongValueCount {
                operator,
                expected,
                got,
            } => write!(
                f,
                "Operator {} expects {} value(s), got {}",
                operator, expected, got
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Error types for query string parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnexpectedCharacter(char),
    Expected(&'static str),
    UnexpectedEnd,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnexpectedCharacter(ch) => write!(f, "Unexpected character: {}", ch),
            ParseError::Expected(what) => write!(f, "Expected {}", what),
            ParseError::UnexpectedEnd => write!(f, "Unexpected end of query"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Combined error for the parse-then-validate path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    Parse(ParseError),
    Validation(ValidationError),
}

impl From<ParseError> for QueryError {
    fn from(err: ParseError) -> Self {
        QueryError::Parse(err)
    }
}

impl From<ValidationError> for QueryError {
    fn from(err: ValidationError) -> Self {
        QueryError::Validation(err)
    }
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::Parse(err) => write!(f, "Parse error: {}", err),
            QueryError::Validation(err) => write!(f, "Validation error: {}", err),
        }
    }
}

impl std::error::Error for QueryError {}
