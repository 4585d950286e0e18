use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Value type of a searchable session field.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Text,
    Long,
    Boolean,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Text => write!(f, "text"),
            ValueType::Long => write!(f, "long"),
            ValueType::Boolean => write!(f, "boolean"),
        }
    }
}

impl FromStr for ValueType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "string" => Ok(ValueType::Text),
            "long" | "integer" | "int" => Ok(ValueType::Long),
            "boolean" | "bool" => Ok(ValueType::Boolean),
            _ => Err(()),
        }
    }
}

/// Where a field descriptor came from. Static entries are compiled in,
/// dynamic entries are fetched from the remote field index and may change.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldOrigin {
    Static,
    Dynamic,
}

impl std::fmt::Display for FieldOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldOrigin::Static => write!(f, "static"),
            FieldOrigin::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// Comparison kind applicable to a field's value type.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OperatorTag {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    Matches,
    Exists,
    NotExists,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Between,
    NotBetween,
    IsOneOf,
    NotOneOf,
}

/// How many values an operator expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorArity {
    /// No value at all (`exists`).
    Zero,
    /// Exactly one value.
    One,
    /// Exactly two values (`between` bounds).
    Two,
    /// A non-empty sequence of values (`is_one_of`).
    AtLeastOne,
}

impl OperatorTag {
    pub fn arity(&self) -> OperatorArity {
        match self {
            OperatorTag::Exists | OperatorTag::NotExists => OperatorArity::Zero,
            OperatorTag::Between | OperatorTag::NotBetween => OperatorArity::Two,
            OperatorTag::IsOneOf | OperatorTag::NotOneOf => OperatorArity::AtLeastOne,
            _ => OperatorArity::One,
        }
    }

    pub fn is_multi_value(&self) -> bool {
        matches!(
            self.arity(),
            OperatorArity::Two | OperatorArity::AtLeastOne
        )
    }
}

impl std::fmt::Display for OperatorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatorTag::Equals => write!(f, "equals"),
            OperatorTag::NotEquals => write!(f, "not_equals"),
            OperatorTag::Contains => write!(f, "contains"),
            OperatorTag::NotContains => write!(f, "not_contains"),
            OperatorTag::Matches => write!(f, "matches"),
            OperatorTag::Exists => write!(f, "exists"),
            OperatorTag::NotExists => write!(f, "not_exists"),
            OperatorTag::GreaterThan => write!(f, "greater_than"),
            OperatorTag::GreaterThanOrEqual => write!(f, "greater_than_or_equal"),
            OperatorTag::LessThan => write!(f, "less_than"),
            OperatorTag::LessThanOrEqual => write!(f, "less_than_or_equal"),
            OperatorTag::Between => write!(f, "between"),
            OperatorTag::NotBetween => write!(f, "not_between"),
            OperatorTag::IsOneOf => write!(f, "is_one_of"),
            OperatorTag::NotOneOf => write!(f, "not_one_of"),
        }
    }
}

impl FromStr for OperatorTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equals" | "is" | "eq" | "=" | "==" => Ok(OperatorTag::Equals),
            "not_equals" | "is_not" | "ne" | "!=" => Ok(OperatorTag::NotEquals),
            "contains" => Ok(OperatorTag::Contains),
            "not_contains" => Ok(OperatorTag::NotContains),
            "matches" | "regex" | "re" | "=~" => Ok(OperatorTag::Matches),
            "exists" => Ok(OperatorTag::Exists),
            "not_exists" => Ok(OperatorTag::NotExists),
            "greater_than" | "gt" | ">" => Ok(OperatorTag::GreaterThan),
            "greater_than_or_equal" | "ge" | "gte" | ">=" => Ok(OperatorTag::GreaterThanOrEqual),
            "less_than" | "lt" | "<" => Ok(OperatorTag::LessThan),
            "less_than_or_equal" | "le" | "lte" | "<=" => Ok(OperatorTag::LessThanOrEqual),
            "between" => Ok(OperatorTag::Between),
            "not_between" => Ok(OperatorTag::NotBetween),
            "is_one_of" | "in" => Ok(OperatorTag::IsOneOf),
            "not_one_of" | "not_in" => Ok(OperatorTag::NotOneOf),
            _ => Err(()),
        }
    }
}
