use crate::enums::{OperatorArity, OperatorTag, ValueType};
use crate::errors::ValidationError;
use crate::fields::FieldDescriptor;
use crate::registry::FieldRegistry;
use serde::{Deserialize, Serialize};

/// A literal value, type-checked against a field's value type.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Long(i64),
    Boolean(bool),
}

impl FieldValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            FieldValue::Text(_) => ValueType::Text,
            FieldValue::Long(_) => ValueType::Long,
            FieldValue::Boolean(_) => ValueType::Boolean,
        }
    }
}

/// User input for one clause: a single raw string or a sequence of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    One(String),
    Many(Vec<String>),
}

impl RawValue {
    pub fn none() -> Self {
        RawValue::Many(Vec::new())
    }

    fn as_strs(&self) -> Vec<&str> {
        match self {
            RawValue::One(s) => vec![s.as_str()],
            RawValue::Many(v) => v.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::One(s.to_string())
    }
}

impl From<Vec<String>> for RawValue {
    fn from(v: Vec<String>) -> Self {
        RawValue::Many(v)
    }
}

/// One field+operator+value filter condition.
///
/// `field` is a weak reference by name, re-resolved against the current
/// registry whenever the clause is used. A dynamic field can disappear
/// between builds of the same clause.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FilterClause {
    pub field: String,
    pub operator: OperatorTag,
    pub values: Vec<FieldValue>,
}

impl FilterClause {
    /// Value type of this clause, None for zero-value operators.
    pub fn value_type(&self) -> Option<ValueType> {
        self.values.first().map(FieldValue::value_type)
    }
}

/// Validate user input into a clause against the current registry.
///
/// Checks run in order: the field must resolve, the operator must be in the
/// field's allowed set, the values must match the operator's arity and
/// parse as the field's value type. The registry is never mutated.
pub fn build_clause(
    registry: &FieldRegistry,
    field: &str,
    operator: OperatorTag,
    raw: &RawValue,
) -> Result<FilterClause, ValidationError> {
    let descriptor = registry
        .lookup(field)
        .ok_or_else(|| ValidationError::UnknownField(field.to_string()))?;

    if !descriptor.allows(operator) {
        return Err(ValidationError::OperatorNotAllowed(
            field.to_string(),
            operator,
        ));
    }

    let raws = raw.as_strs();
    check_arity(field, operator, raws.len())?;

    let values = raws
        .iter()
        .map(|r| parse_value(descriptor, r))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FilterClause {
        field: field.to_string(),
        operator,
        values,
    })
}

fn check_arity(field: &str, operator: OperatorTag, got: usize) -> Result<(), ValidationError> {
    let expected = match operator.arity() {
        OperatorArity::Zero => {
            if got == 0 {
                return Ok(());
            }
            "no"
        }
        OperatorArity::One => {
            if got == 1 {
                return Ok(());
            }
            if got == 0 {
                return Err(ValidationError::EmptyValue(field.to_string()));
            }
            "exactly one"
        }
        OperatorArity::Two => {
            if got == 2 {
                return Ok(());
            }
            if got == 0 {
                return Err(ValidationError::EmptyValue(field.to_string()));
            }
            "exactly two"
        }
        OperatorArity::AtLeastOne => {
            if got > 0 {
                return Ok(());
            }
            return Err(ValidationError::EmptyValue(field.to_string()));
        }
    };
    Err(ValidationError::WrongValueCount {
        operator,
        expected,
        got,
    })
}

fn parse_value(descriptor: &FieldDescriptor, raw: &str) -> Result<FieldValue, ValidationError> {
    let mismatch = || ValidationError::TypeMismatch {
        field: descriptor.name.clone(),
        expected: descriptor.value_type,
        raw: raw.to_string(),
    };
    match descriptor.value_type {
        ValueType::Text => Ok(FieldValue::Text(raw.to_string())),
        ValueType::Long => raw
            .trim()
            .parse::<i64>()
            .map(FieldValue::Long)
            .map_err(|_| mismatch()),
        ValueType::Boolean => match raw {
            "true" => Ok(FieldValue::Boolean(true)),
            "false" => Ok(FieldValue::Boolean(false)),
            _ => Err(mismatch()),
        },
    }
}
