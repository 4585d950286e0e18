use crate::enums::{FieldOrigin, OperatorTag, ValueType};
use serde::{Deserialize, Serialize};

/// Name of the distinguished temporal field every query is bounded by.
pub const TIME_RANGE_FIELD: &str = "created_at";

/// A named, typed attribute of a session that can be filtered on.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub value_type: ValueType,
    pub operators: Vec<OperatorTag>,
    pub origin: FieldOrigin,
}

impl FieldDescriptor {
    /// Compiled-in field, operator set defaulted by value type.
    pub fn new_static(name: &str, value_type: ValueType, defaults: &OperatorDefaults) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            operators: defaults.for_type(value_type).to_vec(),
            origin: FieldOrigin::Static,
        }
    }

    /// Field reported by the remote field index, operator set defaulted by
    /// value type unless the index supplied one.
    pub fn new_dynamic(name: &str, value_type: ValueType, defaults: &OperatorDefaults) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            operators: defaults.for_type(value_type).to_vec(),
            origin: FieldOrigin::Dynamic,
        }
    }

    pub fn with_operators(mut self, operators: &[OperatorTag]) -> Self {
        self.operators = operators.to_vec();
        self
    }

    pub fn allows(&self, operator: OperatorTag) -> bool {
        self.operators.contains(&operator)
    }
}

/// Default operator sets per value type.
///
/// Configuration data, not logic: a deployment can override the sets from
/// a YAML document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OperatorDefaults {
    pub text: Vec<OperatorTag>,
    pub long: Vec<OperatorTag>,
    pub boolean: Vec<OperatorTag>,
}

impl Default for OperatorDefaults {
    fn default() -> Self {
        Self {
            text: vec![
                OperatorTag::Equals,
                OperatorTag::NotEquals,
                OperatorTag::Contains,
                OperatorTag::NotContains,
                OperatorTag::Matches,
                OperatorTag::Exists,
                OperatorTag::NotExists,
                OperatorTag::IsOneOf,
                OperatorTag::NotOneOf,
            ],
            long: vec![
                OperatorTag::Equals,
                OperatorTag::NotEquals,
                OperatorTag::GreaterThan,
                OperatorTag::GreaterThanOrEqual,
                OperatorTag::LessThan,
                OperatorTag::LessThanOrEqual,
                OperatorTag::Between,
                OperatorTag::NotBetween,
                OperatorTag::Exists,
                OperatorTag::NotExists,
            ],
            boolean: vec![OperatorTag::Equals],
        }
    }
}

impl OperatorDefaults {
    pub fn for_type(&self, value_type: ValueType) -> &[OperatorTag] {
        match value_type {
            ValueType::Text => &self.text,
            ValueType::Long => &self.long,
            ValueType::Boolean => &self.boolean,
        }
    }

    /// Parse an override document, e.g.
    ///
    /// ```yaml
    /// text: [equals, contains]
    /// long: [equals, greater_than]
    /// boolean: [equals]
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(yaml)
    }
}

/// The compiled-in session field table.
///
/// Fields with comparison semantics narrower than their value type's default
/// set carry an explicit operator list: durations and counters compare as
/// ranges, presence flags only ever test equality.
pub fn static_fields(defaults: &OperatorDefaults) -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new_static("app_version", ValueType::Text, defaults),
        FieldDescriptor::new_static("active_length", ValueType::Long, defaults).with_operators(&[
            OperatorTag::GreaterThan,
            OperatorTag::LessThan,
            OperatorTag::Between,
            OperatorTag::NotBetween,
        ]),
        FieldDescriptor::new_static("pages_visited", ValueType::Long, defaults)
            .with_operators(&[OperatorTag::Between, OperatorTag::NotBetween]),
        FieldDescriptor::new_static("viewed", ValueType::Boolean, defaults),
        FieldDescriptor::new_static("viewed_by_me", ValueType::Boolean, defaults)
            .with_operators(&[OperatorTag::Equals]),
        FieldDescriptor::new_static("has_errors", ValueType::Boolean, defaults)
            .with_operators(&[OperatorTag::Equals]),
        FieldDescriptor::new_static("has_rage_clicks", ValueType::Boolean, defaults)
            .with_operators(&[OperatorTag::Equals]),
        FieldDescriptor::new_static("processed", ValueType::Boolean, defaults),
        FieldDescriptor::new_static("first_time", ValueType::Boolean, defaults),
        FieldDescriptor::new_static("starred", ValueType::Boolean, defaults),
        FieldDescriptor::new_static("has_comments", ValueType::Boolean, defaults)
            .with_operators(&[OperatorTag::Equals]),
    ]
}
