//! Common test utilities and shared test data for the session-query crate

#![allow(dead_code)]

use session_query::{static_fields, FieldDescriptor, FieldRegistry, OperatorDefaults, ValueType};

/// A dynamic snapshot the way the remote field index would report it,
/// including a name collision with the static table.
pub fn dynamic_fields() -> Vec<FieldDescriptor> {
    let defaults = OperatorDefaults::default();
    vec![
        FieldDescriptor::new_dynamic("browser", ValueType::Text, &defaults),
        FieldDescriptor::new_dynamic("environment", ValueType::Text, &defaults),
        // Collides with the static entry; the static text descriptor must win
        FieldDescriptor::new_dynamic("app_version", ValueType::Long, &defaults),
    ]
}

pub fn sample_registry() -> FieldRegistry {
    FieldRegistry::merge(
        &static_fields(&OperatorDefaults::default()),
        &dynamic_fields(),
    )
}
