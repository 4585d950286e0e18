use crate::fields::{static_fields, FieldDescriptor, OperatorDefaults};
use indexmap::IndexMap;

/// Merged view over the static field table and the latest dynamic snapshot.
///
/// A registry is recomputed from its two immutable inputs rather than
/// mutated in place: repeated merges with the same inputs produce the same
/// registry, and the last dynamic snapshot wins. Static entries take
/// precedence over dynamic ones on a name collision.
pub struct FieldRegistry {
    fields: IndexMap<String, FieldDescriptor>,
}

impl FieldRegistry {
    /// Recompute the merged registry. Static entries come first, then
    /// dynamic entries, de-duplicated by name with static precedence.
    pub fn merge(
        static_entries: &[FieldDescriptor],
        dynamic_entries: &[FieldDescriptor],
    ) -> Self {
        let mut fields = IndexMap::new();
        for descriptor in static_entries.iter().chain(dynamic_entries) {
            fields
                .entry(descriptor.name.clone())
                .or_insert_with(|| descriptor.clone());
        }
        Self { fields }
    }

    /// The static table alone, with default operator sets.
    pub fn builtin() -> Self {
        Self::merge(&static_fields(&OperatorDefaults::default()), &[])
    }

    /// Unknown names resolve to None, never an error. A clause can outlive
    /// the dynamic field it references, so callers must handle absence.
    pub fn lookup(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    pub fn all_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
