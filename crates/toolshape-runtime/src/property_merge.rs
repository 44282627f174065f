//! Merging one property's schema across the variants of a union.
//!
//! Literal-valued properties (the discriminator of a tagged union, typically
//! `action`) merge into one `enum` holding every value any variant allows.
//! Any other conflict keeps the first-seen schema, so a shape that only a
//! later variant allows for that property is not represented.

use crate::literal::extract_literals;
use serde_json::{Map, Value};
use toolshape_types::schema::{JsonType, DESCRIPTIVE_KEYS, ENUM, TYPE};

/// Literal values gathered for one property, deduplicated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedLiterals {
    values: Vec<Value>,
}

impl MergedLiterals {
    /// Add a value unless an equal one is already present.
    pub fn push(&mut self, value: &Value) {
        if !self.values.contains(value) {
            self.values.push(value.clone());
        }
    }

    /// The collected values.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The primitive kind every value shares, if there is exactly one.
    pub fn shared_type(&self) -> Option<JsonType> {
        let (first, rest) = self.values.split_first()?;
        let kind = JsonType::of(first);
        rest.iter().all(|v| JsonType::of(v) == kind).then_some(kind)
    }

    /// Build the merged literal schema. Descriptive keys come from the first
    /// source that declares them.
    fn into_schema(self, sources: [&Value; 2]) -> Value {
        let mut merged = Map::new();
        for record in sources.iter().filter_map(|s| s.as_object()) {
            for key in DESCRIPTIVE_KEYS {
                if merged.contains_key(key) {
                    continue;
                }
                if let Some(value) = record.get(key) {
                    merged.insert(key.to_string(), value.clone());
                }
            }
        }
        if let Some(kind) = self.shared_type() {
            merged.insert(TYPE.to_string(), Value::String(kind.as_str().to_string()));
        }
        merged.insert(ENUM.to_string(), Value::Array(self.values));
        Value::Object(merged)
    }
}

/// Merge two schemas for the same property name.
///
/// If either side is a literal fragment the result is an `enum` of the union
/// of both literal sets. Otherwise `existing` is kept as is.
pub fn merge_property(existing: &Value, incoming: &Value) -> Value {
    let existing_literals = extract_literals(existing);
    let incoming_literals = extract_literals(incoming);
    if existing_literals.is_none() && incoming_literals.is_none() {
        return existing.clone();
    }

    let mut literals = MergedLiterals::default();
    for value in existing_literals
        .into_iter()
        .chain(incoming_literals)
        .flatten()
    {
        literals.push(value);
    }
    literals.into_schema([existing, incoming])
}

/// [`merge_property`] over optional sides: an absent side yields the other.
pub fn merge_optional_property(
    existing: Option<&Value>,
    incoming: Option<&Value>,
) -> Option<Value> {
    match (existing, incoming) {
        (Some(existing), Some(incoming)) => Some(merge_property(existing, incoming)),
        (Some(only), None) | (None, Some(only)) => Some(only.clone()),
        (None, None) => None,
    }
}
