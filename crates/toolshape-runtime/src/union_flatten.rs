//! Flattening a top-level `anyOf` union into a single object schema.
//!
//! The flattened schema's `properties` is the union of every object
//! variant's properties (literal discriminators merged into one `enum`), and
//! its `required` is the strict intersection of the variants' `required`
//! lists: a key any single variant may omit cannot be required.

use crate::property_merge::merge_optional_property;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use toolshape_types::schema::{
    self, SchemaKind, ADDITIONAL_PROPERTIES, ANY_OF, PROPERTIES, REQUIRED, TYPE,
};
use tracing::debug;

/// Flatten `schema`'s top-level `anyOf` into one object schema.
///
/// Returns the input unchanged unless it holds a non-empty `anyOf` sequence.
/// The result drops `anyOf`, forces `type: "object"`, and keeps every other
/// top-level key. A schema-level `required` that is already non-empty wins
/// over the computed intersection. `additionalProperties` defaults to `true`.
pub fn flatten_union(schema: &Value) -> Value {
    let Some(obj) = schema.as_object() else {
        return schema.clone();
    };
    let Some(variants) = SchemaKind::of(schema)
        .any_of_variants()
        .filter(|v| !v.is_empty())
    else {
        return schema.clone();
    };

    let mut merged_properties = Map::new();
    let mut required_counts: HashMap<&str, usize> = HashMap::new();
    let mut required_order: Vec<&str> = Vec::new();
    let mut object_variants = 0usize;

    for variant in variants {
        // Variants without a properties map contribute nothing.
        let Some(props) = schema::properties(variant) else {
            continue;
        };
        object_variants += 1;

        for (key, value) in props {
            let existing = merged_properties.get(key);
            if let Some(merged) = merge_optional_property(existing, Some(value)) {
                merged_properties.insert(key.clone(), merged);
            }
        }

        let mut seen = HashSet::new();
        for key in schema::required(variant) {
            if !seen.insert(key) {
                continue;
            }
            let count = required_counts.entry(key).or_insert(0);
            if *count == 0 {
                required_order.push(key);
            }
            *count += 1;
        }
    }

    let mut flattened = obj.clone();
    flattened.remove(ANY_OF);
    flattened.insert(TYPE.to_string(), Value::String("object".to_string()));

    let properties = if merged_properties.is_empty() {
        obj.get(PROPERTIES)
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    } else {
        Value::Object(merged_properties)
    };
    flattened.insert(PROPERTIES.to_string(), properties);

    if schema::required(schema).is_empty() {
        let intersection: Vec<Value> = required_order
            .iter()
            .filter(|key| {
                object_variants > 0 && required_counts.get(*key) == Some(&object_variants)
            })
            .map(|key| Value::String(key.to_string()))
            .collect();
        if intersection.is_empty() {
            flattened.remove(REQUIRED);
        } else {
            flattened.insert(REQUIRED.to_string(), Value::Array(intersection));
        }
    }

    if !obj.contains_key(ADDITIONAL_PROPERTIES) {
        flattened.insert(ADDITIONAL_PROPERTIES.to_string(), Value::Bool(true));
    }

    debug!(
        variants = variants.len(),
        object_variants,
        "Flattened anyOf union into object schema"
    );
    Value::Object(flattened)
}
