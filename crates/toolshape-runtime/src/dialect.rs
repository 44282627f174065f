//! Rewriting schemas into the reduced dialect some providers accept.
//!
//! Gemini-family function calling takes an OpenAPI-like subset of JSON
//! Schema. The rewrite, per fragment:
//! - drops `patternProperties`
//! - turns `const: v` into `enum: [v]`
//! - drops `type` when the same fragment carries an `anyOf` sequence
//! - recurses into `properties`, `items`, `anyOf`/`oneOf`/`allOf` entries and
//!   schema-valued `additionalProperties`
//!
//! Every other key is copied through. Applying the rewrite twice gives the
//! same result as applying it once.

use serde_json::{Map, Value};
use toolshape_types::schema::{
    SchemaKind, ADDITIONAL_PROPERTIES, ALL_OF, ANY_OF, CONST, ENUM, ITEMS, ONE_OF,
    PATTERN_PROPERTIES, PROPERTIES, TYPE,
};

/// Rewrite a schema tree into the restricted dialect.
pub fn restrict_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(obj) => {
            let has_any_of = SchemaKind::of(schema).any_of_variants().is_some();
            Value::Object(restrict_object(obj, has_any_of))
        }
        Value::Array(entries) => Value::Array(entries.iter().map(restrict_schema).collect()),
        other => other.clone(),
    }
}

fn restrict_object(obj: &Map<String, Value>, has_any_of: bool) -> Map<String, Value> {
    let mut cleaned = Map::new();

    for (key, value) in obj {
        match key.as_str() {
            PATTERN_PROPERTIES => {}
            // An explicit enum already lists the allowed values.
            CONST => {
                if !obj.contains_key(ENUM) {
                    cleaned.insert(ENUM.to_string(), Value::Array(vec![value.clone()]));
                }
            }
            TYPE if has_any_of => {}
            PROPERTIES => {
                let restricted = match value.as_object() {
                    Some(props) => Value::Object(
                        props
                            .iter()
                            .map(|(name, prop)| (name.clone(), restrict_schema(prop)))
                            .collect(),
                    ),
                    None => value.clone(),
                };
                cleaned.insert(key.clone(), restricted);
            }
            ANY_OF | ONE_OF | ALL_OF if value.is_array() => {
                cleaned.insert(key.clone(), restrict_schema(value));
            }
            ITEMS | ADDITIONAL_PROPERTIES => {
                cleaned.insert(key.clone(), restrict_schema(value));
            }
            _ => {
                cleaned.insert(key.clone(), value.clone());
            }
        }
    }

    cleaned
}
