//! Literal value extraction from `enum` / `const` schema fragments.

use serde_json::Value;
use toolshape_types::schema::{CONST, ENUM};

/// The literal values a schema fragment permits.
///
/// An `enum` sequence is returned verbatim; otherwise a `const` yields a
/// single-element list (a `null` const counts). Fragments declaring neither,
/// including object, array and union schemas, yield `None`.
pub fn extract_literals(schema: &Value) -> Option<Vec<&Value>> {
    let obj = schema.as_object()?;
    if let Some(values) = obj.get(ENUM).and_then(Value::as_array) {
        return Some(values.iter().collect());
    }
    obj.get(CONST).map(|value| vec![value])
}
