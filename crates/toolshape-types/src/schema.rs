//! JSON Schema views for tool parameter definitions.
//!
//! Parameter schemas travel as `serde_json::Value` trees so that keywords the
//! normalizer does not interpret round-trip untouched. [`SchemaKind`] classifies
//! a fragment into the shapes the normalizer reasons about, and the accessor
//! functions read one keyword each so call sites never probe raw keys.

use serde_json::{Map, Value};

pub const TYPE: &str = "type";
pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const DEFAULT: &str = "default";
pub const PROPERTIES: &str = "properties";
pub const REQUIRED: &str = "required";
pub const ADDITIONAL_PROPERTIES: &str = "additionalProperties";
pub const PATTERN_PROPERTIES: &str = "patternProperties";
pub const ENUM: &str = "enum";
pub const CONST: &str = "const";
pub const ANY_OF: &str = "anyOf";
pub const ONE_OF: &str = "oneOf";
pub const ALL_OF: &str = "allOf";
pub const ITEMS: &str = "items";

/// Descriptive keys carried onto a merged literal property, first one wins.
pub const DESCRIPTIVE_KEYS: [&str; 3] = [TITLE, DESCRIPTION, DEFAULT];

/// Combinator keyword of a union schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnionKeyword {
    AnyOf,
    OneOf,
    AllOf,
}

impl UnionKeyword {
    /// All combinators, in the order they are checked.
    pub const ALL: [UnionKeyword; 3] = [
        UnionKeyword::AnyOf,
        UnionKeyword::OneOf,
        UnionKeyword::AllOf,
    ];

    /// The JSON Schema keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            UnionKeyword::AnyOf => ANY_OF,
            UnionKeyword::OneOf => ONE_OF,
            UnionKeyword::AllOf => ALL_OF,
        }
    }
}

/// Shape of a schema fragment, as far as normalization is concerned.
///
/// A union combinator holding a sequence wins over everything else in the
/// same object; `anyOf` is checked before `oneOf`, which is checked before
/// `allOf`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaKind<'a> {
    /// `anyOf`/`oneOf`/`allOf` holding a sequence of variants.
    Union {
        keyword: UnionKeyword,
        variants: &'a [Value],
    },
    /// Any other JSON object (object, literal, array or scalar schema).
    Object,
    /// Not a JSON object at all (boolean schema, array, null, ...).
    Opaque,
}

impl<'a> SchemaKind<'a> {
    /// Classify a schema fragment.
    pub fn of(schema: &'a Value) -> Self {
        let Some(obj) = schema.as_object() else {
            return SchemaKind::Opaque;
        };
        for keyword in UnionKeyword::ALL {
            if let Some(variants) = obj.get(keyword.as_str()).and_then(Value::as_array) {
                return SchemaKind::Union {
                    keyword,
                    variants: variants.as_slice(),
                };
            }
        }
        SchemaKind::Object
    }

    /// The variants of a top-level `anyOf` sequence, if this is one.
    pub fn any_of_variants(self) -> Option<&'a [Value]> {
        match self {
            SchemaKind::Union {
                keyword: UnionKeyword::AnyOf,
                variants,
            } => Some(variants),
            _ => None,
        }
    }
}

/// The `properties` map of a fragment, if it declares one.
pub fn properties(schema: &Value) -> Option<&Map<String, Value>> {
    schema.get(PROPERTIES).and_then(Value::as_object)
}

/// The string entries of a fragment's `required` list. Non-string entries
/// are skipped; a missing or malformed list yields an empty vector.
pub fn required(schema: &Value) -> Vec<&str> {
    schema
        .get(REQUIRED)
        .and_then(Value::as_array)
        .map(|keys| keys.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// The `anyOf` variants of a fragment, if it holds a sequence there.
pub fn any_of(schema: &Value) -> Option<&[Value]> {
    schema
        .get(ANY_OF)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

/// Primitive kind of a JSON literal, named the way JSON Schema's `type`
/// keyword names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    String,
    Number,
    Boolean,
    Null,
    Array,
    Object,
}

impl JsonType {
    /// Kind of a JSON value. Integers and floats are both `Number`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => JsonType::String,
            Value::Number(_) => JsonType::Number,
            Value::Bool(_) => JsonType::Boolean,
            Value::Null => JsonType::Null,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }

    /// The `type` keyword value.
    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
            JsonType::Null => "null",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_union_wins_over_properties() {
        let schema = json!({
            "type": "object",
            "properties": { "action": { "type": "string" } },
            "anyOf": [{ "properties": {} }]
        });
        match SchemaKind::of(&schema) {
            SchemaKind::Union { keyword, variants } => {
                assert_eq!(keyword, UnionKeyword::AnyOf);
                assert_eq!(variants.len(), 1);
            }
            other => panic!("expected union, got {other:?}"),
        }
    }

    #[test]
    fn test_kind_classification() {
        for schema in [
            json!({ "properties": {} }),
            json!({ "const": "start" }),
            json!({ "type": "array", "items": { "type": "string" } }),
            json!({ "type": "number" }),
        ] {
            assert_eq!(SchemaKind::of(&schema), SchemaKind::Object, "{schema}");
        }
        assert_eq!(SchemaKind::of(&json!(true)), SchemaKind::Opaque);
        assert_eq!(SchemaKind::of(&json!(null)), SchemaKind::Opaque);
        assert_eq!(SchemaKind::of(&json!([{}])), SchemaKind::Opaque);
    }

    #[test]
    fn test_non_sequence_combinator_is_not_a_union() {
        let schema = json!({ "oneOf": "nope", "type": "string" });
        assert_eq!(SchemaKind::of(&schema), SchemaKind::Object);
    }

    #[test]
    fn test_any_of_checked_before_other_combinators() {
        let schema = json!({ "oneOf": [{}], "anyOf": [{}, {}] });
        let kind = SchemaKind::of(&schema);
        assert_eq!(kind.any_of_variants().map(<[Value]>::len), Some(2));

        let one_of = json!({ "oneOf": [{}] });
        assert!(SchemaKind::of(&one_of).any_of_variants().is_none());
        assert!(SchemaKind::of(&json!({})).any_of_variants().is_none());
    }

    #[test]
    fn test_required_skips_non_strings() {
        let schema = json!({ "required": ["action", 7, null, "path"] });
        assert_eq!(required(&schema), vec!["action", "path"]);
        assert!(required(&json!({ "required": "action" })).is_empty());
        assert!(required(&json!({})).is_empty());
    }

    #[test]
    fn test_accessors() {
        let schema = json!({
            "type": "object",
            "properties": { "path": { "type": "string" } },
            "anyOf": [{}, {}]
        });
        assert_eq!(properties(&schema).map(|p| p.len()), Some(1));
        assert_eq!(any_of(&schema).map(|v| v.len()), Some(2));
        assert!(any_of(&json!({ "anyOf": {} })).is_none());
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(JsonType::of(&json!("a")).as_str(), "string");
        assert_eq!(JsonType::of(&json!(3)), JsonType::of(&json!(3.5)));
        assert_eq!(JsonType::of(&json!(false)).as_str(), "boolean");
        assert_eq!(JsonType::of(&json!(null)).as_str(), "null");
        assert_eq!(JsonType::of(&json!([1])).as_str(), "array");
        assert_eq!(JsonType::of(&json!({})).as_str(), "object");
    }
}
