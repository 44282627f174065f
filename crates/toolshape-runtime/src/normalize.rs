//! Per-provider normalization of tool parameter schemas.
//!
//! | schema                               | full dialect               | restricted dialect          |
//! |--------------------------------------|----------------------------|-----------------------------|
//! | not a JSON object                    | unchanged                  | unchanged                   |
//! | top-level non-empty `anyOf`          | flattened, `anyOf` kept    | flattened, then restricted  |
//! | anything else                        | unchanged                  | restricted                  |
//!
//! For full-dialect providers the flattened top-level `properties` and
//! `required` sit next to the original `anyOf`, so the provider still sees
//! every variant with its `const` discriminator.

use crate::dialect::restrict_schema;
use crate::union_flatten::flatten_union;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashSet;
use toolshape_types::config::{SchemaDialect, SchemaNormalizeConfig};
use toolshape_types::schema::{self, SchemaKind, UnionKeyword, ANY_OF};
use toolshape_types::tool::AgentTool;
use tracing::{debug, warn};

/// Which rewrite a schema went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeAction {
    /// Returned as is.
    PassThrough,
    /// Union flattened; the original `anyOf` kept alongside.
    Flattened,
    /// Rewritten into the restricted dialect.
    Restricted,
    /// Union flattened, `anyOf` dropped, then restricted.
    FlattenedRestricted,
}

/// A normalized schema, borrowed when nothing changed.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSchema<'a> {
    pub schema: Cow<'a, Value>,
    pub action: NormalizeAction,
}

impl<'a> NormalizedSchema<'a> {
    fn pass_through(schema: &'a Value) -> Self {
        Self {
            schema: Cow::Borrowed(schema),
            action: NormalizeAction::PassThrough,
        }
    }

    fn owned(schema: Value, action: NormalizeAction) -> Self {
        Self {
            schema: Cow::Owned(schema),
            action,
        }
    }
}

/// Normalize one parameter schema for a dialect.
pub fn normalize_parameters(schema: &Value, dialect: SchemaDialect) -> NormalizedSchema<'_> {
    let restricted = dialect.is_restricted();
    match SchemaKind::of(schema) {
        SchemaKind::Opaque => NormalizedSchema::pass_through(schema),
        SchemaKind::Union {
            keyword: UnionKeyword::AnyOf,
            variants,
        } if !variants.is_empty() => {
            let mut flattened = flatten_union(schema);
            if restricted {
                return NormalizedSchema::owned(
                    restrict_schema(&flattened),
                    NormalizeAction::FlattenedRestricted,
                );
            }
            if let Some(obj) = flattened.as_object_mut() {
                obj.insert(ANY_OF.to_string(), Value::Array(variants.to_vec()));
            }
            NormalizedSchema::owned(flattened, NormalizeAction::Flattened)
        }
        _ if restricted => {
            // An empty anyOf is still a top-level anyOf to the provider.
            let rewritten = if schema::any_of(schema).is_some() {
                let mut stripped = schema.clone();
                if let Some(obj) = stripped.as_object_mut() {
                    obj.remove(ANY_OF);
                }
                restrict_schema(&stripped)
            } else {
                restrict_schema(schema)
            };
            NormalizedSchema::owned(rewritten, NormalizeAction::Restricted)
        }
        _ => NormalizedSchema::pass_through(schema),
    }
}

/// Normalize a tool's parameters for the configured provider.
///
/// Returns a new tool sharing the original's handler; `tool` is not touched.
pub fn normalize_tool(tool: &AgentTool, config: &SchemaNormalizeConfig) -> AgentTool {
    let normalized = normalize_parameters(tool.input_schema(), config.dialect());
    debug!(
        tool = %tool.name(),
        provider = config.target_provider.as_deref().unwrap_or("<none>"),
        action = ?normalized.action,
        "Normalized tool parameters"
    );
    match normalized.schema {
        Cow::Borrowed(_) => tool.clone(),
        Cow::Owned(schema) => tool.with_input_schema(schema),
    }
}

/// Normalize every tool in order. The output has the same length and order
/// as the input.
pub fn normalize_tools(tools: &[AgentTool], config: &SchemaNormalizeConfig) -> Vec<AgentTool> {
    let mut seen = HashSet::new();
    for tool in tools {
        if !seen.insert(tool.name()) {
            warn!(tool = %tool.name(), "Duplicate tool name in tool list");
        }
    }
    tools.iter().map(|tool| normalize_tool(tool, config)).collect()
}
