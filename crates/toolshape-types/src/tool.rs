//! Tool definition, call and result types.

use crate::error::ToolShapeResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Definition of a tool exposed to an LLM provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool identifier within a tool list.
    pub name: String,
    /// Human-readable description for the LLM.
    pub description: String,
    /// JSON Schema for the tool's input parameters.
    #[serde(default)]
    pub input_schema: serde_json::Value,
}

/// A tool call requested by the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique ID for this tool use instance.
    pub id: String,
    /// Which tool to call.
    pub name: String,
    /// The input parameters.
    pub input: serde_json::Value,
}

/// Result of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// The tool_use ID this result corresponds to.
    pub tool_use_id: String,
    /// The output content.
    pub content: String,
    /// Whether the tool execution resulted in an error.
    pub is_error: bool,
}

impl ToolResult {
    /// A successful result.
    pub fn ok(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// An error result carrying the error text as content.
    pub fn error(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: true,
        }
    }
}

/// The execute capability behind a tool. Implementations must be thread-safe.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run the tool for one call.
    async fn execute(&self, call: &ToolCall) -> ToolShapeResult<ToolResult>;
}

/// A tool definition bound to its handler.
///
/// The handler is shared: tools derived through [`AgentTool::with_input_schema`]
/// point at the same handler as the tool they came from.
#[derive(Clone)]
pub struct AgentTool {
    definition: ToolDefinition,
    handler: Arc<dyn ToolHandler>,
}

impl AgentTool {
    /// Bind a definition to a handler.
    pub fn new(definition: ToolDefinition, handler: Arc<dyn ToolHandler>) -> Self {
        Self {
            definition,
            handler,
        }
    }

    /// The tool definition.
    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    /// Tool name.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Parameter schema.
    pub fn input_schema(&self) -> &serde_json::Value {
        &self.definition.input_schema
    }

    /// The shared handler.
    pub fn handler(&self) -> &Arc<dyn ToolHandler> {
        &self.handler
    }

    /// A new tool with the same name, description and handler but a
    /// different parameter schema. `self` is left untouched.
    pub fn with_input_schema(&self, input_schema: serde_json::Value) -> Self {
        Self {
            definition: ToolDefinition {
                name: self.definition.name.clone(),
                description: self.definition.description.clone(),
                input_schema,
            },
            handler: Arc::clone(&self.handler),
        }
    }

    /// Run the tool's handler.
    pub async fn execute(&self, call: &ToolCall) -> ToolShapeResult<ToolResult> {
        self.handler.execute(call).await
    }
}

impl fmt::Debug for AgentTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentTool")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoHandler;

    #[async_trait]
    impl ToolHandler for EchoHandler {
        async fn execute(&self, call: &ToolCall) -> ToolShapeResult<ToolResult> {
            Ok(ToolResult::ok(&call.id, call.input.to_string()))
        }
    }

    fn echo_tool() -> AgentTool {
        AgentTool::new(
            ToolDefinition {
                name: "echo".to_string(),
                description: "Echo the input".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": { "text": { "type": "string" } },
                    "required": ["text"]
                }),
            },
            Arc::new(EchoHandler),
        )
    }

    #[test]
    fn test_tool_definition_serialization() {
        let tool = ToolDefinition {
            name: "web_search".to_string(),
            description: "Search the web".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search query" }
                },
                "required": ["query"]
            }),
        };
        let json = serde_json::to_string(&tool).unwrap();
        assert!(json.contains("web_search"));
        let back: ToolDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tool);
    }

    #[test]
    fn test_tool_definition_missing_schema_is_null() {
        let tool: ToolDefinition =
            serde_json::from_str(r#"{"name":"noop","description":"Does nothing"}"#).unwrap();
        assert!(tool.input_schema.is_null());
    }

    #[test]
    fn test_with_input_schema_shares_handler() {
        let tool = echo_tool();
        let derived = tool.with_input_schema(json!({ "type": "object", "properties": {} }));
        assert_eq!(derived.name(), "echo");
        assert_eq!(derived.definition().description, "Echo the input");
        assert!(Arc::ptr_eq(tool.handler(), derived.handler()));
        assert_eq!(tool.input_schema()["required"], json!(["text"]));
        assert!(derived.input_schema().get("required").is_none());
    }

    #[tokio::test]
    async fn test_execute_runs_handler() {
        let tool = echo_tool();
        let call = ToolCall {
            id: "call-1".to_string(),
            name: "echo".to_string(),
            input: json!({ "text": "hi" }),
        };
        let result = tool.execute(&call).await.unwrap();
        assert_eq!(result.tool_use_id, "call-1");
        assert!(!result.is_error);
        assert!(result.content.contains("hi"));
    }
}
