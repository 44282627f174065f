//! Ordered tool collections and call dispatch.

use crate::normalize::normalize_tools;
use toolshape_types::config::SchemaNormalizeConfig;
use toolshape_types::error::ToolShapeError;
use toolshape_types::tool::{AgentTool, ToolCall, ToolDefinition, ToolResult};
use tracing::{debug, warn};

/// An ordered set of tools offered to one agent.
#[derive(Debug, Clone, Default)]
pub struct ToolSet {
    tools: Vec<AgentTool>,
}

impl ToolSet {
    /// Create a set from tools in presentation order.
    pub fn new(tools: Vec<AgentTool>) -> Self {
        debug!(tool_count = tools.len(), "Created tool set");
        Self { tools }
    }

    /// Number of tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// The tools in order.
    pub fn tools(&self) -> &[AgentTool] {
        &self.tools
    }

    /// Tool names in order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(AgentTool::name).collect()
    }

    /// Look up a tool by name. The first match wins.
    pub fn get(&self, name: &str) -> Option<&AgentTool> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// A copy of this set with every parameter schema normalized for the
    /// configured provider. Handlers are shared with `self`.
    pub fn for_provider(&self, config: &SchemaNormalizeConfig) -> ToolSet {
        ToolSet {
            tools: normalize_tools(&self.tools, config),
        }
    }

    /// Tool definitions in order, for a provider request payload.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition().clone()).collect()
    }

    /// Dispatch a call to the named tool.
    ///
    /// Unknown tools and handler failures come back as error results so the
    /// model sees what went wrong.
    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        let Some(tool) = self.get(&call.name) else {
            warn!(tool = %call.name, "Tool call for unknown tool");
            let err = ToolShapeError::ToolNotFound(call.name.clone());
            return ToolResult::error(&call.id, err.to_string());
        };

        debug!(tool = %call.name, call_id = %call.id, "Executing tool");
        match tool.execute(call).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool execution failed");
                ToolResult::error(&call.id, e.to_string())
            }
        }
    }
}
