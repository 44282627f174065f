//! Shared error types for toolshape.
//!
//! Schema normalization itself never fails; these errors cover the edges
//! around it (configuration parsing, tool dispatch, model discovery).

use thiserror::Error;

/// Top-level error type for toolshape.
#[derive(Error, Debug)]
pub enum ToolShapeError {
    /// A configuration error occurred.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No tool with this name is registered.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// A tool execution failed.
    #[error("Tool execution failed: {tool_id}: {reason}")]
    ToolExecution {
        /// The tool that failed.
        tool_id: String,
        /// Why it failed.
        reason: String,
    },

    /// The model discovery backend failed.
    #[error("Model discovery failed: {0}")]
    ModelDiscovery(String),
}

impl From<serde_json::Error> for ToolShapeError {
    fn from(e: serde_json::Error) -> Self {
        ToolShapeError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for ToolShapeError {
    fn from(e: toml::de::Error) -> Self {
        ToolShapeError::Config(e.to_string())
    }
}

/// Alias for Result with ToolShapeError.
pub type ToolShapeResult<T> = Result<T, ToolShapeError>;
