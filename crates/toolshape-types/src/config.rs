//! Provider dialect configuration for tool parameter schemas.

use crate::error::ToolShapeResult;
use serde::{Deserialize, Serialize};

/// Providers whose function-calling API only accepts the reduced schema
/// dialect (no top-level `anyOf`, no `const`, no `patternProperties`).
pub const DEFAULT_RESTRICTED_PROVIDERS: [&str; 2] = ["google-gemini-cli", "google-antigravity"];

/// JSON Schema dialect a provider accepts for tool parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaDialect {
    /// Unions, `const` and the rest of the tool schema subset are accepted.
    #[default]
    Full,
    /// Unions must be flattened and unsupported keywords rewritten.
    Restricted,
}

impl SchemaDialect {
    /// Whether schemas must go through dialect restriction.
    pub fn is_restricted(self) -> bool {
        matches!(self, SchemaDialect::Restricted)
    }
}

/// Tool schema normalization settings.
///
/// Deserializes from a TOML table such as:
///
/// ```toml
/// target_provider = "google-gemini-cli"
/// restricted_providers = ["google-gemini-cli", "google-antigravity"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaNormalizeConfig {
    /// Provider the tool list is being prepared for. `None` means no
    /// restriction is applied.
    pub target_provider: Option<String>,
    /// Provider identifiers that need the restricted dialect.
    pub restricted_providers: Vec<String>,
}

impl Default for SchemaNormalizeConfig {
    fn default() -> Self {
        Self {
            target_provider: None,
            restricted_providers: DEFAULT_RESTRICTED_PROVIDERS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl SchemaNormalizeConfig {
    /// Default settings targeting one provider.
    pub fn for_provider(provider: impl Into<String>) -> Self {
        Self {
            target_provider: Some(provider.into()),
            ..Default::default()
        }
    }

    /// Parse settings from TOML. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> ToolShapeResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Dialect for the configured target provider. Matching is exact.
    pub fn dialect(&self) -> SchemaDialect {
        match self.target_provider.as_deref() {
            Some(provider) if self.restricted_providers.iter().any(|p| p == provider) => {
                SchemaDialect::Restricted
            }
            _ => SchemaDialect::Full,
        }
    }
}
