//! Model catalog entry types.

use serde::{Deserialize, Serialize};

/// A model the agent can be pointed at, as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCatalogEntry {
    /// Provider-scoped model ID.
    pub id: String,
    /// Display name (falls back to the ID).
    pub name: String,
    /// Provider identifier, e.g. `"google-gemini-cli"`.
    pub provider: String,
    /// Context window in tokens, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_window: Option<f64>,
}

/// A raw model record as reported by a discovery backend, before cleanup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredModel {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub context_window: Option<f64>,
}

impl DiscoveredModel {
    /// Clean a raw record into a catalog entry.
    ///
    /// `id` and `provider` are trimmed and must be non-empty. A blank name
    /// falls back to the ID. Non-positive or non-finite context windows are
    /// dropped.
    pub fn into_entry(self) -> Option<ModelCatalogEntry> {
        let id = self.id.trim().to_string();
        if id.is_empty() {
            return None;
        }
        let provider = self.provider.trim().to_string();
        if provider.is_empty() {
            return None;
        }
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| id.clone());
        let context_window = self.context_window.filter(|w| w.is_finite() && *w > 0.0);
        Some(ModelCatalogEntry {
            id,
            name,
            provider,
            context_window,
        })
    }
}
