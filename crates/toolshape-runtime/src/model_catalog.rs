//! Cached model catalog built from a pluggable discovery backend.
//!
//! The cache holds the last non-empty discovery result. Empty results and
//! discovery errors are handed back but not stored, so the next `load()`
//! tries again. Concurrent loads wait on the same lock and share a single
//! discovery run.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::Mutex;
use toolshape_types::error::ToolShapeResult;
use toolshape_types::model_catalog::{DiscoveredModel, ModelCatalogEntry};
use tracing::{info, warn};

/// Source of raw model records (auth store, models.json, provider APIs...).
#[async_trait]
pub trait ModelDiscovery: Send + Sync {
    /// List every model the backend knows about.
    async fn discover(&self) -> ToolShapeResult<Vec<DiscoveredModel>>;
}

/// Model catalog with an explicit, resettable cache.
pub struct ModelCatalog {
    discovery: Arc<dyn ModelDiscovery>,
    cached: Mutex<Option<Arc<Vec<ModelCatalogEntry>>>>,
}

impl ModelCatalog {
    /// Create an empty catalog over a discovery backend.
    pub fn new(discovery: Arc<dyn ModelDiscovery>) -> Self {
        Self {
            discovery,
            cached: Mutex::new(None),
        }
    }

    /// Load the catalog, sorted by provider then name.
    ///
    /// With `use_cache == false` any cached catalog is dropped first.
    pub async fn load(&self, use_cache: bool) -> Arc<Vec<ModelCatalogEntry>> {
        let mut cached = self.cached.lock().await;
        if !use_cache {
            *cached = None;
        }
        if let Some(models) = cached.as_ref() {
            return Arc::clone(models);
        }

        let raw = match self.discovery.discover().await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Model discovery failed, catalog not cached");
                return Arc::new(Vec::new());
            }
        };

        let mut models: Vec<ModelCatalogEntry> = raw
            .into_iter()
            .filter_map(DiscoveredModel::into_entry)
            .collect();
        models.sort_by(|a, b| {
            a.provider
                .cmp(&b.provider)
                .then_with(|| compare_names(&a.name, &b.name))
        });

        if models.is_empty() {
            warn!("Model discovery returned no models, catalog not cached");
            return Arc::new(models);
        }

        info!(count = models.len(), "Loaded model catalog");
        let models = Arc::new(models);
        *cached = Some(Arc::clone(&models));
        models
    }

    /// Drop the cached catalog.
    pub async fn reset(&self) {
        *self.cached.lock().await = None;
    }

    /// Whether a catalog is currently cached.
    pub async fn is_cached(&self) -> bool {
        self.cached.lock().await.is_some()
    }
}

/// Case-insensitive name order, falling back to the raw strings on ties.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{self, AtomicUsize};
    use toolshape_types::error::ToolShapeError;

    /// Discovery backend returning a fixed answer and counting calls.
    struct FixedDiscovery {
        models: Vec<DiscoveredModel>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FixedDiscovery {
        fn new(models: Vec<DiscoveredModel>) -> Arc<Self> {
            Arc::new(Self {
                models,
                fail: false,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                models: Vec::new(),
                fail: true,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(atomic::Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelDiscovery for FixedDiscovery {
        async fn discover(&self) -> ToolShapeResult<Vec<DiscoveredModel>> {
            self.calls.fetch_add(1, atomic::Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.fail {
                return Err(ToolShapeError::ModelDiscovery("auth store unreadable".into()));
            }
            Ok(self.models.clone())
        }
    }

    fn model(id: &str, name: Option<&str>, provider: &str) -> DiscoveredModel {
        DiscoveredModel {
            id: id.to_string(),
            name: name.map(str::to_string),
            provider: provider.to_string(),
            context_window: None,
        }
    }

    fn sample_models() -> Vec<DiscoveredModel> {
        vec![
            model("gpt-4o", Some("GPT-4o"), "openai"),
            model("gemini-2.5-pro", Some("Gemini 2.5 Pro"), "google-gemini-cli"),
            model("", Some("nameless"), "openai"),
            model("claude-sonnet", Some("Claude Sonnet"), "anthropic"),
            model("gemini-2.5-flash", Some("Gemini 2.5 Flash"), "google-gemini-cli"),
            model("orphan", None, " "),
        ]
    }

    #[tokio::test]
    async fn test_load_sorts_and_filters() {
        let catalog = ModelCatalog::new(FixedDiscovery::new(sample_models()));
        let models = catalog.load(true).await;
        let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["claude-sonnet", "gemini-2.5-flash", "gemini-2.5-pro", "gpt-4o"]
        );
    }

    #[tokio::test]
    async fn test_names_sort_case_insensitively() {
        let catalog = ModelCatalog::new(FixedDiscovery::new(vec![
            model("gpt-5", Some("GPT-5"), "openai"),
            model("gpt-4o", Some("gpt-4o"), "openai"),
            model("o3", Some("o3"), "openai"),
            model("gpt-4o-upper", Some("GPT-4o"), "openai"),
        ]));
        let models = catalog.load(true).await;
        let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["GPT-4o", "gpt-4o", "GPT-5", "o3"]);
    }

    #[test]
    fn test_compare_names() {
        assert_eq!(compare_names("gpt-4o", "GPT-5"), Ordering::Less);
        assert_eq!(compare_names("Alpha", "alpha"), Ordering::Less);
        assert_eq!(compare_names("same", "same"), Ordering::Equal);
    }

    #[tokio::test]
    async fn test_load_is_cached() {
        let discovery = FixedDiscovery::new(sample_models());
        let catalog = ModelCatalog::new(discovery.clone());
        let first = catalog.load(true).await;
        let second = catalog.load(true).await;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(discovery.calls(), 1);
        assert!(catalog.is_cached().await);
    }

    #[tokio::test]
    async fn test_load_without_cache_rediscovers() {
        let discovery = FixedDiscovery::new(sample_models());
        let catalog = ModelCatalog::new(discovery.clone());
        catalog.load(true).await;
        catalog.load(false).await;
        assert_eq!(discovery.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_result_is_not_cached() {
        let discovery = FixedDiscovery::new(vec![model(" ", None, "openai")]);
        let catalog = ModelCatalog::new(discovery.clone());
        assert!(catalog.load(true).await.is_empty());
        assert!(!catalog.is_cached().await);
        catalog.load(true).await;
        assert_eq!(discovery.calls(), 2);
    }

    #[tokio::test]
    async fn test_discovery_error_is_not_cached() {
        let discovery = FixedDiscovery::failing();
        let catalog = ModelCatalog::new(discovery.clone());
        assert!(catalog.load(true).await.is_empty());
        assert!(catalog.load(true).await.is_empty());
        assert_eq!(discovery.calls(), 2);
        assert!(!catalog.is_cached().await);
    }

    #[tokio::test]
    async fn test_reset_clears_cache() {
        let discovery = FixedDiscovery::new(sample_models());
        let catalog = ModelCatalog::new(discovery.clone());
        catalog.load(true).await;
        catalog.reset().await;
        assert!(!catalog.is_cached().await);
        catalog.load(true).await;
        assert_eq!(discovery.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_one_discovery() {
        let discovery = FixedDiscovery::new(sample_models());
        let catalog = ModelCatalog::new(discovery.clone());
        let (a, b) = tokio::join!(catalog.load(true), catalog.load(true));
        assert_eq!(a, b);
        assert_eq!(discovery.calls(), 1);
    }
}
