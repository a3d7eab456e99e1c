//! Catalog loading and lookup

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

use crate::domain::{Catalog, CatalogSourcePort, DiagnosticsPort, FormDescriptor};
use crate::error::{FormSelectError, FormSelectResult};

/// Result of one `load` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The catalog was replaced with `count` entries
    Loaded { count: usize },
    /// The previous catalog was kept
    Failed(FormSelectError),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Fetches and caches the list of selectable forms.
///
/// The cached catalog is an immutable snapshot swapped in whole when a fetch
/// completes, so readers never see a half-written list. Overlapping loads
/// are not ordered: whichever completes last wins.
pub struct CatalogLoader {
    source: Arc<dyn CatalogSourcePort>,
    diagnostics: Arc<dyn DiagnosticsPort>,
    field_key: String,
    value_property: String,
    catalog: RwLock<Arc<Catalog>>,
    generation: AtomicU64,
}

impl CatalogLoader {
    pub fn new(
        source: Arc<dyn CatalogSourcePort>,
        diagnostics: Arc<dyn DiagnosticsPort>,
        field_key: impl Into<String>,
        value_property: impl Into<String>,
    ) -> Self {
        Self {
            source,
            diagnostics,
            field_key: field_key.into(),
            value_property: value_property.into(),
            catalog: RwLock::new(Arc::new(Catalog::empty())),
            generation: AtomicU64::new(0),
        }
    }

    /// Fetch the catalog from `locator` and replace the cached one.
    ///
    /// Never fails towards the caller: errors are reported to diagnostics
    /// and the previous catalog stays in place.
    pub async fn load(&self, locator: &str) -> LoadOutcome {
        debug!(field = %self.field_key, locator, "Loading form catalog");

        match self.fetch_catalog(locator).await {
            Ok(catalog) => {
                let count = catalog.len();
                *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(catalog);
                let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
                info!(field = %self.field_key, count, generation, "Form catalog loaded");
                LoadOutcome::Loaded { count }
            }
            Err(e) => {
                self.diagnostics.report(&self.field_key, &e);
                LoadOutcome::Failed(e)
            }
        }
    }

    async fn fetch_catalog(&self, locator: &str) -> FormSelectResult<Catalog> {
        let raw = self.source.fetch(locator).await?;
        Catalog::from_value(raw)
    }

    /// Current catalog snapshot
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// First cached entry whose identifier equals `id`
    pub fn find_by_id(&self, id: &str) -> Option<FormDescriptor> {
        self.snapshot().find_by_id(id, &self.value_property).cloned()
    }

    /// Number of successful loads so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
