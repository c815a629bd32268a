//! The engine facade: the two operations the storefront calls, plus the
//! catalog-provider seam it consumes.
//!
//! The engine is synchronous and stateless: every operation is a pure
//! function of its explicit inputs over a caller-owned snapshot, so an
//! `Engine` is freely shareable across threads and concurrent calls need
//! no locking.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::ranking::{ContextSignals, RelatedItemsRanker, RelatedStrategy, SearchMatcher};
use crate::types::{Product, RelatedItems, SearchResults};

/// Source of catalog snapshots. The engine never calls this itself - the
/// caller fetches a snapshot once per operation and passes it in - but the
/// trait pins down the interface the surrounding application implements.
pub trait CatalogProvider {
    /// Return the current catalog snapshot.
    fn fetch_active_catalog(&self) -> anyhow::Result<Vec<Product>>;
}

/// Product relevance engine.
///
/// Construct once with a configuration and reuse across calls; all methods
/// take `&self` and hold no mutable state.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Match a free-text query against the catalog.
    ///
    /// Infallible: empty or garbage queries yield empty result sets.
    pub fn search(&self, query: &str, catalog: &[Product]) -> SearchResults {
        SearchMatcher::new(&self.config).search(query, catalog)
    }

    /// Compute related products for `focal` with the default strategy
    /// (weighted tags) and no external signals.
    ///
    /// `max_results` of `None` uses the configured default (8).
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidArgument`] when `max_results` is zero.
    pub fn related_items(
        &self,
        focal: &Product,
        catalog: &[Product],
        max_results: Option<usize>,
    ) -> Result<RelatedItems, EngineError> {
        self.related_items_with(
            focal,
            catalog,
            max_results,
            RelatedStrategy::WeightedTags,
            &ContextSignals::default(),
        )
    }

    /// Compute related products with an explicit strategy and
    /// caller-supplied context signals (co-purchase, recency).
    pub fn related_items_with(
        &self,
        focal: &Product,
        catalog: &[Product],
        max_results: Option<usize>,
        strategy: RelatedStrategy,
        signals: &ContextSignals,
    ) -> Result<RelatedItems, EngineError> {
        let max_results = max_results.unwrap_or(self.config.default_max_results);
        if max_results == 0 {
            return Err(EngineError::InvalidArgument(
                "max_results must be positive".into(),
            ));
        }
        Ok(RelatedItemsRanker::new(&self.config).related_items_with(
            focal,
            catalog,
            max_results,
            strategy,
            signals,
        ))
    }
}
