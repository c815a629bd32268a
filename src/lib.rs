//! shoprank - deterministic product relevance for catalog storefronts.
//!
//! Matches free-text queries against a catalog snapshot and computes
//! "related products" for a focal item, producing explainable, reproducible
//! rankings from noisy, sparsely-tagged catalog data.
//!
//! # Architecture
//!
//! ```text
//! Query / Focal Product → Normalizer → Scoring → Boosts → Ordering
//!          ↓                  ↓           ↓         ↓         ↓
//!      snapshot in        case-fold,  weighted  developer, score desc,
//!      caller's hands     strip       tag /     tag-count, price asc,
//!                         diacritics  token     signals    name asc
//! ```
//!
//! Two operations, both pure functions over a caller-supplied snapshot:
//! [`Engine::search`] partitions hits into exact and loose tiers;
//! [`Engine::related_items`] ranks same-bucket candidates by shared tag
//! identity with a fallback cascade guaranteeing a minimum result count.
//!
//! # Determinism
//!
//! Identical inputs yield byte-identical ordered output. Every ordering in
//! the crate is a total order with no random component (see
//! [`ranking::compare_results`]); caching layers and users both depend on
//! that.
//!
//! The engine holds no mutable state, performs no I/O, and never writes
//! back to the catalog, so concurrent calls are safe without locking.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod ranking;
pub mod text;
pub mod types;

// Re-export the public surface
pub use classify::{CategoryBucket, CategoryClassifier};
pub use config::EngineConfig;
pub use engine::{CatalogProvider, Engine};
pub use error::EngineError;
pub use ranking::{ContextSignals, RelatedItemsRanker, RelatedStrategy, SearchMatcher};
pub use types::{
    Product, ProductType, RankedResult, RelatedItems, SearchResults, Strategy, Tag, TagCategory,
};
