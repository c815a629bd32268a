//! Ranking pipeline - from a catalog snapshot to ordered results.
//!
//! Two entry algorithms share the same ordering machinery:
//! - [`SearchMatcher`]: free-text query against the whole catalog
//! - [`RelatedItemsRanker`]: one focal product against its category bucket,
//!   with a fallback cascade guaranteeing a minimum result count

mod order;
mod related;
mod search;

pub use order::{compare_results, sort_results};
pub use related::{ContextSignals, RelatedItemsRanker, RelatedStrategy};
pub use search::SearchMatcher;
