//! Coarse category bucketing for cross-domain noise control.
//!
//! "Related products" must not suggest a plush keychain next to a game just
//! because both carry a franchise tag. The classifier partitions the
//! catalog into a handful of buckets from tag-name keywords; the
//! related-items ranker only scores candidates inside the focal product's
//! bucket (fallback tiers may cross it).
//!
//! This is NOT the merchandising `category` field on [`Product`] - that is
//! a free-text string owned by the storefront. The bucket is derived and
//! internal to ranking.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::text::normalize;
use crate::types::Product;

/// The coarse domain partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryBucket {
    Games,
    Accessories,
    Clothing,
    Collectibles,
    /// No keyword matched. Unknown products only relate to other unknowns
    /// until the fallback cascade widens the net.
    Unknown,
}

impl CategoryBucket {
    /// Matchable buckets in classification order. First hit wins, so the
    /// order is part of the classifier's contract.
    pub const ORDERED: [CategoryBucket; 4] = [
        CategoryBucket::Games,
        CategoryBucket::Accessories,
        CategoryBucket::Clothing,
        CategoryBucket::Collectibles,
    ];
}

/// Keyword-table classifier over product tags.
pub struct CategoryClassifier<'a> {
    config: &'a EngineConfig,
}

impl<'a> CategoryClassifier<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Classify a product into its coarse bucket.
    ///
    /// Scans buckets in [`CategoryBucket::ORDERED`] order; the product
    /// lands in the first bucket with a keyword contained in any of its
    /// normalized tag names. Products with no tags, or no matching
    /// keyword, are [`CategoryBucket::Unknown`].
    pub fn classify(&self, product: &Product) -> CategoryBucket {
        let tag_names: Vec<String> = product.tags.iter().map(|t| normalize(&t.name)).collect();
        if tag_names.is_empty() {
            return CategoryBucket::Unknown;
        }

        for bucket in CategoryBucket::ORDERED {
            let Some(keywords) = self.config.bucket_keywords.get(&bucket) else {
                continue;
            };
            let hit = tag_names
                .iter()
                .any(|name| keywords.iter().any(|kw| name.contains(kw.as_str())));
            if hit {
                return bucket;
            }
        }
        CategoryBucket::Unknown
    }
}
