//! Engine configuration - every weight, threshold, and keyword table the
//! ranking algorithms consume.
//!
//! The original heuristics hardcoded these in three near-duplicate scripts
//! with inconsistent values. Here they live in one injectable struct so the
//! taxonomy can evolve without touching ranking logic. `Default` carries the
//! production values.

use std::collections::HashMap;

use crate::classify::CategoryBucket;
use crate::types::TagCategory;

/// Configuration for the relevance engine.
/// All values are tunable at runtime for experimentation.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    // Search scoring
    /// Points per query token found as a substring of the product name.
    pub name_token_weight: f64,
    /// Multiplier applied to a matched tag's clamped weight.
    pub tag_weight_multiplier: f64,
    /// Points per query token found in the merchandising category string.
    pub category_token_weight: f64,
    /// Bonus when the whole normalized query is a substring of the
    /// normalized name or category.
    pub whole_query_bonus: f64,
    /// Minimum similarity for a token-tag pair to count as a partial match.
    pub partial_similarity_min: f64,
    /// Score at or above which a search hit is "exact" rather than loose.
    pub exact_match_threshold: f64,

    // Related-items scoring
    /// Score a shared tag contributes, by taxonomy category.
    pub tag_category_weights: HashMap<TagCategory, f64>,
    /// Minimum weighted score for a candidate to count as related.
    pub min_relevance: f64,
    /// Below this many results the fallback cascade kicks in.
    pub min_results: usize,
    /// Default result cap for related items.
    pub default_max_results: usize,

    // Contextual boosts (additive, order-independent)
    /// Bonus when focal and candidate share a Developer-category tag.
    pub shared_developer_boost: f64,
    /// Bonus when the candidate carries at least `rich_tag_count` tags.
    /// A popularity proxy: well-tagged items are the curated ones.
    pub rich_tag_boost: f64,
    /// Tag count at which `rich_tag_boost` applies.
    pub rich_tag_count: usize,
    /// Bonus for candidates the caller flags as co-purchased with the
    /// focal product. Only applied when the caller supplies the signal.
    pub copurchase_boost: f64,
    /// Bonus for candidates the caller flags as recently added.
    /// Only applied when the caller supplies the signal.
    pub recency_boost: f64,

    // Classifier
    /// Keyword substrings per coarse bucket, checked in
    /// [`CategoryBucket::ORDERED`] order against normalized tag names.
    pub bucket_keywords: HashMap<CategoryBucket, Vec<String>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Search
            name_token_weight: 15.0,
            tag_weight_multiplier: 10.0,
            category_token_weight: 5.0,
            whole_query_bonus: 25.0,
            partial_similarity_min: 0.7,
            exact_match_threshold: 20.0,

            // Related items
            tag_category_weights: default_tag_category_weights(),
            min_relevance: 50.0,
            min_results: 3,
            default_max_results: 8,

            // Boosts
            shared_developer_boost: 20.0,
            rich_tag_boost: 10.0,
            rich_tag_count: 5,
            copurchase_boost: 50.0,
            recency_boost: 15.0,

            // Classifier
            bucket_keywords: default_bucket_keywords(),
        }
    }
}

impl EngineConfig {
    /// Weight a shared tag of the given category contributes to the
    /// related-items base score. Unknown categories fall back to the
    /// Generic weight.
    pub fn weight_for(&self, category: TagCategory) -> f64 {
        self.tag_category_weights
            .get(&category)
            .or_else(|| self.tag_category_weights.get(&TagCategory::Generic))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Production tag-category weights. Franchise identity dominates; untyped
/// tags contribute almost nothing.
fn default_tag_category_weights() -> HashMap<TagCategory, f64> {
    HashMap::from([
        (TagCategory::Franchise, 100.0),
        (TagCategory::MainGame, 80.0),
        (TagCategory::Genre, 50.0),
        (TagCategory::Developer, 40.0),
        (TagCategory::Platform, 20.0),
        (TagCategory::Attribute, 10.0),
        (TagCategory::Generic, 5.0),
    ])
}

/// Production bucket keywords. Bilingual (pt/en) because the catalog's tag
/// vocabulary mixes both. Keywords are compared against normalized tag
/// names, so they must themselves be lowercase ascii.
fn default_bucket_keywords() -> HashMap<CategoryBucket, Vec<String>> {
    let to_vec = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
    HashMap::from([
        (
            CategoryBucket::Games,
            to_vec(&["jogo", "game", "videogame"]),
        ),
        (
            CategoryBucket::Accessories,
            to_vec(&["acessorio", "accessory", "controle", "controller", "headset"]),
        ),
        (
            CategoryBucket::Clothing,
            to_vec(&["roupa", "camiseta", "moletom", "shirt", "clothing", "apparel"]),
        ),
        (
            CategoryBucket::Collectibles,
            to_vec(&["colecionavel", "collectible", "figure", "funko", "amiibo", "pelucia", "plush"]),
        ),
    ])
}
