//! Core types for shoprank - the catalog relevance engine.
//!
//! These mirror the catalog's product records but carry only what ranking
//! needs. Key design decisions:
//! - Everything is owned and immutable from the engine's point of view; the
//!   engine borrows a caller-owned snapshot and never writes back.
//! - `Decimal` for prices so tie-breaking is exact, never float-fuzzy.
//! - Scores are `f64` and always >= 0; ordering never relies on NaN paths.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Taxonomy category of a tag. Each category carries a fixed scoring weight
/// in the related-items ranker (see [`crate::config::EngineConfig`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagCategory {
    /// Game franchise ("resident-evil", "zelda") - the strongest signal.
    Franchise,
    /// A specific main-line game the item belongs to.
    MainGame,
    /// Genre ("survival-horror", "platformer").
    Genre,
    /// Developer or publisher ("capcom", "nintendo").
    Developer,
    /// Platform ("ps5", "switch").
    Platform,
    /// Physical or merchandising attribute ("steelbook", "limited-edition").
    Attribute,
    /// Anything untyped. The catalog's default for legacy tags.
    Generic,
}

impl Default for TagCategory {
    fn default() -> Self {
        TagCategory::Generic
    }
}

/// A catalog-supplied label attached to a product.
///
/// Weights outside `1..=5` are tolerated on input and clamped at scoring
/// time (the catalog's admin forms historically allowed free integers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Stable taxonomy identifier, unique within a product's tag list.
    pub id: String,
    /// Display name; matched against query tokens after normalization.
    pub name: String,
    /// Relevance weight in `1..=5`. Out-of-range values are clamped, never
    /// rejected.
    #[serde(default = "default_weight")]
    pub weight: i32,
    /// Taxonomy category, defaulting to [`TagCategory::Generic`].
    #[serde(default)]
    pub category: TagCategory,
}

fn default_weight() -> i32 {
    1
}

impl Tag {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weight: 1,
            category: TagCategory::Generic,
        }
    }

    /// Weight clamped into the valid `1..=5` range.
    ///
    /// Emits a `tracing` warning when the stored weight is out of range so
    /// dirty catalog data is observable without failing the ranking call.
    pub fn clamped_weight(&self) -> i32 {
        if !(1..=5).contains(&self.weight) {
            tracing::warn!(
                tag_id = %self.id,
                weight = self.weight,
                "tag weight outside 1..=5, clamping"
            );
        }
        self.weight.clamp(1, 5)
    }
}

/// Product type. Masters are templates for variants and never appear in
/// result sets, though one may still be the focal product of a
/// related-items query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Simple,
    Master,
    Variant,
}

impl Default for ProductType {
    fn default() -> Self {
        ProductType::Simple
    }
}

/// One catalog entry, as supplied in the caller's snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog id.
    pub id: String,
    /// Display name; matched against query tokens after normalization.
    pub name: String,
    /// Free-text merchandising category. Distinct from both
    /// [`TagCategory`] and the classifier's coarse bucket.
    pub category: String,
    /// Ordered tag list; ids are unique within the list.
    pub tags: Vec<Tag>,
    /// Non-negative price, used as the first deterministic tie-break.
    pub price: Decimal,
    /// Inactive products are invisible to both search and related items.
    pub active: bool,
    #[serde(default)]
    pub product_type: ProductType,
}

impl Product {
    /// Whether this product may appear in any result set.
    pub fn rankable(&self) -> bool {
        self.active && self.product_type != ProductType::Master
    }
}

/// Which scoring strategy produced a result entry (or a whole result set).
///
/// The label is stable and intended for caller-side rendering decisions and
/// for debugging relevance ("why did this item show up?").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Category-filtered, tag-identity weighted scoring (related items).
    WeightedTags,
    /// Query-token scoring against tags, name and category (search).
    SearchBased,
    /// Name-token compatibility scoring (related items, fuzzy variant).
    TokenBased,
    /// Fallback tier A: same category bucket, relevance floor waived.
    CategoryFallback,
    /// Fallback tier B: catalog-wide, ordered by tag count.
    PopularFallback,
}

impl Strategy {
    /// Stable string label, matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::WeightedTags => "weighted_tags",
            Strategy::SearchBased => "search_based",
            Strategy::TokenBased => "token_based",
            Strategy::CategoryFallback => "category_fallback",
            Strategy::PopularFallback => "popular_fallback",
        }
    }
}

/// A product annotated with its computed relevance.
///
/// Scores are comparable within one result list only; the search and
/// related-items algorithms use different scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub product: Product,
    /// Non-negative relevance score.
    pub score: f64,
    /// Names of the tags that contributed to the score, in tag order.
    pub matched_tags: Vec<String>,
    /// Strategy that produced this entry.
    pub algorithm: Strategy,
}

impl RankedResult {
    pub fn new(product: Product, score: f64, algorithm: Strategy) -> Self {
        Self {
            product,
            score,
            matched_tags: Vec::new(),
            algorithm,
        }
    }
}

/// Output of [`crate::Engine::search`]: two confidence tiers split at the
/// exact-match threshold. Callers render them differently (primary results
/// vs. "you might also search for"), which is why one flat list won't do.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// Confident hits (score >= exact threshold).
    pub exact_matches: Vec<RankedResult>,
    /// Loose suggestions (0 < score < exact threshold).
    pub related_products: Vec<RankedResult>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.exact_matches.is_empty() && self.related_products.is_empty()
    }
}

/// Output of [`crate::Engine::related_items`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedItems {
    /// Ranked related products, never containing the focal product.
    pub products: Vec<RankedResult>,
    /// The last strategy tier that actually contributed entries.
    pub algorithm: Strategy,
}
