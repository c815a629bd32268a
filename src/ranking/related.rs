//! Related-items ranking with a guaranteed-minimum fallback cascade.
//!
//! The primary strategy scores candidates in the focal product's category
//! bucket by shared tag identity, weighted by taxonomy category (franchise
//! identity dominates, untyped tags barely register), plus additive
//! contextual boosts. Sparse catalog data routinely leaves that below the
//! minimum result count, so two relaxation tiers back it up:
//!
//! - **Tier A** (`category_fallback`): same bucket, relevance floor waived.
//! - **Tier B** (`popular_fallback`): whole catalog, ordered by tag count
//!   (well-tagged items are the curated, popular ones).
//!
//! A used-id set threads through all tiers so a product never appears
//! twice and the focal product never appears at all.

use std::collections::HashSet;

use crate::classify::CategoryClassifier;
use crate::config::EngineConfig;
use crate::text::{normalize, similarity, tokenize};
use crate::types::{Product, RankedResult, RelatedItems, Strategy, TagCategory};

use super::order;
use super::search::SearchMatcher;

/// Primary scoring strategy for related items, selected by call site.
///
/// All strategies share the category filter, the fallback cascade, and the
/// deterministic ordering; only the candidate scoring differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelatedStrategy {
    /// Shared-tag-identity scoring with the taxonomy weight table.
    /// The production default.
    WeightedTags,
    /// Feed the focal product's name through the search scorer. Useful
    /// when tag data is thin but names are descriptive.
    SearchBased,
    /// Name-token compatibility between focal and candidate. The fuzziest
    /// variant; accepts any positive score.
    TokenBased,
}

impl RelatedStrategy {
    fn algorithm(self) -> Strategy {
        match self {
            RelatedStrategy::WeightedTags => Strategy::WeightedTags,
            RelatedStrategy::SearchBased => Strategy::SearchBased,
            RelatedStrategy::TokenBased => Strategy::TokenBased,
        }
    }
}

/// External ranking signals the engine cannot compute from a catalog
/// snapshot alone. Callers with an order history or ingestion timestamps
/// fill these in; the default is empty and contributes nothing.
#[derive(Debug, Clone, Default)]
pub struct ContextSignals {
    /// Ids of products frequently co-purchased with the focal product.
    pub copurchased: HashSet<String>,
    /// Ids of recently added products.
    pub recent: HashSet<String>,
}

impl ContextSignals {
    pub fn is_empty(&self) -> bool {
        self.copurchased.is_empty() && self.recent.is_empty()
    }
}

/// Weighted, category-filtered related-items ranker.
pub struct RelatedItemsRanker<'a> {
    config: &'a EngineConfig,
}

impl<'a> RelatedItemsRanker<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Rank catalog items related to `focal` with the default strategy and
    /// no external signals.
    ///
    /// `max_results` must be positive; the [`crate::Engine`] facade
    /// enforces that before calling in.
    pub fn related_items(
        &self,
        focal: &Product,
        catalog: &[Product],
        max_results: usize,
    ) -> RelatedItems {
        self.related_items_with(
            focal,
            catalog,
            max_results,
            RelatedStrategy::WeightedTags,
            &ContextSignals::default(),
        )
    }

    /// Rank related items with an explicit strategy and caller-supplied
    /// context signals.
    pub fn related_items_with(
        &self,
        focal: &Product,
        catalog: &[Product],
        max_results: usize,
        strategy: RelatedStrategy,
        signals: &ContextSignals,
    ) -> RelatedItems {
        let classifier = CategoryClassifier::new(self.config);
        let focal_bucket = classifier.classify(focal);

        // The focal product is excluded here and stays excluded through
        // every fallback tier. Masters and inactive products never rank.
        let valid: Vec<&Product> = catalog
            .iter()
            .filter(|p| p.rankable() && p.id != focal.id)
            .collect();
        let same_category: Vec<&Product> = valid
            .iter()
            .copied()
            .filter(|p| classifier.classify(p) == focal_bucket)
            .collect();

        // Score every same-bucket candidate; the floor is applied after so
        // Tier A can reuse the sub-floor scores.
        let mut scored: Vec<RankedResult> = same_category
            .iter()
            .map(|p| self.score_candidate(focal, p, strategy, signals))
            .collect();
        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.product.tags.len().cmp(&a.product.tags.len()))
                .then_with(|| order::compare_results(a, b))
        });

        let floor = self.relevance_floor(strategy);
        let mut used: HashSet<String> = HashSet::new();
        used.insert(focal.id.clone());

        let mut products: Vec<RankedResult> = Vec::new();
        for result in &scored {
            if products.len() >= max_results {
                break;
            }
            if result.score >= floor && used.insert(result.product.id.clone()) {
                products.push(result.clone());
            }
        }
        let mut algorithm = strategy.algorithm();

        // The guaranteed minimum never overrides the caller's cap.
        let min_target = self.config.min_results.min(max_results);

        // Tier A: same bucket, floor waived, until the minimum is met.
        if products.len() < min_target {
            let mut appended = false;
            for result in &scored {
                if products.len() >= min_target {
                    break;
                }
                if used.insert(result.product.id.clone()) {
                    let mut entry = result.clone();
                    entry.algorithm = Strategy::CategoryFallback;
                    products.push(entry);
                    appended = true;
                }
            }
            if appended {
                algorithm = Strategy::CategoryFallback;
            }
        }

        // Tier B: whole catalog by tag count. When nothing at all matched
        // the focal product's bucket this becomes a pure popularity
        // listing and fills up to max_results; otherwise it only tops the
        // list up to the minimum.
        if products.len() < min_target {
            let target = if products.is_empty() {
                max_results
            } else {
                min_target
            };

            let mut pool: Vec<RankedResult> = valid
                .iter()
                .filter(|p| !used.contains(&p.id))
                .map(|p| {
                    RankedResult::new(
                        (*p).clone(),
                        p.tags.len() as f64,
                        Strategy::PopularFallback,
                    )
                })
                .collect();
            order::sort_results(&mut pool); // score == tag count, so this is tag-count desc

            let mut appended = false;
            for result in pool {
                if products.len() >= target {
                    break;
                }
                if used.insert(result.product.id.clone()) {
                    products.push(result);
                    appended = true;
                }
            }
            if appended {
                algorithm = Strategy::PopularFallback;
            }
        }

        tracing::debug!(
            focal_id = %focal.id,
            bucket = ?focal_bucket,
            algorithm = algorithm.label(),
            count = products.len(),
            "related items ranked"
        );

        RelatedItems {
            products,
            algorithm,
        }
    }

    /// Minimum primary-tier score per strategy. The weighted scale tops
    /// out in the hundreds, the search scale in the tens, and token
    /// compatibility is too fine-grained for a meaningful floor.
    fn relevance_floor(&self, strategy: RelatedStrategy) -> f64 {
        match strategy {
            RelatedStrategy::WeightedTags => self.config.min_relevance,
            RelatedStrategy::SearchBased => self.config.exact_match_threshold,
            RelatedStrategy::TokenBased => f64::MIN_POSITIVE,
        }
    }

    fn score_candidate(
        &self,
        focal: &Product,
        candidate: &Product,
        strategy: RelatedStrategy,
        signals: &ContextSignals,
    ) -> RankedResult {
        match strategy {
            RelatedStrategy::WeightedTags => self.score_weighted(focal, candidate, signals),
            RelatedStrategy::SearchBased => self.score_search_based(focal, candidate),
            RelatedStrategy::TokenBased => self.score_token_based(focal, candidate),
        }
    }

    /// Shared-tag-identity scoring. Identity only: related-item ranking is
    /// driven by shared taxonomy, never by free-text fuzziness.
    fn score_weighted(
        &self,
        focal: &Product,
        candidate: &Product,
        signals: &ContextSignals,
    ) -> RankedResult {
        let focal_ids: HashSet<&str> = focal.tags.iter().map(|t| t.id.as_str()).collect();

        let mut score = 0.0;
        let mut matched_tags = Vec::new();
        let mut shared_developer = false;
        for tag in &candidate.tags {
            if !focal_ids.contains(tag.id.as_str()) {
                continue;
            }
            score += self.config.weight_for(tag.category);
            matched_tags.push(tag.name.clone());
            if tag.category == TagCategory::Developer {
                shared_developer = true;
            }
        }

        // Boost 1: shared developer tag - same studio's items cluster.
        if shared_developer {
            score += self.config.shared_developer_boost;
        }
        // Boost 2: tag-rich candidate - a popularity proxy in the absence
        // of real usage signals.
        if candidate.tags.len() >= self.config.rich_tag_count {
            score += self.config.rich_tag_boost;
        }
        // Boost 3/4: caller-supplied co-purchase and recency signals.
        if signals.copurchased.contains(&candidate.id) {
            score += self.config.copurchase_boost;
        }
        if signals.recent.contains(&candidate.id) {
            score += self.config.recency_boost;
        }

        let mut result = RankedResult::new(candidate.clone(), score, Strategy::WeightedTags);
        result.matched_tags = matched_tags;
        result
    }

    /// Search-based scoring: the focal product's name is the query.
    fn score_search_based(&self, focal: &Product, candidate: &Product) -> RankedResult {
        let tokens = tokenize(&focal.name);
        let whole_query = normalize(&focal.name);
        SearchMatcher::new(self.config)
            .score_product(candidate, &tokens, &whole_query)
            .unwrap_or_else(|| RankedResult::new(candidate.clone(), 0.0, Strategy::SearchBased))
    }

    /// Token-based scoring: best pairwise compatibility between the two
    /// names' token sets, scaled like a tag hit.
    fn score_token_based(&self, focal: &Product, candidate: &Product) -> RankedResult {
        let focal_tokens = tokenize(&focal.name);
        let candidate_tokens = tokenize(&candidate.name);

        let mut score = 0.0;
        for token in &focal_tokens {
            let best = candidate_tokens
                .iter()
                .map(|c| similarity(token, c))
                .fold(0.0_f64, f64::max);
            score += best * self.config.tag_weight_multiplier;
        }
        RankedResult::new(candidate.clone(), score, Strategy::TokenBased)
    }
}
