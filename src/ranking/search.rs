//! Free-text catalog search.
//!
//! Scores every rankable product against the query tokens across three
//! signals, then partitions hits into two confidence tiers:
//!
//! - **Tag matches**: each query token may consume at most one tag; a
//!   consumed tag contributes `10 × weight`. Tags are the primary signal
//!   because they are curated, names are not.
//! - **Name/category hits**: tokens appearing verbatim in the normalized
//!   product name (15 each) or merchandising category (5 each).
//! - **Whole-query bonus**: +25 when the entire normalized query appears
//!   inside the name or category.
//!
//! The split at the exact-match threshold (20) exists because one number
//! cannot tell the caller "this is what the user meant" apart from "this
//! is a loose suggestion"; the storefront renders the tiers differently.

use std::collections::HashSet;

use crate::config::EngineConfig;
use crate::text::{normalize, similarity, tokenize};
use crate::types::{Product, RankedResult, SearchResults, Strategy};

/// Token-to-tag match confidence, tracked for observability only; every
/// accepted match contributes the same weighted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchKind {
    /// Similarity exactly 1.0 (token equals the normalized tag).
    Exact,
    /// Containment with similarity above the partial threshold.
    Partial,
    /// Containment with low length ratio (a short token inside a long
    /// tag, or vice versa). Still a match: tags are curated, so any
    /// containment is meaningful.
    Weak,
}

/// Catalog scanner for free-text queries.
pub struct SearchMatcher<'a> {
    config: &'a EngineConfig,
}

impl<'a> SearchMatcher<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Score every rankable product against `query` and partition results.
    ///
    /// Empty and whitespace-only queries yield empty result sets, never an
    /// error. Inactive and master products are skipped. A product with no
    /// matching tag is not a candidate regardless of name hits.
    pub fn search(&self, query: &str, catalog: &[Product]) -> SearchResults {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return SearchResults::default();
        }
        let whole_query = normalize(query);

        let mut results = SearchResults::default();
        for product in catalog.iter().filter(|p| p.rankable()) {
            let Some(result) = self.score_product(product, &tokens, &whole_query) else {
                continue;
            };
            if result.score >= self.config.exact_match_threshold {
                results.exact_matches.push(result);
            } else {
                results.related_products.push(result);
            }
        }

        super::order::sort_results(&mut results.exact_matches);
        super::order::sort_results(&mut results.related_products);

        tracing::debug!(
            query = %whole_query,
            exact = results.exact_matches.len(),
            related = results.related_products.len(),
            "search complete"
        );
        results
    }

    /// Score one product, or `None` when no tag matched any token.
    ///
    /// Also used by the related-items ranker's search-based strategy,
    /// which feeds the focal product's name through as the "query".
    pub(crate) fn score_product(
        &self,
        product: &Product,
        tokens: &[String],
        whole_query: &str,
    ) -> Option<RankedResult> {
        let tag_names: Vec<String> = product.tags.iter().map(|t| normalize(&t.name)).collect();

        // Each tag may satisfy at most one token; without this, a query
        // like "zelda zelda switch" would double-count the zelda tag.
        let mut used_tags: HashSet<usize> = HashSet::new();
        let mut tag_score = 0.0;
        let mut matched_tags = Vec::new();
        let mut exact_count = 0usize;
        let mut partial_count = 0usize;

        for token in tokens {
            let Some((idx, sim)) = self.best_tag_match(token, &tag_names, &used_tags) else {
                continue;
            };
            used_tags.insert(idx);
            let tag = &product.tags[idx];
            tag_score += self.config.tag_weight_multiplier * f64::from(tag.clamped_weight());
            matched_tags.push(tag.name.clone());
            match self.classify_match(sim) {
                MatchKind::Exact => exact_count += 1,
                MatchKind::Partial | MatchKind::Weak => partial_count += 1,
            }
        }

        // No tag signal at all: not a candidate, even if the name would
        // have matched. Name hits refine tag-backed scores, they do not
        // create candidates on their own.
        if used_tags.is_empty() {
            return None;
        }

        let name = normalize(&product.name);
        let category = normalize(&product.category);
        let name_hits = tokens.iter().filter(|t| name.contains(t.as_str())).count();
        let category_hits = tokens
            .iter()
            .filter(|t| category.contains(t.as_str()))
            .count();
        let whole_query_bonus = if name.contains(whole_query) || category.contains(whole_query) {
            self.config.whole_query_bonus
        } else {
            0.0
        };

        let score = name_hits as f64 * self.config.name_token_weight
            + tag_score
            + category_hits as f64 * self.config.category_token_weight
            + whole_query_bonus;

        tracing::debug!(
            product_id = %product.id,
            score,
            exact_count,
            partial_count,
            name_hits,
            category_hits,
            "scored search candidate"
        );

        let mut result = RankedResult::new(product.clone(), score, Strategy::SearchBased);
        result.matched_tags = matched_tags;
        Some(result)
    }

    /// Best unused tag for a token: highest similarity wins, first tag in
    /// catalog order on a tie (for determinism). Returns `None` when no
    /// unused tag has similarity above zero.
    fn best_tag_match(
        &self,
        token: &str,
        tag_names: &[String],
        used: &HashSet<usize>,
    ) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, name) in tag_names.iter().enumerate() {
            if used.contains(&idx) {
                continue;
            }
            let sim = similarity(token, name);
            if sim <= 0.0 {
                continue;
            }
            match best {
                Some((_, best_sim)) if sim <= best_sim => {}
                _ => best = Some((idx, sim)),
            }
        }
        best
    }

    fn classify_match(&self, sim: f64) -> MatchKind {
        if sim >= 1.0 {
            MatchKind::Exact
        } else if sim > self.config.partial_similarity_min {
            MatchKind::Partial
        } else {
            MatchKind::Weak
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProductType, Tag, TagCategory};
    use rust_decimal::Decimal;

    fn make_tag(id: &str, name: &str, weight: i32) -> Tag {
        Tag {
            id: id.into(),
            name: name.into(),
            weight,
            category: TagCategory::Generic,
        }
    }

    fn make_product(id: &str, name: &str, category: &str, tags: Vec<Tag>) -> Product {
        Product {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            tags,
            price: Decimal::from(100),
            active: true,
            product_type: ProductType::Simple,
        }
    }

    fn search(query: &str, catalog: &[Product]) -> SearchResults {
        let config = EngineConfig::default();
        SearchMatcher::new(&config).search(query, catalog)
    }

    #[test]
    fn test_empty_query_yields_empty_results() {
        let catalog = vec![make_product(
            "p1",
            "Zelda",
            "Games",
            vec![make_tag("zelda", "zelda", 5)],
        )];
        assert!(search("", &catalog).is_empty());
        assert!(search("   ", &catalog).is_empty());
        assert!(search("!!", &catalog).is_empty());
    }

    #[test]
    fn test_whole_query_in_name_lands_in_exact_matches() {
        // "Resident Evil 4 Remake PS5" tagged resident-evil (weight 5):
        //   tokens = [resident, evil]  ("4" is below the token minimum)
        //   name hits: 2 × 15 = 30
        //   tag score: 10 × 5 = 50 (one token consumes the tag)
        //   whole-query substring bonus: 25
        //   total: 105 >= 20 -> exact match
        let catalog = vec![make_product(
            "p1",
            "Resident Evil 4 Remake PS5",
            "Jogos",
            vec![make_tag("resident-evil", "Resident Evil", 5)],
        )];

        let results = search("resident evil 4", &catalog);
        assert_eq!(results.exact_matches.len(), 1);
        assert!(results.related_products.is_empty());
        assert_eq!(results.exact_matches[0].score, 105.0);
        assert_eq!(results.exact_matches[0].matched_tags, vec!["Resident Evil"]);
        assert_eq!(results.exact_matches[0].algorithm, Strategy::SearchBased);
    }

    #[test]
    fn test_partition_invariant() {
        let catalog = vec![
            // Strong: exact tag + name hit
            make_product("p1", "Zelda Breath of the Wild", "Games", vec![make_tag("zelda", "zelda", 5)]),
            // Weak: low-weight tag only, name does not contain the token
            make_product("p2", "Hyrule Compendium", "Books", vec![make_tag("zelda", "zelda", 1)]),
        ];

        let results = search("zelda", &catalog);
        for r in &results.exact_matches {
            assert!(r.score >= 20.0);
        }
        for r in &results.related_products {
            assert!(r.score > 0.0 && r.score < 20.0);
        }
        assert_eq!(results.exact_matches.len(), 1);
        assert_eq!(results.exact_matches[0].product.id, "p1");
        assert_eq!(results.related_products.len(), 1);
        assert_eq!(results.related_products[0].product.id, "p2");
    }

    #[test]
    fn test_product_without_matching_tag_is_not_a_candidate() {
        // Name contains the token but no tag matches: skipped entirely.
        let catalog = vec![make_product(
            "p1",
            "Zelda Poster",
            "Decor",
            vec![make_tag("poster", "poster", 3)],
        )];
        assert!(search("zelda", &catalog).is_empty());
    }

    #[test]
    fn test_tag_consumed_by_at_most_one_token() {
        // Two tokens both match the single tag; only one may consume it,
        // so the tag contributes 10×5 once, not twice.
        let catalog = vec![make_product(
            "p1",
            "Collection",
            "Games",
            vec![make_tag("zelda", "zelda zeldas", 5)],
        )];
        let results = search("zelda zeldas", &catalog);
        let hit = results
            .exact_matches
            .iter()
            .chain(&results.related_products)
            .next()
            .expect("one candidate");
        assert_eq!(hit.matched_tags.len(), 1);
        assert_eq!(hit.score, 50.0);
    }

    #[test]
    fn test_inactive_and_master_products_excluded() {
        let mut inactive = make_product("p1", "Zelda", "Games", vec![make_tag("zelda", "zelda", 5)]);
        inactive.active = false;
        let mut master = make_product("p2", "Zelda", "Games", vec![make_tag("zelda", "zelda", 5)]);
        master.product_type = ProductType::Master;

        assert!(search("zelda", &[inactive, master]).is_empty());
    }

    #[test]
    fn test_out_of_range_weight_clamped_not_rejected() {
        let catalog = vec![make_product(
            "p1",
            "Zelda",
            "Games",
            vec![make_tag("zelda", "zelda", 99)],
        )];
        let results = search("zelda", &catalog);
        let hit = &results.exact_matches[0];
        // tag 10×5 (clamped) + name 15 + whole-query 25 = 90
        assert_eq!(hit.score, 90.0);
    }

    #[test]
    fn test_determinism_identical_inputs_identical_output() {
        let catalog: Vec<Product> = (0..20)
            .map(|i| {
                make_product(
                    &format!("p{i}"),
                    &format!("Zelda Item {i}"),
                    "Games",
                    vec![make_tag("zelda", "zelda", 1 + (i % 5) as i32)],
                )
            })
            .collect();

        let a = search("zelda item", &catalog);
        let b = search("zelda item", &catalog);
        let ids = |r: &SearchResults| {
            r.exact_matches
                .iter()
                .chain(&r.related_products)
                .map(|x| x.product.id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn test_scores_are_non_negative() {
        let catalog = vec![
            make_product("p1", "A", "x", vec![make_tag("t", "alpha", 1)]),
            make_product("p2", "B", "y", vec![make_tag("t", "beta", 5)]),
        ];
        let results = search("alpha beta", &catalog);
        for r in results.exact_matches.iter().chain(&results.related_products) {
            assert!(r.score >= 0.0);
        }
    }

    #[test]
    fn test_category_hits_contribute() {
        // Tag matches weakly; category token adds 5 per hit.
        let with_cat = make_product(
            "p1",
            "Mystery Box",
            "Zelda Merchandise",
            vec![make_tag("zelda", "zelda", 1)],
        );
        let without_cat = make_product(
            "p2",
            "Mystery Box",
            "Merchandise",
            vec![make_tag("zelda", "zelda", 1)],
        );
        let results = search("zelda", &[with_cat, without_cat]);
        let all: Vec<_> = results
            .exact_matches
            .iter()
            .chain(&results.related_products)
            .collect();
        let p1 = all.iter().find(|r| r.product.id == "p1").unwrap();
        let p2 = all.iter().find(|r| r.product.id == "p2").unwrap();
        assert_eq!(p1.score - p2.score, 5.0 + 25.0); // category hit + whole-query in category
    }
}
