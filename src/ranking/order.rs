//! Deterministic result ordering shared by search and related items.
//!
//! Identical requests must produce byte-identical output: caching layers
//! key on it, and users notice when "the same search" shuffles. An earlier
//! generation of this logic broke score ties randomly; the replacement is a
//! total order with no random component:
//!
//! 1. score, descending
//! 2. price, ascending (cheaper first among equals)
//! 3. normalized name, ascending (accent- and case-insensitive)
//! 4. raw name, then product id, as final disambiguators

use std::cmp::Ordering;

use crate::text::normalize;
use crate::types::RankedResult;

/// Compare two results under the engine's total order.
///
/// Scores are compared with `total_cmp`; they are always finite and
/// non-negative here, but `total_cmp` keeps the order total even if a
/// caller-supplied boost misbehaves.
pub fn compare_results(a: &RankedResult, b: &RankedResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.product.price.cmp(&b.product.price))
        .then_with(|| normalize(&a.product.name).cmp(&normalize(&b.product.name)))
        .then_with(|| a.product.name.cmp(&b.product.name))
        .then_with(|| a.product.id.cmp(&b.product.id))
}

/// Sort a result list in place under [`compare_results`].
pub fn sort_results(results: &mut [RankedResult]) {
    results.sort_by(compare_results);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Product, ProductType, Strategy};
    use rust_decimal::Decimal;

    fn make_result(id: &str, name: &str, price: i64, score: f64) -> RankedResult {
        RankedResult::new(
            Product {
                id: id.into(),
                name: name.into(),
                category: "games".into(),
                tags: vec![],
                price: Decimal::from(price),
                active: true,
                product_type: ProductType::Simple,
            },
            score,
            Strategy::SearchBased,
        )
    }

    #[test]
    fn test_higher_score_first() {
        let mut results = vec![
            make_result("a", "Alpha", 10, 5.0),
            make_result("b", "Beta", 10, 50.0),
        ];
        sort_results(&mut results);
        assert_eq!(results[0].product.id, "b");
    }

    #[test]
    fn test_score_tie_breaks_on_price() {
        let mut results = vec![
            make_result("a", "Alpha", 200, 30.0),
            make_result("b", "Beta", 100, 30.0),
        ];
        sort_results(&mut results);
        assert_eq!(results[0].product.id, "b"); // cheaper first
    }

    #[test]
    fn test_price_tie_breaks_on_name() {
        let mut results = vec![
            make_result("z", "Zelda", 100, 30.0),
            make_result("m", "Mário", 100, 30.0),
        ];
        sort_results(&mut results);
        // "mario" < "zelda" after normalization, accents ignored
        assert_eq!(results[0].product.id, "m");
    }

    #[test]
    fn test_full_tie_breaks_on_id() {
        let mut results = vec![
            make_result("p2", "Same", 100, 30.0),
            make_result("p1", "Same", 100, 30.0),
        ];
        sort_results(&mut results);
        assert_eq!(results[0].product.id, "p1");
    }

    #[test]
    fn test_sort_is_deterministic_across_input_orders() {
        let a = make_result("a", "Alpha", 100, 30.0);
        let b = make_result("b", "Beta", 100, 30.0);
        let c = make_result("c", "Gamma", 50, 40.0);

        let mut one = vec![a.clone(), b.clone(), c.clone()];
        let mut two = vec![c, b, a];
        sort_results(&mut one);
        sort_results(&mut two);

        let ids: Vec<_> = one.iter().map(|r| r.product.id.as_str()).collect();
        let ids2: Vec<_> = two.iter().map(|r| r.product.id.as_str()).collect();
        assert_eq!(ids, ids2);
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
