//! Token-to-tag compatibility scoring.
//!
//! Deliberately cruder than edit-distance metrics: catalog tags are short
//! curated slugs, so equality and containment cover the cases that matter,
//! and anything fuzzier would surface junk matches. Both inputs must
//! already be normalized (see [`super::normalize`]).

/// Similarity between two normalized strings, in `[0.0, 1.0]`.
///
/// - `1.0` when the strings are equal.
/// - `min_len / max_len` when one contains the other, so near-equal lengths
///   score close to 1 ("zelda" in "zeldas" ≈ 0.83) and a short token inside
///   a long tag scores low ("rpg" in "rpg maker collection" ≈ 0.15).
/// - `0.0` otherwise.
///
/// Empty strings never match anything, including each other.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    if a.contains(b) || b.contains(a) {
        let (min, max) = if a.len() < b.len() {
            (a.len(), b.len())
        } else {
            (b.len(), a.len())
        };
        return min as f64 / max as f64;
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_strings_score_one() {
        assert_eq!(similarity("zelda", "zelda"), 1.0);
    }

    #[test]
    fn test_containment_scores_length_ratio() {
        assert_eq!(similarity("zelda", "zeldas"), 5.0 / 6.0);
        assert_eq!(similarity("zeldas", "zelda"), 5.0 / 6.0);
        assert_eq!(similarity("rpg", "rpg maker collection"), 3.0 / 20.0);
    }

    #[test]
    fn test_unrelated_strings_score_zero() {
        assert_eq!(similarity("mario", "zelda"), 0.0);
    }

    #[test]
    fn test_empty_strings_never_match() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("zelda", ""), 0.0);
        assert_eq!(similarity("", "zelda"), 0.0);
    }

    #[test]
    fn test_range_invariant() {
        for (a, b) in [("ab", "abcdef"), ("abcdef", "ab"), ("x", "x"), ("q", "z")] {
            let s = similarity(a, b);
            assert!((0.0..=1.0).contains(&s), "similarity({a}, {b}) = {s}");
        }
    }
}
