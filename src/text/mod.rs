//! Text canonicalization and token similarity.
//!
//! Catalog data is noisy: mixed case, Portuguese diacritics, punctuation,
//! inconsistent spacing. Everything the engine compares goes through
//! [`normalize`] first so that "Ação" and "acao" are the same signal.

mod normalize;
mod similarity;

pub use normalize::{normalize, tokenize};
pub use similarity::similarity;
