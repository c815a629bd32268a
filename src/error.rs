//! Engine errors.
//!
//! The engine absorbs malformed catalog data into defined branches (empty
//! queries, missing tags, out-of-range weights) rather than failing; the
//! only errors it raises are caller invariant violations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A caller-supplied argument violates an interface invariant, e.g.
    /// `max_results == 0`. Rejected up front rather than silently
    /// mis-ranking.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
