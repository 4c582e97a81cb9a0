//! Relevance ranking: exclusion filter, id dedup, scoring, ordering.
//!
//! Turns the raw hits of one catalog search into a deduplicated, filtered,
//! ordered list of suggestions. Everything here is pure and synchronous.

pub mod dedup;
pub mod exclusion;
pub mod ranker;
pub mod scoring;

pub use ranker::{filter_hits, rank, rank_with_weights, DEFAULT_LIMIT};
pub use scoring::{RankingWeights, MAX_WEIGHT};
