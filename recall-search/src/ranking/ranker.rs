//! The ranking pipeline: exclude, dedup, score, sort, truncate.

use crate::types::{RawHit, Suggestion};

use super::dedup::deduplicate;
use super::exclusion::is_excluded_hit;
use super::scoring::{score_hit, RankingWeights};

/// Result count used when the caller has no preference.
pub const DEFAULT_LIMIT: usize = 10;

/// Rank `hits` for `query` with the default weights.
///
/// See [`rank_with_weights`].
pub fn rank(hits: &[RawHit], query: &str, limit: usize) -> Vec<Suggestion> {
    rank_with_weights(hits, query, limit, &RankingWeights::default())
}

/// Rank `hits` for `query`, returning at most `limit` suggestions.
///
/// # Pipeline
///
/// 1. Drop derivative versions (karaoke, live, remix, cover, demo, ...)
/// 2. Drop repeated ids, keeping the first occurrence
/// 3. Score each survivor (popularity + match tiers + language signals)
/// 4. Stable sort by score descending, so ties keep input order
/// 5. Truncate to `limit`
///
/// A query that is empty after trimming yields no suggestions. Inputs are
/// never mutated and the output is a subset of `hits`.
pub fn rank_with_weights(
    hits: &[RawHit],
    query: &str,
    limit: usize,
    weights: &RankingWeights,
) -> Vec<Suggestion> {
    let query = query.trim().to_lowercase();
    if query.is_empty() || hits.is_empty() {
        return Vec::new();
    }

    let survivors = deduplicate(hits.iter().filter(|hit| !is_excluded_hit(hit)));

    let mut ranked: Vec<Suggestion> = survivors
        .into_iter()
        .map(|hit| Suggestion::new(hit.clone(), score_hit(hit, &query, weights)))
        .collect();

    // `sort_by` is stable: equal scores keep their input order.
    ranked.sort_by(|a, b| b.score().cmp(&a.score()));
    ranked.truncate(limit);

    tracing::trace!(
        input = hits.len(),
        output = ranked.len(),
        "ranked catalog hits"
    );
    ranked
}

/// Apply the exclusion filter and id dedup without scoring.
///
/// Used for listings (artist top tracks, album tracks) where there is no
/// query to match against and catalog order is kept.
pub fn filter_hits(hits: &[RawHit]) -> Vec<RawHit> {
    deduplicate(hits.iter().filter(|hit| !is_excluded_hit(hit)))
        .into_iter()
        .cloned()
        .collect()
}
