//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls result counts, the upstream catalog endpoints,
//! caching, the offline fallback and the ranking weights.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::ranking::scoring::RankingWeights;

/// Largest page size the catalog search endpoint accepts.
pub const MAX_FETCH_LIMIT: usize = 50;

/// Configuration for track search and ranking.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour. Missing fields in a TOML `[search]`
/// table fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of suggestions returned after filtering and ranking.
    pub max_results: usize,
    /// How many hits to request from the catalog per search. Larger than
    /// `max_results` because the exclusion filter drops derivative versions.
    pub fetch_limit: usize,
    /// Catalog market (ISO 3166-1 alpha-2) passed on search requests.
    pub market: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Queries with fewer characters (after trimming) return no suggestions.
    pub min_query_length: usize,
    /// How long to cache ranked suggestions in seconds. Set to 0 to disable.
    pub cache_ttl_seconds: u64,
    /// Maximum number of cached queries.
    pub cache_capacity: u64,
    /// Serve results from the offline catalog when the live catalog fails.
    pub fallback_to_mock: bool,
    /// Simulated latency range in milliseconds `(min, max)` for the offline
    /// catalog.
    pub mock_latency_ms: (u64, u64),
    /// Base URL of the catalog Web API.
    pub api_base_url: String,
    /// OAuth token endpoint for the client-credentials exchange.
    pub token_url: String,
    /// Custom User-Agent string. If `None`, a crate-identifying one is used.
    pub user_agent: Option<String>,
    /// Ranking weights.
    pub weights: RankingWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 10,
            fetch_limit: 20,
            market: "US".into(),
            timeout_seconds: 8,
            min_query_length: 1,
            cache_ttl_seconds: 300,
            cache_capacity: 100,
            fallback_to_mock: true,
            mock_latency_ms: (200, 500),
            api_base_url: "https://api.spotify.com/v1/".into(),
            token_url: "https://accounts.spotify.com/api/token".into(),
            user_agent: None,
            weights: RankingWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results` must be greater than 0
    /// - `fetch_limit` must be within `1..=50`
    /// - `timeout_seconds` must be greater than 0
    /// - `market` must be a two-letter code
    /// - `mock_latency_ms.0` must be <= `mock_latency_ms.1`
    /// - both endpoint URLs must parse
    /// - ranking weights must keep their orderings strict
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.fetch_limit == 0 || self.fetch_limit > MAX_FETCH_LIMIT {
            return Err(SearchError::Config(format!(
                "fetch_limit must be between 1 and {MAX_FETCH_LIMIT}"
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.market.len() != 2 || !self.market.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SearchError::Config(format!(
                "market must be a two-letter country code, got {:?}",
                self.market
            )));
        }
        if self.mock_latency_ms.0 > self.mock_latency_ms.1 {
            return Err(SearchError::Config(
                "mock_latency_ms min must be <= max".into(),
            ));
        }
        for (name, raw) in [("api_base_url", &self.api_base_url), ("token_url", &self.token_url)] {
            url::Url::parse(raw)
                .map_err(|e| SearchError::Config(format!("{name} is not a valid URL: {e}")))?;
        }
        self.weights.validate()
    }
}
