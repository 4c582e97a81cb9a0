//! Additive relevance scoring for catalog hits.
//!
//! Assigns scores based on:
//! - Catalog popularity (0–100) as the base
//! - Query match strength against the title and the artist string
//! - A bonus for Japanese-language content
//! - A penalty for featuring credits, mix/edit markers and Western locale words
//!
//! Formula:
//!
//! ```text
//! score = popularity
//!       + title_tier_weight + artist_tier_weight
//!       + japanese_bonus (if flagged)
//!       - western_penalty (if flagged)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::RawHit;

/// Words that mark Japan-locale content when they appear as whole words.
const JAPAN_LOCALE_WORDS: &[&str] = &[
    "jp", "japan", "japanese", "jpn", "tokyo", "osaka", "kyoto", "nagoya",
];

/// Words that mark featuring credits, alternate mixes or Western locales.
const WESTERN_MARKER_WORDS: &[&str] = &[
    "feat", "ft", "featuring", "remix", "mix", "edit", "us", "uk", "usa", "america", "britain",
];

/// Upper bound for any single weight. Keeps every score far from `i64` limits.
pub const MAX_WEIGHT: i64 = 1_000_000;

/// How strongly a piece of text matches the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    None,
    Contains,
    Prefix,
    Exact,
}

/// Weights used by [`score_hit`].
///
/// The defaults satisfy every ordering the ranker promises; custom values
/// are checked by [`RankingWeights::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub title_exact: i64,
    pub title_prefix: i64,
    pub title_contains: i64,
    pub artist_exact: i64,
    pub artist_prefix: i64,
    pub artist_contains: i64,
    /// Added when title, artist or album text looks Japanese.
    pub japanese_bonus: i64,
    /// Subtracted when title, artist or album text carries a Western marker.
    pub western_penalty: i64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            title_exact: 1000,
            title_prefix: 500,
            title_contains: 300,
            artist_exact: 200,
            artist_prefix: 100,
            artist_contains: 50,
            japanese_bonus: 50,
            western_penalty: 20,
        }
    }
}

impl RankingWeights {
    /// Check that tiers are strictly ordered, that each title tier outweighs
    /// the matching artist tier, that bonus and penalty are positive, and
    /// that no weight exceeds [`MAX_WEIGHT`].
    pub fn validate(&self) -> Result<(), SearchError> {
        let all = [
            self.title_exact,
            self.title_prefix,
            self.title_contains,
            self.artist_exact,
            self.artist_prefix,
            self.artist_contains,
            self.japanese_bonus,
            self.western_penalty,
        ];
        if all.iter().any(|w| *w > MAX_WEIGHT) {
            return Err(SearchError::Config(format!(
                "ranking weights must not exceed {MAX_WEIGHT}"
            )));
        }
        let tiers_ordered = |exact: i64, prefix: i64, contains: i64| {
            exact > prefix && prefix > contains && contains > 0
        };
        if !tiers_ordered(self.title_exact, self.title_prefix, self.title_contains) {
            return Err(SearchError::Config(
                "title weights must satisfy exact > prefix > contains > 0".into(),
            ));
        }
        if !tiers_ordered(self.artist_exact, self.artist_prefix, self.artist_contains) {
            return Err(SearchError::Config(
                "artist weights must satisfy exact > prefix > contains > 0".into(),
            ));
        }
        if self.artist_exact >= self.title_exact
            || self.artist_prefix >= self.title_prefix
            || self.artist_contains >= self.title_contains
        {
            return Err(SearchError::Config(
                "each title weight must exceed the matching artist weight".into(),
            ));
        }
        if self.japanese_bonus <= 0 || self.western_penalty <= 0 {
            return Err(SearchError::Config(
                "japanese_bonus and western_penalty must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    fn title_weight(&self, tier: MatchTier) -> i64 {
        match tier {
            MatchTier::Exact => self.title_exact,
            MatchTier::Prefix => self.title_prefix,
            MatchTier::Contains => self.title_contains,
            MatchTier::None => 0,
        }
    }

    fn artist_weight(&self, tier: MatchTier) -> i64 {
        match tier {
            MatchTier::Exact => self.artist_exact,
            MatchTier::Prefix => self.artist_prefix,
            MatchTier::Contains => self.artist_contains,
            MatchTier::None => 0,
        }
    }
}

/// Classify how `text` matches an already case-folded, trimmed `query`.
pub fn match_tier(text: &str, query: &str) -> MatchTier {
    if query.is_empty() {
        return MatchTier::None;
    }
    let text = text.to_lowercase();
    if text == query {
        MatchTier::Exact
    } else if text.starts_with(query) {
        MatchTier::Prefix
    } else if text.contains(query) {
        MatchTier::Contains
    } else {
        MatchTier::None
    }
}

/// Whether `c` is hiragana, katakana or a CJK unified ideograph.
fn is_japanese_script(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{309f}' | '\u{30a0}'..='\u{30ff}' | '\u{4e00}'..='\u{9faf}')
}

/// Lower-cased word tokens of `text`, split on anything outside ASCII
/// letters and digits, so "US盤" yields "us".
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

fn contains_word(text: &str, vocabulary: &[&str]) -> bool {
    words(text).any(|w| vocabulary.contains(&w.as_str()))
}

/// Whether `text` contains Japanese script or a Japan-locale word.
pub fn has_japanese_marker(text: &str) -> bool {
    text.chars().any(is_japanese_script) || contains_word(text, JAPAN_LOCALE_WORDS)
}

/// Whether `text` carries a featuring credit, a mix/edit marker or a
/// Western-locale word.
pub fn has_western_marker(text: &str) -> bool {
    contains_word(text, WESTERN_MARKER_WORDS)
}

/// Calculate the relevance score of `hit` for an already case-folded,
/// trimmed `query`.
///
/// Popularity above 100 is clamped so a malformed upstream value cannot
/// outweigh a match tier.
pub fn score_hit(hit: &RawHit, query: &str, weights: &RankingWeights) -> i64 {
    let artist = hit.artist_display();
    let base = i64::from(hit.popularity.min(100));

    let title_term = weights.title_weight(match_tier(&hit.title, query));
    let artist_term = weights.artist_weight(match_tier(&artist, query));

    let fields = [hit.title.as_str(), artist.as_str(), hit.album_title.as_str()];
    let mut language: i64 = 0;
    if fields.iter().any(|f| has_japanese_marker(f)) {
        language = language.saturating_add(weights.japanese_bonus);
    }
    if fields.iter().any(|f| has_western_marker(f)) {
        language = language.saturating_sub(weights.western_penalty);
    }

    base.saturating_add(title_term)
        .saturating_add(artist_term)
        .saturating_add(language)
}
