//! Keyword filter for derivative recordings.
//!
//! The catalog returns many karaoke, live, remix and cover versions of the
//! same song. A hit is dropped when its title or artist string contains any
//! keyword below as a case-insensitive substring.

use crate::types::RawHit;

/// Keywords marking a non-canonical version, lower-cased.
pub const EXCLUDED_KEYWORDS: &[&str] = &[
    // karaoke / instrumental
    "カラオケ",
    "karaoke",
    "オフボーカル",
    "off vocal",
    "instrumental",
    "インスト",
    "backing track",
    "歌ってみた",
    "歌ってみよう",
    "sing along",
    // live / concert / tour
    "live",
    "ライブ",
    "concert",
    "コンサート",
    "tour",
    "ツアー",
    // remix / edit
    "remix",
    "リミックス",
    "edit",
    "extended",
    "radio edit",
    // acoustic / unplugged
    "acoustic",
    "アコースティック",
    "unplugged",
    "アンプラグド",
    // cover / tribute
    "cover",
    "カバー",
    "tribute",
    "トリビュート",
    // demo / rough
    "demo",
    "デモ",
    "rough",
    "ラフ",
    ".ver",
];

/// Whether a track with this title and joined artist string is a
/// derivative version that should never be suggested.
pub fn is_excluded(title: &str, artists: &str) -> bool {
    let combined = format!("{title} {artists}").to_lowercase();
    EXCLUDED_KEYWORDS
        .iter()
        .any(|keyword| combined.contains(keyword))
}

/// Whether `hit` should be dropped by the exclusion filter.
pub fn is_excluded_hit(hit: &RawHit) -> bool {
    is_excluded(&hit.title, &hit.artist_display())
}
