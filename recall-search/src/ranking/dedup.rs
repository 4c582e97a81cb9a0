//! Hit deduplication by catalog id.
//!
//! Merging several upstream calls (top tracks plus album dumps, or a live
//! search plus a fallback) can yield the same track more than once. The
//! first occurrence in input order wins.

use std::collections::HashSet;

use crate::types::RawHit;

/// Drop hits whose `id` was already seen, preserving input order.
pub fn deduplicate<'a, I>(hits: I) -> Vec<&'a RawHit>
where
    I: IntoIterator<Item = &'a RawHit>,
{
    let mut seen: HashSet<&'a str> = HashSet::new();
    let mut unique = Vec::new();
    for hit in hits {
        if seen.insert(hit.id.as_str()) {
            unique.push(hit);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_hit(id: &str, title: &str, popularity: u32) -> RawHit {
        RawHit {
            popularity,
            ..RawHit::new(id, title)
        }
    }

    #[test]
    fn unique_ids_pass_through() {
        let hits = vec![make_hit("a", "A", 1), make_hit("b", "B", 2)];
        assert_eq!(deduplicate(&hits).len(), 2);
    }

    #[test]
    fn first_occurrence_kept() {
        let hits = vec![
            make_hit("a", "First", 10),
            make_hit("b", "Other", 50),
            make_hit("a", "Second", 90),
        ];
        let deduped = deduplicate(&hits);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "First");
        assert_eq!(deduped[1].id, "b");
    }

    #[test]
    fn order_preserved() {
        let hits = vec![
            make_hit("c", "C", 0),
            make_hit("a", "A", 0),
            make_hit("c", "C again", 0),
            make_hit("b", "B", 0),
        ];
        let ids: Vec<&str> = deduplicate(&hits).iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn empty_input_returns_empty() {
        let hits: Vec<RawHit> = vec![];
        assert!(deduplicate(&hits).is_empty());
    }
}
