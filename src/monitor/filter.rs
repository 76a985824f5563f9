// src/monitor/filter.rs
use crate::source::FetchedItem;

/// Case-insensitive keyword set. Empty set matches everything.
#[derive(Debug, Clone, Default)]
pub struct KeywordFilter {
    terms: Vec<String>,
}

impl KeywordFilter {
    pub fn new<I: IntoIterator<Item = String>>(terms: I) -> Self {
        let terms = terms
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, text: &str) -> bool {
        if self.terms.is_empty() {
            return true;
        }
        let lower = text.to_lowercase();
        self.terms.iter().any(|t| lower.contains(t))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Item id equals the subscription's dedup marker.
    AlreadySeen,
    /// Keyword set is non-empty and nothing matched.
    NoKeywordMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Notify,
    Skip(SkipReason),
}

/// Decide whether a freshly fetched item is new and matches the filter.
///
/// Dedup policy: only-advance-on-Notify. The caller moves `last_seen_id`
/// to `item.id` exactly when it acts on a `Notify` decision; a skipped
/// item never advances the marker.
pub fn evaluate(item: &FetchedItem, last_seen_id: Option<&str>, keywords: &KeywordFilter) -> Decision {
    if last_seen_id == Some(item.id.as_str()) {
        return Decision::Skip(SkipReason::AlreadySeen);
    }
    if !keywords.matches(&item.text) {
        return Decision::Skip(SkipReason::NoKeywordMatch);
    }
    Decision::Notify
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, text: &str) -> FetchedItem {
        FetchedItem::new(id.to_string(), text.to_string())
    }

    #[test]
    fn same_id_never_renotifies() {
        let filter = KeywordFilter::default();
        let it = item("100", "hello");
        assert_eq!(
            evaluate(&it, Some("100"), &filter),
            Decision::Skip(SkipReason::AlreadySeen)
        );
    }

    #[test]
    fn strictly_increasing_ids_notify_once_each() {
        let filter = KeywordFilter::default();
        let mut last_seen: Option<String> = None;
        let mut notified = Vec::new();
        for id in ["1", "2", "2", "3", "3", "3"] {
            let it = item(id, "text");
            if evaluate(&it, last_seen.as_deref(), &filter) == Decision::Notify {
                last_seen = Some(it.id.clone());
                notified.push(it.id);
            }
        }
        assert_eq!(notified, vec!["1", "2", "3"]);
    }

    #[test]
    fn keyword_match_is_case_insensitive_substring() {
        let filter = KeywordFilter::new(vec!["launch".to_string()]);
        assert_eq!(
            evaluate(&item("1", "Big Launch Today"), None, &filter),
            Decision::Notify
        );
        assert_eq!(
            evaluate(&item("2", "Nothing interesting"), None, &filter),
            Decision::Skip(SkipReason::NoKeywordMatch)
        );
    }

    #[test]
    fn empty_keyword_set_matches_everything() {
        let filter = KeywordFilter::new(Vec::<String>::new());
        assert_eq!(evaluate(&item("1", "anything at all"), None, &filter), Decision::Notify);
    }

    #[test]
    fn blank_terms_are_dropped_at_construction() {
        let filter = KeywordFilter::new(vec!["  ".to_string(), String::new()]);
        assert!(filter.is_empty());
    }

    #[test]
    fn dedup_wins_over_filter() {
        // An already-seen id is skipped even when a keyword would match.
        let filter = KeywordFilter::new(vec!["launch".to_string()]);
        assert_eq!(
            evaluate(&item("7", "Big Launch Today"), Some("7"), &filter),
            Decision::Skip(SkipReason::AlreadySeen)
        );
    }
}
