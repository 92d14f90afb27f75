//! Search over the portal's static section index.

use serde::Serialize;
use serde_json::json;

use crate::logging::{log, obj, v_str, Domain, Level};

pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Feature,
    Timeline,
    Documentation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    pub title: &'static str,
    pub kind: EntryKind,
    /// Section anchor the result scrolls to.
    pub anchor: &'static str,
}

const fn entry(title: &'static str, kind: EntryKind, anchor: &'static str) -> SearchEntry {
    SearchEntry { title, kind, anchor }
}

pub static CATALOG: [SearchEntry; 7] = [
    entry("Core Combat Engine", EntryKind::Feature, "#features"),
    entry("Anti-Detection System", EntryKind::Feature, "#features"),
    entry("Task Management", EntryKind::Feature, "#features"),
    entry("Phase 1 Complete", EntryKind::Timeline, "#timeline"),
    entry("Architecture Overview", EntryKind::Documentation, "#docs"),
    entry("API Reference", EntryKind::Documentation, "#docs"),
    entry("Configuration", EntryKind::Documentation, "#docs"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query too short; the result panel stays closed.
    Hidden,
    NoResults,
    Matches(Vec<&'static SearchEntry>),
}

pub fn search(query: &str) -> SearchOutcome {
    search_in(&CATALOG, query)
}

/// Case-insensitive substring match, in catalog order.
pub fn search_in(catalog: &'static [SearchEntry], query: &str) -> SearchOutcome {
    if query.chars().count() < MIN_QUERY_CHARS {
        return SearchOutcome::Hidden;
    }
    let needle = query.to_lowercase();
    let hits: Vec<&'static SearchEntry> = catalog
        .iter()
        .filter(|e| e.title.to_lowercase().contains(&needle))
        .collect();
    log(
        Level::Debug,
        Domain::Portal,
        "search",
        obj(&[("query", v_str(query)), ("hits", json!(hits.len()))]),
    );
    if hits.is_empty() {
        SearchOutcome::NoResults
    } else {
        SearchOutcome::Matches(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(outcome: SearchOutcome) -> Vec<&'static str> {
        match outcome {
            SearchOutcome::Matches(hits) => hits.iter().map(|e| e.title).collect(),
            other => panic!("expected matches, got {:?}", other),
        }
    }

    #[test]
    fn test_short_query_hides_results() {
        assert_eq!(search(""), SearchOutcome::Hidden);
        assert_eq!(search("a"), SearchOutcome::Hidden);
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(titles(search("COMBAT")), vec!["Core Combat Engine"]);
        assert_eq!(
            titles(search("ti")),
            vec!["Anti-Detection System", "Configuration"]
        );
    }

    #[test]
    fn test_no_results() {
        assert_eq!(search("zz"), SearchOutcome::NoResults);
    }

    #[test]
    fn test_anchor_for_docs() {
        match search("api") {
            SearchOutcome::Matches(hits) => {
                assert_eq!(hits.len(), 1);
                assert_eq!(hits[0].anchor, "#docs");
                assert_eq!(hits[0].kind, EntryKind::Documentation);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
