//! Checkpoint record making runs restart-safe.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scraping progress persisted to `progress.json`.
///
/// `completed_orgs` is the source of truth for "is this organization done"
/// during a run. Sets are ordered so the serialized file is stable across
/// saves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    /// Total organizations reported by the directory API
    pub total_orgs: usize,

    /// Completed organizations, kept equal to `completed_orgs.len()`
    pub scraped_orgs: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    /// List pages fetched in full; bookkeeping only, never used to skip
    pub completed_pages: BTreeSet<usize>,

    /// Normalized ids of organizations already persisted
    pub completed_orgs: BTreeSet<String>,
}

impl Progress {
    /// Mark an organization completed. Returns true when newly inserted.
    ///
    /// Re-marking an id is a no-op: the counter and timestamp move only on
    /// first insertion.
    pub fn mark_completed(&mut self, key: impl Into<String>) -> bool {
        let inserted = self.completed_orgs.insert(key.into());
        if inserted {
            self.scraped_orgs += 1;
            self.last_updated = Some(Utc::now());
        }
        inserted
    }

    pub fn is_completed(&self, key: &str) -> bool {
        self.completed_orgs.contains(key)
    }

    /// Record list pages that were fetched in full.
    pub fn record_pages(&mut self, pages: impl IntoIterator<Item = usize>) {
        self.completed_pages.extend(pages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marking_is_idempotent() {
        let mut progress = Progress::default();
        assert!(progress.mark_completed("42"));
        assert!(!progress.mark_completed("42"));
        assert_eq!(progress.scraped_orgs, 1);
        assert_eq!(progress.completed_orgs.len(), 1);
        assert!(progress.is_completed("42"));
        assert!(!progress.is_completed("43"));
    }

    #[test]
    fn counter_tracks_set_cardinality() {
        let mut progress = Progress::default();
        for key in ["a", "b", "a", "c", "b"] {
            progress.mark_completed(key);
        }
        assert_eq!(progress.scraped_orgs, progress.completed_orgs.len());
        assert_eq!(progress.scraped_orgs, 3);
    }

    #[test]
    fn first_mark_sets_timestamp() {
        let mut progress = Progress::default();
        assert!(progress.last_updated.is_none());
        progress.mark_completed("x");
        assert!(progress.last_updated.is_some());
    }

    #[test]
    fn wire_names_are_camel_case() {
        let mut progress = Progress {
            total_orgs: 10,
            ..Progress::default()
        };
        progress.mark_completed("42");
        progress.record_pages([0, 1]);

        let json = serde_json::to_string(&progress).unwrap();
        assert!(json.contains(r#""totalOrgs":10"#));
        assert!(json.contains(r#""scrapedOrgs":1"#));
        assert!(json.contains(r#""lastUpdated""#));
        assert!(json.contains(r#""completedPages":[0,1]"#));
        assert!(json.contains(r#""completedOrgs":["42"]"#));
    }

    #[test]
    fn loads_checkpoints_with_unknown_keys() {
        // Older checkpoint files carry a vestigial lastSkip field.
        let json = r#"{
            "totalOrgs": 1217,
            "scrapedOrgs": 2,
            "lastSkip": 0,
            "lastUpdated": "2025-09-01T12:00:00Z",
            "completedPages": [0],
            "completedOrgs": ["1", "2"]
        }"#;
        let progress: Progress = serde_json::from_str(json).unwrap();
        assert_eq!(progress.total_orgs, 1217);
        assert!(progress.is_completed("2"));
        assert_eq!(progress.completed_pages, BTreeSet::from([0]));
    }

    #[test]
    fn record_pages_deduplicates() {
        let mut progress = Progress::default();
        progress.record_pages(0..3);
        progress.record_pages(1..4);
        assert_eq!(progress.completed_pages, BTreeSet::from([0, 1, 2, 3]));
    }
}
