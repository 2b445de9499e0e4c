//! Fixed-capacity, insertion-ordered link history for a single channel.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of links remembered per channel.
pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(100_000).expect("nonzero");

/// A link as it was seen: who posted it, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub url: String,
    pub speaker: String,
    pub observed_at: DateTime<Utc>,
}

impl UrlRecord {
    pub fn new(
        url: impl Into<String>,
        speaker: impl Into<String>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            url: url.into(),
            speaker: speaker.into(),
            observed_at,
        }
    }

    /// ASCII case-insensitive comparison of the full URL string.
    pub fn matches_url(&self, url: &str) -> bool {
        self.url.eq_ignore_ascii_case(url)
    }
}

/// Ring of the most recent records, oldest first.
///
/// Pushing past capacity evicts from the front; the newly pushed record is
/// always retained.
#[derive(Debug, Clone)]
pub struct BoundedHistory {
    entries: VecDeque<UrlRecord>,
    capacity: NonZeroUsize,
}

impl BoundedHistory {
    pub const fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Build a history from records in chronological order, keeping the
    /// newest `capacity` of them.
    pub fn from_records(
        capacity: NonZeroUsize,
        records: impl IntoIterator<Item = UrlRecord>,
    ) -> Self {
        let mut history = Self::new(capacity);
        for record in records {
            history.push(record);
        }
        history
    }

    pub fn push(&mut self, record: UrlRecord) {
        while self.entries.len() >= self.capacity.get() {
            self.entries.pop_front();
        }
        self.entries.push_back(record);
    }

    /// Every record whose URL equals `url` ignoring ASCII case, oldest first.
    pub fn select_matching(&self, url: &str) -> Vec<UrlRecord> {
        self.entries
            .iter()
            .filter(|record| record.matches_url(url))
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UrlRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn cap(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn record(n: usize) -> UrlRecord {
        let at = Utc.with_ymd_and_hms(2017, 4, 6, 11, 17, 0).unwrap() + chrono::Duration::seconds(n as i64);
        UrlRecord::new(format!("http://example.com/{n}"), format!("nick{n}"), at)
    }

    #[test]
    fn push_below_capacity_keeps_everything() {
        let mut history = BoundedHistory::new(cap(5));
        for n in 0..3 {
            history.push(record(n));
        }
        assert_eq!(history.len(), 3);
        let urls: Vec<_> = history.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            ["http://example.com/0", "http://example.com/1", "http://example.com/2"]
        );
    }

    #[test]
    fn overflow_evicts_oldest_and_keeps_order() {
        for capacity in [1, 2, 3, 7] {
            let mut history = BoundedHistory::new(cap(capacity));
            let total = capacity * 3 + 1;
            for n in 0..total {
                history.push(record(n));
                assert_eq!(history.len(), (n + 1).min(capacity));
            }
            let kept: Vec<_> = history.iter().cloned().collect();
            let expected: Vec<_> = (total - capacity..total).map(record).collect();
            assert_eq!(kept, expected, "capacity {capacity}");
        }
    }

    #[test]
    fn capacity_one_keeps_only_newest() {
        let mut history = BoundedHistory::new(cap(1));
        history.push(record(1));
        history.push(record(2));
        assert_eq!(history.len(), 1);
        assert_eq!(history.iter().next(), Some(&record(2)));
    }

    #[test]
    fn select_matching_ignores_case_and_preserves_order() {
        let at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let mut history = BoundedHistory::new(cap(10));
        history.push(UrlRecord::new("http://foo.com/x", "a", at));
        history.push(UrlRecord::new("http://bar.com", "b", at));
        history.push(UrlRecord::new("HTTP://Foo.com/X", "c", at));
        history.push(UrlRecord::new("http://foo.com/x/", "d", at));

        let found = history.select_matching("http://FOO.com/x");
        let speakers: Vec<_> = found.iter().map(|r| r.speaker.as_str()).collect();
        assert_eq!(speakers, ["a", "c"]);
    }

    #[test]
    fn select_matching_empty_when_absent() {
        let mut history = BoundedHistory::new(cap(3));
        history.push(record(1));
        assert!(history.select_matching("http://nowhere.example").is_empty());
    }

    #[test]
    fn from_records_truncates_to_newest() {
        let history = BoundedHistory::from_records(cap(2), (0..5).map(record));
        let kept: Vec<_> = history.iter().cloned().collect();
        assert_eq!(kept, vec![record(3), record(4)]);
        assert_eq!(history.capacity().get(), 2);
    }

    #[test]
    fn default_capacity_is_one_hundred_thousand() {
        assert_eq!(DEFAULT_CAPACITY.get(), 100_000);
    }
}
