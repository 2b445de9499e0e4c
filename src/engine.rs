//! Per-channel link tracking and repetition detection.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::ops::Deref;

use chrono::{DateTime, Utc};

use crate::extract::first_url;
use crate::history::{BoundedHistory, DEFAULT_CAPACITY, UrlRecord};

/// Channel name (case-sensitive) to that channel's link history.
pub type ChannelStore = BTreeMap<String, BoundedHistory>;

/// All sightings of one link in a channel, oldest first.
///
/// The statement that produced this list is always its last element, so a
/// single entry means the link is new to the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sightings(Vec<UrlRecord>);

impl Sightings {
    /// More than one sighting: the link was posted before.
    pub fn is_repeat(&self) -> bool {
        self.0.len() > 1
    }

    /// The earliest sighting still in history.
    pub fn original(&self) -> Option<&UrlRecord> {
        self.0.first()
    }

    pub fn latest(&self) -> Option<&UrlRecord> {
        self.0.last()
    }

    /// Reposts between the original and the latest one.
    pub fn duplicates(&self) -> usize {
        self.0.len().saturating_sub(2)
    }

    pub fn into_records(self) -> Vec<UrlRecord> {
        self.0
    }
}

impl Deref for Sightings {
    type Target = [UrlRecord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Owns every channel's history and answers "has this link been seen here?".
///
/// Not internally synchronized. A multi-threaded host should hold one lock
/// around `process` and any load or dump of the same engine.
#[derive(Debug, Clone)]
pub struct Engine {
    channels: ChannelStore,
    capacity: NonZeroUsize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Engine {
    /// An empty engine whose channels each remember up to `capacity` links.
    pub const fn new(capacity: NonZeroUsize) -> Self {
        Self {
            channels: BTreeMap::new(),
            capacity,
        }
    }

    /// Handle one statement.
    ///
    /// Returns `None` (and records nothing) when `text` holds no valid link.
    /// Otherwise records the first link and returns every sighting of it in
    /// `channel`, including the one just recorded.
    pub fn process(
        &mut self,
        channel: &str,
        speaker: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Option<Sightings> {
        let url = first_url(text)?;
        let history = self.record(channel, speaker, url, now);
        let sightings = Sightings(history.select_matching(url));
        if sightings.is_repeat() {
            tracing::info!(
                channel,
                speaker,
                url,
                count = sightings.len(),
                "repeated link"
            );
        }
        Some(sightings)
    }

    /// Append a sighting to `channel`, creating its history on first use.
    fn record(
        &mut self,
        channel: &str,
        speaker: &str,
        url: &str,
        at: DateTime<Utc>,
    ) -> &BoundedHistory {
        tracing::debug!(channel, url, "adding url");
        let capacity = self.capacity;
        let history = self
            .channels
            .entry(channel.to_string())
            .or_insert_with(|| BoundedHistory::new(capacity));
        history.push(UrlRecord::new(url, speaker, at));
        history
    }

    pub const fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    pub const fn channels(&self) -> &ChannelStore {
        &self.channels
    }

    pub fn history(&self, channel: &str) -> Option<&BoundedHistory> {
        self.channels.get(channel)
    }

    /// Swap in a whole store, e.g. one read back from disk.
    pub fn replace_channels(&mut self, channels: ChannelStore) {
        self.channels = channels;
    }
}
