//! Rendering a repetition into the message a host posts back to the channel.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::duration::{DurationStyle, format_elapsed};
use crate::engine::Sightings;

/// Build the notice for `speaker` reposting a link, or `None` for a first sighting.
pub fn render(
    speaker: &str,
    sightings: &Sightings,
    now: DateTime<Utc>,
    style: DurationStyle,
    max_len: usize,
) -> Option<String> {
    if !sightings.is_repeat() {
        return None;
    }
    let original = sightings.original()?;
    let elapsed = format_elapsed(original.observed_at, now, style);

    let mut text = if original.speaker.eq_ignore_ascii_case(speaker) {
        format!("{speaker} just grued its own link from {elapsed} ago!")
    } else {
        format!("{speaker} just grued {}'s link from {elapsed} ago!", original.speaker)
    };
    let duplicates = sightings.duplicates();
    if duplicates > 0 {
        text.push_str(&format!(" ({duplicates} duplicates)"));
    }
    Some(ellipsize(&text, max_len))
}

/// Cut `text` to `max_len` characters, marking the cut with "...".
pub fn ellipsize(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Lines a host should not feed back in: our own notices and link-shortener bot output.
pub fn is_echo(text: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:\S+ just grued (?:its own|\S+'s) link from |:?\[AKA\])")
            .expect("valid echo regex")
    })
    .is_match(text)
}
