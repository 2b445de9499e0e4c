//! Human-readable elapsed time between two sightings.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// How much of the elapsed time to spell out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DurationStyle {
    /// Only the largest nonzero unit: "1 day".
    #[default]
    Coarsest,
    /// Every nonzero unit: "1 day 1 hour 1 minute 1 second".
    Full,
}

/// Format the time from `earlier` to `later`. Negative spans count as zero.
pub fn format_elapsed(
    earlier: DateTime<Utc>,
    later: DateTime<Utc>,
    style: DurationStyle,
) -> String {
    let seconds = u64::try_from((later - earlier).num_seconds()).unwrap_or(0);
    format_seconds(seconds, style)
}

pub fn format_seconds(total: u64, style: DurationStyle) -> String {
    let parts = [
        (total / DAY, "day"),
        (total % DAY / HOUR, "hour"),
        (total % HOUR / MINUTE, "minute"),
        (total % MINUTE, "second"),
    ];

    let mut nonzero = parts.iter().filter(|(n, _)| *n > 0).map(|&(n, unit)| unit_phrase(n, unit));
    let phrase = match style {
        DurationStyle::Coarsest => nonzero.next(),
        DurationStyle::Full => {
            let joined = nonzero.collect::<Vec<_>>().join(" ");
            (!joined.is_empty()).then_some(joined)
        }
    };
    phrase.unwrap_or_else(|| unit_phrase(0, "second"))
}

fn unit_phrase(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn origin() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 4, 6, 11, 17, 0).unwrap()
    }

    #[test]
    fn coarsest_unit_only() {
        let offsets = [
            (0, "0 seconds"),
            (1, "1 second"),
            (2, "2 seconds"),
            (11, "11 seconds"),
            (60, "1 minute"),
            (61, "1 minute"),
            (121, "2 minutes"),
            (3600, "1 hour"),
            (3601, "1 hour"),
            (3660, "1 hour"),
            (3661, "1 hour"),
            (7200, "2 hours"),
            (86400, "1 day"),
            (86401, "1 day"),
            (86461, "1 day"),
            (90001, "1 day"),
            (90061, "1 day"),
            (172_800, "2 days"),
        ];
        for (secs, expected) in offsets {
            let later = origin() + Duration::seconds(secs);
            assert_eq!(
                format_elapsed(origin(), later, DurationStyle::Coarsest),
                expected,
                "offset {secs}s"
            );
        }
    }

    #[test]
    fn full_lists_every_nonzero_unit() {
        let offsets = [
            (0, "0 seconds"),
            (1, "1 second"),
            (61, "1 minute 1 second"),
            (3600, "1 hour"),
            (3660, "1 hour 1 minute"),
            (90061, "1 day 1 hour 1 minute 1 second"),
            (172_802, "2 days 2 seconds"),
        ];
        for (secs, expected) in offsets {
            let later = origin() + Duration::seconds(secs);
            assert_eq!(format_elapsed(origin(), later, DurationStyle::Full), expected);
        }
    }

    #[test]
    fn negative_elapsed_is_zero() {
        let later = origin() - Duration::seconds(30);
        assert_eq!(format_elapsed(origin(), later, DurationStyle::Coarsest), "0 seconds");
        assert_eq!(format_elapsed(origin(), later, DurationStyle::Full), "0 seconds");
    }

    #[test]
    fn sub_second_rounds_down() {
        let later = origin() + Duration::milliseconds(999);
        assert_eq!(format_elapsed(origin(), later, DurationStyle::Coarsest), "0 seconds");
    }

    #[test]
    fn style_parses_from_lowercase() {
        let style: DurationStyle = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(style, DurationStyle::Full);
        assert_eq!(DurationStyle::default(), DurationStyle::Coarsest);
    }
}
