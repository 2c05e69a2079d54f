//! Downtime duration rendering.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Text used when the provider did not report a usable duration.
pub const UNKNOWN_DURATION: &str = "unknown";

const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_MINUTE: u64 = 60;

/// Exclusive upper bound for durations that split without saturating.
#[allow(clippy::cast_precision_loss)]
const MAX_SECS: f64 = u64::MAX as f64;

/// How a downtime duration is laid out in the recovery text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationStyle {
    /// `1d 1h 1m 1s`, seconds rounded to the nearest second
    #[default]
    Spaced,
    /// `1d:1h:1m:1s`, seconds truncated
    Colon,
}

impl FromStr for DurationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spaced" => Ok(Self::Spaced),
            "colon" => Ok(Self::Colon),
            other => Err(format!("unknown duration style `{other}`")),
        }
    }
}

/// Format a downtime in seconds as days, hours, minutes and seconds.
///
/// Days, hours and minutes come from floor division. The leftover seconds are
/// rounded for [`DurationStyle::Spaced`] and truncated for
/// [`DurationStyle::Colon`]. Absent, negative, non-finite or out-of-range
/// input renders as [`UNKNOWN_DURATION`].
#[must_use]
pub fn format_duration(secs: Option<f64>, style: DurationStyle) -> String {
    let Some(secs) = secs.filter(|s| (0.0..MAX_SECS).contains(s)) else {
        return UNKNOWN_DURATION.to_string();
    };

    let (days, hours, minutes, remainder) = split(secs);

    match style {
        DurationStyle::Spaced => {
            let seconds = whole_seconds(remainder.round());
            format!("{days}d {hours}h {minutes}m {seconds}s")
        }
        DurationStyle::Colon => {
            let seconds = whole_seconds(remainder.floor());
            format!("{days}d:{hours}h:{minutes}m:{seconds}s")
        }
    }
}

/// Split a non-negative duration into whole days, hours, minutes and the
/// fractional seconds left over.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn split(secs: f64) -> (u64, u64, u64, f64) {
    let whole = secs.trunc() as u64;
    let fraction = secs - secs.trunc();

    let days = whole / SECS_PER_DAY;
    let hours = whole % SECS_PER_DAY / SECS_PER_HOUR;
    let minutes = whole % SECS_PER_HOUR / SECS_PER_MINUTE;
    let remainder = (whole % SECS_PER_MINUTE) as f64 + fraction;

    (days, hours, minutes, remainder)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(secs: f64) -> u64 {
    secs as u64
}
