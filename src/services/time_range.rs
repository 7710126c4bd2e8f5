//! Time window normalization
//!
//! Turns the different ways a user can name a point in time into
//! milliseconds since epoch:
//! - absolute timestamps: `2024-01-15T08:30:00.000Z`
//! - relative offsets: `-30s`, `-15m`, `-2h`, `-7d`, or `now`
//! - epoch milliseconds given as numbers

use chrono::{NaiveDateTime, Utc};

use crate::types::TimeRange;

/// Format accepted for absolute timestamps
const ABSOLUTE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Current wall-clock time in milliseconds since epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// One end of a time window as supplied by a caller
#[derive(Debug, Clone, PartialEq)]
pub enum TimeBound {
    /// `yyyy-MM-ddTHH:mm:ss.SSSZ`
    Absolute(String),
    /// `-<N>s|m|h|d` or `now`
    Relative(String),
    /// Milliseconds since epoch, fractional part dropped
    EpochMillis(f64),
}

/// Which end of the window a bound describes.
///
/// An unreadable absolute start means "from the beginning", an unreadable
/// absolute end means "through now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Start,
    End,
}

impl TimeBound {
    fn resolve(&self, side: Side, now_ms: i64) -> Option<i64> {
        match self {
            TimeBound::Absolute(s) => Some(parse_absolute(s).unwrap_or(match side {
                Side::Start => 0,
                Side::End => now_ms,
            })),
            TimeBound::Relative(s) => parse_relative(s, now_ms),
            TimeBound::EpochMillis(ms) => Some(ms.trunc() as i64),
        }
    }
}

/// Normalize a start/end pair into a [`TimeRange`].
///
/// Absent bounds stay unbounded.
pub fn normalize(start: Option<&TimeBound>, end: Option<&TimeBound>, now_ms: i64) -> TimeRange {
    TimeRange::new(
        start.and_then(|b| b.resolve(Side::Start, now_ms)),
        end.and_then(|b| b.resolve(Side::End, now_ms)),
    )
}

/// Parse `yyyy-MM-ddTHH:mm:ss.SSSZ` as UTC milliseconds since epoch
pub fn parse_absolute(s: &str) -> Option<i64> {
    NaiveDateTime::parse_from_str(s.trim(), ABSOLUTE_FORMAT)
        .ok()
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Parse a relative offset (`-2h`, `-30m`, `now`, ...) against `now_ms`.
///
/// Returns `None` for anything unreadable, which callers treat as unbounded.
pub fn parse_relative(s: &str, now_ms: i64) -> Option<i64> {
    let s = s.trim();
    if s == "now" {
        return Some(now_ms);
    }

    let offset = s.strip_prefix('-')?;
    let unit = offset.chars().last()?;
    let amount = &offset[..offset.len() - unit.len_utf8()];
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: i64 = amount.parse().ok()?;

    let scale = match unit {
        's' => MS_PER_SECOND,
        'm' => MS_PER_MINUTE,
        'h' => MS_PER_HOUR,
        'd' => MS_PER_DAY,
        _ => return None,
    };

    amount
        .checked_mul(scale)
        .and_then(|delta| now_ms.checked_sub(delta))
}

/// Parse a `--range` argument: `<start>` or `<start>:<end>`.
///
/// Splits on the first colon; both halves are relative offsets. Without a
/// colon the end stays unbounded.
pub fn parse_time_range(range: Option<&str>, now_ms: i64) -> TimeRange {
    let Some(range) = range else {
        return TimeRange::unbounded();
    };

    let (start, end) = match range.split_once(':') {
        Some((start, end)) => (start, Some(end)),
        None => (range, None),
    };

    normalize(
        Some(&TimeBound::Relative(start.to_string())),
        end.map(|e| TimeBound::Relative(e.to_string())).as_ref(),
        now_ms,
    )
}
