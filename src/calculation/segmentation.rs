//! Day/night segmentation of a shift.
//!
//! This module splits a shift into contiguous spans that never cross the
//! night window boundaries (22:00 and 05:00 by default), so each span is
//! either entirely night or entirely day.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::config::PayRules;

/// A span of a shift lying entirely inside or outside the night window.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::Segment;
/// use chrono::NaiveDateTime;
///
/// let segment = Segment {
///     start: NaiveDateTime::parse_from_str("2026-01-15 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: NaiveDateTime::parse_from_str("2026-01-16 05:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     is_night: true,
/// };
/// assert_eq!(segment.minutes(), 420);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Inclusive start of the span.
    pub start: NaiveDateTime,
    /// Exclusive end of the span.
    pub end: NaiveDateTime,
    /// Whether the span lies in the night window.
    pub is_night: bool,
}

impl Segment {
    /// Length of the span in whole minutes.
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Splits `[start, end)` at every night window boundary.
///
/// Walks forward from `start`, emitting a segment up to the next boundary
/// (or `end`, whichever comes first):
/// - night, at or after the opening hour: 05:00 on the following day
/// - night, before the closing hour: 05:00 on the same day
/// - day: 22:00 on the same day
///
/// Zero-length segments are never produced, and an empty or inverted
/// interval yields no segments.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::segment_shift;
/// use shift_pay_engine::config::PayRules;
/// use chrono::NaiveDateTime;
///
/// let start = NaiveDateTime::parse_from_str("2026-01-15 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-01-16 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let segments = segment_shift(start, end, &PayRules::default());
/// let shape: Vec<(i64, bool)> = segments.iter().map(|s| (s.minutes(), s.is_night)).collect();
/// assert_eq!(shape, vec![(300, false), (420, true), (240, false)]);
/// ```
pub fn segment_shift(start: NaiveDateTime, end: NaiveDateTime, rules: &PayRules) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = start;

    while current < end {
        let hour = current.hour();
        let is_night = rules.is_night_hour(hour);
        let segment_end = next_boundary(current, is_night, rules).min(end);

        if segment_end > current {
            segments.push(Segment {
                start: current,
                end: segment_end,
                is_night,
            });
        }

        current = segment_end;
    }

    segments
}

/// Sums segment minutes into `(night_minutes, day_minutes)`.
pub fn night_and_day_minutes(segments: &[Segment]) -> (i64, i64) {
    segments.iter().fold((0, 0), |(night, day), segment| {
        if segment.is_night {
            (night + segment.minutes(), day)
        } else {
            (night, day + segment.minutes())
        }
    })
}

fn next_boundary(current: NaiveDateTime, is_night: bool, rules: &PayRules) -> NaiveDateTime {
    let midnight = current.date().and_time(NaiveTime::MIN);
    let night_end = Duration::hours(i64::from(rules.night_end_hour));
    let night_start = Duration::hours(i64::from(rules.night_start_hour));

    if is_night {
        if current.hour() >= rules.night_start_hour {
            midnight + Duration::days(1) + night_end
        } else {
            midnight + night_end
        }
    } else {
        midnight + night_start
    }
}
