//! Overtime detection and the day/night split of overtime minutes.
//!
//! Overtime is the tail of the worked timeline: every worked minute after
//! the threshold (480 by default). Which of those minutes are night minutes
//! depends on where they fall in the shift, not on the overall proportion
//! of night to day.

use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

use super::break_allocation::BreakAllocation;
use super::segmentation::Segment;

/// The four minute buckets a shift's worked time is divided into.
///
/// The buckets are non-negative and always sum to the worked minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MinuteBuckets {
    /// Day minutes inside the threshold.
    pub pure_day_minutes: i64,
    /// Night minutes inside the threshold.
    pub night_regular_minutes: i64,
    /// Day minutes beyond the threshold.
    pub day_overtime_minutes: i64,
    /// Night minutes beyond the threshold.
    pub night_overtime_minutes: i64,
}

impl MinuteBuckets {
    /// Sum of all four buckets.
    pub fn total(&self) -> i64 {
        self.pure_day_minutes
            + self.night_regular_minutes
            + self.day_overtime_minutes
            + self.night_overtime_minutes
    }
}

/// The outcome of splitting worked minutes into regular and overtime time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimePartition {
    /// Worked minutes (gross minus break).
    pub worked_minutes: i64,
    /// Worked minutes beyond the threshold.
    pub overtime_minutes: i64,
    /// Night minutes inside the overtime window before break rescaling.
    pub raw_night_overtime_minutes: i64,
    /// The resulting minute buckets.
    pub buckets: MinuteBuckets,
    /// The audit step recording this partition.
    pub audit_step: AuditStep,
}

/// Splits worked minutes into regular/overtime and day/night buckets.
///
/// The overtime window is `[threshold, worked_minutes)` measured along the
/// cumulative minutes of `segments` (the pre-break segmentation). Night
/// segments intersecting that window contribute night-overtime minutes,
/// which are then scaled by `adjusted_night / night` to account for the
/// break and rounded half up. The result is then kept within what the break
/// left of each kind: night-overtime never exceeds the post-break night
/// minutes, and day-overtime never exceeds the post-break day minutes. For
/// shifts of up to 24 hours the rescaled value already satisfies both.
///
/// When there is no overtime, or the shift has no night minutes, the
/// intersection walk and rescale are skipped and night-overtime is zero.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::{allocate_break, partition_overtime, segment_shift};
/// use shift_pay_engine::config::PayRules;
/// use chrono::NaiveDateTime;
///
/// let start = NaiveDateTime::parse_from_str("2026-01-15 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-01-16 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let segments = segment_shift(start, end, &PayRules::default());
/// let allocation = allocate_break(420, 540, 60, 1);
///
/// let partition = partition_overtime(900, &segments, &allocation, 480, 2);
/// assert_eq!(partition.overtime_minutes, 420);
/// assert_eq!(partition.raw_night_overtime_minutes, 240);
/// assert_eq!(partition.buckets.night_overtime_minutes, 206);
/// assert_eq!(partition.buckets.total(), 900);
/// ```
pub fn partition_overtime(
    worked_minutes: i64,
    segments: &[Segment],
    allocation: &BreakAllocation,
    threshold_minutes: i64,
    step_number: u32,
) -> OvertimePartition {
    let overtime_minutes = (worked_minutes - threshold_minutes).max(0);

    let raw_night_overtime_minutes = if overtime_minutes == 0 {
        0
    } else {
        night_minutes_in_window(segments, threshold_minutes, worked_minutes)
    };

    let rescaled = if overtime_minutes == 0 || allocation.night_minutes == 0 {
        0
    } else {
        rescale_half_up(
            raw_night_overtime_minutes,
            allocation.adjusted_night_minutes,
            allocation.night_minutes,
        )
    };

    // Overtime cannot take more day or night minutes than the break left.
    let night_overtime_minutes = rescaled
        .max(overtime_minutes - allocation.adjusted_day_minutes)
        .min(overtime_minutes.min(allocation.adjusted_night_minutes))
        .max(0);
    let day_overtime_minutes = overtime_minutes - night_overtime_minutes;

    let buckets = MinuteBuckets {
        pure_day_minutes: allocation.adjusted_day_minutes - day_overtime_minutes,
        night_regular_minutes: allocation.adjusted_night_minutes - night_overtime_minutes,
        day_overtime_minutes,
        night_overtime_minutes,
    };

    let reasoning = if overtime_minutes == 0 {
        format!(
            "{} worked minutes do not exceed the {} minute threshold",
            worked_minutes, threshold_minutes
        )
    } else {
        format!(
            "{} overtime minutes (worked {} - threshold {}): \
             {} night ({} before break rescale), {} day",
            overtime_minutes,
            worked_minutes,
            threshold_minutes,
            night_overtime_minutes,
            raw_night_overtime_minutes,
            day_overtime_minutes
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_partition".to_string(),
        rule_name: "Overtime Partition".to_string(),
        input: serde_json::json!({
            "worked_minutes": worked_minutes,
            "threshold_minutes": threshold_minutes,
            "night_minutes": allocation.night_minutes,
            "adjusted_night_minutes": allocation.adjusted_night_minutes,
            "adjusted_day_minutes": allocation.adjusted_day_minutes
        }),
        output: serde_json::json!({
            "overtime_minutes": overtime_minutes,
            "raw_night_overtime_minutes": raw_night_overtime_minutes,
            "pure_day_minutes": buckets.pure_day_minutes,
            "night_regular_minutes": buckets.night_regular_minutes,
            "day_overtime_minutes": buckets.day_overtime_minutes,
            "night_overtime_minutes": buckets.night_overtime_minutes
        }),
        reasoning,
    };

    OvertimePartition {
        worked_minutes,
        overtime_minutes,
        raw_night_overtime_minutes,
        buckets,
        audit_step,
    }
}

/// Night minutes whose cumulative position lies in `[window_start, window_end)`.
fn night_minutes_in_window(segments: &[Segment], window_start: i64, window_end: i64) -> i64 {
    let mut cumulative = 0;
    let mut night = 0;

    for segment in segments {
        let segment_start = cumulative;
        let segment_end = cumulative + segment.minutes();

        if segment.is_night {
            let overlap = segment_end.min(window_end) - segment_start.max(window_start);
            if overlap > 0 {
                night += overlap;
            }
        }

        cumulative = segment_end;
    }

    night
}

/// `value * numerator / denominator`, rounded half up. All inputs are non-negative.
fn rescale_half_up(value: i64, numerator: i64, denominator: i64) -> i64 {
    (2 * value * numerator + denominator) / (2 * denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::break_allocation::allocate_break;
    use crate::calculation::segmentation::{night_and_day_minutes, segment_shift};
    use crate::config::PayRules;
    use chrono::{Duration, NaiveDateTime};

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn partition_for(
        start: NaiveDateTime,
        end: NaiveDateTime,
        break_minutes: i64,
    ) -> OvertimePartition {
        let segments = segment_shift(start, end, &PayRules::default());
        let (night, day) = night_and_day_minutes(&segments);
        let allocation = allocate_break(night, day, break_minutes, 1);
        let worked = (night + day - break_minutes).max(0);
        partition_overtime(worked, &segments, &allocation, 480, 2)
    }

    #[test]
    fn test_no_overtime_keeps_all_night_regular() {
        let partition = partition_for(
            make_datetime("2026-01-15", "22:00:00"),
            make_datetime("2026-01-16", "06:00:00"),
            60,
        );

        assert_eq!(partition.overtime_minutes, 0);
        assert_eq!(partition.raw_night_overtime_minutes, 0);
        assert_eq!(
            partition.buckets,
            MinuteBuckets {
                pure_day_minutes: 60,
                night_regular_minutes: 360,
                day_overtime_minutes: 0,
                night_overtime_minutes: 0,
            }
        );
    }

    #[test]
    fn test_day_overtime_without_night() {
        let partition = partition_for(
            make_datetime("2026-01-15", "09:00:00"),
            make_datetime("2026-01-15", "20:00:00"),
            60,
        );

        assert_eq!(partition.overtime_minutes, 120);
        assert_eq!(
            partition.buckets,
            MinuteBuckets {
                pure_day_minutes: 480,
                night_regular_minutes: 0,
                day_overtime_minutes: 120,
                night_overtime_minutes: 0,
            }
        );
    }

    #[test]
    fn test_overnight_overtime_rescaled_by_break() {
        let partition = partition_for(
            make_datetime("2026-01-15", "17:00:00"),
            make_datetime("2026-01-16", "09:00:00"),
            60,
        );

        // Window [480, 900) meets the night segment [300, 720) for 240 minutes;
        // 240 * 360 / 420 = 205.7 rounds to 206.
        assert_eq!(partition.overtime_minutes, 420);
        assert_eq!(partition.raw_night_overtime_minutes, 240);
        assert_eq!(
            partition.buckets,
            MinuteBuckets {
                pure_day_minutes: 326,
                night_regular_minutes: 154,
                day_overtime_minutes: 214,
                night_overtime_minutes: 206,
            }
        );
        assert_eq!(partition.buckets.total(), 900);
    }

    #[test]
    fn test_overtime_entirely_in_night() {
        // 14:00-01:00, no break: night [480, 660) is exactly the overtime window.
        let partition = partition_for(
            make_datetime("2026-01-15", "14:00:00"),
            make_datetime("2026-01-16", "01:00:00"),
            0,
        );

        assert_eq!(partition.overtime_minutes, 180);
        assert_eq!(partition.buckets.night_overtime_minutes, 180);
        assert_eq!(partition.buckets.day_overtime_minutes, 0);
        assert_eq!(partition.buckets.night_regular_minutes, 0);
        assert_eq!(partition.buckets.pure_day_minutes, 480);
    }

    #[test]
    fn test_night_before_threshold_is_regular() {
        // 22:00-09:00, no break: night is the first 420 minutes, overtime is day.
        let partition = partition_for(
            make_datetime("2026-01-15", "22:00:00"),
            make_datetime("2026-01-16", "09:00:00"),
            0,
        );

        assert_eq!(partition.overtime_minutes, 180);
        assert_eq!(partition.buckets.night_overtime_minutes, 0);
        assert_eq!(partition.buckets.night_regular_minutes, 420);
        assert_eq!(partition.buckets.day_overtime_minutes, 180);
        assert_eq!(partition.buckets.pure_day_minutes, 60);
    }

    #[test]
    fn test_oversized_break_empties_everything() {
        let partition = partition_for(
            make_datetime("2026-01-15", "09:00:00"),
            make_datetime("2026-01-15", "10:00:00"),
            600,
        );

        assert_eq!(partition.worked_minutes, 0);
        assert_eq!(partition.buckets, MinuteBuckets::default());
    }

    #[test]
    fn test_multi_day_shift_keeps_buckets_within_worked_minutes() {
        // 19:30 plus 3391 minutes crosses three night windows. The rescaled
        // night-overtime (358) would leave 2193 day-overtime minutes against
        // only 2190 post-break day minutes.
        let start = make_datetime("2026-01-15", "19:30:00");
        let partition = partition_for(start, start + Duration::minutes(3391), 360);

        assert_eq!(partition.worked_minutes, 3031);
        assert_eq!(partition.overtime_minutes, 2551);
        assert_eq!(partition.raw_night_overtime_minutes, 511);
        assert_eq!(
            partition.buckets,
            MinuteBuckets {
                pure_day_minutes: 0,
                night_regular_minutes: 480,
                day_overtime_minutes: 2190,
                night_overtime_minutes: 361,
            }
        );
        assert_eq!(partition.buckets.total(), partition.worked_minutes);
    }

    #[test]
    fn test_rescale_rounds_half_up() {
        assert_eq!(rescale_half_up(240, 360, 420), 206);
        assert_eq!(rescale_half_up(1, 1, 2), 1);
        assert_eq!(rescale_half_up(10, 0, 420), 0);
        assert_eq!(rescale_half_up(10, 420, 420), 10);
    }

    #[test]
    fn test_audit_step_records_buckets() {
        let partition = partition_for(
            make_datetime("2026-01-15", "17:00:00"),
            make_datetime("2026-01-16", "09:00:00"),
            60,
        );

        assert_eq!(partition.audit_step.rule_id, "overtime_partition");
        assert_eq!(partition.audit_step.output["night_overtime_minutes"], 206);
        assert!(partition.audit_step.reasoning.contains("420 overtime minutes"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// With a break no longer than the shift, the four buckets sum to
            /// the worked minutes, including shifts spanning several nights.
            #[test]
            fn buckets_sum_to_worked_minutes(
                start_offset in 0i64..(24 * 60),
                length in 1i64..=(72 * 60),
                break_fraction in 0.0f64..=1.0,
            ) {
                let start =
                    make_datetime("2026-01-15", "00:00:00") + Duration::minutes(start_offset);
                let end = start + Duration::minutes(length);
                let break_minutes = (length as f64 * break_fraction).floor() as i64;

                let partition = partition_for(start, end, break_minutes);

                prop_assert_eq!(partition.worked_minutes, length - break_minutes);
                prop_assert_eq!(partition.buckets.total(), partition.worked_minutes);
                prop_assert!(partition.buckets.pure_day_minutes >= 0);
                prop_assert!(partition.buckets.night_regular_minutes >= 0);
                prop_assert!(partition.buckets.day_overtime_minutes >= 0);
                prop_assert!(partition.buckets.night_overtime_minutes >= 0);
                let buckets = partition.buckets;
                prop_assert_eq!(
                    buckets.day_overtime_minutes + buckets.night_overtime_minutes,
                    partition.overtime_minutes
                );
            }

            /// Rescaling never yields more night-overtime than was found in the window.
            #[test]
            fn rescaled_night_overtime_bounded_by_raw(
                start_offset in 0i64..(24 * 60),
                length in 1i64..=(24 * 60),
                break_minutes in 0i64..=240,
            ) {
                let start =
                    make_datetime("2026-01-15", "00:00:00") + Duration::minutes(start_offset);
                let end = start + Duration::minutes(length);

                let partition = partition_for(start, end, break_minutes);

                prop_assert!(
                    partition.buckets.night_overtime_minutes <= partition.raw_night_overtime_minutes
                );
            }
        }
    }
}
