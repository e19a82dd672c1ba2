//! Break deduction against night and day minutes.
//!
//! Break time is always taken out of night minutes first, then out of day
//! minutes. This order is fixed: it removes time from the bucket that
//! carries the night premium before touching plain daytime.

use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

/// Night and day minutes before and after the break is deducted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakAllocation {
    /// Night minutes in the shift before the break.
    pub night_minutes: i64,
    /// Day minutes in the shift before the break.
    pub day_minutes: i64,
    /// Night minutes left after the break.
    pub adjusted_night_minutes: i64,
    /// Day minutes left after the break.
    pub adjusted_day_minutes: i64,
    /// Break minutes that exceeded the whole shift and were dropped.
    pub unabsorbed_break_minutes: i64,
    /// The audit step recording this deduction.
    pub audit_step: AuditStep,
}

/// Deducts `break_minutes` from night minutes first, then day minutes.
///
/// Neither bucket goes below zero. A break longer than the shift empties
/// both buckets and the excess is reported in `unabsorbed_break_minutes`.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::allocate_break;
///
/// // 22:00-06:00 with a one hour break: 420 night, 60 day.
/// let allocation = allocate_break(420, 60, 60, 1);
/// assert_eq!(allocation.adjusted_night_minutes, 360);
/// assert_eq!(allocation.adjusted_day_minutes, 60);
/// ```
pub fn allocate_break(
    night_minutes: i64,
    day_minutes: i64,
    break_minutes: i64,
    step_number: u32,
) -> BreakAllocation {
    let from_night = break_minutes.clamp(0, night_minutes.max(0));
    let remaining = break_minutes.max(0) - from_night;
    let from_day = remaining.min(day_minutes.max(0));
    let unabsorbed = remaining - from_day;

    let adjusted_night_minutes = (night_minutes - from_night).max(0);
    let adjusted_day_minutes = (day_minutes - from_day).max(0);

    let reasoning = if break_minutes <= 0 {
        "No break to deduct".to_string()
    } else if unabsorbed > 0 {
        format!(
            "Break of {} min exceeds the {} min shift; {} min could not be deducted",
            break_minutes,
            night_minutes + day_minutes,
            unabsorbed
        )
    } else {
        format!(
            "Break of {} min deducted: {} min from night, {} min from day",
            break_minutes, from_night, from_day
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "break_allocation".to_string(),
        rule_name: "Break Deduction (night first)".to_string(),
        input: serde_json::json!({
            "night_minutes": night_minutes,
            "day_minutes": day_minutes,
            "break_minutes": break_minutes
        }),
        output: serde_json::json!({
            "adjusted_night_minutes": adjusted_night_minutes,
            "adjusted_day_minutes": adjusted_day_minutes,
            "deducted_from_night": from_night,
            "deducted_from_day": from_day,
            "unabsorbed_break_minutes": unabsorbed
        }),
        reasoning,
    };

    BreakAllocation {
        night_minutes,
        day_minutes,
        adjusted_night_minutes,
        adjusted_day_minutes,
        unabsorbed_break_minutes: unabsorbed,
        audit_step,
    }
}
