//! Conversion of minute buckets into yen.
//!
//! Base pay covers every worked minute at 1.0×; the overtime and night
//! premiums are added on top. Amounts are computed exactly with
//! [`Decimal`] and rounded once, half away from zero.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::PayRules;
use crate::models::{AuditStep, TimeBlock, TimeBlockKind};

use super::break_allocation::BreakAllocation;
use super::overtime_partition::OvertimePartition;

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Pay totals and display blocks for one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayComposition {
    /// All worked minutes at 1.0×.
    pub base_pay: i64,
    /// Overtime premium.
    pub overtime_pay: i64,
    /// Night premium.
    pub night_pay: i64,
    /// `base_pay + overtime_pay + night_pay`.
    pub total_pay: i64,
    /// One block per non-empty bucket.
    pub breakdown: Vec<TimeBlock>,
    /// The audit step recording this composition.
    pub audit_step: AuditStep,
}

/// Rounds `minutes × hourly_rate × multiplier / 60` to whole yen.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::minutes_to_yen;
/// use rust_decimal::Decimal;
///
/// // 206 minutes at ¥1,000/h × 1.5
/// assert_eq!(minutes_to_yen(206, 1000, Decimal::new(15, 1)), 5150);
/// // 10 minutes at ¥1,000/h × 0.25 = 41.67
/// assert_eq!(minutes_to_yen(10, 1000, Decimal::new(25, 2)), 42);
/// ```
pub fn minutes_to_yen(minutes: i64, hourly_rate: u32, multiplier: Decimal) -> i64 {
    let exact = Decimal::from(minutes) * Decimal::from(hourly_rate) * multiplier / MINUTES_PER_HOUR;
    exact
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}

/// Prices the buckets of a partitioned shift.
///
/// - `base_pay` = worked minutes × rate
/// - `overtime_pay` = overtime minutes × rate × overtime premium
/// - `night_pay` = post-break night minutes × rate × night premium
///
/// The breakdown blocks use their own multipliers (1.0, night, overtime,
/// night + overtime) and are rounded individually, so their sum can differ
/// from `total_pay` by a few yen.
pub fn compose_pay(
    shift_start: NaiveDateTime,
    partition: &OvertimePartition,
    allocation: &BreakAllocation,
    hourly_rate: u32,
    rules: &PayRules,
    step_number: u32,
) -> PayComposition {
    let base_pay = minutes_to_yen(partition.worked_minutes, hourly_rate, Decimal::ONE);
    let overtime_pay = minutes_to_yen(
        partition.overtime_minutes,
        hourly_rate,
        rules.overtime_premium,
    );
    let night_pay = minutes_to_yen(
        allocation.adjusted_night_minutes,
        hourly_rate,
        rules.night_premium,
    );
    let total_pay = base_pay + overtime_pay + night_pay;

    let buckets = &partition.buckets;
    let breakdown: Vec<TimeBlock> = [
        (TimeBlockKind::Normal, buckets.pure_day_minutes, Decimal::ONE),
        (
            TimeBlockKind::Night,
            buckets.night_regular_minutes,
            rules.night_multiplier(),
        ),
        (
            TimeBlockKind::Overtime,
            buckets.day_overtime_minutes,
            rules.overtime_multiplier(),
        ),
        (
            TimeBlockKind::NightOvertime,
            buckets.night_overtime_minutes,
            rules.night_overtime_multiplier(),
        ),
    ]
    .into_iter()
    .filter(|(_, minutes, _)| *minutes > 0)
    .map(|(kind, minutes, rate)| TimeBlock {
        start: shift_start,
        end: shift_start + Duration::minutes(minutes),
        minutes,
        hours: Decimal::from(minutes) / MINUTES_PER_HOUR,
        kind,
        rate,
        amount: minutes_to_yen(minutes, hourly_rate, rate),
    })
    .collect();

    let block_summaries: Vec<serde_json::Value> = breakdown
        .iter()
        .map(|b| {
            serde_json::json!({
                "kind": b.kind.to_string(),
                "minutes": b.minutes,
                "rate": b.rate.normalize().to_string(),
                "amount": b.amount
            })
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "pay_composition".to_string(),
        rule_name: "Pay Composition".to_string(),
        input: serde_json::json!({
            "hourly_rate": hourly_rate,
            "worked_minutes": partition.worked_minutes,
            "overtime_minutes": partition.overtime_minutes,
            "night_minutes": allocation.adjusted_night_minutes,
            "overtime_premium": rules.overtime_premium.normalize().to_string(),
            "night_premium": rules.night_premium.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_pay": base_pay,
            "overtime_pay": overtime_pay,
            "night_pay": night_pay,
            "total_pay": total_pay,
            "blocks": block_summaries
        }),
        reasoning: format!(
            "Base ¥{} + overtime ¥{} + night ¥{} = ¥{}",
            base_pay, overtime_pay, night_pay, total_pay
        ),
    };

    PayComposition {
        base_pay,
        overtime_pay,
        night_pay,
        total_pay,
        breakdown,
        audit_step,
    }
}
