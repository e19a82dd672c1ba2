//! Daily wage and related estimates for scheduled shifts.
//!
//! These helpers price a job's scheduled shift (clock times on a work date)
//! including its flat transportation fee, and derive the simple estimates
//! shown alongside job listings.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::PayRules;
use crate::error::EngineResult;
use crate::models::{ClockTime, PayBreakdown, ScheduledShift};

use super::salary::try_calculate_salary_with_rules;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Pay for a scheduled shift plus its transportation fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWage {
    /// The shift's pay breakdown.
    pub pay: PayBreakdown,
    /// Flat transportation fee for the shift.
    pub transportation_fee: i64,
    /// `pay.total_pay + transportation_fee`.
    pub total: i64,
}

/// Prices a scheduled shift, premiums included, and adds its transportation fee.
///
/// Fails with `InvalidShiftInput` when the break is longer than the shift or
/// the shift is longer than one day.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::calculate_daily_wage;
/// use shift_pay_engine::config::PayRules;
/// use shift_pay_engine::models::ScheduledShift;
/// use chrono::NaiveDate;
///
/// let scheduled = ScheduledShift {
///     work_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     start: "22:00".parse().unwrap(),
///     end: "翌06:00".parse().unwrap(),
///     break_minutes: 60,
///     hourly_rate: 1000,
///     transportation_fee: 500,
/// };
///
/// let wage = calculate_daily_wage(&scheduled, &PayRules::default()).unwrap();
/// assert_eq!(wage.pay.total_pay, 8500);
/// assert_eq!(wage.total, 9000);
/// ```
pub fn calculate_daily_wage(
    scheduled: &ScheduledShift,
    rules: &PayRules,
) -> EngineResult<DailyWage> {
    let pay = try_calculate_salary_with_rules(&scheduled.to_shift_input(), rules)?;
    let total = pay.total_pay + scheduled.transportation_fee;

    Ok(DailyWage {
        pay,
        transportation_fee: scheduled.transportation_fee,
        total,
    })
}

/// Worked hours between two clock times, less the break.
///
/// An end before the start (without the next-day prefix) is read as the
/// following day.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::working_hours;
/// use shift_pay_engine::models::ClockTime;
/// use rust_decimal::Decimal;
///
/// let start: ClockTime = "22:00".parse().unwrap();
/// let end: ClockTime = "06:30".parse().unwrap();
/// assert_eq!(working_hours(&start, &end, 60), Decimal::new(75, 1));
/// ```
pub fn working_hours(start: &ClockTime, end: &ClockTime, break_minutes: u32) -> Decimal {
    let mut total = end.minutes_from_work_date() - start.minutes_from_work_date();
    if total < 0 {
        total += MINUTES_PER_DAY;
    }
    total -= i64::from(break_minutes);

    Decimal::from(total) / Decimal::from(60)
}

/// The lowest transportation fee a shift of this length may carry.
///
/// `per_hour` yen per worked hour, rounded up to the next multiple of
/// `step` yen. Non-positive durations owe nothing.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::min_transportation_fee;
/// use shift_pay_engine::config::PayRules;
///
/// let rules = PayRules::default();
/// assert_eq!(min_transportation_fee(480, &rules), 800);
/// assert_eq!(min_transportation_fee(490, &rules), 825);
/// ```
pub fn min_transportation_fee(worked_minutes: i64, rules: &PayRules) -> i64 {
    if worked_minutes <= 0 {
        return 0;
    }

    let transportation = &rules.transportation;
    let unit = 60 * transportation.step;
    let owed = worked_minutes * transportation.per_hour;
    (owed + unit - 1) / unit * transportation.step
}

/// A selectable transportation fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportationFeeOption {
    /// Fee in yen; zero means no fee.
    pub value: i64,
    /// Display label.
    pub label: String,
}

/// Keeps the "no fee" option and every option at or above the minimum fee.
pub fn filter_transportation_fee_options(
    worked_minutes: i64,
    options: &[TransportationFeeOption],
    rules: &PayRules,
) -> Vec<TransportationFeeOption> {
    let minimum = min_transportation_fee(worked_minutes, rules);
    options
        .iter()
        .filter(|option| option.value == 0 || option.value >= minimum)
        .cloned()
        .collect()
}

/// Rough monthly pay from an hourly rate, rounded up to whole yen.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::estimate_monthly_salary;
/// use rust_decimal::Decimal;
///
/// assert_eq!(estimate_monthly_salary(1050, Decimal::new(75, 1), 20), 157500);
/// ```
pub fn estimate_monthly_salary(
    hourly_rate: u32,
    hours_per_day: Decimal,
    days_per_month: u32,
) -> i64 {
    (Decimal::from(hourly_rate) * hours_per_day * Decimal::from(days_per_month))
        .ceil()
        .to_i64()
        .unwrap_or(i64::MAX)
}
