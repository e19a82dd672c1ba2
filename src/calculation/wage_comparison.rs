//! Comparison of scheduled and requested pay for attendance modifications.

use serde::{Deserialize, Serialize};

use crate::config::PayRules;
use crate::format::format_difference;
use crate::models::ShiftInput;

use super::salary::calculate_salary_with_rules;

/// Amounts owed before and after a requested attendance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageComparison {
    /// Pay for the original shift plus transportation fee.
    pub original_amount: i64,
    /// Pay for the requested shift plus transportation fee.
    pub requested_amount: i64,
    /// `requested_amount - original_amount`.
    pub difference: i64,
}

impl WageComparison {
    /// The difference formatted with a sign, e.g. `"+¥1,250"`.
    pub fn difference_label(&self) -> String {
        format_difference(self.original_amount, self.requested_amount)
    }
}

/// Prices both versions of a shift and reports the change.
///
/// The same transportation fee is added to both amounts.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::compare_wages;
/// use shift_pay_engine::config::PayRules;
/// use shift_pay_engine::models::ShiftInput;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let scheduled = ShiftInput {
///     start_time: at("2026-01-15 09:00"),
///     end_time: at("2026-01-15 18:00"),
///     break_minutes: 60,
///     hourly_rate: 1000,
/// };
/// let requested = ShiftInput { end_time: at("2026-01-15 20:00"), ..scheduled.clone() };
///
/// let comparison = compare_wages(&scheduled, &requested, 500, &PayRules::default());
/// assert_eq!(comparison.original_amount, 8500);
/// assert_eq!(comparison.requested_amount, 11000);
/// assert_eq!(comparison.difference_label(), "+¥2,500");
/// ```
pub fn compare_wages(
    original: &ShiftInput,
    requested: &ShiftInput,
    transportation_fee: i64,
    rules: &PayRules,
) -> WageComparison {
    let original_amount =
        calculate_salary_with_rules(original, rules).total_pay + transportation_fee;
    let requested_amount =
        calculate_salary_with_rules(requested, rules).total_pay + transportation_fee;

    WageComparison {
        original_amount,
        requested_amount,
        difference: requested_amount - original_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_input(start: &str, end: (&str, &str), break_minutes: u32) -> ShiftInput {
        ShiftInput {
            start_time: make_datetime("2026-01-15", start),
            end_time: make_datetime(end.0, end.1),
            break_minutes,
            hourly_rate: 1000,
        }
    }

    #[test]
    fn test_shorter_request_reduces_pay() {
        let original = make_input("09:00:00", ("2026-01-15", "20:00:00"), 60);
        let requested = make_input("09:00:00", ("2026-01-15", "18:00:00"), 60);

        let comparison = compare_wages(&original, &requested, 0, &PayRules::default());

        assert_eq!(comparison.original_amount, 10500);
        assert_eq!(comparison.requested_amount, 8000);
        assert_eq!(comparison.difference, -2500);
        assert_eq!(comparison.difference_label(), "-¥2,500");
    }

    #[test]
    fn test_identical_request_has_zero_difference() {
        let original = make_input("22:00:00", ("2026-01-16", "06:00:00"), 60);

        let comparison = compare_wages(&original, &original, 800, &PayRules::default());

        assert_eq!(comparison.original_amount, 9300);
        assert_eq!(comparison.difference, 0);
        assert_eq!(comparison.difference_label(), "+¥0");
    }

    #[test]
    fn test_overnight_extension_picks_up_premiums() {
        let original = make_input("17:00:00", ("2026-01-15", "22:00:00"), 0);
        let requested = make_input("17:00:00", ("2026-01-16", "09:00:00"), 60);

        let comparison = compare_wages(&original, &requested, 0, &PayRules::default());

        assert_eq!(comparison.original_amount, 5000);
        assert_eq!(comparison.requested_amount, 18250);
        assert_eq!(comparison.difference, 13250);
    }
}
