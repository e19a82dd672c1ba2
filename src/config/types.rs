//! Configuration types for shift pay calculation.
//!
//! This module contains the strongly-typed rule structures that are
//! deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hour of day (wall clock) at which the night window opens.
pub const DEFAULT_NIGHT_START_HOUR: u32 = 22;

/// Hour of day (wall clock) at which the night window closes.
pub const DEFAULT_NIGHT_END_HOUR: u32 = 5;

/// Worked minutes after which every further minute is overtime (8 hours).
pub const DEFAULT_OVERTIME_THRESHOLD_MINUTES: i64 = 8 * 60;

/// Premium added on top of base pay for overtime minutes (25%).
pub const DEFAULT_OVERTIME_PREMIUM: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Premium added on top of base pay for night minutes (25%).
pub const DEFAULT_NIGHT_PREMIUM: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Rules for the minimum transportation fee a shift may carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportationRules {
    /// Yen owed per worked hour.
    pub per_hour: i64,
    /// The minimum fee is rounded up to a multiple of this many yen.
    pub step: i64,
}

impl Default for TransportationRules {
    fn default() -> Self {
        Self {
            per_hour: 100,
            step: 25,
        }
    }
}

/// The premium rules applied to a single shift.
///
/// The night window always wraps midnight: minutes whose wall-clock hour is
/// `>= night_start_hour` or `< night_end_hour` are night minutes.
///
/// # Example
///
/// ```
/// use shift_pay_engine::config::PayRules;
/// use rust_decimal::Decimal;
///
/// let rules = PayRules::default();
/// assert_eq!(rules.night_start_hour, 22);
/// assert_eq!(rules.night_end_hour, 5);
/// assert_eq!(rules.overtime_threshold_minutes, 480);
/// assert_eq!(rules.overtime_premium, Decimal::new(25, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRules {
    /// Hour at which the night window opens.
    pub night_start_hour: u32,
    /// Hour at which the night window closes on the following morning.
    pub night_end_hour: u32,
    /// Worked minutes before overtime begins.
    pub overtime_threshold_minutes: i64,
    /// Premium fraction for overtime minutes.
    pub overtime_premium: Decimal,
    /// Premium fraction for night minutes.
    pub night_premium: Decimal,
    /// Minimum transportation fee rules.
    #[serde(default)]
    pub transportation: TransportationRules,
}

impl Default for PayRules {
    fn default() -> Self {
        Self {
            night_start_hour: DEFAULT_NIGHT_START_HOUR,
            night_end_hour: DEFAULT_NIGHT_END_HOUR,
            overtime_threshold_minutes: DEFAULT_OVERTIME_THRESHOLD_MINUTES,
            overtime_premium: DEFAULT_OVERTIME_PREMIUM,
            night_premium: DEFAULT_NIGHT_PREMIUM,
            transportation: TransportationRules::default(),
        }
    }
}

impl PayRules {
    /// Returns true when the given wall-clock hour falls in the night window.
    pub fn is_night_hour(&self, hour: u32) -> bool {
        hour >= self.night_start_hour || hour < self.night_end_hour
    }

    /// Multiplier for minutes that are night but not overtime.
    pub fn night_multiplier(&self) -> Decimal {
        Decimal::ONE + self.night_premium
    }

    /// Multiplier for minutes that are overtime but not night.
    pub fn overtime_multiplier(&self) -> Decimal {
        Decimal::ONE + self.overtime_premium
    }

    /// Multiplier for minutes that are both night and overtime.
    pub fn night_overtime_multiplier(&self) -> Decimal {
        Decimal::ONE + self.night_premium + self.overtime_premium
    }
}
