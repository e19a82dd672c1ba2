//! Pay breakdown models for the shift pay engine.
//!
//! This module contains the [`PayBreakdown`] type and its associated structures
//! that capture all outputs from a shift pay calculation, including the
//! per-bucket time blocks and the audit trail.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The premium category of a block of worked time.
///
/// # Example
///
/// ```
/// use shift_pay_engine::models::TimeBlockKind;
///
/// let kind = TimeBlockKind::NightOvertime;
/// assert_eq!(serde_json::to_string(&kind).unwrap(), "\"night_overtime\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBlockKind {
    /// Daytime minutes within the overtime threshold (1.0×).
    Normal,
    /// Night minutes within the overtime threshold (1.25×).
    Night,
    /// Daytime minutes beyond the overtime threshold (1.25×).
    Overtime,
    /// Night minutes beyond the overtime threshold (1.5×).
    NightOvertime,
}

impl std::fmt::Display for TimeBlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeBlockKind::Normal => write!(f, "normal"),
            TimeBlockKind::Night => write!(f, "night"),
            TimeBlockKind::Overtime => write!(f, "overtime"),
            TimeBlockKind::NightOvertime => write!(f, "night_overtime"),
        }
    }
}

/// One line of the display breakdown.
///
/// Blocks are anchored at the shift start and span the bucket's duration;
/// they describe how much time was paid at which multiplier, not where in
/// the shift that time fell. Each `amount` is rounded on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    /// Anchor of the block (the shift start).
    pub start: NaiveDateTime,
    /// `start` plus the block's minutes.
    pub end: NaiveDateTime,
    /// Minutes in this bucket.
    pub minutes: i64,
    /// Minutes expressed as hours.
    pub hours: Decimal,
    /// The bucket this block represents.
    pub kind: TimeBlockKind,
    /// Multiplier applied to the hourly rate.
    pub rate: Decimal,
    /// Rounded pay for this block in yen.
    pub amount: i64,
}

/// A single step in the audit trail recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs the engine accepted but a caller may want to review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete result of pricing one shift.
///
/// `total_pay` is always `base_pay + overtime_pay + night_pay`. The
/// `breakdown` amounts are rounded per block and may differ from
/// `total_pay` by a few yen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// Pay for every worked minute at 1.0×.
    pub base_pay: i64,
    /// Overtime premium on top of base pay.
    pub overtime_pay: i64,
    /// Night premium on top of base pay.
    pub night_pay: i64,
    /// `base_pay + overtime_pay + night_pay`.
    pub total_pay: i64,
    /// Gross minutes minus break.
    pub worked_minutes: i64,
    /// Worked minutes beyond the overtime threshold.
    pub overtime_minutes: i64,
    /// Night minutes left after break deduction.
    pub night_minutes: i64,
    /// Per-bucket display blocks in the order normal, night, overtime, night_overtime.
    pub breakdown: Vec<TimeBlock>,
    /// The audit trail, one step per pipeline stage.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while calculating.
    pub warnings: Vec<AuditWarning>,
}

impl PayBreakdown {
    /// Sum of the independently rounded block amounts.
    pub fn block_total(&self) -> i64 {
        self.breakdown.iter().map(|b| b.amount).sum()
    }

    /// Returns the block of the given kind, if that bucket had any minutes.
    pub fn block(&self, kind: TimeBlockKind) -> Option<&TimeBlock> {
        self.breakdown.iter().find(|b| b.kind == kind)
    }
}
