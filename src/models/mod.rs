//! Core data models for the shift pay engine.
//!
//! This module contains the shift inputs and the pay breakdown produced
//! for them.

mod pay_breakdown;
mod shift;

pub use pay_breakdown::{AuditStep, AuditWarning, PayBreakdown, TimeBlock, TimeBlockKind};
pub use shift::{ClockTime, MAX_SHIFT_MINUTES, NEXT_DAY_PREFIX, ScheduledShift, ShiftInput};
