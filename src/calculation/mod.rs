//! Shift pay calculation.
//!
//! This module contains the stages of the pay pipeline: splitting a shift at
//! the night window boundaries, allocating the unpaid break, partitioning
//! worked minutes into regular and overtime buckets, and composing yen
//! amounts. It also holds the daily wage, transportation fee, and wage
//! comparison helpers built on top of the pipeline.

mod break_allocation;
mod daily_wage;
mod overtime_partition;
mod pay_composition;
mod salary;
mod segmentation;
mod wage_comparison;

pub use break_allocation::{BreakAllocation, allocate_break};
pub use daily_wage::{
    DailyWage, TransportationFeeOption, calculate_daily_wage, estimate_monthly_salary,
    filter_transportation_fee_options, min_transportation_fee, working_hours,
};
pub use overtime_partition::{MinuteBuckets, OvertimePartition, partition_overtime};
pub use pay_composition::{PayComposition, compose_pay, minutes_to_yen};
pub use salary::{
    calculate_salary, calculate_salary_with_rules, try_calculate_salary,
    try_calculate_salary_with_rules,
};
pub use segmentation::{Segment, night_and_day_minutes, segment_shift};
pub use wage_comparison::{WageComparison, compare_wages};
