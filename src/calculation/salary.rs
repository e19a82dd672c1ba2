//! Shift pay calculation.
//!
//! This module runs the full pipeline for one shift:
//! segmentation → break allocation → overtime partition → pay composition.
//! Each stage is a pure function of the previous stage's result, so the
//! whole calculation is deterministic and safe to call from any thread.

use tracing::{debug, warn};

use crate::config::PayRules;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning, MAX_SHIFT_MINUTES, PayBreakdown, ShiftInput};

use super::break_allocation::allocate_break;
use super::overtime_partition::partition_overtime;
use super::pay_composition::compose_pay;
use super::segmentation::{Segment, night_and_day_minutes, segment_shift};

/// Calculates pay for a shift under the statutory default rules.
///
/// Inputs are not validated: a shift that does not end after it starts is
/// priced at zero, a break longer than the shift is absorbed (all minute
/// buckets floor at zero), and a shift longer than one day is priced in
/// full. Each case adds an [`AuditWarning`].
/// Use [`try_calculate_salary`] to reject such input instead.
///
/// # Examples
///
/// ```
/// use shift_pay_engine::calculation::calculate_salary;
/// use shift_pay_engine::models::ShiftInput;
/// use chrono::NaiveDateTime;
///
/// let input = ShiftInput {
///     start_time: NaiveDateTime::parse_from_str("2026-01-15 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end_time: NaiveDateTime::parse_from_str("2026-01-16 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     break_minutes: 60,
///     hourly_rate: 1000,
/// };
///
/// let pay = calculate_salary(&input);
/// assert_eq!(pay.base_pay, 15000);
/// assert_eq!(pay.overtime_pay, 1750);
/// assert_eq!(pay.night_pay, 1500);
/// assert_eq!(pay.total_pay, 18250);
/// ```
pub fn calculate_salary(input: &ShiftInput) -> PayBreakdown {
    calculate_salary_with_rules(input, &PayRules::default())
}

/// Calculates pay for a shift under the given rules.
pub fn calculate_salary_with_rules(input: &ShiftInput, rules: &PayRules) -> PayBreakdown {
    let start = input.start_minute();
    let end = input.end_minute();
    let break_minutes = i64::from(input.break_minutes);
    let mut warnings = Vec::new();

    if end <= start {
        warn!(
            start_time = %input.start_time,
            end_time = %input.end_time,
            "Shift does not end after it starts; pricing as zero minutes"
        );
        warnings.push(AuditWarning {
            code: "NON_POSITIVE_SHIFT".to_string(),
            message: format!(
                "Shift ends at {} which is not after its start {}",
                input.end_time, input.start_time
            ),
            severity: "high".to_string(),
        });
    }

    let gross_minutes = input.gross_minutes();
    if gross_minutes > MAX_SHIFT_MINUTES {
        warn!(
            gross_minutes,
            limit = MAX_SHIFT_MINUTES,
            "Shift is longer than one day; pricing anyway"
        );
        warnings.push(AuditWarning {
            code: "SHIFT_EXCEEDS_24H".to_string(),
            message: format!(
                "Shift of {} minutes is longer than the {} minute limit",
                gross_minutes, MAX_SHIFT_MINUTES
            ),
            severity: "medium".to_string(),
        });
    }

    // Step 1: split at night window boundaries
    let segments = segment_shift(start, end, rules);
    let (night_minutes, day_minutes) = night_and_day_minutes(&segments);
    let segmentation_step = segmentation_audit_step(&segments, input, gross_minutes, 1);

    // Step 2: take the break out of night minutes first
    let allocation = allocate_break(night_minutes, day_minutes, break_minutes, 2);
    if allocation.unabsorbed_break_minutes > 0 {
        warn!(
            break_minutes = input.break_minutes,
            gross_minutes,
            "Break exceeds shift length; excess ignored"
        );
        warnings.push(AuditWarning {
            code: "BREAK_EXCEEDS_SHIFT".to_string(),
            message: format!(
                "Break of {} minutes exceeds the {} minute shift",
                input.break_minutes, gross_minutes
            ),
            severity: "medium".to_string(),
        });
    }

    // Step 3: overtime is the tail of the worked timeline
    let worked_minutes = (gross_minutes - break_minutes).max(0);
    let partition = partition_overtime(
        worked_minutes,
        &segments,
        &allocation,
        rules.overtime_threshold_minutes,
        3,
    );

    // Step 4: price the buckets
    let composition = compose_pay(start, &partition, &allocation, input.hourly_rate, rules, 4);

    debug!(
        worked_minutes,
        overtime_minutes = partition.overtime_minutes,
        night_minutes = allocation.adjusted_night_minutes,
        total_pay = composition.total_pay,
        "Shift pay calculated"
    );

    PayBreakdown {
        base_pay: composition.base_pay,
        overtime_pay: composition.overtime_pay,
        night_pay: composition.night_pay,
        total_pay: composition.total_pay,
        worked_minutes,
        overtime_minutes: partition.overtime_minutes,
        night_minutes: allocation.adjusted_night_minutes,
        breakdown: composition.breakdown,
        audit_steps: vec![
            segmentation_step,
            allocation.audit_step,
            partition.audit_step,
            composition.audit_step,
        ],
        warnings,
    }
}

/// Validates the shift, then calculates pay under the default rules.
///
/// Fails with `InvalidShiftInput` when the shift does not end after it
/// starts or when the break is longer than the shift.
pub fn try_calculate_salary(input: &ShiftInput) -> EngineResult<PayBreakdown> {
    try_calculate_salary_with_rules(input, &PayRules::default())
}

/// Validates the shift, then calculates pay under the given rules.
pub fn try_calculate_salary_with_rules(
    input: &ShiftInput,
    rules: &PayRules,
) -> EngineResult<PayBreakdown> {
    input.validate()?;
    Ok(calculate_salary_with_rules(input, rules))
}

fn segmentation_audit_step(
    segments: &[Segment],
    input: &ShiftInput,
    gross_minutes: i64,
    step_number: u32,
) -> AuditStep {
    let segment_descriptions: Vec<serde_json::Value> = segments
        .iter()
        .map(|s| {
            serde_json::json!({
                "start": s.start.to_string(),
                "end": s.end.to_string(),
                "minutes": s.minutes(),
                "is_night": s.is_night
            })
        })
        .collect();

    let night_count = segments.iter().filter(|s| s.is_night).count();

    AuditStep {
        step_number,
        rule_id: "night_segmentation".to_string(),
        rule_name: "Day/Night Segmentation".to_string(),
        input: serde_json::json!({
            "start_time": input.start_time.to_string(),
            "end_time": input.end_time.to_string(),
            "gross_minutes": gross_minutes
        }),
        output: serde_json::json!({
            "segment_count": segments.len(),
            "segments": segment_descriptions
        }),
        reasoning: if night_count == 0 {
            format!("Shift lies entirely outside the night window ({} segment(s))", segments.len())
        } else {
            format!(
                "Shift split into {} segment(s), {} in the night window",
                segments.len(),
                night_count
            )
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::TimeBlockKind;
    use chrono::{Duration, NaiveDateTime};

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_input(
        start: (&str, &str),
        end: (&str, &str),
        break_minutes: u32,
        hourly_rate: u32,
    ) -> ShiftInput {
        ShiftInput {
            start_time: make_datetime(start.0, start.1),
            end_time: make_datetime(end.0, end.1),
            break_minutes,
            hourly_rate,
        }
    }

    // ==========================================================================
    // Overnight 17:00 to 09:00, 1h break, ¥1,000/h
    // Base 900 min = ¥15,000, overtime 420 min × 0.25 = ¥1,750,
    // night 360 min × 0.25 = ¥1,500. Total ¥18,250
    // ==========================================================================
    #[test]
    fn test_overnight_with_overtime_and_night() {
        let input = make_input(
            ("2026-01-15", "17:00:00"),
            ("2026-01-16", "09:00:00"),
            60,
            1000,
        );

        let pay = calculate_salary(&input);

        assert_eq!(pay.worked_minutes, 900);
        assert_eq!(pay.overtime_minutes, 420);
        assert_eq!(pay.night_minutes, 360);
        assert_eq!(pay.base_pay, 15000);
        assert_eq!(pay.overtime_pay, 1750);
        assert_eq!(pay.night_pay, 1500);
        assert_eq!(pay.total_pay, 18250);
        assert_eq!(pay.breakdown.len(), 4);
        assert!(pay.warnings.is_empty());
    }

    #[test]
    fn test_regular_day_shift() {
        let input = make_input(
            ("2026-01-15", "09:00:00"),
            ("2026-01-15", "18:00:00"),
            60,
            1000,
        );

        let pay = calculate_salary(&input);

        assert_eq!(pay.worked_minutes, 480);
        assert_eq!(pay.overtime_minutes, 0);
        assert_eq!(pay.night_minutes, 0);
        assert_eq!(pay.total_pay, 8000);
    }

    #[test]
    fn test_evening_shift_into_night() {
        let input = make_input(
            ("2026-01-15", "18:00:00"),
            ("2026-01-15", "23:00:00"),
            0,
            1000,
        );

        let pay = calculate_salary(&input);

        assert_eq!(pay.base_pay, 5000);
        assert_eq!(pay.night_pay, 250);
        assert_eq!(pay.total_pay, 5250);
        assert_eq!(pay.block(TimeBlockKind::Night).map(|b| b.amount), Some(1250));
    }

    #[test]
    fn test_day_overtime() {
        let input = make_input(
            ("2026-01-15", "09:00:00"),
            ("2026-01-15", "20:00:00"),
            60,
            1000,
        );

        let pay = calculate_salary(&input);

        assert_eq!(pay.worked_minutes, 600);
        assert_eq!(pay.overtime_minutes, 120);
        assert_eq!(pay.overtime_pay, 500);
        assert_eq!(pay.night_pay, 0);
        assert_eq!(pay.total_pay, 10500);
    }

    #[test]
    fn test_full_night_shift_break_from_night() {
        let input = make_input(
            ("2026-01-15", "22:00:00"),
            ("2026-01-16", "06:00:00"),
            60,
            1000,
        );

        let pay = calculate_salary(&input);

        assert_eq!(pay.worked_minutes, 420);
        assert_eq!(pay.night_minutes, 360);
        assert_eq!(pay.base_pay, 7000);
        assert_eq!(pay.night_pay, 1500);
        assert_eq!(pay.total_pay, 8500);
    }

    #[test]
    fn test_audit_steps_in_pipeline_order() {
        let input = make_input(
            ("2026-01-15", "17:00:00"),
            ("2026-01-16", "09:00:00"),
            60,
            1000,
        );

        let pay = calculate_salary(&input);

        let rule_ids: Vec<&str> = pay.audit_steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rule_ids,
            vec![
                "night_segmentation",
                "break_allocation",
                "overtime_partition",
                "pay_composition"
            ]
        );
        let step_numbers: Vec<u32> = pay.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(step_numbers, vec![1, 2, 3, 4]);
        assert_eq!(pay.audit_steps[0].output["segment_count"], 3);
    }

    #[test]
    fn test_oversized_break_is_absorbed_with_warning() {
        let input = make_input(
            ("2026-01-15", "09:00:00"),
            ("2026-01-15", "10:00:00"),
            120,
            1000,
        );

        let pay = calculate_salary(&input);

        assert_eq!(pay.worked_minutes, 0);
        assert_eq!(pay.total_pay, 0);
        assert!(pay.breakdown.is_empty());
        assert_eq!(pay.warnings.len(), 1);
        assert_eq!(pay.warnings[0].code, "BREAK_EXCEEDS_SHIFT");
    }

    #[test]
    fn test_inverted_shift_priced_at_zero_with_warning() {
        let input = make_input(
            ("2026-01-15", "18:00:00"),
            ("2026-01-15", "09:00:00"),
            0,
            1000,
        );

        let pay = calculate_salary(&input);

        assert_eq!(pay.total_pay, 0);
        assert_eq!(pay.warnings[0].code, "NON_POSITIVE_SHIFT");
    }

    #[test]
    fn test_try_calculate_rejects_oversized_break() {
        let input = make_input(
            ("2026-01-15", "09:00:00"),
            ("2026-01-15", "10:00:00"),
            120,
            1000,
        );

        assert!(matches!(
            try_calculate_salary(&input),
            Err(EngineError::InvalidShiftInput { .. })
        ));
    }

    #[test]
    fn test_multi_day_shift_priced_with_warning() {
        let input = make_input(
            ("2026-01-15", "19:30:00"),
            ("2026-01-18", "04:01:00"),
            360,
            1000,
        );

        let pay = calculate_salary(&input);

        assert_eq!(pay.worked_minutes, 3031);
        assert_eq!(pay.overtime_minutes, 2551);
        assert_eq!(pay.night_minutes, 841);
        let block_minutes: i64 = pay.breakdown.iter().map(|b| b.minutes).sum();
        assert_eq!(block_minutes, pay.worked_minutes);
        assert_eq!(pay.block(TimeBlockKind::Normal), None);
        assert_eq!(pay.warnings.len(), 1);
        assert_eq!(pay.warnings[0].code, "SHIFT_EXCEEDS_24H");
    }

    #[test]
    fn test_try_calculate_rejects_multi_day_shift() {
        let input = make_input(
            ("2026-01-15", "19:30:00"),
            ("2026-01-18", "04:01:00"),
            360,
            1000,
        );

        assert!(matches!(
            try_calculate_salary(&input),
            Err(EngineError::InvalidShiftInput { .. })
        ));
    }

    #[test]
    fn test_try_calculate_accepts_valid_shift() {
        let input = make_input(
            ("2026-01-15", "22:00:00"),
            ("2026-01-16", "06:00:00"),
            60,
            1000,
        );

        let pay = try_calculate_salary(&input).unwrap();
        assert_eq!(pay, calculate_salary(&input));
    }

    #[test]
    fn test_seconds_are_truncated() {
        let input = make_input(
            ("2026-01-15", "09:00:59"),
            ("2026-01-15", "18:00:30"),
            60,
            1000,
        );

        assert_eq!(calculate_salary(&input).total_pay, 8000);
    }

    #[test]
    fn test_custom_threshold() {
        let rules = PayRules {
            overtime_threshold_minutes: 420,
            ..PayRules::default()
        };
        let input = make_input(
            ("2026-01-15", "09:00:00"),
            ("2026-01-15", "18:00:00"),
            60,
            1000,
        );

        let pay = calculate_salary_with_rules(&input, &rules);

        assert_eq!(pay.overtime_minutes, 60);
        assert_eq!(pay.total_pay, 8250);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_input() -> impl Strategy<Value = ShiftInput> {
            (0i64..(24 * 60), 1i64..=(24 * 60), 0.0f64..=1.0, 0u32..5000).prop_map(
                |(start_offset, length, break_fraction, hourly_rate)| {
                    let start_time =
                        make_datetime("2026-01-15", "00:00:00") + Duration::minutes(start_offset);
                    ShiftInput {
                        start_time,
                        end_time: start_time + Duration::minutes(length),
                        break_minutes: (length as f64 * break_fraction).floor() as u32,
                        hourly_rate,
                    }
                },
            )
        }

        fn arb_long_input() -> impl Strategy<Value = ShiftInput> {
            (0i64..(24 * 60), (24 * 60 + 1)..=(72 * 60i64), 0.0f64..=1.0).prop_map(
                |(start_offset, length, break_fraction)| {
                    let start_time =
                        make_datetime("2026-01-15", "00:00:00") + Duration::minutes(start_offset);
                    ShiftInput {
                        start_time,
                        end_time: start_time + Duration::minutes(length),
                        break_minutes: (length as f64 * break_fraction).floor() as u32,
                        hourly_rate: 1000,
                    }
                },
            )
        }

        proptest! {
            /// Shifts spanning several nights still divide worked time exactly.
            #[test]
            fn long_shifts_keep_block_invariants(input in arb_long_input()) {
                let pay = calculate_salary(&input);

                let block_minutes: i64 = pay.breakdown.iter().map(|b| b.minutes).sum();
                prop_assert_eq!(block_minutes, pay.worked_minutes);
                prop_assert!(pay.breakdown.iter().all(|b| b.minutes > 0));
                prop_assert!((pay.block_total() - pay.total_pay).abs() <= 3);
                prop_assert!(pay.warnings.iter().any(|w| w.code == "SHIFT_EXCEEDS_24H"));
                prop_assert!(try_calculate_salary(&input).is_err());
            }

            #[test]
            fn total_is_sum_of_components(input in arb_input()) {
                let pay = calculate_salary(&input);

                prop_assert!(pay.base_pay >= 0);
                prop_assert!(pay.overtime_pay >= 0);
                prop_assert!(pay.night_pay >= 0);
                prop_assert_eq!(pay.total_pay, pay.base_pay + pay.overtime_pay + pay.night_pay);
            }

            #[test]
            fn block_minutes_sum_to_worked(input in arb_input()) {
                let pay = calculate_salary(&input);

                let block_minutes: i64 = pay.breakdown.iter().map(|b| b.minutes).sum();
                prop_assert_eq!(block_minutes, pay.worked_minutes);
            }

            /// Independent block rounding drifts at most three yen from the total.
            #[test]
            fn block_amounts_close_to_total(input in arb_input()) {
                let pay = calculate_salary(&input);

                prop_assert!((pay.block_total() - pay.total_pay).abs() <= 3);
            }

            #[test]
            fn calculation_is_idempotent(input in arb_input()) {
                prop_assert_eq!(calculate_salary(&input), calculate_salary(&input));
            }

            #[test]
            fn valid_inputs_never_warn(input in arb_input()) {
                prop_assert!(input.validate().is_ok());
                prop_assert!(calculate_salary(&input).warnings.is_empty());
            }
        }
    }
}
