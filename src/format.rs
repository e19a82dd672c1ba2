//! Display formatting for durations and yen amounts.

/// Currency symbol prefixed to every formatted amount.
pub const CURRENCY_SYMBOL: char = '¥';

/// Formats a minute count as hours and minutes.
///
/// Zero components are omitted, so 480 becomes `"8h"` and 30 becomes
/// `"30m"`. Zero minutes format as `"0m"`.
///
/// # Example
///
/// ```
/// use shift_pay_engine::format::format_minutes_to_hours_and_minutes;
///
/// assert_eq!(format_minutes_to_hours_and_minutes(900), "15h");
/// assert_eq!(format_minutes_to_hours_and_minutes(326), "5h 26m");
/// assert_eq!(format_minutes_to_hours_and_minutes(45), "45m");
/// ```
pub fn format_minutes_to_hours_and_minutes(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let magnitude = minutes.unsigned_abs();
    let hours = magnitude / 60;
    let mins = magnitude % 60;
    match (hours, mins) {
        (0, m) => format!("{}{}m", sign, m),
        (h, 0) => format!("{}{}h", sign, h),
        (h, m) => format!("{}{}h {}m", sign, h, m),
    }
}

/// Formats a yen amount with thousands separators.
///
/// Negative amounts put the sign before the symbol: `-¥1,500`, not `¥-1,500`.
///
/// # Example
///
/// ```
/// use shift_pay_engine::format::format_currency;
///
/// assert_eq!(format_currency(18250), "¥18,250");
/// assert_eq!(format_currency(0), "¥0");
/// assert_eq!(format_currency(-1500), "-¥1,500");
/// ```
pub fn format_currency(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!(
        "{}{}{}",
        sign,
        CURRENCY_SYMBOL,
        group_thousands(amount.unsigned_abs())
    )
}

/// Formats the change from `original` to `modified`, always signed.
///
/// Decreases read `-¥2,500` rather than `¥-2,500`.
///
/// # Example
///
/// ```
/// use shift_pay_engine::format::format_difference;
///
/// assert_eq!(format_difference(8000, 8500), "+¥500");
/// assert_eq!(format_difference(8500, 8500), "+¥0");
/// assert_eq!(format_difference(10500, 8000), "-¥2,500");
/// ```
pub fn format_difference(original: i64, modified: i64) -> String {
    let diff = modified.saturating_sub(original);
    if diff >= 0 {
        format!("+{}", format_currency(diff))
    } else {
        format_currency(diff)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
