//! Shift input models.
//!
//! This module defines [`ShiftInput`], the timing and rate of a single worked
//! shift, along with [`ClockTime`] and [`ScheduledShift`] for building a
//! `ShiftInput` from a job's scheduled "HH:mm" times.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Prefix marking a clock time that falls on the day after the work date.
pub const NEXT_DAY_PREFIX: char = '翌';

/// Longest shift, in gross minutes, the checked calculation accepts.
pub const MAX_SHIFT_MINUTES: i64 = 24 * 60;

/// A single shift to be priced.
///
/// Callers normalize overnight shifts themselves: `end_time` must already be
/// on the following day when the shift crosses midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInput {
    /// When work started (wall clock).
    pub start_time: NaiveDateTime,
    /// When work ended (wall clock).
    pub end_time: NaiveDateTime,
    /// Total unpaid break taken during the shift, in minutes.
    pub break_minutes: u32,
    /// Hourly rate in yen.
    pub hourly_rate: u32,
}

impl ShiftInput {
    /// Start time truncated to whole minutes.
    pub fn start_minute(&self) -> NaiveDateTime {
        truncate_to_minute(self.start_time)
    }

    /// End time truncated to whole minutes.
    pub fn end_minute(&self) -> NaiveDateTime {
        truncate_to_minute(self.end_time)
    }

    /// Minutes between start and end, before any break is deducted.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_pay_engine::models::ShiftInput;
    /// use chrono::NaiveDateTime;
    ///
    /// let shift = ShiftInput {
    ///     start_time: NaiveDateTime::parse_from_str("2026-01-15 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     end_time: NaiveDateTime::parse_from_str("2026-01-16 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     break_minutes: 60,
    ///     hourly_rate: 1000,
    /// };
    /// assert_eq!(shift.gross_minutes(), 960);
    /// ```
    pub fn gross_minutes(&self) -> i64 {
        (self.end_minute() - self.start_minute()).num_minutes().max(0)
    }

    /// Checks the preconditions the pay calculation relies on.
    ///
    /// Fails with [`EngineError::InvalidShiftInput`] when the shift does not
    /// end after it starts, when it is longer than [`MAX_SHIFT_MINUTES`], or
    /// when the break is longer than the shift.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_minute() <= self.start_minute() {
            return Err(EngineError::InvalidShiftInput {
                message: format!(
                    "end time {} must be after start time {}",
                    self.end_time, self.start_time
                ),
            });
        }

        let gross = self.gross_minutes();
        if gross > MAX_SHIFT_MINUTES {
            return Err(EngineError::InvalidShiftInput {
                message: format!(
                    "shift of {} minutes exceeds the {} minute limit",
                    gross, MAX_SHIFT_MINUTES
                ),
            });
        }

        if i64::from(self.break_minutes) > gross {
            return Err(EngineError::InvalidShiftInput {
                message: format!(
                    "break of {} minutes exceeds shift length of {} minutes",
                    self.break_minutes, gross
                ),
            });
        }

        Ok(())
    }
}

/// Drops seconds and sub-second precision.
fn truncate_to_minute(datetime: NaiveDateTime) -> NaiveDateTime {
    datetime
        .with_second(0)
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(datetime)
}

/// A scheduled clock time such as `"09:00"` or `"翌05:00"`.
///
/// The `翌` prefix marks a time on the day after the work date.
///
/// # Example
///
/// ```
/// use shift_pay_engine::models::ClockTime;
///
/// let end: ClockTime = "翌05:30".parse().unwrap();
/// assert!(end.is_next_day());
/// assert_eq!(end.to_string(), "翌05:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    time: NaiveTime,
    next_day: bool,
}

impl ClockTime {
    /// Builds a clock time from its parts.
    pub fn new(hour: u32, minute: u32, next_day: bool) -> EngineResult<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            EngineError::InvalidClockTime {
                value: format!("{:02}:{:02}", hour, minute),
                message: "hour must be 0-23 and minute 0-59".to_string(),
            }
        })?;
        Ok(Self { time, next_day })
    }

    /// Parses `"HH:mm"` or `"翌HH:mm"`.
    pub fn parse(value: &str) -> EngineResult<Self> {
        let trimmed = value.trim();
        let (next_day, rest) = match trimmed.strip_prefix(NEXT_DAY_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let invalid = |message: &str| EngineError::InvalidClockTime {
            value: value.to_string(),
            message: message.to_string(),
        };

        let (hour, minute) = rest
            .split_once(':')
            .ok_or_else(|| invalid("expected HH:mm"))?;
        let hour: u32 = hour
            .trim()
            .parse()
            .map_err(|_| invalid("hour is not a number"))?;
        let minute: u32 = minute
            .trim()
            .parse()
            .map_err(|_| invalid("minute is not a number"))?;

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| invalid("hour must be 0-23 and minute 0-59"))?;

        Ok(Self { time, next_day })
    }

    /// The time of day.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Whether the time falls on the day after the work date.
    pub fn is_next_day(&self) -> bool {
        self.next_day
    }

    /// Minutes since midnight of the work date, counting the next-day prefix.
    pub fn minutes_from_work_date(&self) -> i64 {
        let minutes = i64::from(self.time.hour() * 60 + self.time.minute());
        if self.next_day {
            minutes + 24 * 60
        } else {
            minutes
        }
    }

    /// Resolves this clock time against a work date.
    pub fn on(&self, work_date: NaiveDate) -> NaiveDateTime {
        let datetime = work_date.and_time(self.time);
        if self.next_day {
            datetime + Duration::days(1)
        } else {
            datetime
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.next_day {
            write!(f, "{}", NEXT_DAY_PREFIX)?;
        }
        write!(f, "{}", self.time.format("%H:%M"))
    }
}

impl FromStr for ClockTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// A job's scheduled shift on a given work date.
///
/// This is the shape attendance records carry before they are priced:
/// clock times relative to the work date, plus the job's rate and fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledShift {
    /// The calendar date the shift is booked on.
    pub work_date: NaiveDate,
    /// Scheduled start.
    pub start: ClockTime,
    /// Scheduled end; may carry the next-day prefix.
    pub end: ClockTime,
    /// Scheduled break in minutes.
    pub break_minutes: u32,
    /// Hourly rate in yen.
    pub hourly_rate: u32,
    /// Flat transportation fee paid per shift, in yen.
    #[serde(default)]
    pub transportation_fee: i64,
}

impl ScheduledShift {
    /// Converts the schedule into concrete timestamps.
    ///
    /// The end is advanced by one day when it does not fall after the start,
    /// so `"22:00"` to `"06:00"` becomes an overnight shift.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_pay_engine::models::{ClockTime, ScheduledShift};
    /// use chrono::NaiveDate;
    ///
    /// let scheduled = ScheduledShift {
    ///     work_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     start: "22:00".parse().unwrap(),
    ///     end: "06:00".parse().unwrap(),
    ///     break_minutes: 60,
    ///     hourly_rate: 1000,
    ///     transportation_fee: 0,
    /// };
    /// let input = scheduled.to_shift_input();
    /// assert_eq!(input.end_time.date(), NaiveDate::from_ymd_opt(2026, 1, 16).unwrap());
    /// ```
    pub fn to_shift_input(&self) -> ShiftInput {
        let start_time = self.start.on(self.work_date);
        let mut end_time = self.end.on(self.work_date);
        if end_time <= start_time {
            end_time += Duration::days(1);
        }

        ShiftInput {
            start_time,
            end_time,
            break_minutes: self.break_minutes,
            hourly_rate: self.hourly_rate,
        }
    }
}
