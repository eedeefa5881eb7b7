//! Time resolution: maps a local wall-clock instant to week parity,
//! weekday number and minute of day.
//!
//! All functions take a [`NaiveDateTime`] in the host's local time. Week
//! parity is counted on calendar dates, so the odd/even boundary always
//! falls at local midnight between Sunday and Monday regardless of the
//! time of day or DST shifts.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// First Monday of the semester. Week 1 ("odd") starts here.
pub const SEMESTER_START: NaiveDate = match NaiveDate::from_ymd_opt(2024, 9, 2) {
    Some(date) => date,
    None => panic!("invalid semester start"),
};

/// Which of the two alternating timetables applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekParity {
    Odd,
    Even,
}

impl WeekParity {
    pub fn toggled(self) -> Self {
        match self {
            WeekParity::Odd => WeekParity::Even,
            WeekParity::Even => WeekParity::Odd,
        }
    }

    /// Ordinal shown to students: odd weeks are "week 1", even weeks "week 2".
    pub fn ordinal(self) -> u8 {
        match self {
            WeekParity::Odd => 1,
            WeekParity::Even => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeekParity::Odd => "odd",
            WeekParity::Even => "even",
        }
    }

    /// Badge text for the current-week indicator.
    pub fn label(self) -> &'static str {
        match self {
            WeekParity::Odd => "1 НЕДЕЛЯ",
            WeekParity::Even => "2 НЕДЕЛЯ",
        }
    }
}

impl fmt::Display for WeekParity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekParity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "odd" | "1" => Ok(WeekParity::Odd),
            "even" | "2" => Ok(WeekParity::Even),
            _ => Err(ValidationError::InvalidWeek(s.to_string())),
        }
    }
}

/// "Now", resolved against the semester calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTime {
    pub week: WeekParity,
    /// 1 = Monday .. 7 = Sunday.
    pub day: u8,
    pub minute_of_day: u32,
}

impl ResolvedTime {
    pub fn resolve(now: NaiveDateTime, semester_start: NaiveDate) -> Self {
        Self {
            week: current_week_parity(now, semester_start),
            day: current_day_number(now),
            minute_of_day: minutes_since_midnight(now),
        }
    }
}

/// Whole weeks elapsed since `semester_start`, rounded toward negative infinity.
pub fn weeks_since(now: NaiveDateTime, semester_start: NaiveDate) -> i64 {
    let days = now.date().signed_duration_since(semester_start).num_days();
    days.div_euclid(7)
}

/// `Odd` when an even number of whole weeks has elapsed since the semester start.
pub fn current_week_parity(now: NaiveDateTime, semester_start: NaiveDate) -> WeekParity {
    if weeks_since(now, semester_start).rem_euclid(2) == 0 {
        WeekParity::Odd
    } else {
        WeekParity::Even
    }
}

/// ISO weekday number: Monday = 1 .. Sunday = 7.
pub fn current_day_number(now: NaiveDateTime) -> u8 {
    now.weekday().number_from_monday() as u8
}

pub fn minutes_since_midnight(now: NaiveDateTime) -> u32 {
    now.hour() * 60 + now.minute()
}

/// Current local wall-clock time.
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Parse a user-supplied instant.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS]`, the same with a space separator, or a
/// bare `YYYY-MM-DD` (midnight).
pub fn parse_instant(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = value.trim();
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|e| ValidationError::InvalidTimestamp {
            value: value.to_string(),
            message: e.to_string(),
        })
}
