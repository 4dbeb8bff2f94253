// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekday and wall-clock primitives for recurring weekly slots.
//!
//! Templates recur every week, so nothing here carries a calendar date.
//! Only Monday through Friday are modelled.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Time, Weekday};

/// A working day of the week on which slots may be scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl ShiftDay {
    /// All schedulable days in week order.
    pub const ALL: [Self; 5] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    /// Builds a day from its ISO number (1 = Monday ... 5 = Friday).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDayOfWeek` for anything outside 1-5.
    pub const fn from_number(number: u8) -> Result<Self, DomainError> {
        match number {
            1 => Ok(Self::Monday),
            2 => Ok(Self::Tuesday),
            3 => Ok(Self::Wednesday),
            4 => Ok(Self::Thursday),
            5 => Ok(Self::Friday),
            other => Err(DomainError::InvalidDayOfWeek(other)),
        }
    }

    /// Returns the ISO day number (1 = Monday).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
        }
    }

    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Monday,
            Self::Tuesday => Weekday::Tuesday,
            Self::Wednesday => Weekday::Wednesday,
            Self::Thursday => Weekday::Thursday,
            Self::Friday => Weekday::Friday,
        }
    }

    /// Days elapsed since Monday of the same week.
    #[must_use]
    pub fn offset_from_monday(self) -> i64 {
        i64::from(self.number()) - 1
    }
}

impl std::fmt::Display for ShiftDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.weekday())
    }
}

/// A half-open wall-clock interval `[start, end)` within a single day.
///
/// Overnight windows are not representable: `start` is always strictly
/// before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct TimeWindow {
    start: Time,
    end: Time,
}

/// Unvalidated bounds, deserialized before the range check runs.
#[derive(Deserialize)]
struct WindowBounds {
    start: Time,
    end: Time,
}

impl TryFrom<WindowBounds> for TimeWindow {
    type Error = DomainError;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.start, bounds.end)
    }
}

impl TimeWindow {
    /// Creates a window.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeOfDay` if either bound carries
    /// seconds, or `DomainError::InvalidRange` if `start >= end`.
    pub fn new(start: Time, end: Time) -> Result<Self, DomainError> {
        require_whole_minute(start)?;
        require_whole_minute(end)?;
        if start >= end {
            return Err(DomainError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a window from two `HH:MM` strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is malformed or the range is empty.
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        Self::new(parse_time_of_day(start)?, parse_time_of_day(end)?)
    }

    #[must_use]
    pub const fn start(&self) -> Time {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Time {
        self.end
    }

    /// Returns true if the two half-open intervals share any instant.
    ///
    /// Windows that merely touch (`09:00-13:00` and `13:00-17:00`) do not
    /// overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            format_time_of_day(self.start),
            format_time_of_day(self.end)
        )
    }
}

/// Parses a 24-hour `HH:MM` wall-clock value.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeOfDay` if the value cannot be parsed.
pub fn parse_time_of_day(value: &str) -> Result<Time, DomainError> {
    Time::parse(value, format_description!("[hour]:[minute]")).map_err(|e| {
        DomainError::InvalidTimeOfDay {
            value: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Slots are stored and exchanged as `HH:MM`, so finer precision would be
/// lost on the way.
fn require_whole_minute(value: Time) -> Result<(), DomainError> {
    if value.second() != 0 || value.nanosecond() != 0 {
        return Err(DomainError::InvalidTimeOfDay {
            value: value.to_string(),
            error: String::from("times must be whole minutes"),
        });
    }
    Ok(())
}

/// Formats a wall-clock value as `HH:MM`.
#[must_use]
pub fn format_time_of_day(value: Time) -> String {
    format!("{:02}:{:02}", value.hour(), value.minute())
}
