//! Half-month windows
//!
//! Bills are grouped into the first half (days 1-15) and the second half
//! (day 16 through the real last day) of a calendar month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Last day of the first half of any month
pub const FIRST_HALF_END_DAY: u32 = 15;

/// Which half of the month a date belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfMonth {
    FirstHalf,
    SecondHalf,
}

impl HalfMonth {
    /// Classify a date by its day of month
    pub fn of(date: NaiveDate) -> Self {
        if date.day() <= FIRST_HALF_END_DAY {
            Self::FirstHalf
        } else {
            Self::SecondHalf
        }
    }

    /// Human-readable label ("first half" / "second half")
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstHalf => "first half",
            Self::SecondHalf => "second half",
        }
    }
}

impl fmt::Display for HalfMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The concrete half-month containing a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HalfMonthWindow {
    pub half: HalfMonth,
    /// First day of the window (inclusive)
    pub start: NaiveDate,
    /// Last day of the window (inclusive, always a real calendar date)
    pub end: NaiveDate,
}

impl HalfMonthWindow {
    /// Build the window containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        let half = HalfMonth::of(date);
        let (start, end) = match half {
            HalfMonth::FirstHalf => (
                first_day_of_month(date),
                date.with_day(FIRST_HALF_END_DAY).unwrap_or(date),
            ),
            HalfMonth::SecondHalf => (
                date.with_day(FIRST_HALF_END_DAY + 1).unwrap_or(date),
                last_day_of_month(date),
            ),
        };
        Self { half, start, end }
    }

    /// Check if a date falls within this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for HalfMonthWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} to {})", self.half, self.start, self.end)
    }
}

fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Real last day of the month containing `date`
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    (28..=31)
        .rev()
        .find_map(|day| date.with_day(day))
        .unwrap_or(date)
}

/// True when `date` is in a later calendar month than `reference`
pub fn is_later_month(date: NaiveDate, reference: NaiveDate) -> bool {
    (date.year(), date.month()) > (reference.year(), reference.month())
}
