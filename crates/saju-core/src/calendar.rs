//! Month grid and date helpers for the calendar view.

use jiff::{ToSpan, civil::Date};
use serde::{Deserialize, Serialize};

use crate::error::{CoachError, Result};

/// Rows in every month grid, regardless of how many weeks the month spans.
pub const GRID_WEEKS: usize = 6;

/// Monday-first weekday labels matching the grid columns.
pub const WEEKDAY_LABELS: [&str; 7] = ["월", "화", "수", "목", "금", "토", "일"];

/// A month laid out as six Monday-first weeks; `0` marks a blank cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i16,
    pub month: i8,
    pub weeks: [[u8; 7]; GRID_WEEKS],
}

impl MonthGrid {
    /// Non-blank day numbers in order.
    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        self.weeks.iter().flatten().copied().filter(|day| *day != 0)
    }

    /// First day of the month shown by this grid.
    pub fn first_day(&self) -> Result<Date> {
        Ok(Date::new(self.year, self.month, 1)?)
    }
}

/// Lays out `year`-`month` as a 6x7 grid, padding with blank rows.
pub fn month_calendar(year: i16, month: i8) -> Result<MonthGrid> {
    let first = Date::new(year, month, 1).map_err(|_| {
        CoachError::invalid_input("month").with_reason(format!("{year}-{month} is not a valid month"))
    })?;

    let offset = first.weekday().to_monday_zero_offset() as usize;
    let days_in_month = first.days_in_month() as usize;

    let mut weeks = [[0u8; 7]; GRID_WEEKS];
    for day in 1..=days_in_month {
        let cell = offset + day - 1;
        weeks[cell / 7][cell % 7] = day as u8;
    }

    Ok(MonthGrid { year, month, weeks })
}

/// First day of the month before the one containing `date`.
pub fn prev_month(date: Date) -> Result<Date> {
    Ok(date.first_of_month().checked_sub(1.month())?)
}

/// First day of the month after the one containing `date`.
pub fn next_month(date: Date) -> Result<Date> {
    Ok(date.first_of_month().checked_add(1.month())?)
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    date.to_string()
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<Date> {
    value.trim().parse::<Date>().map_err(|e| {
        CoachError::invalid_input("date").with_reason(format!("'{value}' is not a YYYY-MM-DD date: {e}"))
    })
}
