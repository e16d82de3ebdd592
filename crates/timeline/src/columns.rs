//! Column generation for the timeline grid.
//!
//! Column `k` is the range start stepped `k` units. Computing each anchor
//! from the origin rather than from the previous column keeps month columns
//! anchored on the 29th-31st from drifting after a short month.

use crate::clock::Clock;
use crate::date::CalendarDate;
use crate::error::{TimelineError, TimelineResult};
use crate::granularity::Granularity;
use serde::Serialize;
use tracing::{debug, trace};

/// A single labeled cell of the timeline header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    label: String,
    date: CalendarDate,
    is_current_period: bool,
}

impl Column {
    /// Build the column anchored at `date`, evaluating the current-period flag against `today`.
    pub fn new(date: CalendarDate, granularity: Granularity, today: CalendarDate) -> Self {
        Self {
            label: granularity.label(date),
            date,
            is_current_period: granularity.is_current_period(date, today),
        }
    }

    /// Header text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Anchor date: the day itself, or the first day of the week or month.
    pub fn date(&self) -> CalendarDate {
        self.date
    }

    /// Whether this column's period contains today.
    pub fn is_current_period(&self) -> bool {
        self.is_current_period
    }
}

/// Anchor dates from `origin` up to and including `end`, one step apart.
///
/// Iteration stops at the first anchor past `end`, or when stepping leaves
/// the representable calendar.
#[derive(Debug, Clone)]
pub struct ColumnDates {
    origin: CalendarDate,
    end: CalendarDate,
    granularity: Granularity,
    index: i64,
}

impl ColumnDates {
    pub fn new(origin: CalendarDate, end: CalendarDate, granularity: Granularity) -> Self {
        Self {
            origin,
            end,
            granularity,
            index: 0,
        }
    }
}

impl Iterator for ColumnDates {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.granularity.step(self.origin, self.index).ok()?;
        if date > self.end {
            return None;
        }
        self.index += 1;
        Some(date)
    }
}

/// Generate the ordered columns covering `[range_start, range_end]`.
///
/// Reads the clock once; every column is compared against that same date.
///
/// # Errors
///
/// Returns `TimelineError::InvertedRange` if `range_start > range_end`.
pub fn generate_columns(
    range_start: CalendarDate,
    range_end: CalendarDate,
    granularity: Granularity,
    clock: &dyn Clock,
) -> TimelineResult<Vec<Column>> {
    if range_start > range_end {
        return Err(TimelineError::InvertedRange {
            start: range_start,
            end: range_end,
        });
    }

    let today = clock.today();
    let columns: Vec<Column> = ColumnDates::new(range_start, range_end, granularity)
        .map(|date| Column::new(date, granularity, today))
        .collect();

    debug!(
        "Generated {} {} columns for {}..={}",
        columns.len(),
        granularity,
        range_start,
        range_end
    );
    trace!("Current period index: {:?}", current_column_index(&columns));
    Ok(columns)
}

/// Index of the column whose period contains today, if it is in view.
pub fn current_column_index(columns: &[Column]) -> Option<usize> {
    columns.iter().position(Column::is_current_period)
}
