//! Bar positioning for intervals on the timeline grid.
//!
//! Day and week zoom treat the range as one continuous line. Month zoom
//! positions against the month columns instead: the left edge is the column
//! index plus the fraction into the actual starting month, so a bar starting
//! on the 1st lines up with the column boundary whatever the month length.
//! Width is scaled by the mean Gregorian month so bars of equal duration
//! render equally wide in every month.

use crate::columns::Column;
use crate::date::{self, CalendarDate, MS_PER_DAY};
use crate::error::{TimelineError, TimelineResult};
use crate::granularity::{Granularity, LayoutMode};
use chrono::Datelike;
use serde::Serialize;
use tracing::trace;

/// Mean Gregorian month length in days, used for month-mode widths.
pub const AVERAGE_MONTH_DAYS: f64 = 30.44;

/// Narrowest month-mode bar, in percent of the grid width.
pub const MIN_MONTH_BAR_WIDTH: f64 = 1.5;

/// Horizontal placement of a bar, in percent of the grid width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarPosition {
    left: f64,
    width: f64,
}

impl BarPosition {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Offset of the bar's left edge from the grid start.
    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Offset of the bar's right edge from the grid start.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Compute where an interval's bar sits within the grid.
///
/// # Arguments
///
/// * `interval_start` / `interval_end` - Interval bounds as calendar dates
/// * `range_start` - First date of the visible range
/// * `range_duration_ms` - Length of the visible range in milliseconds
/// * `granularity` - Current zoom; selects linear or month-grid layout
/// * `columns` - The generated columns of the visible range
///
/// # Errors
///
/// Returns `TimelineError::EmptyRange` in linear mode if `range_duration_ms <= 0`.
/// Returns `TimelineError::NoColumns` in month mode if `columns` is empty.
pub fn calculate_bar_position(
    interval_start: CalendarDate,
    interval_end: CalendarDate,
    range_start: CalendarDate,
    range_duration_ms: i64,
    granularity: Granularity,
    columns: &[Column],
) -> TimelineResult<BarPosition> {
    let position = match granularity.layout_mode() {
        LayoutMode::Linear => {
            linear_position(interval_start, interval_end, range_start, range_duration_ms)?
        }
        LayoutMode::MonthGrid => {
            month_grid_position(interval_start, interval_end, range_start, columns.len())?
        }
    };
    trace!(
        "Bar {}..{} at {} zoom: left={:.3}% width={:.3}%",
        interval_start,
        interval_end,
        granularity,
        position.left,
        position.width
    );
    Ok(position)
}

fn linear_position(
    interval_start: CalendarDate,
    interval_end: CalendarDate,
    range_start: CalendarDate,
    range_duration_ms: i64,
) -> TimelineResult<BarPosition> {
    if range_duration_ms <= 0 {
        return Err(TimelineError::EmptyRange {
            duration_ms: range_duration_ms,
        });
    }
    let duration = range_duration_ms as f64;
    let offset_ms = date::days_between(range_start, interval_start) * MS_PER_DAY;
    let length_ms = date::days_between(interval_start, interval_end) * MS_PER_DAY;

    Ok(BarPosition::new(
        offset_ms as f64 / duration * 100.0,
        length_ms as f64 / duration * 100.0,
    ))
}

fn month_grid_position(
    interval_start: CalendarDate,
    interval_end: CalendarDate,
    range_start: CalendarDate,
    column_count: usize,
) -> TimelineResult<BarPosition> {
    if column_count == 0 {
        return Err(TimelineError::NoColumns);
    }
    let column_count = column_count as f64;

    let month_index = date::months_between(range_start, interval_start) as f64;
    let day_offset = f64::from(interval_start.day() - 1);
    let fraction = day_offset / f64::from(date::days_in_month(interval_start));
    let left = (month_index + fraction) / column_count * 100.0;

    let duration_days = date::days_between(interval_start, interval_end) as f64;
    let width = duration_days / (column_count * AVERAGE_MONTH_DAYS) * 100.0;

    Ok(BarPosition::new(left, width.max(MIN_MONTH_BAR_WIDTH)))
}
