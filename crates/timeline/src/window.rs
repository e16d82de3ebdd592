//! Zoom, range and columns of a timeline view, kept consistent together.
//!
//! Extending the window only generates the columns being added. Columns
//! already on screen keep their anchors, so a caller tracking a scroll
//! offset only has to shift it by the number of columns prepended.
//!
//! Every anchor is the window origin stepped a signed number of units, the
//! same rule `generate_columns` follows, so extended month columns never
//! drift after a short month.

use crate::clock::{Clock, SystemClock};
use crate::columns::{Column, current_column_index, generate_columns};
use crate::date::CalendarDate;
use crate::error::TimelineResult;
use crate::granularity::Granularity;
use crate::layout::{BarPosition, calculate_bar_position};
use crate::range::{VisibleRange, extension_count, initial_range};
use tracing::debug;

/// Timeline view state: granularity, visible range and its columns.
pub struct TimelineWindow {
    granularity: Granularity,
    range: VisibleRange,
    columns: Vec<Column>,
    /// Date column offsets are counted from.
    origin: CalendarDate,
    /// Columns prepended before the origin.
    leading: i64,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for TimelineWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineWindow")
            .field("granularity", &self.granularity)
            .field("range", &self.range)
            .field("columns", &self.columns.len())
            .finish()
    }
}

impl TimelineWindow {
    /// Open a window on the default range around today.
    pub fn new(granularity: Granularity, clock: Box<dyn Clock>) -> TimelineResult<Self> {
        let range = initial_range(granularity, clock.as_ref())?;
        Self::build(granularity, range, clock)
    }

    /// Open a window on the system clock's default range.
    pub fn today(granularity: Granularity) -> TimelineResult<Self> {
        Self::new(granularity, Box::new(SystemClock))
    }

    /// Open a window on an explicit range.
    ///
    /// # Errors
    ///
    /// Returns `TimelineError::InvertedRange` if `start > end`.
    pub fn with_range(
        granularity: Granularity,
        start: CalendarDate,
        end: CalendarDate,
        clock: Box<dyn Clock>,
    ) -> TimelineResult<Self> {
        let range = VisibleRange::new(start, end)?;
        Self::build(granularity, range, clock)
    }

    fn build(
        granularity: Granularity,
        range: VisibleRange,
        clock: Box<dyn Clock>,
    ) -> TimelineResult<Self> {
        let columns = generate_columns(range.start(), range.end(), granularity, clock.as_ref())?;
        Ok(Self {
            granularity,
            range,
            columns,
            origin: range.start(),
            leading: 0,
            clock,
        })
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn range(&self) -> VisibleRange {
        self.range
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Day after the last column's period ends.
    ///
    /// The grid shows `[range.start(), period_end())`; at week and month zoom
    /// this runs past `range.end()` to the end of the final column.
    pub fn period_end(&self) -> TimelineResult<CalendarDate> {
        let last = self
            .columns
            .last()
            .map(Column::date)
            .unwrap_or(self.range.end());
        self.granularity.step(last, 1)
    }

    /// Index of the column containing today, if visible.
    pub fn current_column_index(&self) -> Option<usize> {
        current_column_index(&self.columns)
    }

    /// Switch zoom level, resetting to that level's default range.
    pub fn set_granularity(&mut self, granularity: Granularity) -> TimelineResult<()> {
        let range = initial_range(granularity, self.clock.as_ref())?;
        let columns = generate_columns(range.start(), range.end(), granularity, self.clock.as_ref())?;
        debug!("Zoom changed {} -> {}", self.granularity, granularity);
        self.granularity = granularity;
        self.range = range;
        self.columns = columns;
        self.origin = range.start();
        self.leading = 0;
        Ok(())
    }

    /// Load one extension chunk before the range.
    ///
    /// Returns the number of columns prepended.
    pub fn extend_left(&mut self) -> TimelineResult<usize> {
        let count = i64::from(extension_count(self.granularity));
        let today = self.clock.today();

        let mut added = Vec::with_capacity(count as usize);
        for offset in (self.leading + 1..=self.leading + count).rev() {
            let date = self.granularity.step(self.origin, -offset)?;
            added.push(Column::new(date, self.granularity, today));
        }

        if let Some(first) = added.first() {
            self.range = VisibleRange::new(first.date(), self.range.end())?;
        }
        self.leading += count;
        let prepended = added.len();
        added.append(&mut self.columns);
        self.columns = added;
        debug!("Prepended {} columns, range now {:?}", prepended, self.range);
        Ok(prepended)
    }

    /// Load one extension chunk after the range.
    ///
    /// Returns the number of columns appended.
    pub fn extend_right(&mut self) -> TimelineResult<usize> {
        let count = i64::from(extension_count(self.granularity));
        let next = self.columns.len() as i64 - self.leading;
        let today = self.clock.today();

        let mut added = Vec::with_capacity(count as usize);
        for offset in next..next + count {
            let date = self.granularity.step(self.origin, offset)?;
            added.push(Column::new(date, self.granularity, today));
        }

        if let Some(last) = added.last() {
            self.range = VisibleRange::new(self.range.start(), last.date())?;
        }
        let appended = added.len();
        self.columns.extend(added);
        debug!("Appended {} columns, range now {:?}", appended, self.range);
        Ok(appended)
    }

    /// Position a bar for an interval within this window.
    pub fn bar_position(
        &self,
        interval_start: CalendarDate,
        interval_end: CalendarDate,
    ) -> TimelineResult<BarPosition> {
        calculate_bar_position(
            interval_start,
            interval_end,
            self.range.start(),
            self.range.duration_ms(),
            self.granularity,
            &self.columns,
        )
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn clock(date: NaiveDate) -> Box<dyn Clock> {
        Box::new(FixedClock(date))
    }

    #[test]
    fn test_new_month_window_has_current_column() {
        let window = TimelineWindow::new(Granularity::Month, clock(d(2024, 3, 20))).unwrap();
        assert_eq!(window.columns().len(), 25);
        assert_eq!(window.current_column_index(), Some(12));
        assert_eq!(window.columns()[12].label(), "Mar 2024");
    }

    #[test]
    fn test_extend_left_prepends_chunk_and_keeps_existing_columns() {
        let mut window = TimelineWindow::new(Granularity::Month, clock(d(2024, 3, 20))).unwrap();
        let before: Vec<Column> = window.columns().to_vec();

        let added = window.extend_left().unwrap();

        assert_eq!(added, 6);
        assert_eq!(&window.columns()[added..], before.as_slice());
        assert_eq!(window.columns()[0].date(), d(2022, 9, 1));
        assert_eq!(window.range().start(), d(2022, 9, 1));
        assert_eq!(window.current_column_index(), Some(18));
    }

    #[test]
    fn test_extend_right_appends_chunk() {
        let mut window = TimelineWindow::with_range(
            Granularity::Day,
            d(2024, 1, 1),
            d(2024, 1, 10),
            clock(d(2024, 1, 5)),
        )
        .unwrap();

        let added = window.extend_right().unwrap();

        assert_eq!(added, 30);
        assert_eq!(window.columns().len(), 40);
        assert_eq!(window.range().end(), d(2024, 2, 9));
        assert_eq!(window.columns().last().unwrap().date(), d(2024, 2, 9));
    }

    #[test]
    fn test_extended_columns_match_fresh_generation() {
        let mut window = TimelineWindow::with_range(
            Granularity::Week,
            d(2024, 1, 1),
            d(2024, 3, 25),
            clock(d(2024, 2, 14)),
        )
        .unwrap();
        window.extend_left().unwrap();
        window.extend_right().unwrap();

        let range = window.range();
        let fresh = generate_columns(
            range.start(),
            range.end(),
            Granularity::Week,
            &FixedClock(d(2024, 2, 14)),
        )
        .unwrap();
        assert_eq!(window.columns(), fresh.as_slice());
    }

    #[test]
    fn test_month_end_origin_extends_without_drift() {
        let mut window = TimelineWindow::with_range(
            Granularity::Month,
            d(2024, 1, 31),
            d(2024, 2, 29),
            clock(d(2024, 2, 14)),
        )
        .unwrap();
        window.extend_right().unwrap();

        let range = window.range();
        assert_eq!(range.end(), d(2024, 8, 31));
        let fresh = generate_columns(
            range.start(),
            range.end(),
            Granularity::Month,
            &FixedClock(d(2024, 2, 14)),
        )
        .unwrap();
        assert_eq!(window.columns(), fresh.as_slice());
        assert_eq!(window.columns()[2].date(), d(2024, 3, 31));
        assert_eq!(window.columns()[3].date(), d(2024, 4, 30));
    }

    #[test]
    fn test_month_end_origin_anchors_survive_both_extensions() {
        let origin = d(2024, 3, 31);
        let mut window = TimelineWindow::with_range(
            Granularity::Month,
            origin,
            d(2024, 4, 30),
            clock(d(2024, 3, 14)),
        )
        .unwrap();
        window.extend_left().unwrap();
        window.extend_right().unwrap();
        window.extend_left().unwrap();

        let dates: Vec<NaiveDate> = window.columns().iter().map(Column::date).collect();
        assert_eq!(dates.len(), 20);
        for (index, date) in dates.iter().enumerate() {
            let offset = index as i64 - 12;
            assert_eq!(*date, Granularity::Month.step(origin, offset).unwrap());
        }
        assert_eq!(dates[12], d(2024, 3, 31));
        assert_eq!(dates[13], d(2024, 4, 30));
        assert_eq!(dates[14], d(2024, 5, 31));
        assert_eq!(window.range().start(), dates[0]);
        assert_eq!(window.range().end(), dates[19]);
    }

    #[test]
    fn test_period_end_closes_the_last_column() {
        let month = TimelineWindow::with_range(
            Granularity::Month,
            d(2024, 1, 1),
            d(2024, 6, 1),
            clock(d(2024, 3, 1)),
        )
        .unwrap();
        assert_eq!(month.period_end().unwrap(), d(2024, 7, 1));

        let week = TimelineWindow::with_range(
            Granularity::Week,
            d(2024, 1, 1),
            d(2024, 1, 17),
            clock(d(2024, 1, 1)),
        )
        .unwrap();
        assert_eq!(week.period_end().unwrap(), d(2024, 1, 22));

        let day = TimelineWindow::with_range(
            Granularity::Day,
            d(2024, 1, 1),
            d(2024, 1, 10),
            clock(d(2024, 1, 1)),
        )
        .unwrap();
        assert_eq!(day.period_end().unwrap(), d(2024, 1, 11));
    }

    #[test]
    fn test_set_granularity_regenerates() {
        let mut window = TimelineWindow::new(Granularity::Month, clock(d(2024, 3, 14))).unwrap();
        window.set_granularity(Granularity::Week).unwrap();

        assert_eq!(window.granularity(), Granularity::Week);
        assert_eq!(window.range().start(), d(2023, 12, 11));
        assert_eq!(window.columns().len(), 27);
        assert_eq!(window.current_column_index(), Some(13));
    }

    #[test]
    fn test_bar_position_uses_window_range() {
        let window = TimelineWindow::with_range(
            Granularity::Day,
            d(2024, 1, 1),
            d(2024, 1, 11),
            clock(d(2024, 1, 1)),
        )
        .unwrap();
        let bar = window.bar_position(d(2024, 1, 3), d(2024, 1, 5)).unwrap();
        assert_relative_eq!(bar.left(), 20.0);
        assert_relative_eq!(bar.width(), 20.0);
    }

    #[test]
    fn test_single_day_window_cannot_position_linear_bars() {
        let window = TimelineWindow::with_range(
            Granularity::Day,
            d(2024, 1, 1),
            d(2024, 1, 1),
            clock(d(2024, 1, 1)),
        )
        .unwrap();
        assert!(window.bar_position(d(2024, 1, 1), d(2024, 1, 2)).is_err());
    }

    #[test]
    fn test_debug_summarizes_columns() {
        let window = TimelineWindow::with_range(
            Granularity::Day,
            d(2024, 1, 1),
            d(2024, 1, 3),
            clock(d(2024, 1, 1)),
        )
        .unwrap();
        let debug = format!("{:?}", window);
        assert!(debug.contains("TimelineWindow") && debug.contains("columns: 3"));
    }
}
