//! Visible range and the primitives that grow it.

use crate::clock::Clock;
use crate::date::{CalendarDate, MS_PER_DAY};
use crate::error::{TimelineError, TimelineResult};
use crate::granularity::Granularity;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The date span currently laid out on the grid.
///
/// Invariant: `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisibleRange {
    start: CalendarDate,
    end: CalendarDate,
}

impl VisibleRange {
    /// Create a range.
    ///
    /// # Errors
    ///
    /// Returns `TimelineError::InvertedRange` if `start > end`.
    pub fn new(start: CalendarDate, end: CalendarDate) -> TimelineResult<Self> {
        if start > end {
            return Err(TimelineError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> CalendarDate {
        self.start
    }

    pub fn end(&self) -> CalendarDate {
        self.end
    }

    /// Length of the range in milliseconds (`end - start`).
    pub fn duration_ms(&self) -> i64 {
        (self.end - self.start).num_days() * MS_PER_DAY
    }

    /// Whether `date` lies within `[start, end]`.
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Step a range start backward by `count` granularity units.
///
/// # Errors
///
/// Returns `TimelineError::DateOverflow` if the new start is not representable.
pub fn extend_left(
    current_start: CalendarDate,
    granularity: Granularity,
    count: u32,
) -> TimelineResult<CalendarDate> {
    let start = granularity.step(current_start, -i64::from(count))?;
    debug!(
        "Extended start {} by {} {}(s) to {}",
        current_start, count, granularity, start
    );
    Ok(start)
}

/// Step a range end forward by `count` granularity units.
///
/// # Errors
///
/// Returns `TimelineError::DateOverflow` if the new end is not representable.
pub fn extend_right(
    current_end: CalendarDate,
    granularity: Granularity,
    count: u32,
) -> TimelineResult<CalendarDate> {
    let end = granularity.step(current_end, i64::from(count))?;
    debug!(
        "Extended end {} by {} {}(s) to {}",
        current_end, count, granularity, end
    );
    Ok(end)
}

/// Default viewport around today for a granularity.
///
/// The range starts and ends on period anchors (Monday for weeks, the 1st for
/// months) so that column generation ends exactly on `end`, and today always
/// lies strictly inside it.
pub fn initial_range(granularity: Granularity, clock: &dyn Clock) -> TimelineResult<VisibleRange> {
    let anchor = granularity.align(clock.today());
    let (back, forward) = granularity.initial_span();
    let start = extend_left(anchor, granularity, back)?;
    let end = extend_right(anchor, granularity, forward)?;
    VisibleRange::new(start, end)
}

/// Units to load per infinite-scroll trigger.
pub fn extension_count(granularity: Granularity) -> u32 {
    granularity.extension_count()
}
