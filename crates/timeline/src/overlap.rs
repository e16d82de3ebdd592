//! Scheduling conflict detection between intervals on the same work center.
//!
//! Intervals are half-open `[start, end)`: an interval ending on the day
//! another starts does not conflict with it.

use crate::date::CalendarDate;
use tracing::debug;

/// Anything scheduled on a resource over a span of calendar dates.
pub trait Interval {
    /// Identifier of this interval.
    fn interval_id(&self) -> &str;
    /// Identifier of the resource (work center) it occupies.
    fn resource_id(&self) -> &str;
    fn start_date(&self) -> CalendarDate;
    fn end_date(&self) -> CalendarDate;
}

impl<T: Interval + ?Sized> Interval for &T {
    fn interval_id(&self) -> &str {
        (**self).interval_id()
    }

    fn resource_id(&self) -> &str {
        (**self).resource_id()
    }

    fn start_date(&self) -> CalendarDate {
        (**self).start_date()
    }

    fn end_date(&self) -> CalendarDate {
        (**self).end_date()
    }
}

/// Read access to the intervals assigned to a resource.
pub trait IntervalSource {
    type Item: Interval;
    type Error;

    /// All intervals currently assigned to `resource_id`.
    fn intervals_for(&self, resource_id: &str) -> Result<Vec<Self::Item>, Self::Error>;
}

impl<I: Interval + Clone> IntervalSource for [I] {
    type Item = I;
    type Error = std::convert::Infallible;

    fn intervals_for(&self, resource_id: &str) -> Result<Vec<I>, Self::Error> {
        Ok(self
            .iter()
            .filter(|interval| interval.resource_id() == resource_id)
            .cloned()
            .collect())
    }
}

/// Half-open intersection test between `[a_start, a_end)` and `[b_start, b_end)`.
pub fn intervals_overlap(
    a_start: CalendarDate,
    a_end: CalendarDate,
    b_start: CalendarDate,
    b_end: CalendarDate,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// First interval that intersects the candidate span, skipping `exclude_id`.
pub fn find_overlap<I, It>(
    intervals: It,
    candidate_start: CalendarDate,
    candidate_end: CalendarDate,
    exclude_id: Option<&str>,
) -> Option<I>
where
    I: Interval,
    It: IntoIterator<Item = I>,
{
    intervals
        .into_iter()
        .filter(|existing| exclude_id != Some(existing.interval_id()))
        .find(|existing| {
            intervals_overlap(
                candidate_start,
                candidate_end,
                existing.start_date(),
                existing.end_date(),
            )
        })
}

/// Whether the candidate span conflicts with any interval on `resource_id`.
///
/// Pass the id of the interval being edited as `exclude_id` so it does not
/// conflict with its own previous bounds.
///
/// # Errors
///
/// Propagates the source's error if fetching the resource's intervals fails.
pub fn has_overlap<S>(
    source: &S,
    resource_id: &str,
    candidate_start: CalendarDate,
    candidate_end: CalendarDate,
    exclude_id: Option<&str>,
) -> Result<bool, S::Error>
where
    S: IntervalSource + ?Sized,
{
    let existing = source.intervals_for(resource_id)?;
    let conflict = find_overlap(existing.iter(), candidate_start, candidate_end, exclude_id);

    match conflict {
        Some(interval) => {
            debug!(
                "Candidate {}..{} on {} conflicts with {}",
                candidate_start,
                candidate_end,
                resource_id,
                interval.interval_id()
            );
            Ok(true)
        }
        None => Ok(false),
    }
}
