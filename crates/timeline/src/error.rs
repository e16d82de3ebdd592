use chrono::NaiveDate;
use thiserror::Error;

/// Error types for timeline computations
///
/// The engine has no recoverable failures of its own. Every variant signals
/// input the caller should have rejected before calling in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// A range whose start falls after its end
    #[error("Invalid range: start {start} is after end {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    /// A zero or negative range duration used as a layout denominator
    #[error("Range duration must be positive, got {duration_ms}ms")]
    EmptyRange { duration_ms: i64 },

    /// Month layout was asked to position a bar against no columns
    #[error("Cannot position a bar against an empty column sequence")]
    NoColumns,

    /// Stepping a date left the representable calendar
    #[error("Date {date} cannot be stepped by {steps} {unit}(s)")]
    DateOverflow {
        date: NaiveDate,
        steps: i64,
        unit: &'static str,
    },

    /// A granularity name that is not day, week or month
    #[error("Unknown granularity '{0}'. Valid values: day, week, month")]
    UnknownGranularity(String),

    /// A date string that is neither YYYY-MM-DD nor RFC 3339
    #[error("Invalid date '{0}'. Expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate(String),
}

/// Result type alias for timeline operations
pub type TimelineResult<T> = Result<T, TimelineError>;
