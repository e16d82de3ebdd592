//! Timeline coordinate and range engine for Schedgrid
//!
//! Maps calendar dates onto a zoomable grid of columns, positions work order
//! intervals as percentage bars within that grid, grows the visible range in
//! chunks for infinite scrolling, and detects scheduling conflicts between
//! intervals that share a work center.
//!
//! Every operation is a pure function of its inputs. The only ambient input
//! is "today", which is read through a [`Clock`] so callers and tests can pin
//! it.

pub mod clock;
pub mod columns;
pub mod date;
pub mod error;
pub mod granularity;
pub mod layout;
pub mod overlap;
pub mod range;
pub mod window;

pub use clock::{Clock, FixedClock, SystemClock};
pub use columns::{Column, current_column_index, generate_columns};
pub use date::{CalendarDate, parse_calendar_date};
pub use error::{TimelineError, TimelineResult};
pub use granularity::{Granularity, LayoutMode};
pub use layout::{BarPosition, calculate_bar_position};
pub use overlap::{Interval, IntervalSource, find_overlap, has_overlap, intervals_overlap};
pub use range::{VisibleRange, extend_left, extend_right, extension_count, initial_range};
pub use window::TimelineWindow;
