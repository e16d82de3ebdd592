//! Zoom granularity and its per-granularity policy table.
//!
//! Column stepping, labels, the current-period test, the initial viewport,
//! the extension chunk size and the layout mode all vary by granularity.
//! They live together in one [`Policy`] per variant so each zoom level can be
//! read and tested in isolation.

use crate::date::{self, CalendarDate};
use crate::error::{TimelineError, TimelineResult};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Zoom level of the timeline grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One column per day
    Day,
    /// One column per week, anchored on its first day
    Week,
    /// One column per calendar month, anchored on its first day
    Month,
}

/// How bars are positioned for a granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Percentages of the total millisecond span of the range
    Linear,
    /// Month-column index plus the fraction into the starting month
    MonthGrid,
}

/// Behavior attached to one granularity.
struct Policy {
    unit: &'static str,
    step: fn(CalendarDate, i64) -> Option<CalendarDate>,
    label: fn(CalendarDate) -> String,
    contains: fn(CalendarDate, CalendarDate) -> bool,
    align: fn(CalendarDate) -> CalendarDate,
    units_back: u32,
    units_forward: u32,
    extension_count: u32,
    layout: LayoutMode,
}

static DAY: Policy = Policy {
    unit: "day",
    step: date::shift_days,
    label: day_label,
    contains: same_day,
    align: identity,
    units_back: 30,
    units_forward: 60,
    extension_count: 30,
    layout: LayoutMode::Linear,
};

static WEEK: Policy = Policy {
    unit: "week",
    step: shift_weeks,
    label: week_label,
    contains: within_week,
    align: date::start_of_week,
    units_back: 13,
    units_forward: 13,
    extension_count: 8,
    layout: LayoutMode::Linear,
};

static MONTH: Policy = Policy {
    unit: "month",
    step: date::shift_months,
    label: month_label,
    contains: same_month,
    align: date::start_of_month,
    units_back: 12,
    units_forward: 12,
    extension_count: 6,
    layout: LayoutMode::MonthGrid,
};

fn identity(date: CalendarDate) -> CalendarDate {
    date
}

fn shift_weeks(date: CalendarDate, weeks: i64) -> Option<CalendarDate> {
    date::shift_days(date, weeks.checked_mul(7)?)
}

fn day_label(date: CalendarDate) -> String {
    date.format("%b %-d").to_string()
}

fn week_label(anchor: CalendarDate) -> String {
    let last = anchor
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX);
    format!("{} - {}", anchor.format("%b %-d"), last.format("%-d"))
}

fn month_label(anchor: CalendarDate) -> String {
    anchor.format("%b %Y").to_string()
}

fn same_day(anchor: CalendarDate, today: CalendarDate) -> bool {
    anchor == today
}

fn within_week(anchor: CalendarDate, today: CalendarDate) -> bool {
    (0..=6).contains(&date::days_between(anchor, today))
}

fn same_month(anchor: CalendarDate, today: CalendarDate) -> bool {
    anchor.year() == today.year() && anchor.month() == today.month()
}

impl Granularity {
    /// All granularities from finest to coarsest
    pub const ALL: [Granularity; 3] = [Granularity::Day, Granularity::Week, Granularity::Month];

    fn policy(self) -> &'static Policy {
        match self {
            Granularity::Day => &DAY,
            Granularity::Week => &WEEK,
            Granularity::Month => &MONTH,
        }
    }

    /// Returns the string representation used on the command line and in storage
    pub fn as_str(&self) -> &'static str {
        self.policy().unit
    }

    /// Parse a granularity name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" => Some(Granularity::Day),
            "week" => Some(Granularity::Week),
            "month" => Some(Granularity::Month),
            _ => None,
        }
    }

    /// Step `date` by `count` units (negative steps go back in time).
    ///
    /// # Errors
    ///
    /// Returns `TimelineError::DateOverflow` if the result is not representable.
    pub fn step(self, date: CalendarDate, count: i64) -> TimelineResult<CalendarDate> {
        (self.policy().step)(date, count).ok_or(TimelineError::DateOverflow {
            date,
            steps: count,
            unit: self.as_str(),
        })
    }

    /// Column header for a column anchored at `anchor`.
    pub fn label(self, anchor: CalendarDate) -> String {
        (self.policy().label)(anchor)
    }

    /// Whether the period anchored at `anchor` contains `today`.
    pub fn is_current_period(self, anchor: CalendarDate, today: CalendarDate) -> bool {
        (self.policy().contains)(anchor, today)
    }

    /// Snap `date` to the anchor of the period containing it.
    pub fn align(self, date: CalendarDate) -> CalendarDate {
        (self.policy().align)(date)
    }

    /// Units shown before and after today in the initial viewport.
    pub fn initial_span(self) -> (u32, u32) {
        let policy = self.policy();
        (policy.units_back, policy.units_forward)
    }

    /// Units loaded per infinite-scroll trigger.
    pub fn extension_count(self) -> u32 {
        self.policy().extension_count
    }

    /// Bar positioning strategy for this granularity.
    pub fn layout_mode(self) -> LayoutMode {
        self.policy().layout
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Granularity::parse(s).ok_or_else(|| TimelineError::UnknownGranularity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Granularity::parse("Day"), Some(Granularity::Day));
        assert_eq!(Granularity::parse(" WEEK "), Some(Granularity::Week));
        assert_eq!(Granularity::parse("month"), Some(Granularity::Month));
        assert_eq!(Granularity::parse("quarter"), None);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "year".parse::<Granularity>().unwrap_err();
        assert_eq!(err, TimelineError::UnknownGranularity("year".to_string()));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for granularity in Granularity::ALL {
            assert_eq!(
                granularity.to_string().parse::<Granularity>().unwrap(),
                granularity
            );
        }
    }

    #[test]
    fn test_serde_uses_snake_case_names() {
        let json = serde_json::to_string(&Granularity::Month).unwrap();
        assert_eq!(json, "\"month\"");
        let parsed: Granularity = serde_json::from_str("\"week\"").unwrap();
        assert_eq!(parsed, Granularity::Week);
    }

    #[test]
    fn test_step_per_granularity() {
        let start = d(2024, 1, 31);
        assert_eq!(Granularity::Day.step(start, 1).unwrap(), d(2024, 2, 1));
        assert_eq!(Granularity::Week.step(start, 1).unwrap(), d(2024, 2, 7));
        assert_eq!(Granularity::Month.step(start, 1).unwrap(), d(2024, 2, 29));
        assert_eq!(Granularity::Week.step(start, -2).unwrap(), d(2024, 1, 17));
    }

    #[test]
    fn test_step_overflow_is_an_error() {
        let err = Granularity::Month.step(NaiveDate::MAX, 1).unwrap_err();
        assert!(matches!(
            err,
            TimelineError::DateOverflow { unit: "month", steps: 1, .. }
        ));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Granularity::Day.label(d(2024, 1, 5)), "Jan 5");
        assert_eq!(Granularity::Week.label(d(2024, 1, 1)), "Jan 1 - 7");
        assert_eq!(Granularity::Week.label(d(2024, 1, 29)), "Jan 29 - 4");
        assert_eq!(Granularity::Month.label(d(2024, 1, 1)), "Jan 2024");
    }

    #[test]
    fn test_week_current_period_spans_seven_days() {
        let monday = d(2024, 3, 11);
        assert!(Granularity::Week.is_current_period(monday, d(2024, 3, 14)));
        assert!(Granularity::Week.is_current_period(monday, monday));
        assert!(Granularity::Week.is_current_period(monday, d(2024, 3, 17)));
        assert!(!Granularity::Week.is_current_period(monday, d(2024, 3, 10)));
        assert!(!Granularity::Week.is_current_period(monday, d(2024, 3, 18)));
    }

    #[test]
    fn test_month_and_day_current_period() {
        assert!(Granularity::Month.is_current_period(d(2024, 2, 1), d(2024, 2, 29)));
        assert!(!Granularity::Month.is_current_period(d(2024, 2, 1), d(2025, 2, 1)));
        assert!(Granularity::Day.is_current_period(d(2024, 2, 1), d(2024, 2, 1)));
        assert!(!Granularity::Day.is_current_period(d(2024, 2, 1), d(2024, 2, 2)));
    }

    #[test]
    fn test_align() {
        let thursday = d(2024, 3, 14);
        assert_eq!(Granularity::Day.align(thursday), thursday);
        assert_eq!(Granularity::Week.align(thursday), d(2024, 3, 11));
        assert_eq!(Granularity::Month.align(thursday), d(2024, 3, 1));
    }

    #[test]
    fn test_extension_counts_are_positive_and_finer_loads_more() {
        for granularity in Granularity::ALL {
            assert!(granularity.extension_count() > 0);
        }
        assert!(Granularity::Day.extension_count() > Granularity::Month.extension_count());
    }

    #[test]
    fn test_layout_modes() {
        assert_eq!(Granularity::Day.layout_mode(), LayoutMode::Linear);
        assert_eq!(Granularity::Week.layout_mode(), LayoutMode::Linear);
        assert_eq!(Granularity::Month.layout_mode(), LayoutMode::MonthGrid);
    }
}
