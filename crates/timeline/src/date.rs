//! Calendar date helpers shared by the generator and the layout calculator.
//!
//! All engine arithmetic happens on whole days. Timestamps are truncated to
//! their calendar date on the way in so intraday or timezone noise never
//! shifts a bar by a day.

use crate::error::{TimelineError, TimelineResult};
use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, TimeZone};

/// A date truncated to local midnight.
pub type CalendarDate = NaiveDate;

/// Milliseconds in one calendar day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Truncate a naive timestamp to its calendar date.
pub fn calendar_date(timestamp: &NaiveDateTime) -> CalendarDate {
    timestamp.date()
}

/// Truncate a zoned timestamp to the local calendar date it falls on.
pub fn local_calendar_date<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> CalendarDate {
    timestamp.with_timezone(&Local).date_naive()
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar date.
///
/// Timestamps keep the date as written and drop the time of day, so
/// `2024-03-01T23:30:00+02:00` is March 1st.
pub fn parse_calendar_date(input: &str) -> TimelineResult<CalendarDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(calendar_date(&timestamp));
    }
    Err(TimelineError::InvalidDate(input.to_string()))
}

/// Number of days (28-31) in the month containing `date`.
pub fn days_in_month(date: CalendarDate) -> u32 {
    let first = start_of_month(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        // December of the last representable year
        None => 31,
    }
}

/// Whole calendar months from `from`'s month to `to`'s month.
///
/// Day of month is ignored: Jan 31 to Feb 1 is one month.
pub fn months_between(from: CalendarDate, to: CalendarDate) -> i64 {
    let years = i64::from(to.year()) - i64::from(from.year());
    let months = i64::from(to.month()) - i64::from(from.month());
    years * 12 + months
}

/// Whole days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: CalendarDate, to: CalendarDate) -> i64 {
    (to - from).num_days()
}

/// Shift a date by a signed number of days.
pub fn shift_days(date: CalendarDate, days: i64) -> Option<CalendarDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}

/// Shift a date by a signed number of calendar months.
///
/// The day of month is clamped to the length of the target month, so
/// Jan 31 + 1 month is the last day of February.
pub fn shift_months(date: CalendarDate, months: i64) -> Option<CalendarDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

/// Monday of the ISO week containing `date`.
pub fn start_of_week(date: CalendarDate) -> CalendarDate {
    let offset = i64::from(date.weekday().num_days_from_monday());
    shift_days(date, -offset).unwrap_or(date)
}

/// First day of the month containing `date`.
pub fn start_of_month(date: CalendarDate) -> CalendarDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(d(2024, 1, 16)), 31);
        assert_eq!(days_in_month(d(2024, 2, 1)), 29);
        assert_eq!(days_in_month(d(2023, 2, 28)), 28);
        assert_eq!(days_in_month(d(2024, 4, 30)), 30);
        assert_eq!(days_in_month(d(2024, 12, 31)), 31);
    }

    #[test]
    fn test_months_between_ignores_day_of_month() {
        assert_eq!(months_between(d(2024, 1, 31), d(2024, 2, 1)), 1);
        assert_eq!(months_between(d(2024, 1, 1), d(2024, 1, 31)), 0);
        assert_eq!(months_between(d(2023, 11, 15), d(2025, 2, 1)), 15);
        assert_eq!(months_between(d(2024, 3, 1), d(2024, 1, 1)), -2);
    }

    #[test]
    fn test_shift_days_both_directions() {
        assert_eq!(shift_days(d(2024, 2, 28), 2), Some(d(2024, 3, 1)));
        assert_eq!(shift_days(d(2024, 3, 1), -1), Some(d(2024, 2, 29)));
        assert_eq!(shift_days(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn test_shift_months_clamps_to_month_end() {
        assert_eq!(shift_months(d(2024, 1, 31), 1), Some(d(2024, 2, 29)));
        assert_eq!(shift_months(d(2024, 2, 29), -1), Some(d(2024, 1, 29)));
        assert_eq!(shift_months(d(2024, 3, 31), -1), Some(d(2024, 2, 29)));
        assert_eq!(shift_months(d(2024, 11, 15), 3), Some(d(2025, 2, 15)));
    }

    #[test]
    fn test_start_of_week_is_monday() {
        // 2024-03-14 is a Thursday
        assert_eq!(start_of_week(d(2024, 3, 14)), d(2024, 3, 11));
        assert_eq!(start_of_week(d(2024, 3, 11)), d(2024, 3, 11));
        assert_eq!(start_of_week(d(2024, 3, 17)), d(2024, 3, 11));
    }

    #[test]
    fn test_start_of_month() {
        assert_eq!(start_of_month(d(2024, 7, 19)), d(2024, 7, 1));
    }

    #[test]
    fn test_calendar_date_discards_time_of_day() {
        let late = d(2024, 5, 6).and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        assert_eq!(calendar_date(&late), d(2024, 5, 6));
    }

    #[test]
    fn test_local_calendar_date_uses_local_zone() {
        let now = Utc::now();
        assert_eq!(
            local_calendar_date(&now),
            now.with_timezone(&Local).date_naive()
        );
    }

    #[test]
    fn test_parse_calendar_date_formats() {
        assert_eq!(parse_calendar_date("2024-03-01").unwrap(), d(2024, 3, 1));
        assert_eq!(
            parse_calendar_date("2024-03-01T23:30:00+02:00").unwrap(),
            d(2024, 3, 1)
        );
        assert_eq!(
            parse_calendar_date(" 2024-03-01T08:00:00 ").unwrap(),
            d(2024, 3, 1)
        );
    }

    #[test]
    fn test_parse_calendar_date_rejects_garbage() {
        let err = parse_calendar_date("03/01/2024").unwrap_err();
        assert_eq!(err, TimelineError::InvalidDate("03/01/2024".to_string()));
    }
}
