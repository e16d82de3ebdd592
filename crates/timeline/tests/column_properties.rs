//! Property tests for column generation and range extension.

use chrono::NaiveDate;
use proptest::prelude::*;
use schedgrid_timeline::{
    FixedClock, Granularity, extend_left, extend_right, generate_columns, initial_range,
};

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2060, 1u32..=12, 1u32..=31).prop_map(|(year, month, day)| {
        NaiveDate::from_ymd_opt(year, month, day)
            .or_else(|| NaiveDate::from_ymd_opt(year, month, 28))
            .unwrap()
    })
}

fn granularity_strategy() -> impl Strategy<Value = Granularity> {
    prop_oneof![
        Just(Granularity::Day),
        Just(Granularity::Week),
        Just(Granularity::Month),
    ]
}

proptest! {
    #[test]
    fn columns_step_by_exactly_one_unit(
        start in date_strategy(),
        span_days in 0i64..800,
        granularity in granularity_strategy(),
        today in date_strategy(),
    ) {
        let end = start + chrono::Duration::days(span_days);
        let columns = generate_columns(start, end, granularity, &FixedClock(today)).unwrap();

        prop_assert!(!columns.is_empty());
        prop_assert_eq!(columns[0].date(), start);
        for (index, column) in columns.iter().enumerate() {
            prop_assert_eq!(column.date(), granularity.step(start, index as i64).unwrap());
        }
        for pair in columns.windows(2) {
            prop_assert!(pair[0].date() < pair[1].date());
        }

        let last = columns.last().unwrap().date();
        prop_assert!(last <= end);
        // the next anchor is stepped from the origin, which differs from `last + 1`
        // only when a month column was clamped
        let next = granularity.step(start, columns.len() as i64).unwrap();
        prop_assert!(end < next);
    }

    #[test]
    fn at_most_one_column_is_current(
        start in date_strategy(),
        span_days in 0i64..800,
        granularity in granularity_strategy(),
        today in date_strategy(),
    ) {
        let end = start + chrono::Duration::days(span_days);
        let columns = generate_columns(start, end, granularity, &FixedClock(today)).unwrap();
        let current = columns.iter().filter(|c| c.is_current_period()).count();
        prop_assert!(current <= 1);
    }

    #[test]
    fn day_and_week_extension_round_trips(
        date in date_strategy(),
        count in 0u32..500,
        week in any::<bool>(),
    ) {
        let granularity = if week { Granularity::Week } else { Granularity::Day };
        let forward = extend_right(date, granularity, count).unwrap();
        prop_assert_eq!(extend_left(forward, granularity, count).unwrap(), date);
    }

    #[test]
    fn initial_range_strictly_contains_today(
        today in date_strategy(),
        granularity in granularity_strategy(),
    ) {
        let range = initial_range(granularity, &FixedClock(today)).unwrap();
        prop_assert!(range.start() < today && today < range.end());

        let columns = generate_columns(range.start(), range.end(), granularity, &FixedClock(today))
            .unwrap();
        prop_assert_eq!(columns.last().unwrap().date(), range.end());
        prop_assert_eq!(columns.iter().filter(|c| c.is_current_period()).count(), 1);
    }
}
