use chrono::{Datelike, Duration, NaiveDate, Weekday};
use clinic_booking_model::calendar::{is_selectable, month_days};
use clinic_booking_model::AppointmentDate;
use proptest::prelude::*;
use proptest::test_runner::Config;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("base date")
}

proptest! {
    #![proptest_config(Config::with_cases(256))]
    #[test]
    fn past_dates_and_rest_days_are_never_selectable(
        today_offset in 0_i64..3000,
        delta in -400_i64..400,
    ) {
        let today = base() + Duration::days(today_offset);
        let date = today + Duration::days(delta);
        let selectable = is_selectable(AppointmentDate::from_naive(date), today);
        if delta < 0 || date.weekday() == Weekday::Sun {
            prop_assert!(!selectable);
        } else {
            prop_assert!(selectable);
        }
    }

    #[test]
    fn month_grid_covers_every_day_once(
        year in 2000_i32..2100,
        month in 1_u32..=12,
    ) {
        let cal = month_days(year, month, base()).expect("valid month");
        prop_assert!(cal.leading_blanks < 7);
        prop_assert!((28..=31).contains(&cal.days.len()));
        for (i, day) in cal.days.iter().enumerate() {
            prop_assert_eq!(day.date.naive().day() as usize, i + 1);
            prop_assert_eq!(day.date.naive().month(), month);
        }
    }
}
