// SPDX-License-Identifier: Apache-2.0

//! Date selectability and the fixed time-slot grid.
//!
//! Both are pure functions of the calendar and "today"; neither consults the
//! ledger. A selectable date can still be fully booked, and a slot on the grid
//! can still be taken. Occupancy is only known to the store.

use chrono::{Datelike, NaiveDate, Weekday};
use clinic_booking_core::{Error, Result};
use serde::Serialize;

use crate::booking::{AppointmentDate, AppointmentTime};

/// Day of the week on which the clinic takes no appointments.
pub const REST_DAY: Weekday = Weekday::Sun;

pub const FIRST_SLOT_MINUTES: u16 = 9 * 60;
pub const LAST_SLOT_MINUTES: u16 = 18 * 60;
pub const SLOT_INTERVAL_MINUTES: u16 = 30;

#[must_use]
pub fn is_selectable(date: AppointmentDate, today: NaiveDate) -> bool {
    date.naive() >= today && date.weekday() != REST_DAY
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: AppointmentDate,
    pub is_today: bool,
    pub is_past: bool,
    pub selectable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

/// One month laid out for a Monday-first grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st in a Monday-first week row.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
    /// Targets for the month navigation buttons.
    pub previous: MonthRef,
    pub next: MonthRef,
}

pub fn month_days(year: i32, month: u32, today: NaiveDate) -> Result<MonthCalendar> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::invalid_field("month", "expected year and month 1-12"))?;
    let days = first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|d| {
            let date = AppointmentDate::from_naive(d);
            CalendarDay {
                date,
                is_today: d == today,
                is_past: d < today,
                selectable: is_selectable(date, today),
            }
        })
        .collect();
    let (prev_year, prev_month) = shift_month(year, month, -1)?;
    let (next_year, next_month) = shift_month(year, month, 1)?;
    Ok(MonthCalendar {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_monday(),
        days,
        previous: MonthRef {
            year: prev_year,
            month: prev_month,
        },
        next: MonthRef {
            year: next_year,
            month: next_month,
        },
    })
}

/// Shifts a (year, month) pair by `delta` months, wrapping across years.
pub fn shift_month(year: i32, month: u32, delta: i32) -> Result<(i32, u32)> {
    let month0 = month
        .checked_sub(1)
        .filter(|m| *m < 12)
        .ok_or_else(|| Error::invalid_field("month", "expected 1-12"))?;
    let index = i64::from(year) * 12 + i64::from(month0) + i64::from(delta);
    let year = i32::try_from(index.div_euclid(12))
        .map_err(|_| Error::invalid_field("year", "outside the supported range"))?;
    let month = u32::try_from(index.rem_euclid(12))
        .map_err(|_| Error::invalid_field("month", "expected 1-12"))?;
    Ok((year, month + 1))
}

/// The fixed slot grid: 09:00 through 18:00 inclusive, every 30 minutes.
#[must_use]
pub fn time_slots() -> Vec<AppointmentTime> {
    (FIRST_SLOT_MINUTES..=LAST_SLOT_MINUTES)
        .step_by(usize::from(SLOT_INTERVAL_MINUTES))
        .filter_map(|m| AppointmentTime::from_minutes(m).ok())
        .collect()
}

#[must_use]
pub fn is_grid_slot(time: AppointmentTime) -> bool {
    let m = time.minutes_since_midnight();
    (FIRST_SLOT_MINUTES..=LAST_SLOT_MINUTES).contains(&m)
        && (m - FIRST_SLOT_MINUTES) % SLOT_INTERVAL_MINUTES == 0
}
