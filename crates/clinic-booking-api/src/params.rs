// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use clinic_booking_core::PractitionerId;
use clinic_booking_model::{AppointmentDate, AppointmentTime, Slot};

use crate::ApiError;

fn required<'a>(query: &'a BTreeMap<String, String>, name: &str) -> Result<&'a str, ApiError> {
    query
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::validation_failed(name, "missing query parameter"))
}

fn doctor_param(query: &BTreeMap<String, String>) -> Result<PractitionerId, ApiError> {
    Ok(required(query, "doctor_id")?.parse::<PractitionerId>()?)
}

/// `doctor_id`, `date` and `time` are all required.
pub fn parse_availability_params(query: &BTreeMap<String, String>) -> Result<Slot, ApiError> {
    Ok(Slot {
        practitioner_id: doctor_param(query)?,
        appointment_date: AppointmentDate::parse(required(query, "date")?)?,
        appointment_time: AppointmentTime::parse(required(query, "time")?)?,
    })
}

pub fn parse_slot_grid_params(
    query: &BTreeMap<String, String>,
) -> Result<(PractitionerId, AppointmentDate), ApiError> {
    Ok((
        doctor_param(query)?,
        AppointmentDate::parse(required(query, "date")?)?,
    ))
}

/// Missing `year`/`month` default to the month containing `today`.
pub fn parse_calendar_params(
    query: &BTreeMap<String, String>,
    today: NaiveDate,
) -> Result<(i32, u32), ApiError> {
    let year = match query.get("year") {
        None => today.year(),
        Some(raw) => raw
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|y| (1..=9999).contains(y))
            .ok_or_else(|| ApiError::validation_failed("year", "expected 1..=9999"))?,
    };
    let month = match query.get("month") {
        None => today.month(),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| ApiError::validation_failed("month", "expected 1..=12"))?,
    };
    Ok((year, month))
}
