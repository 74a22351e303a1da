// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use chrono::NaiveDate;
use clinic_booking_api::error_mapping::status_for;
use clinic_booking_api::{
    map_error, parse_availability_params, parse_calendar_params, parse_slot_grid_params,
    ApiError, ApiErrorCode, API_ERROR_CODES, API_ERROR_SCHEMA_REF,
};
use clinic_booking_core::{ConflictKind, Error, ValidationFailure};
use serde_json::json;

#[test]
fn domain_errors_map_to_stable_statuses() {
    let cases = [
        (
            Error::Validation(ValidationFailure::IncompleteSelection {
                missing: vec!["doctor_id"],
            }),
            ApiErrorCode::IncompleteSelection,
            400,
        ),
        (
            Error::Validation(ValidationFailure::IneligibleRole),
            ApiErrorCode::IneligibleRole,
            403,
        ),
        (
            Error::invalid_field("appointment_time", "expected HH:MM"),
            ApiErrorCode::ValidationFailed,
            400,
        ),
        (Error::not_found("doctor", 9), ApiErrorCode::NotFound, 404),
        (
            Error::Conflict(ConflictKind::SlotTaken {
                practitioner_id: 1,
                appointment_date: "2024-06-11".to_string(),
                appointment_time: "09:00".to_string(),
            }),
            ApiErrorCode::SlotConflict,
            409,
        ),
        (
            Error::Conflict(ConflictKind::Duplicate { field: "email" }),
            ApiErrorCode::Duplicate,
            409,
        ),
        (Error::storage("boom"), ApiErrorCode::Internal, 500),
    ];
    for (err, code, status) in cases {
        let api = ApiError::from(&err);
        assert_eq!(api.code, code, "{err}");
        let mapped = map_error(&api);
        assert_eq!(mapped.status_code, status, "{err}");
        assert_eq!(mapped.schema_ref, API_ERROR_SCHEMA_REF);
    }
}

#[test]
fn every_code_has_a_client_or_server_status() {
    for code in API_ERROR_CODES {
        let status = status_for(code);
        assert!((400..600).contains(&status), "{code} -> {status}");
    }
    assert_eq!(status_for(ApiErrorCode::Timeout), 504);
    assert_eq!(status_for(ApiErrorCode::Unauthorized), 401);
}

#[test]
fn slot_conflict_details_use_wire_names() {
    let api = ApiError::from(Error::Conflict(ConflictKind::SlotTaken {
        practitioner_id: 4,
        appointment_date: "2024-06-11".to_string(),
        appointment_time: "10:30".to_string(),
    }));
    assert_eq!(
        api.details,
        json!({"doctor_id": 4, "appointment_date": "2024-06-11", "appointment_time": "10:30"})
    );
}

fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn availability_params_are_all_required() {
    let ok = parse_availability_params(&query(&[
        ("doctor_id", "2"),
        ("date", "2024-06-11"),
        ("time", "09:30"),
    ]))
    .expect("params");
    assert_eq!(ok.practitioner_id.get(), 2);

    let missing = parse_availability_params(&query(&[("doctor_id", "2"), ("date", "2024-06-11")]))
        .expect_err("no time");
    assert_eq!(missing.code, ApiErrorCode::ValidationFailed);
    assert_eq!(missing.details["field_errors"][0]["field"], "time");

    let bad_id = parse_slot_grid_params(&query(&[("doctor_id", "zero"), ("date", "2024-06-11")]))
        .expect_err("bad id");
    assert_eq!(bad_id.code, ApiErrorCode::ValidationFailed);
}

#[test]
fn calendar_params_default_to_the_current_month() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).expect("today");
    assert_eq!(
        parse_calendar_params(&BTreeMap::new(), today).expect("defaults"),
        (2024, 6)
    );
    assert_eq!(
        parse_calendar_params(&query(&[("year", "2025"), ("month", "2")]), today)
            .expect("explicit"),
        (2025, 2)
    );
    assert!(parse_calendar_params(&query(&[("month", "13")]), today).is_err());
}
