// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use clinic_booking_api::{
    parse_availability_params, parse_calendar_params, parse_slot_grid_params, BookingView,
    CreateBookingRequest,
};
use clinic_booking_core::BookingId;
use clinic_booking_model::calendar::month_days;
use clinic_booking_workflow::Actor;
use serde_json::json;

use crate::access::CurrentAccount;
use crate::http::error::{parse_path_id, HttpResult, JsonBody};
use crate::AppState;

pub(crate) async fn create_appointment_handler(
    State(state): State<AppState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    JsonBody(body): JsonBody<CreateBookingRequest>,
) -> HttpResult<impl IntoResponse> {
    let selection = body.to_selection()?;
    let booking = state
        .booking
        .create_booking(Actor::from(&account), selection)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "appointment": BookingView::from(&booking) })),
    ))
}

pub(crate) async fn user_appointments_handler(
    State(state): State<AppState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
) -> HttpResult<impl IntoResponse> {
    let appointments: Vec<BookingView> = state
        .booking
        .list_for_account(account.id)
        .await?
        .iter()
        .map(BookingView::from)
        .collect();
    Ok(Json(json!({ "appointments": appointments })))
}

pub(crate) async fn availability_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> HttpResult<impl IntoResponse> {
    let slot = parse_availability_params(&query)?;
    let available = state.booking.check_availability(slot).await?;
    Ok(Json(json!({ "available": available })))
}

pub(crate) async fn slots_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> HttpResult<impl IntoResponse> {
    let (doctor_id, date) = parse_slot_grid_params(&query)?;
    let grid = state
        .booking
        .slot_grid(doctor_id, date, state.today())
        .await?;
    Ok(Json(grid))
}

pub(crate) async fn calendar_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> HttpResult<impl IntoResponse> {
    let today = state.today();
    let (year, month) = parse_calendar_params(&query, today)?;
    let calendar = month_days(year, month, today)?;
    Ok(Json(calendar))
}

pub(crate) async fn cancel_appointment_handler(
    State(state): State<AppState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Path(raw_id): Path<String>,
) -> HttpResult<impl IntoResponse> {
    let id: BookingId = parse_path_id(&raw_id)?;
    let booking = state
        .booking
        .cancel_booking(Actor::from(&account), id)
        .await?;
    Ok(Json(json!({ "appointment": BookingView::from(&booking) })))
}
