// SPDX-License-Identifier: Apache-2.0

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use clinic_booking_core::{Error, PractitionerId};
use serde_json::json;

use crate::http::error::{parse_path_id, HttpResult};
use crate::AppState;

pub(crate) async fn list_doctors_handler(
    State(state): State<AppState>,
) -> HttpResult<impl IntoResponse> {
    let doctors = state.directory.list_practitioners(false).await?;
    Ok(Json(json!({ "doctors": doctors })))
}

pub(crate) async fn get_doctor_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> HttpResult<impl IntoResponse> {
    let id: PractitionerId = parse_path_id(&raw_id)?;
    let doctor = state
        .directory
        .find_practitioner(id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| Error::not_found("doctor", id))?;
    Ok(Json(json!({ "doctor": doctor })))
}
