// SPDX-License-Identifier: Apache-2.0

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use clinic_booking_api::{
    AccountView, ApiError, BookingView, DoctorDraftRequest, RoleUpdateRequest,
    StatusUpdateRequest,
};
use clinic_booking_core::{AccountId, BookingId, PractitionerId};
use serde_json::json;
use tracing::info;

use crate::access::CurrentAccount;
use crate::http::error::{parse_path_id, HttpResult, JsonBody};
use crate::AppState;

pub(crate) async fn admin_list_doctors_handler(
    State(state): State<AppState>,
) -> HttpResult<impl IntoResponse> {
    let doctors = state.directory.list_practitioners(true).await?;
    Ok(Json(json!({ "doctors": doctors })))
}

pub(crate) async fn admin_create_doctor_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DoctorDraftRequest>,
) -> HttpResult<impl IntoResponse> {
    let doctor = state
        .directory
        .create_practitioner(body.into_draft()?)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "doctor": doctor }))))
}

pub(crate) async fn admin_update_doctor_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody<DoctorDraftRequest>,
) -> HttpResult<impl IntoResponse> {
    let id: PractitionerId = parse_path_id(&raw_id)?;
    let doctor = state
        .directory
        .update_practitioner(id, body.into_draft()?)
        .await?;
    Ok(Json(json!({ "doctor": doctor })))
}

pub(crate) async fn admin_delete_doctor_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> HttpResult<impl IntoResponse> {
    let id: PractitionerId = parse_path_id(&raw_id)?;
    let outcome = state.directory.remove_practitioner(id).await?;
    Ok(Json(json!({ "doctor_id": id, "outcome": outcome.as_str() })))
}

pub(crate) async fn admin_list_users_handler(
    State(state): State<AppState>,
) -> HttpResult<impl IntoResponse> {
    let users: Vec<AccountView> = state
        .credentials
        .list_accounts()
        .await?
        .iter()
        .map(AccountView::from)
        .collect();
    Ok(Json(json!({ "users": users })))
}

pub(crate) async fn admin_delete_user_handler(
    State(state): State<AppState>,
    Extension(CurrentAccount(admin)): Extension<CurrentAccount>,
    Path(raw_id): Path<String>,
) -> HttpResult<impl IntoResponse> {
    let id: AccountId = parse_path_id(&raw_id)?;
    if id == admin.id {
        return Err(ApiError::validation_failed("id", "cannot delete your own account").into());
    }
    state.credentials.delete_account(id).await?;
    info!(account_id = %id, by = %admin.id, "account deleted");
    Ok(Json(json!({ "deleted": id })))
}

pub(crate) async fn admin_update_role_handler(
    State(state): State<AppState>,
    Extension(CurrentAccount(admin)): Extension<CurrentAccount>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody<RoleUpdateRequest>,
) -> HttpResult<impl IntoResponse> {
    let id: AccountId = parse_path_id(&raw_id)?;
    let account = state.credentials.update_role(id, body.role()?).await?;
    info!(account_id = %id, role = %account.role, by = %admin.id, "role changed");
    Ok(Json(json!({ "user": AccountView::from(&account) })))
}

pub(crate) async fn admin_update_status_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody<StatusUpdateRequest>,
) -> HttpResult<impl IntoResponse> {
    let id: BookingId = parse_path_id(&raw_id)?;
    let booking = state.booking.set_status(id, body.status()?).await?;
    Ok(Json(json!({ "appointment": BookingView::from(&booking) })))
}
