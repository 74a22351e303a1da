// SPDX-License-Identifier: Apache-2.0

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use clinic_booking_api::{AccountView, ApiError, LoginRequest, RegisterRequest};
use serde_json::json;
use tracing::{error, info};

use crate::http::error::{HttpResult, JsonBody};
use crate::AppState;

const BAD_CREDENTIALS: &str = "invalid username or password";

pub(crate) async fn register_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> HttpResult<impl IntoResponse> {
    let new_account = body.into_new_account()?;
    let account = state.credentials.create_account(new_account).await?;
    info!(account_id = %account.id, username = %account.username, "account registered");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "account": AccountView::from(&account) })),
    ))
}

pub(crate) async fn login_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> HttpResult<impl IntoResponse> {
    let account = state
        .credentials
        .verify_credentials(body.username.trim(), &body.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized(BAD_CREDENTIALS))?;
    let token = state
        .signer
        .issue(&account, state.now_unix())
        .map_err(|err| {
            error!(error = %err, "token issue failed");
            ApiError::internal()
        })?;
    info!(account_id = %account.id, "login succeeded");
    Ok(Json(json!({
        "token": token,
        "account": AccountView::from(&account),
    })))
}
