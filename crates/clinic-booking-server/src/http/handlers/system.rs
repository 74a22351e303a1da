// SPDX-License-Identifier: Apache-2.0

use axum::http::Uri;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use clinic_booking_api::{openapi_v1_spec, ApiError, ApiErrorCode};
use serde_json::json;

use crate::http::error::HttpError;

pub(crate) async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    }))
}

pub(crate) async fn openapi_handler() -> impl IntoResponse {
    Json(openapi_v1_spec())
}

pub(crate) async fn not_found_handler(uri: Uri) -> HttpError {
    HttpError(ApiError::new(
        ApiErrorCode::NotFound,
        "route not found",
        json!({ "path": uri.path() }),
    ))
}
