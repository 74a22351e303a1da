// SPDX-License-Identifier: Apache-2.0

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use clinic_booking_api::ApiError;
use tracing::warn;

use crate::http::error::HttpError;
use crate::AppState;

const LOGIN_PATH: &str = "/api/auth/login";

/// Requests that commit a write are never cut short: dropping the handler
/// would not roll back a blocking store call already in flight, so the
/// caller must see the committed outcome. Login only reads.
fn runs_to_completion(method: &Method, path: &str) -> bool {
    let reads = matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS);
    !reads && path != LOGIN_PATH
}

pub(crate) async fn timeout_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if runs_to_completion(request.method(), &path) {
        return next.run(request).await;
    }
    let limit = state.config.request_timeout;
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            let limit_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
            warn!(path = %path, limit_ms, "request timed out");
            HttpError(ApiError::timeout(limit_ms)).into_response()
        }
    }
}
