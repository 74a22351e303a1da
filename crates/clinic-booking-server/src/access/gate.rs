// SPDX-License-Identifier: Apache-2.0

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use clinic_booking_api::ApiError;
use clinic_booking_model::{Account, Role};
use tracing::{debug, warn};

use crate::http::error::HttpError;
use crate::AppState;

/// The authenticated caller, reloaded from storage for every request.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

pub(crate) async fn require_account(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return HttpError(ApiError::unauthorized("missing bearer token")).into_response();
    };
    let claims = match state.signer.verify(token, state.now_unix()) {
        Ok(claims) => claims,
        Err(err) => {
            debug!(reason = %err, "bearer token rejected");
            return HttpError(ApiError::unauthorized(err.to_string())).into_response();
        }
    };
    let Ok(account_id) = claims.account_id() else {
        return HttpError(ApiError::unauthorized("malformed bearer token")).into_response();
    };
    let account = match state.credentials.find_account_by_id(account_id).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            warn!(account_id = %account_id, "token for an account that no longer exists");
            return HttpError(ApiError::unauthorized("account no longer exists"))
                .into_response();
        }
        Err(err) => return HttpError::from(err).into_response(),
    };
    request.extensions_mut().insert(CurrentAccount(account));
    next.run(request).await
}

/// Runs after [`require_account`]; only administrators pass.
pub(crate) async fn require_admin(request: Request<Body>, next: Next) -> Response {
    let is_admin = request
        .extensions()
        .get::<CurrentAccount>()
        .is_some_and(|current| current.0.role == Role::Admin);
    if !is_admin {
        return HttpError(ApiError::forbidden()).into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_requires_the_scheme_prefix() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert_eq!(bearer_token(&headers), None);
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer v1.a.b"));
        assert_eq!(bearer_token(&headers), Some("v1.a.b"));
    }
}
