// SPDX-License-Identifier: Apache-2.0

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{async_trait, Json};
use clinic_booking_api::{map_error, ApiError};
use clinic_booking_core::Error;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::error;

/// Every handler failure leaves through here as `{"error": ApiError}`.
///
/// The `ApiError` also rides in the response extensions so request tracing
/// can stamp the real request id into the body.
#[derive(Debug)]
pub(crate) struct HttpError(pub ApiError);

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl From<Error> for HttpError {
    fn from(err: Error) -> Self {
        if let Error::Storage(message) = &err {
            error!(error = %message, "storage failure");
        }
        Self(ApiError::from(err))
    }
}

pub(crate) fn error_response(err: ApiError) -> Response {
    let status = StatusCode::from_u16(map_error(&err).status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, Json(json!({ "error": &err }))).into_response();
    response.extensions_mut().insert(err);
    response
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        error_response(self.0)
    }
}

pub(crate) type HttpResult<T> = Result<T, HttpError>;

/// JSON body extractor whose rejections use the API error contract.
pub(crate) struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(HttpError(json_rejection(&rejection))),
        }
    }
}

fn json_rejection(rejection: &JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large()
    } else {
        ApiError::validation_failed("body", rejection.body_text())
    }
}

/// Path segments arrive as text so a bad id maps to `ValidationFailed`
/// rather than axum's plain-text rejection.
pub(crate) fn parse_path_id<T>(raw: &str) -> HttpResult<T>
where
    T: FromStr<Err = Error>,
{
    raw.parse::<T>().map_err(HttpError::from)
}
