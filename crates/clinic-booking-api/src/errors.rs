// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use clinic_booking_core::{ConflictKind, Error, ValidationFailure};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    ValidationFailed,
    IncompleteSelection,
    IneligibleRole,
    Unauthorized,
    Forbidden,
    NotFound,
    SlotConflict,
    Duplicate,
    InvalidTransition,
    PayloadTooLarge,
    Timeout,
    Internal,
}

pub const API_ERROR_CODES: [ApiErrorCode; 12] = [
    ApiErrorCode::ValidationFailed,
    ApiErrorCode::IncompleteSelection,
    ApiErrorCode::IneligibleRole,
    ApiErrorCode::Unauthorized,
    ApiErrorCode::Forbidden,
    ApiErrorCode::NotFound,
    ApiErrorCode::SlotConflict,
    ApiErrorCode::Duplicate,
    ApiErrorCode::InvalidTransition,
    ApiErrorCode::PayloadTooLarge,
    ApiErrorCode::Timeout,
    ApiErrorCode::Internal,
];

impl ApiErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "ValidationFailed",
            Self::IncompleteSelection => "IncompleteSelection",
            Self::IneligibleRole => "IneligibleRole",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "NotFound",
            Self::SlotConflict => "SlotConflict",
            Self::Duplicate => "Duplicate",
            Self::InvalidTransition => "InvalidTransition",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::Timeout => "Timeout",
            Self::Internal => "Internal",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
    pub request_id: String,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            request_id: "req-unknown".to_string(),
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    #[must_use]
    pub fn validation_failed(field: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::new(
            ApiErrorCode::ValidationFailed,
            format!("invalid {field}: {reason}"),
            json!({"field_errors": [{"field": field, "reason": reason}]}),
        )
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Unauthorized, message, json!({}))
    }

    #[must_use]
    pub fn forbidden() -> Self {
        Self::new(
            ApiErrorCode::Forbidden,
            "administrator role required",
            json!({}),
        )
    }

    #[must_use]
    pub fn payload_too_large() -> Self {
        Self::new(
            ApiErrorCode::PayloadTooLarge,
            "request body too large",
            json!({}),
        )
    }

    #[must_use]
    pub fn timeout(limit_ms: u64) -> Self {
        Self::new(
            ApiErrorCode::Timeout,
            "request timed out",
            json!({"timeout_ms": limit_ms}),
        )
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::new(ApiErrorCode::Internal, "internal error", json!({}))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Storage failures collapse to `Internal` without their message.
impl From<&Error> for ApiError {
    fn from(err: &Error) -> Self {
        match err {
            Error::Validation(ValidationFailure::IncompleteSelection { missing }) => Self::new(
                ApiErrorCode::IncompleteSelection,
                err.to_string(),
                json!({"missing": missing}),
            ),
            Error::Validation(ValidationFailure::IneligibleRole) => {
                Self::new(ApiErrorCode::IneligibleRole, err.to_string(), json!({}))
            }
            Error::Validation(ValidationFailure::InvalidField { field, reason }) => {
                Self::validation_failed(field, reason.clone())
            }
            Error::NotFound { entity, id } => Self::new(
                ApiErrorCode::NotFound,
                err.to_string(),
                json!({"entity": entity, "id": id}),
            ),
            Error::Conflict(ConflictKind::SlotTaken {
                practitioner_id,
                appointment_date,
                appointment_time,
            }) => Self::new(
                ApiErrorCode::SlotConflict,
                "this time slot is already booked",
                json!({
                    "doctor_id": practitioner_id,
                    "appointment_date": appointment_date,
                    "appointment_time": appointment_time,
                }),
            ),
            Error::Conflict(ConflictKind::Duplicate { field }) => Self::new(
                ApiErrorCode::Duplicate,
                err.to_string(),
                json!({"field": field}),
            ),
            Error::Conflict(ConflictKind::InvalidTransition { from, to }) => Self::new(
                ApiErrorCode::InvalidTransition,
                err.to_string(),
                json!({"from": from, "to": to}),
            ),
            _ => Self::internal(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}
