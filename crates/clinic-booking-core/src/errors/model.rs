// SPDX-License-Identifier: Apache-2.0

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    Validation = 3,
    DependencyFailure = 4,
    Internal = 10,
}

impl ExitCode {
    /// Process exit status for this outcome.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Usage => "usage",
            Self::Validation => "validation",
            Self::DependencyFailure => "dependency_failure",
            Self::Internal => "internal",
        }
    }
}

/// Coarse error category, one per branch of the booking error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    Validation,
    NotFound,
    Conflict,
    Storage,
}

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejections detected before any storage call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationFailure {
    IncompleteSelection { missing: Vec<&'static str> },
    IneligibleRole,
    InvalidField { field: &'static str, reason: String },
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompleteSelection { missing } => {
                write!(f, "incomplete selection: missing {}", missing.join(", "))
            }
            Self::IneligibleRole => f.write_str("administrators cannot book appointments"),
            Self::InvalidField { field, reason } => write!(f, "invalid {field}: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    SlotTaken {
        practitioner_id: i64,
        appointment_date: String,
        appointment_time: String,
    },
    Duplicate {
        field: &'static str,
    },
    InvalidTransition {
        from: String,
        to: String,
    },
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SlotTaken {
                practitioner_id,
                appointment_date,
                appointment_time,
            } => write!(
                f,
                "slot {appointment_date} {appointment_time} is already taken for doctor {practitioner_id}"
            ),
            Self::Duplicate { field } => write!(f, "{field} is already registered"),
            Self::InvalidTransition { from, to } => {
                write!(f, "status transition {from} -> {to} is not allowed")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    Validation(ValidationFailure),
    NotFound { entity: &'static str, id: String },
    Conflict(ConflictKind),
    Storage(String),
}

impl Error {
    #[must_use]
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation(ValidationFailure::InvalidField {
            field,
            reason: reason.into(),
        })
    }

    #[must_use]
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::Validation,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Conflict(_) => ErrorCode::Conflict,
            Self::Storage(_) => ErrorCode::Storage,
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Validation(_) | Self::NotFound { .. } | Self::Conflict(_) => {
                ExitCode::Validation
            }
            Self::Storage(_) => ExitCode::DependencyFailure,
        }
    }

    #[must_use]
    pub const fn is_slot_conflict(&self) -> bool {
        matches!(self, Self::Conflict(ConflictKind::SlotTaken { .. }))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(failure) => write!(f, "{failure}"),
            Self::NotFound { entity, id } => write!(f, "{entity} `{id}` not found"),
            Self::Conflict(kind) => write!(f, "{kind}"),
            Self::Storage(message) => write!(f, "storage failure: {message}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ValidationFailure> for Error {
    fn from(value: ValidationFailure) -> Self {
        Self::Validation(value)
    }
}

impl From<ConflictKind> for Error {
    fn from(value: ConflictKind) -> Self {
        Self::Conflict(value)
    }
}
