// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Shared foundation for the clinic booking crates: the error taxonomy every
//! layer speaks, typed identifiers, and a couple of hashing helpers.

mod errors;
mod types;

use sha2::{Digest, Sha256};

pub use errors::{ConflictKind, Error, ErrorCode, ExitCode, Result, ValidationFailure};
pub use types::ids::{AccountId, BookingId, PractitionerId};

pub const CRATE_NAME: &str = "clinic-booking-core";

pub const ENV_CLINIC_DB_PATH: &str = "CLINIC_DB_PATH";
pub const ENV_CLINIC_TOKEN_SECRET: &str = "CLINIC_TOKEN_SECRET";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
