// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Persistence for accounts, practitioners and bookings.
//!
//! The three store traits are the seams the server and the CLI depend on;
//! [`SqliteStore`] implements all of them over one SQLite database.

mod contracts;
mod credentials;
mod rows;
mod schema;
mod seed;
mod sqlite;

pub use contracts::{AppointmentLedger, CredentialStore, PractitionerDirectory, PractitionerRemoval};
pub use credentials::{hash_password, verify_password};
pub use schema::SCHEMA_VERSION;
pub use seed::{seed_demo_practitioners, DEMO_PRACTITIONERS};
pub use sqlite::SqliteStore;

pub const CRATE_NAME: &str = "clinic-booking-store";
