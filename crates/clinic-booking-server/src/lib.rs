// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! REST server for clinic appointment booking.
//!
//! Routing lives in `runtime::router`; handlers stay thin and delegate booking
//! decisions to [`BookingService`], which drives the booking workflow against
//! the appointment ledger.

mod access;
mod config;
mod http;
mod middleware;
mod runtime;
mod services;
pub mod telemetry;

pub use access::{CurrentAccount, TokenClaims, TokenError, TokenSigner};
pub use config::{validate_startup_config_contract, ServerConfig};
pub use runtime::router::build_router;
pub use runtime::state::AppState;
pub use services::booking::BookingService;

pub const CRATE_NAME: &str = "clinic-booking-server";
