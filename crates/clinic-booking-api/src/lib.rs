// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! The JSON contract of the clinic booking service. Nothing here talks to
//! storage or HTTP; the server crate owns both.

pub mod dto;
pub mod error_mapping;
mod errors;
pub mod openapi;
pub mod params;

pub use dto::{
    AccountView, BookingView, CreateBookingRequest, DoctorDraftRequest, LoginRequest,
    RegisterRequest, RoleUpdateRequest, SlotGridView, SlotView, StatusUpdateRequest,
};
pub use error_mapping::{map_error, ApiErrorMapping, API_ERROR_SCHEMA_REF};
pub use errors::{ApiError, ApiErrorCode, API_ERROR_CODES};
pub use openapi::openapi_v1_spec;
pub use params::{parse_availability_params, parse_calendar_params, parse_slot_grid_params};

pub const CRATE_NAME: &str = "clinic-booking-api";
