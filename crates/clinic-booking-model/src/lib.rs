// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Clinic booking model SSOT.
//!
//! Field names here are the canonical names used from the SQL schema to the
//! JSON wire: `appointment_date`, `appointment_time`, `full_name`.

mod account;
mod booking;
pub mod calendar;
mod practitioner;

pub use account::{
    parse_birth_date, validate_email, validate_password, validate_username, Account, NewAccount,
    Role, PASSWORD_MIN_LEN, USERNAME_MAX_LEN, USERNAME_MIN_LEN,
};
pub use booking::{
    AppointmentDate, AppointmentTime, Booking, BookingDetails, BookingRequest, BookingStatus, Slot,
};
pub use calendar::{CalendarDay, MonthCalendar, MonthRef, REST_DAY};
pub use practitioner::{Practitioner, PractitionerDraft};

pub const CRATE_NAME: &str = "clinic-booking-model";
