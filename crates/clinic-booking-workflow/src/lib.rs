// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Booking wizard: practitioner, then date, then time, then one confirmed
//! submission through a [`BookingGateway`].

mod gateway;
mod selection;
mod wizard;

pub use gateway::{Actor, BookingGateway};
pub use selection::Selection;
pub use wizard::{BookingWorkflow, WorkflowStep};

pub const CRATE_NAME: &str = "clinic-booking-workflow";
