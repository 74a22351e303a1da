// SPDX-License-Identifier: Apache-2.0

use clinic_booking_core::{PractitionerId, Result, ValidationFailure};
use clinic_booking_model::{AppointmentDate, AppointmentTime, BookingRequest};

/// Provisional choices collected before confirmation. Any field may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub practitioner_id: Option<PractitionerId>,
    pub appointment_date: Option<AppointmentDate>,
    pub appointment_time: Option<AppointmentTime>,
}

impl Selection {
    /// Wire names of the absent fields, in wizard order.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.practitioner_id.is_none() {
            missing.push("doctor_id");
        }
        if self.appointment_date.is_none() {
            missing.push("appointment_date");
        }
        if self.appointment_time.is_none() {
            missing.push("appointment_time");
        }
        missing
    }

    pub fn to_request(&self) -> Result<BookingRequest> {
        match (
            self.practitioner_id,
            self.appointment_date,
            self.appointment_time,
        ) {
            (Some(practitioner_id), Some(appointment_date), Some(appointment_time)) => {
                Ok(BookingRequest {
                    practitioner_id,
                    appointment_date,
                    appointment_time,
                })
            }
            _ => Err(ValidationFailure::IncompleteSelection {
                missing: self.missing(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_booking_core::Error;

    #[test]
    fn missing_fields_are_listed_in_wizard_order() {
        let selection = Selection {
            appointment_date: Some(AppointmentDate::parse("2024-06-11").expect("date")),
            ..Selection::default()
        };
        assert_eq!(
            selection.to_request(),
            Err(Error::Validation(ValidationFailure::IncompleteSelection {
                missing: vec!["doctor_id", "appointment_time"],
            }))
        );
    }

    #[test]
    fn complete_selection_becomes_a_request() {
        let selection = Selection {
            practitioner_id: Some(PractitionerId::new(3).expect("id")),
            appointment_date: Some(AppointmentDate::parse("2024-06-11").expect("date")),
            appointment_time: Some(AppointmentTime::parse("09:30").expect("time")),
        };
        let request = selection.to_request().expect("request");
        assert_eq!(request.practitioner_id.get(), 3);
        assert_eq!(request.appointment_time.to_string(), "09:30");
    }
}
