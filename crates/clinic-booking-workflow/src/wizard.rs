// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use chrono::NaiveDate;
use clinic_booking_core::{ConflictKind, Error, PractitionerId, Result, ValidationFailure};
use clinic_booking_model::calendar::{is_grid_slot, is_selectable};
use clinic_booking_model::{AppointmentDate, AppointmentTime, Booking};
use tracing::{debug, warn};

use crate::gateway::{Actor, BookingGateway};
use crate::selection::Selection;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkflowStep {
    #[default]
    SelectingPractitioner,
    SelectingDate,
    SelectingTime,
    Confirming,
    Submitted,
}

impl WorkflowStep {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelectingPractitioner => "selecting_practitioner",
            Self::SelectingDate => "selecting_date",
            Self::SelectingTime => "selecting_time",
            Self::Confirming => "confirming",
            Self::Submitted => "submitted",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One booking attempt from first choice to submission.
///
/// Going back to an earlier step keeps later selections; `confirm` validates
/// the whole selection again before the gateway is called. A failed submission
/// leaves the workflow in `Confirming` with the error kept in `last_error`.
#[derive(Debug, Clone, Default)]
pub struct BookingWorkflow {
    step: WorkflowStep,
    furthest: WorkflowStep,
    selection: Selection,
    last_error: Option<Error>,
    submitted: Option<Booking>,
}

impl BookingWorkflow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts at the step the given selection already satisfies. Calendar
    /// rules are not applied to the preset values.
    #[must_use]
    pub fn with_selection(selection: Selection) -> Self {
        let step = match (
            selection.practitioner_id,
            selection.appointment_date,
            selection.appointment_time,
        ) {
            (None, _, _) => WorkflowStep::SelectingPractitioner,
            (Some(_), None, _) => WorkflowStep::SelectingDate,
            (Some(_), Some(_), None) => WorkflowStep::SelectingTime,
            (Some(_), Some(_), Some(_)) => WorkflowStep::Confirming,
        };
        Self {
            step,
            furthest: step,
            selection,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn step(&self) -> WorkflowStep {
        self.step
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub const fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    #[must_use]
    pub const fn submitted(&self) -> Option<&Booking> {
        self.submitted.as_ref()
    }

    pub fn select_practitioner(&mut self, id: PractitionerId) -> Result<WorkflowStep> {
        self.ensure_open()?;
        self.selection.practitioner_id = Some(id);
        Ok(self.advance(WorkflowStep::SelectingDate))
    }

    /// Accepts only dates that are neither past nor the rest day.
    pub fn select_date(&mut self, date: AppointmentDate, today: NaiveDate) -> Result<WorkflowStep> {
        self.ensure_open()?;
        self.require(&["doctor_id"])?;
        if !is_selectable(date, today) {
            return Err(Error::invalid_field(
                "appointment_date",
                format!("{date} is not open for booking"),
            ));
        }
        self.selection.appointment_date = Some(date);
        Ok(self.advance(WorkflowStep::SelectingTime))
    }

    pub fn select_time(&mut self, time: AppointmentTime) -> Result<WorkflowStep> {
        self.ensure_open()?;
        self.require(&["doctor_id", "appointment_date"])?;
        if !is_grid_slot(time) {
            return Err(Error::invalid_field(
                "appointment_time",
                format!("{time} is not a bookable slot"),
            ));
        }
        self.selection.appointment_time = Some(time);
        Ok(self.advance(WorkflowStep::Confirming))
    }

    /// Moves back (or forward again) to a step already reached.
    pub fn go_to(&mut self, step: WorkflowStep) -> Result<WorkflowStep> {
        self.ensure_open()?;
        if step == WorkflowStep::Submitted || step > self.furthest {
            return Err(Error::invalid_field(
                "step",
                format!("{step} has not been reached"),
            ));
        }
        debug!(from = %self.step, to = %step, "workflow navigation");
        self.step = step;
        Ok(step)
    }

    /// Validates the selection and the actor, then makes exactly one gateway call.
    pub async fn confirm(&mut self, actor: Actor, gateway: &dyn BookingGateway) -> Result<Booking> {
        if self.step == WorkflowStep::Submitted {
            return Err(ConflictKind::InvalidTransition {
                from: WorkflowStep::Submitted.to_string(),
                to: WorkflowStep::Submitted.to_string(),
            }
            .into());
        }
        let request = match self.selection.to_request() {
            Ok(request) => request,
            Err(err) => return Err(self.fail(err)),
        };
        if !actor.role.may_book() {
            return Err(self.fail(ValidationFailure::IneligibleRole.into()));
        }

        self.step = WorkflowStep::Confirming;
        self.furthest = self.furthest.max(WorkflowStep::Confirming);
        match gateway.submit(actor, request).await {
            Ok(booking) => {
                debug!(
                    appointment_id = %booking.id,
                    account_id = %actor.account_id,
                    "booking workflow submitted"
                );
                self.step = WorkflowStep::Submitted;
                self.furthest = WorkflowStep::Submitted;
                self.last_error = None;
                self.submitted = Some(booking.clone());
                Ok(booking)
            }
            Err(err) => {
                warn!(account_id = %actor.account_id, error = %err, "booking workflow rejected");
                Err(self.fail(err))
            }
        }
    }

    /// Clears every selection and starts over.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn ensure_open(&self) -> Result<()> {
        if self.step == WorkflowStep::Submitted {
            return Err(Error::invalid_field("step", "workflow already submitted"));
        }
        Ok(())
    }

    fn require(&self, fields: &[&'static str]) -> Result<()> {
        let missing: Vec<&'static str> = self
            .selection
            .missing()
            .into_iter()
            .filter(|f| fields.contains(f))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure::IncompleteSelection { missing }.into())
        }
    }

    fn advance(&mut self, next: WorkflowStep) -> WorkflowStep {
        self.step = next;
        self.furthest = self.furthest.max(next);
        next
    }

    fn fail(&mut self, err: Error) -> Error {
        self.last_error = Some(err.clone());
        err
    }
}
