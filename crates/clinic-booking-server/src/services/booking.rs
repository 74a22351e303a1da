// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use clinic_booking_api::{SlotGridView, SlotView};
use clinic_booking_core::{AccountId, BookingId, Error, PractitionerId, Result};
use clinic_booking_model::calendar::{is_selectable, time_slots};
use clinic_booking_model::{
    AppointmentDate, Booking, BookingDetails, BookingRequest, BookingStatus, Practitioner, Slot,
};
use clinic_booking_store::{AppointmentLedger, PractitionerDirectory};
use clinic_booking_workflow::{Actor, BookingGateway, BookingWorkflow, Selection};
use tracing::info;

/// Booking decisions behind the HTTP surface.
///
/// Creation goes through [`BookingWorkflow::confirm`], with this service as
/// the workflow's gateway to the ledger.
#[derive(Clone)]
pub struct BookingService {
    directory: Arc<dyn PractitionerDirectory>,
    ledger: Arc<dyn AppointmentLedger>,
}

impl BookingService {
    #[must_use]
    pub fn new(
        directory: Arc<dyn PractitionerDirectory>,
        ledger: Arc<dyn AppointmentLedger>,
    ) -> Self {
        Self { directory, ledger }
    }

    /// Inactive practitioners are reported as absent.
    async fn active_practitioner(&self, id: PractitionerId) -> Result<Practitioner> {
        match self.directory.find_practitioner(id).await? {
            Some(p) if p.is_active => Ok(p),
            _ => Err(Error::not_found("doctor", id)),
        }
    }

    /// `actor` must have been loaded from storage for this request.
    pub async fn create_booking(&self, actor: Actor, selection: Selection) -> Result<Booking> {
        let mut workflow = BookingWorkflow::with_selection(selection);
        let booking = workflow.confirm(actor, self).await?;
        info!(
            appointment_id = %booking.id,
            account_id = %booking.account_id,
            doctor_id = %booking.practitioner_id,
            appointment_date = %booking.appointment_date,
            appointment_time = %booking.appointment_time,
            "appointment booked"
        );
        Ok(booking)
    }

    pub async fn check_availability(&self, slot: Slot) -> Result<bool> {
        self.ledger.check_availability(slot).await
    }

    pub async fn list_for_account(&self, account_id: AccountId) -> Result<Vec<BookingDetails>> {
        self.ledger.list_by_account(account_id).await
    }

    /// The fixed daily grid with occupancy. A slot is only offered when the
    /// date itself is selectable.
    pub async fn slot_grid(
        &self,
        practitioner_id: PractitionerId,
        date: AppointmentDate,
        today: NaiveDate,
    ) -> Result<SlotGridView> {
        self.active_practitioner(practitioner_id).await?;
        let occupied: BTreeSet<_> = self
            .ledger
            .occupied_times(practitioner_id, date)
            .await?
            .into_iter()
            .collect();
        let selectable_date = is_selectable(date, today);
        let slots = time_slots()
            .into_iter()
            .map(|time| SlotView {
                time,
                available: selectable_date && !occupied.contains(&time),
            })
            .collect();
        Ok(SlotGridView {
            doctor_id: practitioner_id,
            date,
            selectable_date,
            slots,
        })
    }

    /// Owners only; anybody else's booking is reported as absent.
    pub async fn cancel_booking(&self, actor: Actor, id: BookingId) -> Result<Booking> {
        match self.ledger.find_booking(id).await? {
            Some(booking) if booking.account_id == actor.account_id => {}
            _ => return Err(Error::not_found("appointment", id)),
        }
        let cancelled = self
            .ledger
            .update_status(id, BookingStatus::Cancelled)
            .await?;
        info!(appointment_id = %id, account_id = %actor.account_id, "appointment cancelled");
        Ok(cancelled)
    }

    pub async fn set_status(&self, id: BookingId, next: BookingStatus) -> Result<Booking> {
        self.ledger.update_status(id, next).await
    }
}

#[async_trait]
impl BookingGateway for BookingService {
    async fn submit(&self, actor: Actor, request: BookingRequest) -> Result<Booking> {
        self.active_practitioner(request.practitioner_id).await?;
        self.ledger.create_booking(actor.account_id, request).await
    }
}
