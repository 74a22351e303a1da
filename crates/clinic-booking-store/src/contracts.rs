// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clinic_booking_core::{AccountId, BookingId, PractitionerId, Result};
use clinic_booking_model::{
    Account, AppointmentDate, AppointmentTime, Booking, BookingDetails, BookingRequest,
    BookingStatus, NewAccount, Practitioner, PractitionerDraft, Role, Slot,
};

/// Account records and credential checks. Password hashes never leave
/// implementations of this trait.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Fails with a `Duplicate` conflict when the username or email is taken.
    async fn create_account(&self, account: NewAccount) -> Result<Account>;
    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>>;
    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>>;
    /// `Ok(None)` for an unknown user and for a wrong password alike.
    async fn verify_credentials(&self, username: &str, password: &str)
        -> Result<Option<Account>>;
    /// Newest accounts first.
    async fn list_accounts(&self) -> Result<Vec<Account>>;
    async fn update_role(&self, id: AccountId, role: Role) -> Result<Account>;
    /// Removes the account and, by cascade, every booking it owns.
    async fn delete_account(&self, id: AccountId) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PractitionerRemoval {
    Deleted,
    /// Bookings still reference the record, so it was hidden instead.
    Deactivated,
}

impl PractitionerRemoval {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deleted => "deleted",
            Self::Deactivated => "deactivated",
        }
    }
}

#[async_trait]
pub trait PractitionerDirectory: Send + Sync + 'static {
    /// Ordered by display name.
    async fn list_practitioners(&self, include_inactive: bool) -> Result<Vec<Practitioner>>;
    async fn find_practitioner(&self, id: PractitionerId) -> Result<Option<Practitioner>>;
    async fn create_practitioner(&self, draft: PractitionerDraft) -> Result<Practitioner>;
    async fn update_practitioner(
        &self,
        id: PractitionerId,
        draft: PractitionerDraft,
    ) -> Result<Practitioner>;
    async fn remove_practitioner(&self, id: PractitionerId) -> Result<PractitionerRemoval>;
}

/// Durable bookings with slot exclusivity.
///
/// Exclusivity is a storage constraint: `create_booking` either inserts or
/// fails with a `SlotTaken` conflict, atomically, whatever other writers do.
#[async_trait]
pub trait AppointmentLedger: Send + Sync + 'static {
    async fn check_availability(&self, slot: Slot) -> Result<bool>;
    async fn create_booking(&self, account_id: AccountId, request: BookingRequest)
        -> Result<Booking>;
    /// Most recent first: date descending, then time descending.
    async fn list_by_account(&self, account_id: AccountId) -> Result<Vec<BookingDetails>>;
    async fn find_booking(&self, id: BookingId) -> Result<Option<Booking>>;
    async fn update_status(&self, id: BookingId, next: BookingStatus) -> Result<Booking>;
    /// Slot-holding times for one practitioner on one date, ascending.
    async fn occupied_times(
        &self,
        practitioner_id: PractitionerId,
        date: AppointmentDate,
    ) -> Result<Vec<AppointmentTime>>;
}
