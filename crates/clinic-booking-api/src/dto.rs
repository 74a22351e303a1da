// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, NaiveDate, Utc};
use clinic_booking_core::{AccountId, BookingId, PractitionerId};
use clinic_booking_model::{
    parse_birth_date, Account, AppointmentDate, AppointmentTime, Booking, BookingDetails,
    BookingStatus, NewAccount, PractitionerDraft, Role,
};
use clinic_booking_workflow::Selection;
use serde::{Deserialize, Serialize};

use crate::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub birth_date: String,
    pub phone: String,
}

impl RegisterRequest {
    /// Self-registration always yields a patient account.
    pub fn into_new_account(self) -> Result<NewAccount, ApiError> {
        let account = NewAccount {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
            full_name: self.full_name.trim().to_string(),
            birth_date: parse_birth_date(&self.birth_date)?,
            phone: self.phone.trim().to_string(),
            role: Role::Patient,
        };
        account.validate()?;
        Ok(account)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Ids arrive as numbers from API clients and as strings from HTML forms.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum LooseId {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateBookingRequest {
    #[serde(default, alias = "practitioner_id")]
    doctor_id: Option<LooseId>,
    #[serde(default)]
    pub appointment_date: Option<String>,
    #[serde(default)]
    pub appointment_time: Option<String>,
}

fn blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

impl CreateBookingRequest {
    #[must_use]
    pub fn new(doctor_id: Option<i64>, date: Option<&str>, time: Option<&str>) -> Self {
        Self {
            doctor_id: doctor_id.map(LooseId::Number),
            appointment_date: date.map(str::to_string),
            appointment_time: time.map(str::to_string),
        }
    }

    /// Absent or blank fields stay `None` so the workflow can report them
    /// together; present fields must be well formed.
    pub fn to_selection(&self) -> Result<Selection, ApiError> {
        let practitioner_id = match &self.doctor_id {
            None => None,
            Some(LooseId::Number(n)) => Some(PractitionerId::new(*n)?),
            Some(LooseId::Text(t)) if t.trim().is_empty() => None,
            Some(LooseId::Text(t)) => Some(t.parse::<PractitionerId>()?),
        };
        let appointment_date = if blank(self.appointment_date.as_deref()) {
            None
        } else {
            Some(AppointmentDate::parse(
                self.appointment_date.as_deref().unwrap_or_default(),
            )?)
        };
        let appointment_time = if blank(self.appointment_time.as_deref()) {
            None
        } else {
            Some(AppointmentTime::parse(
                self.appointment_time.as_deref().unwrap_or_default(),
            )?)
        };
        Ok(Selection {
            practitioner_id,
            appointment_date,
            appointment_time,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DoctorDraftRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl DoctorDraftRequest {
    pub fn into_draft(self) -> Result<PractitionerDraft, ApiError> {
        let draft = PractitionerDraft {
            full_name: self.full_name,
            specialization: self.specialization,
            phone: self.phone,
            email: self.email,
            is_active: self.is_active,
        };
        Ok(draft.normalized()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleUpdateRequest {
    pub role: String,
}

impl RoleUpdateRequest {
    pub fn role(&self) -> Result<Role, ApiError> {
        Ok(Role::parse(&self.role)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusUpdateRequest {
    pub status: String,
}

impl StatusUpdateRequest {
    pub fn status(&self) -> Result<BookingStatus, ApiError> {
        Ok(BookingStatus::parse(&self.status)?)
    }
}

/// Account as shown to clients: every profile field, never the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id,
            username: a.username.clone(),
            email: a.email.clone(),
            full_name: a.full_name.clone(),
            birth_date: a.birth_date,
            phone: a.phone.clone(),
            role: a.role,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingView {
    pub id: BookingId,
    pub account_id: AccountId,
    pub doctor_id: PractitionerId,
    pub appointment_date: AppointmentDate,
    pub appointment_time: AppointmentTime,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_specialization: Option<String>,
}

impl From<&Booking> for BookingView {
    fn from(b: &Booking) -> Self {
        Self {
            id: b.id,
            account_id: b.account_id,
            doctor_id: b.practitioner_id,
            appointment_date: b.appointment_date,
            appointment_time: b.appointment_time,
            status: b.status,
            created_at: b.created_at,
            doctor_name: None,
            doctor_specialization: None,
        }
    }
}

impl From<&BookingDetails> for BookingView {
    fn from(d: &BookingDetails) -> Self {
        Self {
            doctor_name: Some(d.doctor_name.clone()),
            doctor_specialization: Some(d.doctor_specialization.clone()),
            ..Self::from(&d.booking)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub time: AppointmentTime,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotGridView {
    pub doctor_id: PractitionerId,
    pub date: AppointmentDate,
    pub selectable_date: bool,
    pub slots: Vec<SlotView>,
}
