// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use clinic_booking_core::{Error, PractitionerId, Result};
use serde::{Deserialize, Serialize};

pub const NAME_MAX_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Practitioner {
    pub id: PractitionerId,
    pub full_name: String,
    pub specialization: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Administrative input for creating or replacing a practitioner record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PractitionerDraft {
    pub full_name: String,
    pub specialization: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

impl PractitionerDraft {
    /// Trims text fields, drops blank optional contacts, and rejects drafts
    /// missing a name or specialization.
    pub fn normalized(self) -> Result<Self> {
        let full_name = self.full_name.trim().to_string();
        let specialization = self.specialization.trim().to_string();
        if full_name.is_empty() {
            return Err(Error::invalid_field("full_name", "must not be empty"));
        }
        if full_name.chars().count() > NAME_MAX_LEN {
            return Err(Error::invalid_field(
                "full_name",
                format!("exceeds max length {NAME_MAX_LEN}"),
            ));
        }
        if specialization.is_empty() {
            return Err(Error::invalid_field("specialization", "must not be empty"));
        }
        let blank_to_none = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        Ok(Self {
            full_name,
            specialization,
            phone: blank_to_none(self.phone),
            email: blank_to_none(self.email),
            is_active: self.is_active,
        })
    }
}
