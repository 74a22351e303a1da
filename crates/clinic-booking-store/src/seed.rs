// SPDX-License-Identifier: Apache-2.0

use clinic_booking_core::Result;
use clinic_booking_model::PractitionerDraft;
use tracing::info;

use crate::contracts::PractitionerDirectory;
use crate::sqlite::SqliteStore;

/// `(full_name, specialization, phone, email)` rows loaded into an empty directory.
pub const DEMO_PRACTITIONERS: [(&str, &str, &str, &str); 5] = [
    ("Anna Kowalska", "Therapist", "+48 600 100 201", "a.kowalska@clinic.example"),
    ("Piotr Nowak", "Cardiologist", "+48 600 100 202", "p.nowak@clinic.example"),
    ("Maria Wisniewska", "Neurologist", "+48 600 100 203", "m.wisniewska@clinic.example"),
    ("Tomasz Zielinski", "Ophthalmologist", "+48 600 100 204", "t.zielinski@clinic.example"),
    ("Ewa Lewandowska", "Surgeon", "+48 600 100 205", "e.lewandowska@clinic.example"),
];

/// Inserts the demo directory when no practitioner exists yet. Returns the
/// number of rows inserted, so a second run reports zero.
pub async fn seed_demo_practitioners(store: &SqliteStore) -> Result<usize> {
    if !store.list_practitioners(true).await?.is_empty() {
        return Ok(0);
    }
    for (full_name, specialization, phone, email) in DEMO_PRACTITIONERS {
        store
            .create_practitioner(PractitionerDraft {
                full_name: full_name.to_string(),
                specialization: specialization.to_string(),
                phone: Some(phone.to_string()),
                email: Some(email.to_string()),
                is_active: Some(true),
            })
            .await?;
    }
    info!(count = DEMO_PRACTITIONERS.len(), "seeded demo practitioners");
    Ok(DEMO_PRACTITIONERS.len())
}
