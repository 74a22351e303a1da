// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use chrono::NaiveDate;
use clinic_booking_model::{
    calendar::time_slots, AppointmentDate, BookingRequest, NewAccount, PractitionerDraft, Role,
};
use clinic_booking_store::{AppointmentLedger, CredentialStore, PractitionerDirectory, SqliteStore};
use proptest::prelude::*;
use proptest::test_runner::Config;

proptest! {
    #![proptest_config(Config::with_cases(24))]
    #[test]
    fn accepted_bookings_match_distinct_slots_and_history_is_sorted(
        picks in proptest::collection::vec((0_usize..19, 0_i64..5), 1..24),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        let (accepted, history) = rt.block_on(async {
            let store = SqliteStore::open_in_memory().expect("store");
            let patient = store
                .create_account(NewAccount {
                    username: "prop_patient".to_string(),
                    email: "prop@mail.example".to_string(),
                    password: "secret123".to_string(),
                    full_name: "Prop Patient".to_string(),
                    birth_date: NaiveDate::from_ymd_opt(1985, 1, 1).expect("birth"),
                    phone: "123".to_string(),
                    role: Role::Patient,
                })
                .await
                .expect("patient");
            let doctor = store
                .create_practitioner(PractitionerDraft {
                    full_name: "Prop Doctor".to_string(),
                    specialization: "Therapist".to_string(),
                    ..PractitionerDraft::default()
                })
                .await
                .expect("doctor");
            let slots = time_slots();
            let base = NaiveDate::from_ymd_opt(2024, 6, 10).expect("base");
            let mut accepted = 0_usize;
            for (slot_idx, day) in &picks {
                let req = BookingRequest {
                    practitioner_id: doctor.id,
                    appointment_date: AppointmentDate::from_naive(
                        base + chrono::Duration::days(*day),
                    ),
                    appointment_time: slots[*slot_idx],
                };
                match store.create_booking(patient.id, req).await {
                    Ok(_) => accepted += 1,
                    Err(err) => assert!(err.is_slot_conflict(), "unexpected: {err}"),
                }
            }
            (accepted, store.list_by_account(patient.id).await.expect("history"))
        });

        let distinct: BTreeSet<_> = picks.iter().collect();
        prop_assert_eq!(accepted, distinct.len());
        prop_assert_eq!(history.len(), distinct.len());
        for pair in history.windows(2) {
            let a = (pair[0].booking.appointment_date, pair[0].booking.appointment_time);
            let b = (pair[1].booking.appointment_date, pair[1].booking.appointment_time);
            prop_assert!(a > b);
        }
    }
}
