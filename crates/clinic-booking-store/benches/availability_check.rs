#![allow(missing_docs)]

use chrono::NaiveDate;
use clinic_booking_model::{
    calendar::time_slots, AppointmentDate, BookingRequest, NewAccount, PractitionerDraft, Role,
};
use clinic_booking_store::{AppointmentLedger, CredentialStore, PractitionerDirectory, SqliteStore};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_availability_check(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    let store = SqliteStore::open_in_memory().expect("store");
    let slot = rt.block_on(async {
        let patient = store
            .create_account(NewAccount {
                username: "bench_patient".to_string(),
                email: "bench@mail.example".to_string(),
                password: "secret123".to_string(),
                full_name: "Bench Patient".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1980, 1, 1).expect("birth"),
                phone: "1".to_string(),
                role: Role::Patient,
            })
            .await
            .expect("patient");
        let doctor = store
            .create_practitioner(PractitionerDraft {
                full_name: "Bench Doctor".to_string(),
                specialization: "Therapist".to_string(),
                ..PractitionerDraft::default()
            })
            .await
            .expect("doctor");
        let base = NaiveDate::from_ymd_opt(2024, 6, 10).expect("base");
        let mut last = None;
        for day in 0..30 {
            for time in time_slots() {
                let req = BookingRequest {
                    practitioner_id: doctor.id,
                    appointment_date: AppointmentDate::from_naive(
                        base + chrono::Duration::days(day),
                    ),
                    appointment_time: time,
                };
                store.create_booking(patient.id, req).await.expect("book");
                last = Some(req.slot());
            }
        }
        last.expect("at least one slot")
    });

    c.bench_function("ledger_check_availability_570_rows", |b| {
        b.iter(|| {
            let free = rt
                .block_on(store.check_availability(black_box(slot)))
                .expect("check");
            black_box(free);
        });
    });
}

criterion_group!(benches, bench_availability_check);
criterion_main!(benches);
