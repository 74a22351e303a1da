// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use clinic_booking_core::{AccountId, BookingId, ConflictKind, Error, PractitionerId};
use clinic_booking_model::{
    Account, AppointmentDate, AppointmentTime, Booking, BookingDetails, BookingStatus,
    Practitioner, Role,
};
use rusqlite::types::Type;
use rusqlite::{ErrorCode, Row};

pub(crate) const ACCOUNT_COLUMNS: &str =
    "id, username, email, full_name, birth_date, phone, role, created_at";
pub(crate) const PRACTITIONER_COLUMNS: &str =
    "id, full_name, specialization, phone, email, is_active, created_at";
pub(crate) const BOOKING_COLUMNS: &str =
    "id, account_id, practitioner_id, appointment_date, appointment_time, status, created_at";

pub(crate) fn sql_err(err: rusqlite::Error) -> Error {
    Error::storage(format!("sqlite: {err}"))
}

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == ErrorCode::ConstraintViolation
                && inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Maps a unique violation on `account` to the column that collided.
pub(crate) fn account_write_err(err: rusqlite::Error) -> Error {
    if is_unique_violation(&err) {
        let field = if err.to_string().contains("account.email") {
            "email"
        } else {
            "username"
        };
        return Error::Conflict(ConflictKind::Duplicate { field });
    }
    sql_err(err)
}

pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn conversion<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| conversion(idx, e))
}

fn id_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: TryFrom<i64, Error = Error>,
{
    let raw: i64 = row.get(idx)?;
    T::try_from(raw).map_err(|e| conversion(idx, e))
}

pub(crate) fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    let birth_raw: String = row.get(4)?;
    let role_raw: String = row.get(6)?;
    Ok(Account {
        id: id_column::<AccountId>(row, 0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        full_name: row.get(3)?,
        birth_date: NaiveDate::parse_from_str(&birth_raw, "%Y-%m-%d")
            .map_err(|e| conversion(4, e))?,
        phone: row.get(5)?,
        role: Role::parse(&role_raw).map_err(|e| conversion(6, e))?,
        created_at: timestamp(row, 7)?,
    })
}

pub(crate) fn practitioner_from_row(row: &Row<'_>) -> rusqlite::Result<Practitioner> {
    Ok(Practitioner {
        id: id_column::<PractitionerId>(row, 0)?,
        full_name: row.get(1)?,
        specialization: row.get(2)?,
        phone: row.get(3)?,
        email: row.get(4)?,
        is_active: row.get::<_, i64>(5)? != 0,
        created_at: timestamp(row, 6)?,
    })
}

pub(crate) fn booking_from_row(row: &Row<'_>) -> rusqlite::Result<Booking> {
    let date_raw: String = row.get(3)?;
    let time_raw: String = row.get(4)?;
    let status_raw: String = row.get(5)?;
    Ok(Booking {
        id: id_column::<BookingId>(row, 0)?,
        account_id: id_column::<AccountId>(row, 1)?,
        practitioner_id: id_column::<PractitionerId>(row, 2)?,
        appointment_date: AppointmentDate::parse(&date_raw).map_err(|e| conversion(3, e))?,
        appointment_time: AppointmentTime::parse(&time_raw).map_err(|e| conversion(4, e))?,
        status: BookingStatus::parse(&status_raw).map_err(|e| conversion(5, e))?,
        created_at: timestamp(row, 6)?,
    })
}

/// Expects the booking columns followed by the practitioner name and specialization.
pub(crate) fn booking_details_from_row(row: &Row<'_>) -> rusqlite::Result<BookingDetails> {
    Ok(BookingDetails {
        booking: booking_from_row(row)?,
        doctor_name: row.get(7)?,
        doctor_specialization: row.get(8)?,
    })
}
