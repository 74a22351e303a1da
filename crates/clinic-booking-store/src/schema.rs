// SPDX-License-Identifier: Apache-2.0

use clinic_booking_core::{Error, Result};
use rusqlite::Connection;
use tracing::info;

use crate::rows::sql_err;

pub const SCHEMA_VERSION: i64 = 1;

const PRAGMAS: &str = "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;";

// The partial unique index is what keeps a slot exclusive: cancelled rows drop
// out of it, so cancelling frees the slot immediately.
const SCHEMA_V1: &str = "
CREATE TABLE account (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    full_name TEXT NOT NULL,
    birth_date TEXT NOT NULL,
    phone TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'patient' CHECK (role IN ('patient', 'admin')),
    created_at TEXT NOT NULL
);
CREATE TABLE practitioner (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL,
    specialization TEXT NOT NULL,
    phone TEXT,
    email TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL
);
CREATE TABLE booking (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_id INTEGER NOT NULL REFERENCES account(id) ON DELETE CASCADE,
    practitioner_id INTEGER NOT NULL REFERENCES practitioner(id) ON DELETE RESTRICT,
    appointment_date TEXT NOT NULL,
    appointment_time TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'scheduled'
        CHECK (status IN ('scheduled', 'cancelled', 'completed')),
    created_at TEXT NOT NULL
);
CREATE UNIQUE INDEX idx_booking_active_slot
    ON booking(practitioner_id, appointment_date, appointment_time)
    WHERE status != 'cancelled';
CREATE INDEX idx_booking_account_recent
    ON booking(account_id, appointment_date, appointment_time);
CREATE INDEX idx_practitioner_name ON practitioner(full_name);
";

pub(crate) fn apply_connection_pragmas(conn: &Connection) -> Result<()> {
    conn.execute_batch(PRAGMAS).map_err(sql_err)
}

pub(crate) fn migrate(conn: &mut Connection) -> Result<()> {
    let current: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(sql_err)?;
    if current > SCHEMA_VERSION {
        return Err(Error::storage(format!(
            "database schema version {current} is newer than supported {SCHEMA_VERSION}"
        )));
    }
    if current == SCHEMA_VERSION {
        return Ok(());
    }
    let tx = conn.transaction().map_err(sql_err)?;
    tx.execute_batch(SCHEMA_V1).map_err(sql_err)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
        .map_err(sql_err)?;
    tx.commit().map_err(sql_err)?;
    info!(schema_version = SCHEMA_VERSION, "database schema initialized");
    Ok(())
}
