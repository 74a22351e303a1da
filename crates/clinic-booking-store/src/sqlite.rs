// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use clinic_booking_core::{
    AccountId, BookingId, Error, PractitionerId, Result, ValidationFailure,
};
use clinic_booking_model::{
    Account, AppointmentDate, AppointmentTime, Booking, BookingDetails, BookingRequest,
    BookingStatus, NewAccount, Practitioner, PractitionerDraft, Role, Slot,
};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use tracing::{debug, info, warn};

use crate::contracts::{
    AppointmentLedger, CredentialStore, PractitionerDirectory, PractitionerRemoval,
};
use crate::credentials::{hash_password, verify_password};
use crate::rows::{
    account_from_row, account_write_err, booking_details_from_row, booking_from_row,
    is_unique_violation, now_rfc3339, practitioner_from_row, sql_err, ACCOUNT_COLUMNS,
    BOOKING_COLUMNS, PRACTITIONER_COLUMNS,
};
use crate::schema::{apply_connection_pragmas, migrate};

const BOOKING_DETAILS_SELECT: &str = "SELECT b.id, b.account_id, b.practitioner_id, \
     b.appointment_date, b.appointment_time, b.status, b.created_at, \
     p.full_name, p.specialization \
     FROM booking b JOIN practitioner p ON p.id = b.practitioner_id";

/// One SQLite database behind a shared connection. Clones share the connection;
/// every call runs on the blocking pool.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Opens (creating if needed) a database file and brings its schema up to date.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(sql_err)?;
        let mode: String = conn
            .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))
            .map_err(sql_err)?;
        debug!(path = %path.display(), journal_mode = %mode, "opened booking database");
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory().map_err(sql_err)?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        apply_connection_pragmas(&conn)?;
        migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, op: &'static str, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        run_blocking(op, move || {
            let mut guard = conn
                .lock()
                .map_err(|_| Error::storage(format!("{op}: connection lock poisoned")))?;
            work(&mut guard)
        })
        .await
    }
}

/// Runs CPU or disk bound work on the blocking pool without touching the
/// connection lock.
async fn run_blocking<T, F>(op: &'static str, work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::storage(format!("{op}: blocking task failed: {e}")))?
}

fn load_account(conn: &Connection, id: AccountId) -> Result<Option<Account>> {
    conn.query_row(
        &format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = ?1"),
        params![id.get()],
        account_from_row,
    )
    .optional()
    .map_err(sql_err)
}

fn load_practitioner(conn: &Connection, id: PractitionerId) -> Result<Option<Practitioner>> {
    conn.query_row(
        &format!("SELECT {PRACTITIONER_COLUMNS} FROM practitioner WHERE id = ?1"),
        params![id.get()],
        practitioner_from_row,
    )
    .optional()
    .map_err(sql_err)
}

fn load_booking(conn: &Connection, id: BookingId) -> Result<Option<Booking>> {
    conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM booking WHERE id = ?1"),
        params![id.get()],
        booking_from_row,
    )
    .optional()
    .map_err(sql_err)
}

#[async_trait]
impl CredentialStore for SqliteStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account> {
        account.validate()?;
        let plain = account.password.clone();
        let password_hash = run_blocking("hash_password", move || hash_password(&plain)).await?;
        self.with_conn("create_account", move |conn| {
            conn.execute(
                "INSERT INTO account (username, email, password_hash, full_name, birth_date, phone, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    account.username.trim(),
                    account.email.trim(),
                    password_hash,
                    account.full_name.trim(),
                    account.birth_date.format("%Y-%m-%d").to_string(),
                    account.phone.trim(),
                    account.role.as_str(),
                    now_rfc3339(),
                ],
            )
            .map_err(account_write_err)?;
            let id = AccountId::new(conn.last_insert_rowid())?;
            let created = load_account(conn, id)?.ok_or_else(|| Error::not_found("account", id))?;
            info!(account_id = %created.id, role = %created.role, "account created");
            Ok(created)
        })
        .await
    }

    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        let username = username.trim().to_string();
        self.with_conn("find_account_by_username", move |conn| {
            conn.query_row(
                &format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE username = ?1"),
                params![username],
                account_from_row,
            )
            .optional()
            .map_err(sql_err)
        })
        .await
    }

    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        self.with_conn("find_account_by_id", move |conn| load_account(conn, id))
            .await
    }

    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>> {
        let username = username.trim().to_string();
        let password = password.to_string();
        let found = self
            .with_conn("verify_credentials", move |conn| {
                conn.query_row(
                    &format!(
                        "SELECT {ACCOUNT_COLUMNS}, password_hash FROM account WHERE username = ?1"
                    ),
                    params![username],
                    |row| Ok((account_from_row(row)?, row.get::<_, String>(8)?)),
                )
                .optional()
                .map_err(sql_err)
            })
            .await?;
        let Some((account, hash)) = found else {
            return Ok(None);
        };
        let matches =
            run_blocking("verify_password", move || Ok(verify_password(&password, &hash))).await?;
        Ok(matches.then_some(account))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.with_conn("list_accounts", |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM account ORDER BY created_at DESC, id DESC"
                ))
                .map_err(sql_err)?;
            let rows = stmt.query_map([], account_from_row).map_err(sql_err)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sql_err)
        })
        .await
    }

    async fn update_role(&self, id: AccountId, role: Role) -> Result<Account> {
        self.with_conn("update_role", move |conn| {
            let changed = conn
                .execute(
                    "UPDATE account SET role = ?1 WHERE id = ?2",
                    params![role.as_str(), id.get()],
                )
                .map_err(sql_err)?;
            if changed == 0 {
                return Err(Error::not_found("account", id));
            }
            info!(account_id = %id, role = %role, "account role updated");
            load_account(conn, id)?.ok_or_else(|| Error::not_found("account", id))
        })
        .await
    }

    async fn delete_account(&self, id: AccountId) -> Result<()> {
        self.with_conn("delete_account", move |conn| {
            let changed = conn
                .execute("DELETE FROM account WHERE id = ?1", params![id.get()])
                .map_err(sql_err)?;
            if changed == 0 {
                return Err(Error::not_found("account", id));
            }
            info!(account_id = %id, "account deleted");
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl PractitionerDirectory for SqliteStore {
    async fn list_practitioners(&self, include_inactive: bool) -> Result<Vec<Practitioner>> {
        self.with_conn("list_practitioners", move |conn| {
            let filter = if include_inactive {
                ""
            } else {
                "WHERE is_active = 1"
            };
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {PRACTITIONER_COLUMNS} FROM practitioner {filter} ORDER BY full_name, id"
                ))
                .map_err(sql_err)?;
            let rows = stmt.query_map([], practitioner_from_row).map_err(sql_err)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sql_err)
        })
        .await
    }

    async fn find_practitioner(&self, id: PractitionerId) -> Result<Option<Practitioner>> {
        self.with_conn("find_practitioner", move |conn| load_practitioner(conn, id))
            .await
    }

    async fn create_practitioner(&self, draft: PractitionerDraft) -> Result<Practitioner> {
        let draft = draft.normalized()?;
        self.with_conn("create_practitioner", move |conn| {
            conn.execute(
                "INSERT INTO practitioner (full_name, specialization, phone, email, is_active, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    draft.full_name,
                    draft.specialization,
                    draft.phone,
                    draft.email,
                    i64::from(draft.is_active.unwrap_or(true)),
                    now_rfc3339(),
                ],
            )
            .map_err(sql_err)?;
            let id = PractitionerId::new(conn.last_insert_rowid())?;
            info!(doctor_id = %id, "practitioner created");
            load_practitioner(conn, id)?.ok_or_else(|| Error::not_found("doctor", id))
        })
        .await
    }

    async fn update_practitioner(
        &self,
        id: PractitionerId,
        draft: PractitionerDraft,
    ) -> Result<Practitioner> {
        let draft = draft.normalized()?;
        self.with_conn("update_practitioner", move |conn| {
            let changed = conn
                .execute(
                    "UPDATE practitioner
                     SET full_name = ?1, specialization = ?2, phone = ?3, email = ?4,
                         is_active = COALESCE(?5, is_active)
                     WHERE id = ?6",
                    params![
                        draft.full_name,
                        draft.specialization,
                        draft.phone,
                        draft.email,
                        draft.is_active.map(i64::from),
                        id.get(),
                    ],
                )
                .map_err(sql_err)?;
            if changed == 0 {
                return Err(Error::not_found("doctor", id));
            }
            info!(doctor_id = %id, "practitioner updated");
            load_practitioner(conn, id)?.ok_or_else(|| Error::not_found("doctor", id))
        })
        .await
    }

    async fn remove_practitioner(&self, id: PractitionerId) -> Result<PractitionerRemoval> {
        self.with_conn("remove_practitioner", move |conn| {
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(sql_err)?;
            if load_practitioner(&tx, id)?.is_none() {
                return Err(Error::not_found("doctor", id));
            }
            let referenced: i64 = tx
                .query_row(
                    "SELECT COUNT(*) FROM booking WHERE practitioner_id = ?1",
                    params![id.get()],
                    |row| row.get(0),
                )
                .map_err(sql_err)?;
            let outcome = if referenced == 0 {
                tx.execute("DELETE FROM practitioner WHERE id = ?1", params![id.get()])
                    .map_err(sql_err)?;
                PractitionerRemoval::Deleted
            } else {
                tx.execute(
                    "UPDATE practitioner SET is_active = 0 WHERE id = ?1",
                    params![id.get()],
                )
                .map_err(sql_err)?;
                PractitionerRemoval::Deactivated
            };
            tx.commit().map_err(sql_err)?;
            info!(doctor_id = %id, outcome = outcome.as_str(), referenced, "practitioner removed");
            Ok(outcome)
        })
        .await
    }
}

#[async_trait]
impl AppointmentLedger for SqliteStore {
    async fn check_availability(&self, slot: Slot) -> Result<bool> {
        self.with_conn("check_availability", move |conn| {
            let taken: bool = conn
                .query_row(
                    "SELECT EXISTS (
                        SELECT 1 FROM booking
                        WHERE practitioner_id = ?1 AND appointment_date = ?2
                          AND appointment_time = ?3 AND status != 'cancelled')",
                    params![
                        slot.practitioner_id.get(),
                        slot.appointment_date.to_string(),
                        slot.appointment_time.to_string(),
                    ],
                    |row| row.get(0),
                )
                .map_err(sql_err)?;
            Ok(!taken)
        })
        .await
    }

    async fn create_booking(
        &self,
        account_id: AccountId,
        request: BookingRequest,
    ) -> Result<Booking> {
        self.with_conn("create_booking", move |conn| {
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(sql_err)?;

            let role: Option<String> = tx
                .query_row(
                    "SELECT role FROM account WHERE id = ?1",
                    params![account_id.get()],
                    |row| row.get(0),
                )
                .optional()
                .map_err(sql_err)?;
            let role = role.ok_or_else(|| Error::not_found("account", account_id))?;
            if !Role::parse(&role)?.may_book() {
                return Err(ValidationFailure::IneligibleRole.into());
            }

            let active: Option<bool> = tx
                .query_row(
                    "SELECT is_active FROM practitioner WHERE id = ?1",
                    params![request.practitioner_id.get()],
                    |row| row.get::<_, i64>(0).map(|v| v != 0),
                )
                .optional()
                .map_err(sql_err)?;
            if active != Some(true) {
                return Err(Error::not_found("doctor", request.practitioner_id));
            }

            let inserted = tx.execute(
                "INSERT INTO booking (account_id, practitioner_id, appointment_date, appointment_time, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, 'scheduled', ?5)",
                params![
                    account_id.get(),
                    request.practitioner_id.get(),
                    request.appointment_date.to_string(),
                    request.appointment_time.to_string(),
                    now_rfc3339(),
                ],
            );
            if let Err(err) = inserted {
                if is_unique_violation(&err) {
                    warn!(
                        doctor_id = %request.practitioner_id,
                        date = %request.appointment_date,
                        time = %request.appointment_time,
                        "slot already taken"
                    );
                    return Err(request.slot().conflict().into());
                }
                return Err(sql_err(err));
            }

            let id = BookingId::new(tx.last_insert_rowid())?;
            let booking =
                load_booking(&tx, id)?.ok_or_else(|| Error::not_found("appointment", id))?;
            tx.commit().map_err(sql_err)?;
            info!(
                appointment_id = %booking.id,
                account_id = %account_id,
                doctor_id = %booking.practitioner_id,
                "appointment booked"
            );
            Ok(booking)
        })
        .await
    }

    async fn list_by_account(&self, account_id: AccountId) -> Result<Vec<BookingDetails>> {
        self.with_conn("list_by_account", move |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "{BOOKING_DETAILS_SELECT} WHERE b.account_id = ?1
                     ORDER BY b.appointment_date DESC, b.appointment_time DESC, b.id DESC"
                ))
                .map_err(sql_err)?;
            let rows = stmt
                .query_map(params![account_id.get()], booking_details_from_row)
                .map_err(sql_err)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sql_err)
        })
        .await
    }

    async fn find_booking(&self, id: BookingId) -> Result<Option<Booking>> {
        self.with_conn("find_booking", move |conn| load_booking(conn, id))
            .await
    }

    async fn update_status(&self, id: BookingId, next: BookingStatus) -> Result<Booking> {
        self.with_conn("update_status", move |conn| {
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(sql_err)?;
            let current =
                load_booking(&tx, id)?.ok_or_else(|| Error::not_found("appointment", id))?;
            let status = current.status.transition_to(next)?;
            tx.execute(
                "UPDATE booking SET status = ?1 WHERE id = ?2",
                params![status.as_str(), id.get()],
            )
            .map_err(sql_err)?;
            let updated =
                load_booking(&tx, id)?.ok_or_else(|| Error::not_found("appointment", id))?;
            tx.commit().map_err(sql_err)?;
            info!(
                appointment_id = %id,
                from = %current.status,
                to = %updated.status,
                "appointment status changed"
            );
            Ok(updated)
        })
        .await
    }

    async fn occupied_times(
        &self,
        practitioner_id: PractitionerId,
        date: AppointmentDate,
    ) -> Result<Vec<AppointmentTime>> {
        self.with_conn("occupied_times", move |conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT appointment_time FROM booking
                     WHERE practitioner_id = ?1 AND appointment_date = ?2 AND status != 'cancelled'
                     ORDER BY appointment_time",
                )
                .map_err(sql_err)?;
            let raw = stmt
                .query_map(params![practitioner_id.get(), date.to_string()], |row| {
                    row.get::<_, String>(0)
                })
                .map_err(sql_err)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(sql_err)?;
            raw.iter().map(|t| AppointmentTime::parse(t)).collect()
        })
        .await
    }
}
