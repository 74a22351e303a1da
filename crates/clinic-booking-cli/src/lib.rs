// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Operator commands for the clinic booking database: schema setup, demo
//! data, administrator accounts and a directory listing.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use clinic_booking_core::{Error, ExitCode, ENV_CLINIC_DB_PATH};
use clinic_booking_model::{parse_birth_date, NewAccount, Practitioner, Role};
use clinic_booking_store::{
    seed_demo_practitioners, CredentialStore, PractitionerDirectory, SqliteStore, SCHEMA_VERSION,
};
use serde_json::json;
use tracing::info;

pub const CRATE_NAME: &str = "clinic-booking-cli";

#[derive(Debug, Parser)]
#[command(name = "clinic-booking")]
#[command(about = "Clinic booking operations CLI", version)]
pub struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, env = ENV_CLINIC_DB_PATH, default_value = "clinic.db")]
    pub db: PathBuf,
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create or migrate the database schema.
    InitDb {
        /// Load the demo practitioners when the directory is empty.
        #[arg(long, default_value_t = false)]
        seed_demo: bool,
    },
    /// Create an administrator account.
    CreateAdmin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "CLINIC_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        birth_date: String,
        #[arg(long)]
        phone: String,
    },
    /// Print the practitioner directory ordered by name.
    ListDoctors {
        /// Include deactivated practitioners.
        #[arg(long, default_value_t = false)]
        all: bool,
    },
}

/// Failure of a CLI run, carrying the process exit code.
#[derive(Debug)]
pub struct CliError {
    pub exit_code: ExitCode,
    pub message: String,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<Error> for CliError {
    fn from(err: Error) -> Self {
        Self {
            exit_code: err.exit_code(),
            message: err.to_string(),
        }
    }
}

impl CliError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            message: message.into(),
        }
    }
}

pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::internal(format!("tokio runtime: {e}")))?;
    runtime.block_on(dispatch(cli))
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::InitDb { seed_demo } => init_db(&cli.db, seed_demo, cli.json).await,
        Command::CreateAdmin {
            username,
            email,
            password,
            full_name,
            birth_date,
            phone,
        } => {
            let account = NewAccount {
                username: username.trim().to_string(),
                email: email.trim().to_string(),
                password,
                full_name: full_name.trim().to_string(),
                birth_date: parse_birth_date(&birth_date)?,
                phone: phone.trim().to_string(),
                role: Role::Admin,
            };
            create_admin(&cli.db, account, cli.json).await
        }
        Command::ListDoctors { all } => list_doctors(&cli.db, all, cli.json).await,
    }
}

fn emit(json: bool, payload: &serde_json::Value, plain: &str) -> Result<(), CliError> {
    if json {
        let text = serde_json::to_string(payload).map_err(|e| CliError::internal(e.to_string()))?;
        println!("{text}");
    } else {
        println!("{plain}");
    }
    Ok(())
}

async fn init_db(db: &Path, seed_demo: bool, json: bool) -> Result<(), CliError> {
    let store = SqliteStore::open(db)?;
    let seeded = if seed_demo {
        seed_demo_practitioners(&store).await?
    } else {
        0
    };
    info!(path = %db.display(), seeded, "database ready");
    emit(
        json,
        &json!({
            "db": db.display().to_string(),
            "schema_version": SCHEMA_VERSION,
            "seeded_practitioners": seeded,
        }),
        &format!(
            "database {} at schema v{SCHEMA_VERSION}, {seeded} demo practitioners added",
            db.display()
        ),
    )
}

async fn create_admin(db: &Path, account: NewAccount, json: bool) -> Result<(), CliError> {
    account.validate()?;
    let store = SqliteStore::open(db)?;
    let created = store.create_account(account).await?;
    info!(account_id = %created.id, "administrator created");
    emit(
        json,
        &json!({"id": created.id, "username": created.username, "role": created.role}),
        &format!("created admin {} (id {})", created.username, created.id),
    )
}

fn doctor_line(p: &Practitioner) -> String {
    format!(
        "{:>4}  {:<28} {:<18} {}",
        p.id,
        p.full_name,
        p.specialization,
        if p.is_active { "active" } else { "inactive" }
    )
}

async fn list_doctors(db: &Path, all: bool, json: bool) -> Result<(), CliError> {
    let store = SqliteStore::open(db)?;
    let doctors = store.list_practitioners(all).await?;
    let plain = doctors
        .iter()
        .map(doctor_line)
        .collect::<Vec<_>>()
        .join("\n");
    emit(json, &json!({ "doctors": doctors }), &plain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn storage_errors_keep_their_exit_code() {
        let err = CliError::from(Error::storage("disk full"));
        assert_eq!(err.exit_code, ExitCode::DependencyFailure);
        let err = CliError::from(Error::invalid_field("username", "too short"));
        assert_eq!(err.exit_code, ExitCode::Validation);
    }
}
