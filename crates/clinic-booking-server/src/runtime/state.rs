// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use clinic_booking_store::{AppointmentLedger, CredentialStore, PractitionerDirectory};

use crate::access::TokenSigner;
use crate::config::ServerConfig;
use crate::services::booking::BookingService;

/// Shared per-process state handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub(crate) credentials: Arc<dyn CredentialStore>,
    pub(crate) directory: Arc<dyn PractitionerDirectory>,
    pub(crate) booking: BookingService,
    pub(crate) signer: TokenSigner,
    pub(crate) config: Arc<ServerConfig>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
    fixed_today: Option<NaiveDate>,
}

impl AppState {
    /// Builds the state from one store that serves all three storage roles.
    #[must_use]
    pub fn new<S>(store: Arc<S>, config: ServerConfig) -> Self
    where
        S: CredentialStore + PractitionerDirectory + AppointmentLedger,
    {
        let credentials: Arc<dyn CredentialStore> = store.clone();
        let directory: Arc<dyn PractitionerDirectory> = store.clone();
        let ledger: Arc<dyn AppointmentLedger> = store;
        let signer = TokenSigner::new(config.token_secret.as_bytes(), config.token_ttl);
        Self {
            credentials,
            booking: BookingService::new(directory.clone(), ledger),
            directory,
            signer,
            config: Arc::new(config),
            request_id_seed: Arc::new(AtomicU64::new(1)),
            fixed_today: None,
        }
    }

    /// Pins the calendar date used by the slot and calendar endpoints.
    #[must_use]
    pub fn with_fixed_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    #[must_use]
    pub fn booking(&self) -> &BookingService {
        &self.booking
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub(crate) fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }
}
