// SPDX-License-Identifier: Apache-2.0

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const AUDIT_TARGET: &str = "clinic_audit";

/// Installs the global subscriber. `RUST_LOG` wins over the `info` default.
pub fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// One audit line per request. Bodies and credentials are never logged.
pub fn emit_audit(request_id: &str, method: &str, path: &str, status: u16, latency_ms: u64) {
    tracing::info!(
        target: AUDIT_TARGET,
        request_id = %request_id,
        method = %method,
        path = %path,
        status = status,
        latency_ms = latency_ms,
        "audit"
    );
}
