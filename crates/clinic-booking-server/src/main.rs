// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use std::sync::Arc;

use clinic_booking_core::sha256_hex;
use clinic_booking_server::telemetry::init_tracing;
use clinic_booking_server::{
    build_router, validate_startup_config_contract, AppState, ServerConfig,
};
use clinic_booking_store::SqliteStore;
use tokio::net::TcpListener;
use tracing::{info, warn};

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("signal handlers unavailable, falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = ServerConfig::from_env();
    init_tracing(config.log_json);
    validate_startup_config_contract(&config)?;

    let store = SqliteStore::open(&config.db_path)
        .map_err(|e| format!("open database {}: {e}", config.db_path.display()))?;
    let fingerprint = sha256_hex(config.token_secret.as_bytes());
    info!(
        config = ?config,
        token_key_fingerprint = fingerprint.get(..12).unwrap_or_default(),
        "clinic-booking-server starting"
    );

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(Arc::new(store), config);
    let app = build_router(state);

    let addr: std::net::SocketAddr = bind_addr
        .parse()
        .map_err(|e| format!("invalid bind addr {bind_addr}: {e}"))?;
    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4().map_err(|e| format!("socket v4 failed: {e}"))?
    } else {
        tokio::net::TcpSocket::new_v6().map_err(|e| format!("socket v6 failed: {e}"))?
    };
    socket
        .set_reuseaddr(true)
        .map_err(|e| format!("set_reuseaddr failed: {e}"))?;
    socket.bind(addr).map_err(|e| format!("bind failed: {e}"))?;
    let listener: TcpListener = socket
        .listen(1024)
        .map_err(|e| format!("listen failed: {e}"))?;
    info!("clinic-booking-server listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            wait_for_shutdown_signal().await;
            info!("shutdown signal received, draining requests");
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
