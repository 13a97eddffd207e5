// src/server/mod.rs

//! The outer polling loop: listener bring-up, multiplexer construction, and
//! the tick driver with graceful shutdown.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;
use tokio::signal::unix::{SignalKind, signal};
use tracing::info;

use crate::config::Config;
use crate::mux::{Decode, DispatchTable, Multiplexer};
use crate::net::{self, TcpSlotListener};

/// Binds the listener (with bounded retries) and drives polling cycles until
/// SIGINT/SIGTERM arrives or `shutdown` is set, e.g. by a dispatch handler.
pub async fn run<D: Decode>(
    config: Config,
    decoder: D,
    dispatch: DispatchTable,
    shutdown: Arc<AtomicBool>,
) -> Result<()> {
    let listener = net::bind_with_retry(&config.host, config.port, &config.bringup).await?;
    let listener = TcpSlotListener::new(listener)?;
    info!(
        "slotmux listening on {}:{} with {} client slots",
        config.host, config.port, config.max_clients
    );

    let mut mux = Multiplexer::new(listener, config.max_clients, decoder, dispatch);

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_interval_ms));

    loop {
        tokio::select! {
            biased;

            _ = sigint.recv() => {
                info!("SIGINT received, shutting down.");
                break;
            }
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down.");
                break;
            }

            _ = ticker.tick() => {
                if shutdown.load(Ordering::Relaxed) {
                    info!("Shutdown requested by command handler.");
                    break;
                }
                mux.poll_cycle();
            }
        }
    }

    info!("Server shutdown complete.");
    Ok(())
}
