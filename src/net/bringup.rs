// src/net/bringup.rs

//! Listener bring-up with bounded retries.
//!
//! Exhausting the retries returns `MuxError::BringUpFailed` and the caller
//! picks the policy (the bundled binary logs it and exits non-zero).

use std::net::TcpListener;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::BringupConfig;
use crate::core::MuxError;

/// Attempts to bind the listening socket, sleeping `retry_delay_ms` between
/// failed attempts, up to `max_retries` attempts in total.
pub async fn bind_with_retry(
    host: &str,
    port: u16,
    cfg: &BringupConfig,
) -> Result<TcpListener, MuxError> {
    let delay = Duration::from_millis(cfg.retry_delay_ms);
    let mut last_err: Option<std::io::Error> = None;

    for attempt in 1..=cfg.max_retries {
        match TcpListener::bind((host, port)) {
            Ok(listener) => {
                info!(%host, port, attempt, "listener bound");
                return Ok(listener);
            }
            Err(e) => {
                warn!(%host, port, attempt, error = %e, "bind failed; retrying");
                last_err = Some(e);
            }
        }
        if attempt < cfg.max_retries {
            tokio::time::sleep(delay).await;
        }
    }

    Err(MuxError::BringUpFailed {
        attempts: cfg.max_retries,
        last: last_err.map_or_else(|| "no attempts made".to_string(), |e| e.to_string()),
    })
}
