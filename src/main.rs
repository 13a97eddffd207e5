// src/main.rs

//! The main entry point for the slotmux server binary.

use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::Result;
use slotmux::config::Config;
use slotmux::mux::{ActionCode, DispatchTable};
use slotmux::server;
use tracing::{error, info};

// Built-in housekeeping commands. Real deployments register their own
// decoder and handlers; these show the wiring end to end.
const ACT_PING: ActionCode = ActionCode::new(1);
const ACT_UPTIME: ActionCode = ActionCode::new(2);
const ACT_SHUTDOWN: ActionCode = ActionCode::new(3);

#[tokio::main]
async fn main() -> Result<()> {
    // Define version information.
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Collect command-line arguments to decide the execution mode.
    let args: Vec<String> = env::args().collect();

    // Handle the --version flag.
    if args.contains(&"--version".to_string()) {
        println!("slotmux version {VERSION}");
        return Ok(());
    }

    // Determine the configuration. A file can be provided via --config;
    // otherwise built-in defaults apply.
    let config_path = args
        .iter()
        .position(|arg| arg == "--config")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str());

    let mut config = match config_path {
        Some(path) => match Config::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load configuration from \"{path}\": {e}");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    // Override port if provided as a command-line argument.
    if let Some(port_index) = args.iter().position(|arg| arg == "--port") {
        match args.get(port_index + 1).map(|s| s.parse::<u16>()) {
            Some(Ok(port)) => config.port = port,
            _ => {
                eprintln!("--port flag requires a valid port number");
                std::process::exit(1);
            }
        }
    }

    // Get the log level from the env var or config, then set up logging
    // with the compact format and ANSI colors.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .compact()
        .with_ansi(true)
        .init();

    info!("Starting slotmux {VERSION}...");

    let shutdown = Arc::new(AtomicBool::new(false));
    let started = Instant::now();

    let mut dispatch = DispatchTable::new();
    dispatch.register(ACT_PING, || info!("PONG"))?;
    dispatch.register(ACT_UPTIME, move || {
        info!("uptime: {:?}", started.elapsed());
    })?;
    let shutdown_flag = shutdown.clone();
    dispatch.register(ACT_SHUTDOWN, move || {
        info!("shutdown command received");
        shutdown_flag.store(true, Ordering::Relaxed);
    })?;

    let decoder = |message: &str| match message.trim() {
        "PING" => ACT_PING,
        "UPTIME" => ACT_UPTIME,
        "SHUTDOWN" => ACT_SHUTDOWN,
        _ => ActionCode::NONE,
    };

    if let Err(e) = server::run(config, decoder, dispatch, shutdown).await {
        error!("Server runtime error: {}", e);
        return Err(e);
    }

    Ok(())
}
