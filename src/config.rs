// src/config.rs

//! Manages server configuration: loading, defaults, and validation.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3333
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_max_clients() -> usize {
    8
}
fn default_tick_interval_ms() -> u64 {
    50
}
fn default_max_retries() -> u32 {
    51
}
fn default_retry_delay_ms() -> u64 {
    200
}

/// Bounded-retry settings for binding the listening socket at startup.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BringupConfig {
    /// Bind attempts before giving up.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay between attempts, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for BringupConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// The resolved server configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Number of client slots. Fixed for the process lifetime; a client
    /// arriving with every slot live is silently dropped.
    #[serde(default = "default_max_clients")]
    pub max_clients: usize,
    /// Milliseconds between polling cycles.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub bringup: BringupConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            max_clients: default_max_clients(),
            tick_interval_ms: default_tick_interval_ms(),
            bringup: BringupConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new `Config` instance by reading and parsing a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML from '{path}'"))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration to ensure logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("port cannot be 0"));
        }
        if self.host.trim().is_empty() {
            return Err(anyhow!("host cannot be empty"));
        }
        if self.max_clients == 0 {
            return Err(anyhow!("max_clients cannot be 0"));
        }
        if self.tick_interval_ms == 0 {
            return Err(anyhow!("tick_interval_ms cannot be 0"));
        }
        if self.bringup.max_retries == 0 {
            return Err(anyhow!("bringup.max_retries cannot be 0"));
        }
        Ok(())
    }
}
