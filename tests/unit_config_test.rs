use std::io::Write;

use slotmux::config::{BringupConfig, Config};
use tempfile::NamedTempFile;

#[test]
fn test_defaults_are_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.max_clients, 8);
    assert_eq!(config.bringup.max_retries, 51);
    assert_eq!(config.bringup.retry_delay_ms, 200);
}

#[test]
fn test_from_file_parses_and_fills_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
host = "127.0.0.1"
port = 9000
max_clients = 4

[bringup]
max_retries = 3
"#
    )
    .unwrap();

    let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9000);
    assert_eq!(config.max_clients, 4);
    assert_eq!(config.bringup.max_retries, 3);
    // Unset fields fall back to defaults.
    assert_eq!(config.tick_interval_ms, 50);
    assert_eq!(config.bringup.retry_delay_ms, 200);
}

#[test]
fn test_from_file_rejects_invalid_toml() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "port = \"not a number\"").unwrap();
    assert!(Config::from_file(file.path().to_str().unwrap()).is_err());
}

#[test]
fn test_from_file_missing_path_is_error() {
    assert!(Config::from_file("/definitely/not/here.toml").is_err());
}

#[test]
fn test_validate_rejects_zero_values() {
    let zero_port = Config {
        port: 0,
        ..Config::default()
    };
    assert!(zero_port.validate().is_err());

    let zero_slots = Config {
        max_clients: 0,
        ..Config::default()
    };
    assert!(zero_slots.validate().is_err());

    let zero_tick = Config {
        tick_interval_ms: 0,
        ..Config::default()
    };
    assert!(zero_tick.validate().is_err());

    let zero_retries = Config {
        bringup: BringupConfig {
            max_retries: 0,
            retry_delay_ms: 1,
        },
        ..Config::default()
    };
    assert!(zero_retries.validate().is_err());

    let empty_host = Config {
        host: "  ".to_string(),
        ..Config::default()
    };
    assert!(empty_host.validate().is_err());
}
