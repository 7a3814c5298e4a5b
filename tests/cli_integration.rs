//! CLI integration tests.
//!
//! These tests verify the CLI argument parsing and configuration loading.

use std::ffi::OsString;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

use order_desk::cli::{parse_args_from, Args};
use order_desk::config::Config;

fn args(args: &[&str]) -> Vec<OsString> {
    std::iter::once("order-desk")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

fn config_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

// ============================================================================
// CLI Argument Tests
// ============================================================================

#[test]
fn test_cli_defaults() {
    let result = parse_args_from(args(&[])).unwrap();

    assert!(result.host.is_none());
    assert!(result.port.is_none());
    assert!(result.config.is_none());
    assert!(result.backend_url.is_none());
    assert!(!result.in_memory);
    assert!(!result.help);
}

#[test]
fn test_cli_full_options() {
    let result = parse_args_from(args(&[
        "-H",
        "0.0.0.0",
        "-p",
        "8080",
        "-b",
        "https://orders.internal:3001",
        "--max-retries",
        "2",
        "-l",
        "debug",
        "--in-memory",
    ]))
    .unwrap();

    assert_eq!(result.host.unwrap().to_string(), "0.0.0.0");
    assert_eq!(result.port, Some(8080));
    assert_eq!(
        result.backend_url.as_deref(),
        Some("https://orders.internal:3001")
    );
    assert_eq!(result.max_retries, Some(2));
    assert_eq!(result.log_level, Some("debug".to_string()));
    assert!(result.in_memory);
}

#[test]
fn test_cli_config_file() {
    let result = parse_args_from(args(&["-c", "/etc/order-desk.json"])).unwrap();

    assert_eq!(
        result.config.unwrap().to_str().unwrap(),
        "/etc/order-desk.json"
    );
}

#[test]
fn test_cli_invalid_port() {
    let result = parse_args_from(args(&["-p", "not-a-number"]));
    assert!(result.is_err());
}

#[test]
fn test_cli_invalid_host() {
    let result = parse_args_from(args(&["-H", "not-an-ip"]));
    assert!(result.is_err());
}

#[test]
fn test_cli_unknown_flag() {
    let result = parse_args_from(args(&["--no-auth"]));
    assert!(result.is_err());
}

// ============================================================================
// Configuration Loading Tests
// ============================================================================

#[test]
fn test_config_file_then_args() {
    let file = config_file(
        r#"{
            "server": { "port": 7000, "graceful_shutdown": false },
            "backend": { "base_url": "http://file:3001", "in_memory": false },
            "sessions": { "idle_ttl_secs": 60 }
        }"#,
    );

    let mut config = Config::from_file(file.path()).unwrap();
    let args = Args {
        backend_url: Some("http://cli:3001".to_string()),
        ..Args::default()
    };
    config.apply_args(&args);

    assert_eq!(config.server.port, 7000);
    assert_eq!(config.backend.base_url, "http://cli:3001");

    let server = config.to_server_config().unwrap();
    assert!(!server.graceful_shutdown);
    assert_eq!(server.idle_ttl, Duration::from_secs(60));
}

#[test]
fn test_config_missing_file() {
    let args = Args {
        config: Some("/nonexistent/order-desk.json".into()),
        ..Args::default()
    };
    assert!(Config::load(&args).is_err());
}

#[test]
fn test_config_rejects_zero_timeout() {
    let file = config_file(r#"{ "backend": { "timeout_ms": 0 } }"#);
    let args = Args {
        config: Some(file.path().to_path_buf()),
        ..Args::default()
    };
    assert!(Config::load(&args).is_err());
}

#[test]
fn test_config_policy_from_file() {
    let file = config_file(
        r#"{
            "backend": { "timeout_ms": 1200 },
            "dialogue": { "max_slot_retries": 4, "return_window_days": 30 }
        }"#,
    );

    let config = Config::from_file(file.path()).unwrap();
    let policy = config.to_policy();
    assert_eq!(policy.max_slot_retries, 4);
    assert_eq!(policy.return_window_days, 30);
    assert_eq!(policy.backend_timeout, Duration::from_millis(1200));
}
