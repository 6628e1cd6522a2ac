//! Environment-variable loading tests.
//!
//! These mutate process environment, so they run serially.

use std::time::Duration;

use cleanroom_config::loader::{ConfigLoader, ENV_BASE_URL, ENV_MAX_RETRIES, ENV_TIMEOUT_SECS};
use serial_test::serial;

fn clear_env() {
    unsafe {
        std::env::remove_var(ENV_BASE_URL);
        std::env::remove_var(ENV_TIMEOUT_SECS);
        std::env::remove_var(ENV_MAX_RETRIES);
    }
}

#[test]
#[serial]
fn test_env_overrides_defaults() {
    clear_env();
    unsafe {
        std::env::set_var(ENV_BASE_URL, "http://cleanroom.internal:3101/api");
        std::env::set_var(ENV_TIMEOUT_SECS, "60");
        std::env::set_var(ENV_MAX_RETRIES, "5");
    }

    let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
    assert_eq!(
        config.connection.base_url,
        "http://cleanroom.internal:3101/api"
    );
    assert_eq!(config.connection.timeout, Duration::from_secs(60));
    assert_eq!(config.connection.max_retries, 5);

    clear_env();
}

#[test]
#[serial]
fn test_cli_override_beats_env() {
    clear_env();
    unsafe {
        std::env::set_var(ENV_BASE_URL, "http://from-env:3101/api");
    }

    let config = ConfigLoader::new()
        .from_env()
        .unwrap()
        .with_base_url(Some("http://from-cli:3101/api".to_string()))
        .build()
        .unwrap();
    assert_eq!(config.connection.base_url, "http://from-cli:3101/api");

    clear_env();
}

#[test]
#[serial]
fn test_invalid_timeout_rejected() {
    clear_env();
    unsafe {
        std::env::set_var(ENV_TIMEOUT_SECS, "zero");
    }

    let result = ConfigLoader::new().from_env();
    assert!(result.is_err());

    clear_env();
}

#[test]
#[serial]
fn test_zero_timeout_rejected() {
    clear_env();
    unsafe {
        std::env::set_var(ENV_TIMEOUT_SECS, "0");
    }

    let result = ConfigLoader::new().from_env();
    assert!(result.is_err());

    clear_env();
}
