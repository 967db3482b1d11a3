//! Configuration loading from environment variables.
//!
//! Tests touching the process environment run serially.

use serial_test::serial;
use std::time::Duration;

use coze_chat::client::ChatClient;
use coze_chat::config::{CozeConfig, ENV_API_BASE, ENV_API_TOKEN, ENV_TIMEOUT_SECS};
use coze_chat::error::CozeError;

fn clear_env() {
    std::env::remove_var(ENV_API_TOKEN);
    std::env::remove_var(ENV_API_BASE);
    std::env::remove_var(ENV_TIMEOUT_SECS);
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    std::env::set_var(ENV_API_TOKEN, "pat_env");

    let config = CozeConfig::from_env().unwrap();
    assert_eq!(config.api_token, "pat_env");
    assert_eq!(config.base_url, "https://api.coze.com");
    assert_eq!(config.timeout, Duration::from_secs(600));

    clear_env();
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var(ENV_API_TOKEN, "pat_env");
    std::env::set_var(ENV_API_BASE, "https://api.coze.cn/");
    std::env::set_var(ENV_TIMEOUT_SECS, "45");

    let config = CozeConfig::from_env().unwrap();
    assert_eq!(config.base_url, "https://api.coze.cn");
    assert_eq!(config.timeout, Duration::from_secs(45));
    assert_eq!(config.endpoint("/v3/chat"), "https://api.coze.cn/v3/chat");

    clear_env();
}

#[test]
#[serial]
fn test_from_env_missing_token() {
    clear_env();

    let err = CozeConfig::from_env().unwrap_err();
    assert!(matches!(err, CozeError::Config(_)));
    assert_eq!(err.error_code(), "E_CONFIG");

    assert!(matches!(ChatClient::from_env(), Err(CozeError::Config(_))));
}

#[test]
#[serial]
fn test_from_env_invalid_base_url() {
    clear_env();
    std::env::set_var(ENV_API_TOKEN, "pat_env");
    std::env::set_var(ENV_API_BASE, "ftp://api.coze.com");

    assert!(matches!(CozeConfig::from_env(), Err(CozeError::Config(_))));

    clear_env();
}
