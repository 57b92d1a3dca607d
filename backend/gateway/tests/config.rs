#![allow(clippy::unwrap_used)]

use common_utils::consts::Env;
use gateway::{configs::workspace_path, GatewayConfig};

fn workspace_config(file_name: &str) -> std::path::PathBuf {
    workspace_path().join("config").join(file_name)
}

#[test]
fn reads_development_config() {
    let config =
        GatewayConfig::new_with_config_path(Some(workspace_config("development.toml"))).unwrap();

    assert_eq!(config.common.environment, Env::Development);
    assert_eq!(
        config.connectors.alliedwallet.base_url,
        "https://api.alliedwallet.com/"
    );
    assert!(config.log.console.enabled);
    assert_eq!(config.proxy.idle_pool_connection_timeout, Some(90));
    assert!(config.proxy.bypass_proxy_urls.is_empty());
}

#[test]
fn reads_sandbox_config() {
    let config =
        GatewayConfig::new_with_config_path(Some(workspace_config("sandbox.toml"))).unwrap();

    assert_eq!(config.common.environment, Env::Sandbox);
    assert_eq!(
        config.connectors.alliedwallet.base_url,
        "https://api.alliedwallet.com/"
    );
}

#[test]
fn reads_production_config() {
    let config =
        GatewayConfig::new_with_config_path(Some(workspace_config("production.toml"))).unwrap();

    assert_eq!(config.common.environment, Env::Production);
    assert!(!config.connectors.alliedwallet.base_url.is_empty());
}

#[test]
fn default_lookup_finds_workspace_config() {
    let config = GatewayConfig::new().unwrap();

    assert!(!config.connectors.alliedwallet.base_url.is_empty());
}

#[test]
fn missing_config_file_is_an_error() {
    let result = GatewayConfig::new_with_config_path(Some(std::path::PathBuf::from(
        "does/not/exist.toml",
    )));

    assert!(result.is_err());
}
