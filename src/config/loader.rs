//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  info!(
    remote = %config.sync.remote_url,
    interval_secs = config.sync.interval_seconds,
    data_dir = %config.persistence.data_dir,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty identity and endpoint values
/// - A usable remote URL scheme
/// - Positive timing values
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.service.name.trim().is_empty(),
    "Service name must not be empty"
  );

  anyhow::ensure!(
    !config.sync.remote_url.is_empty(),
    "Remote URL must not be empty"
  );
  anyhow::ensure!(
    config.sync.remote_url.starts_with("http://")
      || config.sync.remote_url.starts_with("https://"),
    "Remote URL must be http(s), got {}",
    config.sync.remote_url
  );
  anyhow::ensure!(
    config.sync.interval_seconds > 0,
    "Sync interval must be positive, got {}",
    config.sync.interval_seconds
  );
  anyhow::ensure!(
    config.sync.timeout_seconds > 0,
    "Request timeout must be positive, got {}",
    config.sync.timeout_seconds
  );
  anyhow::ensure!(
    !config.sync.fallback_category.trim().is_empty(),
    "Fallback category must not be empty"
  );

  anyhow::ensure!(
    !config.persistence.data_dir.trim().is_empty(),
    "Data directory must not be empty"
  );

  if config.observability.enabled {
    anyhow::ensure!(
      config
        .observability
        .bind_address
        .parse::<std::net::SocketAddr>()
        .is_ok(),
      "Bind address must be host:port, got {}",
      config.observability.bind_address
    );
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn minimal_toml() -> &'static str {
    r#"
      [service]
      name = "quotesync"

      [sync]
      remote_url = "https://example.test/posts"

      [persistence]

      [observability]
    "#
  }

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_defaults_applied() {
    let config: AppConfig = toml::from_str(minimal_toml()).unwrap();
    assert_eq!(config.sync.interval_seconds, 60);
    assert_eq!(config.sync.fallback_category, "Server");
    assert_eq!(config.persistence.data_dir, "data");
    assert!(config.observability.enabled);
    validate_config(&config).unwrap();
  }

  #[test]
  fn test_zero_interval_rejected() {
    let mut config: AppConfig = toml::from_str(minimal_toml()).unwrap();
    config.sync.interval_seconds = 0;
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_non_http_url_rejected() {
    let mut config: AppConfig = toml::from_str(minimal_toml()).unwrap();
    config.sync.remote_url = "ftp://example.test".to_string();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_bad_bind_address_rejected() {
    let mut config: AppConfig = toml::from_str(minimal_toml()).unwrap();
    config.observability.bind_address = "not-an-address".to_string();
    assert!(validate_config(&config).is_err());
  }
}
