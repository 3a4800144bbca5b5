//! Configuration Module - TOML-based Service Configuration
//!
//! Loads and validates configuration from `config.toml`. The remote
//! endpoint, sync interval, and data directory are all externalized
//! here - nothing is hardcoded in the domain layer.

pub mod loader;

use serde::Deserialize;

/// Top-level service configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before the service begins operation.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Service identity and logging.
  pub service: ServiceConfig,
  /// Remote synchronization parameters.
  pub sync: SyncConfig,
  /// Persistence configuration.
  pub persistence: PersistenceConfig,
  /// Health and metrics endpoints.
  pub observability: ObservabilityConfig,
}

/// Service identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
  /// Human-readable service name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Remote synchronization configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
  /// Remote record endpoint (read-only GET).
  pub remote_url: String,
  /// Seconds between periodic reconcile passes.
  #[serde(default = "default_interval")]
  pub interval_seconds: u64,
  /// Request timeout in seconds.
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
  /// Category substituted when a remote body is missing or blank.
  #[serde(default = "default_fallback_category")]
  pub fallback_category: String,
  /// Maximum retries on transient fetch errors.
  #[serde(default = "default_max_retries")]
  pub max_retries: u32,
  /// Base delay between retries in milliseconds (exponential backoff).
  #[serde(default = "default_retry_base_delay")]
  pub retry_base_delay_ms: u64,
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
  /// Directory for the quotes file and preference file.
  #[serde(default = "default_data_dir")]
  pub data_dir: String,
}

/// Health and metrics configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
  /// Enable the health/metrics HTTP server.
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// Bind address for `/live`, `/ready`, and `/metrics`.
  #[serde(default = "default_bind_address")]
  pub bind_address: String,
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_interval() -> u64 {
  60
}

fn default_timeout() -> u64 {
  10
}

fn default_fallback_category() -> String {
  "Server".to_string()
}

fn default_max_retries() -> u32 {
  3
}

fn default_retry_base_delay() -> u64 {
  200
}

fn default_data_dir() -> String {
  "data".to_string()
}

fn default_true() -> bool {
  true
}

fn default_bind_address() -> String {
  "127.0.0.1:9090".to_string()
}
