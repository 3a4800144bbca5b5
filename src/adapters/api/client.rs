//! Remote HTTP Client - Retrying GET against the quote source
//!
//! Wraps reqwest with a request timeout and bounded retries for the
//! single remote endpoint the sync engine reconciles against.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::ports::remote_source::{RemoteItem, RemoteSource};

/// Configuration for the remote HTTP client.
#[derive(Debug, Clone)]
pub struct RemoteClientConfig {
  /// Full URL of the remote record endpoint.
  pub endpoint: String,
  /// Request timeout.
  pub timeout: Duration,
  /// Maximum retries on transient errors.
  pub max_retries: u32,
  /// Base delay between retries (exponential backoff).
  pub retry_base_delay: Duration,
}

impl Default for RemoteClientConfig {
  fn default() -> Self {
    Self {
      endpoint: "https://jsonplaceholder.typicode.com/posts".to_string(),
      timeout: Duration::from_secs(10),
      max_retries: 3,
      retry_base_delay: Duration::from_millis(200),
    }
  }
}

/// HTTP client for the remote quote source.
pub struct RemoteClient {
  /// Underlying HTTP client.
  http: Client,
  /// Client configuration.
  config: RemoteClientConfig,
}

impl RemoteClient {
  /// Create a new remote client.
  pub fn new(config: RemoteClientConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self { http, config })
  }

  /// Execute the GET with retries on transport errors and 5xx.
  async fn get_with_retry(&self) -> Result<Response> {
    let mut last_error = None;

    for attempt in 0..=self.config.max_retries {
      if attempt > 0 {
        let delay = self.config.retry_base_delay * 2u32.pow(attempt - 1);
        debug!(attempt, delay_ms = delay.as_millis(), "Retrying fetch");
        sleep(delay).await;
      }

      match self.http.get(&self.config.endpoint).send().await {
        Ok(response) => match response.status() {
          StatusCode::OK => return Ok(response),
          StatusCode::TOO_MANY_REQUESTS => {
            warn!("Rate limited by remote source, backing off");
            last_error = Some(anyhow::anyhow!("Rate limited"));
            continue;
          }
          status if status.is_server_error() => {
            warn!(status = %status, "Server error, retrying");
            last_error = Some(anyhow::anyhow!("Server error: {status}"));
            continue;
          }
          status => {
            return Err(anyhow::anyhow!("Remote source returned {status}"));
          }
        },
        Err(e) => {
          warn!(error = %e, attempt, "Fetch failed");
          last_error = Some(e.into());
          continue;
        }
      }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Max retries exceeded")))
  }
}

#[async_trait]
impl RemoteSource for RemoteClient {
  async fn fetch(&self) -> Result<Vec<RemoteItem>> {
    let response = self.get_with_retry().await?;

    response
      .json::<Vec<RemoteItem>>()
      .await
      .context("Failed to decode remote record payload")
  }

  async fn is_healthy(&self) -> bool {
    self.get_with_retry().await.is_ok()
  }
}
