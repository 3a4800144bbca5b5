//! File Store - Atomic Key-Value Persistence
//!
//! Saves the quote list to `quotes.json` and the selected-category
//! preference to `selected_category`, each using atomic writes (write
//! to tmp file, then rename). This guarantees the stored value is
//! always either the old or the new document, never a partial write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use crate::domain::quote::Quote;
use crate::ports::storage::QuoteStorage;

/// Atomic JSON file store implementing the `QuoteStorage` port.
pub struct FileStore {
    /// Path to quotes.json.
    quotes_path: PathBuf,
    /// Temporary path for atomic quote writes.
    quotes_tmp_path: PathBuf,
    /// Path to the selected-category preference file.
    category_path: PathBuf,
    /// Temporary path for atomic preference writes.
    category_tmp_path: PathBuf,
}

impl FileStore {
    /// Create a new file store in the given data directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub async fn new(data_dir: &str) -> Result<Self> {
        let dir = Path::new(data_dir);
        fs::create_dir_all(dir)
            .await
            .context("Failed to create data directory")?;

        Ok(Self {
            quotes_path: dir.join("quotes.json"),
            quotes_tmp_path: dir.join("quotes.json.tmp"),
            category_path: dir.join("selected_category"),
            category_tmp_path: dir.join("selected_category.tmp"),
        })
    }

    /// Write `content` to `tmp`, then atomically rename to `path`.
    async fn write_atomic(tmp: &Path, path: &Path, content: &str) -> Result<()> {
        fs::write(tmp, content)
            .await
            .context("Failed to write tmp file")?;

        fs::rename(tmp, path)
            .await
            .context("Failed to rename tmp file into place")?;

        Ok(())
    }
}

#[async_trait]
impl QuoteStorage for FileStore {
    #[instrument(skip(self, quotes))]
    async fn save_quotes(&self, quotes: &[Quote]) -> Result<()> {
        let json =
            serde_json::to_string_pretty(quotes).context("Failed to serialize quotes")?;

        Self::write_atomic(&self.quotes_tmp_path, &self.quotes_path, &json).await?;

        debug!(
            path = %self.quotes_path.display(),
            count = quotes.len(),
            "Quotes saved"
        );

        Ok(())
    }

    #[instrument(skip(self))]
    async fn load_quotes(&self) -> Result<Option<Vec<Quote>>> {
        if !self.quotes_path.exists() {
            info!("No quotes file found, starting fresh");
            return Ok(None);
        }

        let json = fs::read_to_string(&self.quotes_path)
            .await
            .context("Failed to read quotes file")?;

        // A stored value that fails to parse is treated as absent, not fatal.
        match serde_json::from_str::<Vec<Quote>>(&json) {
            Ok(quotes) => {
                info!(count = quotes.len(), "Quotes loaded");
                Ok(Some(quotes))
            }
            Err(e) => {
                warn!(
                    path = %self.quotes_path.display(),
                    error = %e,
                    "Stored quotes are unreadable, falling back to defaults"
                );
                Ok(None)
            }
        }
    }

    async fn save_selected_category(&self, value: &str) -> Result<()> {
        Self::write_atomic(&self.category_tmp_path, &self.category_path, value).await
    }

    async fn load_selected_category(&self) -> Result<Option<String>> {
        if !self.category_path.exists() {
            return Ok(None);
        }

        let value = fs::read_to_string(&self.category_path)
            .await
            .context("Failed to read selected-category file")?;

        Ok(Some(value))
    }

    async fn is_healthy(&self) -> bool {
        let Some(dir) = self.quotes_path.parent() else {
            return false;
        };
        let test_path = dir.join(".health_check");
        let result = fs::write(&test_path, b"ok").await;
        let _ = fs::remove_file(&test_path).await;
        result.is_ok()
    }
}
