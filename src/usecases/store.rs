//! Quote Store - The Owned Collection Hub
//!
//! Owns the ordered quote sequence and the selected-category
//! preference. All mutation routes through this API: add, import
//! merge, and sync merge each persist the full sequence through the
//! storage port before returning, so the persisted value always equals
//! the in-memory one once an operation completes.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::error::StoreError;
use crate::domain::quote::{
    ALL_CATEGORIES, Quote, contains_quote, distinct_categories, filter_by_category, seed_quotes,
};
use crate::ports::storage::QuoteStorage;

/// The persisted, in-memory quote collection.
pub struct QuoteStore {
    /// Ordered quote sequence, insertion order preserved.
    quotes: Vec<Quote>,
    /// Raw selected-category preference as last persisted.
    selected: String,
    /// Persistence port.
    storage: Arc<dyn QuoteStorage>,
}

impl QuoteStore {
    /// Load the store from persistence, installing the seed set on
    /// first start.
    ///
    /// A missing stored value is not an error; an unreadable one has
    /// already been reported by the adapter and arrives here as absent.
    pub async fn load(storage: Arc<dyn QuoteStorage>) -> Result<Self> {
        let quotes = match storage.load_quotes().await? {
            Some(quotes) => quotes,
            None => {
                let seeds = seed_quotes();
                storage
                    .save_quotes(&seeds)
                    .await
                    .context("Failed to persist seed quotes")?;
                info!(count = seeds.len(), "Installed seed quotes");
                seeds
            }
        };

        let selected = storage
            .load_selected_category()
            .await?
            .unwrap_or_else(|| ALL_CATEGORIES.to_string());

        Ok(Self {
            quotes,
            selected,
            storage,
        })
    }

    /// The full quote sequence in insertion order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Number of stored quotes.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether the store holds no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Validate, append, and persist one new quote.
    ///
    /// Fails with [`StoreError::EmptyField`] if either part is empty
    /// after trimming; the store is unchanged on any failure.
    pub async fn add(&mut self, text: &str, category: &str) -> Result<Quote, StoreError> {
        let quote = Quote::validated(text, category)?;

        self.quotes.push(quote.clone());
        if let Err(e) = self.storage.save_quotes(&self.quotes).await {
            self.quotes.pop();
            return Err(StoreError::Persistence(e));
        }

        Ok(quote)
    }

    /// Append every remote quote not already present (strict identity),
    /// persisting once if anything was appended. Returns the appended
    /// count. Local quotes are never removed or overwritten.
    pub async fn append_missing(&mut self, incoming: Vec<Quote>) -> Result<usize, StoreError> {
        let before = self.quotes.len();

        for quote in incoming {
            if !contains_quote(&self.quotes, &quote) {
                self.quotes.push(quote);
            }
        }

        let appended = self.quotes.len() - before;
        if appended > 0 {
            if let Err(e) = self.storage.save_quotes(&self.quotes).await {
                self.quotes.truncate(before);
                return Err(StoreError::Persistence(e));
            }
        }

        Ok(appended)
    }

    /// Append every quote unconditionally (import merge never
    /// deduplicates) and persist. Returns the appended count.
    pub async fn append_all(&mut self, incoming: Vec<Quote>) -> Result<usize, StoreError> {
        let before = self.quotes.len();
        self.quotes.extend(incoming);

        if let Err(e) = self.storage.save_quotes(&self.quotes).await {
            self.quotes.truncate(before);
            return Err(StoreError::Persistence(e));
        }

        Ok(self.quotes.len() - before)
    }

    /// Distinct category values in first-seen order, recomputed fresh.
    pub fn categories(&self) -> Vec<String> {
        distinct_categories(&self.quotes)
    }

    /// Quotes matching `selected`, or all of them for `"all"`.
    pub fn filtered(&self, selected: &str) -> Vec<Quote> {
        filter_by_category(&self.quotes, selected)
    }

    /// The effective selected category: the persisted preference, or
    /// `"all"` when the preference names no category currently present.
    pub fn selected_category(&self) -> &str {
        if self.selected != ALL_CATEGORIES
            && !self.quotes.iter().any(|q| q.category == self.selected)
        {
            return ALL_CATEGORIES;
        }
        &self.selected
    }

    /// Persist a new selected-category preference.
    pub async fn set_selected_category(&mut self, value: &str) -> Result<(), StoreError> {
        self.storage.save_selected_category(value).await?;
        self.selected = value.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    /// In-memory storage double mirroring the port contract.
    struct MemoryStore {
        quotes: Mutex<Option<Vec<Quote>>>,
        selected: Mutex<Option<String>>,
        fail_saves: bool,
    }

    impl MemoryStore {
        fn empty() -> Arc<Self> {
            Arc::new(Self {
                quotes: Mutex::new(None),
                selected: Mutex::new(None),
                fail_saves: false,
            })
        }

        fn with(quotes: Vec<Quote>, selected: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                quotes: Mutex::new(Some(quotes)),
                selected: Mutex::new(selected.map(String::from)),
                fail_saves: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                quotes: Mutex::new(Some(Vec::new())),
                selected: Mutex::new(None),
                fail_saves: true,
            })
        }

        fn persisted_quotes(&self) -> Option<Vec<Quote>> {
            self.quotes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QuoteStorage for MemoryStore {
        async fn save_quotes(&self, quotes: &[Quote]) -> Result<()> {
            if self.fail_saves {
                anyhow::bail!("disk full");
            }
            *self.quotes.lock().unwrap() = Some(quotes.to_vec());
            Ok(())
        }

        async fn load_quotes(&self) -> Result<Option<Vec<Quote>>> {
            Ok(self.quotes.lock().unwrap().clone())
        }

        async fn save_selected_category(&self, value: &str) -> Result<()> {
            if self.fail_saves {
                anyhow::bail!("disk full");
            }
            *self.selected.lock().unwrap() = Some(value.to_string());
            Ok(())
        }

        async fn load_selected_category(&self) -> Result<Option<String>> {
            Ok(self.selected.lock().unwrap().clone())
        }

        async fn is_healthy(&self) -> bool {
            !self.fail_saves
        }
    }

    #[tokio::test]
    async fn test_load_installs_and_persists_seeds_when_absent() {
        let storage = MemoryStore::empty();
        let store = QuoteStore::load(Arc::clone(&storage) as Arc<dyn QuoteStorage>)
            .await
            .unwrap();

        assert_eq!(store.len(), seed_quotes().len());
        assert_eq!(storage.persisted_quotes().unwrap(), seed_quotes());
    }

    #[tokio::test]
    async fn test_load_keeps_persisted_quotes() {
        let quotes = vec![Quote::new("kept", "K")];
        let storage = MemoryStore::with(quotes.clone(), None);
        let store = QuoteStore::load(storage).await.unwrap();

        assert_eq!(store.quotes(), quotes.as_slice());
    }

    #[tokio::test]
    async fn test_load_keeps_persisted_empty_list() {
        // An explicitly stored empty list is not the same as "nothing
        // stored" and must not be reseeded.
        let storage = MemoryStore::with(Vec::new(), None);
        let store = QuoteStore::load(storage).await.unwrap();

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_add_appends_persists_and_is_retrievable() {
        let storage = MemoryStore::empty();
        let mut store = QuoteStore::load(Arc::clone(&storage) as Arc<dyn QuoteStorage>)
            .await
            .unwrap();

        let before = store.len();
        store.add("  Ship it.  ", " Engineering ").await.unwrap();

        assert_eq!(store.len(), before + 1);
        let matches = store.filtered("Engineering");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "Ship it.");
        assert_eq!(storage.persisted_quotes().unwrap().len(), before + 1);
    }

    #[tokio::test]
    async fn test_add_empty_parts_rejected_and_count_unchanged() {
        let storage = MemoryStore::empty();
        let mut store = QuoteStore::load(storage).await.unwrap();
        let before = store.len();

        assert!(matches!(
            store.add("", "x").await,
            Err(StoreError::EmptyField)
        ));
        assert!(matches!(
            store.add("x", "").await,
            Err(StoreError::EmptyField)
        ));
        assert_eq!(store.len(), before);
    }

    #[tokio::test]
    async fn test_add_rolls_back_on_failed_save() {
        let storage = MemoryStore::failing();
        let mut store = QuoteStore::load(storage).await.unwrap();

        let result = store.add("doomed", "D").await;
        assert!(matches!(result, Err(StoreError::Persistence(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_filtered_all_returns_full_sequence() {
        let storage = MemoryStore::empty();
        let mut store = QuoteStore::load(storage).await.unwrap();
        store.add("extra", "Extra").await.unwrap();

        assert_eq!(store.filtered(ALL_CATEGORIES).len(), store.len());
    }

    #[tokio::test]
    async fn test_append_missing_skips_strict_duplicates() {
        let storage = MemoryStore::with(vec![Quote::new("Be yourself", "X")], None);
        let mut store = QuoteStore::load(storage).await.unwrap();

        let appended = store
            .append_missing(vec![
                Quote::new("Be yourself", "X"),
                Quote::new("New one", "Y"),
            ])
            .await
            .unwrap();

        assert_eq!(appended, 1);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_append_missing_dedupes_within_batch() {
        let storage = MemoryStore::with(Vec::new(), None);
        let mut store = QuoteStore::load(storage).await.unwrap();

        let twin = Quote::new("echo", "E");
        let appended = store
            .append_missing(vec![twin.clone(), twin])
            .await
            .unwrap();

        assert_eq!(appended, 1);
    }

    #[tokio::test]
    async fn test_append_all_keeps_duplicates() {
        let storage = MemoryStore::with(vec![Quote::new("dup", "D")], None);
        let mut store = QuoteStore::load(storage).await.unwrap();

        let appended = store.append_all(vec![Quote::new("dup", "D")]).await.unwrap();

        assert_eq!(appended, 1);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_selected_category_falls_back_to_all() {
        let storage = MemoryStore::with(vec![Quote::new("t", "Real")], Some("Ghost"));
        let store = QuoteStore::load(storage).await.unwrap();

        assert_eq!(store.selected_category(), ALL_CATEGORIES);
    }

    #[tokio::test]
    async fn test_selected_category_kept_when_present() {
        let storage = MemoryStore::with(vec![Quote::new("t", "Real")], Some("Real"));
        let store = QuoteStore::load(storage).await.unwrap();

        assert_eq!(store.selected_category(), "Real");
    }

    #[tokio::test]
    async fn test_set_selected_category_persists() {
        let storage = MemoryStore::with(vec![Quote::new("t", "Real")], None);
        let mut store = QuoteStore::load(Arc::clone(&storage) as Arc<dyn QuoteStorage>)
            .await
            .unwrap();

        store.set_selected_category("Real").await.unwrap();

        assert_eq!(store.selected_category(), "Real");
        assert_eq!(
            storage.selected.lock().unwrap().as_deref(),
            Some("Real")
        );
    }
}
