//! Core quote domain type and pure collection helpers.
//!
//! A `Quote` is a text/category pair. Quotes are append-only: once in
//! the store they are never mutated or removed. The merge identity rule
//! is strict: two quotes are the same record iff both `text` and
//! `category` match exactly (case-sensitive).

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::StoreError;

/// Sentinel category meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// One quote: a body of text tagged with a free-form category label.
///
/// Field order is the wire order for export/import documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The quote body. Never empty in a stored quote.
    pub text: String,
    /// Free-form category label. Never empty in a stored quote.
    pub category: String,
}

impl Quote {
    /// Create a quote from already-validated parts.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    /// Trim surrounding whitespace and build a quote, rejecting empty parts.
    pub fn validated(text: &str, category: &str) -> Result<Self, StoreError> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() || category.is_empty() {
            return Err(StoreError::EmptyField);
        }
        Ok(Self::new(text, category))
    }

    /// Strict identity: equal text AND equal category, case-sensitive.
    pub fn is_same_record(&self, other: &Self) -> bool {
        self.text == other.text && self.category == other.category
    }
}

/// The fixed set installed on first start, before anything was persisted.
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The only limit to our realization of tomorrow is our doubts of today.",
            "Inspiration",
        ),
        Quote::new(
            "In the middle of every difficulty lies opportunity.",
            "Motivation",
        ),
        Quote::new(
            "Life is 10% what happens to us and 90% how we react to it.",
            "Attitude",
        ),
        Quote::new(
            "The best way to predict the future is to create it.",
            "Future",
        ),
        Quote::new("You miss 100% of the shots you don't take.", "Courage"),
        Quote::new(
            "To be yourself in a world that is constantly trying to make you something else is the greatest accomplishment.",
            "Individuality",
        ),
    ]
}

/// Distinct category values in first-seen order.
pub fn distinct_categories(quotes: &[Quote]) -> Vec<String> {
    let mut seen = Vec::new();
    for quote in quotes {
        if !seen.contains(&quote.category) {
            seen.push(quote.category.clone());
        }
    }
    seen
}

/// All quotes matching `selected`, or every quote for [`ALL_CATEGORIES`].
///
/// Always a (possibly empty) sequence; zero matches is a valid result,
/// not an absent one.
pub fn filter_by_category(quotes: &[Quote], selected: &str) -> Vec<Quote> {
    if selected == ALL_CATEGORIES {
        return quotes.to_vec();
    }
    quotes
        .iter()
        .filter(|q| q.category == selected)
        .cloned()
        .collect()
}

/// Whether `candidate` already exists under the strict identity rule.
pub fn contains_quote(quotes: &[Quote], candidate: &Quote) -> bool {
    quotes.iter().any(|q| q.is_same_record(candidate))
}

/// Pick one quote uniformly at random.
pub fn pick_random(quotes: &[Quote]) -> Result<&Quote, StoreError> {
    if quotes.is_empty() {
        return Err(StoreError::NoCandidates);
    }
    let index = rand::rng().random_range(0..quotes.len());
    Ok(&quotes[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_trims_whitespace() {
        let quote = Quote::validated("  Stay hungry.  ", "\tAdvice\n").unwrap();
        assert_eq!(quote.text, "Stay hungry.");
        assert_eq!(quote.category, "Advice");
    }

    #[test]
    fn test_validated_rejects_empty_parts() {
        assert!(matches!(
            Quote::validated("", "x"),
            Err(StoreError::EmptyField)
        ));
        assert!(matches!(
            Quote::validated("x", "   "),
            Err(StoreError::EmptyField)
        ));
    }

    #[test]
    fn test_identity_is_strict() {
        let a = Quote::new("Be yourself", "X");
        let b = Quote::new("Be yourself", "Y");
        assert!(!a.is_same_record(&b));
        assert!(a.is_same_record(&a.clone()));
    }

    #[test]
    fn test_contains_quote_respects_category() {
        let quotes = vec![Quote::new("Be yourself", "X")];
        assert!(contains_quote(&quotes, &Quote::new("Be yourself", "X")));
        assert!(!contains_quote(&quotes, &Quote::new("Be yourself", "Y")));
    }

    #[test]
    fn test_distinct_categories_first_seen_order() {
        let quotes = vec![
            Quote::new("t1", "A"),
            Quote::new("t2", "B"),
            Quote::new("t3", "A"),
        ];
        assert_eq!(distinct_categories(&quotes), vec!["A", "B"]);
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let quotes = seed_quotes();
        assert_eq!(filter_by_category(&quotes, ALL_CATEGORIES), quotes);
    }

    #[test]
    fn test_filter_by_specific_category() {
        let quotes = vec![
            Quote::new("t1", "A"),
            Quote::new("t2", "B"),
            Quote::new("t3", "A"),
        ];
        let filtered = filter_by_category(&quotes, "A");
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|q| q.category == "A"));
        assert!(filter_by_category(&quotes, "C").is_empty());
    }

    #[test]
    fn test_pick_random_empty_fails() {
        assert!(matches!(pick_random(&[]), Err(StoreError::NoCandidates)));
    }

    #[test]
    fn test_pick_random_single_always_returns_it() {
        let quotes = vec![Quote::new("only one", "Solo")];
        for _ in 0..10 {
            assert_eq!(pick_random(&quotes).unwrap(), &quotes[0]);
        }
    }

    #[test]
    fn test_seed_set_is_valid() {
        let seeds = seed_quotes();
        assert_eq!(seeds.len(), 6);
        assert!(
            seeds
                .iter()
                .all(|q| !q.text.is_empty() && !q.category.is_empty())
        );
    }
}
