// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Label categorization
//!
//! A label is categorized by:
//! 1. matching the first dictionary definition against the keyword table
//! 2. matching the label itself against the keyword table (substring)
//! 3. falling back to `"other"`
//!
//! Lookup failures fall through silently; categorization never fails.

pub mod dictionary;
pub mod keywords;

use std::time::Duration;
use tracing::debug;

pub use dictionary::{DefinitionLookup, DictionaryApiLookup, LookupError};
pub use keywords::{is_known_category, CATEGORY_KEYWORDS, DEFAULT_CATEGORY};

/// Resolves free-text labels to a category name
pub struct Categorizer {
    dictionary: Option<Box<dyn DefinitionLookup>>,
    timeout: Duration,
}

impl Categorizer {
    /// Create a categorizer backed by a definition lookup
    pub fn new(dictionary: Box<dyn DefinitionLookup>, timeout: Duration) -> Self {
        Self {
            dictionary: Some(dictionary),
            timeout,
        }
    }

    /// Create a categorizer that only uses local keyword matching
    pub fn offline() -> Self {
        Self {
            dictionary: None,
            timeout: Duration::from_secs(5),
        }
    }

    /// Resolve `label` to one of the table categories or `"other"`
    pub async fn categorize(&self, label: &str) -> String {
        let label = label.trim();
        if label.is_empty() {
            return DEFAULT_CATEGORY.to_string();
        }

        if let Some(category) = self.categorize_by_definition(label).await {
            return category.to_string();
        }

        keywords::match_label(label)
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string()
    }

    async fn categorize_by_definition(&self, label: &str) -> Option<&'static str> {
        let dictionary = self.dictionary.as_ref()?;

        let definition = match tokio::time::timeout(
            self.timeout,
            dictionary.first_definition(label),
        )
        .await
        {
            Ok(Ok(Some(definition))) => definition,
            Ok(Ok(None)) => {
                debug!("No dictionary entry for '{}'", label);
                return None;
            }
            Ok(Err(e)) => {
                debug!("Dictionary lookup failed for '{}': {}", label, e);
                return None;
            }
            Err(_) => {
                debug!(
                    "Dictionary lookup for '{}' timed out after {:?}",
                    label, self.timeout
                );
                return None;
            }
        };

        keywords::match_definition(&definition)
    }
}
