// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Product enrichment orchestration
//!
//! Resolves a label's category, walks the product sources in priority order
//! and synthesizes a description when none of them knows the label.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::barcode_lookup::BarcodeLookupSource;
use super::fallback::synthesize;
use super::open_food_facts::OpenFoodFactsSource;
use super::source::ProductSource;
use super::types::{EnrichmentError, ProductDetail};
use super::upcitemdb::UpcItemDbSource;
use super::wikipedia::WikipediaSource;
use super::word_assoc::{DatamuseClient, WordAssociation};
use crate::cache::{CacheStats, CachedValue, ResultCache};
use crate::categorize::Categorizer;
use crate::config::{configured, VisionConfig};
use crate::utils::build_client;

/// Number of related words folded into a synthesized description
const RELATED_WORDS: usize = 3;

/// Cache key for a product label
pub fn product_cache_key(label: &str) -> String {
    format!("product:{}", label.trim().to_lowercase())
}

/// Walks product sources in priority order and caches the result
pub struct ProductEnrichmentService {
    sources: Vec<Box<dyn ProductSource>>,
    words: Option<Box<dyn WordAssociation>>,
    cache: Arc<ResultCache>,
    categorizer: Arc<Categorizer>,
    timeout: Duration,
}

impl ProductEnrichmentService {
    /// Create a service from configuration
    pub fn from_config(
        config: &VisionConfig,
        cache: Arc<ResultCache>,
        categorizer: Arc<Categorizer>,
    ) -> reqwest::Result<Self> {
        let client = build_client(config.lookup_timeout())?;
        let timeout_ms = config.lookup_timeout_ms;

        let mut sources: Vec<Box<dyn ProductSource>> = vec![
            Box::new(WikipediaSource::new(client.clone(), timeout_ms)),
            Box::new(OpenFoodFactsSource::new(client.clone(), timeout_ms)),
            Box::new(UpcItemDbSource::new(
                configured(&config.sources.upcitemdb_api_key).map(str::to_string),
                client.clone(),
                timeout_ms,
            )),
        ];

        if let Some(key) = configured(&config.sources.barcode_lookup_api_key) {
            sources.push(Box::new(BarcodeLookupSource::new(
                key.to_string(),
                client.clone(),
                timeout_ms,
            )));
            debug!("Barcode Lookup source enabled");
        }

        let words: Box<dyn WordAssociation> = Box::new(DatamuseClient::new(client, timeout_ms));

        Ok(Self::new(
            sources,
            Some(words),
            cache,
            categorizer,
            config.lookup_timeout(),
        ))
    }

    /// Create a service over explicit sources
    pub fn new(
        mut sources: Vec<Box<dyn ProductSource>>,
        words: Option<Box<dyn WordAssociation>>,
        cache: Arc<ResultCache>,
        categorizer: Arc<Categorizer>,
        timeout: Duration,
    ) -> Self {
        sources.sort_by_key(|s| s.priority());
        Self {
            sources,
            words,
            cache,
            categorizer,
            timeout,
        }
    }

    /// Resolve product details for a label
    ///
    /// Never fails: when no source knows the label a synthesized detail is
    /// returned (and cached like any other result).
    pub async fn get_product_details(&self, label: &str) -> ProductDetail {
        let key = product_cache_key(label);

        if let Some(detail) = self.cache.get_product(&key) {
            debug!("Cache hit for product '{}'", label);
            return detail;
        }

        let label = label.trim();
        let start = Instant::now();
        let category = self.categorizer.categorize(label).await;

        for source in self.sources.iter().filter(|s| s.is_available()) {
            debug!("Trying product source: {}", source.name());

            match self.try_source(&**source, label, &category).await {
                Ok(Some(detail)) => {
                    self.cache.set(&key, CachedValue::Product(detail.clone()));
                    info!(
                        "Product details for '{}' from {} in {}ms",
                        label,
                        source.name(),
                        start.elapsed().as_millis()
                    );
                    return detail;
                }
                Ok(None) => {
                    debug!("Product source {} had nothing for '{}'", source.name(), label);
                }
                Err(e) => {
                    warn!(
                        "Product source {} failed: {}, trying next",
                        source.name(),
                        e
                    );
                }
            }
        }

        let related = self.related_words(label).await;
        let detail = synthesize(label, &category, &related);
        self.cache.set(&key, CachedValue::Product(detail.clone()));
        info!(
            "No source knew '{}', synthesized description in {}ms",
            label,
            start.elapsed().as_millis()
        );
        detail
    }

    /// Names of enabled sources in walk order
    pub fn available_sources(&self) -> Vec<&'static str> {
        self.sources
            .iter()
            .filter(|s| s.is_available())
            .map(|s| s.name())
            .collect()
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    async fn try_source(
        &self,
        source: &dyn ProductSource,
        label: &str,
        category: &str,
    ) -> Result<Option<ProductDetail>, EnrichmentError> {
        tokio::time::timeout(self.timeout, source.lookup(label, category))
            .await
            .map_err(|_| EnrichmentError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            })?
    }

    /// Best-effort related words; failures yield an empty list
    async fn related_words(&self, label: &str) -> Vec<String> {
        let Some(words) = &self.words else {
            return Vec::new();
        };
        if label.is_empty() {
            return Vec::new();
        }

        match tokio::time::timeout(self.timeout, words.related_words(label, RELATED_WORDS)).await {
            Ok(Ok(related)) => related,
            Ok(Err(e)) => {
                debug!("Word association failed for '{}': {}", label, e);
                Vec::new()
            }
            Err(_) => {
                debug!("Word association for '{}' timed out", label);
                Vec::new()
            }
        }
    }
}
