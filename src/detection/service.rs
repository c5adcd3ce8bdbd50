// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection orchestration
//!
//! Coordinates the provider registry, label normalization and the shared cache.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::fallback::FallbackProvider;
use super::image::ImageInput;
use super::normalizer::normalize;
use super::provider::DetectionProvider;
use super::registry::ProviderRegistry;
use super::types::{DetectionError, DetectionOutcome};
use crate::cache::{CacheStats, CachedValue, ResultCache};
use crate::categorize::Categorizer;
use crate::config::VisionConfig;
use crate::utils::build_client;

/// Walks detection providers in priority order and caches the first success
pub struct DetectionService {
    registry: ProviderRegistry,
    cache: Arc<ResultCache>,
    categorizer: Arc<Categorizer>,
    timeout: Duration,
}

impl DetectionService {
    /// Create a service from configuration
    pub fn from_config(
        config: &VisionConfig,
        cache: Arc<ResultCache>,
        categorizer: Arc<Categorizer>,
    ) -> reqwest::Result<Self> {
        let client = build_client(config.detection_timeout())?;
        let registry = ProviderRegistry::from_config(config, &client);
        Ok(Self::new(
            registry,
            cache,
            categorizer,
            config.detection_timeout(),
        ))
    }

    /// Create a service over an explicit registry
    pub fn new(
        registry: ProviderRegistry,
        cache: Arc<ResultCache>,
        categorizer: Arc<Categorizer>,
        timeout: Duration,
    ) -> Self {
        Self {
            registry,
            cache,
            categorizer,
            timeout,
        }
    }

    /// Detect objects in an image
    ///
    /// Never fails: when every provider fails, or the image is empty, the
    /// fallback outcome is returned with `success = false`.
    pub async fn detect(&self, image: &ImageInput) -> DetectionOutcome {
        if image.is_empty() {
            warn!("Empty image, skipping detection providers");
            return FallbackProvider::outcome();
        }

        let key = image.cache_key();

        if let Some(outcome) = self.cache.get_detection(&key) {
            debug!("Cache hit for image {}", image.content_hash());
            return outcome;
        }

        debug!(
            "Detecting objects in {} byte image {}",
            image.len(),
            image.content_hash()
        );
        let start = Instant::now();

        for provider in self.registry.enabled() {
            debug!("Trying detection provider: {}", provider.name());

            match self.try_provider(provider, image).await {
                Ok(outcome) if provider.is_fallback() => {
                    warn!(
                        "All detection providers failed, using fallback ({}ms)",
                        start.elapsed().as_millis()
                    );
                    return DetectionOutcome { success: false, ..outcome };
                }
                Ok(outcome) => {
                    self.cache.set(&key, CachedValue::Detection(outcome.clone()));
                    info!(
                        "Detection complete: {} objects from {} in {}ms",
                        outcome.objects.len(),
                        provider.name(),
                        start.elapsed().as_millis()
                    );
                    return outcome;
                }
                Err(e) => {
                    warn!(
                        "Detection provider {} failed: {}, trying next",
                        provider.name(),
                        e
                    );
                }
            }
        }

        FallbackProvider::outcome()
    }

    /// Read an image file and detect objects in it
    ///
    /// An unreadable file yields the fallback outcome.
    pub async fn detect_path(&self, path: impl AsRef<Path>) -> DetectionOutcome {
        match ImageInput::from_path(path.as_ref()).await {
            Ok(image) => self.detect(&image).await,
            Err(e) => {
                warn!("Cannot read image {}: {}", path.as_ref().display(), e);
                FallbackProvider::outcome()
            }
        }
    }

    /// Detect objects in several images concurrently
    pub async fn detect_batch(&self, images: &[ImageInput]) -> Vec<DetectionOutcome> {
        let futures: Vec<_> = images.iter().map(|image| self.detect(image)).collect();
        futures::future::join_all(futures).await
    }

    /// Names of enabled providers in walk order
    pub fn available_providers(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    async fn try_provider(
        &self,
        provider: &dyn DetectionProvider,
        image: &ImageInput,
    ) -> Result<DetectionOutcome, DetectionError> {
        let labels = tokio::time::timeout(self.timeout, provider.detect(image))
            .await
            .map_err(|_| DetectionError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            })??;

        let objects = normalize(labels, provider.name(), &self.categorizer).await;
        if objects.is_empty() {
            return Err(DetectionError::NoObjects {
                provider: provider.name().to_string(),
            });
        }

        Ok(DetectionOutcome::new(true, objects, provider.name()))
    }
}
