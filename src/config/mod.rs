// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for detection providers and enrichment sources
//!
//! Every external service is optional. A missing or empty credential
//! disables the corresponding provider or source instead of failing.

use std::env;
use std::time::Duration;
use tracing::warn;

/// Top-level configuration
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Detection provider credentials
    pub providers: ProviderKeys,
    /// Enrichment source credentials
    pub sources: SourceKeys,
    /// Cache TTL in seconds
    pub cache_ttl_secs: u64,
    /// Optional cache capacity (0 = unbounded)
    pub cache_max_entries: usize,
    /// Per-call ceiling for detection providers in milliseconds
    pub detection_timeout_ms: u64,
    /// Per-call ceiling for enrichment and categorization lookups in milliseconds
    pub lookup_timeout_ms: u64,
}

/// Credentials for the image-label recognition services
#[derive(Debug, Clone, Default)]
pub struct ProviderKeys {
    pub imagga_api_key: Option<String>,
    pub imagga_api_secret: Option<String>,
    pub google_vision_api_key: Option<String>,
    pub clarifai_api_key: Option<String>,
    pub clarifai_model_id: Option<String>,
    pub huggingface_api_key: Option<String>,
    pub huggingface_model: Option<String>,
}

/// Credentials for product-detail sources
#[derive(Debug, Clone, Default)]
pub struct SourceKeys {
    /// UPCitemdb user key; the keyless trial endpoint is used when absent
    pub upcitemdb_api_key: Option<String>,
    /// Barcode Lookup API key; the source is disabled when absent
    pub barcode_lookup_api_key: Option<String>,
}

/// Read an environment variable, treating empty values as absent
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Return the value if it is present and non-empty
pub fn configured(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl VisionConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            providers: ProviderKeys {
                imagga_api_key: non_empty_var("IMAGGA_API_KEY"),
                imagga_api_secret: non_empty_var("IMAGGA_API_SECRET"),
                google_vision_api_key: non_empty_var("GOOGLE_VISION_API_KEY"),
                clarifai_api_key: non_empty_var("CLARIFAI_API_KEY"),
                clarifai_model_id: non_empty_var("CLARIFAI_MODEL_ID"),
                huggingface_api_key: non_empty_var("HUGGINGFACE_API_KEY"),
                huggingface_model: non_empty_var("HUGGINGFACE_MODEL"),
            },
            sources: SourceKeys {
                upcitemdb_api_key: non_empty_var("UPCITEMDB_API_KEY"),
                barcode_lookup_api_key: non_empty_var("BARCODE_LOOKUP_API_KEY"),
            },
            cache_ttl_secs: env::var("VISION_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            cache_max_entries: env::var("VISION_CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            detection_timeout_ms: 10_000,
            lookup_timeout_ms: env::var("LOOKUP_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8_000),
        }
    }

    /// Validate the configuration
    ///
    /// Only malformed cache and timeout settings are errors. Incomplete
    /// credentials disable their provider and are logged.
    pub fn validate(&self) -> Result<(), String> {
        if self.cache_ttl_secs == 0 {
            return Err("Cache TTL must be greater than 0".to_string());
        }
        if self.detection_timeout_ms == 0 || self.lookup_timeout_ms == 0 {
            return Err("Timeouts must be greater than 0".to_string());
        }
        if configured(&self.providers.imagga_api_key).is_some()
            != configured(&self.providers.imagga_api_secret).is_some()
        {
            warn!("Imagga disabled: both IMAGGA_API_KEY and IMAGGA_API_SECRET are required");
        }
        Ok(())
    }

    /// Check if any remote detection provider is configured
    pub fn has_any_provider(&self) -> bool {
        let p = &self.providers;
        (configured(&p.imagga_api_key).is_some() && configured(&p.imagga_api_secret).is_some())
            || configured(&p.google_vision_api_key).is_some()
            || (configured(&p.clarifai_api_key).is_some()
                && configured(&p.clarifai_model_id).is_some())
            || (configured(&p.huggingface_api_key).is_some()
                && configured(&p.huggingface_model).is_some())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn cache_capacity(&self) -> Option<usize> {
        (self.cache_max_entries > 0).then_some(self.cache_max_entries)
    }

    pub fn detection_timeout(&self) -> Duration {
        Duration::from_millis(self.detection_timeout_ms)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            providers: ProviderKeys::default(),
            sources: SourceKeys::default(),
            cache_ttl_secs: 3600,
            cache_max_entries: 10_000,
            detection_timeout_ms: 10_000,
            lookup_timeout_ms: 8_000,
        }
    }
}
