// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cache;
pub mod categorize;
pub mod cli;
pub mod config;
pub mod detection;
pub mod enrichment;
pub mod utils;

pub use cache::{CacheStats, CachedValue, ResultCache};
pub use categorize::Categorizer;
pub use config::VisionConfig;
pub use detection::{DetectedObject, DetectionOutcome, DetectionService, ImageInput};
pub use enrichment::{ProductDetail, ProductEnrichmentService};

use std::sync::Arc;

/// Detection and enrichment services sharing one cache and categorizer
pub struct VisionServices {
    pub detection: DetectionService,
    pub enrichment: ProductEnrichmentService,
    pub cache: Arc<ResultCache>,
}

impl VisionServices {
    /// Wire both services from configuration
    pub fn from_config(config: &VisionConfig) -> reqwest::Result<Self> {
        let cache = Arc::new(ResultCache::new(config.cache_ttl(), config.cache_capacity()));

        let client = utils::build_client(config.lookup_timeout())?;
        let categorizer = Arc::new(Categorizer::new(
            Box::new(categorize::DictionaryApiLookup::new(
                client,
                config.lookup_timeout_ms,
            )),
            config.lookup_timeout(),
        ));

        let detection = DetectionService::from_config(config, cache.clone(), categorizer.clone())?;
        let enrichment = ProductEnrichmentService::from_config(config, cache.clone(), categorizer)?;

        Ok(Self {
            detection,
            enrichment,
            cache,
        })
    }
}
