// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Offline fallback provider
//!
//! Always available and tried last. Produces a fixed, pre-categorized
//! placeholder so callers always get a populated outcome.

use async_trait::async_trait;

use super::image::ImageInput;
use super::normalizer::RawLabel;
use super::provider::DetectionProvider;
use super::types::{DetectedObject, DetectionError, DetectionOutcome};
use crate::categorize::DEFAULT_CATEGORY;

pub const FALLBACK_PROVIDER: &str = "fallback";
const FALLBACK_LABEL: &str = "Unidentified object";
const FALLBACK_CONFIDENCE: f64 = 50.0;

/// Fallback provider (no network, no configuration)
#[derive(Debug, Default)]
pub struct FallbackProvider;

impl FallbackProvider {
    pub fn new() -> Self {
        Self
    }

    /// Outcome returned when no provider produced anything
    pub fn outcome() -> DetectionOutcome {
        DetectionOutcome::new(
            false,
            vec![DetectedObject {
                name: FALLBACK_LABEL.to_string(),
                confidence: FALLBACK_CONFIDENCE,
                category: DEFAULT_CATEGORY.to_string(),
                source: FALLBACK_PROVIDER.to_string(),
            }],
            FALLBACK_PROVIDER,
        )
    }
}

#[async_trait]
impl DetectionProvider for FallbackProvider {
    async fn detect(&self, _image: &ImageInput) -> Result<Vec<RawLabel>, DetectionError> {
        Ok(vec![
            RawLabel::scored(FALLBACK_LABEL, FALLBACK_CONFIDENCE).with_category(DEFAULT_CATEGORY)
        ])
    }

    fn name(&self) -> &'static str {
        FALLBACK_PROVIDER
    }

    fn is_available(&self) -> bool {
        true
    }

    fn priority(&self) -> u8 {
        u8::MAX
    }

    fn is_fallback(&self) -> bool {
        true
    }
}
