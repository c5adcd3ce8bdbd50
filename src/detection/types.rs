// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for object detection

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single recognized label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedObject {
    /// Label text as returned by the provider
    pub name: String,
    /// Confidence on a 0-100 scale
    pub confidence: f64,
    /// Category resolved by the categorizer
    pub category: String,
    /// Provider that produced the label
    pub source: String,
}

/// Result of a detection call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionOutcome {
    /// `false` when every real provider failed and the fallback answered
    pub success: bool,
    /// Detected objects in provider order
    pub objects: Vec<DetectedObject>,
    /// Provider that produced the outcome
    pub provider: String,
    /// Mean of member confidences, 0 when empty
    pub confidence: f64,
}

impl DetectionOutcome {
    pub fn new(success: bool, objects: Vec<DetectedObject>, provider: impl Into<String>) -> Self {
        let confidence = aggregate_confidence(&objects);
        Self {
            success,
            objects,
            provider: provider.into(),
            confidence,
        }
    }

    /// Highest-ranked object, the one a product lookup usually starts from
    pub fn top_object(&self) -> Option<&DetectedObject> {
        self.objects.first()
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for object in &self.objects {
            if !seen.contains(&object.category.as_str()) {
                seen.push(object.category.as_str());
            }
        }
        seen
    }
}

/// Arithmetic mean of object confidences (0 if empty)
pub fn aggregate_confidence(objects: &[DetectedObject]) -> f64 {
    if objects.is_empty() {
        return 0.0;
    }
    objects.iter().map(|o| o.confidence).sum::<f64>() / objects.len() as f64
}

/// Errors that can occur while calling a detection provider
#[derive(Debug, Error)]
pub enum DetectionError {
    /// Rate limited by the provider
    #[error("Rate limited by {provider}")]
    RateLimited { provider: String },

    /// API error from the provider
    #[error("Detection API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Provider call timed out
    #[error("Detection timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Credentials rejected by the provider
    #[error("Credentials rejected by {provider}")]
    Unauthorized { provider: String },

    /// Payload could not be parsed
    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    /// Provider answered but reported no usable labels
    #[error("No objects detected by {provider}")]
    NoObjects { provider: String },

    /// Image could not be read
    #[error("Image unavailable: {0}")]
    ImageUnavailable(#[from] std::io::Error),
}

impl DetectionError {
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_ms: u64) -> Self {
        if e.is_timeout() {
            DetectionError::Timeout { timeout_ms }
        } else {
            DetectionError::ApiError {
                status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                message: e.to_string(),
            }
        }
    }
}
