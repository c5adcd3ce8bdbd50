// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Normalization of provider labels into `DetectedObject`s
//!
//! Every provider parser produces `RawLabel`s on a 0-100 scale. This module
//! applies the shared inclusion rules: labels with a confidence must exceed
//! the threshold, at most `MAX_OBJECTS` survive, provider order is kept.

use crate::categorize::Categorizer;

use super::types::DetectedObject;

/// Maximum objects kept per provider response
pub const MAX_OBJECTS: usize = 8;

/// Minimum confidence (exclusive, 0-100 scale) for scored labels
pub const CONFIDENCE_THRESHOLD: f64 = 20.0;

/// A label as reported by a provider, before categorization
#[derive(Debug, Clone, PartialEq)]
pub struct RawLabel {
    pub name: String,
    /// 0-100 scale; `None` when the provider reports no per-label score
    pub confidence: Option<f64>,
    /// Preset category, skips the categorizer when present
    pub category: Option<String>,
}

impl RawLabel {
    pub fn scored(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence: Some(confidence),
            category: None,
        }
    }

    pub fn unscored(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            confidence: None,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Convert a 0-1 score to the 0-100 scale
pub fn unit_to_percent(score: f64) -> f64 {
    score * 100.0
}

/// Apply threshold and cap, keeping provider order
pub fn select_labels(labels: Vec<RawLabel>) -> Vec<RawLabel> {
    labels
        .into_iter()
        .filter(|label| !label.name.trim().is_empty())
        .filter(|label| match label.confidence {
            Some(confidence) => confidence > CONFIDENCE_THRESHOLD,
            None => true,
        })
        .take(MAX_OBJECTS)
        .collect()
}

/// Turn provider labels into categorized objects
pub async fn normalize(
    labels: Vec<RawLabel>,
    source: &str,
    categorizer: &Categorizer,
) -> Vec<DetectedObject> {
    let mut objects = Vec::new();
    for label in select_labels(labels) {
        let name = label.name.trim().to_string();
        let category = match label.category {
            Some(category) => category,
            None => categorizer.categorize(&name).await,
        };
        objects.push(DetectedObject {
            name,
            // Unscored labels carry no confidence signal
            confidence: label.confidence.unwrap_or(0.0).clamp(0.0, 100.0),
            category,
            source: source.to_string(),
        });
    }
    objects
}
