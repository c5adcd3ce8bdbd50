// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for product enrichment

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Product details resolved for a detected label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    /// Label the details were resolved for
    pub label: String,
    /// Human-readable description
    pub description: String,
    /// Category of the label
    pub category: String,
    /// Source name (e.g. "wikipedia", "open_food_facts", "dynamic_fallback")
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Source-specific payload: nutrition facts, prices, summary metadata
    pub details: serde_json::Value,
    /// Identifier for attribution (page URL, barcode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

impl ProductDetail {
    /// Whether the detail was synthesized rather than found
    pub fn is_generated(&self) -> bool {
        self.source == super::fallback::FALLBACK_SOURCE
    }
}

/// Errors that can occur while querying a product source
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Rate limited by the source
    #[error("Rate limited by {source_name}")]
    RateLimited { source_name: String },

    /// API error from the source
    #[error("Source API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Source call timed out
    #[error("Source timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Payload could not be parsed
    #[error("Invalid response from {source_name}: {reason}")]
    InvalidResponse { source_name: String, reason: String },
}

impl EnrichmentError {
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_ms: u64) -> Self {
        if e.is_timeout() {
            EnrichmentError::Timeout { timeout_ms }
        } else {
            EnrichmentError::ApiError {
                status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                message: e.to_string(),
            }
        }
    }
}
