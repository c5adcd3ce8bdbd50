// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Product source trait definition

use async_trait::async_trait;
use reqwest::Response;

use super::types::{EnrichmentError, ProductDetail};

/// Trait for product-detail lookup services
///
/// Sources are tried in ascending priority order until one returns a detail.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Look up details for `label`
    ///
    /// # Returns
    /// * `Ok(Some(detail))` - the source knows the label
    /// * `Ok(None)` - not applicable or nothing found
    /// * `Err(_)` - the call failed
    async fn lookup(
        &self,
        label: &str,
        category: &str,
    ) -> Result<Option<ProductDetail>, EnrichmentError>;

    /// Source name for logging and attribution
    fn name(&self) -> &'static str;

    /// Check if the source has the configuration it needs
    fn is_available(&self) -> bool {
        true
    }

    /// Source priority (lower = preferred)
    fn priority(&self) -> u8 {
        100
    }
}

/// Map HTTP failure statuses to typed errors; 404 means "nothing found"
pub(crate) async fn check_status(
    response: Response,
    source_name: &str,
) -> Result<Option<Response>, EnrichmentError> {
    let status = response.status();

    if status == 404 {
        return Ok(None);
    }

    if status == 429 {
        return Err(EnrichmentError::RateLimited {
            source_name: source_name.to_string(),
        });
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(EnrichmentError::ApiError {
            status: status.as_u16(),
            message,
        });
    }

    Ok(Some(response))
}

/// Decode a JSON body into a source payload type
pub(crate) async fn parse_json<T: serde::de::DeserializeOwned>(
    response: Response,
    source_name: &str,
) -> Result<T, EnrichmentError> {
    response
        .json()
        .await
        .map_err(|e| EnrichmentError::InvalidResponse {
            source_name: source_name.to_string(),
            reason: format!("JSON parse error: {}", e),
        })
}

/// Trim a string and drop it when empty
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
