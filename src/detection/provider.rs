// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection provider trait definition

use async_trait::async_trait;
use reqwest::Response;

use super::image::ImageInput;
use super::normalizer::RawLabel;
use super::types::DetectionError;

/// Trait for implementing image-label recognition providers
///
/// Providers are tried in ascending priority order. The first one that
/// returns usable labels wins.
#[async_trait]
pub trait DetectionProvider: Send + Sync {
    /// Recognize labels in an image
    ///
    /// Returns labels in provider order, with confidences already scaled to 0-100.
    async fn detect(&self, image: &ImageInput) -> Result<Vec<RawLabel>, DetectionError>;

    /// Provider name for logging and attribution
    fn name(&self) -> &'static str;

    /// Check if the provider has the configuration it needs
    fn is_available(&self) -> bool;

    /// Provider priority (lower = preferred)
    fn priority(&self) -> u8 {
        100
    }

    /// Whether this is the always-available last resort
    fn is_fallback(&self) -> bool {
        false
    }
}

/// Map common HTTP failure statuses to typed errors
pub(crate) async fn check_status(
    response: Response,
    provider: &str,
) -> Result<Response, DetectionError> {
    let status = response.status();

    if status == 429 {
        return Err(DetectionError::RateLimited {
            provider: provider.to_string(),
        });
    }

    if status == 401 || status == 403 {
        return Err(DetectionError::Unauthorized {
            provider: provider.to_string(),
        });
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(DetectionError::ApiError {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response)
}

/// Decode a JSON body into a provider payload type
pub(crate) async fn parse_json<T: serde::de::DeserializeOwned>(
    response: Response,
    provider: &str,
) -> Result<T, DetectionError> {
    response
        .json()
        .await
        .map_err(|e| DetectionError::InvalidResponse {
            provider: provider.to_string(),
            reason: format!("JSON parse error: {}", e),
        })
}
