// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Imagga tagging provider
//!
//! Uses HTTP basic auth (key:secret) and reports confidences on a 0-100 scale.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::Deserialize;

use super::image::ImageInput;
use super::normalizer::RawLabel;
use super::provider::{check_status, parse_json, DetectionProvider};
use super::types::DetectionError;

const IMAGGA_TAGS_URL: &str = "https://api.imagga.com/v2/tags";

/// Imagga image tagging provider
pub struct ImaggaProvider {
    api_key: String,
    api_secret: String,
    client: Client,
    timeout_ms: u64,
}

impl ImaggaProvider {
    pub fn new(api_key: String, api_secret: String, client: Client, timeout_ms: u64) -> Self {
        Self {
            api_key,
            api_secret,
            client,
            timeout_ms,
        }
    }

    fn authorization(&self) -> String {
        let credentials = STANDARD.encode(format!("{}:{}", self.api_key, self.api_secret));
        format!("Basic {}", credentials)
    }
}

#[async_trait]
impl DetectionProvider for ImaggaProvider {
    async fn detect(&self, image: &ImageInput) -> Result<Vec<RawLabel>, DetectionError> {
        let response = self
            .client
            .post(IMAGGA_TAGS_URL)
            .header("Authorization", self.authorization())
            .form(&[("image_base64", image.to_base64())])
            .send()
            .await
            .map_err(|e| DetectionError::from_reqwest(e, self.timeout_ms))?;

        let response = check_status(response, self.name()).await?;
        let data: ImaggaResponse = parse_json(response, self.name()).await?;
        parse_response(data)
    }

    fn name(&self) -> &'static str {
        "imagga"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }

    fn priority(&self) -> u8 {
        10
    }
}

fn parse_response(data: ImaggaResponse) -> Result<Vec<RawLabel>, DetectionError> {
    if let Some(status) = &data.status {
        if status.kind.as_deref() == Some("error") {
            return Err(DetectionError::InvalidResponse {
                provider: "imagga".to_string(),
                reason: status.text.clone().unwrap_or_default(),
            });
        }
    }

    Ok(data
        .result
        .map(|r| r.tags)
        .unwrap_or_default()
        .into_iter()
        .map(|t| RawLabel::scored(t.tag.en, t.confidence))
        .collect())
}

#[derive(Debug, Deserialize)]
struct ImaggaResponse {
    result: Option<ImaggaResult>,
    status: Option<ImaggaStatus>,
}

#[derive(Debug, Deserialize)]
struct ImaggaResult {
    #[serde(default)]
    tags: Vec<ImaggaTag>,
}

#[derive(Debug, Deserialize)]
struct ImaggaTag {
    confidence: f64,
    tag: ImaggaTagText,
}

#[derive(Debug, Deserialize)]
struct ImaggaTagText {
    en: String,
}

#[derive(Debug, Deserialize)]
struct ImaggaStatus {
    text: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}
