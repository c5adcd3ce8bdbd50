// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Google Cloud Vision label detection provider

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::image::ImageInput;
use super::normalizer::{unit_to_percent, RawLabel};
use super::provider::{check_status, parse_json, DetectionProvider};
use super::types::DetectionError;

const GOOGLE_VISION_URL: &str = "https://vision.googleapis.com/v1/images:annotate";
const MAX_RESULTS: u32 = 10;

/// Google Cloud Vision provider (API key auth)
pub struct GoogleVisionProvider {
    api_key: String,
    client: Client,
    timeout_ms: u64,
}

impl GoogleVisionProvider {
    pub fn new(api_key: String, client: Client, timeout_ms: u64) -> Self {
        Self {
            api_key,
            client,
            timeout_ms,
        }
    }
}

#[async_trait]
impl DetectionProvider for GoogleVisionProvider {
    async fn detect(&self, image: &ImageInput) -> Result<Vec<RawLabel>, DetectionError> {
        let body = json!({
            "requests": [{
                "image": {"content": image.to_base64()},
                "features": [{"type": "LABEL_DETECTION", "maxResults": MAX_RESULTS}]
            }]
        });

        let response = self
            .client
            .post(GOOGLE_VISION_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| DetectionError::from_reqwest(e, self.timeout_ms))?;

        let response = check_status(response, self.name()).await?;
        let data: AnnotateResponse = parse_json(response, self.name()).await?;
        parse_response(data)
    }

    fn name(&self) -> &'static str {
        "google_vision"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn priority(&self) -> u8 {
        20
    }
}

fn parse_response(data: AnnotateResponse) -> Result<Vec<RawLabel>, DetectionError> {
    let first = data.responses.into_iter().next().unwrap_or_default();

    if let Some(error) = first.error {
        return Err(DetectionError::ApiError {
            status: error.code.unwrap_or(0),
            message: error.message.unwrap_or_default(),
        });
    }

    Ok(first
        .label_annotations
        .into_iter()
        .map(|a| RawLabel::scored(a.description, unit_to_percent(a.score)))
        .collect())
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Vec<LabelAnnotation>,
    error: Option<AnnotateError>,
}

#[derive(Debug, Deserialize)]
struct LabelAnnotation {
    description: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
struct AnnotateError {
    code: Option<u16>,
    message: Option<String>,
}
