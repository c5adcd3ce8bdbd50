// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Clarifai model prediction provider
//!
//! Needs a personal access token and a model id. Concept values are 0-1.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::image::ImageInput;
use super::normalizer::{unit_to_percent, RawLabel};
use super::provider::{check_status, parse_json, DetectionProvider};
use super::types::DetectionError;

const CLARIFAI_API_URL: &str = "https://api.clarifai.com/v2/users/clarifai/apps/main/models";
const CLARIFAI_STATUS_OK: u32 = 10000;

/// Clarifai provider
pub struct ClarifaiProvider {
    api_key: String,
    model_id: String,
    client: Client,
    timeout_ms: u64,
}

impl ClarifaiProvider {
    pub fn new(api_key: String, model_id: String, client: Client, timeout_ms: u64) -> Self {
        Self {
            api_key,
            model_id,
            client,
            timeout_ms,
        }
    }

    fn outputs_url(&self) -> String {
        format!("{}/{}/outputs", CLARIFAI_API_URL, self.model_id)
    }
}

#[async_trait]
impl DetectionProvider for ClarifaiProvider {
    async fn detect(&self, image: &ImageInput) -> Result<Vec<RawLabel>, DetectionError> {
        let body = json!({
            "inputs": [{"data": {"image": {"base64": image.to_base64()}}}]
        });

        let response = self
            .client
            .post(self.outputs_url())
            .header("Authorization", format!("Key {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| DetectionError::from_reqwest(e, self.timeout_ms))?;

        let response = check_status(response, self.name()).await?;
        let data: ClarifaiResponse = parse_json(response, self.name()).await?;
        parse_response(data)
    }

    fn name(&self) -> &'static str {
        "clarifai"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty() && !self.model_id.is_empty()
    }

    fn priority(&self) -> u8 {
        30
    }
}

fn parse_response(data: ClarifaiResponse) -> Result<Vec<RawLabel>, DetectionError> {
    if data.status.code != CLARIFAI_STATUS_OK {
        return Err(DetectionError::InvalidResponse {
            provider: "clarifai".to_string(),
            reason: format!("status {}: {}", data.status.code, data.status.description),
        });
    }

    Ok(data
        .outputs
        .into_iter()
        .next()
        .map(|o| o.data.concepts)
        .unwrap_or_default()
        .into_iter()
        .map(|c| RawLabel::scored(c.name, unit_to_percent(c.value)))
        .collect())
}

#[derive(Debug, Deserialize)]
struct ClarifaiResponse {
    status: ClarifaiStatus,
    #[serde(default)]
    outputs: Vec<ClarifaiOutput>,
}

#[derive(Debug, Deserialize)]
struct ClarifaiStatus {
    code: u32,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ClarifaiOutput {
    #[serde(default)]
    data: ClarifaiData,
}

#[derive(Debug, Default, Deserialize)]
struct ClarifaiData {
    #[serde(default)]
    concepts: Vec<ClarifaiConcept>,
}

#[derive(Debug, Deserialize)]
struct ClarifaiConcept {
    name: String,
    value: f64,
}
