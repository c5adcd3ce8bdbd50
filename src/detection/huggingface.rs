// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hugging Face inference API image-classification provider

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::image::ImageInput;
use super::normalizer::{unit_to_percent, RawLabel};
use super::provider::{check_status, parse_json, DetectionProvider};
use super::types::DetectionError;

const HF_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

/// Hugging Face hosted image classification (bearer token auth)
pub struct HuggingFaceProvider {
    api_key: String,
    model: String,
    client: Client,
    timeout_ms: u64,
}

impl HuggingFaceProvider {
    pub fn new(api_key: String, model: String, client: Client, timeout_ms: u64) -> Self {
        Self {
            api_key,
            model,
            client,
            timeout_ms,
        }
    }
}

#[async_trait]
impl DetectionProvider for HuggingFaceProvider {
    async fn detect(&self, image: &ImageInput) -> Result<Vec<RawLabel>, DetectionError> {
        let response = self
            .client
            .post(format!("{}/{}", HF_INFERENCE_URL, self.model))
            .bearer_auth(&self.api_key)
            .header("Content-Type", image.mime_type())
            .body(image.bytes().to_vec())
            .send()
            .await
            .map_err(|e| DetectionError::from_reqwest(e, self.timeout_ms))?;

        let response = check_status(response, self.name()).await?;
        let data: HfResponse = parse_json(response, self.name()).await?;
        parse_response(data)
    }

    fn name(&self) -> &'static str {
        "huggingface"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty() && !self.model.is_empty()
    }

    fn priority(&self) -> u8 {
        40
    }
}

fn parse_response(data: HfResponse) -> Result<Vec<RawLabel>, DetectionError> {
    match data {
        HfResponse::Predictions(predictions) => Ok(predictions
            .into_iter()
            .map(|p| RawLabel::scored(p.label, unit_to_percent(p.score)))
            .collect()),
        // e.g. {"error": "Model is currently loading", "estimated_time": 20.0}
        HfResponse::Error { error } => Err(DetectionError::InvalidResponse {
            provider: "huggingface".to_string(),
            reason: error,
        }),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HfResponse {
    Predictions(Vec<HfPrediction>),
    Error { error: String },
}

#[derive(Debug, Deserialize)]
struct HfPrediction {
    label: String,
    score: f64,
}
