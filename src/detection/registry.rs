// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Priority-ordered set of detection providers

use reqwest::Client;
use tracing::debug;

use super::clarifai::ClarifaiProvider;
use super::fallback::FallbackProvider;
use super::google_vision::GoogleVisionProvider;
use super::huggingface::HuggingFaceProvider;
use super::imagga::ImaggaProvider;
use super::provider::DetectionProvider;
use crate::config::{configured, VisionConfig};

/// Detection providers sorted by ascending priority, fallback last
pub struct ProviderRegistry {
    providers: Vec<Box<dyn DetectionProvider>>,
}

impl ProviderRegistry {
    /// Build a registry from explicit providers
    ///
    /// A `FallbackProvider` is appended when none of the given providers is a fallback.
    pub fn new(mut providers: Vec<Box<dyn DetectionProvider>>) -> Self {
        if !providers.iter().any(|p| p.is_fallback()) {
            providers.push(Box::new(FallbackProvider::new()));
        }

        // Stable sort keeps insertion order between equal priorities
        providers.sort_by_key(|p| p.priority());

        Self { providers }
    }

    /// Build the registry from configuration, skipping providers without credentials
    pub fn from_config(config: &VisionConfig, client: &Client) -> Self {
        let keys = &config.providers;
        let timeout_ms = config.detection_timeout_ms;
        let mut providers: Vec<Box<dyn DetectionProvider>> = Vec::new();

        if let (Some(key), Some(secret)) = (
            configured(&keys.imagga_api_key),
            configured(&keys.imagga_api_secret),
        ) {
            providers.push(Box::new(ImaggaProvider::new(
                key.to_string(),
                secret.to_string(),
                client.clone(),
                timeout_ms,
            )));
            debug!("Imagga provider enabled");
        }

        if let Some(key) = configured(&keys.google_vision_api_key) {
            providers.push(Box::new(GoogleVisionProvider::new(
                key.to_string(),
                client.clone(),
                timeout_ms,
            )));
            debug!("Google Vision provider enabled");
        }

        if let (Some(key), Some(model)) = (
            configured(&keys.clarifai_api_key),
            configured(&keys.clarifai_model_id),
        ) {
            providers.push(Box::new(ClarifaiProvider::new(
                key.to_string(),
                model.to_string(),
                client.clone(),
                timeout_ms,
            )));
            debug!("Clarifai provider enabled");
        }

        if let (Some(key), Some(model)) = (
            configured(&keys.huggingface_api_key),
            configured(&keys.huggingface_model),
        ) {
            providers.push(Box::new(HuggingFaceProvider::new(
                key.to_string(),
                model.to_string(),
                client.clone(),
                timeout_ms,
            )));
            debug!("Hugging Face provider enabled");
        }

        debug!("Fallback detection provider enabled");
        Self::new(providers)
    }

    /// Enabled providers in the order they are tried
    pub fn enabled(&self) -> impl Iterator<Item = &dyn DetectionProvider> {
        self.providers
            .iter()
            .filter(|p| p.is_available())
            .map(|p| &**p)
    }

    /// Names of enabled providers in walk order
    pub fn names(&self) -> Vec<&'static str> {
        self.enabled().map(|p| p.name()).collect()
    }
}
