// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Dictionary definition lookup used for category inference

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";

/// Errors from auxiliary lookups (dictionary, word association)
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Lookup API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Lookup timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid lookup response: {0}")]
    InvalidResponse(String),
}

impl LookupError {
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_ms: u64) -> Self {
        if e.is_timeout() {
            LookupError::Timeout { timeout_ms }
        } else {
            LookupError::ApiError {
                status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                message: e.to_string(),
            }
        }
    }
}

/// Resolves the first dictionary definition of a word
#[async_trait]
pub trait DefinitionLookup: Send + Sync {
    /// `Ok(None)` when the word has no entry
    async fn first_definition(&self, word: &str) -> Result<Option<String>, LookupError>;
}

/// dictionaryapi.dev client (no API key required)
pub struct DictionaryApiLookup {
    client: Client,
    timeout_ms: u64,
}

impl DictionaryApiLookup {
    pub fn new(client: Client, timeout_ms: u64) -> Self {
        Self { client, timeout_ms }
    }
}

#[async_trait]
impl DefinitionLookup for DictionaryApiLookup {
    async fn first_definition(&self, word: &str) -> Result<Option<String>, LookupError> {
        let mut url = Url::parse(DICTIONARY_API_URL)
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidResponse("cannot-be-a-base URL".to_string()))?
            .pop_if_empty()
            .push(word.trim());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::from_reqwest(e, self.timeout_ms))?;

        let status = response.status();
        if status == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::ApiError {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let entries: Vec<DictionaryEntry> = response
            .json()
            .await
            .map_err(|e| LookupError::InvalidResponse(format!("JSON parse error: {}", e)))?;

        Ok(first_definition(&entries))
    }
}

fn first_definition(entries: &[DictionaryEntry]) -> Option<String> {
    entries
        .iter()
        .flat_map(|e| e.meanings.iter())
        .flat_map(|m| m.definitions.iter())
        .map(|d| d.definition.trim())
        .find(|d| !d.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Deserialize)]
struct DictionaryEntry {
    #[serde(default)]
    meanings: Vec<DictionaryMeaning>,
}

#[derive(Debug, Deserialize)]
struct DictionaryMeaning {
    #[serde(default)]
    definitions: Vec<DictionaryDefinition>,
}

#[derive(Debug, Deserialize)]
struct DictionaryDefinition {
    definition: String,
}
