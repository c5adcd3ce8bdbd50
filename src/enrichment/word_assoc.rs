// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Word-association lookup used to flavor synthesized descriptions

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::source::{check_status, parse_json};
use super::types::EnrichmentError;

const DATAMUSE_URL: &str = "https://api.datamuse.com/words";

/// Returns words associated with a term, most relevant first
#[async_trait]
pub trait WordAssociation: Send + Sync {
    async fn related_words(&self, word: &str, max: usize) -> Result<Vec<String>, EnrichmentError>;
}

/// Datamuse "triggers" lookup (no API key required)
pub struct DatamuseClient {
    client: Client,
    timeout_ms: u64,
}

impl DatamuseClient {
    pub fn new(client: Client, timeout_ms: u64) -> Self {
        Self { client, timeout_ms }
    }
}

#[async_trait]
impl WordAssociation for DatamuseClient {
    async fn related_words(&self, word: &str, max: usize) -> Result<Vec<String>, EnrichmentError> {
        let max_param = max.to_string();
        let response = self
            .client
            .get(DATAMUSE_URL)
            .query(&[("rel_trg", word.trim()), ("max", max_param.as_str())])
            .send()
            .await
            .map_err(|e| EnrichmentError::from_reqwest(e, self.timeout_ms))?;

        let Some(response) = check_status(response, "datamuse").await? else {
            return Ok(Vec::new());
        };
        let words: Vec<DatamuseWord> = parse_json(response, "datamuse").await?;
        Ok(select_words(words, word, max))
    }
}

fn select_words(words: Vec<DatamuseWord>, query: &str, max: usize) -> Vec<String> {
    let query = query.trim().to_lowercase();
    let mut selected: Vec<String> = Vec::new();
    for w in words {
        let candidate = w.word.trim().to_lowercase();
        if candidate.is_empty() || candidate == query || selected.contains(&candidate) {
            continue;
        }
        selected.push(candidate);
        if selected.len() >= max {
            break;
        }
    }
    selected
}

#[derive(Debug, Deserialize)]
struct DatamuseWord {
    word: String,
}
