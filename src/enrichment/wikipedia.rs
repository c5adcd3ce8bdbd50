// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wikipedia page summary source

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::source::{check_status, non_empty, parse_json, ProductSource};
use super::types::{EnrichmentError, ProductDetail};

const WIKIPEDIA_SUMMARY_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary/";

/// Encyclopedia summary lookup (no API key required)
pub struct WikipediaSource {
    client: Client,
    timeout_ms: u64,
}

impl WikipediaSource {
    pub fn new(client: Client, timeout_ms: u64) -> Self {
        Self { client, timeout_ms }
    }
}

fn summary_url(label: &str) -> Result<Url, EnrichmentError> {
    let invalid = |reason: String| EnrichmentError::InvalidResponse {
        source_name: "wikipedia".to_string(),
        reason,
    };
    let mut url = Url::parse(WIKIPEDIA_SUMMARY_URL).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("cannot-be-a-base URL".to_string()))?
        .pop_if_empty()
        .push(&label.trim().replace(' ', "_"));
    Ok(url)
}

#[async_trait]
impl ProductSource for WikipediaSource {
    async fn lookup(
        &self,
        label: &str,
        category: &str,
    ) -> Result<Option<ProductDetail>, EnrichmentError> {
        let response = self
            .client
            .get(summary_url(label)?)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| EnrichmentError::from_reqwest(e, self.timeout_ms))?;

        let Some(response) = check_status(response, self.name()).await? else {
            return Ok(None);
        };
        let summary: WikiSummary = parse_json(response, self.name()).await?;
        Ok(into_detail(summary, label, category))
    }

    fn name(&self) -> &'static str {
        "wikipedia"
    }

    fn priority(&self) -> u8 {
        10
    }
}

fn into_detail(summary: WikiSummary, label: &str, category: &str) -> Option<ProductDetail> {
    if summary.kind.as_deref() == Some("disambiguation") {
        return None;
    }
    let extract = non_empty(summary.extract)?;

    let page_url = summary
        .content_urls
        .and_then(|u| u.desktop)
        .and_then(|d| d.page);

    Some(ProductDetail {
        label: label.to_string(),
        description: extract,
        category: category.to_string(),
        source: "wikipedia".to_string(),
        image_url: summary.thumbnail.map(|t| t.source),
        details: json!({
            "title": summary.title,
            "shortDescription": summary.description,
        }),
        source_id: page_url,
    })
}

#[derive(Debug, Deserialize)]
struct WikiSummary {
    #[serde(rename = "type")]
    kind: Option<String>,
    title: Option<String>,
    description: Option<String>,
    extract: Option<String>,
    thumbnail: Option<WikiThumbnail>,
    content_urls: Option<WikiContentUrls>,
}

#[derive(Debug, Deserialize)]
struct WikiThumbnail {
    source: String,
}

#[derive(Debug, Deserialize)]
struct WikiContentUrls {
    desktop: Option<WikiPageUrl>,
}

#[derive(Debug, Deserialize)]
struct WikiPageUrl {
    page: Option<String>,
}
