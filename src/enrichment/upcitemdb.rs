// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! UPCitemdb retail catalog search
//!
//! Uses the keyless trial endpoint unless a user key is configured.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::source::{check_status, non_empty, parse_json, ProductSource};
use super::types::{EnrichmentError, ProductDetail};

const UPCITEMDB_TRIAL_URL: &str = "https://api.upcitemdb.com/prod/trial/search";
const UPCITEMDB_PAID_URL: &str = "https://api.upcitemdb.com/prod/v1/search";

/// Retail catalog lookup
pub struct UpcItemDbSource {
    api_key: Option<String>,
    client: Client,
    timeout_ms: u64,
}

impl UpcItemDbSource {
    pub fn new(api_key: Option<String>, client: Client, timeout_ms: u64) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            client,
            timeout_ms,
        }
    }
}

#[async_trait]
impl ProductSource for UpcItemDbSource {
    async fn lookup(
        &self,
        label: &str,
        category: &str,
    ) -> Result<Option<ProductDetail>, EnrichmentError> {
        let query = [("s", label.trim()), ("match_mode", "0"), ("type", "product")];

        let request = match &self.api_key {
            Some(key) => self
                .client
                .get(UPCITEMDB_PAID_URL)
                .header("user_key", key)
                .header("key_type", "3scale"),
            None => self.client.get(UPCITEMDB_TRIAL_URL),
        };

        let response = request
            .query(&query)
            .send()
            .await
            .map_err(|e| EnrichmentError::from_reqwest(e, self.timeout_ms))?;

        let Some(response) = check_status(response, self.name()).await? else {
            return Ok(None);
        };
        let data: UpcSearchResponse = parse_json(response, self.name()).await?;
        into_detail(data, label, category)
    }

    fn name(&self) -> &'static str {
        "upcitemdb"
    }

    fn priority(&self) -> u8 {
        30
    }
}

fn into_detail(
    data: UpcSearchResponse,
    label: &str,
    category: &str,
) -> Result<Option<ProductDetail>, EnrichmentError> {
    if data.code != "OK" {
        return Err(EnrichmentError::InvalidResponse {
            source_name: "upcitemdb".to_string(),
            reason: data.message.unwrap_or(data.code),
        });
    }

    let Some(item) = data.items.into_iter().next() else {
        return Ok(None);
    };
    let Some(title) = non_empty(item.title) else {
        return Ok(None);
    };

    let description = non_empty(item.description).unwrap_or_else(|| title.clone());

    Ok(Some(ProductDetail {
        label: label.to_string(),
        description,
        category: category.to_string(),
        source: "upcitemdb".to_string(),
        image_url: item.images.into_iter().find(|i| !i.trim().is_empty()),
        details: json!({
            "title": title,
            "brand": non_empty(item.brand),
            "retailCategory": non_empty(item.category),
            "lowestPrice": item.lowest_recorded_price,
            "highestPrice": item.highest_recorded_price,
        }),
        source_id: non_empty(item.ean),
    }))
}

#[derive(Debug, Deserialize)]
struct UpcSearchResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    items: Vec<UpcItem>,
}

#[derive(Debug, Deserialize)]
struct UpcItem {
    ean: Option<String>,
    title: Option<String>,
    description: Option<String>,
    brand: Option<String>,
    category: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    lowest_recorded_price: Option<f64>,
    highest_recorded_price: Option<f64>,
}
