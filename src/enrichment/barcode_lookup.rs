// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Barcode Lookup retail catalog search (API key required)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::source::{check_status, non_empty, parse_json, ProductSource};
use super::types::{EnrichmentError, ProductDetail};

const BARCODE_LOOKUP_URL: &str = "https://api.barcodelookup.com/v3/products";

/// Barcode Lookup product search
pub struct BarcodeLookupSource {
    api_key: String,
    client: Client,
    timeout_ms: u64,
}

impl BarcodeLookupSource {
    pub fn new(api_key: String, client: Client, timeout_ms: u64) -> Self {
        Self {
            api_key,
            client,
            timeout_ms,
        }
    }
}

#[async_trait]
impl ProductSource for BarcodeLookupSource {
    async fn lookup(
        &self,
        label: &str,
        category: &str,
    ) -> Result<Option<ProductDetail>, EnrichmentError> {
        let response = self
            .client
            .get(BARCODE_LOOKUP_URL)
            .query(&[
                ("search", label.trim()),
                ("formatted", "y"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| EnrichmentError::from_reqwest(e, self.timeout_ms))?;

        let Some(response) = check_status(response, self.name()).await? else {
            return Ok(None);
        };
        let data: BarcodeLookupResponse = parse_json(response, self.name()).await?;
        Ok(into_detail(data, label, category))
    }

    fn name(&self) -> &'static str {
        "barcode_lookup"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn priority(&self) -> u8 {
        40
    }
}

fn into_detail(data: BarcodeLookupResponse, label: &str, category: &str) -> Option<ProductDetail> {
    let product = data.products.into_iter().next()?;
    let title = non_empty(product.title)?;

    let stores: Vec<_> = product
        .stores
        .into_iter()
        .map(|s| json!({"name": s.name, "price": s.price, "currency": s.currency}))
        .collect();

    Some(ProductDetail {
        label: label.to_string(),
        description: non_empty(product.description).unwrap_or_else(|| title.clone()),
        category: category.to_string(),
        source: "barcode_lookup".to_string(),
        image_url: product.images.into_iter().find(|i| !i.trim().is_empty()),
        details: json!({
            "title": title,
            "brand": non_empty(product.brand),
            "retailCategory": non_empty(product.category),
            "stores": stores,
        }),
        source_id: non_empty(product.barcode_number),
    })
}

#[derive(Debug, Deserialize)]
struct BarcodeLookupResponse {
    #[serde(default)]
    products: Vec<BarcodeProduct>,
}

#[derive(Debug, Deserialize)]
struct BarcodeProduct {
    barcode_number: Option<String>,
    title: Option<String>,
    description: Option<String>,
    brand: Option<String>,
    category: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    stores: Vec<BarcodeStore>,
}

#[derive(Debug, Deserialize)]
struct BarcodeStore {
    name: Option<String>,
    price: Option<String>,
    currency: Option<String>,
}
