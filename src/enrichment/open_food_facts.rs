// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Open Food Facts product search
//!
//! Only consulted for labels in the "food" category.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::source::{check_status, non_empty, parse_json, ProductSource};
use super::types::{EnrichmentError, ProductDetail};

const OFF_SEARCH_URL: &str = "https://world.openfoodfacts.org/cgi/search.pl";
const FOOD_CATEGORY: &str = "food";

/// Nutriments copied into the detail payload (per 100 g)
const NUTRIMENT_KEYS: &[&str] = &[
    "energy-kcal_100g",
    "fat_100g",
    "saturated-fat_100g",
    "carbohydrates_100g",
    "sugars_100g",
    "fiber_100g",
    "proteins_100g",
    "salt_100g",
];

/// Food-facts database lookup (no API key required)
pub struct OpenFoodFactsSource {
    client: Client,
    timeout_ms: u64,
}

impl OpenFoodFactsSource {
    pub fn new(client: Client, timeout_ms: u64) -> Self {
        Self { client, timeout_ms }
    }
}

#[async_trait]
impl ProductSource for OpenFoodFactsSource {
    async fn lookup(
        &self,
        label: &str,
        category: &str,
    ) -> Result<Option<ProductDetail>, EnrichmentError> {
        if category != FOOD_CATEGORY {
            return Ok(None);
        }

        let response = self
            .client
            .get(OFF_SEARCH_URL)
            .query(&[
                ("search_terms", label.trim()),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", "1"),
            ])
            .send()
            .await
            .map_err(|e| EnrichmentError::from_reqwest(e, self.timeout_ms))?;

        let Some(response) = check_status(response, self.name()).await? else {
            return Ok(None);
        };
        let data: OffSearchResponse = parse_json(response, self.name()).await?;
        Ok(into_detail(data, label, category))
    }

    fn name(&self) -> &'static str {
        "open_food_facts"
    }

    fn priority(&self) -> u8 {
        20
    }
}

fn into_detail(data: OffSearchResponse, label: &str, category: &str) -> Option<ProductDetail> {
    let product = data.products.into_iter().next()?;
    let name = non_empty(product.product_name)?;
    let brands = non_empty(product.brands);

    let mut nutrition = Map::new();
    for key in NUTRIMENT_KEYS {
        if let Some(value) = product.nutriments.get(*key) {
            nutrition.insert((*key).to_string(), value.clone());
        }
    }

    let description = match &brands {
        Some(brands) => format!("{} by {}", name, brands),
        None => name.clone(),
    };

    Some(ProductDetail {
        label: label.to_string(),
        description,
        category: category.to_string(),
        source: "open_food_facts".to_string(),
        image_url: non_empty(product.image_url),
        details: json!({
            "productName": name,
            "brands": brands,
            "nutriscoreGrade": non_empty(product.nutriscore_grade),
            "categories": non_empty(product.categories),
            "nutrition": Value::Object(nutrition),
        }),
        source_id: non_empty(product.code),
    })
}

#[derive(Debug, Deserialize)]
struct OffSearchResponse {
    #[serde(default)]
    products: Vec<OffProduct>,
}

#[derive(Debug, Deserialize)]
struct OffProduct {
    code: Option<String>,
    product_name: Option<String>,
    brands: Option<String>,
    image_url: Option<String>,
    nutriscore_grade: Option<String>,
    categories: Option<String>,
    #[serde(default)]
    nutriments: Map<String, Value>,
}
