// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scriptable product sources and lookups

use async_trait::async_trait;
use scan_vision::categorize::{DefinitionLookup, LookupError};
use scan_vision::enrichment::{EnrichmentError, ProductDetail, ProductSource, WordAssociation};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Copy)]
pub enum SourceBehavior {
    Found,
    Empty,
    Fail,
    Hang,
}

pub struct MockSource {
    pub name: &'static str,
    pub priority: u8,
    pub behavior: SourceBehavior,
    pub calls: Arc<AtomicUsize>,
    pub seen_categories: Arc<Mutex<Vec<String>>>,
}

impl MockSource {
    pub fn new(name: &'static str, priority: u8, behavior: SourceBehavior) -> Self {
        Self {
            name,
            priority,
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
            seen_categories: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl ProductSource for MockSource {
    async fn lookup(
        &self,
        label: &str,
        category: &str,
    ) -> Result<Option<ProductDetail>, EnrichmentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_categories
            .lock()
            .unwrap()
            .push(category.to_string());

        match self.behavior {
            SourceBehavior::Found => Ok(Some(ProductDetail {
                label: label.to_string(),
                description: format!("{} from {}", label, self.name),
                category: category.to_string(),
                source: self.name.to_string(),
                image_url: None,
                details: serde_json::json!({}),
                source_id: None,
            })),
            SourceBehavior::Empty => Ok(None),
            SourceBehavior::Fail => Err(EnrichmentError::RateLimited {
                source_name: self.name.to_string(),
            }),
            SourceBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(None)
            }
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

/// Only answers for food, like the food-facts database
pub struct FoodOnlySource {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ProductSource for FoodOnlySource {
    async fn lookup(
        &self,
        label: &str,
        category: &str,
    ) -> Result<Option<ProductDetail>, EnrichmentError> {
        if category != "food" {
            return Ok(None);
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(ProductDetail {
            label: label.to_string(),
            description: "Nutrition facts".to_string(),
            category: category.to_string(),
            source: "food_facts".to_string(),
            image_url: None,
            details: serde_json::json!({"nutriments": {}}),
            source_id: None,
        }))
    }

    fn name(&self) -> &'static str {
        "food_facts"
    }

    fn priority(&self) -> u8 {
        20
    }
}

pub struct FailingDictionary;

#[async_trait]
impl DefinitionLookup for FailingDictionary {
    async fn first_definition(&self, _word: &str) -> Result<Option<String>, LookupError> {
        Err(LookupError::Timeout { timeout_ms: 8000 })
    }
}

pub struct FixedWords(pub Vec<&'static str>);

#[async_trait]
impl WordAssociation for FixedWords {
    async fn related_words(
        &self,
        _word: &str,
        max: usize,
    ) -> Result<Vec<String>, EnrichmentError> {
        Ok(self.0.iter().take(max).map(|w| w.to_string()).collect())
    }
}

pub struct FailingWords;

#[async_trait]
impl WordAssociation for FailingWords {
    async fn related_words(
        &self,
        _word: &str,
        _max: usize,
    ) -> Result<Vec<String>, EnrichmentError> {
        Err(EnrichmentError::ApiError {
            status: 500,
            message: "down".to_string(),
        })
    }
}

pub fn calls(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}

pub struct HangingWords;

#[async_trait]
impl WordAssociation for HangingWords {
    async fn related_words(
        &self,
        _word: &str,
        _max: usize,
    ) -> Result<Vec<String>, EnrichmentError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(vec!["never".to_string()])
    }
}
