// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Source walk order, error isolation and synthesized fallback

use scan_vision::cache::ResultCache;
use scan_vision::categorize::Categorizer;
use scan_vision::enrichment::{ProductEnrichmentService, ProductSource, FALLBACK_SOURCE};
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

use super::mock::{
    calls, FailingDictionary, FailingWords, FixedWords, FoodOnlySource, HangingWords, MockSource,
    SourceBehavior,
};

fn categorizer() -> Arc<Categorizer> {
    Arc::new(Categorizer::new(
        Box::new(FailingDictionary),
        Duration::from_secs(8),
    ))
}

fn service(sources: Vec<Box<dyn ProductSource>>) -> ProductEnrichmentService {
    ProductEnrichmentService::new(
        sources,
        Some(Box::new(FixedWords(vec!["pie", "tree", "cider", "juice"]))),
        Arc::new(ResultCache::default()),
        categorizer(),
        Duration::from_secs(8),
    )
}

#[tokio::test]
async fn test_apple_with_every_source_failing() {
    let service = ProductEnrichmentService::new(
        vec![
            Box::new(MockSource::new("a", 10, SourceBehavior::Fail)),
            Box::new(MockSource::new("b", 20, SourceBehavior::Empty)),
        ],
        Some(Box::new(FailingWords)),
        Arc::new(ResultCache::default()),
        categorizer(),
        Duration::from_secs(8),
    );

    let detail = service.get_product_details("apple").await;
    assert_eq!(detail.category, "food");
    assert_eq!(detail.source, FALLBACK_SOURCE);
    assert!(!detail.description.is_empty());
    assert!(detail.is_generated());
}

#[tokio::test]
async fn test_synthesized_description_uses_related_words() {
    let service = service(Vec::new());

    let detail = service.get_product_details("apple").await;
    assert_eq!(
        detail.description,
        "Apple is a food item. It is commonly associated with pie, tree and cider."
    );
}

#[tokio::test]
async fn test_first_source_with_a_result_wins() {
    let failing = MockSource::new("failing", 10, SourceBehavior::Fail);
    let empty = MockSource::new("empty", 20, SourceBehavior::Empty);
    let found = MockSource::new("found", 30, SourceBehavior::Found);
    let later = MockSource::new("later", 40, SourceBehavior::Found);
    let counters = [
        failing.counter(),
        empty.counter(),
        found.counter(),
        later.counter(),
    ];
    // Deliberately registered out of order
    let service = service(vec![
        Box::new(later),
        Box::new(found),
        Box::new(empty),
        Box::new(failing),
    ]);

    let detail = service.get_product_details("hammer").await;
    assert_eq!(detail.source, "found");
    assert_eq!(detail.category, "tool");
    assert_eq!(
        counters.iter().map(calls).collect::<Vec<_>>(),
        vec![1, 1, 1, 0]
    );
}

#[tokio::test]
async fn test_sources_receive_resolved_category() {
    let source = MockSource::new("seen", 10, SourceBehavior::Empty);
    let seen = source.seen_categories.clone();
    let service = service(vec![Box::new(source)]);

    service.get_product_details("Golden Retriever dog").await;
    assert_eq!(*seen.lock().unwrap(), vec!["animal".to_string()]);
}

#[tokio::test]
async fn test_food_source_only_consulted_for_food() {
    let food_calls = Arc::new(AtomicUsize::new(0));
    let make = |calls: Arc<AtomicUsize>| -> ProductEnrichmentService {
        service(vec![Box::new(FoodOnlySource { calls })])
    };

    let food = make(food_calls.clone()).get_product_details("banana").await;
    assert_eq!(food.source, "food_facts");

    let chair = make(food_calls.clone()).get_product_details("chair").await;
    assert_eq!(chair.source, FALLBACK_SOURCE);
    assert_eq!(chair.category, "furniture");

    assert_eq!(calls(&food_calls), 1);
}

#[tokio::test]
async fn test_unknown_label_is_other() {
    let service = service(Vec::new());
    let detail = service.get_product_details("zzxq").await;
    assert_eq!(detail.category, "other");
    assert!(detail.description.starts_with("Zzxq is an everyday object."));
}

#[tokio::test(start_paused = true)]
async fn test_hanging_source_times_out() {
    let slow = MockSource::new("slow", 10, SourceBehavior::Hang);
    let next = MockSource::new("next", 20, SourceBehavior::Found);
    let slow_calls = slow.counter();
    let service = service(vec![Box::new(slow), Box::new(next)]);

    let started = tokio::time::Instant::now();
    let detail = service.get_product_details("banana").await;

    assert_eq!(detail.source, "next");
    assert_eq!(calls(&slow_calls), 1);
    // Gave up on the slow source at the 8s ceiling
    assert!(started.elapsed() >= Duration::from_secs(8));
    assert!(started.elapsed() < Duration::from_secs(3600));
}

#[tokio::test(start_paused = true)]
async fn test_hanging_word_association_yields_plain_description() {
    let service = ProductEnrichmentService::new(
        vec![Box::new(MockSource::new("empty", 10, SourceBehavior::Empty))],
        Some(Box::new(HangingWords)),
        Arc::new(ResultCache::default()),
        categorizer(),
        Duration::from_secs(8),
    );

    let started = tokio::time::Instant::now();
    let detail = service.get_product_details("apple").await;

    assert_eq!(detail.source, FALLBACK_SOURCE);
    assert_eq!(detail.description, "Apple is a food item.");
    assert_eq!(detail.details["relatedTerms"], serde_json::json!([]));
    assert!(started.elapsed() < Duration::from_secs(3600));
}
