// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Provider walk order, failure isolation and fallback

use scan_vision::cache::ResultCache;
use scan_vision::categorize::Categorizer;
use scan_vision::detection::{
    DetectionProvider, DetectionService, FallbackProvider, ImageInput, ProviderRegistry,
    MAX_OBJECTS,
};
use std::sync::Arc;
use std::time::Duration;

use super::mock::{calls, labels, Behavior, MockProvider};

fn service(providers: Vec<Box<dyn DetectionProvider>>) -> DetectionService {
    DetectionService::new(
        ProviderRegistry::new(providers),
        Arc::new(ResultCache::default()),
        Arc::new(Categorizer::offline()),
        Duration::from_secs(10),
    )
}

fn image() -> ImageInput {
    ImageInput::from_bytes(vec![0xFFu8, 0xD8, 0xFF, 0xE0, 1, 2, 3])
}

#[tokio::test]
async fn test_only_fallback_enabled_returns_fallback() {
    let imagga = MockProvider::new("imagga", 10, Behavior::Labels(labels(&[("apple", 90.0)])))
        .disabled();
    let imagga_calls = imagga.counter();
    let service = service(vec![Box::new(imagga)]);

    let first = service.detect(&image()).await;
    let second = service.detect(&image()).await;

    assert_eq!(first, FallbackProvider::outcome());
    assert_eq!(first, second);
    assert!(!first.success);
    assert_eq!(calls(&imagga_calls), 0);
}

#[tokio::test]
async fn test_lower_priority_number_wins() {
    let p = MockProvider::new("p", 10, Behavior::Labels(labels(&[("apple", 90.0)])));
    let q = MockProvider::new("q", 20, Behavior::Labels(labels(&[("chair", 80.0)])));
    let q_calls = q.counter();
    // Registration order must not matter
    let service = service(vec![Box::new(q), Box::new(p)]);

    let outcome = service.detect(&image()).await;
    assert!(outcome.success);
    assert_eq!(outcome.provider, "p");
    assert_eq!(outcome.objects[0].name, "apple");
    assert_eq!(calls(&q_calls), 0);
}

#[tokio::test]
async fn test_vision_scenario_threshold_and_mean() {
    let imagga = MockProvider::new("imagga", 10, Behavior::Labels(labels(&[("x", 99.0)])))
        .disabled();
    let vision = MockProvider::new(
        "google_vision",
        20,
        Behavior::Labels(labels(&[("Apple", 85.0), ("Fruit", 40.0), ("Red", 10.0)])),
    );
    let service = service(vec![Box::new(imagga), Box::new(vision)]);

    let outcome = service.detect(&image()).await;
    assert!(outcome.success);
    assert_eq!(outcome.provider, "google_vision");
    assert_eq!(outcome.objects.len(), 2);
    assert_eq!(outcome.objects[0].name, "Apple");
    assert_eq!(outcome.objects[1].name, "Fruit");
    assert_eq!(outcome.confidence, 62.5);
    assert!(outcome.objects.iter().all(|o| o.category == "food"));
}

#[tokio::test]
async fn test_failing_provider_is_skipped() {
    let broken = MockProvider::new("broken", 10, Behavior::Fail);
    let working = MockProvider::new("working", 20, Behavior::Labels(labels(&[("hammer", 70.0)])));
    let broken_calls = broken.counter();
    let service = service(vec![Box::new(broken), Box::new(working)]);

    let outcome = service.detect(&image()).await;
    assert_eq!(outcome.provider, "working");
    assert_eq!(outcome.objects[0].category, "tool");
    assert_eq!(calls(&broken_calls), 1);
}

#[tokio::test]
async fn test_all_labels_below_threshold_counts_as_failure() {
    let weak = MockProvider::new("weak", 10, Behavior::Labels(labels(&[("blur", 5.0)])));
    let strong = MockProvider::new("strong", 20, Behavior::Labels(labels(&[("dog", 95.0)])));
    let service = service(vec![Box::new(weak), Box::new(strong)]);

    let outcome = service.detect(&image()).await;
    assert_eq!(outcome.provider, "strong");
    assert_eq!(outcome.objects[0].category, "animal");
}

#[tokio::test]
async fn test_all_failures_return_fallback() {
    let a = MockProvider::new("a", 10, Behavior::Fail);
    let b = MockProvider::new("b", 20, Behavior::Labels(Vec::new()));
    let service = service(vec![Box::new(a), Box::new(b)]);

    let outcome = service.detect(&image()).await;
    assert_eq!(outcome, FallbackProvider::outcome());
}

#[tokio::test(start_paused = true)]
async fn test_hanging_provider_times_out() {
    let slow = MockProvider::new("slow", 10, Behavior::Hang);
    let fast = MockProvider::new("fast", 20, Behavior::Labels(labels(&[("sofa", 60.0)])));
    let slow_calls = slow.counter();
    let service = service(vec![Box::new(slow), Box::new(fast)]);

    let started = tokio::time::Instant::now();
    let outcome = service.detect(&image()).await;
    assert_eq!(outcome.provider, "fast");
    assert_eq!(calls(&slow_calls), 1);
    // Gave up on the slow provider at the 10s ceiling
    assert!(started.elapsed() >= Duration::from_secs(10));
    assert!(started.elapsed() < Duration::from_secs(3600));
}

#[tokio::test]
async fn test_objects_capped_in_provider_order() {
    let many: Vec<(String, f64)> = (0..15).map(|i| (format!("item{}", i), 90.0)).collect();
    let refs: Vec<(&str, f64)> = many.iter().map(|(n, c)| (n.as_str(), *c)).collect();
    let provider = MockProvider::new("many", 10, Behavior::Labels(labels(&refs)));
    let service = service(vec![Box::new(provider)]);

    let outcome = service.detect(&image()).await;
    assert_eq!(outcome.objects.len(), MAX_OBJECTS);
    for (i, object) in outcome.objects.iter().enumerate() {
        assert_eq!(object.name, format!("item{}", i));
    }
}

#[tokio::test]
async fn test_detect_batch() {
    let provider = MockProvider::new("p", 10, Behavior::Labels(labels(&[("car", 88.0)])));
    let service = service(vec![Box::new(provider)]);

    let images = vec![
        ImageInput::from_bytes(vec![1u8]),
        ImageInput::from_bytes(vec![2u8]),
    ];
    let outcomes = service.detect_batch(&images).await;
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.objects[0].category == "vehicle"));
}

#[tokio::test]
async fn test_empty_image_skips_providers() {
    let provider = MockProvider::new("p", 10, Behavior::Labels(labels(&[("car", 88.0)])));
    let counter = provider.counter();
    let service = service(vec![Box::new(provider)]);

    let outcome = service.detect(&ImageInput::from_bytes(Vec::new())).await;
    assert_eq!(outcome, FallbackProvider::outcome());
    assert_eq!(calls(&counter), 0);
}
