// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Product detail caching by label

use scan_vision::cache::ResultCache;
use scan_vision::categorize::Categorizer;
use scan_vision::enrichment::ProductEnrichmentService;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

use super::mock::{calls, MockSource, SourceBehavior};

const HOUR: Duration = Duration::from_secs(3600);

fn service_with(source: MockSource) -> (ProductEnrichmentService, Arc<AtomicUsize>) {
    let counter = source.counter();
    let service = ProductEnrichmentService::new(
        vec![Box::new(source)],
        None,
        Arc::new(ResultCache::new(HOUR, None)),
        Arc::new(Categorizer::offline()),
        Duration::from_secs(8),
    );
    (service, counter)
}

#[tokio::test(start_paused = true)]
async fn test_banana_cached_within_hour() {
    let (service, counter) = service_with(MockSource::new("src", 10, SourceBehavior::Found));

    let first = service.get_product_details("banana").await;
    tokio::time::advance(Duration::from_secs(59 * 60)).await;
    let second = service.get_product_details("banana").await;

    assert_eq!(first, second);
    assert_eq!(calls(&counter), 1);
}

#[tokio::test(start_paused = true)]
async fn test_banana_resolved_again_after_hour() {
    let (service, counter) = service_with(MockSource::new("src", 10, SourceBehavior::Found));

    service.get_product_details("banana").await;
    tokio::time::advance(Duration::from_secs(61 * 60)).await;
    service.get_product_details("banana").await;

    assert_eq!(calls(&counter), 2);
}

#[tokio::test]
async fn test_label_key_ignores_case_and_whitespace() {
    let (service, counter) = service_with(MockSource::new("src", 10, SourceBehavior::Found));

    service.get_product_details("Banana").await;
    service.get_product_details("  banana ").await;

    assert_eq!(calls(&counter), 1);
    assert_eq!(service.cache_stats().total, 1);
}

#[tokio::test]
async fn test_synthesized_detail_is_cached() {
    let (service, counter) = service_with(MockSource::new("src", 10, SourceBehavior::Empty));

    let first = service.get_product_details("gizmo").await;
    let second = service.get_product_details("gizmo").await;

    assert!(first.is_generated());
    assert_eq!(first, second);
    assert_eq!(calls(&counter), 1);
}
