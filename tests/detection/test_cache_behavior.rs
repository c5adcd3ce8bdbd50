// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection caching: idempotence, TTL expiry, content identity

use scan_vision::cache::ResultCache;
use scan_vision::categorize::Categorizer;
use scan_vision::detection::{DetectionService, ImageInput, ProviderRegistry};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use super::mock::{calls, labels, Behavior, MockProvider};

const HOUR: Duration = Duration::from_secs(3600);

fn service_with(provider: MockProvider) -> DetectionService {
    DetectionService::new(
        ProviderRegistry::new(vec![Box::new(provider)]),
        Arc::new(ResultCache::new(HOUR, None)),
        Arc::new(Categorizer::offline()),
        Duration::from_secs(10),
    )
}

#[tokio::test(start_paused = true)]
async fn test_second_call_within_ttl_is_cached() {
    let provider = MockProvider::new("p", 10, Behavior::Labels(labels(&[("apple", 80.0)])));
    let counter = provider.counter();
    let service = service_with(provider);
    let image = ImageInput::from_bytes(vec![9u8, 9, 9]);

    let first = service.detect(&image).await;
    tokio::time::advance(Duration::from_secs(30 * 60)).await;
    let second = service.detect(&image).await;

    assert_eq!(first, second);
    assert_eq!(calls(&counter), 1);
    assert_eq!(service.cache_stats().total, 1);
}

#[tokio::test(start_paused = true)]
async fn test_refetch_after_ttl() {
    let provider = MockProvider::new("p", 10, Behavior::Labels(labels(&[("apple", 80.0)])));
    let counter = provider.counter();
    let service = service_with(provider);
    let image = ImageInput::from_bytes(vec![9u8, 9, 9]);

    service.detect(&image).await;
    tokio::time::advance(HOUR + Duration::from_secs(1)).await;
    service.detect(&image).await;

    assert_eq!(calls(&counter), 2);
}

#[tokio::test]
async fn test_same_path_new_content_is_not_stale() {
    let provider = MockProvider::new("p", 10, Behavior::Labels(labels(&[("apple", 80.0)])));
    let counter = provider.counter();
    let service = service_with(provider);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.jpg");

    std::fs::File::create(&path).unwrap().write_all(b"first image").unwrap();
    service.detect_path(&path).await;

    std::fs::File::create(&path).unwrap().write_all(b"second image").unwrap();
    service.detect_path(&path).await;

    // Keyed by content, so the rewritten file triggers a fresh detection
    assert_eq!(calls(&counter), 2);
}

#[tokio::test]
async fn test_identical_content_shares_entry() {
    let provider = MockProvider::new("p", 10, Behavior::Labels(labels(&[("apple", 80.0)])));
    let counter = provider.counter();
    let service = service_with(provider);

    service.detect(&ImageInput::from_bytes(b"same".to_vec())).await;
    service.detect(&ImageInput::from_bytes(b"same".to_vec())).await;

    assert_eq!(calls(&counter), 1);
}
