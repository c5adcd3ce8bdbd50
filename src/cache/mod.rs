// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! TTL-based result cache shared by detection and enrichment lookups
//!
//! Entries are visible while `now - inserted_at < ttl`. Expired entries are
//! evicted lazily on the next `get`. Timestamps come from `tokio::time` so
//! tests can drive expiry with a paused clock.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::detection::DetectionOutcome;
use crate::enrichment::ProductDetail;

/// Default time-to-live for cache entries (1 hour)
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// A value stored in the result cache
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Detection(DetectionOutcome),
    Product(ProductDetail),
}

struct CachedEntry {
    value: CachedValue,
    inserted_at: Instant,
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Total entries in cache
    pub total: usize,
    /// Expired entries (not yet evicted)
    pub expired: usize,
    /// Maximum cache capacity, `None` when unbounded
    pub max: Option<usize>,
}

/// Process-wide TTL cache
pub struct ResultCache {
    cache: RwLock<HashMap<String, CachedEntry>>,
    ttl: Duration,
    max_entries: Option<usize>,
}

impl ResultCache {
    /// Create a new cache
    ///
    /// # Arguments
    /// * `ttl` - Time-to-live for entries
    /// * `max_entries` - Optional capacity; when full, expired entries are
    ///   dropped first and then the oldest live entry
    pub fn new(ttl: Duration, max_entries: Option<usize>) -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            ttl,
            max_entries,
        }
    }

    /// Look up a live entry. An expired entry is removed and reported as absent.
    pub fn get(&self, key: &str) -> Option<CachedValue> {
        {
            let cache = self.cache.read().ok()?;
            let entry = cache.get(key)?;
            if entry.inserted_at.elapsed() < self.ttl {
                return Some(entry.value.clone());
            }
        }

        // Expired: re-check under the write lock, a concurrent set may have refreshed it
        let mut cache = self.cache.write().ok()?;
        match cache.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                cache.remove(key);
                debug!("Evicted expired cache entry: {}", key);
                None
            }
            None => None,
        }
    }

    /// Insert or replace an entry
    pub fn set(&self, key: &str, value: CachedValue) {
        let mut cache = match self.cache.write() {
            Ok(c) => c,
            Err(_) => return,
        };

        if let Some(max) = self.max_entries {
            if !cache.contains_key(key) && cache.len() >= max {
                let ttl = self.ttl;
                cache.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
                if cache.len() >= max {
                    Self::evict_oldest(&mut cache);
                }
            }
        }

        cache.insert(
            key.to_string(),
            CachedEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Typed lookup for detection outcomes
    pub fn get_detection(&self, key: &str) -> Option<DetectionOutcome> {
        match self.get(key)? {
            CachedValue::Detection(outcome) => Some(outcome),
            CachedValue::Product(_) => None,
        }
    }

    /// Typed lookup for product details
    pub fn get_product(&self, key: &str) -> Option<ProductDetail> {
        match self.get(key)? {
            CachedValue::Product(detail) => Some(detail),
            CachedValue::Detection(_) => None,
        }
    }

    /// Clear all cache entries
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    /// Remove every expired entry
    pub fn cleanup_expired(&self) -> usize {
        match self.cache.write() {
            Ok(mut cache) => {
                let before = cache.len();
                cache.retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
                before - cache.len()
            }
            Err(_) => 0,
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let cache = match self.cache.read() {
            Ok(c) => c,
            Err(_) => {
                return CacheStats {
                    total: 0,
                    expired: 0,
                    max: self.max_entries,
                }
            }
        };

        CacheStats {
            total: cache.len(),
            expired: cache
                .values()
                .filter(|e| e.inserted_at.elapsed() >= self.ttl)
                .count(),
            max: self.max_entries,
        }
    }

    /// Configured time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn evict_oldest(cache: &mut HashMap<String, CachedEntry>) {
        if let Some(oldest_key) = cache
            .iter()
            .min_by_key(|(_, v)| v.inserted_at)
            .map(|(k, _)| k.clone())
        {
            cache.remove(&oldest_key);
        }
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TTL_SECS), None)
    }
}
