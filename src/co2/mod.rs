// Copyright (c) 2026 decarbonator project
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/decarbonator/decarbonator-rs

//! CO2 aggregate cache
//!
//! The cross-plant CO2 total is expensive to recompute (the production
//! deployment pulls logger CSVs from cloud storage) and read constantly by
//! summary views, so it lives behind a small explicit cache: Empty until the
//! first compute, Fresh after a successful one, Stale on invalidation or
//! max-age expiry, Fresh again on refresh.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::EngineError;

/// Upstream provider of the aggregate CO2 total. Injectable so tests run
/// without network access.
#[async_trait]
pub trait Co2Source: Send + Sync {
    /// Recomputes the aggregate total. May block on I/O; this is the only
    /// suspension point in the engine.
    async fn fetch_total(&self) -> anyhow::Result<f64>;
}

/// Freshness of the cached entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheState {
    /// The value reflects the most recent successful compute.
    Fresh,
    /// The value is a last-known fallback; the next read recomputes.
    Stale,
}

/// The cached total and when it was computed. Owned exclusively by
/// [`Co2AggregateCache`]; mutated only through its refresh path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Co2CacheEntry {
    /// Aggregate CO2 total across all plants.
    pub value: f64,
    /// Instant of the last successful compute.
    pub computed_at: DateTime<Utc>,
    /// Freshness state.
    pub state: CacheState,
}

/// Process-wide cached CO2 total with explicit refresh and staleness.
///
/// The entry sits behind a `tokio::sync::Mutex` that is held across the
/// upstream fetch. Callers that observe a stale or empty entry queue on the
/// lock; all but the first find a fresh entry when they acquire it, so
/// exactly one recompute is in flight at a time and every waiter receives
/// its result. Expiry is a predicate evaluated at call time, not a
/// background job.
pub struct Co2AggregateCache {
    source: Arc<dyn Co2Source>,
    max_age: Option<Duration>,
    entry: Mutex<Option<Co2CacheEntry>>,
}

impl Co2AggregateCache {
    /// Creates an empty cache over `source`. With `max_age = None` a fresh
    /// entry never expires on its own.
    pub fn new(source: Arc<dyn Co2Source>, max_age: Option<Duration>) -> Self {
        Self {
            source,
            max_age,
            entry: Mutex::new(None),
        }
    }

    /// Returns the cached value if it is fresh, otherwise recomputes,
    /// stores, and returns the result. On failure the stored entry keeps
    /// its last value and stays stale; only this call sees the error.
    pub async fn get_total(&self) -> Result<f64, EngineError> {
        let mut slot = self.entry.lock().await;
        if let Some(entry) = slot.as_ref() {
            if entry.state == CacheState::Fresh && !self.expired(entry) {
                return Ok(entry.value);
            }
        }
        self.recompute(&mut slot).await
    }

    /// Unconditionally recomputes and overwrites the cache, regardless of
    /// current freshness.
    pub async fn refresh(&self) -> Result<f64, EngineError> {
        let mut slot = self.entry.lock().await;
        self.recompute(&mut slot).await
    }

    /// Marks the entry stale without recomputing; the next
    /// [`get_total`](Self::get_total) pays for the recompute.
    pub async fn invalidate(&self) {
        let mut slot = self.entry.lock().await;
        if let Some(entry) = slot.as_mut() {
            entry.state = CacheState::Stale;
            debug!("CO2 cache invalidated");
        }
    }

    /// Snapshot of the stored entry, if any. `None` means never computed.
    pub async fn entry(&self) -> Option<Co2CacheEntry> {
        *self.entry.lock().await
    }

    fn expired(&self, entry: &Co2CacheEntry) -> bool {
        match self.max_age {
            Some(max_age) => Utc::now() - entry.computed_at > max_age,
            None => false,
        }
    }

    async fn recompute(
        &self,
        slot: &mut Option<Co2CacheEntry>,
    ) -> Result<f64, EngineError> {
        match self.source.fetch_total().await {
            Ok(value) => {
                *slot = Some(Co2CacheEntry {
                    value,
                    computed_at: Utc::now(),
                    state: CacheState::Fresh,
                });
                debug!("CO2 total recomputed: {:.2}", value);
                Ok(value)
            }
            Err(err) => {
                // Keep the last known value; the entry just stays stale.
                if let Some(entry) = slot.as_mut() {
                    entry.state = CacheState::Stale;
                }
                warn!("CO2 recompute failed: {:#}", err);
                Err(EngineError::UpstreamUnavailable(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Stub source: counts fetches, optionally fails, and sleeps briefly so
    /// concurrent callers genuinely overlap.
    struct StubSource {
        fetches: AtomicUsize,
        fail: AtomicBool,
    }

    impl StubSource {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                fetches: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
            })
        }
    }

    #[async_trait]
    impl Co2Source for StubSource {
        async fn fetch_total(&self) -> anyhow::Result<f64> {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("upstream offline");
            }
            let n = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(n as f64 * 100.0)
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_get_total_is_single_flight() {
        let source = StubSource::new();
        let cache = Arc::new(Co2AggregateCache::new(source.clone(), None));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move { cache.get_total().await }));
        }

        let mut values = Vec::new();
        for handle in handles {
            values.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        assert!(values.iter().all(|&v| v == 100.0));
    }

    #[tokio::test]
    async fn test_invalidate_forces_recompute_on_next_get() {
        let source = StubSource::new();
        let cache = Co2AggregateCache::new(source.clone(), None);

        assert_eq!(cache.get_total().await.unwrap(), 100.0);
        // Fresh entry: repeated reads are free.
        assert_eq!(cache.get_total().await.unwrap(), 100.0);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

        cache.invalidate().await;
        assert_eq!(cache.entry().await.unwrap().state, CacheState::Stale);
        assert_eq!(cache.get_total().await.unwrap(), 200.0);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh_recomputes_even_when_fresh() {
        let source = StubSource::new();
        let cache = Co2AggregateCache::new(source.clone(), None);

        assert_eq!(cache.get_total().await.unwrap(), 100.0);
        assert_eq!(cache.refresh().await.unwrap(), 200.0);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_last_value_and_stays_stale() {
        let source = StubSource::new();
        let cache = Co2AggregateCache::new(source.clone(), None);

        assert_eq!(cache.get_total().await.unwrap(), 100.0);
        cache.invalidate().await;
        source.fail.store(true, Ordering::SeqCst);

        let err = cache.get_total().await.unwrap_err();
        assert!(matches!(err, EngineError::UpstreamUnavailable(_)));

        let entry = cache.entry().await.unwrap();
        assert_eq!(entry.value, 100.0);
        assert_eq!(entry.state, CacheState::Stale);

        // Upstream recovers; the next read repairs the entry.
        source.fail.store(false, Ordering::SeqCst);
        assert_eq!(cache.get_total().await.unwrap(), 200.0);
        assert_eq!(cache.entry().await.unwrap().state, CacheState::Fresh);
    }

    #[tokio::test]
    async fn test_max_age_expiry_is_checked_lazily() {
        let source = StubSource::new();
        let cache = Co2AggregateCache::new(source.clone(), Some(Duration::milliseconds(30)));

        assert_eq!(cache.get_total().await.unwrap(), 100.0);
        tokio::time::sleep(std::time::Duration::from_millis(60)).await;

        // Entry is past max age; the read itself triggers the recompute.
        assert_eq!(cache.get_total().await.unwrap(), 200.0);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }
}
