//! In-process cache with sliding expiration.
//!
//! Every hit pushes the entry's deadline forward by the idle window; an entry is only
//! dropped once it has gone unread for the whole window. Values of any `Clone` type can
//! share one cache as long as each key is always used with the same type.

use std::{
    any::Any,
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use dashmap::DashMap;
use tokio::time::Instant;

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    last_access: Instant,
}

/// Expired entries are dropped when their key is read again, and in bulk by the first
/// insert after each idle window, so keys that are never asked for again do not pile up.
#[derive(Clone)]
pub struct SlidingCache {
    entries: Arc<DashMap<String, CacheEntry>>,
    idle: Duration,
    created: Instant,
    // millis since `created` of the last sweep
    last_sweep: Arc<AtomicU64>,
}

impl std::fmt::Debug for SlidingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlidingCache")
            .field("entries", &self.entries.len())
            .field("idle", &self.idle)
            .finish()
    }
}

impl SlidingCache {
    pub fn new(idle: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            idle,
            created: Instant::now(),
            last_sweep: Arc::new(AtomicU64::new(0)),
        }
    }

    fn millis_since_created(&self) -> u64 {
        u64::try_from(self.created.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Runs `purge_expired` at most once per idle window across all clones.
    fn sweep_if_due(&self) {
        let now = self.millis_since_created();
        let last = self.last_sweep.load(Ordering::Relaxed);
        let idle = u64::try_from(self.idle.as_millis()).unwrap_or(u64::MAX);
        if now.saturating_sub(last) < idle {
            return;
        }
        if self
            .last_sweep
            .compare_exchange(last, now, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            let dropped = self.purge_expired();
            if dropped > 0 {
                tracing::debug!(dropped, remaining = self.entries.len(), "cache swept");
            }
        }
    }

    /// Returns a live value and resets its idle countdown.
    pub fn get<V>(&self, key: &str) -> Option<V>
    where
        V: Clone + Send + Sync + 'static,
    {
        let now = Instant::now();
        let (hit, expired) = match self.entries.get_mut(key) {
            Some(mut entry) if now.duration_since(entry.last_access) < self.idle => {
                entry.last_access = now;
                (entry.value.downcast_ref::<V>().cloned(), false)
            }
            Some(_) => (None, true),
            None => (None, false),
        };
        if expired {
            self.entries.remove(key);
        }
        hit
    }

    pub fn insert<V>(&self, key: impl Into<String>, value: V)
    where
        V: Send + Sync + 'static,
    {
        self.sweep_if_due();
        self.entries.insert(
            key.into(),
            CacheEntry {
                value: Arc::new(value),
                last_access: Instant::now(),
            },
        );
    }

    /// Read-through lookup. On a miss `factory` runs and its successful result is stored;
    /// errors are returned as-is and nothing is cached. Concurrent misses on the same key
    /// may each run the factory.
    pub async fn get_or_create<V, E, F, Fut>(&self, key: &str, factory: F) -> Result<V, E>
    where
        V: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get::<V>(key) {
            tracing::trace!(key, "cache hit");
            return Ok(value);
        }

        tracing::debug!(key, "cache miss");
        let value = factory().await?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Drops every entry whose idle window has elapsed and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.duration_since(entry.last_access) < self.idle);
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    const IDLE: Duration = Duration::from_secs(30);

    #[tokio::test(start_paused = true)]
    async fn access_slides_the_deadline() {
        let cache = SlidingCache::new(IDLE);
        cache.insert("brands", vec!["All".to_string()]);

        tokio::time::advance(Duration::from_secs(20)).await;
        assert!(cache.get::<Vec<String>>("brands").is_some());

        // 40s after insert but only 20s after the last read
        tokio::time::advance(Duration::from_secs(20)).await;
        assert!(cache.get::<Vec<String>>("brands").is_some());

        tokio::time::advance(IDLE).await;
        assert!(cache.get::<Vec<String>>("brands").is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn get_or_create_runs_factory_once_per_live_key() {
        let cache = SlidingCache::new(IDLE);
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: Result<u32, ()> = cache
                .get_or_create("types", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await;
            assert_eq!(value, Ok(7));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(IDLE).await;
        let _: Result<u32, ()> = cache
            .get_or_create("types", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(8)
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cache = SlidingCache::new(IDLE);
        let failed: Result<u32, &str> = cache.get_or_create("k", || async { Err("down") }).await;
        assert_eq!(failed, Err("down"));
        assert!(cache.is_empty());

        let ok: Result<u32, &str> = cache.get_or_create("k", || async { Ok(1) }).await;
        assert_eq!(ok, Ok(1));
    }

    #[tokio::test]
    async fn type_mismatch_is_a_miss() {
        let cache = SlidingCache::new(IDLE);
        cache.insert("k", 5_u32);
        assert_eq!(cache.get::<String>("k"), None);
        assert_eq!(cache.get::<u32>("k"), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn purge_drops_only_idle_entries() {
        let cache = SlidingCache::new(IDLE);
        cache.insert("old", 1_u8);
        tokio::time::advance(Duration::from_secs(25)).await;
        cache.insert("fresh", 2_u8);
        tokio::time::advance(Duration::from_secs(10)).await;

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get::<u8>("fresh"), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn inserts_sweep_keys_that_are_never_read_again() {
        let cache = SlidingCache::new(IDLE);
        for page in 0..500 {
            let _: Result<u64, ()> = cache
                .get_or_create(&format!("items-{page}-10--"), || async move { Ok(page) })
                .await;
        }
        assert_eq!(cache.len(), 500);

        tokio::time::advance(Duration::from_secs(60 * 60)).await;
        let _: Result<u64, ()> = cache
            .get_or_create("items-500-10--", || async { Ok(500) })
            .await;
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn sweeps_spare_entries_still_in_their_window() {
        let cache = SlidingCache::new(IDLE);
        cache.insert("a", 1_u8);
        tokio::time::advance(Duration::from_secs(25)).await;
        cache.insert("b", 2_u8);
        tokio::time::advance(Duration::from_secs(10)).await;

        // 35s since the last sweep: "a" has expired, "b" has not
        cache.insert("c", 3_u8);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get::<u8>("b"), Some(2));
        assert_eq!(cache.get::<u8>("a"), None);
    }
}
