//! Process-local cache backend.

use super::{CacheInterface, CacheLookup};
use async_trait::async_trait;
use catalog_core::CatalogResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory cache with per-entry expiry.
///
/// Deadlines are measured on the tokio clock, so a paused test runtime can
/// advance past a TTL deterministically. Expired entries are dropped when
/// read, and by the sweeper from [`InMemoryCache::spawn_sweeper`] for keys
/// that are never read again.
#[derive(Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included until purged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns `true` if `key` holds a live entry.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .read()
            .get(key)
            .is_some_and(|entry| entry.is_live(now))
    }

    /// Drops every expired entry, returning how many were removed.
    fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    /// Starts a task that purges expired entries every `period`.
    ///
    /// The task holds only a weak reference and exits once the cache is
    /// dropped. Must be called from within a tokio runtime.
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let cache: Weak<Self> = Arc::downgrade(self);
        let period = period.max(Duration::from_secs(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let Some(cache) = cache.upgrade() else {
                    break;
                };
                let purged = cache.purge_expired();
                if purged > 0 {
                    debug!("Purged {} expired cache entries", purged);
                }
            }
        })
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get(&self, key: &str) -> CacheLookup {
        let now = Instant::now();

        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => {
                    debug!("Cache hit for key '{}'", key);
                    return CacheLookup::Hit(entry.value.clone());
                }
                Some(_) => {}
                None => {
                    debug!("Cache miss for key '{}'", key);
                    return CacheLookup::Miss;
                }
            }
        }

        // Expired: drop it unless a concurrent set replaced it meanwhile.
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
            entries.remove(key);
        }
        debug!("Cache entry expired for key '{}'", key);
        CacheLookup::Miss
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CatalogResult<()> {
        let entry = Entry {
            value: value.to_vec(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().insert(key.to_string(), entry);
        debug!("Cached key '{}' with TTL {:?}", key, ttl);
        Ok(())
    }

    async fn ping(&self) -> CatalogResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for InMemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCache")
            .field("entries", &self.len())
            .finish()
    }
}
