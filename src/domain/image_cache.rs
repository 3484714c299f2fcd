//! In-memory TTL cache of generated images.
//!
//! [`ImageCache`] maps a [`PromptKey`] to a base64 image payload. Every
//! entry lives for the same fixed TTL. There is no capacity limit and no
//! eviction policy other than expiry; the cache is lost on restart.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::PromptKey;

#[derive(Debug, Clone)]
struct CachedImage {
    photo: Arc<str>,
    expires_at: Instant,
}

/// Shared store of generated images keyed by normalized prompt.
///
/// # Concurrency
///
/// The map sits behind a single [`RwLock`]. Lookups take a read lock;
/// inserts and sweeps take a write lock. Concurrent misses on the same key
/// are not coalesced: each caller generates its own image and the last
/// insert wins.
#[derive(Debug)]
pub struct ImageCache {
    ttl: Duration,
    entries: RwLock<HashMap<PromptKey, CachedImage>>,
}

impl ImageCache {
    /// Creates an empty cache whose entries expire `ttl` after insertion.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the configured entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached payload for `key` if it has not expired.
    ///
    /// Expired entries are left for [`ImageCache::purge_expired`].
    pub async fn get(&self, key: &PromptKey) -> Option<Arc<str>> {
        let map = self.entries.read().await;
        map.get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| Arc::clone(&entry.photo))
    }

    /// Stores `photo` under `key`, replacing any previous entry and
    /// restarting its TTL.
    pub async fn insert(&self, key: PromptKey, photo: Arc<str>) {
        let entry = CachedImage {
            photo,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.write().await.insert(key, entry);
    }

    /// Drops every expired entry and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut map = self.entries.write().await;
        let before = map.len();
        map.retain(|_, entry| entry.expires_at > now);
        before - map.len()
    }

    /// Returns the number of stored entries, including expired ones not yet
    /// swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Spawns a task that calls [`ImageCache::purge_expired`] every `period`.
    ///
    /// The task runs until the returned handle is aborted or the runtime
    /// shuts down.
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = cache.purge_expired().await;
                if removed > 0 {
                    tracing::debug!(removed, "swept expired cached images");
                }
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn key(prompt: &str) -> PromptKey {
        PromptKey::from_prompt(prompt)
    }

    #[tokio::test]
    async fn insert_and_get() {
        let cache = ImageCache::new(Duration::from_secs(60));
        cache.insert(key("a red fox"), Arc::from("AAAA")).await;

        let hit = cache.get(&key("A  Red Fox")).await;
        assert_eq!(hit.as_deref(), Some("AAAA"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn miss_returns_none() {
        let cache = ImageCache::new(Duration::from_secs(60));
        assert!(cache.get(&key("nothing here")).await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn expired_entry_is_not_returned() {
        let cache = ImageCache::new(Duration::ZERO);
        cache.insert(key("a red fox"), Arc::from("AAAA")).await;

        assert!(cache.get(&key("a red fox")).await.is_none());
        // Still stored until swept.
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn purge_removes_only_expired() {
        let cache = ImageCache::new(Duration::ZERO);
        cache.insert(key("old"), Arc::from("AAAA")).await;

        assert_eq!(cache.purge_expired().await, 1);
        assert!(cache.is_empty().await);

        let cache = ImageCache::new(Duration::from_secs(60));
        cache.insert(key("fresh"), Arc::from("BBBB")).await;
        assert_eq!(cache.purge_expired().await, 0);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn reinsert_replaces_payload() {
        let cache = ImageCache::new(Duration::from_secs(60));
        cache.insert(key("p"), Arc::from("first")).await;
        cache.insert(key("p"), Arc::from("second")).await;

        assert_eq!(cache.get(&key("p")).await.as_deref(), Some("second"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn sweeper_clears_expired_entries() {
        let cache = Arc::new(ImageCache::new(Duration::ZERO));
        cache.insert(key("old"), Arc::from("AAAA")).await;

        let handle = cache.spawn_sweeper(Duration::from_millis(10));
        for _ in 0..50 {
            if cache.is_empty().await {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.abort();

        assert!(cache.is_empty().await);
    }
}
