//! Session caching
//!
//! Loading a session means reading and validating a whole weekend's laps, so
//! loaded sessions are kept in a [`SessionCache`] shared by reference between
//! handlers. The cache is an explicit object: create it when the application
//! starts, hand an `Arc` of it to whatever serves requests, and call
//! [`SessionCache::clear`] on shutdown.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::Result;
use crate::provider::TelemetrySource;
use crate::schema::SessionData;
use crate::types::SessionKey;

/// Cached session with load bookkeeping
#[derive(Debug, Clone)]
pub struct CachedSession {
    /// Loaded session
    pub session: Arc<SessionData>,
    /// When the source returned it
    pub loaded_at: SystemTime,
    /// Number of requests served from this entry
    pub hits: u64,
}

impl CachedSession {
    fn new(session: Arc<SessionData>) -> Self {
        Self { session, loaded_at: SystemTime::now(), hits: 0 }
    }
}

/// Bounded cache of loaded sessions keyed by [`SessionKey`].
///
/// When full, the entry loaded longest ago is evicted.
#[derive(Debug)]
pub struct SessionCache {
    entries: RwLock<HashMap<SessionKey, CachedSession>>,
    capacity: usize,
}

impl SessionCache {
    /// Create a cache holding at most `capacity` sessions (at least one).
    pub fn new(capacity: usize) -> Self {
        Self { entries: RwLock::new(HashMap::new()), capacity: capacity.max(1) }
    }

    /// Maximum number of sessions kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Return the cached session for `key`, loading it from `source` on a miss.
    ///
    /// Failed loads are not cached, so a later request retries the source.
    pub async fn get_or_load(
        &self,
        source: &dyn TelemetrySource,
        key: &SessionKey,
    ) -> Result<Arc<SessionData>> {
        if let Some(session) = self.get(key).await {
            return Ok(session);
        }

        debug!(session = %key, source = source.name(), "Session cache miss");
        let session = Arc::new(source.load_session(key).await?);

        let mut entries = self.entries.write().await;
        // Another request may have loaded the same session meanwhile; keep the first.
        if let Some(existing) = entries.get(key) {
            return Ok(Arc::clone(&existing.session));
        }

        if entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.loaded_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                debug!(session = %oldest, "Evicting session from cache");
                entries.remove(&oldest);
            }
        }

        entries.insert(key.clone(), CachedSession::new(Arc::clone(&session)));
        Ok(session)
    }

    /// Cached session for `key`, if present.
    pub async fn get(&self, key: &SessionKey) -> Option<Arc<SessionData>> {
        let mut entries = self.entries.write().await;
        entries.get_mut(key).map(|entry| {
            entry.hits += 1;
            Arc::clone(&entry.session)
        })
    }

    /// Bookkeeping for a cached session.
    pub async fn entry(&self, key: &SessionKey) -> Option<CachedSession> {
        self.entries.read().await.get(key).cloned()
    }

    /// Whether `key` is cached.
    pub async fn contains(&self, key: &SessionKey) -> bool {
        self.entries.read().await.contains_key(key)
    }

    /// Drop one session so the next request reloads it.
    pub async fn invalidate(&self, key: &SessionKey) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    /// Number of cached sessions.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every cached session. Call on shutdown.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        let dropped = entries.len();
        entries.clear();
        info!(dropped, "Session cache cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TelemetryError;
    use crate::providers::MemorySource;
    use crate::test_utils;
    use crate::types::SessionKind;

    fn source() -> MemorySource {
        MemorySource::new()
            .with_session(test_utils::session_key(SessionKind::Race), test_utils::race_session())
            .with_session(
                test_utils::session_key(SessionKind::Qualifying),
                test_utils::qualifying_session(),
            )
    }

    #[tokio::test]
    async fn second_request_is_served_from_cache() {
        let source = source();
        let cache = SessionCache::new(4);
        let key = test_utils::session_key(SessionKind::Race);

        let first = cache.get_or_load(&source, &key).await.unwrap();
        let second = cache.get_or_load(&source, &key).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.load_count(), 1);
        assert_eq!(cache.entry(&key).await.unwrap().hits, 1);
    }

    #[tokio::test]
    async fn failed_loads_are_not_cached() {
        let source = MemorySource::new();
        let cache = SessionCache::new(4);
        let key = test_utils::session_key(SessionKind::Race);

        for _ in 0..2 {
            let err = cache.get_or_load(&source, &key).await.unwrap_err();
            assert!(matches!(err, TelemetryError::SessionUnavailable { .. }));
        }
        assert_eq!(source.load_count(), 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn full_cache_evicts_oldest_entry() {
        let source = source();
        let cache = SessionCache::new(1);
        let race = test_utils::session_key(SessionKind::Race);
        let quali = test_utils::session_key(SessionKind::Qualifying);

        cache.get_or_load(&source, &race).await.unwrap();
        cache.get_or_load(&source, &quali).await.unwrap();

        assert_eq!(cache.len().await, 1);
        assert!(cache.contains(&quali).await);
        assert!(!cache.contains(&race).await);
    }

    #[tokio::test]
    async fn invalidate_and_clear() {
        let source = source();
        let cache = SessionCache::new(4);
        let race = test_utils::session_key(SessionKind::Race);

        cache.get_or_load(&source, &race).await.unwrap();
        assert!(cache.invalidate(&race).await);
        assert!(!cache.invalidate(&race).await);

        cache.get_or_load(&source, &race).await.unwrap();
        assert_eq!(source.load_count(), 2);

        cache.clear().await;
        assert!(cache.is_empty().await);
        assert_eq!(cache.capacity(), 4);
    }
}
