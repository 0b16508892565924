//! In-memory source for fixtures and embedding applications

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::trace;

use crate::provider::TelemetrySource;
use crate::schema::SessionData;
use crate::types::SessionKey;
use crate::{Result, TelemetryError};

/// Source serving sessions inserted up front.
///
/// Counts loads so callers can check how often the source was hit.
#[derive(Debug, Default)]
pub struct MemorySource {
    sessions: HashMap<SessionKey, SessionData>,
    loads: AtomicUsize,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a session, builder style.
    pub fn with_session(mut self, key: SessionKey, session: SessionData) -> Self {
        self.insert(key, session);
        self
    }

    /// Add or replace a session.
    pub fn insert(&mut self, key: SessionKey, session: SessionData) {
        self.sessions.insert(key, session);
    }

    /// Number of `load_session` calls served so far, including failed ones.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl TelemetrySource for MemorySource {
    async fn load_session(&self, key: &SessionKey) -> Result<SessionData> {
        let count = self.loads.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(session = %key, count, "Serving session from memory");

        self.sessions
            .get(key)
            .cloned()
            .ok_or_else(|| TelemetryError::session_unavailable(key.to_string(), "not in memory source"))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;
    use crate::types::SessionKind;

    #[tokio::test]
    async fn serves_inserted_sessions_and_counts_loads() {
        let key = test_utils::session_key(SessionKind::Race);
        let source = MemorySource::new().with_session(key.clone(), test_utils::race_session());

        assert!(source.load_session(&key).await.is_ok());
        assert!(source.load_session(&key.with_kind(SessionKind::Qualifying)).await.is_err());
        assert_eq!(source.load_count(), 2);
    }
}
