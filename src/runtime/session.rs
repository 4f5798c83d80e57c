//! Process-wide session → language map.

use std::num::NonZeroUsize;
use std::sync::{
    Mutex,
    MutexGuard,
};

use lru::LruCache;

/// Last-known language per session, shared across the process.
///
/// Reads and writes for the same key are atomic (one mutex around the map);
/// no cross-key coordination is needed. The map is bounded: least recently
/// used sessions are evicted once `capacity` entries are held, so it stays
/// sized to the concurrent-session population instead of growing for the
/// process lifetime.
pub struct SessionLanguageMap {
    /// Session id → language tag, LRU-evicted at capacity.
    entries: Mutex<LruCache<String, String>>,
}

impl std::fmt::Debug for SessionLanguageMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionLanguageMap").field("sessions", &self.len()).finish()
    }
}

impl SessionLanguageMap {
    /// Create a map bounded to `capacity` sessions.
    ///
    /// A zero capacity is clamped to 1 (settings validation already rejects
    /// it earlier).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self { entries: Mutex::new(LruCache::new(capacity)) }
    }

    /// Store the language for a session, overwriting any previous entry.
    pub fn set_language(&self, session_id: &str, language: &str) {
        self.lock().put(session_id.to_string(), language.to_string());
    }

    /// Last-known language for a session.
    ///
    /// A hit refreshes the entry's recency.
    #[must_use]
    pub fn get_language(&self, session_id: &str) -> Option<String> {
        self.lock().get(session_id).cloned()
    }

    /// Number of sessions currently remembered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Acquire the map lock, recovering from a poisoned mutex.
    fn lock(&self) -> MutexGuard<'_, LruCache<String, String>> {
        self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[googletest::test]
    fn set_then_get_returns_the_language() {
        let sessions = SessionLanguageMap::new(16);

        sessions.set_language("sess-1", "fr");

        expect_that!(sessions.get_language("sess-1"), some(eq("fr")));
        expect_that!(sessions.get_language("sess-2"), none());
    }

    #[googletest::test]
    fn set_overwrites_unconditionally() {
        let sessions = SessionLanguageMap::new(16);

        sessions.set_language("sess-1", "fr");
        sessions.set_language("sess-1", "de");

        expect_that!(sessions.get_language("sess-1"), some(eq("de")));
        expect_that!(sessions.len(), eq(1));
    }

    #[googletest::test]
    fn evicts_least_recently_used_at_capacity() {
        let sessions = SessionLanguageMap::new(2);

        sessions.set_language("a", "en");
        sessions.set_language("b", "fr");
        // Touch "a" so "b" is the eviction candidate.
        let _ = sessions.get_language("a");
        sessions.set_language("c", "de");

        expect_that!(sessions.get_language("a"), some(eq("en")));
        expect_that!(sessions.get_language("b"), none());
        expect_that!(sessions.get_language("c"), some(eq("de")));
    }

    #[rstest]
    fn zero_capacity_is_clamped() {
        let sessions = SessionLanguageMap::new(0);

        sessions.set_language("a", "en");

        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_writers_do_not_lose_their_own_entries() {
        use std::sync::Arc;

        let sessions = Arc::new(SessionLanguageMap::new(64));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let sessions = Arc::clone(&sessions);
                tokio::spawn(async move {
                    sessions.set_language(&format!("sess-{i}"), "en");
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(sessions.len(), 8);
    }
}
