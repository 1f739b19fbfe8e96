//! In-memory per-browser session store.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use igscout_core::Session;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug)]
struct SessionEntry {
    session: Session,
    last_seen: Instant,
}

/// Sessions keyed by the browser's session cookie.
///
/// Entries idle for longer than `ttl` are dropped on the next access. The
/// lock is only held for the duration of a synchronous closure, never across
/// a remote call.
#[derive(Debug, Clone)]
pub struct SessionStore {
    ttl: Duration,
    inner: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Runs `f` against the session for `id`, creating an empty one if the
    /// browser is new or its session expired.
    pub async fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut sessions = self.inner.lock().await;
        let now = Instant::now();

        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < self.ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "evicted idle sessions");
        }

        let entry = sessions.entry(id).or_insert_with(|| SessionEntry {
            session: Session::default(),
            last_seen: now,
        });
        entry.last_seen = now;
        f(&mut entry.session)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sessions_are_isolated_per_id() {
        let store = SessionStore::new(Duration::from_secs(60));
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        store.with_session(a, |s| s.begin_fetch("alpha")).await;
        let seed_b = store.with_session(b, |s| s.seed().map(str::to_owned)).await;
        let seed_a = store.with_session(a, |s| s.seed().map(str::to_owned)).await;

        assert_eq!(seed_a.as_deref(), Some("alpha"));
        assert!(seed_b.is_none());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted() {
        let store = SessionStore::new(Duration::ZERO);
        let a = Uuid::new_v4();

        store.with_session(a, |s| s.begin_fetch("alpha")).await;
        let seed = store.with_session(a, |s| s.seed().map(str::to_owned)).await;

        assert!(seed.is_none(), "expired session should start fresh");
        assert_eq!(store.len().await, 1);
    }
}
