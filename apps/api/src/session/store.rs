use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::SessionSnapshot;

struct Entry {
    snapshot: Arc<SessionSnapshot>,
    last_seen: DateTime<Utc>,
}

/// In-memory map of session id → latest snapshot. Cloning shares the map.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Entry>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn create(&self) -> Arc<SessionSnapshot> {
        let snapshot = Arc::new(SessionSnapshot::new(Uuid::new_v4()));
        let mut sessions = self.inner.write().await;
        self.evict_expired(&mut sessions, Utc::now());
        sessions.insert(
            snapshot.id,
            Entry {
                snapshot: snapshot.clone(),
                last_seen: Utc::now(),
            },
        );
        debug!(session_id = %snapshot.id, active = sessions.len(), "Session created");
        snapshot
    }

    /// Latest snapshot, or `None` if unknown or idle past the TTL. Counts as activity.
    pub async fn get(&self, id: Uuid) -> Option<Arc<SessionSnapshot>> {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;
        let expired = sessions
            .get(&id)
            .map(|entry| now - entry.last_seen > self.ttl)?;
        if expired {
            sessions.remove(&id);
            debug!(session_id = %id, "Session expired");
            return None;
        }
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = now;
        Some(entry.snapshot.clone())
    }

    /// Applies `change` to the current snapshot under the write lock and stores the result.
    /// Returns `None` if the session is unknown or has expired; nothing is re-created.
    pub async fn update<F>(&self, id: Uuid, change: F) -> Option<Arc<SessionSnapshot>>
    where
        F: FnOnce(&SessionSnapshot) -> SessionSnapshot,
    {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;
        self.evict_expired(&mut sessions, now);
        let entry = sessions.get_mut(&id)?;
        entry.snapshot = Arc::new(change(&entry.snapshot));
        entry.last_seen = now;
        Some(entry.snapshot.clone())
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    fn evict_expired(&self, sessions: &mut HashMap<Uuid, Entry>, now: DateTime<Utc>) {
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_seen <= self.ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, "Evicted idle sessions");
        }
    }
}
