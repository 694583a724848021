//! In-memory session store with inactivity expiry.
//!
//! Uploaded gradebooks never touch disk: each lives under a generated id
//! until it is deleted or sits idle past the timeout. The calculation engine
//! never sees this store; handlers fetch data out of it and pass it by value.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use markbook_ingestion::ParsedGradebook;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::state::SharedState;

struct SessionEntry {
    data: ParsedGradebook,
    last_accessed: Instant,
}

pub struct SessionStore {
    timeout: Duration,
    inner: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Store a parsed gradebook under a fresh session id.
    pub async fn put(&self, data: ParsedGradebook) -> Uuid {
        let id = Uuid::new_v4();
        let entry = SessionEntry {
            data,
            last_accessed: Instant::now(),
        };
        self.inner.write().await.insert(id, entry);
        id
    }

    /// Fetch a session's data, refreshing its last-access time.
    pub async fn get(&self, id: &Uuid) -> Option<ParsedGradebook> {
        let mut sessions = self.inner.write().await;
        let entry = sessions.get_mut(id)?;
        entry.last_accessed = Instant::now();
        Some(entry.data.clone())
    }

    /// Refresh a session's last-access time without reading it.
    pub async fn touch(&self, id: &Uuid) -> bool {
        let mut sessions = self.inner.write().await;
        match sessions.get_mut(id) {
            Some(entry) => {
                entry.last_accessed = Instant::now();
                true
            }
            None => false,
        }
    }

    /// Drop a session. Returns whether it existed.
    pub async fn delete(&self, id: &Uuid) -> bool {
        self.inner.write().await.remove(id).is_some()
    }

    /// Remove every session idle past the timeout; returns how many.
    pub async fn sweep(&self) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_accessed.elapsed() <= self.timeout);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

/// Periodic expiry sweep, alongside the on-access sweeps in the upload and
/// health handlers.
pub fn spawn_sweeper(state: SharedState, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.tick().await; // the first tick fires immediately
        loop {
            ticker.tick().await;
            let removed = state.sessions.sweep().await;
            if removed > 0 {
                info!(removed, "expired sessions swept");
            }
        }
    });
}
