use crate::fetch::{QueryClient, QueryKey, QuerySnapshot};
use crate::models::PropertyFilters;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

struct SessionState {
    current: Option<QueryKey>,
    snapshot: QuerySnapshot,
}

/// A consumer's view onto the query client.
///
/// Tracks which filter value the consumer is currently subscribed to and
/// applies a resolved fetch only if that key is still current, so a slow
/// response for superseded filters can never overwrite fresher state.
pub struct PropertySession {
    client: Arc<QueryClient>,
    state: Arc<Mutex<SessionState>>,
}

impl PropertySession {
    pub fn new(client: Arc<QueryClient>) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(SessionState {
                current: None,
                snapshot: QuerySnapshot::idle(),
            })),
        }
    }

    /// Current observable state: idle before the first `apply`, loading
    /// while the current key resolves, then success or error.
    pub fn snapshot(&self) -> QuerySnapshot {
        self.state.lock().unwrap().snapshot.clone()
    }

    /// Make `filters` the current subscription and resolve it in the
    /// background. Returns the task handle so callers can await completion.
    pub fn apply(&self, filters: Option<PropertyFilters>) -> JoinHandle<()> {
        let key = QueryKey::new(filters);
        {
            let mut state = self.state.lock().unwrap();
            state.current = Some(key.clone());
            state.snapshot = QuerySnapshot::loading();
        }

        let client = self.client.clone();
        let state = self.state.clone();
        tokio::spawn(async move {
            let snapshot = client.fetch(key.filters()).await;

            let mut state = state.lock().unwrap();
            if state.current.as_ref() == Some(&key) {
                state.snapshot = snapshot;
            } else {
                debug!("Discarding stale response for {:?}", key.filters());
            }
        })
    }
}
