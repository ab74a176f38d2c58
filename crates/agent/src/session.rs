use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use concierge_core::SessionContext;
use tokio::sync::Mutex;
use tracing::debug;

/// Bounds on the in-memory session store. Sessions idle past `ttl` are swept
/// on access, and the oldest-idle sessions are dropped when the store grows
/// past `max_sessions`.
#[derive(Clone, Copy, Debug)]
pub struct EvictionPolicy {
    pub max_sessions: usize,
    pub ttl: Duration,
}

impl Default for EvictionPolicy {
    fn default() -> Self {
        Self { max_sessions: 4096, ttl: Duration::hours(1) }
    }
}

/// Keyed store of conversational state. Implementations hand out one shared
/// handle per session id; callers lock that handle for the duration of a
/// turn, which serializes concurrent requests to the same session while
/// letting different sessions proceed in parallel.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session for `id`, creating an empty one on first
    /// reference.
    async fn session(&self, id: &str) -> Arc<Mutex<SessionContext>>;

    async fn session_count(&self) -> usize;
}

struct Entry {
    context: Arc<Mutex<SessionContext>>,
    last_access: DateTime<Utc>,
}

pub struct InMemorySessionStore {
    policy: EvictionPolicy,
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemorySessionStore {
    pub fn new(policy: EvictionPolicy) -> Self {
        Self { policy, entries: Mutex::new(HashMap::new()) }
    }

    fn evict(&self, entries: &mut HashMap<String, Entry>, keep: &str) {
        let now = Utc::now();
        let expired: Vec<String> = entries
            .iter()
            .filter(|(id, entry)| {
                id.as_str() != keep && now - entry.last_access >= self.policy.ttl
            })
            .map(|(id, _)| id.clone())
            .collect();
        for id in expired {
            entries.remove(&id);
            debug!(event_name = "session.evicted", session_id = %id, reason = "ttl");
        }

        while entries.len() > self.policy.max_sessions {
            let oldest = entries
                .iter()
                .filter(|(id, _)| id.as_str() != keep)
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    entries.remove(&id);
                    debug!(event_name = "session.evicted", session_id = %id, reason = "capacity");
                }
                None => break,
            }
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(EvictionPolicy::default())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn session(&self, id: &str) -> Arc<Mutex<SessionContext>> {
        let mut entries = self.entries.lock().await;

        let context = match entries.get_mut(id) {
            Some(entry) => {
                entry.last_access = Utc::now();
                Arc::clone(&entry.context)
            }
            None => {
                let context = Arc::new(Mutex::new(SessionContext::new()));
                entries.insert(
                    id.to_string(),
                    Entry { context: Arc::clone(&context), last_access: Utc::now() },
                );
                context
            }
        };

        self.evict(&mut entries, id);
        context
    }

    async fn session_count(&self) -> usize {
        self.entries.lock().await.len()
    }
}
