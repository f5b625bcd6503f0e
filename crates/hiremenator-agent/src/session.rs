// ABOUTME: Per-conversation sessions keyed by ULID, each with its own history and output-key state.
// ABOUTME: Also tracks the cancellation token of each session's in-flight request.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use ulid::Ulid;

use crate::context::{AgentReply, Turn};
use crate::error::AgentError;

const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(3600);

/// One user's conversation with the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Ulid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub history: Vec<Turn>,
    /// Latest text stored under each output key.
    pub state: BTreeMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Ulid::new(),
            created_at: now,
            updated_at: now,
            history: Vec::new(),
            state: BTreeMap::new(),
        }
    }

    /// Append a completed exchange and store every output the reply carries.
    pub fn record_exchange(&mut self, message: &str, reply: &AgentReply) {
        self.history.push(Turn::User(message.to_string()));
        self.history.push(Turn::Model(reply.text.clone()));
        self.state.insert(reply.output_key.clone(), reply.text.clone());
        for (key, entry) in reply.context.iter() {
            self.state.insert(key.to_string(), entry.text.clone());
        }
        self.updated_at = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellation handle of the request currently running in a session.
struct Inflight {
    request_id: Ulid,
    token: CancellationToken,
}

type InflightMap = Arc<std::sync::Mutex<HashMap<Ulid, Inflight>>>;

fn lock_inflight(inflight: &InflightMap) -> std::sync::MutexGuard<'_, HashMap<Ulid, Inflight>> {
    inflight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Marks a session as busy for as long as it lives.
///
/// Dropping the guard, including when the request future itself is dropped,
/// unregisters the request so a later cancel no longer sees it.
pub struct RequestGuard {
    inflight: InflightMap,
    session_id: Ulid,
    request_id: Ulid,
    token: CancellationToken,
}

impl RequestGuard {
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        let mut inflight = lock_inflight(&self.inflight);
        if inflight
            .get(&self.session_id)
            .is_some_and(|current| current.request_id == self.request_id)
        {
            inflight.remove(&self.session_id);
        }
    }
}

/// Thread-safe map of sessions. Sessions never share state.
///
/// Sessions idle for longer than the configured ttl are dropped the next time
/// a session is created.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Ulid, Arc<Mutex<Session>>>>>,
    inflight: InflightMap,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TTL)
    }
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            inflight: Arc::default(),
            idle_ttl,
        }
    }

    /// Create an empty session and return a copy of it.
    pub async fn create(&self) -> Session {
        self.evict_idle().await;

        let session = Session::new();
        let snapshot = session.clone();
        self.sessions
            .write()
            .await
            .insert(session.id, Arc::new(Mutex::new(session)));
        tracing::info!(session_id = %snapshot.id, "session created");
        snapshot
    }

    /// Handle to a live session. Lock it to read or mutate.
    pub async fn get(&self, id: Ulid) -> Result<Arc<Mutex<Session>>, AgentError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(AgentError::SessionNotFound(id))
    }

    /// A copy of the session as it is now.
    pub async fn snapshot(&self, id: Ulid) -> Result<Session, AgentError> {
        let session = self.get(id).await?;
        let guard = session.lock().await;
        Ok(guard.clone())
    }

    /// Delete a session, cancelling its in-flight request if there is one.
    pub async fn remove(&self, id: Ulid) -> Result<(), AgentError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .ok_or(AgentError::SessionNotFound(id))?;
        if let Some(request) = lock_inflight(&self.inflight).remove(&id) {
            request.token.cancel();
        }
        tracing::info!(session_id = %id, "session removed");
        Ok(())
    }

    /// Drop every session whose last exchange is older than the idle ttl.
    ///
    /// Sessions that are locked by a running request are busy, not idle.
    /// Returns how many sessions were dropped.
    pub async fn evict_idle(&self) -> usize {
        let Some(cutoff) = chrono::TimeDelta::from_std(self.idle_ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_sub_signed(ttl))
        else {
            return 0;
        };

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Ok(session) => session.updated_at >= cutoff,
            Err(_) => true,
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "idle sessions evicted");
        }
        evicted
    }

    /// Register a new in-flight request for `id`.
    ///
    /// The request stays cancellable until the returned guard is dropped.
    pub fn begin_request(&self, id: Ulid) -> RequestGuard {
        let request_id = Ulid::new();
        let token = CancellationToken::new();
        lock_inflight(&self.inflight).insert(
            id,
            Inflight {
                request_id,
                token: token.clone(),
            },
        );
        RequestGuard {
            inflight: self.inflight.clone(),
            session_id: id,
            request_id,
            token,
        }
    }

    /// Cancel the in-flight request of `id`. Returns false when nothing was running.
    pub async fn cancel(&self, id: Ulid) -> Result<bool, AgentError> {
        if !self.sessions.read().await.contains_key(&id) {
            return Err(AgentError::SessionNotFound(id));
        }
        match lock_inflight(&self.inflight).get(&id) {
            Some(request) => {
                request.token.cancel();
                tracing::info!(session_id = %id, "request cancelled");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
