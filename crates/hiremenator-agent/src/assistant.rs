// ABOUTME: Assistant facade: runs the root agent for a session and records the exchange.
// ABOUTME: Turns within one session are serialised; different sessions run independently.

use std::sync::Arc;

use ulid::Ulid;

use crate::context::AgentReply;
use crate::dispatcher::Dispatcher;
use crate::error::AgentError;
use crate::session::{Session, SessionStore};

pub struct Assistant {
    dispatcher: Arc<Dispatcher>,
    sessions: SessionStore,
    root: String,
}

impl Assistant {
    /// Create an assistant whose entry point is the registered agent `root`.
    pub fn new(dispatcher: Arc<Dispatcher>, root: impl Into<String>) -> Result<Self, AgentError> {
        let root = root.into();
        dispatcher.registry().resolve(&root)?;
        let sessions = SessionStore::new(dispatcher.config().session_idle_ttl);
        Ok(Self {
            dispatcher,
            sessions,
            root,
        })
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub async fn create_session(&self) -> Session {
        self.sessions.create().await
    }

    /// Send a user message in `session_id` and wait for the root agent's answer.
    ///
    /// A failed or cancelled request leaves the session history unchanged.
    pub async fn send(&self, session_id: Ulid, message: &str) -> Result<AgentReply, AgentError> {
        let session = self.sessions.get(session_id).await?;
        let mut session = session.lock().await;

        let request = self.sessions.begin_request(session_id);
        tracing::info!(session_id = %session_id, turns = session.history.len(), "handling message");
        let result = self
            .dispatcher
            .run(&self.root, &session.history, message, request.token())
            .await;
        drop(request);

        let reply = result?;
        session.record_exchange(message, &reply);
        Ok(reply)
    }

    /// Cancel the request currently running in `session_id`, if any.
    pub async fn cancel(&self, session_id: Ulid) -> Result<bool, AgentError> {
        self.sessions.cancel(session_id).await
    }

    /// Delete a session and abort whatever it is running.
    pub async fn remove_session(&self, session_id: Ulid) -> Result<(), AgentError> {
        self.sessions.remove(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use hiremenator_core::agent::{AgentKind, AgentSpec, ToolRef};
    use hiremenator_core::registry::AgentRegistry;

    use crate::config::DispatchConfig;
    use crate::context::Turn;
    use crate::search::SearchAdapter;
    use crate::testing::{ScriptedBackend, Step, StubSearchProvider};

    fn assistant(backend: Arc<ScriptedBackend>) -> Assistant {
        let mut registry = AgentRegistry::new();
        registry
            .register(
                AgentSpec::new("hiremenator", AgentKind::Root)
                    .tool(ToolRef::agent("cv_agent"))
                    .output_key("hiremenatordata"),
            )
            .unwrap();
        registry
            .register(
                AgentSpec::new("cv_agent", AgentKind::Domain)
                    .tool(ToolRef::Search)
                    .output_key("cvdata"),
            )
            .unwrap();
        let dispatcher = Dispatcher::new(
            Arc::new(registry),
            backend,
            SearchAdapter::new(Arc::new(StubSearchProvider::default())),
            DispatchConfig {
                retries: 0,
                ..DispatchConfig::default()
            },
        )
        .unwrap();
        Assistant::new(Arc::new(dispatcher), "hiremenator").unwrap()
    }

    #[tokio::test]
    async fn send_records_history_and_state() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .calls("hiremenator", &[("cv_agent", "review")])
                .text("hiremenator", "Your CV looks good.")
                .text("cv_agent", "Reviewed.")
                .text("hiremenator", "Anything else?"),
        );
        let assistant = assistant(backend.clone());
        let session = assistant.create_session().await;

        let reply = assistant.send(session.id, "Review my CV").await.unwrap();
        assert_eq!(reply.text, "Your CV looks good.");

        let snapshot = assistant.sessions().snapshot(session.id).await.unwrap();
        assert_eq!(
            snapshot.history,
            vec![
                Turn::User("Review my CV".into()),
                Turn::Model("Your CV looks good.".into())
            ]
        );
        assert_eq!(snapshot.state["cvdata"], "Reviewed.");
        assert_eq!(snapshot.state["hiremenatordata"], "Your CV looks good.");

        assistant.send(session.id, "Thanks").await.unwrap();
        let last = backend.requests_for("hiremenator").pop().unwrap();
        assert_eq!(last.history.len(), 3);
        assert_eq!(last.history[0], Turn::User("Review my CV".into()));
    }

    #[tokio::test]
    async fn cancel_stops_the_running_request() {
        let backend = Arc::new(ScriptedBackend::new().step("hiremenator", Step::Hang));
        let assistant = Arc::new(assistant(backend.clone()));
        let session = assistant.create_session().await;

        let task = {
            let assistant = assistant.clone();
            tokio::spawn(async move { assistant.send(session.id, "hello").await })
        };

        for _ in 0..200 {
            if backend.hanging() == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(assistant.cancel(session.id).await.unwrap());

        let result = tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(result, Err(AgentError::Cancelled)));
        assert_eq!(backend.abandoned(), 1);

        let snapshot = assistant.sessions().snapshot(session.id).await.unwrap();
        assert!(snapshot.history.is_empty());
    }

    #[tokio::test]
    async fn dropped_send_no_longer_counts_as_running() {
        let backend = Arc::new(ScriptedBackend::new().step("hiremenator", Step::Hang));
        let assistant = assistant(backend.clone());
        let session = assistant.create_session().await;

        let result =
            tokio::time::timeout(Duration::from_millis(50), assistant.send(session.id, "hi")).await;
        assert!(result.is_err());
        assert_eq!(backend.abandoned(), 1);

        assert!(!assistant.cancel(session.id).await.unwrap());
        let snapshot = assistant.sessions().snapshot(session.id).await.unwrap();
        assert!(snapshot.history.is_empty());
    }

    #[tokio::test]
    async fn removed_session_is_gone() {
        let assistant = assistant(Arc::new(ScriptedBackend::new()));
        let session = assistant.create_session().await;

        assistant.remove_session(session.id).await.unwrap();

        let err = assistant.send(session.id, "hi").await.unwrap_err();
        assert!(matches!(err, AgentError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn unknown_session_and_root_are_errors() {
        let assistant = assistant(Arc::new(ScriptedBackend::new()));
        let err = assistant.send(Ulid::new(), "hi").await.unwrap_err();
        assert!(matches!(err, AgentError::SessionNotFound(_)));

        let err = Assistant::new(assistant.dispatcher().clone(), "ghost").err().unwrap();
        assert!(matches!(err, AgentError::Registry(_)));
    }
}
