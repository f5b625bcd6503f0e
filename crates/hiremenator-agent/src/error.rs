// ABOUTME: AgentError, the error type returned by dispatch, sessions and the assistant facade.
// ABOUTME: Distinguishes propagating failures from the ones a parent degrades to "Not Available".

use ulid::Ulid;

use hiremenator_core::registry::RegistryError;
use hiremenator_core::schema::SchemaError;

use crate::search::SearchError;

/// Errors that can occur while running an agent.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("agent not found: {0}")]
    NotFound(String),

    #[error("backend unavailable for {agent}: {reason}")]
    BackendUnavailable { agent: String, reason: String },

    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("output rejected: {0}")]
    SchemaMismatch(#[from] SchemaError),

    #[error("request cancelled")]
    Cancelled,

    #[error("agent {agent} exceeded {turns} delegation turns")]
    TurnLimit { agent: String, turns: usize },

    #[error("session not found: {0}")]
    SessionNotFound(Ulid),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl AgentError {
    /// Whether a parent agent may absorb this failure as missing data
    /// instead of aborting the whole request.
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            AgentError::BackendUnavailable { .. }
                | AgentError::Search(_)
                | AgentError::SchemaMismatch(_)
        )
    }
}
