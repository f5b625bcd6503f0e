// ABOUTME: API module containing all HTTP handler functions for the hiremenator REST API.
// ABOUTME: Organized into agent catalog browsing and session messaging, plus shared error mapping.

pub mod agents;
pub mod sessions;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hiremenator_agent::AgentError;

/// Build a JSON error response with the given status.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message.into() })),
    )
        .into_response()
}

/// Map an agent error to the HTTP status a client can act on.
pub(crate) fn status_for(err: &AgentError) -> StatusCode {
    match err {
        AgentError::NotFound(_) | AgentError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        AgentError::BackendUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AgentError::Search(_) | AgentError::SchemaMismatch(_) => StatusCode::BAD_GATEWAY,
        AgentError::Cancelled => StatusCode::CONFLICT,
        AgentError::TurnLimit { .. } | AgentError::Registry(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn agent_error_response(err: &AgentError) -> Response {
    let status = status_for(err);
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    } else {
        tracing::debug!(error = %err, "request rejected");
    }
    error_response(status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiremenator_agent::SearchError;
    use ulid::Ulid;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(status_for(&AgentError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&AgentError::SessionNotFound(Ulid::new())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&AgentError::BackendUnavailable {
                agent: "x".into(),
                reason: "timeout".into()
            }),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&AgentError::Search(SearchError::InvalidQuery)),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status_for(&AgentError::Cancelled), StatusCode::CONFLICT);
    }
}
