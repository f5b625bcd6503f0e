// ABOUTME: Session API handlers: create, read and delete conversations, send messages, cancel requests.
// ABOUTME: Each message runs the root agent to completion before the response is returned.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use ulid::Ulid;

use crate::api::{agent_error_response, error_response};
use crate::app_state::SharedState;

/// Request body for sending a user message.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

fn parse_session_id(id: &str) -> Result<Ulid, Response> {
    id.parse::<Ulid>()
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "invalid session id"))
}

/// POST /api/sessions - Start a new conversation.
pub async fn create_session(State(state): State<SharedState>) -> Response {
    let session = state.assistant.create_session().await;
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "session_id": session.id.to_string() })),
    )
        .into_response()
}

/// GET /api/sessions/{id} - History and stored outputs of a session.
pub async fn get_session(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let session_id = match parse_session_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match state.assistant.sessions().snapshot(session_id).await {
        Ok(session) => Json(session).into_response(),
        Err(e) => agent_error_response(&e),
    }
}

/// DELETE /api/sessions/{id} - Drop a session and abort its in-flight request.
pub async fn delete_session(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let session_id = match parse_session_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match state.assistant.remove_session(session_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => agent_error_response(&e),
    }
}

/// POST /api/sessions/{id}/messages - Send a message and wait for the assistant's reply.
pub async fn send_message(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<SendMessageRequest>,
) -> Response {
    let session_id = match parse_session_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if body.message.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "message must not be empty");
    }

    match state.assistant.send(session_id, &body.message).await {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => agent_error_response(&e),
    }
}

/// POST /api/sessions/{id}/cancel - Abort the session's in-flight request.
pub async fn cancel_request(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let session_id = match parse_session_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match state.assistant.cancel(session_id).await {
        Ok(cancelled) => Json(serde_json::json!({ "cancelled": cancelled })).into_response(),
        Err(e) => agent_error_response(&e),
    }
}
