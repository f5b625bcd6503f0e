// ABOUTME: Route definitions for the hiremenator HTTP API.
// ABOUTME: Assembles all API routes into a single Axum Router with shared state and request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;

/// Build the complete Axum router with all routes and shared state.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/agents", get(api::agents::list_agents))
        .route("/api/agents/{name}", get(api::agents::get_agent))
        .route("/api/sessions", post(api::sessions::create_session))
        .route(
            "/api/sessions/{id}",
            get(api::sessions::get_session).delete(api::sessions::delete_session),
        )
        .route("/api/sessions/{id}/messages", post(api::sessions::send_message))
        .route("/api/sessions/{id}/cancel", post(api::sessions::cancel_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app_state::AppState;
    use axum::body::Body;
    use http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    use hiremenator_agent::testing::{ScriptedBackend, StubSearchProvider};
    use hiremenator_agent::{Assistant, DispatchConfig, Dispatcher, SearchAdapter};
    use hiremenator_core::{ROOT_AGENT, build_catalog};

    /// State backed by the full catalog and a scripted backend.
    pub(crate) fn test_state(backend: ScriptedBackend) -> SharedState {
        test_state_shared(Arc::new(backend))
    }

    /// Same as `test_state`, keeping a handle on the backend for inspection.
    pub(crate) fn test_state_shared(backend: Arc<ScriptedBackend>) -> SharedState {
        let registry = Arc::new(build_catalog("stub-model").unwrap());
        let dispatcher = Dispatcher::new(
            registry,
            backend,
            SearchAdapter::new(Arc::new(StubSearchProvider::default())),
            DispatchConfig {
                retries: 0,
                ..DispatchConfig::default()
            },
        )
        .unwrap();
        let assistant = Assistant::new(Arc::new(dispatcher), ROOT_AGENT).unwrap();
        Arc::new(AppState::new(Arc::new(assistant)))
    }

    pub(crate) async fn json_body(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let app = create_router(test_state(ScriptedBackend::new()));
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        let json = json_body(resp).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = create_router(test_state(ScriptedBackend::new()));
        let resp = app
            .oneshot(Request::get("/api/nothing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
    }
}
