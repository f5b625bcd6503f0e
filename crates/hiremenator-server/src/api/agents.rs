// ABOUTME: Agent catalog API handlers for listing agents and reading one agent's full spec.
// ABOUTME: The registry is read-only, so handlers only borrow it.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hiremenator_core::AgentKind;

use crate::api::error_response;
use crate::app_state::SharedState;

/// Summary of an agent for the list endpoint.
#[derive(Debug, Serialize)]
pub struct AgentSummary {
    pub name: String,
    pub kind: AgentKind,
    pub description: String,
    pub output_key: String,
    pub tools: Vec<String>,
}

/// GET /api/agents - List every agent in registration order.
pub async fn list_agents(State(state): State<SharedState>) -> Json<Vec<AgentSummary>> {
    Json(
        state
            .registry
            .iter()
            .map(|spec| AgentSummary {
                name: spec.name.clone(),
                kind: spec.kind,
                description: spec.description.clone(),
                output_key: spec.output_key.clone(),
                tools: spec.tools.iter().map(|t| t.name().to_string()).collect(),
            })
            .collect(),
    )
}

/// GET /api/agents/{name} - Full spec including instruction and schema.
pub async fn get_agent(State(state): State<SharedState>, Path(name): Path<String>) -> Response {
    match state.registry.resolve(&name) {
        Ok(spec) => Json(spec.clone()).into_response(),
        Err(e) => error_response(StatusCode::NOT_FOUND, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::routes::tests::{json_body, test_state};
    use axum::body::Body;
    use hiremenator_agent::testing::ScriptedBackend;
    use http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn list_returns_whole_catalog() {
        let app = create_router(test_state(ScriptedBackend::new()));
        let resp = app
            .oneshot(Request::get("/api/agents").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let json = json_body(resp).await;
        let agents = json.as_array().unwrap();
        assert_eq!(agents.len(), 27);
        assert_eq!(agents[0]["name"], "hiremenator");
        assert_eq!(agents[0]["kind"], "root");
        assert_eq!(agents[0]["tools"].as_array().unwrap().len(), 13);
    }

    #[tokio::test]
    async fn get_agent_returns_spec() {
        let app = create_router(test_state(ScriptedBackend::new()));
        let resp = app
            .oneshot(Request::get("/api/agents/cv_agent").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let json = json_body(resp).await;
        assert_eq!(json["output_key"], "cvdata");
        assert_eq!(json["tools"][1]["name"], "googlecv");
        assert!(json["instruction"].as_str().unwrap().contains("Not Available"));
    }

    #[tokio::test]
    async fn get_unknown_agent_is_404() {
        let app = create_router(test_state(ScriptedBackend::new()));
        let resp = app
            .oneshot(Request::get("/api/agents/ghost").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
        let json = json_body(resp).await;
        assert!(json["error"].as_str().unwrap().contains("ghost"));
    }
}
