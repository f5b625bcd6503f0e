// ABOUTME: End-to-end smoke test for the full hiremenator lifecycle over HTTP.
// ABOUTME: Drives the real catalog through the router with a scripted backend and stub search.

use std::sync::Arc;

use axum::body::Body;
use http::Request;
use tower::ServiceExt;

use hiremenator_agent::testing::{ScriptedBackend, StubSearchProvider};
use hiremenator_agent::{Assistant, DispatchConfig, Dispatcher, SearchAdapter};
use hiremenator_core::{ROOT_AGENT, SearchResult, build_catalog};
use hiremenator_server::{AppState, create_router};

/// Helper to extract JSON body from a response.
async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn smoke_test_full_lifecycle() {
    // 1. Script the tree: root -> cv_agent -> googlecv -> google_search
    let backend = Arc::new(
        ScriptedBackend::new()
            .calls("hiremenator", &[("cv_agent", "Review my CV for a Rust role")])
            .calls("cv_agent", &[("googlecv", "CV best practices for Rust engineers")])
            .calls("googlecv", &[("google_search", "rust engineer cv tips")])
            .text("googlecv", "Lead with shipped systems. [Source](https://example.com/cv)")
            .text("cv_agent", "Move your Rust projects to the top.")
            .text("hiremenator", "Your CV should lead with your Rust projects."),
    );
    let search = Arc::new(StubSearchProvider::new(vec![
        SearchResult::new(
            "Writing a great engineering CV",
            "https://example.com/cv",
            "Lead with impact.",
        )
        .published("2026-03-01"),
    ]));

    let registry = Arc::new(build_catalog("stub-model").unwrap());
    let dispatcher = Dispatcher::new(
        registry,
        backend.clone(),
        SearchAdapter::new(search.clone()),
        DispatchConfig::default(),
    )
    .unwrap();
    let assistant = Assistant::new(Arc::new(dispatcher), ROOT_AGENT).unwrap();
    let app = create_router(Arc::new(AppState::new(Arc::new(assistant))));

    // 2. The catalog is browsable
    let resp = app
        .clone()
        .oneshot(Request::get("/api/agents").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(json_body(resp).await.as_array().unwrap().len(), 27);

    // 3. POST /api/sessions
    let resp = app
        .clone()
        .oneshot(Request::post("/api/sessions").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let session_id = json_body(resp).await["session_id"]
        .as_str()
        .unwrap()
        .to_string();

    // 4. POST a message and get the root's answer
    let resp = app
        .clone()
        .oneshot(
            Request::post(format!("/api/sessions/{session_id}/messages"))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({ "message": "Can you check my CV?" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let reply = json_body(resp).await;
    assert_eq!(reply["text"], "Your CV should lead with your Rust projects.");
    assert_eq!(reply["incomplete"].as_array().unwrap().len(), 0);
    assert_eq!(reply["context"]["cvdata"]["text"], "Move your Rust projects to the top.");
    let results = reply["context"]["cvdata"]["results"].as_array().unwrap();
    assert_eq!(results[0]["url"], "https://example.com/cv");
    assert_eq!(results[0]["published_date"], "2026-03-01");

    // 5. Search saw the query the tool agent asked for
    assert_eq!(search.queries(), vec!["rust engineer cv tips".to_string()]);
    assert_eq!(backend.requests_for("googlecv").len(), 2);

    // 6. GET /api/sessions/{id} shows the exchange and stored outputs
    let resp = app
        .oneshot(
            Request::get(format!("/api/sessions/{session_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let session = json_body(resp).await;
    assert_eq!(session["history"].as_array().unwrap().len(), 2);
    assert_eq!(
        session["state"]["hiremenatordata"],
        "Your CV should lead with your Rust projects."
    );
    assert_eq!(session["state"]["cvdata"], "Move your Rust projects to the top.");
}
