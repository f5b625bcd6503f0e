// ABOUTME: Test utilities for hiremenator-agent: scripted and hanging backends, stub search providers.
// ABOUTME: Used in tests to drive the dispatcher without real model or search API calls.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use hiremenator_core::search::SearchResult;

use crate::backend::{Backend, BackendError, Completion, GenerateRequest};
use crate::context::ChildCall;
use crate::search::{SearchError, SearchProvider};

/// One scripted backend answer.
#[derive(Debug, Clone)]
pub enum Step {
    Reply(Completion),
    Fail(BackendError),
    /// Sleep first, then reply. Used to force completion order.
    Delayed(Duration, Completion),
    /// Never finish. Counts how many hung calls were dropped.
    Hang,
}

/// Increments a counter when dropped, i.e. when the pending call is abandoned.
struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// A backend that replays a per-agent queue of steps and records every request.
///
/// An agent with an empty queue gets an `InvalidResponse` error.
#[derive(Default)]
pub struct ScriptedBackend {
    scripts: Mutex<HashMap<String, VecDeque<Step>>>,
    requests: Mutex<Vec<GenerateRequest>>,
    hanging: Arc<AtomicUsize>,
    abandoned: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a step for `agent`.
    pub fn step(self, agent: &str, step: Step) -> Self {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts.entry(agent.to_string()).or_default().push_back(step);
        }
        self
    }

    /// Queue a final text answer for `agent`.
    pub fn text(self, agent: &str, text: &str) -> Self {
        self.step(agent, Step::Reply(Completion::Text(text.to_string())))
    }

    /// Queue a set of child calls, given as (child name, input) pairs.
    pub fn calls(self, agent: &str, calls: &[(&str, &str)]) -> Self {
        let calls = calls
            .iter()
            .map(|(name, input)| ChildCall::new(*name, *input))
            .collect();
        self.step(agent, Step::Reply(Completion::Calls(calls)))
    }

    /// All requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn requests_for(&self, agent: &str) -> Vec<GenerateRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.agent == agent)
            .collect()
    }

    /// Number of calls currently or previously parked on a `Hang` step.
    pub fn hanging(&self) -> usize {
        self.hanging.load(Ordering::SeqCst)
    }

    /// Number of hung calls that were dropped by their caller.
    pub fn abandoned(&self) -> usize {
        self.abandoned.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn generate(&self, request: &GenerateRequest) -> Result<Completion, BackendError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let step = self
            .scripts
            .lock()
            .ok()
            .and_then(|mut scripts| scripts.get_mut(&request.agent).and_then(|q| q.pop_front()));

        match step {
            Some(Step::Reply(completion)) => Ok(completion),
            Some(Step::Fail(err)) => Err(err),
            Some(Step::Delayed(delay, completion)) => {
                tokio::time::sleep(delay).await;
                Ok(completion)
            }
            Some(Step::Hang) => {
                self.hanging.fetch_add(1, Ordering::SeqCst);
                let _guard = DropCounter(self.abandoned.clone());
                std::future::pending::<()>().await;
                Err(BackendError::Timeout)
            }
            None => Err(BackendError::InvalidResponse(format!(
                "no scripted step left for {}",
                request.agent
            ))),
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

/// A backend whose calls never complete. Records starts and abandonments.
#[derive(Default)]
pub struct HangingBackend {
    started: AtomicUsize,
    abandoned: Arc<AtomicUsize>,
}

impl HangingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn abandoned(&self) -> usize {
        self.abandoned.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for HangingBackend {
    async fn generate(&self, _request: &GenerateRequest) -> Result<Completion, BackendError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let _guard = DropCounter(self.abandoned.clone());
        std::future::pending::<()>().await;
        Err(BackendError::Timeout)
    }

    fn provider_name(&self) -> &str {
        "hanging"
    }
}

/// A search provider that returns a fixed list for every query and records the queries.
#[derive(Debug, Default)]
pub struct StubSearchProvider {
    results: Vec<SearchResult>,
    queries: Mutex<Vec<String>>,
}

impl StubSearchProvider {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SearchProvider for StubSearchProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }
        Ok(self.results.clone())
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

/// A search provider that always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingSearchProvider {
    message: String,
}

impl FailingSearchProvider {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl SearchProvider for FailingSearchProvider {
    async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, SearchError> {
        Err(SearchError::Provider {
            provider: "failing".to_string(),
            message: self.message.clone(),
        })
    }

    fn provider_name(&self) -> &str {
        "failing"
    }
}
