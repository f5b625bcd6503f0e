// ABOUTME: Defines the Backend trait every generative model adapter implements.
// ABOUTME: Also defines GenerateRequest (what the dispatcher sends) and Completion (what comes back).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use hiremenator_core::agent::{AgentSpec, ToolRef};
use hiremenator_core::registry::AgentRegistry;

use crate::context::{ChildCall, DelegationContext, Turn};

/// How a callable child is described to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// Name of the single string argument: `request` for agents, `query` for search.
    pub parameter: String,
}

impl ToolDescriptor {
    /// Describe a child of an agent, looking up agent descriptions in `registry`.
    pub fn for_tool(tool: &ToolRef, registry: &AgentRegistry) -> Self {
        match tool {
            ToolRef::Agent(name) => Self {
                name: name.clone(),
                description: registry
                    .resolve(name)
                    .map(|spec| spec.description.clone())
                    .unwrap_or_default(),
                parameter: "request".to_string(),
            },
            ToolRef::Search => Self {
                name: tool.name().to_string(),
                description: "Search the web. Returns ranked results with title, URL, snippet and date."
                    .to_string(),
                parameter: "query".to_string(),
            },
        }
    }
}

/// One model invocation on behalf of an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub agent: String,
    pub model: String,
    pub instruction: String,
    pub history: Vec<Turn>,
    pub tools: Vec<ToolDescriptor>,
    /// Results gathered so far by this agent's children.
    pub context: DelegationContext,
}

impl GenerateRequest {
    /// Build a request for `spec` with its children described from `registry`.
    pub fn for_agent(
        spec: &AgentSpec,
        registry: &AgentRegistry,
        instruction: String,
        history: Vec<Turn>,
        context: DelegationContext,
    ) -> Self {
        Self {
            agent: spec.name.clone(),
            model: spec.model.clone(),
            instruction,
            history,
            tools: spec
                .tools
                .iter()
                .map(|t| ToolDescriptor::for_tool(t, registry))
                .collect(),
            context,
        }
    }
}

/// What the model decided in one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Completion {
    /// Final answer text.
    Text(String),
    /// Run these children and report back.
    Calls(Vec<ChildCall>),
}

/// Errors reported by a backend adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    #[error("backend call timed out")]
    Timeout,

    #[error("rate limited")]
    RateLimited,

    #[error("request rejected ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BackendError::Unreachable(_) | BackendError::Timeout | BackendError::RateLimited
        )
    }
}

/// Trait that all generative backends implement. Adapters translate a
/// GenerateRequest into their API and parse the answer into a Completion.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<Completion, BackendError>;

    /// Provider name for logging (e.g. "gemini").
    fn provider_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiremenator_core::agent::{AgentKind, SEARCH_TOOL_NAME};

    #[test]
    fn retryable_errors() {
        assert!(BackendError::Unreachable("dns".into()).is_retryable());
        assert!(BackendError::Timeout.is_retryable());
        assert!(BackendError::RateLimited.is_retryable());
        assert!(
            !BackendError::Rejected {
                status: 400,
                body: "bad".into()
            }
            .is_retryable()
        );
        assert!(!BackendError::InvalidResponse("x".into()).is_retryable());
    }

    #[test]
    fn request_describes_children() {
        let mut registry = AgentRegistry::new();
        let cv = AgentSpec::new("cv_agent", AgentKind::Domain)
            .model("m")
            .tool(ToolRef::Search)
            .tool(ToolRef::agent("googlecv"));
        registry.register(cv.clone()).unwrap();
        registry
            .register(AgentSpec::new("googlecv", AgentKind::Tool).description("cv research"))
            .unwrap();

        let req = GenerateRequest::for_agent(
            &cv,
            &registry,
            "be helpful".into(),
            vec![Turn::User("hi".into())],
            DelegationContext::new(),
        );
        assert_eq!(req.agent, "cv_agent");
        assert_eq!(req.model, "m");
        assert_eq!(req.tools.len(), 2);
        assert_eq!(req.tools[0].name, SEARCH_TOOL_NAME);
        assert_eq!(req.tools[0].parameter, "query");
        assert_eq!(req.tools[1].description, "cv research");
        assert_eq!(req.tools[1].parameter, "request");
    }
}
