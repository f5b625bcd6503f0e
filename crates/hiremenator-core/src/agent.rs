// ABOUTME: Agent configuration types: AgentSpec, AgentKind, ToolRef and DelegationEdge.
// ABOUTME: An agent is pure config (model, instruction, children, output key); dispatch lives elsewhere.

use serde::{Deserialize, Serialize};

use crate::schema::OutputSchema;

/// Model used by every agent unless the process overrides it.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";

/// Name of the generic web search leaf tool.
pub const SEARCH_TOOL_NAME: &str = "google_search";

/// Output key under which raw search results are stored.
pub const SEARCH_OUTPUT_KEY: &str = "googlesearchdata";

/// Where an agent sits in the delegation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// The orchestrator that receives user messages.
    Root,
    /// A user-facing specialist (CV, resume, interview, ...).
    Domain,
    /// A non-user-facing helper that wraps web search with formatting rules.
    Tool,
}

impl AgentKind {
    pub fn label(&self) -> &'static str {
        match self {
            AgentKind::Root => "root",
            AgentKind::Domain => "domain",
            AgentKind::Tool => "tool",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Something an agent can call: another registered agent or the search leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum ToolRef {
    Agent(String),
    Search,
}

impl ToolRef {
    /// Create a reference to a named agent.
    pub fn agent(name: impl Into<String>) -> Self {
        ToolRef::Agent(name.into())
    }

    /// The name the backend uses when it calls this tool.
    pub fn name(&self) -> &str {
        match self {
            ToolRef::Agent(name) => name,
            ToolRef::Search => SEARCH_TOOL_NAME,
        }
    }
}

impl std::fmt::Display for ToolRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable configuration of a single agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    pub kind: AgentKind,
    pub model: String,
    /// One-line summary, shown to the parent as the tool description.
    pub description: String,
    /// System instruction sent before each backend request.
    pub instruction: String,
    pub tools: Vec<ToolRef>,
    /// Key under which this agent's answer is stored in shared context.
    pub output_key: String,
    /// Declared answer shape. Only enforced when validation is switched on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<OutputSchema>,
}

impl AgentSpec {
    /// Create a spec with the default model and an output key of `<name>data`.
    pub fn new(name: impl Into<String>, kind: AgentKind) -> Self {
        let name = name.into();
        let output_key = format!("{}data", name.replace('_', ""));
        Self {
            name,
            kind,
            model: DEFAULT_MODEL.to_string(),
            description: String::new(),
            instruction: String::new(),
            tools: Vec::new(),
            output_key,
            output_schema: None,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    /// Add a callable child.
    pub fn tool(mut self, tool: ToolRef) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn output_key(mut self, key: impl Into<String>) -> Self {
        self.output_key = key.into();
        self
    }

    pub fn output_schema(mut self, schema: OutputSchema) -> Self {
        self.output_schema = Some(schema);
        self
    }

    /// Find the child reference the backend named, if this agent has it.
    pub fn find_tool(&self, name: &str) -> Option<&ToolRef> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Names of the agent children (the search leaf is excluded).
    pub fn child_agents(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().filter_map(|t| match t {
            ToolRef::Agent(name) => Some(name.as_str()),
            ToolRef::Search => None,
        })
    }
}

/// A static parent → child relationship in the delegation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationEdge {
    pub parent: String,
    pub child: ToolRef,
}
