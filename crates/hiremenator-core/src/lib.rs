// ABOUTME: Core types for hiremenator: agent specs, the registry, the built-in catalog and output schemas.
// ABOUTME: Pure configuration and validation; no I/O beyond serialization.

pub mod agent;
pub mod catalog;
pub mod export;
pub mod registry;
pub mod schema;
pub mod search;

pub use agent::{AgentKind, AgentSpec, DEFAULT_MODEL, DelegationEdge, SEARCH_OUTPUT_KEY, SEARCH_TOOL_NAME, ToolRef};
pub use catalog::{ROOT_AGENT, build_catalog};
pub use registry::{AgentRegistry, RegistryError};
pub use schema::{NOT_AVAILABLE, OutputSchema, ParsedOutput, SchemaError, SchemaField};
pub use search::{SearchResult, render_results};
