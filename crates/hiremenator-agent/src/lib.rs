// ABOUTME: Agent runtime for hiremenator: backend trait, delegation dispatcher, search adapter and sessions.
// ABOUTME: Model and search providers are pluggable; the Gemini and Google adapters are the defaults.

pub mod assistant;
pub mod backend;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod providers;
pub mod search;
pub mod session;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use assistant::Assistant;
pub use backend::{Backend, BackendError, Completion, GenerateRequest, ToolDescriptor};
pub use config::{ConfigError, DispatchConfig};
pub use context::{AgentReply, ChildCall, ChildResult, ContextEntry, DelegationContext, Turn};
pub use dispatcher::Dispatcher;
pub use error::AgentError;
pub use providers::GeminiBackend;
pub use search::{GoogleSearchProvider, SearchAdapter, SearchError, SearchProvider};
pub use session::{RequestGuard, Session, SessionStore};
