// ABOUTME: Shared application state for the hiremenator HTTP server.
// ABOUTME: Holds the read-only agent registry and the assistant that owns the sessions.

use std::sync::Arc;

use hiremenator_agent::Assistant;
use hiremenator_core::AgentRegistry;

/// Shared application state accessible by all Axum handlers.
pub struct AppState {
    pub registry: Arc<AgentRegistry>,
    pub assistant: Arc<Assistant>,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build state around an assistant; the registry is the one its dispatcher runs.
    pub fn new(assistant: Arc<Assistant>) -> Self {
        Self {
            registry: assistant.dispatcher().registry().clone(),
            assistant,
        }
    }
}
