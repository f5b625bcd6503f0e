// ABOUTME: HTTP server for hiremenator, exposing the agent catalog and conversational sessions.
// ABOUTME: Uses Axum with shared state holding the registry and the assistant facade.

pub mod api;
pub mod app_state;
pub mod config;
pub mod routes;

pub use app_state::{AppState, SharedState};
pub use config::{ConfigError, ServerConfig};
pub use routes::create_router;
