// ABOUTME: Module root for registry exporters (YAML, DOT).
// ABOUTME: Re-exports the export functions for convenient access.

pub mod dot;
pub mod yaml;

pub use dot::export_dot;
pub use yaml::export_yaml;
