// ABOUTME: Configuration loading for the hiremenator HTTP server.
// ABOUTME: Reads the bind address from HIREMENATOR_BIND.

use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_BIND: &str = "127.0.0.1:7340";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HIREMENATOR_BIND is not a valid socket address: {0}")]
    InvalidBind(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - HIREMENATOR_BIND: socket address to bind (default: 127.0.0.1:7340)
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_str = std::env::var("HIREMENATOR_BIND")
            .ok()
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str))?;

        Ok(Self { bind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn config_loads_default_bind() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let saved = std::env::var("HIREMENATOR_BIND").ok();
        // SAFETY: test-only code, env access serialized by ENV_MUTEX
        unsafe { std::env::remove_var("HIREMENATOR_BIND") };

        let config = ServerConfig::from_env();

        if let Some(v) = saved {
            unsafe { std::env::set_var("HIREMENATOR_BIND", v) };
        }
        assert_eq!(
            config.unwrap().bind,
            "127.0.0.1:7340".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn config_rejects_bad_bind() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let saved = std::env::var("HIREMENATOR_BIND").ok();
        // SAFETY: test-only code, env access serialized by ENV_MUTEX
        unsafe { std::env::set_var("HIREMENATOR_BIND", "not-an-address") };

        let result = ServerConfig::from_env();

        match saved {
            Some(v) => unsafe { std::env::set_var("HIREMENATOR_BIND", v) },
            None => unsafe { std::env::remove_var("HIREMENATOR_BIND") },
        }
        let err = result.unwrap_err();
        assert!(err.to_string().contains("HIREMENATOR_BIND"), "{}", err);
    }
}
