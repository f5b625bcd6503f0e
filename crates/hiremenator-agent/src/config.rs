// ABOUTME: Dispatch configuration: model override, timeouts, retries, fan-out and validation switch.
// ABOUTME: Read from HIREMENATOR_* environment variables with defaults for every setting.

use std::time::Duration;

use hiremenator_core::agent::DEFAULT_MODEL;

/// Errors that can occur while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("{0} is not set")]
    Missing(&'static str),
}

/// Limits and switches applied by the dispatcher to every agent run.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchConfig {
    /// Model id used for every agent in the built-in catalog.
    pub model: String,
    /// Upper bound on a single backend call.
    pub call_timeout: Duration,
    /// Extra attempts after a retryable backend failure.
    pub retries: u32,
    /// Fixed pause between attempts.
    pub retry_backoff: Duration,
    /// Maximum number of children run at once for one parent.
    pub max_fanout: usize,
    /// Maximum backend steps per agent run.
    pub max_turns: usize,
    /// Validate answers against their output schema.
    pub validate_outputs: bool,
    /// Sessions untouched for longer than this are dropped.
    pub session_idle_ttl: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            call_timeout: Duration::from_secs(60),
            retries: 1,
            retry_backoff: Duration::from_millis(500),
            max_fanout: 4,
            max_turns: 8,
            validate_outputs: false,
            session_idle_ttl: Duration::from_secs(3600),
        }
    }
}

impl DispatchConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - HIREMENATOR_MODEL: model id (default: gemini-2.0-flash-001)
    /// - HIREMENATOR_CALL_TIMEOUT_MS: per-call timeout (default: 60000)
    /// - HIREMENATOR_RETRIES: retries after a transient failure (default: 1)
    /// - HIREMENATOR_RETRY_BACKOFF_MS: pause between attempts (default: 500)
    /// - HIREMENATOR_MAX_FANOUT: concurrent children per parent (default: 4)
    /// - HIREMENATOR_MAX_TURNS: backend steps per agent run (default: 8)
    /// - HIREMENATOR_VALIDATE_OUTPUTS: enforce output schemas (default: false)
    /// - HIREMENATOR_SESSION_IDLE_SECS: idle time before a session is dropped (default: 3600)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let model = std::env::var("HIREMENATOR_MODEL")
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or(defaults.model);

        let call_timeout = match read_number("HIREMENATOR_CALL_TIMEOUT_MS")? {
            Some(0) => return Err(invalid("HIREMENATOR_CALL_TIMEOUT_MS", "0", "must be positive")),
            Some(ms) => Duration::from_millis(ms),
            None => defaults.call_timeout,
        };

        let retries = match read_number("HIREMENATOR_RETRIES")? {
            Some(n) => u32::try_from(n)
                .map_err(|_| invalid("HIREMENATOR_RETRIES", &n.to_string(), "too large"))?,
            None => defaults.retries,
        };

        let retry_backoff = read_number("HIREMENATOR_RETRY_BACKOFF_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_backoff);

        let max_fanout = read_positive("HIREMENATOR_MAX_FANOUT")?.unwrap_or(defaults.max_fanout);
        let max_turns = read_positive("HIREMENATOR_MAX_TURNS")?.unwrap_or(defaults.max_turns);

        let validate_outputs = std::env::var("HIREMENATOR_VALIDATE_OUTPUTS")
            .map(|v| v == "true" || v == "1" || v == "yes")
            .unwrap_or(defaults.validate_outputs);

        let session_idle_ttl = read_positive("HIREMENATOR_SESSION_IDLE_SECS")?
            .map(|secs| Duration::from_secs(secs as u64))
            .unwrap_or(defaults.session_idle_ttl);

        Ok(Self {
            model,
            call_timeout,
            retries,
            retry_backoff,
            max_fanout,
            max_turns,
            validate_outputs,
            session_idle_ttl,
        })
    }
}

fn invalid(var: &'static str, value: &str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason,
    }
}

fn read_number(var: &'static str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| invalid(var, &raw, "expected a non-negative integer")),
        _ => Ok(None),
    }
}

fn read_positive(var: &'static str) -> Result<Option<usize>, ConfigError> {
    match read_number(var)? {
        Some(0) => Err(invalid(var, "0", "must be positive")),
        Some(n) => usize::try_from(n)
            .map(Some)
            .map_err(|_| invalid(var, &n.to_string(), "too large")),
        None => Ok(None),
    }
}
