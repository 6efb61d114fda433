//! Session resolution
//!
//! Handles resolving which session to use for commands based on:
//! - Explicit --session flag
//! - NAVSTACK_SESSION environment variable
//! - Default session name

use crate::config::{Config, ENV_SESSION_NAME};
use crate::error::{CliError, Result};
use crate::types::SessionId;

/// Longest accepted session name
pub const MAX_SESSION_NAME_LENGTH: usize = 64;

// =============================================================================
// Session Resolver
// =============================================================================

/// Resolves the session ID to use for a command
pub struct SessionResolver {
    config: Config,
}

impl SessionResolver {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Resolve the session ID to use
    ///
    /// Priority order:
    /// 1. Explicit session name (from --session flag)
    /// 2. NAVSTACK_SESSION environment variable
    /// 3. Default session name from config
    pub fn resolve(&self, explicit_session: Option<&str>) -> SessionId {
        if let Some(session) = explicit_session {
            return session.to_string();
        }

        if let Some(session) = self.session_from_env() {
            return session;
        }

        self.config.default_session.clone()
    }

    /// Get session from environment variable only
    pub fn session_from_env(&self) -> Option<SessionId> {
        std::env::var(ENV_SESSION_NAME).ok()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Resolve and validate the session ID against `config`
pub fn resolve_session(config: &Config, explicit_session: Option<&str>) -> Result<SessionId> {
    let session = SessionResolver::new(config.clone()).resolve(explicit_session);
    if !validate_session_name(&session) {
        return Err(CliError::InvalidSession(format!(
            "'{}' must be 1-{} characters of letters, digits, '-' or '_'",
            session, MAX_SESSION_NAME_LENGTH
        )));
    }
    Ok(session)
}

/// Validate a session name
pub fn validate_session_name(name: &str) -> bool {
    let length = name.chars().count();
    if length == 0 || length > MAX_SESSION_NAME_LENGTH {
        return false;
    }

    name.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{remove_env, set_env, DEFAULT_SESSION_NAME, ENV_LOCK};

    fn env_guard() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn validate_session_name_accepts_alphanumeric() {
        assert!(validate_session_name("session123"));
        assert!(validate_session_name("Session"));
        assert!(validate_session_name("123"));
    }

    #[test]
    fn validate_session_name_accepts_dashes_and_underscores() {
        assert!(validate_session_name("my-session"));
        assert!(validate_session_name("my_session"));
        assert!(validate_session_name("my-session_1"));
    }

    #[test]
    fn validate_session_name_rejects_empty() {
        assert!(!validate_session_name(""));
    }

    #[test]
    fn validate_session_name_rejects_special_chars() {
        assert!(!validate_session_name("my session"));
        assert!(!validate_session_name("my@session"));
        assert!(!validate_session_name("my.session"));
        assert!(!validate_session_name("my/session"));
    }

    #[test]
    fn validate_session_name_enforces_max_length() {
        assert!(validate_session_name(&"a".repeat(MAX_SESSION_NAME_LENGTH)));
        assert!(!validate_session_name(&"a".repeat(MAX_SESSION_NAME_LENGTH + 1)));
    }

    #[test]
    fn validate_session_name_counts_characters_not_bytes() {
        assert!(validate_session_name(&"é".repeat(40)));
        assert!(validate_session_name(&"é".repeat(MAX_SESSION_NAME_LENGTH)));
        assert!(!validate_session_name(&"é".repeat(MAX_SESSION_NAME_LENGTH + 1)));
    }

    #[test]
    fn session_resolver_resolve_uses_explicit_session() {
        let _guard = env_guard();
        set_env(ENV_SESSION_NAME, "env-session");
        let resolver = SessionResolver::new(Config::default());

        assert_eq!(resolver.resolve(Some("explicit-session")), "explicit-session");

        remove_env(ENV_SESSION_NAME);
    }

    #[test]
    fn session_resolver_resolve_uses_env_when_no_explicit() {
        let _guard = env_guard();
        set_env(ENV_SESSION_NAME, "env-session");
        let resolver = SessionResolver::new(Config::default());

        assert_eq!(resolver.resolve(None), "env-session");

        remove_env(ENV_SESSION_NAME);
    }

    #[test]
    fn session_resolver_resolve_uses_config_default_when_no_explicit_or_env() {
        let _guard = env_guard();
        remove_env(ENV_SESSION_NAME);
        let config = Config {
            default_session: "config-session".to_string(),
            ..Default::default()
        };
        let resolver = SessionResolver::new(config);

        assert_eq!(resolver.resolve(None), "config-session");
    }

    #[test]
    fn resolve_session_uses_default_config() {
        let _guard = env_guard();
        remove_env(ENV_SESSION_NAME);

        let session = resolve_session(&Config::default(), None).unwrap();
        assert_eq!(session, DEFAULT_SESSION_NAME);
    }

    #[test]
    fn resolve_session_rejects_invalid_names() {
        let result = resolve_session(&Config::default(), Some("bad name"));
        assert!(matches!(result, Err(CliError::InvalidSession(_))));
    }
}
