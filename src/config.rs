//! Configuration for navstack
//!
//! Handles configuration loading from environment variables and defaults.

use std::path::PathBuf;

// =============================================================================
// Constants
// =============================================================================

/// Default Unix socket path for IPC communication
pub const DEFAULT_IPC_SOCKET_PATH: &str = "/tmp/navstack-daemon.sock";

/// Environment variable for custom socket path
pub const ENV_IPC_SOCKET_PATH: &str = "NAVSTACK_SOCKET_PATH";

/// Environment variable for session name
pub const ENV_SESSION_NAME: &str = "NAVSTACK_SESSION";

/// Environment variable for the log filter
pub const ENV_LOG_FILTER: &str = "NAVSTACK_LOG";

/// Environment variable for the spawned daemon's log file
pub const ENV_LOG_FILE: &str = "NAVSTACK_LOG_FILE";

/// Default session name
pub const DEFAULT_SESSION_NAME: &str = "default";

/// Default log filter
pub const DEFAULT_LOG_FILTER: &str = "info";

// =============================================================================
// Config Struct
// =============================================================================

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the IPC socket for daemon communication
    pub ipc_socket_path: PathBuf,

    /// Default session name to use
    pub default_session: String,

    /// Connection timeout in milliseconds
    pub connection_timeout_ms: u64,

    /// Command timeout in milliseconds
    pub command_timeout_ms: u64,

    /// env_logger filter directives
    pub log_filter: String,

    /// Where a spawned daemon writes its log; discarded when unset
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ipc_socket_path: PathBuf::from(DEFAULT_IPC_SOCKET_PATH),
            default_session: DEFAULT_SESSION_NAME.to_string(),
            connection_timeout_ms: 5000,
            command_timeout_ms: 30000,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(socket_path) = std::env::var(ENV_IPC_SOCKET_PATH) {
            config.ipc_socket_path = PathBuf::from(socket_path);
        }

        if let Ok(session_name) = std::env::var(ENV_SESSION_NAME) {
            config.default_session = session_name;
        }

        if let Ok(filter) = std::env::var(ENV_LOG_FILTER) {
            config.log_filter = filter;
        }

        if let Ok(log_file) = std::env::var(ENV_LOG_FILE) {
            config.log_file = Some(PathBuf::from(log_file));
        }

        config
    }

    /// Same config with a different socket path
    pub fn with_socket_path(mut self, socket_path: impl Into<PathBuf>) -> Self {
        self.ipc_socket_path = socket_path.into();
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Load the global configuration
pub fn load_config() -> Config {
    Config::from_env()
}

/// Initialise env_logger once; later calls are ignored
pub fn init_logging(config: &Config) {
    let _ = env_logger::Builder::new()
        .parse_filters(&config.log_filter)
        .format_timestamp_millis()
        .try_init();
}

/// Serializes tests that mutate process environment
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn set_env(key: &str, value: &str) {
    // SAFETY: callers hold ENV_LOCK
    unsafe { std::env::set_var(key, value) };
}

#[cfg(test)]
pub(crate) fn remove_env(key: &str) {
    // SAFETY: callers hold ENV_LOCK
    unsafe { std::env::remove_var(key) };
}

// =============================================================================
// Tests
// =============================================================================
