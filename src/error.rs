//! Error types for the navstack CLI and daemon

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Daemon is not running or unreachable
    #[error("daemon not running: {0}")]
    DaemonNotRunning(String),

    /// Connection to daemon failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Connection timed out
    #[error("connection timed out")]
    ConnectionTimeout,

    /// Command execution failed
    #[error("command failed: {0}")]
    CommandFailed(String),

    /// Command timed out
    #[error("command timed out")]
    CommandTimeout,

    /// Invalid command arguments
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Invalid session name
    #[error("invalid session: {0}")]
    InvalidSession(String),

    /// Protocol error (malformed message)
    #[error("protocol error: {0}")]
    ProtocolError(String),

    /// Daemon failed while starting or serving
    #[error("daemon error: {0:#}")]
    Daemon(#[from] anyhow::Error),

    /// IO error
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::DaemonNotRunning(_) => 2,
            CliError::ConnectionFailed(_) | CliError::ConnectionTimeout => 3,
            CliError::CommandFailed(_) | CliError::CommandTimeout => 1,
            CliError::InvalidArguments(_) => 64,   // EX_USAGE
            CliError::InvalidSession(_) => 65,     // EX_DATAERR
            CliError::ProtocolError(_) => 76,      // EX_PROTOCOL
            CliError::Daemon(_) => 70,             // EX_SOFTWARE
            CliError::IoError(_) => 74,            // EX_IOERR
            CliError::SerializationError(_) => 65, // EX_DATAERR
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
