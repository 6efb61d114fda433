//! Daemon management for auto-starting the navstack daemon
//!
//! Provides functionality to:
//! - Check if daemon is running
//! - Start daemon if not running
//! - Wait for daemon to be ready

use std::fs::OpenOptions;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::ipc::IpcClient;

// =============================================================================
// Constants
// =============================================================================

/// Maximum time to wait for daemon to start (in milliseconds)
const DAEMON_STARTUP_TIMEOUT_MS: u64 = 10000;

/// Polling interval when waiting for daemon to start (in milliseconds)
const DAEMON_POLL_INTERVAL_MS: u64 = 100;

/// Subcommand that runs the daemon in the foreground
const DAEMON_SUBCOMMAND: &str = "daemon";

// =============================================================================
// Daemon Manager
// =============================================================================

/// Ensures the daemon is running, starting it if necessary
pub fn ensure_daemon_running(config: &Config) -> Result<()> {
    if is_daemon_running(config) {
        return Ok(());
    }

    log::debug!(
        "No daemon on {}, starting one",
        config.ipc_socket_path.display()
    );
    start_daemon(config)?;
    wait_for_daemon_ready(config)?;

    Ok(())
}

/// Check if daemon is running by attempting a ping
fn is_daemon_running(config: &Config) -> bool {
    if !config.ipc_socket_path.exists() {
        return false;
    }

    let client = IpcClient::new(config.clone());
    client.ping().unwrap_or(false)
}

/// Start the daemon process from our own executable
fn start_daemon(config: &Config) -> Result<()> {
    let executable = find_daemon_executable()?;

    let args = vec![
        DAEMON_SUBCOMMAND.to_string(),
        "--socket".to_string(),
        config.ipc_socket_path.to_string_lossy().to_string(),
    ];

    let stderr = match &config.log_file {
        Some(path) => Stdio::from(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?,
        ),
        None => Stdio::null(),
    };

    // SAFETY: setsid is async-signal-safe and only detaches the child from
    // the terminal
    unsafe {
        Command::new(&executable)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(stderr)
            .pre_exec(|| {
                libc::setsid();
                Ok(())
            })
            .spawn()
            .map_err(|e| CliError::DaemonNotRunning(format!("failed to start daemon: {}", e)))?;
    }

    Ok(())
}

/// Wait for daemon to become ready (respond to ping)
fn wait_for_daemon_ready(config: &Config) -> Result<()> {
    let timeout = Duration::from_millis(DAEMON_STARTUP_TIMEOUT_MS);
    let poll_interval = Duration::from_millis(DAEMON_POLL_INTERVAL_MS);
    let start = Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(CliError::DaemonNotRunning(
                "daemon failed to start within timeout".to_string(),
            ));
        }

        if is_daemon_running(config) {
            return Ok(());
        }

        thread::sleep(poll_interval);
    }
}

/// The daemon is this same binary run with the `daemon` subcommand
fn find_daemon_executable() -> Result<PathBuf> {
    std::env::current_exe().map_err(|e| {
        CliError::DaemonNotRunning(format!("cannot locate navstack executable: {}", e))
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_daemon_running_returns_false_when_socket_missing() {
        let config =
            Config::default().with_socket_path("/tmp/navstack-nonexistent-socket-12345.sock");
        assert!(!is_daemon_running(&config));
    }

    #[test]
    fn is_daemon_running_returns_false_for_stale_socket() {
        let path = std::env::temp_dir().join(format!(
            "navstack-daemon-stale-{}.sock",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        drop(std::os::unix::net::UnixListener::bind(&path).expect("bind"));

        let config = Config::default().with_socket_path(path.clone());
        assert!(!is_daemon_running(&config));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn find_daemon_executable_points_at_current_binary() {
        let path = find_daemon_executable().expect("current exe");
        assert!(path.exists());
    }
}
