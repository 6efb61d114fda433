//! CLI argument parsing using clap
//!
//! Defines all commands and their arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// navstack - browser-style back/forward history per session
#[derive(Debug, Parser)]
#[command(name = "navstack")]
#[command(
    author,
    version,
    about = "navstack - browser-style back/forward history per session",
    long_about = None,
    after_help = "QUICK START:\n  navstack visit example.com\n  navstack visit example.com/docs\n  navstack back\n  navstack forward\n  navstack clear\n\nOUTPUT FORMATS:\n  - human (default)  Current location and both history lists\n  - json             Pretty-printed JSON output for scripting\n  - quiet            No output except for errors\n\nENVIRONMENT VARIABLES:\n  NAVSTACK_SESSION      Default session name to use\n  NAVSTACK_SOCKET_PATH  Daemon socket (default /tmp/navstack-daemon.sock)\n  NAVSTACK_LOG          Log filter, e.g. debug or navstack=trace\n  NAVSTACK_LOG_FILE     Where an auto-started daemon writes its log\n\nSESSION MANAGEMENT:\n  Each session has its own independent history.\n    navstack -s work visit intranet\n    navstack -s personal visit news\n    navstack -s personal end"
)]
pub struct Cli {
    /// Session name to use (overrides NAVSTACK_SESSION env var)
    #[arg(short, long, global = true)]
    pub session: Option<String>,

    /// Output format: human (plain text), json (pretty JSON), quiet (errors only)
    #[arg(short, long, global = true, value_enum, default_value = "human")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Visit a location, discarding forward history
    #[command(
        long_about = "Visit a location.\n\nThe current location moves onto the back history and the forward history is discarded.\n\nEXAMPLES:\n  navstack visit https://example.com\n  navstack visit Settings"
    )]
    Visit(VisitArgs),

    /// Go back in history
    Back,

    /// Go forward in history
    Forward,

    /// Clear both histories and return to Home
    Clear,

    /// Show the current location and history lists
    Snapshot,

    /// End the session and discard its history
    End,

    /// Check if daemon is running
    Ping,

    /// Show version information
    Version,

    /// Run the daemon in the foreground
    Daemon(DaemonArgs),
}

#[derive(Debug, Args)]
pub struct VisitArgs {
    /// Location to visit
    pub destination: String,
}

#[derive(Debug, Args)]
pub struct DaemonArgs {
    /// Socket to listen on (overrides NAVSTACK_SOCKET_PATH)
    #[arg(long)]
    pub socket: Option<PathBuf>,
}

// =============================================================================
// Parse Function
// =============================================================================

pub fn parse() -> Cli {
    Cli::parse()
}

/// Parse command line arguments from iterator (for testing)
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}
