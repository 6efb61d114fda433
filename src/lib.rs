//! navstack library
//!
//! Browser-style navigation history kept per session by a small daemon,
//! driven from the command line over a Unix socket.

pub mod cli;
pub mod commands;
pub mod config;
pub mod daemon;
pub mod error;
pub mod history;
pub mod ipc;
pub mod output;
pub mod server;
pub mod session;
pub mod store;
pub mod types;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::{CliError, Result};
pub use history::{NavigationHistory, Snapshot};
pub use ipc::IpcClient;
pub use output::OutputFormatter;
pub use session::SessionResolver;
pub use store::SessionStore;

use commands::Execute;

// =============================================================================
// Main Entry Point
// =============================================================================

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = config::load_config();
    config::init_logging(&config);

    let command = match cli.command {
        Commands::Version => {
            println!("navstack {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Commands::Daemon(args) => {
            let config = match args.socket {
                Some(socket) => config.with_socket_path(socket),
                None => config,
            };
            return server::run_daemon(&config);
        }
        Commands::Ping => {
            let client = IpcClient::new(config);
            return if client.ping()? {
                println!("Daemon is running");
                Ok(())
            } else {
                Err(CliError::DaemonNotRunning(
                    "Daemon is not responding".to_string(),
                ))
            };
        }
        command => command,
    };

    let session_id = session::resolve_session(&config, cli.session.as_deref())?;
    log::debug!("Using session {}", session_id);

    daemon::ensure_daemon_running(&config)?;
    let ctx = commands::CommandContext::new(IpcClient::new(config), session_id);

    let response = match command {
        Commands::Visit(args) => commands::VisitCommand::new(args.destination).execute(&ctx)?,
        Commands::Back => commands::BackCommand::default().execute(&ctx)?,
        Commands::Forward => commands::ForwardCommand::default().execute(&ctx)?,
        Commands::Clear => commands::ClearCommand::default().execute(&ctx)?,
        Commands::Snapshot => commands::SnapshotCommand::default().execute(&ctx)?,
        Commands::End => commands::EndCommand::default().execute(&ctx)?,
        Commands::Version | Commands::Daemon(_) | Commands::Ping => unreachable!(),
    };

    let output_format = match cli.output {
        cli::OutputFormat::Human => output::OutputFormat::Human,
        cli::OutputFormat::Json => output::OutputFormat::Json,
        cli::OutputFormat::Quiet => output::OutputFormat::Quiet,
    };
    let formatter = OutputFormatter::new(output_format);
    formatter.print_response(&response)?;

    if response.success {
        Ok(())
    } else {
        Err(CliError::CommandFailed(
            response
                .error
                .unwrap_or_else(|| "Unknown error".to_string()),
        ))
    }
}

/// Execute the CLI and handle errors
pub fn execute() -> i32 {
    let cli = cli::parse();

    match run(cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}
