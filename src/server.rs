//! Navigation daemon
//!
//! Listens on the IPC socket, keeps one navigation history per session and
//! answers every command with the session's snapshot.

use std::future::Future;
use std::os::unix::net::UnixStream as StdUnixStream;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::signal::unix::{SignalKind, signal};

use crate::config::Config;
use crate::error::Result;
use crate::history::Snapshot;
use crate::ipc::{MESSAGE_DELIMITER, deserialize_message, serialize_message};
use crate::session::validate_session_name;
use crate::store::SessionStore;
use crate::types::{
    Command, CommandResponse, CommandType, EndData, IpcMessage, IpcMessageType, VisitPayload,
};

/// Longest accepted message, delimiter excluded
pub const MAX_FRAME_BYTES: usize = 64 * 1024;

/// Pause after a failed accept so fd exhaustion does not spin the loop
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

// =============================================================================
// Entry Points
// =============================================================================

/// Run the daemon in the foreground until interrupted
pub fn run_daemon(config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(config))?;
    Ok(())
}

pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let socket_path = config.ipc_socket_path.as_path();
    let listener = bind_socket(socket_path)?;
    log::info!("Listening on {}", socket_path.display());

    let store = Arc::new(SessionStore::new());
    run_listener(listener, store, shutdown_signal()).await;

    if let Err(err) = std::fs::remove_file(socket_path) {
        log::warn!("Could not remove {}: {}", socket_path.display(), err);
    }
    log::info!("Goodbye!");
    Ok(())
}

/// Bind the socket, replacing a stale socket file left by a dead daemon
pub fn bind_socket(socket_path: &Path) -> anyhow::Result<UnixListener> {
    if socket_path.exists() {
        if StdUnixStream::connect(socket_path).is_ok() {
            bail!(
                "another daemon is already listening on {}",
                socket_path.display()
            );
        }
        log::debug!("Removing stale socket {}", socket_path.display());
        std::fs::remove_file(socket_path)
            .with_context(|| format!("removing stale socket {}", socket_path.display()))?;
    }

    UnixListener::bind(socket_path)
        .with_context(|| format!("binding {}", socket_path.display()))
}

/// Accept connections until `shutdown` resolves
pub async fn run_listener<F>(listener: UnixListener, store: Arc<SessionStore>, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                log::info!("Shutting down with {} live session(s)", store.len());
                break;
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, _addr)) => {
                    let store = Arc::clone(&store);
                    tokio::spawn(async move {
                        if let Err(err) = handle_connection(stream, store).await {
                            log::warn!("Connection closed with error: {:#}", err);
                        }
                    });
                }
                Err(err) => {
                    log::error!("Accept failed: {}", err);
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                }
            }
        }
    }
}

async fn shutdown_signal() {
    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(err) => {
            log::warn!("SIGTERM handler unavailable: {}", err);
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

async fn handle_connection(stream: UnixStream, store: Arc<SessionStore>) -> anyhow::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut frame = Vec::new();

    loop {
        frame.clear();
        let read = (&mut reader)
            .take(MAX_FRAME_BYTES as u64 + 1)
            .read_until(MESSAGE_DELIMITER, &mut frame)
            .await?;
        if read == 0 {
            break;
        }

        let terminated = frame.last() == Some(&MESSAGE_DELIMITER);
        if terminated {
            frame.pop();
        } else if frame.len() > MAX_FRAME_BYTES {
            // The rest of the oversized line cannot be resynchronised, so drop the client
            log::warn!("Message exceeds {} bytes, closing connection", MAX_FRAME_BYTES);
            let reply = response_message(CommandResponse::failed(
                String::new(),
                format!("message exceeds {} bytes", MAX_FRAME_BYTES),
            ));
            writer.write_all(&serialize_message(&reply)?).await?;
            writer.flush().await?;
            break;
        }

        if frame.trim_ascii().is_empty() {
            continue;
        }

        let reply = match deserialize_message(&frame) {
            Ok(message) => handle_message(&store, message),
            Err(err) => {
                log::warn!("Malformed message: {}", err);
                response_message(CommandResponse::failed(
                    String::new(),
                    format!("malformed message: {}", err),
                ))
            }
        };

        let bytes = serialize_message(&reply)?;
        writer.write_all(&bytes).await?;
        writer.flush().await?;
    }

    Ok(())
}

// =============================================================================
// Dispatch
// =============================================================================

/// Answer a single IPC message
pub fn handle_message(store: &SessionStore, message: IpcMessage) -> IpcMessage {
    match message.message_type {
        IpcMessageType::Ping => IpcMessage {
            message_type: IpcMessageType::Pong,
            payload: None,
        },
        IpcMessageType::Command => {
            let payload = message.payload.unwrap_or_default();
            let id = payload
                .get("id")
                .and_then(|id| id.as_str())
                .unwrap_or_default()
                .to_string();

            let response = match serde_json::from_value::<Command>(payload) {
                Ok(command) => dispatch(store, command),
                Err(err) => {
                    log::warn!("Rejected command {}: {}", id, err);
                    CommandResponse::failed(id, format!("invalid command: {}", err))
                }
            };
            response_message(response)
        }
        other => response_message(CommandResponse::failed(
            String::new(),
            format!("unsupported message type: {:?}", other),
        )),
    }
}

/// Apply one command to its session and report the outcome
pub fn dispatch(store: &SessionStore, command: Command) -> CommandResponse {
    let Command {
        id,
        session_id,
        command_type,
        params,
        timestamp,
    } = command;
    log::debug!(
        "{:?} for session {} (id {}, sent {})",
        command_type,
        session_id,
        id,
        timestamp
    );

    if !validate_session_name(&session_id) {
        log::warn!("Rejected command {}: invalid session '{}'", id, session_id);
        return CommandResponse::failed(id, format!("invalid session: '{}'", session_id));
    }

    match command_type {
        CommandType::Visit => match parse_destination(params) {
            Ok(destination) => {
                let snapshot = store.with_session(&session_id, |history| {
                    history.visit(destination);
                    history.snapshot()
                });
                snapshot_response(id, snapshot)
            }
            Err(reason) => {
                log::warn!("Rejected visit {}: {}", id, reason);
                CommandResponse::failed(id, reason)
            }
        },
        CommandType::Back => {
            let snapshot = store.with_session(&session_id, |history| {
                if !history.back() {
                    log::debug!("Nothing to go back to in session {}", session_id);
                }
                history.snapshot()
            });
            snapshot_response(id, snapshot)
        }
        CommandType::Forward => {
            let snapshot = store.with_session(&session_id, |history| {
                if !history.forward() {
                    log::debug!("Nothing to go forward to in session {}", session_id);
                }
                history.snapshot()
            });
            snapshot_response(id, snapshot)
        }
        CommandType::Clear => {
            let snapshot = store.with_session(&session_id, |history| {
                history.clear();
                history.snapshot()
            });
            snapshot_response(id, snapshot)
        }
        CommandType::Snapshot => {
            let snapshot = store.with_session(&session_id, |history| history.snapshot());
            snapshot_response(id, snapshot)
        }
        CommandType::End => {
            let data = EndData {
                ended: store.end(&session_id),
            };
            data_response(id, &data)
        }
    }
}

fn parse_destination(params: Option<serde_json::Value>) -> std::result::Result<String, String> {
    let params = params.ok_or_else(|| "visit requires a destination".to_string())?;
    let payload: VisitPayload =
        serde_json::from_value(params).map_err(|err| format!("invalid visit params: {}", err))?;

    if payload.destination.trim().is_empty() {
        return Err("destination cannot be empty".to_string());
    }
    Ok(payload.destination)
}

fn snapshot_response(id: String, snapshot: Snapshot) -> CommandResponse {
    data_response(id, &snapshot)
}

fn data_response<T: serde::Serialize>(id: String, data: &T) -> CommandResponse {
    match serde_json::to_value(data) {
        Ok(value) => CommandResponse::ok(id, value),
        Err(err) => CommandResponse::failed(id, format!("serialization error: {}", err)),
    }
}

fn response_message(response: CommandResponse) -> IpcMessage {
    IpcMessage {
        message_type: IpcMessageType::Response,
        payload: serde_json::to_value(response).ok(),
    }
}

// =============================================================================
// Tests
// =============================================================================
