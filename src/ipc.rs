//! IPC Client for CLI <-> Daemon communication
//!
//! Implements the client side of the newline-delimited JSON protocol
//! over Unix sockets.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::types::{Command, CommandResponse, IpcMessage, IpcMessageType};

// =============================================================================
// Constants
// =============================================================================

/// Message delimiter for framing (newline-delimited JSON)
pub const MESSAGE_DELIMITER: u8 = b'\n';

/// IPC client for communicating with the navstack daemon
pub struct IpcClient {
    config: Config,
}

impl IpcClient {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn ping(&self) -> Result<bool> {
        let timeout = Duration::from_millis(self.config.connection_timeout_ms);
        let socket_path = self.config.ipc_socket_path.as_path();
        let mut stream = connect_to_daemon(socket_path, timeout)?;

        let message = IpcMessage {
            message_type: IpcMessageType::Ping,
            payload: None,
        };

        let bytes = serialize_message(&message)?;
        send_bytes(&mut stream, &bytes)?;

        let response_bytes = read_message(&mut stream).map_err(|err| match err {
            CliError::CommandTimeout => CliError::ConnectionTimeout,
            other => other,
        })?;
        let response = deserialize_message(&response_bytes)?;

        Ok(matches!(response.message_type, IpcMessageType::Pong))
    }

    /// Send a command to the daemon and wait for response
    pub fn send_command(&self, command: Command) -> Result<CommandResponse> {
        let connect_timeout = Duration::from_millis(self.config.connection_timeout_ms);
        let command_timeout = Duration::from_millis(self.config.command_timeout_ms);
        let socket_path = self.config.ipc_socket_path.as_path();
        let mut stream = connect_to_daemon(socket_path, connect_timeout)?;

        stream.set_read_timeout(Some(command_timeout))?;
        stream.set_write_timeout(Some(command_timeout))?;

        log::debug!(
            "Sending {:?} command {} for session {}",
            command.command_type,
            command.id,
            command.session_id
        );

        let payload = serde_json::to_value(command)?;
        let message = IpcMessage {
            message_type: IpcMessageType::Command,
            payload: Some(payload),
        };

        let bytes = serialize_message(&message)?;
        send_bytes(&mut stream, &bytes)?;

        let response_bytes = read_message(&mut stream)?;
        let response = deserialize_message(&response_bytes)?;

        if !matches!(response.message_type, IpcMessageType::Response) {
            return Err(CliError::ProtocolError(
                "unexpected response type".to_string(),
            ));
        }

        let payload = response
            .payload
            .ok_or_else(|| CliError::ProtocolError("missing response payload".to_string()))?;

        let command_response: CommandResponse = serde_json::from_value(payload)?;
        Ok(command_response)
    }
}

fn connect_to_daemon(socket_path: &Path, timeout: Duration) -> Result<UnixStream> {
    if !socket_path.exists() {
        return Err(CliError::DaemonNotRunning(format!(
            "socket not found at {}",
            socket_path.display()
        )));
    }

    let stream = UnixStream::connect(socket_path)
        .map_err(|err| CliError::ConnectionFailed(err.to_string()))?;

    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;

    Ok(stream)
}

pub fn serialize_message(message: &IpcMessage) -> Result<Vec<u8>> {
    let mut json = serde_json::to_vec(message)?;
    json.push(MESSAGE_DELIMITER);
    Ok(json)
}

pub fn deserialize_message(data: &[u8]) -> Result<IpcMessage> {
    let message: IpcMessage = serde_json::from_slice(data)?;
    Ok(message)
}

// =============================================================================
fn send_bytes<W: Write>(stream: &mut W, data: &[u8]) -> Result<()> {
    stream.write_all(data)?;
    stream.flush()?;
    Ok(())
}

fn read_message<R: Read>(stream: &mut R) -> Result<Vec<u8>> {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    let bytes = reader
        .read_until(MESSAGE_DELIMITER, &mut buf)
        .map_err(|err| match err.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => CliError::CommandTimeout,
            _ => CliError::IoError(err),
        })?;

    if bytes == 0 {
        return Err(CliError::ProtocolError("empty response".to_string()));
    }

    if buf.last().copied() != Some(MESSAGE_DELIMITER) {
        return Err(CliError::ProtocolError(
            "missing message delimiter".to_string(),
        ));
    }

    buf.pop();
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialize_message_appends_newline_delimiter() {
        let message = IpcMessage {
            message_type: IpcMessageType::Command,
            payload: Some(json!({"id": "cmd-1"})),
        };

        let bytes = serialize_message(&message).expect("serialize message");

        assert_eq!(bytes.last().copied(), Some(MESSAGE_DELIMITER));

        let mut trimmed = bytes.clone();
        trimmed.pop();
        let parsed: serde_json::Value = serde_json::from_slice(&trimmed).expect("parse json");
        assert_eq!(
            parsed,
            json!({"type": "command", "payload": {"id": "cmd-1"}})
        );
    }

    #[test]
    fn deserialize_message_reads_pong() {
        let raw = br#"{"type":"pong","payload":null}"#;
        let message = deserialize_message(raw).expect("deserialize message");

        assert_eq!(message.message_type, IpcMessageType::Pong);
        assert!(message.payload.is_none());
    }

    #[test]
    fn read_message_rejects_missing_delimiter() {
        let mut raw: &[u8] = br#"{"type":"pong","payload":null}"#;
        let result = read_message(&mut raw);
        assert!(matches!(result, Err(CliError::ProtocolError(_))));
    }

    #[test]
    fn read_message_rejects_empty_stream() {
        let mut raw: &[u8] = b"";
        let result = read_message(&mut raw);
        assert!(matches!(result, Err(CliError::ProtocolError(_))));
    }
}
