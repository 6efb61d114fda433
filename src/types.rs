//! Type definitions for CLI <-> Daemon IPC communication
//!
//! Both sides speak newline-delimited JSON over a Unix socket.

use serde::{Deserialize, Serialize};

// =============================================================================
// Session Types
// =============================================================================

/// Unique session identifier
pub type SessionId = String;

// =============================================================================
// Command Types
// =============================================================================

/// Unique identifier for a command request
pub type CommandId = String;

/// All supported command types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    Visit,
    Back,
    Forward,
    Clear,
    Snapshot,
    /// Discard the session's history
    End,
}

/// Command sent from CLI to daemon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub id: CommandId,
    pub session_id: SessionId,
    #[serde(rename = "type")]
    pub command_type: CommandType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    pub timestamp: String, // ISO 8601 format
}

/// Response from daemon back to CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub id: CommandId,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandResponse {
    pub fn ok(id: CommandId, data: serde_json::Value) -> Self {
        Self {
            id,
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(id: CommandId, error: impl Into<String>) -> Self {
        Self {
            id,
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

// =============================================================================
// IPC Message Types
// =============================================================================

/// Message types for IPC communication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpcMessageType {
    Command,
    Response,
    Ping,
    Pong,
}

/// IPC message envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    #[serde(rename = "type")]
    pub message_type: IpcMessageType,
    pub payload: Option<serde_json::Value>,
}

// =============================================================================
// Command Payloads
// =============================================================================

/// Payload for visit command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitPayload {
    pub destination: String,
}

// =============================================================================
// Response Data Types
// =============================================================================

/// Data returned from end command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndData {
    /// False if the session had no history to discard
    pub ended: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn command_serializes_with_camel_case_and_type_tag() {
        let command = Command {
            id: "cmd-1".to_string(),
            session_id: "work".to_string(),
            command_type: CommandType::Visit,
            params: Some(json!({"destination": "A"})),
            timestamp: "2026-01-01T00:00:00Z".to_string(),
        };

        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(value["sessionId"], "work");
        assert_eq!(value["type"], "visit");
        assert_eq!(value["params"]["destination"], "A");
    }

    #[test]
    fn command_without_params_omits_field() {
        let command = Command {
            id: "cmd-1".to_string(),
            session_id: "work".to_string(),
            command_type: CommandType::Back,
            params: None,
            timestamp: "2026-01-01T00:00:00Z".to_string(),
        };

        let value = serde_json::to_value(&command).unwrap();
        assert!(value.get("params").is_none());
    }

    #[test]
    fn failed_response_omits_data() {
        let response = CommandResponse::failed("cmd-1".to_string(), "nope");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"id": "cmd-1", "success": false, "error": "nope"}));
    }
}
