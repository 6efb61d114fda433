//! Command implementations for the navstack CLI
//!
//! Each command builds its payload and sends it to the daemon through
//! the shared `CommandContext`.

pub mod clear;
pub mod end;
pub mod history;
pub mod snapshot;
pub mod utils;
pub mod visit;

pub use clear::ClearCommand;
pub use end::EndCommand;
pub use history::back::BackCommand;
pub use history::forward::ForwardCommand;
pub use snapshot::SnapshotCommand;
pub use visit::VisitCommand;

use crate::commands::utils::current_timestamp;
use crate::error::Result;
use crate::ipc::IpcClient;
use crate::types::{Command, CommandResponse, CommandType, SessionId};
use uuid::Uuid;

pub trait Execute {
    fn execute(&self, ctx: &CommandContext) -> Result<CommandResponse>;
}

pub struct CommandContext {
    pub client: IpcClient,
    pub session_id: SessionId,
}

impl CommandContext {
    pub fn new(client: IpcClient, session_id: SessionId) -> Self {
        Self { client, session_id }
    }

    pub fn execute(
        &self,
        command_type: CommandType,
        payload: serde_json::Value,
    ) -> Result<CommandResponse> {
        let params = match payload.as_object() {
            Some(o) if !o.is_empty() => Some(payload),
            _ => None,
        };

        let command = Command {
            id: Uuid::new_v4().to_string(),
            session_id: self.session_id.clone(),
            command_type,
            params,
            timestamp: current_timestamp()?,
        };

        self.client.send_command(command)
    }
}
