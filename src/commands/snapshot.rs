//! Snapshot command implementation
//!
//! Reads the session's current location and both history lists without
//! changing anything.

use crate::commands::{CommandContext, Execute};
use crate::error::{CliError, Result};
use crate::history::Snapshot;
use crate::types::{CommandResponse, CommandType};
use serde_json::json;

#[derive(Default)]
pub struct SnapshotCommand {}

impl Execute for SnapshotCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<CommandResponse> {
        ctx.execute(CommandType::Snapshot, json!({}))
    }
}

/// Parse snapshot data from response
pub fn parse_snapshot_data(response: &CommandResponse) -> Result<Snapshot> {
    let data = response
        .data
        .as_ref()
        .ok_or_else(|| CliError::ProtocolError("No data in snapshot response".to_string()))?;

    let snapshot: Snapshot = serde_json::from_value(data.clone())?;
    Ok(snapshot)
}

// =============================================================================
// Tests
// =============================================================================
