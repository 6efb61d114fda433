use crate::commands::{CommandContext, Execute};
use crate::error::Result;
use crate::types::{CommandResponse, CommandType};
use serde_json::json;

/// End the session, discarding its history on the daemon
#[derive(Default)]
pub struct EndCommand {}

impl Execute for EndCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<CommandResponse> {
        ctx.execute(CommandType::End, json!({}))
    }
}
