use crate::commands::{CommandContext, Execute};
use crate::error::Result;
use crate::types::{CommandResponse, CommandType};
use serde_json::json;

/// Drop both stacks and return the session to Home
#[derive(Default)]
pub struct ClearCommand {}

impl Execute for ClearCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<CommandResponse> {
        ctx.execute(CommandType::Clear, json!({}))
    }
}
