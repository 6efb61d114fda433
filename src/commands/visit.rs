use crate::commands::utils::validate_destination;
use crate::commands::{CommandContext, Execute};
use crate::error::Result;
use crate::types::{CommandResponse, CommandType, VisitPayload};

/// Move the session to a new location, dropping its forward history
pub struct VisitCommand {
    pub destination: String,
}

impl VisitCommand {
    pub fn new(destination: String) -> Self {
        Self { destination }
    }
}

impl Execute for VisitCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<CommandResponse> {
        validate_destination(&self.destination)?;

        let payload = VisitPayload {
            destination: self.destination.clone(),
        };

        let payload_json = serde_json::to_value(payload)?;
        ctx.execute(CommandType::Visit, payload_json)
    }
}
