use crate::error::CliError;
use crate::error::Result;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub fn validate_destination(destination: &str) -> Result<()> {
    if destination.trim().is_empty() {
        return Err(CliError::InvalidArguments(
            "Destination cannot be empty".to_string(),
        ));
    }

    Ok(())
}

pub fn current_timestamp() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| CliError::ProtocolError(format!("cannot format timestamp: {}", err)))
}
