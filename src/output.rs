//! Output formatting for the navstack CLI
//!
//! Handles formatting command responses for terminal display.
//! Supports human-readable, JSON and quiet output formats.

use crate::commands::snapshot::parse_snapshot_data;
use crate::error::Result;
use crate::history::Snapshot;
use crate::types::{CommandResponse, EndData};

// =============================================================================
// Output Format
// =============================================================================

/// Supported output formats
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

// =============================================================================
// Output Formatter
// =============================================================================

/// Formats command responses for display
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format and print a command response
    pub fn print_response(&self, response: &CommandResponse) -> Result<()> {
        if response.success {
            let output = self.format_success(response);
            if !output.is_empty() {
                print_success(&output);
            }
        } else {
            let output = self.format_error(response);
            print_error(&output);
        }
        Ok(())
    }

    fn format_success(&self, response: &CommandResponse) -> String {
        match self.format {
            OutputFormat::Human => format_human(response),
            OutputFormat::Json => serde_json::to_string_pretty(response).unwrap_or_default(),
            OutputFormat::Quiet => String::new(),
        }
    }

    fn format_error(&self, response: &CommandResponse) -> String {
        let error_msg = response.error.as_deref().unwrap_or("Unknown error");
        match self.format {
            OutputFormat::Human => format!("Error: {}", error_msg),
            OutputFormat::Json => serde_json::to_string_pretty(response).unwrap_or_default(),
            OutputFormat::Quiet => error_msg.to_string(),
        }
    }
}

fn format_human(response: &CommandResponse) -> String {
    let Some(data) = &response.data else {
        return "Success".to_string();
    };

    if let Ok(snapshot) = parse_snapshot_data(response) {
        return format_snapshot(&snapshot);
    }

    if let Ok(end) = serde_json::from_value::<EndData>(data.clone()) {
        return if end.ended {
            "Session ended".to_string()
        } else {
            "Session had no history".to_string()
        };
    }

    serde_json::to_string_pretty(data).unwrap_or_default()
}

// =============================================================================
// Specialized Formatters
// =============================================================================

/// Render a snapshot the way a browser toolbar would show it
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let mut output = String::new();
    output.push_str(&format!("Current: {}\n", snapshot.current));
    output.push_str(&format!(
        "[{}] back   [{}] forward\n",
        if snapshot.has_back { "<" } else { " " },
        if snapshot.has_forward { ">" } else { " " },
    ));

    push_list(&mut output, "Back", &snapshot.back);
    push_list(&mut output, "Forward", &snapshot.forward);

    output.truncate(output.trim_end().len());
    output
}

fn push_list(output: &mut String, title: &str, locations: &[String]) {
    if locations.is_empty() {
        output.push_str(&format!("\n{}: (empty)\n", title));
        return;
    }

    output.push_str(&format!("\n{} ({}):\n", title, locations.len()));
    for (i, location) in locations.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, location));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Print a success message to stdout
pub fn print_success(message: &str) {
    println!("{}", message);
}

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{}", message);
}

// =============================================================================
// Tests
// =============================================================================
