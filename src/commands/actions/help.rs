//! Help command handler.
//!
//! This is a stateless command that always returns the same help message.

use log::debug;

use crate::commands::{CommandResult, markdown_response::format_help};

/// Returns the usage of every command.
pub fn handle_help() -> CommandResult {
    debug!("handling help command");

    CommandResult {
        response: format_help(),
    }
}
