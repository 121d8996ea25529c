//! Command action handlers.
//!
//! Individual handler functions for each bot command. Each handler receives the
//! validated arguments of its [`Command`](crate::commands::command::Command) and,
//! when it needs them, a [`CommandContext`](crate::commands::CommandContext)
//! giving access to the dictionary and the alias store. Every handler returns
//! exactly one [`CommandResult`](crate::commands::CommandResult).
//!
//! # Available Handlers
//!
//! - [`handle_help`] - Display help information
//! - [`handle_version`] - Display the bot version
//! - [`handle_find`] - Look a term up, following aliases
//! - [`handle_add_alias`] - Create an alias to a dictionary term
//! - [`handle_get_alias`] - Show the target of an alias
//! - [`handle_remove_alias`] - Delete an alias
//! - [`handle_resist`] - Compute a resistance check
//!
//! # Store failures
//!
//! A failing alias transaction is rolled back, logged, and answered with a
//! generic failure message.

mod add_alias;
mod find;
mod get_alias;
mod help;
mod remove_alias;
mod resist;
mod version;

use log::error;

pub use crate::commands::actions::{
    add_alias::handle_add_alias,
    find::handle_find,
    get_alias::handle_get_alias,
    help::handle_help,
    remove_alias::handle_remove_alias,
    resist::{ResistOutcome, handle_resist},
    version::handle_version,
};
use crate::{
    alias::StoreError,
    commands::{CommandResult, markdown_response::format_generic_failure},
};

/// Builds the reply for a command whose alias transaction failed.
fn store_failure(command: &str, error: StoreError) -> CommandResult {
    error!("{} command failed on the alias store: {}", command, error);

    CommandResult {
        response: format_generic_failure(),
    }
}

/// Opens a file backed store whose alias table was dropped behind its back, so
/// every transaction fails.
#[cfg(test)]
fn create_failing_store() -> (tempfile::TempDir, crate::alias::AliasStore) {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = crate::utils::get_path(temp_dir.path().to_str().unwrap(), "alias.sqlite");
    let alias_store = crate::alias::AliasStore::open(&path).unwrap();

    rusqlite::Connection::open(&path)
        .unwrap()
        .execute("DROP TABLE alias", [])
        .unwrap();

    (temp_dir, alias_store)
}
