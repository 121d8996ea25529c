//! Bot command parsing and response formatting.
//!
//! This module provides the complete command processing pipeline of the bot.
//!
//! # Overview
//!
//! 1. **Tokenizing** - Splitting the message body into tokens ([`tokenizer`])
//! 2. **Parsing** - Turning tokens into a structured [`command::Command`]
//! 3. **Execution** - Routing commands to their handler
//! 4. **Response** - Formatting results as Markdown
//!
//! # Architecture
//!
//! ```text
//! Matrix Message
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: parse() + execute_command()
//! └─────────────┘
//!      │
//!      ├── parse() ───────────────────┐
//!      │                              ▼
//!      │                   ┌──────────────────┐
//!      │                   │ Tokenizer        │
//!      │                   │ command::Command │
//!      │                   └──────────────────┘
//!      │
//!      └── execute_command() ─────────┐
//!                                     ▼
//!                          ┌──────────────────────┐
//!                          │ Action Handlers      │
//!                          │  - handle_help       │
//!                          │  - handle_version    │
//!                          │  - handle_find       │
//!                          │  - handle_add_alias  │
//!                          │  - handle_get_alias  │
//!                          │  - handle_remove_alias│
//!                          │  - handle_resist     │
//!                          └──────────────────────┘
//!                                     │
//!                                     ▼
//!                          ┌────────────────────┐
//!                          │  CommandResult     │
//!                          └────────────────────┘
//! ```
//!
//! # Command Structure
//!
//! All commands follow the format: `!coc <command> [args...]`
//!
//! | Command | Arguments | Description |
//! |---------|-----------|-------------|
//! | `help` | None | Display help information |
//! | `version` | None | Display the bot version |
//! | `find` | `<term>` | Look a term up, following aliases |
//! | `add-alias` | `<alias> = <target>` | Create an alias to a term |
//! | `get-alias` | `<alias>` | Show the target of an alias |
//! | `remove-alias` | `<alias>` | Delete an alias |
//! | `resist` | `<active> vs <passive>` | Resistance check |
//!
//! # Error Handling
//!
//! - **Silent Errors** ([`CommandParseError::NotForBot`]): messages that are not
//!   commands, are for another bot, or name an unknown command. No reply.
//! - **User Errors** ([`CommandParseError::InvalidCommand`]): malformed arguments.
//!   The reply is the usage of the command.

use crate::{alias::AliasStore, dictionary::Dictionary};

mod actions;
pub mod command;
mod commander;
mod markdown_response;
pub mod tokenizer;

pub use crate::commands::commander::Commander;

/// Runtime context for command execution.
///
/// Borrowed from the bot for the duration of one message.
pub struct CommandContext<'a> {
    /// Static term dictionary
    pub dictionary: &'a Dictionary,
    /// Persistent alias store
    pub alias_store: &'a AliasStore,
}

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Markdown-formatted response message
    pub response: String,
}

/// Errors that can occur during command parsing.
///
/// This enum distinguishes between errors that should produce user-facing
/// messages and those that should be silently ignored.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParseError {
    /// Message is not a command for this bot (silent error)
    NotForBot,
    /// Invalid command arguments, with the usage message to send
    InvalidCommand(String),
}
