//! Command parsing and validation.
//!
//! This module turns the tokens of a message into a structured [`Command`].
//! Argument shape is validated here, so handlers only deal with well formed
//! commands and the usage reply for a malformed one is chosen in one place.

use log::debug;

use crate::commands::markdown_response::{
    format_invalid_add_alias, format_invalid_find, format_invalid_get_alias,
    format_invalid_remove_alias, format_invalid_resist,
};

/// Separator between the alias and its target in `add-alias`.
const ALIAS_SEPARATOR: &str = " = ";

/// Represents a parsed bot command.
#[derive(Debug, Hash, PartialEq, Eq)]
pub enum Command {
    /// Display help information
    Help,
    /// Display the bot version
    Version,
    /// Look a term up, directly or through an alias
    ///
    /// # Fields
    ///
    /// * `String` - The term or alias, as typed
    Find(String),
    /// Create an alias
    ///
    /// # Fields
    ///
    /// * `String` - Alias name, lowercased
    /// * `String` - Target term, lowercased
    AddAlias(String, String),
    /// Show the target of an alias
    ///
    /// # Fields
    ///
    /// * `String` - Alias name, as typed
    GetAlias(String),
    /// Delete an alias
    ///
    /// # Fields
    ///
    /// * `String` - Alias name, as typed
    RemoveAlias(String),
    /// Resistance check
    ///
    /// # Fields
    ///
    /// * `i64` - Active characteristic
    /// * `i64` - Passive characteristic
    Resist(i64, i64),
}

/// A command name and its argument tokens, before validation.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandInvocation {
    pub name: String,
    pub args: Vec<String>,
}

/// Errors that can occur during command parsing.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParsingError {
    /// Fewer than two tokens: nothing to dispatch
    UnableToParse,
    /// The first token is not the bot prefix
    NotForBot,
    /// The command name is not recognized
    Unknown,
    /// `find` needs exactly one argument
    InvalidFind,
    /// `add-alias` needs `<alias> = <target>`
    InvalidAddAlias,
    /// `get-alias` needs an alias name
    InvalidGetAlias,
    /// `remove-alias` needs an alias name
    InvalidRemoveAlias,
    /// `resist` needs `<active> vs <passive>` with integers
    InvalidResist,
}

impl CommandInvocation {
    /// Splits message tokens into an invocation.
    ///
    /// The first token (the bot prefix) must equal `prefix`, the second one is the
    /// command name and the remaining ones are its arguments.
    pub fn from_tokens(prefix: &str, tokens: Vec<String>) -> Result<Self, CommandParsingError> {
        if tokens.len() < 2 {
            return Err(CommandParsingError::UnableToParse);
        }

        let mut tokens = tokens.into_iter();
        // Checked above, the iterator has at least two items
        let (Some(first), Some(name)) = (tokens.next(), tokens.next()) else {
            return Err(CommandParsingError::UnableToParse);
        };

        if first != prefix {
            return Err(CommandParsingError::NotForBot);
        }

        Ok(CommandInvocation {
            name,
            args: tokens.collect(),
        })
    }
}

impl Command {
    /// Validates an invocation into a command.
    ///
    /// Command names are matched exactly and case-sensitively.
    ///
    /// # Errors
    ///
    /// Returns [`CommandParsingError::Unknown`] for an unrecognized name and one of
    /// the `Invalid*` variants when the arguments don't fit the command.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// # use cocbot::commands::command::{Command, CommandInvocation};
    /// let invocation = CommandInvocation {
    ///     name: "resist".to_string(),
    ///     args: vec!["50".to_string(), "vs".to_string(), "49".to_string()],
    /// };
    /// assert_eq!(Command::parse(invocation), Ok(Command::Resist(50, 49)));
    /// ```
    pub fn parse(invocation: CommandInvocation) -> Result<Self, CommandParsingError> {
        debug!("parsing command: {:?}", invocation);

        let CommandInvocation { name, args } = invocation;

        match name.as_str() {
            "help" => Ok(Command::Help),
            "version" => Ok(Command::Version),
            "find" => Self::parse_find(args),
            "add-alias" => Self::parse_add_alias(&args),
            "get-alias" => Self::parse_alias_name(&args)
                .map(Command::GetAlias)
                .ok_or(CommandParsingError::InvalidGetAlias),
            "remove-alias" => Self::parse_alias_name(&args)
                .map(Command::RemoveAlias)
                .ok_or(CommandParsingError::InvalidRemoveAlias),
            "resist" => Self::parse_resist(&args),
            _ => Err(CommandParsingError::Unknown),
        }
    }

    fn parse_find(args: Vec<String>) -> Result<Self, CommandParsingError> {
        let [key]: [String; 1] = args
            .try_into()
            .map_err(|_| CommandParsingError::InvalidFind)?;

        Ok(Command::Find(key))
    }

    fn parse_add_alias(args: &[String]) -> Result<Self, CommandParsingError> {
        if args.is_empty() {
            return Err(CommandParsingError::InvalidAddAlias);
        }

        let joined = args.join(" ");
        let segments: Vec<&str> = joined.split(ALIAS_SEPARATOR).collect();
        let [alias_name, target_name] = segments[..] else {
            return Err(CommandParsingError::InvalidAddAlias);
        };

        debug!(
            "parsed add-alias command - alias: {}, target: {}",
            alias_name, target_name
        );

        Ok(Command::AddAlias(
            alias_name.to_lowercase(),
            target_name.to_lowercase(),
        ))
    }

    /// Joins the arguments into an alias name. The case is kept as typed.
    fn parse_alias_name(args: &[String]) -> Option<String> {
        if args.is_empty() {
            return None;
        }

        Some(args.join(" "))
    }

    fn parse_resist(args: &[String]) -> Result<Self, CommandParsingError> {
        let [active, versus, passive] = args else {
            return Err(CommandParsingError::InvalidResist);
        };

        if versus != "vs" {
            return Err(CommandParsingError::InvalidResist);
        }

        let (Ok(active), Ok(passive)) = (active.parse::<i64>(), passive.parse::<i64>()) else {
            debug!("resist arguments are not integers: {:?}", args);
            return Err(CommandParsingError::InvalidResist);
        };

        Ok(Command::Resist(active, passive))
    }
}

/// Formats a command error into a user-friendly message.
///
/// Malformed arguments produce the usage of the command. Messages that are not
/// for the bot and unknown command names produce nothing: the bot stays silent.
pub fn format_command_error(error: CommandParsingError) -> Option<String> {
    match error {
        CommandParsingError::InvalidFind => Some(format_invalid_find()),
        CommandParsingError::InvalidAddAlias => Some(format_invalid_add_alias()),
        CommandParsingError::InvalidGetAlias => Some(format_invalid_get_alias()),
        CommandParsingError::InvalidRemoveAlias => Some(format_invalid_remove_alias()),
        CommandParsingError::InvalidResist => Some(format_invalid_resist()),
        CommandParsingError::UnableToParse
        | CommandParsingError::NotForBot
        | CommandParsingError::Unknown => None,
    }
}
