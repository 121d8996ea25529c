//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, the entry point for processing
//! bot commands. It tokenizes and parses raw message text, then routes commands
//! to their handlers.
//!
//! # Flow
//!
//! ```text
//! Matrix Message → parse() → Command → execute_command() → CommandResult
//! ```
//!
//! # Examples
//!
//! ```ignore
//! # use cocbot::alias::AliasStore;
//! # use cocbot::commands::{Commander, CommandContext};
//! # use cocbot::dictionary::Dictionary;
//! let commander = Commander::new("!coc").unwrap();
//! let dictionary = Dictionary::default();
//! let alias_store = AliasStore::open_in_memory().unwrap();
//! let context = CommandContext {
//!     dictionary: &dictionary,
//!     alias_store: &alias_store,
//! };
//!
//! let reply = commander.handle("!coc resist 50 vs 49", &context);
//! assert!(reply.unwrap().contains("55"));
//! ```

use log::debug;

use crate::commands::{
    CommandContext, CommandParseError, CommandResult,
    actions::{
        handle_add_alias, handle_find, handle_get_alias, handle_help, handle_remove_alias,
        handle_resist, handle_version,
    },
    command::{Command, CommandInvocation, format_command_error},
    tokenizer::Tokenizer,
};

/// Command orchestrator for parsing and executing bot commands.
///
/// # Command Prefix
///
/// The first token of a message must be the configured prefix (`!coc` by
/// default). Other messages are silently ignored.
pub struct Commander {
    /// Splits message bodies into tokens
    tokenizer: Tokenizer,
    /// First token a message must carry to be a command
    prefix: String,
}

impl Commander {
    /// Creates a new Commander answering to `prefix`.
    ///
    /// # Errors
    ///
    /// Fails only if the tokenizer pattern cannot be compiled.
    pub fn new(prefix: &str) -> Result<Self, anyhow::Error> {
        Ok(Commander {
            tokenizer: Tokenizer::new()?,
            prefix: prefix.to_owned(),
        })
    }

    /// Parses a message body into a structured command.
    ///
    /// # Returns
    ///
    /// * `Ok(Command)` - Successfully parsed and validated command
    /// * `Err(CommandParseError::NotForBot)` - Not a command for this bot, or an
    ///   unknown command name. Nothing should be sent back.
    /// * `Err(CommandParseError::InvalidCommand)` - Known command with malformed
    ///   arguments, carrying the usage message to send
    pub fn parse(&self, body: &str) -> Result<Command, CommandParseError> {
        let tokens = self.tokenizer.tokenize(body);

        let parse_result =
            CommandInvocation::from_tokens(&self.prefix, tokens).and_then(Command::parse);

        parse_result.map_err(|error| {
            debug!("command not parsed: {:?}", error);
            // Return silently if the command is not for the bot
            // Otherwise, send the usage message
            match format_command_error(error) {
                Some(message) => CommandParseError::InvalidCommand(message),
                None => CommandParseError::NotForBot,
            }
        })
    }

    /// Executes a parsed command and returns its reply.
    ///
    /// # Command Handlers
    ///
    /// - [`Command::Help`] → [`handle_help`]
    /// - [`Command::Version`] → [`handle_version`]
    /// - [`Command::Find`] → [`handle_find`]
    /// - [`Command::AddAlias`] → [`handle_add_alias`]
    /// - [`Command::GetAlias`] → [`handle_get_alias`]
    /// - [`Command::RemoveAlias`] → [`handle_remove_alias`]
    /// - [`Command::Resist`] → [`handle_resist`]
    pub fn execute_command(&self, command: &Command, context: &CommandContext) -> CommandResult {
        match command {
            Command::Help => handle_help(),
            Command::Version => handle_version(),
            Command::Find(key) => handle_find(context, key),
            Command::AddAlias(alias_name, target_name) => {
                handle_add_alias(context, alias_name, target_name)
            }
            Command::GetAlias(alias_name) => handle_get_alias(context, alias_name),
            Command::RemoveAlias(alias_name) => handle_remove_alias(context, alias_name),
            Command::Resist(active, passive) => handle_resist(*active, *passive),
        }
    }

    /// Runs the whole pipeline on a message body.
    ///
    /// Returns the single reply to send, or `None` when the bot must stay silent.
    pub fn handle(&self, body: &str, context: &CommandContext) -> Option<String> {
        match self.parse(body) {
            Ok(command) => Some(self.execute_command(&command, context).response),
            Err(CommandParseError::InvalidCommand(message)) => Some(message),
            Err(CommandParseError::NotForBot) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alias::AliasStore,
        commands::markdown_response::{
            format_add_alias_duplicate, format_add_alias_success,
            format_add_alias_target_not_found, format_find_fail, format_get_alias_fail,
            format_help, format_invalid_add_alias, format_invalid_find, format_invalid_resist,
            format_remove_alias_success, format_version,
        },
        dictionary::Dictionary,
    };

    fn create_test_dictionary() -> Dictionary {
        Dictionary::from_entries([
            ("sanity".to_string(), "Mind stability".to_string()),
            ("dodge".to_string(), "Avoid a blow".to_string()),
        ])
    }

    fn create_commander() -> Commander {
        Commander::new("!coc").unwrap()
    }

    #[test]
    fn test_parse_routes_arguments() {
        let commander = Commander::new("@bot").unwrap();
        let result = commander.parse("@bot find cats");
        assert_eq!(result, Ok(Command::Find("cats".to_string())));
    }

    #[test]
    fn test_parse_add_alias_through_tokenizer() {
        let commander = create_commander();
        let result = commander.parse("!coc add-alias San = Sanity");
        assert_eq!(
            result,
            Ok(Command::AddAlias("san".to_string(), "sanity".to_string()))
        );
    }

    #[test]
    fn test_parse_unknown_command_is_silent() {
        let commander = create_commander();
        assert_eq!(
            commander.parse("!coc roll 1d100"),
            Err(CommandParseError::NotForBot)
        );
    }

    #[test]
    fn test_parse_not_for_bot() {
        let commander = create_commander();
        assert_eq!(
            commander.parse("!other help"),
            Err(CommandParseError::NotForBot)
        );
        assert_eq!(
            commander.parse("just chatting"),
            Err(CommandParseError::NotForBot)
        );
    }

    #[test]
    fn test_parse_single_token_is_silent() {
        let commander = create_commander();
        assert_eq!(commander.parse("!coc"), Err(CommandParseError::NotForBot));
        assert_eq!(commander.parse(""), Err(CommandParseError::NotForBot));
    }

    #[test]
    fn test_parse_invalid_arguments() {
        let commander = create_commander();
        assert_eq!(
            commander.parse("!coc find"),
            Err(CommandParseError::InvalidCommand(format_invalid_find()))
        );
        assert_eq!(
            commander.parse("!coc resist 1 vs abc"),
            Err(CommandParseError::InvalidCommand(format_invalid_resist()))
        );
        assert_eq!(
            commander.parse("!coc add-alias san sanity"),
            Err(CommandParseError::InvalidCommand(format_invalid_add_alias()))
        );
    }

    #[test]
    fn test_handle_help_and_version() {
        let commander = create_commander();
        let dictionary = create_test_dictionary();
        let alias_store = AliasStore::open_in_memory().unwrap();
        let context = CommandContext {
            dictionary: &dictionary,
            alias_store: &alias_store,
        };

        assert_eq!(commander.handle("!coc help", &context), Some(format_help()));
        assert_eq!(
            commander.handle("!coc version", &context),
            Some(format_version())
        );
    }

    #[test]
    fn test_handle_unknown_command_has_no_reply() {
        let commander = create_commander();
        let dictionary = create_test_dictionary();
        let alias_store = AliasStore::open_in_memory().unwrap();
        let context = CommandContext {
            dictionary: &dictionary,
            alias_store: &alias_store,
        };

        assert_eq!(commander.handle("!coc unknown", &context), None);
    }

    #[test]
    fn test_handle_alias_lifecycle() {
        let commander = create_commander();
        let dictionary = create_test_dictionary();
        let alias_store = AliasStore::open_in_memory().unwrap();
        let context = CommandContext {
            dictionary: &dictionary,
            alias_store: &alias_store,
        };

        assert_eq!(
            commander.handle("!coc add-alias san = sanity", &context),
            Some(format_add_alias_success("sanity", "san"))
        );

        let reply = commander.handle("!coc get-alias san", &context).unwrap();
        assert!(reply.contains("sanity"));

        assert_eq!(
            commander.handle("!coc add-alias san = dodge", &context),
            Some(format_add_alias_duplicate("san"))
        );
        assert_eq!(
            alias_store.view(|bucket| bucket.get("san")).unwrap(),
            Some("sanity".to_string())
        );

        let reply = commander.handle("!coc find san", &context).unwrap();
        assert!(reply.contains("san"));
        assert!(reply.contains("Mind stability"));

        assert_eq!(
            commander.handle("!coc remove-alias san", &context),
            Some(format_remove_alias_success("san"))
        );
        assert_eq!(
            commander.handle("!coc get-alias san", &context),
            Some(format_get_alias_fail("san"))
        );
        assert_eq!(
            commander.handle("!coc find san", &context),
            Some(format_find_fail())
        );
    }

    #[test]
    fn test_handle_add_alias_unknown_target_does_not_write() {
        let commander = create_commander();
        let dictionary = create_test_dictionary();
        let alias_store = AliasStore::open_in_memory().unwrap();
        let context = CommandContext {
            dictionary: &dictionary,
            alias_store: &alias_store,
        };

        assert_eq!(
            commander.handle("!coc add-alias elder = elder sign", &context),
            Some(format_add_alias_target_not_found())
        );
        assert_eq!(alias_store.view(|bucket| bucket.len()).unwrap(), 0);
    }

    // Known inconsistency: get-alias does not lowercase its argument.
    #[test]
    fn test_handle_get_alias_keeps_typed_case() {
        let commander = create_commander();
        let dictionary = create_test_dictionary();
        let alias_store = AliasStore::open_in_memory().unwrap();
        let context = CommandContext {
            dictionary: &dictionary,
            alias_store: &alias_store,
        };

        commander.handle("!coc add-alias foo = sanity", &context);

        assert_eq!(
            commander.handle("!coc get-alias Foo", &context),
            Some(format_get_alias_fail("Foo"))
        );
    }

    #[test]
    fn test_handle_resist() {
        let commander = create_commander();
        let dictionary = create_test_dictionary();
        let alias_store = AliasStore::open_in_memory().unwrap();
        let context = CommandContext {
            dictionary: &dictionary,
            alias_store: &alias_store,
        };

        let success = commander.handle("!coc resist 80 vs 30", &context).unwrap();
        assert!(success.contains("Automatic Success"));

        let failure = commander.handle("!coc resist 10 vs 50", &context).unwrap();
        assert!(failure.contains("Automatic Failure"));

        let normal = commander.handle("!coc resist 50 vs 49", &context).unwrap();
        assert!(normal.contains("55"));

        assert_eq!(
            commander.handle("!coc resist 1 vs abc", &context),
            Some(format_invalid_resist())
        );
    }
}
