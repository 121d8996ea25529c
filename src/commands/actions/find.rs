//! Find command handler.
//!
//! Looks a term up in the dictionary. The key is first resolved as an alias:
//! - alias found: the alias target is looked up in the dictionary
//! - no alias: the key itself is looked up
//!
//! An alias whose target is missing from the dictionary (a dangling alias) is
//! answered like any other miss.

use log::debug;

use crate::commands::{
    CommandContext, CommandResult,
    actions::store_failure,
    markdown_response::{format_find, format_find_fail, format_find_with_alias},
};

/// Looks `key` up, case-insensitively, following aliases.
pub fn handle_find(context: &CommandContext, key: &str) -> CommandResult {
    debug!("handling find command: {}", key);

    let key = key.to_lowercase();

    let alias_target = match context.alias_store.view(|bucket| bucket.get(&key)) {
        Ok(alias_target) => alias_target,
        Err(e) => return store_failure("find", e),
    };

    let response = match alias_target {
        Some(target) => match context.dictionary.get(&target) {
            Some(definition) => format_find_with_alias(&key, &target, definition),
            None => {
                debug!("alias {} points to missing term {}", key, target);
                format_find_fail()
            }
        },
        None => match context.dictionary.get(&key) {
            Some(definition) => format_find(&key, definition),
            None => format_find_fail(),
        },
    };

    let result = CommandResult { response };

    debug!("find command result {:?}", result);

    result
}
