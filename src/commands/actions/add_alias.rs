//! Add-alias command handler.
//!
//! Creates an alias to an existing dictionary term. Aliases are never
//! overwritten: an existing alias must be removed first.
//!
//! # Behavior
//!
//! - The target must exist in the dictionary, otherwise nothing is written
//! - The existence check and the insert run in one write transaction

use log::debug;

use crate::commands::{
    CommandContext, CommandResult,
    actions::store_failure,
    markdown_response::{
        format_add_alias_duplicate, format_add_alias_success, format_add_alias_target_not_found,
    },
};

/// Registers `alias_name` as another name for `target_name`.
///
/// Both names are expected lowercased, as produced by the command parser.
pub fn handle_add_alias(
    context: &CommandContext,
    alias_name: &str,
    target_name: &str,
) -> CommandResult {
    debug!(
        "handling add-alias command: {} -> {}",
        alias_name, target_name
    );

    if !context.dictionary.contains(target_name) {
        return CommandResult {
            response: format_add_alias_target_not_found(),
        };
    }

    let inserted = context.alias_store.update(|bucket| {
        if bucket.get(alias_name)?.is_some() {
            return Ok(false);
        }

        bucket.put(alias_name, target_name)?;
        Ok(true)
    });

    let response = match inserted {
        Ok(true) => format_add_alias_success(target_name, alias_name),
        Ok(false) => format_add_alias_duplicate(alias_name),
        Err(e) => return store_failure("add-alias", e),
    };

    let result = CommandResult { response };

    debug!("add-alias command result {:?}", result);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alias::AliasStore,
        commands::{actions::create_failing_store, markdown_response::format_generic_failure},
        dictionary::Dictionary,
    };

    fn create_test_dictionary() -> Dictionary {
        Dictionary::from_entries([
            ("sanity".to_string(), "Mind stability".to_string()),
            ("spot hidden".to_string(), "Notice secret things".to_string()),
        ])
    }

    #[test]
    fn test_handle_add_alias_successful() {
        let dictionary = create_test_dictionary();
        let alias_store = AliasStore::open_in_memory().unwrap();
        let context = CommandContext {
            dictionary: &dictionary,
            alias_store: &alias_store,
        };

        let result = handle_add_alias(&context, "san", "sanity");

        assert_eq!(result.response, format_add_alias_success("sanity", "san"));
        assert_eq!(
            alias_store.view(|bucket| bucket.get("san")).unwrap(),
            Some("sanity".to_string())
        );
    }

    #[test]
    fn test_handle_add_alias_duplicate_is_not_overwritten() {
        let dictionary = create_test_dictionary();
        let alias_store = AliasStore::open_in_memory().unwrap();
        let context = CommandContext {
            dictionary: &dictionary,
            alias_store: &alias_store,
        };
        handle_add_alias(&context, "san", "sanity");

        let result = handle_add_alias(&context, "san", "spot hidden");

        assert_eq!(result.response, format_add_alias_duplicate("san"));
        assert_eq!(
            alias_store.view(|bucket| bucket.get("san")).unwrap(),
            Some("sanity".to_string())
        );
    }

    #[test]
    fn test_handle_add_alias_target_not_found_never_writes() {
        let dictionary = create_test_dictionary();
        let alias_store = AliasStore::open_in_memory().unwrap();
        let context = CommandContext {
            dictionary: &dictionary,
            alias_store: &alias_store,
        };

        let result = handle_add_alias(&context, "cthulhu", "great old one");

        assert_eq!(result.response, format_add_alias_target_not_found());
        assert_eq!(alias_store.view(|bucket| bucket.len()).unwrap(), 0);
    }

    #[test]
    fn test_handle_add_alias_multi_word_names() {
        let dictionary = create_test_dictionary();
        let alias_store = AliasStore::open_in_memory().unwrap();
        let context = CommandContext {
            dictionary: &dictionary,
            alias_store: &alias_store,
        };

        let result = handle_add_alias(&context, "hidden spot", "spot hidden");

        assert_eq!(
            result.response,
            format_add_alias_success("spot hidden", "hidden spot")
        );
    }

    #[test]
    fn test_handle_add_alias_store_failure() {
        let dictionary = create_test_dictionary();
        let (_temp_dir, alias_store) = create_failing_store();
        let context = CommandContext {
            dictionary: &dictionary,
            alias_store: &alias_store,
        };

        let result = handle_add_alias(&context, "san", "sanity");

        assert_eq!(result.response, format_generic_failure());
    }
}
