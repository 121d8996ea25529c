//! Remove-alias command handler.
//!
//! Deletes an alias. Like `get-alias`, the name is matched exactly as typed.

use log::debug;

use crate::commands::{
    CommandContext, CommandResult,
    actions::store_failure,
    markdown_response::{format_remove_alias_fail, format_remove_alias_success},
};

/// Deletes `alias_name` within a single write transaction.
pub fn handle_remove_alias(context: &CommandContext, alias_name: &str) -> CommandResult {
    debug!("handling remove-alias command: {}", alias_name);

    let removed = context.alias_store.update(|bucket| {
        if bucket.get(alias_name)?.is_none() {
            return Ok(false);
        }

        bucket.delete(alias_name)
    });

    let response = match removed {
        Ok(true) => format_remove_alias_success(alias_name),
        Ok(false) => format_remove_alias_fail(alias_name),
        Err(e) => return store_failure("remove-alias", e),
    };

    CommandResult { response }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alias::AliasStore,
        commands::actions::{create_failing_store, get_alias::handle_get_alias},
        commands::markdown_response::{format_generic_failure, format_get_alias_fail},
        dictionary::Dictionary,
    };

    fn create_test_store() -> AliasStore {
        let alias_store = AliasStore::open_in_memory().unwrap();
        alias_store
            .update(|bucket| bucket.put("san", "sanity"))
            .unwrap();
        alias_store
    }

    #[test]
    fn test_handle_remove_alias_successful() {
        let dictionary = Dictionary::default();
        let alias_store = create_test_store();
        let context = CommandContext {
            dictionary: &dictionary,
            alias_store: &alias_store,
        };

        let result = handle_remove_alias(&context, "san");

        assert_eq!(result.response, format_remove_alias_success("san"));
        assert_eq!(
            handle_get_alias(&context, "san").response,
            format_get_alias_fail("san")
        );
    }

    #[test]
    fn test_handle_remove_alias_missing() {
        let dictionary = Dictionary::default();
        let alias_store = create_test_store();
        let context = CommandContext {
            dictionary: &dictionary,
            alias_store: &alias_store,
        };

        let result = handle_remove_alias(&context, "dodge");

        assert_eq!(result.response, format_remove_alias_fail("dodge"));
        assert_eq!(alias_store.view(|bucket| bucket.len()).unwrap(), 1);
    }

    // Known inconsistency: aliases are stored lowercased but removed as typed.
    #[test]
    fn test_handle_remove_alias_is_case_sensitive() {
        let dictionary = Dictionary::default();
        let alias_store = create_test_store();
        let context = CommandContext {
            dictionary: &dictionary,
            alias_store: &alias_store,
        };

        let result = handle_remove_alias(&context, "SAN");

        assert_eq!(result.response, format_remove_alias_fail("SAN"));
        assert_eq!(alias_store.view(|bucket| bucket.len()).unwrap(), 1);
    }

    #[test]
    fn test_handle_remove_alias_store_failure() {
        let dictionary = Dictionary::default();
        let (_temp_dir, alias_store) = create_failing_store();
        let context = CommandContext {
            dictionary: &dictionary,
            alias_store: &alias_store,
        };

        let result = handle_remove_alias(&context, "san");

        assert_eq!(result.response, format_generic_failure());
    }
}
