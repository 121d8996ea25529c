//! Get-alias command handler.
//!
//! Shows the term an alias points to. The alias name is looked up exactly as
//! typed: `add-alias` stores lowercased names, so `get-alias San` does not find
//! an alias created as `add-alias san = sanity`.

use log::debug;

use crate::commands::{
    CommandContext, CommandResult,
    actions::store_failure,
    markdown_response::{format_get_alias_fail, format_get_alias_success},
};

pub fn handle_get_alias(context: &CommandContext, alias_name: &str) -> CommandResult {
    debug!("handling get-alias command: {}", alias_name);

    let response = match context.alias_store.view(|bucket| bucket.get(alias_name)) {
        Ok(Some(target_name)) => format_get_alias_success(&target_name, alias_name),
        Ok(None) => format_get_alias_fail(alias_name),
        Err(e) => return store_failure("get-alias", e),
    };

    CommandResult { response }
}
