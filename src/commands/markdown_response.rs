//! Markdown response formatters for bot commands.
//!
//! Every message the bot can send lives here, so the wording of the bot is
//! reviewable in one place. Handlers only pick a template and fill it.

use crate::commands::actions::ResistOutcome;

const HELP_RESIST: &str =
    "resist: Check CoC resistance!\n\t> Usage: !coc resist <active> vs <passive>";
const HELP_FIND: &str = "find: Use this command to find something\n\t> Usage: !coc find <something>";
const HELP_GET_ALIAS: &str = "get-alias: Displays an alias\n\t> Usage: !coc get-alias <alias_name>";
const HELP_ADD_ALIAS: &str = "add-alias: Adds an alias to a 'find'\n\t> Usage: !coc add-alias <alias_name> = <target_name>\n\t(if success, you can then do '!coc find <alias_name>')";
const HELP_REMOVE_ALIAS: &str =
    "remove-alias: Removes an alias\n\t> Usage: !coc remove-alias <alias_name>";

/// Formats the help message listing every command.
///
/// # Examples
///
/// ```ignore
/// # use cocbot::commands::markdown_response::format_help;
/// let help = format_help();
/// assert!(help.starts_with("```"));
/// ```
pub fn format_help() -> String {
    [
        "```",
        HELP_RESIST,
        HELP_FIND,
        HELP_GET_ALIAS,
        HELP_ADD_ALIAS,
        HELP_REMOVE_ALIAS,
        "```",
    ]
    .join("\n")
}

/// Formats the version message.
pub fn format_version() -> String {
    format!(
        "I'm CocBot v{}, written in Rust!",
        env!("CARGO_PKG_VERSION")
    )
}

/// Wraps a command help text into the "did you do it correctly" reply.
fn format_help_query(help: &str) -> String {
    format!("Did you do it correctly? ```{}```", help)
}

pub fn format_invalid_find() -> String {
    format_help_query(HELP_FIND)
}

pub fn format_invalid_add_alias() -> String {
    format_help_query(HELP_ADD_ALIAS)
}

pub fn format_invalid_get_alias() -> String {
    format_help_query(HELP_GET_ALIAS)
}

pub fn format_invalid_remove_alias() -> String {
    format_help_query(HELP_REMOVE_ALIAS)
}

pub fn format_invalid_resist() -> String {
    format_help_query(HELP_RESIST)
}

/// Formats a dictionary hit reached through an alias.
///
/// # Arguments
///
/// * `key` - The alias the user searched for
/// * `target` - The dictionary term the alias points to
/// * `definition` - The definition of `target`
pub fn format_find_with_alias(key: &str, target: &str, definition: &str) -> String {
    format!("I found **{}** (aka **{}**)! ```{}```", key, target, definition)
}

/// Formats a direct dictionary hit.
pub fn format_find(key: &str, definition: &str) -> String {
    format!("I found **{}**! ```{}```", key, definition)
}

pub fn format_find_fail() -> String {
    "Sorry...I can't find what you are looking for >_<".to_owned()
}

pub fn format_add_alias_target_not_found() -> String {
    "Target not found! Are you sure the target name is correct?".to_owned()
}

pub fn format_add_alias_success(target: &str, alias: &str) -> String {
    format!(
        "Alias added! **{}** is now also known as **{}**!",
        target, alias
    )
}

pub fn format_add_alias_duplicate(alias: &str) -> String {
    format!(
        "Duplicate alias **{}** found! Please remove first with the *remove-alias* command",
        alias
    )
}

pub fn format_get_alias_success(target: &str, alias: &str) -> String {
    format!("**{}** is also known as **{}**!", target, alias)
}

pub fn format_get_alias_fail(alias: &str) -> String {
    format!("Sorry, I can't find an alias for **{}**...", alias)
}

pub fn format_remove_alias_success(alias: &str) -> String {
    format!("Done! **{}** is no longer an alias! ^^b", alias)
}

pub fn format_remove_alias_fail(alias: &str) -> String {
    format!("Sorry, I can't find an alias named **{}**...", alias)
}

/// Formats the result of a resistance check.
///
/// The reply always starts with both inputs, followed by the outcome.
///
/// # Examples
///
/// ```ignore
/// # use cocbot::commands::markdown_response::format_resist;
/// # use cocbot::commands::actions::ResistOutcome;
/// let msg = format_resist(50, 49, ResistOutcome::Normal(55));
/// assert!(msg.contains("55"));
/// ```
pub fn format_resist(active: i64, passive: i64, outcome: ResistOutcome) -> String {
    let thinking = format!(
        "Let's see...\nActive: **{}**\nPassive: **{}**\n",
        active, passive
    );

    let verdict = match outcome {
        ResistOutcome::AutomaticSuccess => {
            "The result is an **Automatic Success**!! \\(^o^)/".to_owned()
        }
        ResistOutcome::AutomaticFailure => {
            "The result is an **Automatic Failure**!! (´・ω・`)".to_owned()
        }
        ResistOutcome::Normal(result) => format!("The result is **{}** !! （｀・ω・´）", result),
    };

    format!("{thinking}{verdict}")
}

/// Formats the reply sent when the alias database fails.
pub fn format_generic_failure() -> String {
    "Sorry, something went wrong... (´・ω・`)".to_owned()
}
