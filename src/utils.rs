//! Small helpers for paths and outgoing messages.

use std::path::PathBuf;

/// Longest reply the bot sends, in characters.
pub const MAX_REPLY_CHARS: usize = 2000;

/// Appended to replies cut at [`MAX_REPLY_CHARS`].
const ELLIPSIS: &str = "...";

/// Markdown code block delimiter.
const CODE_FENCE: &str = "```";

/// Joins a directory path with a subdirectory or file name.
///
/// Non UTF-8 components are replaced lossily.
///
/// # Examples
///
/// ```ignore
/// let path = get_path("/home/user", "config");
/// assert_eq!(path, "/home/user/config");
/// ```
pub fn get_path(dir_path: &str, subdir_path: &str) -> String {
    let path_buf: PathBuf = [dir_path, subdir_path].iter().collect();
    path_buf.to_string_lossy().into_owned()
}

/// Limits `body` to `max_chars` characters.
///
/// Longer bodies are cut on a character boundary and end with an ellipsis, the
/// ellipsis included in the limit. A code block left open by the cut is closed
/// after the ellipsis.
pub fn truncate_reply(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        return body.to_string();
    }

    let closing = format!("{ELLIPSIS}\n{CODE_FENCE}");
    let kept = max_chars.saturating_sub(closing.chars().count());
    let mut truncated: String = body.chars().take(kept).collect();

    // A fence split by the cut would render as stray backticks
    let without_partial_fence = truncated.trim_end_matches('`').len();
    truncated.truncate(without_partial_fence);

    if truncated.matches(CODE_FENCE).count() % 2 == 1 {
        truncated.push_str(&closing);
    } else {
        truncated.push_str(ELLIPSIS);
    }
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_path_simple() {
        let path = get_path("/home/user", "config");
        #[cfg(unix)]
        assert_eq!(path, "/home/user/config");
        #[cfg(windows)]
        assert_eq!(path, "\\home\\user\\config");
    }

    #[test]
    fn test_get_path_relative_paths() {
        let path = get_path(".", "alias.sqlite");
        #[cfg(unix)]
        assert_eq!(path, "./alias.sqlite");
        #[cfg(windows)]
        assert_eq!(path, ".\\alias.sqlite");
    }

    #[test]
    fn test_get_path_multiple_components() {
        let base = get_path("/srv", "cocbot");
        let final_path = get_path(&base, "session");
        #[cfg(unix)]
        assert_eq!(final_path, "/srv/cocbot/session");
        #[cfg(windows)]
        assert_eq!(final_path, "\\srv\\cocbot\\session");
    }

    #[test]
    fn test_truncate_reply_short_body_untouched() {
        assert_eq!(truncate_reply("hello", MAX_REPLY_CHARS), "hello");
        assert_eq!(truncate_reply("", MAX_REPLY_CHARS), "");
    }

    #[test]
    fn test_truncate_reply_exact_limit_untouched() {
        let body = "a".repeat(MAX_REPLY_CHARS);
        assert_eq!(truncate_reply(&body, MAX_REPLY_CHARS), body);
    }

    #[test]
    fn test_truncate_reply_long_body() {
        let body = "a".repeat(MAX_REPLY_CHARS + 1);

        let truncated = truncate_reply(&body, MAX_REPLY_CHARS);

        assert!(truncated.chars().count() <= MAX_REPLY_CHARS);
        assert!(truncated.ends_with("..."));
        assert!(!truncated.contains("```"));
    }

    #[test]
    fn test_truncate_reply_multibyte_characters() {
        let body = "（｀・ω・´）".repeat(500);

        let truncated = truncate_reply(&body, 10);

        assert_eq!(truncated, "（｀・...");
    }

    #[test]
    fn test_truncate_reply_closes_open_code_block() {
        let body = format!("I found **mythos**! ```{}```", "a".repeat(3000));

        let truncated = truncate_reply(&body, MAX_REPLY_CHARS);

        assert!(truncated.chars().count() <= MAX_REPLY_CHARS);
        assert!(truncated.starts_with("I found **mythos**! ```aaa"));
        assert!(truncated.ends_with("...\n```"));
        assert_eq!(truncated.matches("```").count(), 2);
    }

    #[test]
    fn test_truncate_reply_drops_split_fence() {
        // The cut lands inside the closing fence
        let body = format!("```{}``` and more text after it", "a".repeat(10));

        let truncated = truncate_reply(&body, 22);

        assert_eq!(truncated, format!("```{}...\n```", "a".repeat(10)));
    }
}
