//! Message tokenizer.
//!
//! Splits a raw message body into the tokens understood by the dispatcher.
//! A token is one of:
//! - a run of non-whitespace, non-quote characters ending on a word boundary
//! - a literal colon
//! - a double-quoted span, quotes included
//! - a single operator character (`= ! & | ~ + - * / %`)
//!
//! Adjacent words, colons and quoted spans glue together into a single token,
//! so `name:"two words"` is one token.

use log::trace;
use regex_lite::Regex;

/// Pattern matching every token of a message.
const TOKEN_PATTERN: &str = r#"(?i)(?:[^\s"]+\b|:|(")[^"]*("))+|[=!&|~+\-*/%]"#;

/// Regex based message splitter.
///
/// The compiled pattern is immutable, so a single tokenizer can be shared by
/// every message handler.
#[derive(Debug)]
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    /// Compiles the token pattern.
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in pattern fails to compile.
    pub fn new() -> Result<Self, regex_lite::Error> {
        Ok(Tokenizer {
            pattern: Regex::new(TOKEN_PATTERN)?,
        })
    }

    /// Returns every token of `body`, in order and verbatim.
    ///
    /// Characters that no alternative of the pattern accepts (a lone `.`, an
    /// unterminated quote...) are skipped.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// # use cocbot::commands::tokenizer::Tokenizer;
    /// let tokenizer = Tokenizer::new().unwrap();
    /// assert_eq!(tokenizer.tokenize("@bot find cats"), vec!["@bot", "find", "cats"]);
    /// ```
    pub fn tokenize(&self, body: &str) -> Vec<String> {
        let tokens: Vec<String> = self
            .pattern
            .find_iter(body)
            .map(|m| m.as_str().to_owned())
            .collect();

        trace!("tokenized {:?} into {:?}", body, tokens);

        tokens
    }
}
