//! Configuration file structures for CocBot.
//!
//! The configuration is a YAML file split into two sections: Matrix account
//! settings and bot settings. Every value can be overridden by an environment
//! variable with the `COCBOT_` prefix, nested keys being separated by `__`.
//!
//! # Configuration File Format
//!
//! ```yaml
//! matrix:
//!   # Fully qualified Matrix user ID for the bot account
//!   user_id: "@cocbot:matrix.org"
//!   # Matrix account password
//!   password: "secret-password"
//!   # Passphrase encrypting the local Matrix store
//!   passphrase: "store-passphrase"
//!
//! bot:
//!   # First word of every command (optional, defaults to "!coc")
//!   prefix: "!coc"
//!   # JSON object mapping terms to their definition
//!   dictionary_path: "./data.json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export COCBOT_MATRIX__PASSWORD="secret-from-env"
//! export COCBOT_BOT__DICTIONARY_PATH="/srv/cocbot/data.json"
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Prefix of the environment variables overriding the file.
const ENV_PREFIX: &str = "COCBOT_";

/// Command prefix used when the configuration does not set one.
pub const DEFAULT_PREFIX: &str = "!coc";

/// Root configuration structure for CocBot.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Matrix account configuration
    pub matrix: Matrix,
    /// Bot behavior configuration
    pub bot: BotSettings,
}

impl Config {
    /// Loads the configuration from a YAML file, then applies the environment
    /// overrides on top of it.
    ///
    /// # Errors
    ///
    /// Fails if the file is not valid YAML or a required value is missing from
    /// both the file and the environment.
    pub fn load(path: &str) -> Result<Config, anyhow::Error> {
        let config = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(config)
    }
}

/// Matrix account configuration.
#[derive(Debug, Deserialize)]
pub struct Matrix {
    /// Fully qualified Matrix user ID, like `@cocbot:matrix.org`.
    pub user_id: String,

    /// Matrix account password.
    ///
    /// Used for initial login. After successful authentication, the session
    /// is persisted and the bot can restore without re-authenticating.
    pub password: String,

    /// Passphrase encrypting the SQLite store of the Matrix SDK.
    pub passphrase: String,
}

/// Bot behavior configuration.
#[derive(Debug, Deserialize)]
pub struct BotSettings {
    /// First token a message must start with to be a command.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Path to the JSON dictionary of terms.
    pub dictionary_path: String,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}
