//! CocBot - A Matrix bot for Call of Cthulhu tabletop sessions.
//!
//! # Overview
//!
//! CocBot sits in Matrix rooms and answers a handful of commands: rule and term
//! lookups from a JSON dictionary, user-defined aliases for those terms, and
//! resistance checks from the Call of Cthulhu resistance table.
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! matrix:
//!   user_id: "@cocbot:matrix.org"
//!   password: "your-password"
//!   passphrase: "your-store-passphrase"
//!
//! bot:
//!   prefix: "!coc"
//!   dictionary_path: "./data.json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the `COCBOT_` prefix:
//!
//! ```bash
//! export COCBOT_MATRIX__USER_ID="@cocbot:matrix.org"
//! export COCBOT_MATRIX__PASSWORD="your-password"
//! export COCBOT_BOT__DICTIONARY_PATH="./data.json"
//! ```
//!
//! # Usage
//!
//! ```bash
//! cocbot --config config.yaml --data ./cocbot-data
//! ```
//!
//! # Bot Commands
//!
//! - `!coc help` - Display help information
//! - `!coc version` - Display the bot version
//! - `!coc find <term>` - Look a term up
//! - `!coc add-alias <alias> = <term>` - Create an alias
//! - `!coc get-alias <alias>` - Show what an alias points to
//! - `!coc remove-alias <alias>` - Delete an alias
//! - `!coc resist <active> vs <passive>` - Resistance check
//!
//! # Architecture
//!
//! - [`alias`] - Transactional alias store backed by SQLite
//! - [`bot`] - Wiring between Matrix messages and commands
//! - [`commands`] - Tokenizing, parsing and executing commands
//! - [`config`] - YAML configuration with environment variable support
//! - [`dictionary`] - Read-only term dictionary
//! - [`matrix`] - Matrix client integration and session management
//! - [`utils`] - Path and reply helpers
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod alias;
mod bot;
mod commands;
mod config;
mod dictionary;
mod matrix;
mod utils;

/// Command-line arguments for CocBot.
///
/// # Examples
///
/// ```bash
/// cocbot --config config.yaml --data ./cocbot-data
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// Values can be overridden with `COCBOT_` environment variables, for
    /// example `COCBOT_MATRIX__PASSWORD`.
    #[arg(short, long)]
    config: String,

    /// Path to the directory for storing persistent data.
    ///
    /// This directory will contain:
    /// - `alias.sqlite` - The alias store
    /// - `session/` - Matrix session data (access token, encrypted SDK store)
    ///
    /// The access token allows impersonating the bot: restrict the permissions
    /// of this directory.
    #[arg(short, long)]
    data: String,
}

/// Main entry point for CocBot.
///
/// 1. Configures the logger with `info` level by default
/// 2. Parses command-line arguments
/// 3. Loads the configuration file and environment overrides
/// 4. Loads the dictionary, opens the alias store and logs in to Matrix
/// 5. Answers commands until the sync loop stops
///
/// Startup failures are logged and end the process.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting cocbot {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    let bot = match Bot::new(config, args).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {:#}", e);
            return;
        }
    };

    if let Err(e) = bot.start().await {
        error!("Bot stopped: {:#}", e);
    }
}
