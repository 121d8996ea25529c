//! Bot module wiring Matrix messages to the command pipeline.
//!
//! This module provides the main [`Bot`] implementation. It owns the loaded
//! dictionary, the alias store and the Matrix client, and turns every incoming
//! message into at most one reply.
//!
//! # Command Processing Flow
//!
//! ```text
//! Matrix Message → Commander::handle → truncate_reply → Responder::send_reply
//! ```
//!
//! Each message is processed in its own task, so a slow reply never delays the
//! sync loop. Concurrent alias writes are serialized by the alias store.

use log::{debug, info};
use std::sync::Arc;
use tokio::fs;

use crate::{
    Args,
    alias::AliasStore,
    commands::{CommandContext, Commander},
    config::Config,
    dictionary::Dictionary,
    matrix::{IncomingMessage, MatrixClient, Responder, UserCredentials},
    utils::{MAX_REPLY_CHARS, get_path, truncate_reply},
};

/// Main bot structure connecting Matrix to the command handlers.
///
/// # Thread Safety
///
/// Everything is shared through `Arc` with the per-message tasks. The dictionary
/// is read-only after startup and the alias store synchronizes itself, so no
/// extra lock is needed here.
pub struct Bot {
    /// Matrix client for receiving messages and sending replies.
    matrix_client: Arc<MatrixClient>,

    /// Command parser and executor. Stateless and can be safely shared.
    commander: Arc<Commander>,

    /// Term definitions loaded at startup.
    dictionary: Arc<Dictionary>,

    /// Persistent alias to term mapping.
    alias_store: Arc<AliasStore>,
}

impl Bot {
    /// Creates a new Bot instance from configuration and command line arguments.
    ///
    /// The dictionary is loaded and the alias store opened before logging in,
    /// so a bad data file fails fast without touching the homeserver.
    ///
    /// # Data directory layout
    ///
    /// - `alias.sqlite` - alias store
    /// - `session/` - Matrix session file and SDK store
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The dictionary cannot be read or is not a JSON object of strings
    /// - The alias store cannot be opened
    /// - Matrix login or session restoration fails
    pub async fn new(config: Config, args: Args) -> Result<Self, anyhow::Error> {
        let dictionary = Dictionary::load(&config.bot.dictionary_path).await?;

        fs::create_dir_all(&args.data).await?;
        let alias_store = AliasStore::open(&get_path(&args.data, "alias.sqlite"))?;

        let commander = Commander::new(&config.bot.prefix)?;
        info!("answering commands starting with {}", config.bot.prefix);

        let matrix_client = MatrixClient::new(
            &UserCredentials {
                user_id: config.matrix.user_id,
                password: config.matrix.password,
                passphrase: config.matrix.passphrase,
            },
            &get_path(&args.data, "session"),
        )
        .await?;

        Ok(Bot {
            matrix_client: Arc::new(matrix_client),
            commander: Arc::new(commander),
            dictionary: Arc::new(dictionary),
            alias_store: Arc::new(alias_store),
        })
    }

    /// Starts listening to Matrix and answering commands.
    ///
    /// Runs until the Matrix sync loop stops.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the sync loop.
    pub async fn start(self) -> Result<(), anyhow::Error> {
        let matrix_client = Arc::clone(&self.matrix_client);
        let commander = Arc::clone(&self.commander);
        let dictionary = Arc::clone(&self.dictionary);
        let alias_store = Arc::clone(&self.alias_store);

        let on_message = move |message: IncomingMessage| {
            let matrix_client = Arc::clone(&matrix_client);
            let commander = Arc::clone(&commander);
            let dictionary = Arc::clone(&dictionary);
            let alias_store = Arc::clone(&alias_store);

            tokio::spawn(async move {
                let context = CommandContext {
                    dictionary: &dictionary,
                    alias_store: &alias_store,
                };
                handle_message(matrix_client.as_ref(), &commander, &context, &message).await;
            });
        };

        self.matrix_client.sync(on_message).await
    }
}

/// Processes one message and sends its reply, if any.
///
/// Unknown commands and messages for other bots get no reply. Replies longer
/// than [`MAX_REPLY_CHARS`] are truncated.
async fn handle_message<R: Responder>(
    responder: &R,
    commander: &Commander,
    context: &CommandContext<'_>,
    message: &IncomingMessage,
) {
    let Some(reply) = commander.handle(&message.body, context) else {
        return;
    };

    debug!(
        "replying to {} in {} ({} chars)",
        message.event_id,
        message.room_id,
        reply.chars().count()
    );

    let reply = truncate_reply(&reply, MAX_REPLY_CHARS);
    responder.send_reply(message, &reply).await;
}
