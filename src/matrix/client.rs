//! Matrix client wrapper for bot messaging and synchronization.
//!
//! This module provides a high-level [`MatrixClient`] interface that wraps the
//! Matrix SDK client and handles message sending, synchronization, and session management.

use log::{error, info, warn};
use matrix_sdk::{
    Client,
    ruma::{
        EventId, RoomId, UserId,
        events::room::message::{
            AddMentions, ForwardThread, ReplyMetadata, RoomMessageEventContent,
        },
    },
};

use crate::matrix::{
    IncomingMessage, Responder, UserCredentials, login::setup_client, session::SessionStore,
    sync::MatrixSync,
};

/// Display name set on the bot account at startup.
const DISPLAY_NAME: &str = "CocBot";

/// High-level Matrix client for bot messaging operations.
///
/// Manages a Matrix SDK client with synchronization capabilities and answers
/// messages with threaded replies.
pub struct MatrixClient {
    /// Synchronization service for handling real-time events
    matrix_sync: MatrixSync,
    /// Underlying Matrix SDK client
    client: Client,
}

impl MatrixClient {
    /// Creates and logs in a new Matrix client.
    ///
    /// # Arguments
    ///
    /// * `user_credentials` - User ID, password and store passphrase
    /// * `session_path` - Directory holding the session file and SQLite store
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be read, or if login
    /// or session restoration fails.
    pub async fn new(
        user_credentials: &UserCredentials,
        session_path: &str,
    ) -> Result<Self, anyhow::Error> {
        let session_store = SessionStore::open(session_path).await?;

        let client = setup_client(user_credentials, &session_store)
            .await
            .inspect_err(|e| error!("failed to setup matrix client: {:?}", e))?;

        if let Err(e) = client.account().set_display_name(Some(DISPLAY_NAME)).await {
            warn!("failed to set display name: {:?}", e);
        }

        let matrix_sync = MatrixSync::new(&client, &session_store);

        Ok(MatrixClient {
            matrix_sync,
            client,
        })
    }

    /// Starts the Matrix synchronization loop.
    ///
    /// `on_message` is invoked for each new text message in a joined room that
    /// was not sent by the bot itself. Runs until the sync loop fails.
    pub async fn sync<F>(&self, on_message: F) -> Result<(), anyhow::Error>
    where
        F: Fn(IncomingMessage) + Send + Sync + 'static,
    {
        match self.matrix_sync.sync(on_message).await {
            Ok(_) => info!("matrix sync ended successfully"),
            Err(e) => {
                error!("matrix sync ended with error: {:?}", e);
                return Err(e);
            }
        }

        Ok(())
    }

    /// Internal helper to send message content to a room.
    async fn send(&self, room_id: &str, content: RoomMessageEventContent) {
        let room_id = match RoomId::parse(room_id) {
            Ok(room_id) => room_id,
            Err(e) => {
                error!("invalid room id {}: {:?}", room_id, e);
                return;
            }
        };

        let Some(room) = self.client.get_room(&room_id) else {
            warn!("room {} is not known by the client", room_id);
            return;
        };

        if let Err(e) = room.send(content).await {
            error!("Failed to send message: {:?}", e);
        }
    }
}

impl Responder for MatrixClient {
    /// Sends a Markdown reply to `message`, without mentioning its author.
    async fn send_reply(&self, message: &IncomingMessage, body: &str) {
        let (sender, event) = match (
            UserId::parse(&message.sender_id),
            EventId::parse(&message.event_id),
        ) {
            (Ok(sender), Ok(event)) => (sender, event),
            (sender, event) => {
                error!(
                    "cannot reply to {} from {}: {:?} {:?}",
                    message.event_id,
                    message.sender_id,
                    sender.err(),
                    event.err()
                );
                return;
            }
        };

        let content = RoomMessageEventContent::text_markdown(body).make_reply_to(
            ReplyMetadata::new(&event, &sender, None),
            ForwardThread::No,
            AddMentions::No,
        );

        self.send(&message.room_id, content).await;
    }
}
