//! Matrix protocol integration for the bot.
//!
//! The bot only needs a small slice of Matrix:
//! - Password login, then session restoration on later starts
//! - Auto-joining the rooms it is invited to
//! - Receiving text messages and answering them with threaded replies
//!
//! # Architecture
//!
//! - **Login**: client creation against the encrypted SQLite store (login submodule)
//! - **Session**: persistence of the access token and sync token (session submodule)
//! - **Sync**: event handlers and the sync loop (sync submodule)
//!
//! The rest of the bot never touches the SDK: it receives [`IncomingMessage`]
//! values and answers through the [`Responder`] trait.

use mockall::automock;

mod client;
mod login;
mod session;
mod sync;

pub use crate::matrix::client::MatrixClient;

/// User credentials for a Matrix account
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// User ID of the matrix account
    pub user_id: String,
    /// Password of the matrix account
    pub password: String,
    /// Passphrase encrypting the local SQLite store
    pub passphrase: String,
}

/// A text message received in a joined room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Plain text body of the message
    pub body: String,
    /// Room the message was sent in
    pub room_id: String,
    /// Author of the message
    pub sender_id: String,
    /// Event ID of the message, used to thread the reply
    pub event_id: String,
}

/// Sends replies back to the chat platform.
#[automock]
pub trait Responder {
    /// Posts `body` as a Markdown reply to `message`.
    ///
    /// Delivery failures are logged, never returned.
    async fn send_reply(&self, message: &IncomingMessage, body: &str);
}
