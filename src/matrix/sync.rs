//! Sync loop and room event handlers.
//!
//! [`MatrixSync::sync`] first catches up with the homeserver without handling
//! messages, so commands sent while the bot was offline are never answered.
//! Pending invites are still accepted. Only then is the message handler
//! registered and the endless sync loop started.
//!
//! The sync token is written to the session file after every response, so a
//! restart resumes where the previous run stopped.

use anyhow::Result;
use std::sync::Arc;

use log::{debug, error, info, warn};
use matrix_sdk::{
    Client, LoopCtrl, Room, RoomState,
    config::SyncSettings,
    ruma::{
        api::client::filter::FilterDefinition,
        events::room::{
            member::StrippedRoomMemberEvent,
            message::{MessageType, OriginalSyncRoomMessageEvent},
        },
    },
};
use tokio::time::{Duration, sleep};

use crate::matrix::{IncomingMessage, session::SessionStore};

/// Delay between two attempts of the catch-up sync.
const CATCH_UP_RETRY_DELAY: Duration = Duration::from_secs(5);
/// First delay before retrying to join a room, doubled after each failure.
const JOIN_RETRY_INITIAL_DELAY: u64 = 2;
/// Joining is abandoned once the retry delay exceeds this many seconds.
const JOIN_RETRY_MAX_DELAY: u64 = 3600;

pub struct MatrixSync {
    client: Client,
    session_store: SessionStore,
}

impl MatrixSync {
    pub fn new(client: &Client, session_store: &SessionStore) -> Self {
        MatrixSync {
            client: client.clone(),
            session_store: session_store.clone(),
        }
    }

    /// Runs the sync loop, calling `on_message` for each new text message.
    ///
    /// Only returns when the homeserver connection fails for good.
    pub async fn sync<F>(&self, on_message: F) -> Result<()>
    where
        F: Fn(IncomingMessage) + Send + Sync + 'static,
    {
        self.client.add_event_handler(on_invite);

        // Lazy-load room members, the bot never needs the full member lists
        let filter = FilterDefinition::with_lazy_loading();
        let mut settings = SyncSettings::default().filter(filter.into());
        if let Some(token) = self.session_store.sync_token() {
            debug!("resuming sync from stored token");
            settings = settings.token(token);
        }

        let next_batch = self.catch_up(settings.clone()).await;
        self.persist_token(next_batch.clone()).await;

        let on_message = Arc::new(on_message);
        self.client.add_event_handler(
            move |event: OriginalSyncRoomMessageEvent, room: Room, client: Client| {
                let on_message = Arc::clone(&on_message);
                async move { on_room_message(event, room, client, on_message.as_ref()) }
            },
        );

        info!("listening to room messages");

        self.client
            .sync_with_result_callback(settings.token(next_batch), |sync_result| async move {
                let response = sync_result?;
                self.persist_token(response.next_batch).await;
                Ok(LoopCtrl::Continue)
            })
            .await?;

        Ok(())
    }

    /// Syncs once, retrying until the homeserver answers, and returns the next
    /// batch token.
    async fn catch_up(&self, settings: SyncSettings) -> String {
        loop {
            match self.client.sync_once(settings.clone()).await {
                Ok(response) => return response.next_batch,
                Err(e) => {
                    error!("catch-up sync failed: {e}, retrying");
                    sleep(CATCH_UP_RETRY_DELAY).await;
                }
            }
        }
    }

    async fn persist_token(&self, next_batch: String) {
        if let Err(e) = self.session_store.persist_sync_token(next_batch).await {
            error!("failed to persist sync token: {:?}", e);
        }
    }
}

async fn on_invite(member: StrippedRoomMemberEvent, client: Client, room: Room) {
    let Some(own_id) = client.user_id() else {
        warn!("invite received before login completed");
        return;
    };

    if member.state_key != own_id {
        return;
    }

    tokio::spawn(join_with_backoff(room));
}

/// Joins `room`, doubling the delay between attempts.
///
/// Synapse can send the invite before the room is joinable, see
/// <https://github.com/matrix-org/synapse/issues/4345>.
async fn join_with_backoff(room: Room) {
    info!("joining room {}", room.room_id());
    let mut delay = JOIN_RETRY_INITIAL_DELAY;

    loop {
        match room.join().await {
            Ok(_) => {
                info!("joined room {}", room.room_id());
                return;
            }
            Err(e) if delay > JOIN_RETRY_MAX_DELAY => {
                error!("giving up joining room {}: {:?}", room.room_id(), e);
                return;
            }
            Err(e) => {
                warn!(
                    "failed to join room {} ({:?}), retrying in {}s",
                    room.room_id(),
                    e,
                    delay
                );
                sleep(Duration::from_secs(delay)).await;
                delay *= 2;
            }
        }
    }
}

fn on_room_message<F>(event: OriginalSyncRoomMessageEvent, room: Room, client: Client, on_message: &F)
where
    F: Fn(IncomingMessage),
{
    if room.state() != RoomState::Joined {
        return;
    }

    let sent_by_bot = client
        .user_id()
        .is_some_and(|own_id| own_id.as_str() == event.sender.as_str());
    if sent_by_bot {
        return;
    }

    let MessageType::Text(text) = event.content.msgtype else {
        return;
    };

    debug!("message {} from {}", event.event_id, event.sender);

    on_message(IncomingMessage {
        body: text.body,
        room_id: room.room_id().to_string(),
        sender_id: event.sender.to_string(),
        event_id: event.event_id.to_string(),
    });
}
