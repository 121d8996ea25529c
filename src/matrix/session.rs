use std::path::{Path, PathBuf};

use tokio::fs;

use log::{debug, trace};
use matrix_sdk::authentication::matrix::MatrixSession;
use serde::{Deserialize, Serialize};

/// Session data persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    /// Authentication state returned by the homeserver at login.
    user_session: MatrixSession,

    /// The latest sync token for resuming sync operations.
    ///
    /// Omitted from serialization when `None` to keep the file clean.
    #[serde(skip_serializing_if = "Option::is_none")]
    sync_token: Option<String>,
}

/// Persists Matrix authentication state between runs.
///
/// # File Structure
///
/// The session directory contains:
/// - `session`: JSON file with the user session and the last sync token
/// - `sqlite`: encrypted SQLite database owned by the Matrix SDK
#[derive(Clone)]
pub struct SessionStore {
    /// The stored session, if the bot already logged in once.
    session: Option<StoredSession>,
    /// Path to the SDK store. Value is `dir_path/sqlite`
    sqlite_path: PathBuf,
    /// Path to the session file. Value is `dir_path/session`
    session_path: PathBuf,
}

impl SessionStore {
    /// Opens the session directory, creating it if needed.
    ///
    /// A missing or unreadable session file is not an error: the bot simply
    /// logs in again.
    pub async fn open(dir_path: &str) -> Result<SessionStore, anyhow::Error> {
        debug!("read session at {}", dir_path);

        fs::create_dir_all(dir_path).await?;

        let sqlite_path = Path::new(dir_path).join("sqlite");
        let session_path = Path::new(dir_path).join("session");

        let session = match SessionStore::read_session(&session_path).await {
            Ok(session) => Some(session),
            Err(e) => {
                debug!("no usable session at {}: {}", session_path.display(), e);
                None
            }
        };

        Ok(SessionStore {
            session,
            sqlite_path,
            session_path,
        })
    }

    async fn read_session(session_path: &Path) -> Result<StoredSession, anyhow::Error> {
        if !fs::try_exists(session_path).await.unwrap_or_default() {
            return Err(anyhow::anyhow!("session file does not exist"));
        }

        let session_data = fs::read_to_string(session_path).await?;
        let session: StoredSession = serde_json::from_str(&session_data)?;
        Ok(session)
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn sqlite_path(&self) -> &Path {
        &self.sqlite_path
    }

    pub fn user_session(&self) -> Option<&MatrixSession> {
        self.session.as_ref().map(|s| &s.user_session)
    }

    pub fn sync_token(&self) -> Option<String> {
        self.session.as_ref().and_then(|s| s.sync_token.clone())
    }

    /// Writes a fresh session file, dropping any previous sync token.
    pub async fn persist_user_session(&self, user_session: &MatrixSession) -> anyhow::Result<()> {
        trace!("persist user session");

        let session = StoredSession {
            user_session: user_session.clone(),
            sync_token: None,
        };

        fs::write(&self.session_path, serde_json::to_string(&session)?).await?;

        trace!("user session persisted");
        Ok(())
    }

    /// Updates the sync token of the session file on disk.
    pub async fn persist_sync_token(&self, sync_token: String) -> anyhow::Result<()> {
        trace!("persist sync token {}", sync_token);

        let mut session = SessionStore::read_session(&self.session_path).await?;
        session.sync_token = Some(sync_token);
        fs::write(&self.session_path, serde_json::to_string(&session)?).await?;

        trace!("sync token persisted");
        Ok(())
    }
}
