//! Matrix client creation and authentication.
//!
//! On the first start the bot logs in with its password and persists the
//! resulting session. On later starts the session is restored from disk, so
//! the bot keeps the same device and does not accumulate logins.
//!
//! The SDK state lives in an SQLite store encrypted with the configured
//! passphrase.

use anyhow::bail;
use log::{debug, info};
use matrix_sdk::{Client, ruma::OwnedUserId};

use crate::matrix::{UserCredentials, session::SessionStore};

/// Device name shown in the account's session list.
const DEVICE_DISPLAY_NAME: &str = "cocbot";

async fn build_client(
    user_id: &OwnedUserId,
    user_credentials: &UserCredentials,
    session_store: &SessionStore,
) -> Result<Client, anyhow::Error> {
    let client = Client::builder()
        .server_name(user_id.server_name())
        .sqlite_store(
            session_store.sqlite_path(),
            Some(&user_credentials.passphrase),
        )
        .build()
        .await?;

    debug!("matrix client created");
    Ok(client)
}

async fn create_session(
    user_credentials: &UserCredentials,
    session_store: &SessionStore,
) -> Result<Client, anyhow::Error> {
    let user_id: OwnedUserId = user_credentials.user_id.clone().try_into()?;
    let client = build_client(&user_id, user_credentials, session_store).await?;

    client
        .matrix_auth()
        .login_username(&user_id, &user_credentials.password)
        .initial_device_display_name(DEVICE_DISPLAY_NAME)
        .send()
        .await?;

    let Some(user_session) = client.matrix_auth().session() else {
        bail!("no user session after login");
    };
    session_store.persist_user_session(&user_session).await?;

    info!("logged in as {}", user_id);
    Ok(client)
}

async fn restore_session(
    user_credentials: &UserCredentials,
    session_store: &SessionStore,
) -> Result<Client, anyhow::Error> {
    info!("restoring matrix session from disk");

    let Some(user_session) = session_store.user_session() else {
        bail!("no stored session to restore");
    };

    let user_id: OwnedUserId = user_credentials.user_id.clone().try_into()?;
    if user_session.meta.user_id != user_id {
        bail!(
            "stored session belongs to {}, not {}",
            user_session.meta.user_id,
            user_id
        );
    }

    let client = build_client(&user_id, user_credentials, session_store).await?;
    client.restore_session(user_session.clone()).await?;

    info!("matrix session restored successfully");
    Ok(client)
}

/// Returns a logged-in client, restoring the stored session when there is one.
pub async fn setup_client(
    user_credentials: &UserCredentials,
    session_store: &SessionStore,
) -> Result<Client, anyhow::Error> {
    info!(
        "setting up matrix client for user {}",
        user_credentials.user_id
    );

    if session_store.has_session() {
        restore_session(user_credentials, session_store).await
    } else {
        create_session(user_credentials, session_store).await
    }
}
