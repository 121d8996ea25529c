//! SQLite backed alias store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info, trace, warn};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};

use crate::alias::{ALIAS_COLLECTION, StoreError};

/// Transactional alias store.
///
/// Holds one SQLite connection behind a mutex: transactions are serialized,
/// which is plenty for a chat bot and makes every `update` atomic with respect
/// to the others.
pub struct AliasStore {
    connection: Mutex<Connection>,
}

/// View of the `alias` collection scoped to one transaction.
pub struct AliasBucket<'a> {
    connection: &'a Connection,
}

impl AliasStore {
    /// Opens (or creates) the alias database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the file cannot be opened or the
    /// collection cannot be created.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        info!("opening alias database at {}", path);
        Self::init(Connection::open(path)?)
    }

    /// Opens a throwaway in-memory alias database.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(connection: Connection) -> Result<Self, StoreError> {
        connection.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {ALIAS_COLLECTION} (
                    key TEXT PRIMARY KEY NOT NULL,
                    value TEXT NOT NULL
                )"
            ),
            [],
        )?;

        Ok(AliasStore {
            connection: Mutex::new(connection),
        })
    }

    /// Runs `f` inside a read transaction.
    ///
    /// The transaction is always rolled back, so writes attempted from a view
    /// are discarded.
    pub fn view<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&AliasBucket<'_>) -> Result<T, StoreError>,
    {
        let mut connection = self.lock();
        let transaction = connection.transaction_with_behavior(TransactionBehavior::Deferred)?;
        trace!("read transaction started");

        let result = f(&AliasBucket {
            connection: &transaction,
        });

        result
    }

    /// Runs `f` inside a write transaction.
    ///
    /// The transaction is committed if `f` returns `Ok`. On `Err` it is rolled
    /// back and the error is returned unchanged.
    pub fn update<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&AliasBucket<'_>) -> Result<T, StoreError>,
    {
        let mut connection = self.lock();
        let transaction = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;
        trace!("write transaction started");

        let result = f(&AliasBucket {
            connection: &transaction,
        });

        match result {
            Ok(value) => {
                transaction.commit()?;
                trace!("write transaction committed");
                Ok(value)
            }
            Err(e) => {
                debug!("rolling back write transaction: {}", e);
                Err(e)
            }
        }
    }

    /// Locks the connection, recovering it if a previous holder panicked.
    ///
    /// The transaction of the panicking holder was rolled back when dropped, so
    /// the connection is left without any pending change.
    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.connection.lock().unwrap_or_else(|poisoned| {
            warn!("recovering alias connection after a panic");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl AliasBucket<'_> {
    /// Returns the target stored for `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .connection
            .query_row(
                &format!("SELECT value FROM {ALIAS_COLLECTION} WHERE key = ?1"),
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.connection.execute(
            &format!("INSERT OR REPLACE INTO {ALIAS_COLLECTION} (key, value) VALUES (?1, ?2)"),
            params![key, value],
        )?;

        Ok(())
    }

    /// Deletes `key`. Returns whether a row was removed.
    pub fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let removed = self.connection.execute(
            &format!("DELETE FROM {ALIAS_COLLECTION} WHERE key = ?1"),
            params![key],
        )?;

        Ok(removed > 0)
    }

    /// Number of aliases in the collection.
    #[cfg(test)]
    pub fn len(&self) -> Result<usize, StoreError> {
        let count: i64 = self.connection.query_row(
            &format!("SELECT COUNT(*) FROM {ALIAS_COLLECTION}"),
            [],
            |row| row.get(0),
        )?;

        Ok(count as usize)
    }
}
