//! Persistent alias storage.
//!
//! Aliases are alternate names for dictionary terms (`san` for `sanity`). They
//! live in a single collection named `alias` of an embedded SQLite database,
//! mapping a lowercased alias to a lowercased target term.
//!
//! # Transactions
//!
//! Every access goes through a transaction, bbolt style:
//!
//! - [`AliasStore::view`] runs a closure inside a read transaction
//! - [`AliasStore::update`] runs a closure inside a write transaction that is
//!   committed when the closure returns `Ok` and rolled back otherwise
//!
//! The closure receives an `AliasBucket` exposing `get`, `put` and `delete`.
//! Check-then-act sequences must run inside a single `update` so that two
//! concurrent `add-alias` calls can't both see a missing alias.
//!
//! ```ignore
//! use cocbot::alias::AliasStore;
//!
//! # fn example() -> Result<(), cocbot::alias::StoreError> {
//! let store = AliasStore::open("alias.sqlite")?;
//!
//! let inserted = store.update(|bucket| {
//!     if bucket.get("san")?.is_some() {
//!         return Ok(false);
//!     }
//!     bucket.put("san", "sanity")?;
//!     Ok(true)
//! })?;
//! # Ok(())
//! # }
//! ```

mod store;

use thiserror::Error;

pub use crate::alias::store::AliasStore;

/// Name of the collection holding the aliases.
pub const ALIAS_COLLECTION: &str = "alias";

/// Errors raised by the alias store.
///
/// Any error returned inside a transaction aborts it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying SQLite database failed
    #[error("alias database error: {0}")]
    Database(#[from] rusqlite::Error),
}
