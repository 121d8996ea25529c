//! Static term dictionary.
//!
//! The dictionary maps a canonical, lowercased term to its definition. It is
//! loaded once at startup from a JSON object and then shared read-only by every
//! command handler:
//!
//! ```json
//! {
//!   "spot hidden": "Spot Hidden (25%): allows the user to spot a secret door...",
//!   "sanity": "Sanity points measure the stability of an investigator's mind..."
//! }
//! ```

use std::collections::{BTreeMap, HashMap, hash_map::Entry};

use log::{info, warn};
use thiserror::Error;
use tokio::fs;

/// Errors raised while loading the dictionary file.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The dictionary file could not be read
    #[error("failed to read dictionary file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    /// The dictionary file is not a JSON object of strings
    #[error("failed to parse dictionary file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Immutable term to definition mapping.
#[derive(Debug, Default)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    /// Builds a dictionary from `(term, definition)` pairs.
    ///
    /// Terms are lowercased. When two terms collide after lowercasing, the first
    /// one wins and the collision is logged.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = HashMap::new();

        for (term, definition) in entries {
            match map.entry(term.to_lowercase()) {
                Entry::Vacant(slot) => {
                    slot.insert(definition);
                }
                Entry::Occupied(slot) => {
                    warn!("duplicate dictionary term {:?}, keeping the first one", slot.key());
                }
            }
        }

        Dictionary { entries: map }
    }

    /// Loads the dictionary from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Read`] if the file cannot be read and
    /// [`DictionaryError::Parse`] if it is not a flat JSON object of strings.
    pub async fn load(path: &str) -> Result<Self, DictionaryError> {
        let serialized = fs::read_to_string(path)
            .await
            .map_err(|source| DictionaryError::Read {
                path: path.to_owned(),
                source,
            })?;

        // Sorted keys make the duplicate resolution deterministic
        let entries: BTreeMap<String, String> =
            serde_json::from_str(&serialized).map_err(|source| DictionaryError::Parse {
                path: path.to_owned(),
                source,
            })?;

        let dictionary = Dictionary::from_entries(entries);
        if dictionary.is_empty() {
            warn!("dictionary {} has no terms, every find will fail", path);
        } else {
            info!("loaded {} dictionary terms from {}", dictionary.len(), path);
        }

        Ok(dictionary)
    }

    /// Returns the definition of `term`. The lookup is exact: callers lowercase.
    pub fn get(&self, term: &str) -> Option<&str> {
        self.entries.get(term).map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
