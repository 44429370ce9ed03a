//! Key-value persistence for browser-style local state.
//!
//! The storefront keeps exactly two records between invocations, the cart and
//! the signed-in user, each stored as JSON text under a fixed key (see
//! [`crate::models::session::keys`]). Everything that reads or writes them goes
//! through the [`KeyValueStore`] trait so the backing store can be swapped:
//!
//! - [`MemoryStore`] - process-local map, used by tests
//! - [`FileStore`] - a single JSON file on disk, used by the CLI

mod file;
mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a store backend.
///
/// Malformed *record contents* are not errors; see [`load_json`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized.
    #[error("failed to encode record {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Lock poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Text-keyed storage with get/set/remove semantics.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Load and decode a JSON record.
///
/// An absent key and an undecodable value both yield `None`; the latter is
/// logged so a corrupted record is visible without breaking the caller.
///
/// # Errors
///
/// Returns `StoreError` only if the backend itself fails.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed stored record");
            Ok(None)
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StoreError` if encoding or the backend write fails.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, &raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_json_absent_is_none() {
        let store = MemoryStore::new();
        let value: Option<Vec<u32>> = load_json(&store, "cart").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_load_json_malformed_is_none() {
        let store = MemoryStore::new();
        store.set("cart", "{not json").unwrap();
        let value: Option<Vec<u32>> = load_json(&store, "cart").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        save_json(&store, "numbers", &[1_u32, 2, 3]).unwrap();
        let value: Option<Vec<u32>> = load_json(&store, "numbers").unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_arc_store_delegates() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let shared = std::sync::Arc::clone(&store);
        shared.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
