//! Key-value storage for cart snapshots.
//!
//! The cart persists itself into a string-keyed, string-valued store, the
//! same shape as a browser's local storage. All backends implement
//! [`KeyValueStore`]:
//!
//! - [`MemoryStore`] - `HashMap`-backed, for tests, sessions and embedding
//! - [`FileStore`] - one file per key under a root directory
//!
//! Calls are synchronous. A backend never interprets the values it holds.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors from key-value storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error from the underlying backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used by this backend.
    #[error("invalid storage key {0:?}: use ASCII letters, digits, '-' or '_'")]
    InvalidKey(String),

    /// A writer panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A synchronous string-keyed key-value store.
///
/// Implementations must satisfy:
/// - `get` after `set` on the same key returns the value that was set.
/// - `get` on a key that was never set, or was removed, returns `Ok(None)`.
/// - `remove` on a missing key is not an error.
/// - I/O errors are propagated, never silently ignored.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}
