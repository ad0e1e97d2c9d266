//! Durable storage of drawer state.
//!
//! The engine talks to a [`StateStore`], a plain string key-value medium
//! (browser `localStorage`, a directory of JSON files, an in-memory map).
//! [`save`] and [`load`] handle the blob format and the recovery policy:
//! a missing or corrupt blob is "no prior state", never an error.

mod errors;
mod file;
mod memory;
mod model;

pub use errors::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use model::{PersistPolicy, PersistedState};

/// Prefix used when none is configured.
pub const FALLBACK_KEY_PREFIX: &str = "sd-";

/// String key-value medium backing persisted drawer state.
///
/// Implementations must not call back into the drawer engine.
pub trait StateStore {
    /// Return the value stored at `key`, or `None` when absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored at `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: StateStore + ?Sized> StateStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// Storage key for a configured prefix: `"<prefix>-state"`.
pub fn state_key(prefix: Option<&str>) -> String {
    let prefix = prefix
        .filter(|prefix| !prefix.is_empty())
        .unwrap_or(FALLBACK_KEY_PREFIX);
    format!("{prefix}-state")
}

/// Serialize `state` and overwrite the blob at `key`.
pub fn save<S: StateStore + ?Sized>(
    store: &mut S,
    key: &str,
    state: &PersistedState,
) -> Result<(), StorageError> {
    let payload = serde_json::to_string(state)?;
    store.write(key, &payload)
}

/// Read the blob at `key`.
///
/// Missing entries, read failures and undecodable blobs all yield `None`.
pub fn load<S: StateStore + ?Sized>(
    store: &S,
    key: &str,
) -> Option<PersistedState> {
    let payload = match store.read(key) {
        Ok(Some(payload)) => payload,
        Ok(None) => return None,
        Err(err) => {
            log::warn!("failed to read drawer state at {key:?}: {err}");
            return None;
        },
    };

    match serde_json::from_str(&payload) {
        Ok(state) => Some(state),
        Err(err) => {
            log::warn!("ignoring corrupt drawer state at {key:?}: {err}");
            None
        },
    }
}
