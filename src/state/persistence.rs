//! Durable mirror of the session in origin-scoped key-value storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only the session store and the gateway touch this module. UI code reads the
//! session from the store's in-memory state, never from storage directly.
//!
//! TRADE-OFFS
//! ==========
//! Storage is best-effort: a failed write is logged and the in-memory session
//! stays authoritative for the rest of the page's lifetime.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::warn;
use thiserror::Error;

use crate::net::types::{Credential, User};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage rejected write to `{key}`")]
    WriteRejected { key: String },
}

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the backing store refuses the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str);
}

/// In-memory store. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// `window.localStorage`. Inert outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage().ok_or(StorageError::Unavailable)?;
            storage
                .set_item(key, value)
                .map_err(|_| StorageError::WriteRejected { key: key.to_owned() })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

/// Credential and user record as last written to storage.
///
/// May be stale; it is only a hint until the server confirms it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistedSession {
    pub credential: Credential,
    pub user: User,
}

/// Reads and writes the persisted session under the fixed `token`/`user` keys.
#[derive(Clone)]
pub struct Persistence {
    store: Rc<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn save(&self, credential: &Credential, user: &User) {
        let raw_user = match serde_json::to_string(user) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("persistence: failed to serialize user record: {e}");
                return;
            }
        };
        for (key, value) in [(TOKEN_KEY, credential.as_str()), (USER_KEY, raw_user.as_str())] {
            if let Err(e) = self.store.set(key, value) {
                warn!("persistence: {e}");
            }
        }
    }

    /// The persisted session, or `None` when either key is missing, the token
    /// is empty, or the user record does not parse.
    pub fn load(&self) -> Option<PersistedSession> {
        let credential = self.credential()?;
        let raw_user = self.store.get(USER_KEY)?;
        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some(PersistedSession { credential, user }),
            Err(e) => {
                warn!("persistence: stored user record is corrupt: {e}");
                None
            }
        }
    }

    /// The stored token alone, as attached to outgoing requests.
    pub fn credential(&self) -> Option<Credential> {
        self.store.get(TOKEN_KEY).and_then(Credential::new)
    }

    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
    }
}
