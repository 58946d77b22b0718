//! Key-value persistence
//!
//! The game core only needs `get`/`set` of string blobs under fixed keys.
//! Backends:
//! - `MemoryStorage`: in-process map (tests, headless sessions)
//! - `FileStorage`: one JSON file per key (native)
//! - `LocalStorage`: browser LocalStorage (wasm32)

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

/// Storage backend failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Backend is not reachable (no window, storage disabled, ...)
    Unavailable,
    /// Underlying I/O failed
    Io(String),
    /// Backend refused the write (quota, read-only, ...)
    Rejected(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Io(msg) => write!(f, "storage i/o error: {msg}"),
            Self::Rejected(msg) => write!(f, "storage rejected write: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Minimal key-value store holding opaque string blobs
pub trait Storage {
    /// Read the blob stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the blob stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
