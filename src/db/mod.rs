// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Raw key/value storage backing the workout repository.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage keys as constants.
pub mod keys {
    /// The whole workout collection, serialized as one text blob.
    pub const WORKOUTS: &str = "workouts";
}

/// String storage keyed by a fixed identifier, like browser local storage.
pub trait KeyValueStorage {
    /// Returns `None` when nothing is stored under `key`.
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_string(key)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_string(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Boxed storage used by the server so the backend can be picked at startup.
pub type SharedStorage = Box<dyn KeyValueStorage + Send>;

/// Errors from the raw storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}
