// src/storage/mod.rs
//
// Durable key-value backends and the snapshot slot that sits on top of them.

pub mod file;
pub mod memory;
pub mod slot;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use slot::{Persistence, StorageSlot};

use crate::error::AppError;

/// Minimal string key-value store the snapshot is persisted into.
pub trait KeyValueStorage {
    /// Returns the value under `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), AppError>;
}
