//! Durable Local Storage
//!
//! A minimal string key-value capability injected into the state layer, with a
//! file-backed implementation for real use and an in-memory one for tests.

mod file;
mod memory;

pub use file::*;
pub use memory::*;

use crate::error::Result;

/// Process-wide string key-value store
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
