//! # Storage Module
//!
//! Durable key-value storage behind an async trait. Values are opaque JSON
//! snapshots keyed by a fixed storage name per store; durability is only as
//! good as the underlying platform provides.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use anyhow::Result;
use async_trait::async_trait;

/// Asynchronous key-value store collaborator.
///
/// `get` returns `None` for unknown keys; `set` overwrites unconditionally.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
