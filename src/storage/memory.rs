//! In-memory key-value store, used as a test double and as a no-persistence
//! fallback when no data directory is available.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::storage::KeyValueStore;

/// HashMap-backed store with optional write-failure injection
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    failing_writes: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` writes fail, to exercise retry paths
    pub fn fail_next_writes(&self, count: u32) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    /// Read a stored value without going through the async trait
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("store mutex poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let remaining = self.failing_writes.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failing_writes.store(remaining - 1, Ordering::SeqCst);
            return Err(anyhow!("injected write failure"));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("store mutex poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
