//! File-backed key-value store: one JSON file per key under a data directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use tokio::fs;

use crate::storage::KeyValueStore;

/// Stores each key as `<root>/<key>.json`
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`, creating the directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .with_context(|| format!("creating storage directory {}", root.display()))?;
        Ok(FileStore { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        // Write a sibling temp file first so a crash mid-write never
        // truncates the previous snapshot.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("replacing {}", path.display()))?;
        debug!("Wrote {} byte(s) to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("touchbase-test-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let store = FileStore::open(scratch_dir()).await.unwrap();
        store.set("contact-storage", r#"{"contacts":[]}"#).await.unwrap();
        let value = store.get("contact-storage").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"contacts":[]}"#));
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let store = FileStore::open(scratch_dir()).await.unwrap();
        assert_eq!(store.get("theme-storage").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = FileStore::open(scratch_dir()).await.unwrap();
        store.set("theme-storage", "a").await.unwrap();
        store.set("theme-storage", "b").await.unwrap();
        assert_eq!(store.get("theme-storage").await.unwrap().as_deref(), Some("b"));
    }
}
