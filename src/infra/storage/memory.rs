use crate::{
    application::storage::{
        StorageInterface,
        interface::{StorageError, StorageResult},
    },
    domain::FileName,
};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// Storage kept entirely in memory. Can be told to fail specific operations.
#[derive(Default)]
pub struct MemoryStorage {
    files: RwLock<HashMap<FileName, Vec<u8>>>,
    fail_reads: bool,
    fail_reads_for: HashSet<FileName>,
    fail_writes: bool,
    fail_deletes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Fails reads of the given names only; every other read behaves normally.
    pub fn failing_reads_for(names: impl IntoIterator<Item = FileName>) -> Self {
        Self {
            fail_reads_for: names.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::default()
        }
    }

    pub async fn insert(&self, name: FileName, contents: Vec<u8>) {
        self.files.write().await.insert(name, contents);
    }

    pub async fn get(&self, name: &FileName) -> Option<Vec<u8>> {
        self.files.read().await.get(name).cloned()
    }
}

#[async_trait::async_trait]
impl StorageInterface for MemoryStorage {
    async fn read_bytes(&self, name: &FileName) -> StorageResult<Vec<u8>> {
        if self.fail_reads || self.fail_reads_for.contains(name) {
            return Err(StorageError::new("read failure"));
        }

        self.get(name).await.ok_or(StorageError::NotFound)
    }

    async fn write_bytes(&self, name: &FileName, contents: &[u8]) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::new("write failure"));
        }

        self.insert(name.clone(), contents.to_vec()).await;
        Ok(())
    }

    async fn delete(&self, name: &FileName) -> StorageResult<()> {
        if self.fail_deletes {
            return Err(StorageError::new("delete failure"));
        }

        self.files
            .write()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    async fn exists(&self, name: &FileName) -> bool {
        self.files.read().await.contains_key(name)
    }

    async fn list(&self) -> StorageResult<Vec<FileName>> {
        let mut names: Vec<_> = self.files.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
