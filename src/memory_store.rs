use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{StorageInfo, StorageRef};
use crate::paths::FolderPath;
use crate::store::NoteStore;

/// A mutation as received by [`MemoryStore`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreCall {
    CreateFolder {
        storage: StorageRef,
        path: FolderPath,
    },
    RenameFolder {
        storage: StorageRef,
        old_path: FolderPath,
        new_path: FolderPath,
    },
    RenameStorage {
        storage: StorageRef,
        name: String,
    },
    RemoveStorage(StorageRef),
    SyncStorage(StorageRef),
}

/// In-memory contents of one storage
#[derive(Clone, Debug, PartialEq)]
pub struct StorageRecord {
    pub name: String,
    /// Non-root folders; the root always exists.
    pub folders: BTreeSet<FolderPath>,
    pub synced_at: Option<DateTime<Utc>>,
}

impl StorageRecord {
    pub fn has_folder(&self, path: &FolderPath) -> bool {
        path.is_root() || self.folders.contains(path)
    }
}

/// NoteStore keeping folder trees in memory.
///
/// Creating a folder also creates its missing ancestors. Creating an existing
/// folder, or renaming onto one, fails with [`StoreError::FolderExists`].
/// Every call is recorded, and a failure can be queued for the next call.
#[derive(Debug, Default)]
pub struct MemoryStore {
    storages: RwLock<HashMap<StorageRef, StorageRecord>>,
    calls: Mutex<Vec<StoreCall>>,
    next_failure: Mutex<Option<StoreError>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty storage under a fresh id.
    pub async fn add_storage(&self, name: impl Into<String>) -> StorageInfo {
        let id = StorageRef::new(Uuid::new_v4().to_string());
        let name = name.into();
        self.storages.write().await.insert(
            id.clone(),
            StorageRecord {
                name: name.clone(),
                folders: BTreeSet::new(),
                synced_at: None,
            },
        );
        StorageInfo { id, name }
    }

    pub async fn storage(&self, storage: &StorageRef) -> Option<StorageRecord> {
        self.storages.read().await.get(storage).cloned()
    }

    pub async fn has_folder(&self, storage: &StorageRef, path: &FolderPath) -> bool {
        self.storages
            .read()
            .await
            .get(storage)
            .is_some_and(|record| record.has_folder(path))
    }

    /// Every mutation received so far, in order.
    pub async fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().await.clone()
    }

    /// Makes the next mutation fail with `error` without touching any data.
    pub async fn fail_next(&self, error: StoreError) {
        *self.next_failure.lock().await = Some(error);
    }

    async fn record(&self, call: StoreCall) -> Result<(), StoreError> {
        self.calls.lock().await.push(call);
        match self.next_failure.lock().await.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn not_found(storage: &StorageRef) -> StoreError {
    StoreError::StorageNotFound(storage.to_string())
}

impl NoteStore for MemoryStore {
    async fn create_folder(&self, storage: &StorageRef, path: &FolderPath) -> Result<(), StoreError> {
        self.record(StoreCall::CreateFolder {
            storage: storage.clone(),
            path: path.clone(),
        })
        .await?;

        let mut storages = self.storages.write().await;
        let record = storages.get_mut(storage).ok_or_else(|| not_found(storage))?;
        if record.has_folder(path) {
            return Err(StoreError::FolderExists(path.to_string()));
        }
        record.folders.extend(path.ancestors());
        Ok(())
    }

    async fn rename_folder(
        &self,
        storage: &StorageRef,
        old_path: &FolderPath,
        new_path: &FolderPath,
    ) -> Result<(), StoreError> {
        self.record(StoreCall::RenameFolder {
            storage: storage.clone(),
            old_path: old_path.clone(),
            new_path: new_path.clone(),
        })
        .await?;

        let mut storages = self.storages.write().await;
        let record = storages.get_mut(storage).ok_or_else(|| not_found(storage))?;
        if old_path.is_root() || !record.folders.contains(old_path) {
            return Err(StoreError::FolderNotFound(old_path.to_string()));
        }
        if record.has_folder(new_path) {
            return Err(StoreError::FolderExists(new_path.to_string()));
        }

        let moved: Vec<FolderPath> = record
            .folders
            .iter()
            .filter(|folder| folder.is_within(old_path))
            .cloned()
            .collect();
        for folder in &moved {
            record.folders.remove(folder);
        }
        for folder in &moved {
            if let Some(rebased) = folder.rebase(old_path, new_path) {
                record.folders.insert(rebased);
            }
        }
        record.folders.extend(new_path.ancestors());
        Ok(())
    }

    async fn rename_storage(&self, storage: &StorageRef, name: &str) -> Result<(), StoreError> {
        self.record(StoreCall::RenameStorage {
            storage: storage.clone(),
            name: name.to_string(),
        })
        .await?;

        let mut storages = self.storages.write().await;
        let record = storages.get_mut(storage).ok_or_else(|| not_found(storage))?;
        record.name = name.to_string();
        Ok(())
    }

    async fn remove_storage(&self, storage: &StorageRef) -> Result<(), StoreError> {
        self.record(StoreCall::RemoveStorage(storage.clone())).await?;

        self.storages
            .write()
            .await
            .remove(storage)
            .map(|_| ())
            .ok_or_else(|| not_found(storage))
    }

    async fn sync_storage(&self, storage: &StorageRef) -> Result<(), StoreError> {
        self.record(StoreCall::SyncStorage(storage.clone())).await?;

        let mut storages = self.storages.write().await;
        let record = storages.get_mut(storage).ok_or_else(|| not_found(storage))?;
        record.synced_at = Some(Utc::now());
        Ok(())
    }
}
