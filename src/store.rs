use crate::error::StoreError;
use crate::models::StorageRef;
use crate::paths::FolderPath;

/// Structural mutations the navigator asks of the note store.
///
/// Each call either fully succeeds or fails; the navigator never retries and
/// never inspects the error beyond its message.
#[allow(async_fn_in_trait)]
pub trait NoteStore {
    async fn create_folder(&self, storage: &StorageRef, path: &FolderPath) -> Result<(), StoreError>;

    async fn rename_folder(
        &self,
        storage: &StorageRef,
        old_path: &FolderPath,
        new_path: &FolderPath,
    ) -> Result<(), StoreError>;

    async fn rename_storage(&self, storage: &StorageRef, name: &str) -> Result<(), StoreError>;

    async fn remove_storage(&self, storage: &StorageRef) -> Result<(), StoreError>;

    async fn sync_storage(&self, storage: &StorageRef) -> Result<(), StoreError>;
}
