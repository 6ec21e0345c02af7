//! Path-tree controller: the decisions behind every sidebar mutation.
//!
//! Everything here is either pure or a single awaited store call. The
//! controller owns no state, so a failed call leaves nothing to roll back.

use crate::models::{ExpansionRequest, Identity, NavigationOutcome, StorageRef, SyncGate};
use crate::paths::FolderPath;
use crate::routes::ActivePages;
use crate::store::NoteStore;

pub use crate::paths::{compute_rename_target, normalize_create_path, RenameTarget};

/// Reason given when sync is attempted while signed out.
pub const NO_IDENTITY_REASON: &str = "no authenticated identity";

/// Index of the "remove" button in the remove-storage message box.
pub const REMOVE_BUTTON_INDEX: usize = 0;

/// Index of the "cancel" button in the remove-storage message box.
pub const CANCEL_BUTTON_INDEX: usize = 1;

/// Renames a folder and, once the store acknowledges, reveals the new path.
pub async fn apply_rename<S: NoteStore>(
    store: &S,
    storage: &StorageRef,
    old_path: &FolderPath,
    new_path: &FolderPath,
) -> NavigationOutcome {
    match store.rename_folder(storage, old_path, new_path).await {
        Ok(()) => NavigationOutcome::reveal(storage, new_path),
        Err(e) => NavigationOutcome::failed(e.to_string()),
    }
}

/// Creates a folder and, once the store acknowledges, reveals it.
pub async fn apply_create<S: NoteStore>(
    store: &S,
    storage: &StorageRef,
    path: &FolderPath,
) -> NavigationOutcome {
    match store.create_folder(storage, path).await {
        Ok(()) => NavigationOutcome::reveal(storage, path),
        Err(e) => NavigationOutcome::failed(e.to_string()),
    }
}

/// Sync needs a signed-in user; nothing else about the identity matters.
pub fn gate_sync(identity: Option<&Identity>) -> SyncGate {
    match identity {
        Some(_) => SyncGate::Allowed,
        None => SyncGate::Denied(NO_IDENTITY_REASON.to_string()),
    }
}

/// Only an explicit press of the "remove" button authorizes removal.
pub fn confirm_remove_storage(confirmation: Option<usize>) -> bool {
    confirmation == Some(REMOVE_BUTTON_INDEX)
}

/// Which fixed pages of `storage` the current location highlights.
///
/// # Arguments
/// * `current_pathname` - The location the view is showing
/// * `storage` - The storage rendered in the sidebar
///
/// # Returns
/// The active flags; see [`ActivePages::compute`]
pub fn active_pages(current_pathname: &str, storage: &StorageRef) -> ActivePages {
    ActivePages::compute(current_pathname, storage)
}

/// Storage and path the tree must reveal for an outcome, if any.
pub fn expansion_for(outcome: &NavigationOutcome) -> Option<&ExpansionRequest> {
    match outcome {
        NavigationOutcome::Navigate { expansion, .. } => Some(expansion),
        NavigationOutcome::Failed { .. } => None,
    }
}
