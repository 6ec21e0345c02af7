//! Canonical location strings and tree item ids for a storage.

use serde::{Deserialize, Serialize};

use crate::models::{StorageCounts, StorageRef};
use crate::paths::FolderPath;

/// Prefix of every storage location.
pub const STORAGES_ROUTE: &str = "/app/storages";

/// Prefix of the note segment that may trail a folder location.
const NOTE_SEGMENT_PREFIX: &str = "note:";

/// Storage settings page.
pub fn storage_pathname(storage: &StorageRef) -> String {
    format!("{}/{}", STORAGES_ROUTE, storage)
}

/// Notes list of a folder. The root folder maps to the "All Notes" page.
pub fn notes_pathname(storage: &StorageRef, path: &FolderPath) -> String {
    if path.is_root() {
        format!("{}/notes", storage_pathname(storage))
    } else {
        format!("{}/notes{}", storage_pathname(storage), path)
    }
}

/// "All Notes" page of a storage, the notes list of its root folder.
pub fn all_notes_pathname(storage: &StorageRef) -> String {
    notes_pathname(storage, &FolderPath::root())
}

/// Trashed notes of a storage.
///
/// # Arguments
/// * `storage` - The storage whose trash is shown
///
/// # Returns
/// `/app/storages/<id>/trashcan`
pub fn trashcan_pathname(storage: &StorageRef) -> String {
    format!("{}/trashcan", storage_pathname(storage))
}

/// Attachments page of a storage.
pub fn attachments_pathname(storage: &StorageRef) -> String {
    format!("{}/attachments", storage_pathname(storage))
}

/// Tree item id of a storage node, e.g. `storage:s1`.
pub fn storage_item_id(storage: &StorageRef) -> String {
    format!("storage:{}", storage)
}

/// Tree item id of a folder node.
///
/// Ids of descendants extend the id of their ancestor, so
/// `storage:s1/folder:/a` prefixes `storage:s1/folder:/a/b`.
pub fn folder_item_id(storage: &StorageRef, path: &FolderPath) -> String {
    format!("{}/folder:{}", storage_item_id(storage), path)
}

/// Drops a trailing `/note:<id>` segment so an open note does not change
/// which page is considered active.
pub fn pathname_without_note_id(pathname: &str) -> &str {
    match pathname.rsplit_once('/') {
        Some((rest, last)) if last.starts_with(NOTE_SEGMENT_PREFIX) => rest,
        _ => pathname,
    }
}

/// Fixed pages listed under every storage
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SidebarPage {
    AllNotes,
    Trashcan,
    Attachments,
}

impl SidebarPage {
    /// Location of this page in `storage`.
    pub fn pathname(self, storage: &StorageRef) -> String {
        match self {
            Self::AllNotes => all_notes_pathname(storage),
            Self::Trashcan => trashcan_pathname(storage),
            Self::Attachments => attachments_pathname(storage),
        }
    }
}

/// Which fixed page matches the current location.
///
/// Only exact equality counts; a folder under `.../notes` does not make
/// "All Notes" active.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivePages {
    pub all_notes: bool,
    pub trashcan: bool,
    pub attachments: bool,
}

impl ActivePages {
    /// Compares `current_pathname`, minus any open note, against each page.
    ///
    /// # Arguments
    /// * `current_pathname` - The location the view is showing
    /// * `storage` - The storage whose pages are checked
    ///
    /// # Returns
    /// One flag per fixed page, at most one of them set
    pub fn compute(current_pathname: &str, storage: &StorageRef) -> Self {
        let current = pathname_without_note_id(current_pathname);
        Self {
            all_notes: current == all_notes_pathname(storage),
            trashcan: current == trashcan_pathname(storage),
            attachments: current == attachments_pathname(storage),
        }
    }

    /// Flag for a single page.
    pub fn is_active(&self, page: SidebarPage) -> bool {
        match page {
            SidebarPage::AllNotes => self.all_notes,
            SidebarPage::Trashcan => self.trashcan,
            SidebarPage::Attachments => self.attachments,
        }
    }
}

/// A fixed page entry as the sidebar should render it
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SidebarEntry {
    pub page: SidebarPage,
    pub label: String,
    pub pathname: String,
    pub active: bool,
}

/// Fixed page entries for a storage.
///
/// "All Notes" is always listed; attachments and trash only when they have
/// content.
pub fn sidebar_entries(
    storage: &StorageRef,
    current_pathname: &str,
    counts: StorageCounts,
    labels: &SidebarLabels,
) -> Vec<SidebarEntry> {
    let active = ActivePages::compute(current_pathname, storage);
    let mut pages = vec![(SidebarPage::AllNotes, &labels.all_notes)];
    if counts.attachments > 0 {
        pages.push((SidebarPage::Attachments, &labels.attachments));
    }
    if counts.trashed_notes > 0 {
        pages.push((SidebarPage::Trashcan, &labels.trash));
    }
    pages
        .into_iter()
        .map(|(page, label)| SidebarEntry {
            page,
            label: label.clone(),
            pathname: page.pathname(storage),
            active: active.is_active(page),
        })
        .collect()
}

/// Display labels of the fixed pages
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct SidebarLabels {
    pub all_notes: String,
    pub attachments: String,
    pub trash: String,
}

impl Default for SidebarLabels {
    fn default() -> Self {
        Self {
            all_notes: "All Notes".to_string(),
            attachments: "Attachments".to_string(),
            trash: "Trash".to_string(),
        }
    }
}
