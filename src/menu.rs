//! Tagged action lists behind the sidebar's menus and header buttons.

use serde::Serialize;

use crate::config::Messages;

/// Entries of the storage header's context menu
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum StorageAction {
    RenameStorage,
    RemoveStorage,
}

impl StorageAction {
    pub const ALL: [StorageAction; 2] = [Self::RenameStorage, Self::RemoveStorage];

    pub fn label(self, messages: &Messages) -> &str {
        match self {
            Self::RenameStorage => &messages.rename_storage_label,
            Self::RemoveStorage => &messages.remove_storage_label,
        }
    }
}

/// Buttons on the storage header
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HeaderControl {
    /// Create a folder under the root
    CreateFolder,
    Sync,
    OpenSettings,
}

impl HeaderControl {
    pub const ALL: [HeaderControl; 3] = [Self::CreateFolder, Self::Sync, Self::OpenSettings];
}

/// Entries of a folder's context menu
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FolderAction {
    /// Create a folder under this one
    CreateFolder,
    RenameFolder,
}

impl FolderAction {
    pub const ALL: [FolderAction; 2] = [Self::CreateFolder, Self::RenameFolder];

    pub fn label(self, messages: &Messages) -> &str {
        match self {
            Self::CreateFolder => &messages.create_folder_title,
            Self::RenameFolder => &messages.rename_folder_title,
        }
    }
}

/// A labelled menu entry
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct MenuItem<A> {
    pub label: String,
    pub action: A,
}

pub fn storage_context_menu(messages: &Messages) -> Vec<MenuItem<StorageAction>> {
    StorageAction::ALL
        .into_iter()
        .map(|action| MenuItem {
            label: action.label(messages).to_string(),
            action,
        })
        .collect()
}

pub fn folder_context_menu(messages: &Messages) -> Vec<MenuItem<FolderAction>> {
    FolderAction::ALL
        .into_iter()
        .map(|action| MenuItem {
            label: action.label(messages).to_string(),
            action,
        })
        .collect()
}
