use std::fmt;

use serde::{Deserialize, Serialize};

use crate::paths::FolderPath;
use crate::routes;

/// Identifier of a storage container.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct StorageRef(String);

impl StorageRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Header data of a storage shown in the sidebar
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StorageInfo {
    pub id: StorageRef,
    pub name: String,
}

impl StorageInfo {
    pub fn new(id: StorageRef, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Item counts that decide which optional sidebar entries are shown
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StorageCounts {
    pub attachments: usize,
    pub trashed_notes: usize,
}

/// The signed-in user. Only its presence matters to the navigator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
}

/// Where the view should move after a successful mutation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NavigationTarget {
    pub storage: StorageRef,
    pub path: FolderPath,
}

impl NavigationTarget {
    pub fn pathname(&self) -> String {
        routes::notes_pathname(&self.storage, &self.path)
    }
}

/// Asks the tree view to expand every ancestor of `path` in `storage`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExpansionRequest {
    pub storage: StorageRef,
    pub path: FolderPath,
}

impl ExpansionRequest {
    /// Folder prefixes that must render expanded, shallowest first.
    pub fn ancestors(&self) -> Vec<FolderPath> {
        self.path.ancestors()
    }
}

/// Result of a folder mutation as seen by the view
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum NavigationOutcome {
    Navigate {
        target: NavigationTarget,
        expansion: ExpansionRequest,
    },
    Failed {
        error: String,
    },
}

impl NavigationOutcome {
    pub fn reveal(storage: &StorageRef, path: &FolderPath) -> Self {
        Self::Navigate {
            target: NavigationTarget {
                storage: storage.clone(),
                path: path.clone(),
            },
            expansion: ExpansionRequest {
                storage: storage.clone(),
                path: path.clone(),
            },
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }
}

/// Decision of the sync guard
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncGate {
    Allowed,
    Denied(String),
}

/// User-visible failure notice
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// How a user-initiated flow ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Mutation succeeded and the view moved to the target.
    Navigated(NavigationTarget),
    /// Action finished with nothing to navigate to.
    Completed,
    /// A dialog was dismissed.
    Cancelled,
    /// The input asked for no change.
    NoOp,
    /// Action not permitted; a notice was shown.
    Denied(String),
    /// Input was invalid; a notice was shown.
    Rejected(String),
    /// The store call failed; a notice was shown.
    Failed(String),
}
