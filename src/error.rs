use thiserror::Error;

/// Rejection of user-entered folder paths and leaf names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Path must start with '/': '{0}'")]
    NotRooted(String),
    #[error("Path contains an empty segment: '{0}'")]
    EmptySegment(String),
    #[error("Path contains invalid traversal segment '{segment}': '{path}'")]
    Traversal { path: String, segment: String },
    #[error("Folder name contains invalid separator '/': '{0}'")]
    SeparatorInLeaf(String),
    #[error("Folder name '{0}' is reserved")]
    ReservedLeaf(String),
    #[error("The root folder cannot be renamed")]
    RootNotRenamable,
}

/// Failure reported by a store collaborator.
///
/// The flows never interpret these beyond their message; they are logged and
/// turned into a user notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Storage not found: {0}")]
    StorageNotFound(String),
    #[error("Folder not found: {0}")]
    FolderNotFound(String),
    #[error("Folder already exists: {0}")]
    FolderExists(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Failures loading or persisting side-nav state and configuration.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to access state file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse state file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not determine data directory")]
    NoDataDir,
}
