//! Sidebar navigation core for note storages.
//!
//! Keeps the folder tree, the active-page highlight and the structural
//! mutations a user can start from the sidebar consistent with each other.

pub mod collaborators;
pub mod config;
pub mod controller;
pub mod error;
pub mod flows;
pub mod memory_store;
pub mod menu;
pub mod models;
pub mod paths;
pub mod routes;
pub mod sidenav;
pub mod store;

pub use collaborators::{Dialog, IdentityProvider, Notifier, Router, TreeExpansion};
pub use config::{Messages, NavigatorConfig};
pub use error::{PathError, StateError, StoreError};
pub use flows::StorageNavigator;
pub use memory_store::MemoryStore;
pub use models::{
    ExpansionRequest, FlowOutcome, Identity, NavigationOutcome, NavigationTarget, Notice, StorageInfo,
    StorageRef, SyncGate,
};
pub use paths::{FolderPath, RenameTarget};
pub use sidenav::SideNavState;
pub use store::NoteStore;
