//! User-initiated sidebar flows.
//!
//! Each flow runs one action end to end: dialog, validation, store call,
//! then navigation and tree reveal or a notice. Failures never escape a flow;
//! the returned [`FlowOutcome`] says how it ended.

pub mod folders;
pub mod storage;

#[cfg(test)]
pub(crate) mod fakes;

pub use folders::*;
pub use storage::*;

use crate::collaborators::{Dialog, IdentityProvider, Notifier, Router, TreeExpansion};
use crate::config::Messages;
use crate::controller;
use crate::menu::{self, FolderAction, HeaderControl, MenuItem, StorageAction};
use crate::models::{FlowOutcome, NavigationOutcome, Notice, StorageCounts, StorageInfo, StorageRef};
use crate::paths::FolderPath;
use crate::routes::{self, ActivePages, SidebarEntry};
use crate::store::NoteStore;

/// Drives the sidebar of storages against its collaborators
pub struct StorageNavigator<D, S, R, X, N, I> {
    dialog: D,
    store: S,
    router: R,
    expansion: X,
    notifier: N,
    identity: I,
    messages: Messages,
}

impl<D, S, R, X, N, I> StorageNavigator<D, S, R, X, N, I>
where
    D: Dialog,
    S: NoteStore,
    R: Router,
    X: TreeExpansion,
    N: Notifier,
    I: IdentityProvider,
{
    /// Creates a navigator that uses the default messages.
    pub fn new(dialog: D, store: S, router: R, expansion: X, notifier: N, identity: I) -> Self {
        Self {
            dialog,
            store,
            router,
            expansion,
            notifier,
            identity,
            messages: Messages::default(),
        }
    }

    /// Replaces every user-facing string, e.g. with the ones from
    /// [`NavigatorConfig`](crate::config::NavigatorConfig).
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn dialog(&self) -> &D {
        &self.dialog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn expansion(&self) -> &X {
        &self.expansion
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Entries of the storage header's context menu, in display order.
    pub fn storage_context_menu(&self) -> Vec<MenuItem<StorageAction>> {
        menu::storage_context_menu(&self.messages)
    }

    pub fn folder_context_menu(&self) -> Vec<MenuItem<FolderAction>> {
        menu::folder_context_menu(&self.messages)
    }

    /// Active fixed pages of `storage` for the router's current location.
    pub fn active_pages(&self, storage: &StorageRef) -> ActivePages {
        controller::active_pages(&self.router.current_pathname(), storage)
    }

    /// Fixed page entries to render under `storage`.
    ///
    /// # Arguments
    /// * `storage` - The storage being rendered
    /// * `counts` - Attachment and trash counts deciding which pages show
    ///
    /// # Returns
    /// "All Notes" first, then attachments and trash when non-empty
    pub fn sidebar_entries(&self, storage: &StorageRef, counts: StorageCounts) -> Vec<SidebarEntry> {
        routes::sidebar_entries(
            storage,
            &self.router.current_pathname(),
            counts,
            &self.messages.sidebar,
        )
    }

    /// Runs the flow behind a storage context-menu entry.
    pub async fn run_storage_action(&self, storage: &StorageInfo, action: StorageAction) -> FlowOutcome {
        match action {
            StorageAction::RenameStorage => self.rename_storage(storage).await,
            StorageAction::RemoveStorage => self.remove_storage(storage).await,
        }
    }

    /// Runs the flow behind a control in the storage header. Creating a
    /// folder from the header starts at the root.
    pub async fn run_header_control(&self, storage: &StorageInfo, control: HeaderControl) -> FlowOutcome {
        match control {
            HeaderControl::CreateFolder => self.create_folder(&storage.id, &FolderPath::root()).await,
            HeaderControl::Sync => self.sync_storage(storage).await,
            HeaderControl::OpenSettings => self.open_settings(&storage.id),
        }
    }

    /// Runs the flow behind a folder context-menu entry.
    pub async fn run_folder_action(
        &self,
        storage: &StorageRef,
        folder: &FolderPath,
        action: FolderAction,
    ) -> FlowOutcome {
        match action {
            FolderAction::CreateFolder => self.create_folder(storage, folder).await,
            FolderAction::RenameFolder => self.rename_folder(storage, folder).await,
        }
    }

    /// Moves the view to a successful outcome's target and reveals it in the
    /// tree, or reports the failure with `failure_description`.
    fn follow(&self, outcome: NavigationOutcome, failure_description: &str) -> FlowOutcome {
        match outcome {
            NavigationOutcome::Navigate { target, expansion } => {
                self.router.push(&target.pathname());
                self.expansion.open_recursively(&expansion);
                FlowOutcome::Navigated(target)
            }
            NavigationOutcome::Failed { error } => {
                log::error!("Folder mutation failed: {}", error);
                self.report(&self.messages.error_title, failure_description);
                FlowOutcome::Failed(error)
            }
        }
    }

    fn report(&self, title: &str, description: &str) {
        self.notifier.push_message(Notice::new(title, description));
    }
}
