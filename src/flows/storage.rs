use crate::collaborators::{
    Dialog, DialogIcon, IdentityProvider, MessageBoxSpec, Notifier, PromptSpec, Router, TreeExpansion,
};
use crate::config::Messages;
use crate::controller::{self, CANCEL_BUTTON_INDEX, REMOVE_BUTTON_INDEX};
use crate::flows::StorageNavigator;
use crate::models::{FlowOutcome, StorageInfo, StorageRef, SyncGate};
use crate::routes::{self, SidebarPage};
use crate::store::NoteStore;

/// Prompt asking for a storage's new name, pre-filled with the current one.
pub fn rename_storage_prompt(storage: &StorageInfo, messages: &Messages) -> PromptSpec {
    PromptSpec {
        title: format!("Rename \"{}\" storage", storage.name),
        message: messages.rename_storage_message.clone(),
        icon: DialogIcon::Question,
        default_value: storage.name.clone(),
        submit_label: messages.rename_storage_label.clone(),
    }
}

/// Confirmation box for removing a storage.
///
/// "Remove" sits at [`REMOVE_BUTTON_INDEX`] and is the default button;
/// "Cancel" sits at [`CANCEL_BUTTON_INDEX`].
pub fn remove_storage_message_box(storage: &StorageInfo, messages: &Messages) -> MessageBoxSpec {
    let mut buttons = vec![String::new(); 2];
    buttons[REMOVE_BUTTON_INDEX] = messages.remove_storage_label.clone();
    buttons[CANCEL_BUTTON_INDEX] = messages.cancel_label.clone();
    MessageBoxSpec {
        title: format!("Remove \"{}\" storage", storage.name),
        message: messages.remove_storage_message.clone(),
        icon: DialogIcon::Warning,
        buttons,
        default_button_index: REMOVE_BUTTON_INDEX,
        cancel_button_index: CANCEL_BUTTON_INDEX,
    }
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
    /// Prompts for a new storage name and renames the storage.
    ///
    /// A blank name is treated as no change. Any other value, including the
    /// current name, is passed to the store.
    ///
    /// # Arguments
    /// * `storage` - The storage whose header was right-clicked
    ///
    /// # Returns
    /// `Cancelled` when the prompt is dismissed, `NoOp` for a blank name,
    /// `Completed` on success, `Failed` after reporting a store error.
    pub async fn rename_storage(&self, storage: &StorageInfo) -> FlowOutcome {
        let Some(name) = self.dialog.prompt(rename_storage_prompt(storage, &self.messages)).await else {
            log::debug!("Rename of storage {} cancelled", storage.id);
            return FlowOutcome::Cancelled;
        };
        if name.trim().is_empty() {
            return FlowOutcome::NoOp;
        }

        log::info!("Renaming storage {} to '{}'", storage.id, name);
        match self.store.rename_storage(&storage.id, &name).await {
            Ok(()) => FlowOutcome::Completed,
            Err(e) => {
                log::error!("Failed to rename storage {}: {}", storage.id, e);
                self.report(&self.messages.error_title, &self.messages.rename_storage_failed);
                FlowOutcome::Failed(e.to_string())
            }
        }
    }

    /// Asks for confirmation, then removes the storage.
    ///
    /// Removal is fire-and-forget: the call is awaited only so store calls
    /// stay in order, and its result is logged, never reported or acted on.
    /// The sidebar learns about the removal from the store.
    pub async fn remove_storage(&self, storage: &StorageInfo) -> FlowOutcome {
        let choice = self
            .dialog
            .confirm(remove_storage_message_box(storage, &self.messages))
            .await;
        if !controller::confirm_remove_storage(choice) {
            log::debug!("Removal of storage {} not confirmed", storage.id);
            return FlowOutcome::Cancelled;
        }

        log::info!("Removing storage {}", storage.id);
        if let Err(e) = self.store.remove_storage(&storage.id).await {
            log::error!("Failed to remove storage {}: {}", storage.id, e);
        }
        FlowOutcome::Completed
    }

    /// Syncs the storage when a user is signed in.
    ///
    /// # Arguments
    /// * `storage` - The storage whose sync button was pressed
    ///
    /// # Returns
    /// `Denied` after a "No User Error" notice when nobody is signed in (the
    /// store is not called), `Completed` on success, `Failed` after reporting
    /// a store error.
    pub async fn sync_storage(&self, storage: &StorageInfo) -> FlowOutcome {
        let identity = self.identity.current_identity();
        if let SyncGate::Denied(reason) = controller::gate_sync(identity.as_ref()) {
            log::warn!("Sync of storage {} denied: {}", storage.id, reason);
            self.report(&self.messages.no_user_title, &self.messages.no_user_description);
            return FlowOutcome::Denied(reason);
        }

        log::info!("Syncing storage {}", storage.id);
        match self.store.sync_storage(&storage.id).await {
            Ok(()) => FlowOutcome::Completed,
            Err(e) => {
                log::error!("Failed to sync storage {}: {}", storage.id, e);
                self.report(&self.messages.error_title, &self.messages.sync_failed);
                FlowOutcome::Failed(e.to_string())
            }
        }
    }

    /// Navigates to one of the fixed pages of a storage.
    ///
    /// # Arguments
    /// * `storage` - The storage owning the page
    /// * `page` - All notes, trashcan or attachments
    pub fn open_page(&self, storage: &StorageRef, page: SidebarPage) -> FlowOutcome {
        self.router.push(&page.pathname(storage));
        FlowOutcome::Completed
    }

    /// Navigates to the storage settings page.
    pub fn open_settings(&self, storage: &StorageRef) -> FlowOutcome {
        self.router.push(&routes::storage_pathname(storage));
        FlowOutcome::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::flows::fakes::*;
    use crate::memory_store::{MemoryStore, StoreCall};
    use crate::menu::StorageAction;
    use crate::models::{Identity, Notice};

    fn identity() -> Option<Identity> {
        Some(Identity {
            user_id: "user-1".to_string(),
        })
    }

    #[test]
    fn test_remove_storage_message_box_layout() {
        let info = StorageInfo::new(StorageRef::new("s1"), "Work");
        let spec = remove_storage_message_box(&info, &Messages::default());
        assert_eq!(spec.title, "Remove \"Work\" storage");
        assert_eq!(spec.buttons, vec!["Remove Storage", "Cancel"]);
        assert_eq!(spec.default_button_index, 0);
        assert_eq!(spec.cancel_button_index, 1);
        assert_eq!(spec.icon, DialogIcon::Warning);
    }

    #[test]
    fn test_rename_storage_prompt_defaults_to_name() {
        let info = StorageInfo::new(StorageRef::new("s1"), "Work");
        let spec = rename_storage_prompt(&info, &Messages::default());
        assert_eq!(spec.title, "Rename \"Work\" storage");
        assert_eq!(spec.default_value, "Work");
    }

    #[tokio::test]
    async fn test_rename_storage_cancelled_makes_no_call() {
        let store = MemoryStore::new();
        let info = store.add_storage("Work").await;
        let nav = navigator(store, ScriptedDialog::answering(None), None);

        let outcome = nav.run_storage_action(&info, StorageAction::RenameStorage).await;

        assert_eq!(outcome, FlowOutcome::Cancelled);
        assert!(nav.store().calls().await.is_empty());
        assert!(nav.notifier().notices.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_rename_storage() {
        let store = MemoryStore::new();
        let info = store.add_storage("Work").await;
        let nav = navigator(store, ScriptedDialog::answering(Some("Personal")), None);

        assert_eq!(nav.rename_storage(&info).await, FlowOutcome::Completed);
        assert_eq!(nav.store().storage(&info.id).await.unwrap().name, "Personal");
    }

    #[tokio::test]
    async fn test_rename_storage_blank_is_noop() {
        let store = MemoryStore::new();
        let info = store.add_storage("Work").await;
        let nav = navigator(store, ScriptedDialog::answering(Some("  ")), None);

        assert_eq!(nav.rename_storage(&info).await, FlowOutcome::NoOp);
        assert!(nav.store().calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_rename_storage_to_current_name_still_calls_store() {
        let store = MemoryStore::new();
        let info = store.add_storage("Work").await;
        let nav = navigator(store, ScriptedDialog::answering(Some("Work")), None);

        assert_eq!(nav.rename_storage(&info).await, FlowOutcome::Completed);
        assert_eq!(
            nav.store().calls().await,
            vec![StoreCall::RenameStorage {
                storage: info.id.clone(),
                name: "Work".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_rename_storage_failure_reports_notice() {
        let store = MemoryStore::new();
        let info = store.add_storage("Work").await;
        store.fail_next(StoreError::Unavailable("disk".to_string())).await;
        let nav = navigator(store, ScriptedDialog::answering(Some("Personal")), None);

        let outcome = nav.rename_storage(&info).await;

        assert!(matches!(outcome, FlowOutcome::Failed(_)));
        assert_eq!(
            nav.notifier().notices.borrow().as_slice(),
            [Notice::new("Error", "Failed to rename the storage.")]
        );
    }

    #[tokio::test]
    async fn test_remove_storage_confirmed() {
        let store = MemoryStore::new();
        let info = store.add_storage("Work").await;
        let nav = navigator(store, ScriptedDialog::choosing(Some(0)), None);

        let outcome = nav.run_storage_action(&info, StorageAction::RemoveStorage).await;

        assert_eq!(outcome, FlowOutcome::Completed);
        assert!(nav.store().storage(&info.id).await.is_none());
    }

    #[tokio::test]
    async fn test_remove_storage_requires_remove_button() {
        for choice in [Some(1), None] {
            let store = MemoryStore::new();
            let info = store.add_storage("Work").await;
            let nav = navigator(store, ScriptedDialog::choosing(choice), None);

            assert_eq!(nav.remove_storage(&info).await, FlowOutcome::Cancelled);
            assert!(nav.store().calls().await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_remove_storage_failure_is_not_reported() {
        let store = MemoryStore::new();
        let info = StorageInfo::new(StorageRef::new("missing"), "Gone");
        let nav = navigator(store, ScriptedDialog::choosing(Some(0)), None);

        assert_eq!(nav.remove_storage(&info).await, FlowOutcome::Completed);
        assert!(nav.notifier().notices.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_remove_storage_outcome_is_ignored() {
        let store = MemoryStore::new();
        let info = store.add_storage("Work").await;
        store.fail_next(StoreError::Unavailable("disk".to_string())).await;
        let nav = navigator(store, ScriptedDialog::choosing(Some(0)), None);

        assert_eq!(nav.remove_storage(&info).await, FlowOutcome::Completed);
        assert_eq!(nav.store().calls().await, vec![StoreCall::RemoveStorage(info.id.clone())]);
        assert!(nav.notifier().notices.borrow().is_empty());
        assert!(nav.router().pushed.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_sync_without_identity_is_denied() {
        init_logging();
        let store = MemoryStore::new();
        let info = store.add_storage("Work").await;
        let nav = navigator(store, ScriptedDialog::default(), None);

        let outcome = nav.sync_storage(&info).await;

        assert_eq!(outcome, FlowOutcome::Denied(controller::NO_IDENTITY_REASON.to_string()));
        assert!(nav.store().calls().await.is_empty());
        assert_eq!(
            nav.notifier().notices.borrow().as_slice(),
            [Notice::new("No User Error", "Please login first to sync the storage.")]
        );
    }

    #[tokio::test]
    async fn test_sync_with_identity() {
        let store = MemoryStore::new();
        let info = store.add_storage("Work").await;
        let nav = navigator(store, ScriptedDialog::default(), identity());

        assert_eq!(nav.sync_storage(&info).await, FlowOutcome::Completed);
        assert_eq!(nav.store().calls().await, vec![StoreCall::SyncStorage(info.id.clone())]);
        assert!(nav.store().storage(&info.id).await.unwrap().synced_at.is_some());
    }

    #[tokio::test]
    async fn test_sync_failure_reports_notice() {
        let store = MemoryStore::new();
        let info = store.add_storage("Work").await;
        store.fail_next(StoreError::Unavailable("offline".to_string())).await;
        let nav = navigator(store, ScriptedDialog::default(), identity());

        let outcome = nav.sync_storage(&info).await;

        assert!(matches!(outcome, FlowOutcome::Failed(_)));
        assert_eq!(nav.notifier().notices.borrow().len(), 1);
    }

    #[test]
    fn test_open_page() {
        let nav = navigator(MemoryStore::new(), ScriptedDialog::default(), None);
        let storage = StorageRef::new("s1");

        nav.open_page(&storage, SidebarPage::Attachments);
        nav.open_page(&storage, SidebarPage::AllNotes);

        assert_eq!(
            nav.router().pushed.borrow().as_slice(),
            ["/app/storages/s1/attachments", "/app/storages/s1/notes"]
        );
    }
}
