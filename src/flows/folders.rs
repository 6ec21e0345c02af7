use crate::collaborators::{Dialog, DialogIcon, IdentityProvider, Notifier, PromptSpec, Router, TreeExpansion};
use crate::config::Messages;
use crate::controller::{self, RenameTarget};
use crate::flows::StorageNavigator;
use crate::models::{FlowOutcome, NavigationOutcome, StorageRef};
use crate::paths::{FolderPath, SEPARATOR};
use crate::store::NoteStore;

/// Pre-filled text of the create-folder prompt: the base folder ready for a
/// new segment.
pub fn create_folder_default_value(base: &FolderPath) -> String {
    if base.is_root() {
        base.to_string()
    } else {
        format!("{}{}", base, SEPARATOR)
    }
}

/// Prompt asking for the path of a new folder.
///
/// # Arguments
/// * `base` - Folder the new one is created under; pre-fills the input
/// * `messages` - Source of the title, message and submit label
pub fn create_folder_prompt(base: &FolderPath, messages: &Messages) -> PromptSpec {
    PromptSpec {
        title: messages.create_folder_title.clone(),
        message: messages.create_folder_message.clone(),
        icon: DialogIcon::Question,
        default_value: create_folder_default_value(base),
        submit_label: messages.create_folder_submit.clone(),
    }
}

/// Prompt asking for a new last segment, pre-filled with the current one.
pub fn rename_folder_prompt(folder: &FolderPath, messages: &Messages) -> PromptSpec {
    PromptSpec {
        title: messages.rename_folder_title.clone(),
        message: messages.rename_folder_message.clone(),
        icon: DialogIcon::Question,
        default_value: folder.leaf().unwrap_or_default().to_string(),
        submit_label: messages.rename_folder_title.clone(),
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
    /// Prompts for a folder path under `base`, creates it and reveals it.
    pub async fn create_folder(&self, storage: &StorageRef, base: &FolderPath) -> FlowOutcome {
        let Some(value) = self.dialog.prompt(create_folder_prompt(base, &self.messages)).await else {
            log::debug!("Create folder cancelled in storage {}", storage);
            return FlowOutcome::Cancelled;
        };

        let path = match controller::normalize_create_path(base, &value) {
            Ok(path) => path,
            Err(e) => {
                log::warn!("Rejected folder path '{}': {}", value, e);
                self.report(&self.messages.error_title, &self.messages.invalid_path);
                return FlowOutcome::Rejected(e.to_string());
            }
        };
        // The root always exists
        if path.is_root() {
            return FlowOutcome::NoOp;
        }

        log::info!("Creating folder {} in storage {}", path, storage);
        let outcome = controller::apply_create(&self.store, storage, &path).await;
        self.follow(outcome, &self.messages.create_folder_failed)
    }

    /// Prompts for a new name of `folder`'s last segment, renames it and
    /// reveals the result.
    pub async fn rename_folder(&self, storage: &StorageRef, folder: &FolderPath) -> FlowOutcome {
        let value = self.dialog.prompt(rename_folder_prompt(folder, &self.messages)).await;
        if value.is_none() {
            log::debug!("Rename of folder {} cancelled", folder);
            return FlowOutcome::Cancelled;
        }

        let new_path = match controller::compute_rename_target(folder, value.as_deref()) {
            Ok(RenameTarget::Rename(new_path)) => new_path,
            Ok(RenameTarget::NoOp) => return FlowOutcome::NoOp,
            Err(e) => {
                log::warn!("Rejected rename of folder {}: {}", folder, e);
                self.report(&self.messages.error_title, &self.messages.invalid_path);
                return FlowOutcome::Rejected(e.to_string());
            }
        };

        log::info!("Renaming folder {} to {} in storage {}", folder, new_path, storage);
        let outcome = controller::apply_rename(&self.store, storage, folder, &new_path).await;
        if let NavigationOutcome::Navigate { .. } = outcome {
            self.expansion.close_subtree(storage, folder);
        }
        self.follow(outcome, &self.messages.rename_folder_failed)
    }
}
