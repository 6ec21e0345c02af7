//! Seams between the navigator and the view layer.
//!
//! The navigator decides what should happen; these traits carry the decision
//! to whatever renders dialogs, routes, the tree and toasts.

use serde::{Deserialize, Serialize};

use crate::models::{ExpansionRequest, Identity, Notice, StorageRef};
use crate::paths::FolderPath;

/// Icon shown in a dialog
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DialogIcon {
    Info,
    Question,
    Warning,
}

/// A text prompt
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromptSpec {
    pub title: String,
    pub message: String,
    pub icon: DialogIcon,
    pub default_value: String,
    pub submit_label: String,
}

/// A message box with a fixed set of buttons
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageBoxSpec {
    pub title: String,
    pub message: String,
    pub icon: DialogIcon,
    pub buttons: Vec<String>,
    pub default_button_index: usize,
    pub cancel_button_index: usize,
}

/// Modal dialogs. `None` means the dialog was dismissed.
#[allow(async_fn_in_trait)]
pub trait Dialog {
    async fn prompt(&self, spec: PromptSpec) -> Option<String>;

    async fn confirm(&self, spec: MessageBoxSpec) -> Option<usize>;
}

/// Location handling of the view.
pub trait Router {
    fn push(&self, pathname: &str);

    fn current_pathname(&self) -> String;
}

/// Expanded/collapsed state of the sidebar tree.
pub trait TreeExpansion {
    /// Marks the storage and every ancestor folder of the request as open.
    fn open_recursively(&self, request: &ExpansionRequest);

    /// Forgets the state of `path` and every folder below it, e.g. after
    /// the folder was renamed away.
    fn close_subtree(&self, storage: &StorageRef, path: &FolderPath);
}

/// User-visible failure notices.
pub trait Notifier {
    fn push_message(&self, notice: Notice);
}

/// Source of the signed-in user, if any.
pub trait IdentityProvider {
    fn current_identity(&self) -> Option<Identity>;
}

impl IdentityProvider for Option<Identity> {
    fn current_identity(&self) -> Option<Identity> {
        self.clone()
    }
}
