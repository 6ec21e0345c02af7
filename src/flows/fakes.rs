//! Recording collaborators for flow tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::collaborators::{Dialog, MessageBoxSpec, Notifier, PromptSpec, Router, TreeExpansion};
use crate::flows::StorageNavigator;
use crate::memory_store::MemoryStore;
use crate::models::{ExpansionRequest, Identity, Notice, StorageRef};
use crate::paths::FolderPath;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Answers dialogs from a script, recording what was asked
#[derive(Default)]
pub struct ScriptedDialog {
    answers: RefCell<VecDeque<Option<String>>>,
    choices: RefCell<VecDeque<Option<usize>>>,
    pub prompts: RefCell<Vec<PromptSpec>>,
    pub boxes: RefCell<Vec<MessageBoxSpec>>,
}

impl ScriptedDialog {
    pub fn answering(answer: Option<&str>) -> Self {
        let dialog = Self::default();
        dialog.answers.borrow_mut().push_back(answer.map(str::to_string));
        dialog
    }

    pub fn choosing(choice: Option<usize>) -> Self {
        let dialog = Self::default();
        dialog.choices.borrow_mut().push_back(choice);
        dialog
    }
}

impl Dialog for ScriptedDialog {
    async fn prompt(&self, spec: PromptSpec) -> Option<String> {
        self.prompts.borrow_mut().push(spec);
        self.answers.borrow_mut().pop_front().flatten()
    }

    async fn confirm(&self, spec: MessageBoxSpec) -> Option<usize> {
        self.boxes.borrow_mut().push(spec);
        self.choices.borrow_mut().pop_front().flatten()
    }
}

#[derive(Default)]
pub struct RecordingRouter {
    pub pushed: RefCell<Vec<String>>,
}

impl Router for RecordingRouter {
    fn push(&self, pathname: &str) {
        self.pushed.borrow_mut().push(pathname.to_string());
    }

    fn current_pathname(&self) -> String {
        self.pushed.borrow().last().cloned().unwrap_or_default()
    }
}

#[derive(Default)]
pub struct RecordingExpansion {
    pub requests: RefCell<Vec<ExpansionRequest>>,
    pub closed: RefCell<Vec<(StorageRef, FolderPath)>>,
}

impl TreeExpansion for RecordingExpansion {
    fn open_recursively(&self, request: &ExpansionRequest) {
        self.requests.borrow_mut().push(request.clone());
    }

    fn close_subtree(&self, storage: &StorageRef, path: &FolderPath) {
        self.closed.borrow_mut().push((storage.clone(), path.clone()));
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: RefCell<Vec<Notice>>,
}

impl Notifier for RecordingNotifier {
    fn push_message(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

pub type TestNavigator = StorageNavigator<
    ScriptedDialog,
    MemoryStore,
    RecordingRouter,
    RecordingExpansion,
    RecordingNotifier,
    Option<Identity>,
>;

pub fn navigator(store: MemoryStore, dialog: ScriptedDialog, identity: Option<Identity>) -> TestNavigator {
    StorageNavigator::new(
        dialog,
        store,
        RecordingRouter::default(),
        RecordingExpansion::default(),
        RecordingNotifier::default(),
        identity,
    )
}
