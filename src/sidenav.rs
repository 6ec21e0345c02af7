use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::collaborators::TreeExpansion;
use crate::config::NavigatorConfig;
use crate::error::StateError;
use crate::models::{ExpansionRequest, StorageRef};
use crate::paths::FolderPath;
use crate::routes::{folder_item_id, storage_item_id};

/// On-disk shape of the side-nav state
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
struct PersistedSideNav {
    #[serde(default)]
    opened_items: Vec<String>,
}

/// Open/closed state of the sidebar tree, keyed by item id.
///
/// Features:
/// - Thread-safe access via RwLock
/// - Debounced saving to avoid excessive disk writes
/// - Missing state file starts with everything collapsed
pub struct SideNavState {
    opened: Arc<RwLock<BTreeSet<String>>>,
    state_path: Arc<PathBuf>,
    debounce: Duration,
    save_handle: Mutex<Option<JoinHandle<()>>>,
}

impl SideNavState {
    /// Loads the state kept at `state_path`.
    pub fn new(state_path: PathBuf, debounce: Duration) -> Result<Self, StateError> {
        let opened = load_from_file(&state_path)?;
        Ok(Self {
            opened: Arc::new(RwLock::new(opened)),
            state_path: Arc::new(state_path),
            debounce,
            save_handle: Mutex::new(None),
        })
    }

    pub fn from_config(config: &NavigatorConfig) -> Result<Self, StateError> {
        Self::new(
            config.sidenav_state_path()?,
            Duration::from_millis(config.save_debounce_ms),
        )
    }

    pub fn is_open(&self, item_id: &str) -> bool {
        self.opened
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(item_id)
    }

    pub fn opened_items(&self) -> Vec<String> {
        self.opened
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn open(&self, item_id: &str) {
        self.update(|opened| {
            opened.insert(item_id.to_string());
        });
    }

    pub fn close(&self, item_id: &str) {
        self.update(|opened| {
            opened.remove(item_id);
        });
    }

    pub fn toggle(&self, item_id: &str) {
        self.update(|opened| {
            if !opened.remove(item_id) {
                opened.insert(item_id.to_string());
            }
        });
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut BTreeSet<String>),
    {
        {
            let mut opened = self.opened.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut opened);
        }
        self.schedule_save();
    }

    /// Schedules a debounced save, replacing any pending one.
    ///
    /// Outside a tokio runtime nothing is scheduled; call [`Self::save_sync`].
    pub fn schedule_save(&self) {
        let Ok(runtime) = Handle::try_current() else {
            log::debug!("No runtime available, side-nav state not scheduled for saving");
            return;
        };
        let mut handle_guard = self.save_handle.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(handle) = handle_guard.take() {
            handle.abort();
        }

        let opened = Arc::clone(&self.opened);
        let path = Arc::clone(&self.state_path);
        let debounce = self.debounce;

        let handle = runtime.spawn(async move {
            sleep(debounce).await;
            if let Err(e) = write_state(&path, &opened) {
                log::warn!("Failed to persist side-nav state: {}", e);
            }
        });

        *handle_guard = Some(handle);
    }

    /// Saves the state to disk immediately.
    pub fn save_sync(&self) -> Result<(), StateError> {
        write_state(&self.state_path, &self.opened)
    }
}

impl TreeExpansion for SideNavState {
    fn open_recursively(&self, request: &ExpansionRequest) {
        let mut item_ids = vec![storage_item_id(&request.storage)];
        item_ids.extend(
            request
                .ancestors()
                .iter()
                .map(|prefix| folder_item_id(&request.storage, prefix)),
        );
        log::debug!("Opening side-nav items {:?}", item_ids);
        self.update(|opened| opened.extend(item_ids));
    }

    fn close_subtree(&self, storage: &StorageRef, path: &FolderPath) {
        let subtree_id = folder_item_id(storage, path);
        let descendant_prefix = format!("{}/", subtree_id);
        log::debug!("Closing side-nav items under {}", subtree_id);
        self.update(|opened| {
            opened.retain(|id| id != &subtree_id && !id.starts_with(&descendant_prefix));
        });
    }
}

fn load_from_file(path: &Path) -> Result<BTreeSet<String>, StateError> {
    if !path.exists() {
        return Ok(BTreeSet::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(BTreeSet::new());
    }
    let persisted: PersistedSideNav = serde_json::from_str(&content)?;
    Ok(persisted.opened_items.into_iter().collect())
}

fn write_state(path: &Path, opened: &RwLock<BTreeSet<String>>) -> Result<(), StateError> {
    let persisted = PersistedSideNav {
        opened_items: opened
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect(),
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(&persisted)?)?;
    Ok(())
}
