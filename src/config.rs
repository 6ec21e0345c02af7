use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::routes::SidebarLabels;

/// Directory name under the platform data directory
const APP_DIR_NAME: &str = "storage-navigator";

/// File name of the persisted side-nav state
const SIDENAV_FILE_NAME: &str = "sidenav.json";

/// Debounce delay for side-nav state saves (1 second)
const DEFAULT_SAVE_DEBOUNCE_MS: u64 = 1000;

/// Every user-facing string the navigator produces.
///
/// Defaults are English; a saved config may override any subset.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Messages {
    pub error_title: String,
    pub invalid_path: String,
    pub create_folder_title: String,
    pub create_folder_message: String,
    pub create_folder_submit: String,
    pub create_folder_failed: String,
    pub rename_folder_title: String,
    pub rename_folder_message: String,
    pub rename_folder_failed: String,
    pub rename_storage_label: String,
    pub rename_storage_message: String,
    pub rename_storage_failed: String,
    pub remove_storage_label: String,
    pub remove_storage_message: String,
    pub cancel_label: String,
    pub no_user_title: String,
    pub no_user_description: String,
    pub sync_failed: String,
    pub sidebar: SidebarLabels,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            error_title: "Error".to_string(),
            invalid_path: "The folder path is not valid.".to_string(),
            create_folder_title: "Create a Folder".to_string(),
            create_folder_message: "Enter the path where do you want to create a folder".to_string(),
            create_folder_submit: "Create Folder".to_string(),
            create_folder_failed: "Failed to create the folder.".to_string(),
            rename_folder_title: "Rename Folder".to_string(),
            rename_folder_message: "Enter the new name for the folder".to_string(),
            rename_folder_failed: "Failed to rename the folder.".to_string(),
            rename_storage_label: "Rename Storage".to_string(),
            rename_storage_message: "Enter the new name for the storage".to_string(),
            rename_storage_failed: "Failed to rename the storage.".to_string(),
            remove_storage_label: "Remove Storage".to_string(),
            remove_storage_message: "The storage will be removed from this app.".to_string(),
            cancel_label: "Cancel".to_string(),
            no_user_title: "No User Error".to_string(),
            no_user_description: "Please login first to sync the storage.".to_string(),
            sync_failed: "Failed to sync the storage.".to_string(),
            sidebar: SidebarLabels::default(),
        }
    }
}

/// Navigator configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NavigatorConfig {
    /// Where the side-nav expansion state is kept. `None` uses the data directory.
    pub sidenav_state_file: Option<PathBuf>,
    pub save_debounce_ms: u64,
    pub messages: Messages,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            sidenav_state_file: None,
            save_debounce_ms: DEFAULT_SAVE_DEBOUNCE_MS,
            messages: Messages::default(),
        }
    }
}

impl NavigatorConfig {
    /// Loads configuration from file, merging with defaults.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, StateError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        merge_config_with_defaults(&content)
    }

    pub fn save(&self, path: &Path) -> Result<(), StateError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolves the side-nav state file, falling back to the platform data
    /// directory.
    pub fn sidenav_state_path(&self) -> Result<PathBuf, StateError> {
        match &self.sidenav_state_file {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(SIDENAV_FILE_NAME)),
        }
    }
}

/// Platform data directory for the navigator.
///
/// On Linux: ~/.local/share/storage-navigator/
/// On macOS: ~/Library/Application Support/storage-navigator/
/// On Windows: C:\Users\{user}\AppData\Roaming\storage-navigator\
pub fn data_dir() -> Result<PathBuf, StateError> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(StateError::NoDataDir)
}

/// Merges a partial config JSON with defaults.
///
/// Unknown keys are ignored and values of the wrong type keep their default,
/// so an older or hand-edited file never prevents startup.
pub fn merge_config_with_defaults(partial_json: &str) -> Result<NavigatorConfig, StateError> {
    let mut config = NavigatorConfig::default();
    if partial_json.trim().is_empty() {
        return Ok(config);
    }

    let json_value: serde_json::Value = serde_json::from_str(partial_json)?;

    if let Some(obj) = json_value.as_object() {
        if let Some(v) = obj.get("sidenav_state_file").and_then(|v| v.as_str()) {
            config.sidenav_state_file = Some(PathBuf::from(v));
        }
        if let Some(v) = obj.get("save_debounce_ms").and_then(|v| v.as_u64()) {
            config.save_debounce_ms = v;
        }
        if let Some(v) = obj.get("messages") {
            config.messages = merge_messages(config.messages, v)?;
        }
    }

    Ok(config)
}

/// Overlays saved message strings onto `defaults` one field at a time.
///
/// A field whose saved value is not a string keeps its default; the
/// remaining overrides still apply.
///
/// # Arguments
/// * `defaults` - The messages to start from
/// * `saved` - The `messages` value read from the config file
///
/// # Returns
/// * `Ok(Messages)` - The merged messages
/// * `Err(StateError)` - If the defaults cannot be converted to JSON
fn merge_messages(defaults: Messages, saved: &serde_json::Value) -> Result<Messages, StateError> {
    let mut merged = serde_json::to_value(&defaults)?;
    overlay_strings(&mut merged, saved, "messages");
    match serde_json::from_value(merged) {
        Ok(messages) => Ok(messages),
        Err(e) => {
            log::warn!("Ignoring invalid messages in config: {}", e);
            Ok(defaults)
        }
    }
}

fn overlay_strings(target: &mut serde_json::Value, saved: &serde_json::Value, key_path: &str) {
    let Some(saved) = saved.as_object() else {
        log::warn!("Ignoring non-object '{}' in config", key_path);
        return;
    };
    for (key, value) in saved {
        let field_path = format!("{}.{}", key_path, key);
        let Some(current) = target.get_mut(key.as_str()) else {
            log::debug!("Ignoring unknown config key '{}'", field_path);
            continue;
        };
        if current.is_object() && value.is_object() {
            overlay_strings(current, value, &field_path);
        } else if let (serde_json::Value::String(current), Some(v)) = (current, value.as_str()) {
            *current = v.to_string();
        } else {
            log::warn!("Ignoring '{}' in config: wrong type", field_path);
        }
    }
}
