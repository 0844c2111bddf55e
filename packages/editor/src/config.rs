//! # Editor Configuration
//!
//! Tunables for the editing overlay. Every field has a default, so an
//! empty `{}` file (or no file at all) yields the stock behaviour.

use crate::{EditorError, Mode, ToolbarIcon};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "element-editor.config.json";

/// Element editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// How long a status message stays on screen
    #[serde(default = "default_notification_duration_ms")]
    pub notification_duration_ms: u64,

    /// Keep the change log when the overlay is closed
    #[serde(default)]
    pub retain_history_on_close: bool,

    /// Maximum number of undo records (0 = unlimited)
    #[serde(default)]
    pub max_undo_levels: usize,

    /// Icon background while remove mode is armed
    #[serde(default = "default_remove_highlight")]
    pub remove_highlight: String,

    /// Icon background while edit mode is armed
    #[serde(default = "default_edit_highlight")]
    pub edit_highlight: String,

    /// Message shown in the image URL prompt
    #[serde(default = "default_image_prompt")]
    pub image_prompt: String,
}

fn default_notification_duration_ms() -> u64 {
    2000
}

fn default_remove_highlight() -> String {
    "#ff0000".to_string()
}

fn default_edit_highlight() -> String {
    "#00ff00".to_string()
}

fn default_image_prompt() -> String {
    "Enter the URL of the new image:".to_string()
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, EditorError> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::from_path(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from an explicit file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }

    /// Background colour for `icon` while `mode` is armed, `None` for transparent
    pub fn highlight_for(&self, icon: ToolbarIcon, mode: Mode) -> Option<&str> {
        match (icon, mode) {
            (ToolbarIcon::Remove, Mode::Remove) => Some(&self.remove_highlight),
            (ToolbarIcon::Edit, Mode::Edit) => Some(&self.edit_highlight),
            _ => None,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            notification_duration_ms: default_notification_duration_ms(),
            retain_history_on_close: false,
            max_undo_levels: 0,
            remove_highlight: default_remove_highlight(),
            edit_highlight: default_edit_highlight(),
            image_prompt: default_image_prompt(),
        }
    }
}
