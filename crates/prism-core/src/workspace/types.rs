use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which GUI panels a layout shows. The editor trio is on by default;
/// the recording and keybindings panels are opened on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelVisibility {
    #[serde(default = "default_true")]
    pub editor: bool,
    #[serde(default = "default_true")]
    pub library: bool,
    #[serde(default = "default_true")]
    pub transport: bool,
    #[serde(default)]
    pub recording: bool,
    #[serde(default)]
    pub keybindings: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            editor: true,
            library: true,
            transport: true,
            recording: false,
            keybindings: false,
        }
    }
}

/// A named arrangement of GUI panels, one JSON file per user layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutPreset {
    pub name: String,
    /// None for the built-in Default, which never touches disk.
    #[serde(skip)]
    pub file_path: Option<PathBuf>,
    /// Virtual key code; 0 = unbound.
    #[serde(default)]
    pub key_code: u32,
    #[serde(default)]
    pub key_modifiers: u32,
    #[serde(default)]
    pub panels: PanelVisibility,
    /// Opaque dock-layout blob owned by the GUI; stored verbatim.
    #[serde(default)]
    pub layout_data: String,
}

impl LayoutPreset {
    /// The undeletable factory layout pinned at index 0 of the store.
    pub fn default_builtin() -> Self {
        Self {
            name: "Default".to_string(),
            file_path: None,
            key_code: 0,
            key_modifiers: 0,
            panels: PanelVisibility::default(),
            layout_data: String::new(),
        }
    }
}
