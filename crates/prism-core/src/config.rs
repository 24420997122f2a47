use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::preset::{PresetStore, ShaderPreset};
use crate::shader::ShaderCompiler;

/// One persisted shader preset: identity, keybinding, and the name-keyed
/// current values. Source text is not persisted — restore re-reads the
/// file — so in-memory presets cannot be saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPreset {
    pub name: String,
    pub file_path: PathBuf,
    #[serde(default)]
    pub key_code: u32,
    #[serde(default)]
    pub key_modifiers: u32,
    /// Values keyed by parameter name: 1 float for scalars, 2 for
    /// point2d, 4 for color.
    #[serde(default)]
    pub param_values: HashMap<String, Vec<f32>>,
}

impl SavedPreset {
    /// Capture a store preset for persistence; `None` for presets with
    /// no backing file.
    pub fn from_preset(preset: &ShaderPreset) -> Option<Self> {
        let file_path = preset.file_path.clone()?;
        let param_values = preset
            .params
            .iter()
            .map(|p| (p.name.clone(), p.current[..p.float_count()].to_vec()))
            .collect();
        Some(Self {
            name: preset.name.clone(),
            file_path,
            key_code: preset.key_code,
            key_modifiers: preset.key_modifiers,
            param_values,
        })
    }
}

/// Persisted application state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub presets: Vec<SavedPreset>,
    /// Directory scanned for shader files at startup.
    #[serde(default = "default_shader_directory")]
    pub shader_directory: String,
    #[serde(default = "default_true")]
    pub auto_compile_on_save: bool,
    #[serde(default = "default_auto_compile_delay")]
    pub auto_compile_delay_ms: u32,
}

fn default_shader_directory() -> String {
    "shaders".to_string()
}

fn default_true() -> bool {
    true
}

fn default_auto_compile_delay() -> u32 {
    500
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            presets: Vec::new(),
            shader_directory: "shaders".to_string(),
            auto_compile_on_save: true,
            auto_compile_delay_ms: 500,
        }
    }
}

impl AppConfig {
    /// Path to the config file (~/.config/prism/config.json).
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("prism").join("config.json")
    }

    /// Load from the default location, falling back to defaults on any
    /// error.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config: {e}");
                    Self::default()
                }
            },
            Err(_) => {
                info!("No config found, using defaults");
                Self::default()
            }
        }
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Replace the saved preset list with the store's current
    /// file-backed presets.
    pub fn capture_presets<C: ShaderCompiler>(&mut self, store: &PresetStore<C>) {
        self.presets = store
            .presets()
            .iter()
            .filter_map(SavedPreset::from_preset)
            .collect();
    }
}

/// Rebuild store presets from saved records: read each file, transplant
/// the keybinding, patch values by name, then add — the populated schema
/// makes `add` skip its re-parse, so the patched values survive. Records
/// whose file is missing or unreadable are skipped with a warning.
pub fn restore_presets<C: ShaderCompiler>(store: &mut PresetStore<C>, saved: &[SavedPreset]) {
    for record in saved {
        if record.file_path.as_os_str().is_empty() {
            warn!("Saved preset '{}' has no file path, skipping", record.name);
            continue;
        }
        match ShaderPreset::from_file(&record.file_path) {
            Ok(mut preset) => {
                preset.key_code = record.key_code;
                preset.key_modifiers = record.key_modifiers;
                preset.apply_saved_values(&record.param_values);
                store.add(preset);
            }
            Err(e) => {
                warn!("Skipping saved preset '{}': {e}", record.name);
            }
        }
    }
}
