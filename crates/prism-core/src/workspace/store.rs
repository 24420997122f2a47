use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{info, warn};

use super::types::{LayoutPreset, PanelVisibility};

/// Named view layouts, one JSON file per user entry. Index 0 is always
/// the built-in Default, which has no file and cannot be deleted,
/// renamed, or bound to a key.
pub struct LayoutStore {
    dir: PathBuf,
    layouts: Vec<LayoutPreset>,
}

impl LayoutStore {
    /// `~/.config/prism/layouts` (or the platform equivalent).
    pub fn default_dir() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("prism").join("layouts")
    }

    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            layouts: vec![LayoutPreset::default_builtin()],
        }
    }

    pub fn layouts(&self) -> &[LayoutPreset] {
        &self.layouts
    }

    pub fn layout(&self, index: usize) -> Option<&LayoutPreset> {
        self.layouts.get(index)
    }

    fn sanitize_name(name: &str) -> String {
        let sanitized: String = name
            .chars()
            .map(|c| if c == '/' || c == '\\' || c == '.' { '_' } else { c })
            .collect();
        let trimmed = sanitized.trim();
        if trimmed.len() > 64 {
            trimmed[..64].to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Drop all user entries and reload `*.json` files from the layouts
    /// directory, sorted by name. The Default at index 0 is untouched.
    pub fn scan(&mut self) {
        self.layouts.truncate(1);

        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => {
                info!("No layouts directory found at {}", self.dir.display());
                return;
            }
        };

        let mut user_layouts: Vec<LayoutPreset> = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match std::fs::read_to_string(&path) {
                Ok(contents) => match serde_json::from_str::<LayoutPreset>(&contents) {
                    Ok(mut layout) => {
                        layout.file_path = Some(path);
                        user_layouts.push(layout);
                    }
                    Err(e) => {
                        warn!("Failed to parse layout {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    warn!("Failed to read layout {}: {e}", path.display());
                }
            }
        }

        user_layouts.sort_by(|a, b| a.name.cmp(&b.name));
        let count = user_layouts.len();
        self.layouts.extend(user_layouts);

        info!("Scanned {count} layouts from {}", self.dir.display());
    }

    /// Write a layout file and insert or update the in-memory entry,
    /// returning its index. Indices are stable: saving over an existing
    /// entry updates it in place and keeps its keybinding.
    ///
    /// When the sanitized filename collides with a file no entry tracks
    /// (a foreign file, or a different name with the same sanitized
    /// form), a numeric suffix is appended rather than overwriting it.
    pub fn save(
        &mut self,
        name: &str,
        panels: PanelVisibility,
        layout_data: &str,
    ) -> Result<usize> {
        let sanitized = Self::sanitize_name(name);
        if sanitized.is_empty() {
            anyhow::bail!("Layout name cannot be empty");
        }

        std::fs::create_dir_all(&self.dir)?;

        let mut path = self.dir.join(format!("{sanitized}.json"));
        if path.exists() && self.entry_for_path(&path).is_none() {
            let mut suffix = 2;
            while path.exists() {
                path = self.dir.join(format!("{sanitized}_{suffix}.json"));
                suffix += 1;
            }
        }

        let mut layout = LayoutPreset {
            name: name.trim().to_string(),
            file_path: Some(path.clone()),
            key_code: 0,
            key_modifiers: 0,
            panels,
            layout_data: layout_data.to_string(),
        };

        let existing = self.entry_for_path(&path);
        if let Some(index) = existing {
            layout.key_code = self.layouts[index].key_code;
            layout.key_modifiers = self.layouts[index].key_modifiers;
        }

        Self::write_entry(&layout, &path)?;
        info!("Saved layout '{}' to {}", layout.name, path.display());

        match existing {
            Some(index) => {
                self.layouts[index] = layout;
                Ok(index)
            }
            None => {
                self.layouts.push(layout);
                Ok(self.layouts.len() - 1)
            }
        }
    }

    /// Remove the layout file and entry. Later entries shift down.
    pub fn delete(&mut self, index: usize) -> Result<()> {
        if index == 0 {
            anyhow::bail!("The Default layout cannot be deleted");
        }
        let Some(layout) = self.layouts.get(index) else {
            anyhow::bail!("No layout at index {index}");
        };

        if let Some(path) = &layout.file_path {
            if path.exists() {
                std::fs::remove_file(path)?;
            }
        }
        info!("Deleted layout '{}'", layout.name);
        self.layouts.remove(index);
        Ok(())
    }

    /// Rename a layout, moving its file to the new sanitized filename.
    /// The keybinding and panel state carry over.
    pub fn rename(&mut self, index: usize, new_name: &str) -> Result<()> {
        if index == 0 {
            anyhow::bail!("The Default layout cannot be renamed");
        }
        if index >= self.layouts.len() {
            anyhow::bail!("No layout at index {index}");
        }
        let sanitized = Self::sanitize_name(new_name);
        if sanitized.is_empty() {
            anyhow::bail!("Layout name cannot be empty");
        }

        std::fs::create_dir_all(&self.dir)?;

        let mut path = self.dir.join(format!("{sanitized}.json"));
        let own_path = self.layouts[index].file_path.clone();
        if own_path.as_deref() != Some(path.as_path()) {
            let mut suffix = 2;
            while path.exists() {
                path = self.dir.join(format!("{sanitized}_{suffix}.json"));
                suffix += 1;
            }
        }

        let mut updated = self.layouts[index].clone();
        updated.name = new_name.trim().to_string();
        updated.file_path = Some(path.clone());
        Self::write_entry(&updated, &path)?;

        if let Some(old) = own_path {
            if old != path && old.exists() {
                std::fs::remove_file(&old)?;
            }
        }

        info!("Renamed layout to '{}' at {}", updated.name, path.display());
        self.layouts[index] = updated;
        Ok(())
    }

    /// Assign a keybinding and persist it in the layout's file. Key 0
    /// clears the binding.
    pub fn set_keybinding(&mut self, index: usize, key: u32, modifiers: u32) -> Result<()> {
        if index == 0 {
            anyhow::bail!("The Default layout cannot be bound to a key");
        }
        if index >= self.layouts.len() {
            anyhow::bail!("No layout at index {index}");
        }

        let mut updated = self.layouts[index].clone();
        updated.key_code = key;
        updated.key_modifiers = modifiers;

        let Some(path) = updated.file_path.clone() else {
            anyhow::bail!("Layout '{}' has no file", updated.name);
        };
        Self::write_entry(&updated, &path)?;

        self.layouts[index] = updated;
        Ok(())
    }

    fn entry_for_path(&self, path: &Path) -> Option<usize> {
        self.layouts
            .iter()
            .position(|l| l.file_path.as_deref() == Some(path))
    }

    fn write_entry(layout: &LayoutPreset, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(layout)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
