use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::params::{self, ParamDescriptor, PARAM_BUFFER_FLOATS};

/// One shader effect: source text, its parsed parameter schema, an optional
/// backing file, an optional keybinding, and the outcome of the last compile.
///
/// Construction does not compile. `PresetStore::add` and
/// `PresetStore::replace` run the compile; until then `is_valid` is false
/// and `compile_error` is empty.
#[derive(Debug, Clone)]
pub struct ShaderPreset {
    pub name: String,
    pub source: String,
    /// None ⇒ in-memory only (unsaved, not hot-reloadable).
    pub file_path: Option<PathBuf>,
    /// Virtual key code; 0 = unbound.
    pub key_code: u32,
    /// ALT/CTRL/SHIFT mask from [`crate::keys`]; 0 = no modifiers.
    pub key_modifiers: u32,
    /// Last compile succeeded.
    pub is_valid: bool,
    /// Verbatim compiler output from the last failed compile.
    pub compile_error: String,
    /// Declared parameters in declaration order. Order is load-bearing:
    /// slot offsets were allocated against it.
    pub params: Vec<ParamDescriptor>,
}

impl ShaderPreset {
    /// In-memory preset ("new shader"). Parses the schema, no file path.
    pub fn from_source(name: &str, source: &str) -> Self {
        Self {
            name: name.to_string(),
            source: source.to_string(),
            file_path: None,
            key_code: 0,
            key_modifiers: 0,
            is_valid: false,
            compile_error: String::new(),
            params: params::parse_schema(source),
        }
    }

    /// Read a shader file and parse its schema. The name is the file stem.
    ///
    /// Fails only on unreadable files; a shader that will not compile is
    /// still a loadable preset and records its error at compile time.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();
        let mut preset = Self::from_source(&name, &source);
        preset.file_path = Some(path.to_path_buf());
        Ok(preset)
    }

    /// Overwrite live parameter values with persisted ones, matched by name.
    /// Call between `from_file` and `PresetStore::add`; `add` skips
    /// re-parsing a populated schema so the restored values survive.
    pub fn apply_saved_values(&mut self, saved: &HashMap<String, Vec<f32>>) {
        params::apply_saved_values(&mut self.params, saved);
    }

    /// Restore every parameter to its declared default.
    pub fn reset_to_defaults(&mut self) {
        for param in &mut self.params {
            param.reset();
        }
    }

    /// Pack live parameter values into the custom uniform buffer.
    pub fn pack_values(&self) -> [f32; PARAM_BUFFER_FLOATS] {
        params::pack_values(&self.params)
    }

    pub fn is_bound(&self) -> bool {
        self.key_code != 0
    }
}
