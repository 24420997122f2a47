use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};

use crate::keys;
use crate::params;
use crate::shader::{FileTimestamps, ShaderCompiler};

use super::types::ShaderPreset;

/// File extensions recognized by directory scans (lowercase).
const SHADER_EXTENSIONS: &[&str] = &["hlsl", "fx", "ps"];

/// Ordered collection of shader presets and their compiled artifacts.
///
/// Presets and artifacts are two parallel vectors indexed identically; an
/// artifact slot stays `None` until a compile succeeds. The store is the
/// sole owner of the artifacts — callers borrow the active one per frame
/// through [`PresetStore::active_shader`] rather than holding on to it.
pub struct PresetStore<C: ShaderCompiler> {
    compiler: C,
    presets: Vec<ShaderPreset>,
    artifacts: Vec<Option<C::Artifact>>,
    /// None = pass-through (no effect applied).
    active: Option<usize>,
    timestamps: FileTimestamps,
    file_watching: bool,
}

impl<C: ShaderCompiler> PresetStore<C> {
    pub fn new(compiler: C) -> Self {
        Self {
            compiler,
            presets: Vec::new(),
            artifacts: Vec::new(),
            active: None,
            timestamps: FileTimestamps::new(),
            file_watching: false,
        }
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn presets(&self) -> &[ShaderPreset] {
        &self.presets
    }

    pub fn preset(&self, index: usize) -> Option<&ShaderPreset> {
        self.presets.get(index)
    }

    /// Mutable access for live edits (slider values, source text). Source
    /// edits take effect on the next [`PresetStore::recompile`].
    pub fn preset_mut(&mut self, index: usize) -> Option<&mut ShaderPreset> {
        self.presets.get_mut(index)
    }

    /// Compiled artifact at `index`; `None` until a compile succeeds there.
    pub fn artifact(&self, index: usize) -> Option<&C::Artifact> {
        self.artifacts.get(index).and_then(Option::as_ref)
    }

    /// Append a preset, compile it, and return its index.
    ///
    /// A preset arriving with a populated schema keeps it untouched — that
    /// is how values restored from config survive into the store — so a
    /// parse only happens when the schema is genuinely empty. An artifact
    /// slot is appended either way; a failed compile leaves it `None` and
    /// records the error on the preset.
    pub fn add(&mut self, mut preset: ShaderPreset) -> usize {
        if preset.params.is_empty() {
            preset.params = params::parse_schema(&preset.source);
        }

        let artifact = Self::compile_preset(&mut self.compiler, &mut preset);
        if let Some(path) = &preset.file_path {
            self.timestamps.track(path);
        }

        self.presets.push(preset);
        self.artifacts.push(artifact);
        self.presets.len() - 1
    }

    /// Erase the preset and artifact at `index`. The active selection
    /// follows the surviving presets: removing the active one clears it,
    /// removing an earlier one shifts it down. Out of range is a no-op.
    pub fn remove(&mut self, index: usize) {
        if index >= self.presets.len() {
            return;
        }
        if let Some(path) = &self.presets[index].file_path {
            self.timestamps.untrack(path);
        }
        self.presets.remove(index);
        self.artifacts.remove(index);

        match self.active {
            Some(active) if active == index => self.active = None,
            Some(active) if active > index => self.active = Some(active - 1),
            _ => {}
        }
    }

    /// Overwrite the preset at `index` with a replacement, fresh-parsing
    /// its source. This is the destructive "replace source" / hot-reload
    /// install: parameter values come out as the new parse's defaults.
    /// [`PresetStore::recompile`] is the path that carries live values over.
    ///
    /// A failed compile still installs the new preset (with its error
    /// recorded); the previous artifact stays in the slot as a stale
    /// fallback until a compile succeeds again.
    pub fn replace(&mut self, index: usize, mut preset: ShaderPreset) {
        if index >= self.presets.len() {
            return;
        }

        preset.params = params::parse_schema(&preset.source);
        if let Some(artifact) = Self::compile_preset(&mut self.compiler, &mut preset) {
            self.artifacts[index] = Some(artifact);
        }

        let old_path = self.presets[index].file_path.clone();
        if old_path != preset.file_path {
            if let Some(old) = &old_path {
                self.timestamps.untrack(old);
            }
        }
        if let Some(path) = &preset.file_path {
            self.timestamps.track(path);
        }

        self.presets[index] = preset;
    }

    /// Reparse and recompile the preset at `index` from its current source,
    /// carrying live parameter values across by name. Parameters that no
    /// longer exist (or were renamed) drop to the new parse's defaults.
    /// Returns whether the compile succeeded.
    pub fn recompile(&mut self, index: usize) -> bool {
        if index >= self.presets.len() {
            return false;
        }

        // Last write wins for duplicate names, same as value restoration.
        let saved: HashMap<String, Vec<f32>> = self.presets[index]
            .params
            .iter()
            .map(|p| (p.name.clone(), p.current.to_vec()))
            .collect();

        let preset = &mut self.presets[index];
        preset.params = params::parse_schema(&preset.source);
        preset.apply_saved_values(&saved);

        match Self::compile_preset(&mut self.compiler, &mut self.presets[index]) {
            Some(artifact) => {
                self.artifacts[index] = Some(artifact);
                true
            }
            None => false,
        }
    }

    /// Select the render-facing preset. An out-of-range index clears the
    /// selection (pass-through) rather than erroring.
    pub fn set_active(&mut self, index: usize) {
        self.active = if index < self.presets.len() {
            Some(index)
        } else {
            None
        };
    }

    /// Clear the selection; the renderer falls back to showing the video
    /// unmodified.
    pub fn set_passthrough(&mut self) {
        self.active = None;
    }

    pub fn is_passthrough(&self) -> bool {
        self.active.is_none()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// `None` in pass-through mode; that is the normal idle state, not an
    /// error.
    pub fn active_preset(&self) -> Option<&ShaderPreset> {
        self.active.and_then(|i| self.presets.get(i))
    }

    pub fn active_preset_mut(&mut self) -> Option<&mut ShaderPreset> {
        self.active.and_then(|i| self.presets.get_mut(i))
    }

    /// Artifact to draw with this frame; `None` in pass-through mode or
    /// while the active preset has never compiled successfully.
    pub fn active_shader(&self) -> Option<&C::Artifact> {
        self.active.and_then(|i| self.artifact(i))
    }

    pub fn enable_file_watching(&mut self, enable: bool) {
        self.file_watching = enable;
    }

    /// Poll tracked files once and hot-reload every preset whose file
    /// changed since the last poll.
    ///
    /// The replacement inherits only the old keybinding; parameter values
    /// reset to the new source's defaults. An unreadable file leaves its
    /// preset untouched, and the refreshed mtime cache keeps the failure
    /// from being re-reported every poll.
    pub fn check_for_changes(&mut self) {
        if !self.file_watching {
            return;
        }
        for path in self.timestamps.poll() {
            let Some(index) = self
                .presets
                .iter()
                .position(|p| p.file_path.as_deref() == Some(path.as_path()))
            else {
                continue;
            };
            match ShaderPreset::from_file(&path) {
                Ok(mut fresh) => {
                    fresh.key_code = self.presets[index].key_code;
                    fresh.key_modifiers = self.presets[index].key_modifiers;
                    info!("Reloading shader '{}' from {}", fresh.name, path.display());
                    self.replace(index, fresh);
                }
                Err(e) => {
                    warn!("Hot reload failed for {}: {e}", path.display());
                }
            }
        }
    }

    /// Load every shader file in `dir` whose path is not already in the
    /// store. Shaders that fail to compile are still added with their
    /// error recorded; only unreadable files are skipped.
    pub fn scan_directory(&mut self, dir: &Path) {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => {
                info!("No shader directory at {}", dir.display());
                return;
            }
        };

        let mut paths: Vec<_> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file() && has_shader_extension(p))
            .collect();
        paths.sort();

        let mut loaded = 0usize;
        for path in paths {
            let already = self
                .presets
                .iter()
                .any(|p| p.file_path.as_deref() == Some(path.as_path()));
            if already {
                continue;
            }
            match ShaderPreset::from_file(&path) {
                Ok(preset) => {
                    info!("Loaded shader '{}' from {}", preset.name, path.display());
                    self.add(preset);
                    loaded += 1;
                }
                Err(e) => {
                    warn!("Failed to read shader {}: {e}", path.display());
                }
            }
        }
        info!("Scanned {loaded} new shaders from {}", dir.display());
    }

    /// First preset in store order bound to `key` with all of its required
    /// modifiers held. Extra held modifiers do not disqualify a match —
    /// the exact-mask rule belongs to the conflict check in [`crate::keys`],
    /// not to dispatch.
    pub fn find_binding(&self, key: u32, held_modifiers: u32) -> Option<usize> {
        self.presets.iter().position(|p| {
            p.is_bound()
                && p.key_code == key
                && keys::modifiers_pressed(p.key_modifiers, held_modifiers)
        })
    }

    /// Build the preamble, submit preamble + source, and record the
    /// outcome on the preset. Returns the artifact on success.
    fn compile_preset(compiler: &mut C, preset: &mut ShaderPreset) -> Option<C::Artifact> {
        let preamble = params::build_preamble(&preset.params);
        match compiler.compile(&format!("{preamble}{}", preset.source)) {
            Ok(artifact) => {
                preset.is_valid = true;
                preset.compile_error.clear();
                Some(artifact)
            }
            Err(e) => {
                warn!("Shader '{}' failed to compile: {e}", preset.name);
                preset.is_valid = false;
                preset.compile_error = e.0;
                None
            }
        }
    }
}

fn has_shader_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            SHADER_EXTENSIONS.contains(&ext.as_str())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{MOD_CTRL, MOD_SHIFT};
    use crate::shader::CompileError;
    use std::fs;
    use std::time::{Duration, SystemTime};

    fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() < eps
    }

    /// Succeeds unless the source contains `@fail`; the artifact is the
    /// exact source text the compiler received.
    #[derive(Default)]
    struct ScriptedCompiler;

    impl ShaderCompiler for ScriptedCompiler {
        type Artifact = String;

        fn compile(&mut self, source: &str) -> Result<String, CompileError> {
            if source.contains("@fail") {
                Err(CompileError("error X1000: scripted failure".to_string()))
            } else {
                Ok(source.to_string())
            }
        }
    }

    fn store() -> PresetStore<ScriptedCompiler> {
        PresetStore::new(ScriptedCompiler)
    }

    const TWO_PARAM_SOURCE: &str = r#"/*{
"INPUTS": [
  {"NAME": "Size", "TYPE": "float", "DEFAULT": 0.5},
  {"NAME": "Tint", "TYPE": "color", "DEFAULT": [1, 0, 0, 1]}
]
}*/
float4 main() : SV_TARGET { return Tint * Size; }
"#;

    #[test]
    fn add_compiles_with_preamble_prepended() {
        let mut s = store();
        let idx = s.add(ShaderPreset::from_source("glow", TWO_PARAM_SOURCE));
        assert_eq!(idx, 0);

        let preset = s.preset(0).unwrap();
        assert!(preset.is_valid);
        assert!(preset.compile_error.is_empty());

        let submitted = s.artifact(0).unwrap();
        assert!(submitted.starts_with("#define Size custom[0].x\n#define Tint custom[1]\n"));
        assert!(submitted.ends_with(TWO_PARAM_SOURCE));
    }

    #[test]
    fn add_parses_when_schema_empty() {
        let preset = ShaderPreset {
            name: "raw".to_string(),
            source: TWO_PARAM_SOURCE.to_string(),
            file_path: None,
            key_code: 0,
            key_modifiers: 0,
            is_valid: false,
            compile_error: String::new(),
            params: Vec::new(),
        };
        let mut s = store();
        let idx = s.add(preset);
        assert_eq!(s.preset(idx).unwrap().params.len(), 2);
        assert_eq!(s.preset(idx).unwrap().params[1].slot_offset, 4);
    }

    #[test]
    fn add_keeps_populated_schema_intact() {
        let mut preset = ShaderPreset::from_source("glow", TWO_PARAM_SOURCE);
        let mut saved = HashMap::new();
        saved.insert("Size".to_string(), vec![0.9]);
        preset.apply_saved_values(&saved);

        let mut s = store();
        let idx = s.add(preset);
        // A re-parse would have clobbered the restored value with 0.5.
        assert!(approx_eq(s.preset(idx).unwrap().params[0].current[0], 0.9, 1e-6));
    }

    #[test]
    fn add_empty_source_still_compiles() {
        let mut s = store();
        let idx = s.add(ShaderPreset::from_source("empty", ""));
        assert!(s.preset(idx).unwrap().is_valid);
        assert_eq!(s.artifact(idx).unwrap(), "");
    }

    #[test]
    fn add_failure_records_error_and_leaves_slot_empty() {
        let mut s = store();
        let idx = s.add(ShaderPreset::from_source("broken", "@fail\n"));
        let preset = s.preset(idx).unwrap();
        assert!(!preset.is_valid);
        assert!(preset.compile_error.contains("X1000"));
        assert!(s.artifact(idx).is_none());
    }

    #[test]
    fn artifacts_stay_parallel_after_remove() {
        let mut s = store();
        s.add(ShaderPreset::from_source("ok", "float4 main() {}"));
        s.add(ShaderPreset::from_source("broken", "@fail"));
        s.remove(0);
        assert_eq!(s.len(), 1);
        assert_eq!(s.preset(0).unwrap().name, "broken");
        assert!(s.artifact(0).is_none());
    }

    #[test]
    fn remove_shifts_active_down() {
        let mut s = store();
        s.add(ShaderPreset::from_source("a", ""));
        s.add(ShaderPreset::from_source("b", ""));
        s.add(ShaderPreset::from_source("c", ""));
        s.set_active(2);
        s.remove(0);
        assert_eq!(s.active_index(), Some(1));
        assert_eq!(s.active_preset().unwrap().name, "c");
    }

    #[test]
    fn removing_active_clears_selection() {
        let mut s = store();
        s.add(ShaderPreset::from_source("a", ""));
        s.add(ShaderPreset::from_source("b", ""));
        s.set_active(1);
        s.remove(1);
        assert!(s.is_passthrough());
        assert!(s.active_preset().is_none());
        assert!(s.active_shader().is_none());
    }

    #[test]
    fn remove_after_active_keeps_selection() {
        let mut s = store();
        s.add(ShaderPreset::from_source("a", ""));
        s.add(ShaderPreset::from_source("b", ""));
        s.set_active(0);
        s.remove(1);
        assert_eq!(s.active_index(), Some(0));
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut s = store();
        s.add(ShaderPreset::from_source("a", ""));
        s.remove(5);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn set_active_out_of_range_clears() {
        let mut s = store();
        s.add(ShaderPreset::from_source("a", ""));
        s.set_active(0);
        assert!(!s.is_passthrough());
        s.set_active(7);
        assert!(s.is_passthrough());
        assert!(s.active_shader().is_none());
    }

    #[test]
    fn active_shader_none_for_never_compiled() {
        let mut s = store();
        s.add(ShaderPreset::from_source("broken", "@fail"));
        s.set_active(0);
        assert!(s.active_preset().is_some());
        assert!(s.active_shader().is_none());
    }

    #[test]
    fn replace_resets_values_to_new_defaults() {
        let mut s = store();
        let idx = s.add(ShaderPreset::from_source("glow", TWO_PARAM_SOURCE));
        s.preset_mut(idx).unwrap().params[0].current[0] = 0.9;

        s.replace(idx, ShaderPreset::from_source("glow", TWO_PARAM_SOURCE));
        let preset = s.preset(idx).unwrap();
        assert!(approx_eq(preset.params[0].current[0], 0.5, 1e-6));
        assert!(preset.is_valid);
    }

    #[test]
    fn replace_failure_installs_source_but_keeps_stale_artifact() {
        let mut s = store();
        let idx = s.add(ShaderPreset::from_source("glow", TWO_PARAM_SOURCE));
        let good_artifact = s.artifact(idx).unwrap().clone();

        s.replace(idx, ShaderPreset::from_source("glow", "@fail broken"));
        let preset = s.preset(idx).unwrap();
        assert_eq!(preset.source, "@fail broken");
        assert!(!preset.is_valid);
        assert!(preset.compile_error.contains("X1000"));
        assert_eq!(s.artifact(idx).unwrap(), &good_artifact);
    }

    #[test]
    fn recompile_preserves_live_values() {
        let mut s = store();
        let idx = s.add(ShaderPreset::from_source("glow", TWO_PARAM_SOURCE));
        s.preset_mut(idx).unwrap().params[0].current[0] = 0.9;

        // Edit that does not touch the schema.
        s.preset_mut(idx).unwrap().source.push_str("// tweak\n");
        assert!(s.recompile(idx));

        let preset = s.preset(idx).unwrap();
        assert!(approx_eq(preset.params[0].current[0], 0.9, 1e-6));
        assert!(preset.is_valid);
        assert!(s.artifact(idx).unwrap().ends_with("// tweak\n"));
    }

    #[test]
    fn recompile_resets_renamed_params() {
        let mut s = store();
        let idx = s.add(ShaderPreset::from_source("glow", TWO_PARAM_SOURCE));
        s.preset_mut(idx).unwrap().params[0].current[0] = 0.9;

        let renamed = TWO_PARAM_SOURCE.replace("\"Size\"", "\"Scale\"");
        s.preset_mut(idx).unwrap().source = renamed;
        assert!(s.recompile(idx));

        let preset = s.preset(idx).unwrap();
        assert_eq!(preset.params[0].name, "Scale");
        assert!(approx_eq(preset.params[0].current[0], 0.5, 1e-6));
    }

    #[test]
    fn recompile_failure_keeps_valid_false() {
        let mut s = store();
        let idx = s.add(ShaderPreset::from_source("glow", TWO_PARAM_SOURCE));
        s.preset_mut(idx).unwrap().source = "@fail".to_string();
        assert!(!s.recompile(idx));
        assert!(!s.preset(idx).unwrap().is_valid);
        assert!(!s.recompile(99));
    }

    #[test]
    fn find_binding_requires_held_modifiers() {
        let mut s = store();
        s.add(ShaderPreset::from_source("plain", ""));
        let idx = s.add(ShaderPreset::from_source("bound", ""));
        {
            let p = s.preset_mut(idx).unwrap();
            p.key_code = b'G' as u32;
            p.key_modifiers = MOD_CTRL;
        }

        assert_eq!(s.find_binding(b'G' as u32, MOD_CTRL), Some(idx));
        // Extra held modifiers still dispatch.
        assert_eq!(s.find_binding(b'G' as u32, MOD_CTRL | MOD_SHIFT), Some(idx));
        // Required modifier not held.
        assert_eq!(s.find_binding(b'G' as u32, 0), None);
        assert_eq!(s.find_binding(b'H' as u32, MOD_CTRL), None);
    }

    #[test]
    fn find_binding_first_in_store_order() {
        let mut s = store();
        s.add(ShaderPreset::from_source("first", ""));
        s.add(ShaderPreset::from_source("second", ""));
        s.preset_mut(0).unwrap().key_code = b'K' as u32;
        s.preset_mut(1).unwrap().key_code = b'K' as u32;
        assert_eq!(s.find_binding(b'K' as u32, 0), Some(0));
    }

    #[test]
    fn unbound_presets_never_dispatch() {
        let mut s = store();
        s.add(ShaderPreset::from_source("a", ""));
        assert_eq!(s.find_binding(0, 0), None);
    }

    #[test]
    fn scan_directory_loads_recognized_extensions_once() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.fx"), "float4 main() {}").unwrap();
        fs::write(dir.path().join("a.hlsl"), TWO_PARAM_SOURCE).unwrap();
        fs::write(dir.path().join("c.PS"), "float4 main() {}").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a shader").unwrap();

        let mut s = store();
        s.scan_directory(dir.path());
        assert_eq!(s.len(), 3);
        // Sorted by path, so load order is deterministic.
        assert_eq!(s.preset(0).unwrap().name, "a");
        assert_eq!(s.preset(1).unwrap().name, "b");
        assert_eq!(s.preset(2).unwrap().name, "c");

        // Rescanning must not duplicate already-loaded paths.
        s.scan_directory(dir.path());
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn scan_directory_adds_uncompilable_shaders_with_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.hlsl"), "@fail").unwrap();

        let mut s = store();
        s.scan_directory(dir.path());
        assert_eq!(s.len(), 1);
        assert!(!s.preset(0).unwrap().is_valid);
        assert!(s.preset(0).unwrap().compile_error.contains("X1000"));
    }

    #[test]
    fn scan_directory_missing_dir_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = store();
        s.scan_directory(&dir.path().join("nope"));
        assert!(s.is_empty());
    }

    fn touch(path: &Path, seconds_ahead: u64) {
        let later = SystemTime::now() + Duration::from_secs(seconds_ahead);
        fs::File::options()
            .append(true)
            .open(path)
            .unwrap()
            .set_modified(later)
            .unwrap();
    }

    #[test]
    fn hot_reload_resets_values_but_keeps_binding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glow.hlsl");
        fs::write(&path, TWO_PARAM_SOURCE).unwrap();

        let mut s = store();
        let idx = s.add(ShaderPreset::from_file(&path).unwrap());
        s.enable_file_watching(true);
        {
            let p = s.preset_mut(idx).unwrap();
            p.key_code = b'G' as u32;
            p.key_modifiers = MOD_CTRL;
            p.params[0].current[0] = 0.9;
        }

        let edited = format!("{TWO_PARAM_SOURCE}// edited on disk\n");
        fs::write(&path, &edited).unwrap();
        touch(&path, 5);

        s.check_for_changes();

        let preset = s.preset(idx).unwrap();
        assert_eq!(preset.source, edited);
        // Destructive by design: live value gone, default restored.
        assert!(approx_eq(preset.params[0].current[0], 0.5, 1e-6));
        assert_eq!(preset.params[0].default, preset.params[0].current);
        // Keybinding transplanted onto the new instance.
        assert_eq!(preset.key_code, b'G' as u32);
        assert_eq!(preset.key_modifiers, MOD_CTRL);
        assert!(preset.is_valid);
    }

    #[test]
    fn hot_reload_requires_watching_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glow.hlsl");
        fs::write(&path, TWO_PARAM_SOURCE).unwrap();

        let mut s = store();
        let idx = s.add(ShaderPreset::from_file(&path).unwrap());

        fs::write(&path, "// changed\n").unwrap();
        touch(&path, 5);

        s.check_for_changes();
        assert_eq!(s.preset(idx).unwrap().source, TWO_PARAM_SOURCE);
    }

    #[test]
    fn hot_reload_untouched_file_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glow.hlsl");
        fs::write(&path, TWO_PARAM_SOURCE).unwrap();

        let mut s = store();
        let idx = s.add(ShaderPreset::from_file(&path).unwrap());
        s.enable_file_watching(true);
        s.preset_mut(idx).unwrap().params[0].current[0] = 0.9;

        s.check_for_changes();
        assert!(approx_eq(s.preset(idx).unwrap().params[0].current[0], 0.9, 1e-6));
    }

    #[test]
    fn removed_preset_stops_hot_reloading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glow.hlsl");
        fs::write(&path, TWO_PARAM_SOURCE).unwrap();

        let mut s = store();
        s.add(ShaderPreset::from_file(&path).unwrap());
        s.enable_file_watching(true);
        s.remove(0);

        fs::write(&path, "// changed\n").unwrap();
        touch(&path, 5);

        // No tracked entry left; must not panic or resurrect the preset.
        s.check_for_changes();
        assert!(s.is_empty());
    }
}
