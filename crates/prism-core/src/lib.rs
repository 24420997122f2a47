//! Core engine for a live video shader player: parameter schemas embedded
//! in shader source, uniform-slot allocation and packing, preamble
//! generation, preset management with hot reload, keybindings, and
//! workspace layouts. Rendering, the compiler backend, and the GUI are
//! external collaborators behind small seams ([`shader::ShaderCompiler`],
//! opaque layout blobs).

pub mod config;
pub mod keys;
pub mod params;
pub mod preset;
pub mod shader;
pub mod workspace;

pub use config::{restore_presets, AppConfig, SavedPreset};
pub use params::{ParamDescriptor, ParamType, PARAM_BUFFER_FLOATS};
pub use preset::{PresetStore, ShaderPreset};
pub use shader::{CompileError, ShaderCompiler, SHADER_TEMPLATE};
pub use workspace::{LayoutPreset, LayoutStore, PanelVisibility};
