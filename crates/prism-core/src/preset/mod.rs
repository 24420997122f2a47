pub mod store;
pub mod types;

pub use store::PresetStore;
pub use types::ShaderPreset;
