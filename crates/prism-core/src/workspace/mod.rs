pub mod store;
pub mod types;

pub use store::LayoutStore;
pub use types::{LayoutPreset, PanelVisibility};
