pub mod compiler;
pub mod hot_reload;
pub mod template;

pub use compiler::{CompileError, ShaderCompiler};
pub use hot_reload::FileTimestamps;
pub use template::SHADER_TEMPLATE;
