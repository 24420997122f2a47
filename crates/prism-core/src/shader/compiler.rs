use thiserror::Error;

/// Compile failure, carrying the compiler's verbatim diagnostic output.
/// Line numbers in the text refer to the preamble-prefixed source.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct CompileError(pub String);

/// Seam to the platform shader compiler.
///
/// The preset store drives this to turn preamble + source into whatever
/// artifact the render backend draws with; the artifact type is opaque here.
/// Compilation is synchronous and blocking.
pub trait ShaderCompiler {
    type Artifact;

    fn compile(&mut self, source: &str) -> Result<Self::Artifact, CompileError>;
}
