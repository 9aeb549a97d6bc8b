//! Program compilation seam.
//!
//! The pool never talks to a GPU directly. It hands a variant's source and
//! parameters to a [`ProgramCompiler`] on a cache miss and gives the compiled
//! program back to the same compiler once the last user releases it.

use crate::errors::Result;
use crate::renderer::programs::parameters::ProgramParameters;
use crate::renderer::programs::program_key::ProgramKey;
use crate::resources::material::Material;

/// Vertex and fragment source for one shader family.
///
/// Produced by the external source generator; shader modifiers receive a
/// mutable copy before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub name: String,
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        vertex: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// Builds and frees GPU programs on behalf of a
/// [`ProgramPool`](super::pool::ProgramPool).
///
/// An implementation owns whatever device or renderer handle it needs (see
/// [`WgpuProgramCompiler`](super::wgpu_compiler::WgpuProgramCompiler), which
/// holds a `wgpu::Device`), so `compile` takes no renderer argument.
pub trait ProgramCompiler {
    /// The compiled program handed out by the pool.
    type Program;

    /// Compiles one variant.
    ///
    /// `source` already has the material's shader modifier applied. Errors
    /// are returned to the caller of `acquire` unchanged.
    fn compile(
        &mut self,
        key: &ProgramKey,
        material: &Material,
        source: &ShaderSource,
        parameters: &ProgramParameters,
    ) -> Result<Self::Program>;

    /// Frees a program whose reference count reached zero.
    fn destroy(&mut self, program: Self::Program) {
        drop(program);
    }
}
