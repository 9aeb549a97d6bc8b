//! Shader Program Variants
//!
//! Everything between "this material is about to be drawn" and "here is the
//! compiled program for it":
//!
//! 1. [`ParameterDeriver`] flattens material, lights, fog, clipping, drawable
//!    and renderer state into a [`ProgramParameters`] record.
//! 2. [`ProgramKey::encode`] turns that record (plus material macros, custom
//!    source and modifier) into a canonical key.
//! 3. [`ProgramPool`] maps keys to reference-counted compiled programs.
//!
//! [`ProgramManager`] bundles the three for one renderer.
//!
//! ```rust,ignore
//! let params = programs.get_parameters(&renderer, &material, &lights, fog, 0, 0, &object);
//! let key = programs.get_program_code(&renderer, &material, &params);
//! let handle = programs.acquire_program(&material, &source, &params, &key)?;
//! // ... draw ...
//! programs.release_program(handle)?;
//! ```

pub mod compiler;
pub mod parameters;
pub mod pool;
pub mod program_key;
pub mod shader_library;
pub mod wgpu_compiler;

pub use compiler::{ProgramCompiler, ShaderSource};
pub use parameters::{ParameterDeriver, ProgramParameters, allocate_bones, resolve_encoding};
pub use pool::{PooledProgram, ProgramHandle, ProgramPool};
pub use program_key::ProgramKey;
pub use shader_library::{ShaderId, ShaderLibrary};
pub use wgpu_compiler::{GpuProgram, WgpuProgramCompiler};

use crate::errors::Result;
use crate::renderer::capabilities::GpuCapabilities;
use crate::renderer::settings::RendererState;
use crate::resources::material::Material;
use crate::scene::fog::Fog;
use crate::scene::light::LightState;
use crate::scene::object::RenderObject;

/// Per-renderer program registry.
///
/// Owns the shader family table, the device capabilities and the program
/// pool. Not shared between renderers.
pub struct ProgramManager<C: ProgramCompiler> {
    library: ShaderLibrary,
    capabilities: Box<dyn GpuCapabilities>,
    pool: ProgramPool<C>,
}

impl<C: ProgramCompiler> ProgramManager<C> {
    pub fn new(compiler: C, capabilities: impl GpuCapabilities + 'static) -> Self {
        Self {
            library: ShaderLibrary::default(),
            capabilities: Box::new(capabilities),
            pool: ProgramPool::new(compiler),
        }
    }

    /// Derives the parameter record for one draw.
    #[must_use]
    pub fn get_parameters(
        &self,
        renderer: &dyn RendererState,
        material: &Material,
        lights: &LightState,
        fog: Option<&Fog>,
        num_clipping_planes: u32,
        num_clip_intersection: u32,
        object: &RenderObject,
    ) -> ProgramParameters {
        ParameterDeriver::new(renderer, self.capabilities.as_ref(), &self.library).derive(
            material,
            lights,
            fog,
            num_clipping_planes,
            num_clip_intersection,
            object,
        )
    }

    /// Encodes the cache key for `material` drawn with `parameters`.
    #[must_use]
    pub fn get_program_code(
        &self,
        renderer: &dyn RendererState,
        material: &Material,
        parameters: &ProgramParameters,
    ) -> ProgramKey {
        ProgramKey::encode(material, parameters, renderer.gamma_output())
    }

    /// See [`ProgramPool::acquire`].
    pub fn acquire_program(
        &mut self,
        material: &Material,
        source: &ShaderSource,
        parameters: &ProgramParameters,
        key: &ProgramKey,
    ) -> Result<ProgramHandle> {
        self.pool.acquire(material, source, parameters, key)
    }

    /// See [`ProgramPool::release`].
    pub fn release_program(&mut self, handle: ProgramHandle) -> Result<()> {
        self.pool.release(handle)
    }

    #[must_use]
    pub fn programs(&self) -> &ProgramPool<C> {
        &self.pool
    }

    #[must_use]
    pub fn library(&self) -> &ShaderLibrary {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut ShaderLibrary {
        &mut self.library
    }

    #[must_use]
    pub fn capabilities(&self) -> &dyn GpuCapabilities {
        self.capabilities.as_ref()
    }
}
