#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::struct_excessive_bools)]

//! Shader-variant derivation and GPU program pooling.
//!
//! The crate answers one question per draw: *which compiled program does
//! this material need right now?* It does so in three steps:
//!
//! 1. [`ParameterDeriver`] turns the material, lights, fog, clipping state,
//!    drawable and renderer state into a flat [`ProgramParameters`] record.
//! 2. [`ProgramKey::encode`] folds that record, the material's macros and its
//!    shader modifier into a canonical cache key.
//! 3. [`ProgramPool`] maps the key to a reference-counted compiled program,
//!    compiling only on a miss and destroying the program when its last user
//!    releases it.
//!
//! [`ProgramManager`] bundles all three for a single renderer instance.

pub mod errors;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod utils;

pub use errors::{ProgramError, Result, ShaderStage};
pub use renderer::capabilities::{Capabilities, GpuCapabilities, Precision};
pub use renderer::programs::{
    GpuProgram, ParameterDeriver, PooledProgram, ProgramCompiler, ProgramHandle, ProgramKey,
    ProgramManager, ProgramParameters, ProgramPool, ShaderId, ShaderLibrary, ShaderSource,
    WgpuProgramCompiler,
};
pub use renderer::settings::{
    RendererContext, RendererSettings, RendererState, ShadowMapSettings, ShadowMapType,
};
pub use resources::{
    ColorEncoding, Combine, DepthPacking, Mapping, Material, MaterialKind, RenderTarget,
    ShaderDefines, ShaderModifier, Shading, Side, Texture, TextureBinding, ToneMapping,
    VertexColors,
};
pub use scene::{Fog, Light, LightKind, LightState, RenderObject, Skeleton};
pub use utils::interner;
