//! Core resource definitions
//!
//! GPU-independent descriptions of the state that drives shader variants:
//! - Material: material kind, texture slots, shading flags, custom source
//! - Texture: color encodings, mappings, render targets
//! - ShaderDefines: ordered material macro definitions
//! - ToneMapping: tone mapping mode selection

pub mod material;
pub mod shader_defines;
pub mod texture;
pub mod tone_mapping;

pub use material::{
    Combine, DepthPacking, Material, MaterialKind, ShaderModifier, Shading, Side, VertexColors,
};
pub use shader_defines::ShaderDefines;
pub use texture::{ColorEncoding, Mapping, RenderTarget, Texture, TextureBinding};
pub use tone_mapping::ToneMapping;
