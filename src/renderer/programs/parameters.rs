//! Program Parameter Derivation
//!
//! Turns the state relevant to one draw (material, lights, fog, clipping,
//! drawable, renderer state, capabilities) into a flat [`ProgramParameters`]
//! record. Everything that can change the generated shader source is captured
//! here; nothing else is.
//!
//! Derivation is pure: it never mutates its inputs and the same inputs always
//! give an equal record. Degenerate inputs are resolved with a fallback value
//! and a `log::warn!`:
//!
//! | Condition                              | Fallback                     |
//! |----------------------------------------|------------------------------|
//! | Material precision above device limit  | Device maximum               |
//! | Skeleton larger than the bone budget   | `max_bones = 0`, no skinning |
//! | Render target bound as a texture       | Its color texture's encoding |

use crate::renderer::capabilities::{GpuCapabilities, Precision};
use crate::renderer::programs::shader_library::{ShaderId, ShaderLibrary};
use crate::renderer::settings::{RendererState, ShadowMapType};
use crate::resources::material::{Combine, DepthPacking, Material, Shading, Side, VertexColors};
use crate::resources::texture::{ColorEncoding, Mapping, RenderTarget, TextureBinding};
use crate::resources::tone_mapping::ToneMapping;
use crate::scene::fog::Fog;
use crate::scene::light::LightState;
use crate::scene::object::{RenderObject, Skeleton};

/// Bone capacity when bone matrices live in a float texture.
pub const BONE_TEXTURE_CAPACITY: u32 = 1024;

/// Vertex uniform vectors kept free for non-bone uniforms.
pub const RESERVED_VERTEX_UNIFORMS: u32 = 20;

/// Uniform vectors consumed by one bone matrix.
pub const UNIFORMS_PER_BONE: u32 = 4;

/// Every axis along which generated shader source can vary.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramParameters {
    /// `None` for materials compiled from their own source.
    pub shader_id: Option<ShaderId>,

    pub precision: Precision,
    pub supports_vertex_textures: bool,

    // === Encodings & texture slots ===
    pub output_encoding: ColorEncoding,
    pub map: bool,
    pub map_encoding: ColorEncoding,
    pub env_map: bool,
    pub env_map_mode: Option<Mapping>,
    pub env_map_encoding: ColorEncoding,
    pub env_map_cube_uv: bool,
    pub light_map: bool,
    pub ao_map: bool,
    pub emissive_map: bool,
    pub emissive_map_encoding: ColorEncoding,
    pub bump_map: bool,
    pub normal_map: bool,
    pub displacement_map: bool,
    pub roughness_map: bool,
    pub metalness_map: bool,
    pub specular_map: bool,
    pub alpha_map: bool,
    pub gradient_map: bool,

    // === Shading ===
    pub combine: Option<Combine>,
    pub vertex_colors: VertexColors,

    pub fog: bool,
    pub use_fog: bool,
    pub fog_exp: bool,

    pub flat_shading: bool,
    pub size_attenuation: bool,
    pub logarithmic_depth_buffer: bool,

    // === Skinning & morphing ===
    pub skinning: bool,
    pub max_bones: u32,
    pub use_vertex_texture: bool,

    pub morph_targets: bool,
    pub morph_normals: bool,
    pub max_morph_targets: u32,
    pub max_morph_normals: u32,

    // === Lights & shadows ===
    pub num_dir_lights: u32,
    pub num_point_lights: u32,
    pub num_spot_lights: u32,
    pub num_rect_area_lights: u32,
    pub num_hemi_lights: u32,

    pub num_clipping_planes: u32,
    pub num_clip_intersection: u32,

    pub dithering: bool,

    pub shadow_map_enabled: bool,
    pub shadow_map_type: ShadowMapType,

    pub tone_mapping: ToneMapping,
    pub physically_correct_lights: bool,

    // === Output ===
    pub premultiplied_alpha: bool,
    /// Cutoff with `-0.0` and NaN folded to `0.0`.
    pub alpha_test: f32,
    pub double_sided: bool,
    pub flip_sided: bool,
    pub depth_packing: Option<DepthPacking>,
}

/// Derives [`ProgramParameters`] against one renderer and device.
pub struct ParameterDeriver<'a> {
    renderer: &'a dyn RendererState,
    capabilities: &'a dyn GpuCapabilities,
    library: &'a ShaderLibrary,
}

impl<'a> ParameterDeriver<'a> {
    #[must_use]
    pub fn new(
        renderer: &'a dyn RendererState,
        capabilities: &'a dyn GpuCapabilities,
        library: &'a ShaderLibrary,
    ) -> Self {
        Self {
            renderer,
            capabilities,
            library,
        }
    }

    #[must_use]
    pub fn derive(
        &self,
        material: &Material,
        lights: &LightState,
        fog: Option<&Fog>,
        num_clipping_planes: u32,
        num_clip_intersection: u32,
        object: &RenderObject,
    ) -> ProgramParameters {
        let renderer = self.renderer;
        let caps = self.capabilities;

        let max_bones = object
            .skeleton
            .as_ref()
            .map_or(0, |skeleton| allocate_bones(skeleton, caps));

        let precision = self.resolve_precision(material);

        let gamma_input = renderer.gamma_input();
        let env_map_mode = material.env_map.as_ref().map(|env| env.texture().mapping);
        let shadow_map = renderer.shadow_map();

        ProgramParameters {
            shader_id: self.library.get(material.kind),

            precision,
            supports_vertex_textures: caps.vertex_textures(),

            output_encoding: output_encoding(renderer.render_target(), renderer.gamma_output()),
            map: material.map.is_some(),
            map_encoding: resolve_encoding(material.map.as_ref(), gamma_input),
            env_map: material.env_map.is_some(),
            env_map_mode,
            env_map_encoding: resolve_encoding(material.env_map.as_ref(), gamma_input),
            env_map_cube_uv: env_map_mode.is_some_and(Mapping::is_cube_uv),
            light_map: material.light_map.is_some(),
            ao_map: material.ao_map.is_some(),
            emissive_map: material.emissive_map.is_some(),
            emissive_map_encoding: resolve_encoding(material.emissive_map.as_ref(), gamma_input),
            bump_map: material.bump_map.is_some(),
            normal_map: material.normal_map.is_some(),
            displacement_map: material.displacement_map.is_some(),
            roughness_map: material.roughness_map.is_some(),
            metalness_map: material.metalness_map.is_some(),
            specular_map: material.specular_map.is_some(),
            alpha_map: material.alpha_map.is_some(),
            gradient_map: material.gradient_map.is_some(),

            combine: material.combine,
            vertex_colors: material.vertex_colors,

            fog: fog.is_some(),
            use_fog: material.fog,
            fog_exp: fog.is_some_and(Fog::is_exp2),

            flat_shading: material.shading == Shading::Flat,
            size_attenuation: material.size_attenuation,
            logarithmic_depth_buffer: caps.logarithmic_depth_buffer(),

            skinning: material.skinning && max_bones > 0,
            max_bones,
            use_vertex_texture: caps.float_vertex_textures(),

            morph_targets: material.morph_targets,
            morph_normals: material.morph_normals,
            max_morph_targets: renderer.max_morph_targets(),
            max_morph_normals: renderer.max_morph_normals(),

            num_dir_lights: lights.directional,
            num_point_lights: lights.point,
            num_spot_lights: lights.spot,
            num_rect_area_lights: lights.rect_area,
            num_hemi_lights: lights.hemi,

            num_clipping_planes,
            num_clip_intersection,

            dithering: material.dithering,

            shadow_map_enabled: shadow_map.enabled && object.receive_shadow && lights.shadows > 0,
            shadow_map_type: shadow_map.map_type,

            tone_mapping: renderer.tone_mapping(),
            physically_correct_lights: renderer.physically_correct_lights(),

            premultiplied_alpha: material.premultiplied_alpha,
            alpha_test: alpha_cutoff(material.alpha_test),
            double_sided: material.side == Side::Double,
            flip_sided: material.side == Side::Back,
            depth_packing: material.depth_packing,
        }
    }

    fn resolve_precision(&self, material: &Material) -> Precision {
        let Some(requested) = material.precision else {
            return self.renderer.precision();
        };

        let precision = self.capabilities.max_precision(requested);
        if precision != requested {
            log::warn!("Programs: {requested} not supported, using {precision} instead.");
        }
        precision
    }
}

/// Number of bone matrices a program must reserve for `skeleton`.
///
/// Returns `0` (skinning disabled) when the skeleton does not fit in the
/// vertex uniform budget.
#[must_use]
pub fn allocate_bones(skeleton: &Skeleton, caps: &dyn GpuCapabilities) -> u32 {
    if caps.float_vertex_textures() {
        return BONE_TEXTURE_CAPACITY;
    }

    let available = caps
        .max_vertex_uniforms()
        .saturating_sub(RESERVED_VERTEX_UNIFORMS);
    let budget = available / UNIFORMS_PER_BONE;

    let max_bones = budget.min(skeleton.bone_count);
    if max_bones < skeleton.bone_count {
        log::warn!(
            "Programs: Skeleton '{}' has {} bones. This GPU supports {}.",
            skeleton.name,
            skeleton.bone_count,
            max_bones
        );
        return 0;
    }

    max_bones
}

/// Encoding of whatever is bound to a material slot.
///
/// A linear result is promoted to [`ColorEncoding::Gamma`] when the legacy
/// `gamma_override` flag is set.
#[must_use]
pub fn resolve_encoding(map: Option<&TextureBinding>, gamma_override: bool) -> ColorEncoding {
    let encoding = match map {
        None => ColorEncoding::Linear,
        Some(TextureBinding::Texture(texture)) => texture.encoding,
        Some(TextureBinding::RenderTarget(target)) => {
            log::warn!(
                "Programs: don't use render targets as textures. Use their `texture` field instead."
            );
            target.texture.encoding
        }
    };

    apply_gamma_override(encoding, gamma_override)
}

/// Encoding of the current output: the render target's color texture, or
/// linear for the default framebuffer.
#[must_use]
pub fn output_encoding(target: Option<&RenderTarget>, gamma_output: bool) -> ColorEncoding {
    let encoding = target.map_or(ColorEncoding::Linear, |target| target.texture.encoding);
    apply_gamma_override(encoding, gamma_output)
}

#[inline]
/// `-0.0` and NaN both mean "no alpha test".
fn alpha_cutoff(value: f32) -> f32 {
    if value == 0.0 || value.is_nan() {
        0.0
    } else {
        value
    }
}

fn apply_gamma_override(encoding: ColorEncoding, gamma_override: bool) -> ColorEncoding {
    if encoding == ColorEncoding::Linear && gamma_override {
        ColorEncoding::Gamma
    } else {
        encoding
    }
}
