use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::renderer::capabilities::Precision;
use crate::renderer::programs::ShaderSource;
use crate::resources::shader_defines::ShaderDefines;
use crate::resources::texture::TextureBinding;

// ============================================================================
// Material kinds
// ============================================================================

/// Behavioural kind of a material.
///
/// The kind selects a shader family through the
/// [`ShaderLibrary`](crate::ShaderLibrary). Kinds without a family entry
/// (`Shader`, `RawShader` and unregistered `Custom` kinds) are compiled from
/// the material's own vertex/fragment source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    MeshDepth,
    MeshNormal,
    MeshBasic,
    MeshLambert,
    MeshPhong,
    MeshToon,
    MeshStandard,
    MeshPhysical,
    LineBasic,
    LineDashed,
    Points,
    Shader,
    RawShader,
    Custom(&'static str),
}

impl MaterialKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MeshDepth => "MeshDepthMaterial",
            Self::MeshNormal => "MeshNormalMaterial",
            Self::MeshBasic => "MeshBasicMaterial",
            Self::MeshLambert => "MeshLambertMaterial",
            Self::MeshPhong => "MeshPhongMaterial",
            Self::MeshToon => "MeshToonMaterial",
            Self::MeshStandard => "MeshStandardMaterial",
            Self::MeshPhysical => "MeshPhysicalMaterial",
            Self::LineBasic => "LineBasicMaterial",
            Self::LineDashed => "LineDashedMaterial",
            Self::Points => "PointsMaterial",
            Self::Shader => "ShaderMaterial",
            Self::RawShader => "RawShaderMaterial",
            Self::Custom(name) => name,
        }
    }
}

// ============================================================================
// Pipeline-relevant enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shading {
    Flat,
    #[default]
    Smooth,
}

/// How the environment map is combined with the surface color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Combine {
    #[default]
    Multiply,
    Mix,
    Add,
}

impl Combine {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Multiply => "multiply",
            Self::Mix => "mix",
            Self::Add => "add",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexColors {
    #[default]
    None,
    Face,
    Vertex,
}

impl VertexColors {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Face => "face",
            Self::Vertex => "vertex",
        }
    }
}

/// Depth output packing for depth materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthPacking {
    Basic,
    Rgba,
}

impl DepthPacking {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Rgba => "rgba",
        }
    }
}

// ============================================================================
// Shader modifier hook
// ============================================================================

/// Per-material hook that edits the shader source right before compilation.
///
/// The hook's `source` text identifies it inside program keys: two modifiers
/// with the same source text must perform the same edit.
#[derive(Clone)]
pub struct ShaderModifier {
    source: Cow<'static, str>,
    callback: Arc<dyn Fn(&mut ShaderSource) + Send + Sync>,
}

impl ShaderModifier {
    pub fn new<F>(source: impl Into<Cow<'static, str>>, callback: F) -> Self
    where
        F: Fn(&mut ShaderSource) + Send + Sync + 'static,
    {
        Self {
            source: source.into(),
            callback: Arc::new(callback),
        }
    }

    /// Serialized identity of the hook.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn apply(&self, shader: &mut ShaderSource) {
        (self.callback)(shader);
    }
}

impl fmt::Debug for ShaderModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderModifier")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Material
// ============================================================================

/// The variant-relevant view of a material.
///
/// Only state that changes generated shader source lives here; uniform values
/// (colors, roughness, …) are not part of a program's identity.
#[derive(Debug, Clone)]
pub struct Material {
    pub kind: MaterialKind,

    /// Explicit precision request; `None` uses the renderer default.
    pub precision: Option<Precision>,

    // === Texture slots ===
    pub map: Option<TextureBinding>,
    pub env_map: Option<TextureBinding>,
    pub light_map: Option<TextureBinding>,
    pub ao_map: Option<TextureBinding>,
    pub emissive_map: Option<TextureBinding>,
    pub bump_map: Option<TextureBinding>,
    pub normal_map: Option<TextureBinding>,
    pub displacement_map: Option<TextureBinding>,
    pub roughness_map: Option<TextureBinding>,
    pub metalness_map: Option<TextureBinding>,
    pub specular_map: Option<TextureBinding>,
    pub alpha_map: Option<TextureBinding>,
    pub gradient_map: Option<TextureBinding>,

    // === Shading ===
    /// Only basic / lambert / phong style materials combine an env map.
    pub combine: Option<Combine>,
    pub vertex_colors: VertexColors,
    pub fog: bool,
    pub shading: Shading,
    pub size_attenuation: bool,
    pub skinning: bool,
    pub morph_targets: bool,
    pub morph_normals: bool,
    pub dithering: bool,
    pub premultiplied_alpha: bool,
    pub alpha_test: f32,
    pub side: Side,
    pub depth_packing: Option<DepthPacking>,

    // === Custom source ===
    pub vertex_shader: Option<String>,
    pub fragment_shader: Option<String>,
    pub defines: ShaderDefines,
    pub on_before_compile: Option<ShaderModifier>,
}

impl Material {
    /// Creates a material with the per-kind defaults.
    #[must_use]
    pub fn new(kind: MaterialKind) -> Self {
        let combine = matches!(
            kind,
            MaterialKind::MeshBasic
                | MaterialKind::MeshLambert
                | MaterialKind::MeshPhong
                | MaterialKind::MeshToon
        )
        .then_some(Combine::Multiply);

        let fog = !matches!(
            kind,
            MaterialKind::MeshDepth
                | MaterialKind::MeshNormal
                | MaterialKind::Shader
                | MaterialKind::RawShader
        );

        Self {
            kind,
            precision: None,
            map: None,
            env_map: None,
            light_map: None,
            ao_map: None,
            emissive_map: None,
            bump_map: None,
            normal_map: None,
            displacement_map: None,
            roughness_map: None,
            metalness_map: None,
            specular_map: None,
            alpha_map: None,
            gradient_map: None,
            combine,
            vertex_colors: VertexColors::None,
            fog,
            shading: Shading::Smooth,
            size_attenuation: kind == MaterialKind::Points,
            skinning: false,
            morph_targets: false,
            morph_normals: false,
            dithering: false,
            premultiplied_alpha: false,
            alpha_test: 0.0,
            side: Side::Front,
            depth_packing: (kind == MaterialKind::MeshDepth).then_some(DepthPacking::Basic),
            vertex_shader: None,
            fragment_shader: None,
            defines: ShaderDefines::new(),
            on_before_compile: None,
        }
    }

    /// Creates a custom-source material.
    #[must_use]
    pub fn shader(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        let mut material = Self::new(MaterialKind::Shader);
        material.vertex_shader = Some(vertex.into());
        material.fragment_shader = Some(fragment.into());
        material
    }

    /// Applies the material's shader modifier (if any) to `shader`.
    ///
    /// Returns the input untouched when there is no modifier.
    #[must_use]
    pub fn modified_source<'a>(&self, shader: &'a ShaderSource) -> Cow<'a, ShaderSource> {
        match &self.on_before_compile {
            Some(modifier) => {
                let mut owned = shader.clone();
                modifier.apply(&mut owned);
                Cow::Owned(owned)
            }
            None => Cow::Borrowed(shader),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(MaterialKind::MeshBasic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_kind_defaults() {
        let phong = Material::new(MaterialKind::MeshPhong);
        assert_eq!(phong.combine, Some(Combine::Multiply));
        assert!(phong.fog);
        assert!(phong.depth_packing.is_none());

        let depth = Material::new(MaterialKind::MeshDepth);
        assert_eq!(depth.depth_packing, Some(DepthPacking::Basic));
        assert!(!depth.fog);
        assert!(depth.combine.is_none());

        let points = Material::new(MaterialKind::Points);
        assert!(points.size_attenuation);
    }

    #[test]
    fn shader_material_carries_source() {
        let material = Material::shader("vs", "fs");
        assert_eq!(material.kind, MaterialKind::Shader);
        assert_eq!(material.vertex_shader.as_deref(), Some("vs"));
        assert_eq!(material.fragment_shader.as_deref(), Some("fs"));
        assert!(!material.fog);
    }

    #[test]
    fn modifier_is_applied_to_a_copy() {
        let mut material = Material::new(MaterialKind::MeshBasic);
        material.on_before_compile = Some(ShaderModifier::new("append-marker", |s| {
            s.fragment.push_str("// marker");
        }));

        let base = ShaderSource::new("basic", "vs", "fs");
        let modified = material.modified_source(&base);

        assert_eq!(modified.fragment, "fs// marker");
        assert_eq!(base.fragment, "fs");
    }

    #[test]
    fn no_modifier_borrows() {
        let material = Material::default();
        let base = ShaderSource::new("basic", "vs", "fs");
        assert!(matches!(material.modified_source(&base), Cow::Borrowed(_)));
    }
}
