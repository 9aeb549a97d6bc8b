use std::sync::Arc;

// ============================================================================
// Color encodings & mappings
// ============================================================================

/// Transfer function associated with a texture or an output target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorEncoding {
    #[default]
    Linear,
    Srgb,
    /// Legacy gamma-corrected encoding, selected by the renderer's gamma flags.
    Gamma,
    Rgbe,
    LogLuv,
    Rgbm7,
    Rgbm16,
    Rgbd,
}

impl ColorEncoding {
    /// Stable token used in program keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Srgb => "srgb",
            Self::Gamma => "gamma",
            Self::Rgbe => "rgbe",
            Self::LogLuv => "logluv",
            Self::Rgbm7 => "rgbm7",
            Self::Rgbm16 => "rgbm16",
            Self::Rgbd => "rgbd",
        }
    }
}

/// How a texture is addressed when sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mapping {
    #[default]
    Uv,
    CubeReflection,
    CubeRefraction,
    EquirectangularReflection,
    EquirectangularRefraction,
    SphericalReflection,
    CubeUvReflection,
    CubeUvRefraction,
}

impl Mapping {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uv => "uv",
            Self::CubeReflection => "cube_reflection",
            Self::CubeRefraction => "cube_refraction",
            Self::EquirectangularReflection => "equirect_reflection",
            Self::EquirectangularRefraction => "equirect_refraction",
            Self::SphericalReflection => "spherical_reflection",
            Self::CubeUvReflection => "cube_uv_reflection",
            Self::CubeUvRefraction => "cube_uv_refraction",
        }
    }

    /// Whether this is one of the pre-filtered cube-UV layouts.
    #[inline]
    #[must_use]
    pub fn is_cube_uv(self) -> bool {
        matches!(self, Self::CubeUvReflection | Self::CubeUvRefraction)
    }
}

// ============================================================================
// Textures & render targets
// ============================================================================

/// The subset of texture state that influences shader variants.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Texture {
    pub encoding: ColorEncoding,
    pub mapping: Mapping,
}

impl Texture {
    #[must_use]
    pub fn new(encoding: ColorEncoding) -> Self {
        Self {
            encoding,
            mapping: Mapping::Uv,
        }
    }

    #[must_use]
    pub fn with_mapping(mut self, mapping: Mapping) -> Self {
        self.mapping = mapping;
        self
    }
}

/// An offscreen render target. Its color attachment is exposed as `texture`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderTarget {
    pub texture: Texture,
}

impl RenderTarget {
    #[must_use]
    pub fn new(texture: Texture) -> Self {
        Self { texture }
    }
}

/// Whatever a material slot has been bound to.
///
/// Binding a [`RenderTarget`] directly is tolerated but discouraged; bind its
/// `texture` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureBinding {
    Texture(Arc<Texture>),
    RenderTarget(Arc<RenderTarget>),
}

impl TextureBinding {
    /// The texture that will actually be sampled.
    #[must_use]
    pub fn texture(&self) -> &Texture {
        match self {
            Self::Texture(texture) => texture,
            Self::RenderTarget(target) => &target.texture,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_render_target(&self) -> bool {
        matches!(self, Self::RenderTarget(_))
    }
}

impl From<Texture> for TextureBinding {
    fn from(texture: Texture) -> Self {
        Self::Texture(Arc::new(texture))
    }
}

impl From<Arc<Texture>> for TextureBinding {
    fn from(texture: Arc<Texture>) -> Self {
        Self::Texture(texture)
    }
}

impl From<RenderTarget> for TextureBinding {
    fn from(target: RenderTarget) -> Self {
        Self::RenderTarget(Arc::new(target))
    }
}
