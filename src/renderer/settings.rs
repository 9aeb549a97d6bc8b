//! Renderer Settings & Renderer State
//!
//! [`RendererSettings`] is the configuration surface for everything the
//! renderer contributes to shader variants. [`RendererState`] is the query
//! interface the parameter deriver reads it through, and [`RendererContext`]
//! is the stock implementation: settings plus the currently bound render
//! target.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use myth_programs::{RendererSettings, ToneMapping};
//!
//! let settings = RendererSettings {
//!     tone_mapping: ToneMapping::ACESFilmic,
//!     physically_correct_lights: true,
//!     ..Default::default()
//! };
//!
//! // Or from a JSON config file
//! let settings: RendererSettings = serde_json::from_str(r#"{ "gamma_output": true }"#)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::renderer::capabilities::Precision;
use crate::resources::texture::RenderTarget;
use crate::resources::tone_mapping::ToneMapping;

// ---------------------------------------------------------------------------
// Shadow maps
// ---------------------------------------------------------------------------

/// Shadow map filtering technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowMapType {
    Basic,
    #[default]
    Pcf,
    PcfSoft,
}

impl ShadowMapType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Pcf => "pcf",
            Self::PcfSoft => "pcf_soft",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowMapSettings {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub map_type: ShadowMapType,
}

// ---------------------------------------------------------------------------
// RendererSettings
// ---------------------------------------------------------------------------

/// Renderer-wide configuration that feeds shader variant selection.
///
/// # Fields
///
/// | Field                       | Description                                   | Default |
/// |-----------------------------|-----------------------------------------------|---------|
/// | `precision`                 | Default shader precision                      | `High`  |
/// | `gamma_input`               | Treat linear input textures as gamma encoded  | `false` |
/// | `gamma_output`              | Gamma-encode linear output                    | `false` |
/// | `tone_mapping`              | Tone mapping mode                             | `None`  |
/// | `physically_correct_lights` | Physically based light falloff                | `false` |
/// | `shadow_map`                | Shadow map enablement and type                | off, `Pcf` |
/// | `max_morph_targets`         | Morph target attributes per program           | `8`     |
/// | `max_morph_normals`         | Morph normal attributes per program           | `4`     |
///
/// `gamma_input` and `gamma_output` are legacy switches kept for scenes
/// authored before per-texture encodings existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererSettings {
    pub precision: Precision,
    pub gamma_input: bool,
    pub gamma_output: bool,
    pub tone_mapping: ToneMapping,
    pub physically_correct_lights: bool,
    pub shadow_map: ShadowMapSettings,
    pub max_morph_targets: u32,
    pub max_morph_normals: u32,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            precision: Precision::High,
            gamma_input: false,
            gamma_output: false,
            tone_mapping: ToneMapping::None,
            physically_correct_lights: false,
            shadow_map: ShadowMapSettings::default(),
            max_morph_targets: 8,
            max_morph_normals: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// RendererState
// ---------------------------------------------------------------------------

/// Renderer state queries used during parameter derivation.
pub trait RendererState {
    /// The render target currently bound, or `None` for the default framebuffer.
    fn render_target(&self) -> Option<&RenderTarget>;

    fn precision(&self) -> Precision;

    fn gamma_input(&self) -> bool;

    fn gamma_output(&self) -> bool;

    fn tone_mapping(&self) -> ToneMapping;

    fn physically_correct_lights(&self) -> bool;

    fn shadow_map(&self) -> ShadowMapSettings;

    fn max_morph_targets(&self) -> u32;

    fn max_morph_normals(&self) -> u32;
}

/// Settings plus the current render target.
#[derive(Debug, Clone, Default)]
pub struct RendererContext {
    pub settings: RendererSettings,
    pub render_target: Option<RenderTarget>,
}

impl RendererContext {
    #[must_use]
    pub fn new(settings: RendererSettings) -> Self {
        Self {
            settings,
            render_target: None,
        }
    }

    pub fn set_render_target(&mut self, target: Option<RenderTarget>) {
        self.render_target = target;
    }
}

impl RendererState for RendererContext {
    fn render_target(&self) -> Option<&RenderTarget> {
        self.render_target.as_ref()
    }

    fn precision(&self) -> Precision {
        self.settings.precision
    }

    fn gamma_input(&self) -> bool {
        self.settings.gamma_input
    }

    fn gamma_output(&self) -> bool {
        self.settings.gamma_output
    }

    fn tone_mapping(&self) -> ToneMapping {
        self.settings.tone_mapping
    }

    fn physically_correct_lights(&self) -> bool {
        self.settings.physically_correct_lights
    }

    fn shadow_map(&self) -> ShadowMapSettings {
        self.settings.shadow_map
    }

    fn max_morph_targets(&self) -> u32 {
        self.settings.max_morph_targets
    }

    fn max_morph_normals(&self) -> u32 {
        self.settings.max_morph_normals
    }
}
