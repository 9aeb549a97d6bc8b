//! GPU Capabilities
//!
//! Read-only view of what the device can do, as far as shader variants are
//! concerned. The deriver only talks to the [`GpuCapabilities`] trait; the
//! concrete [`Capabilities`] record is what hosts normally hand in.
//!
//! # Defaults
//!
//! | Field                      | Default |
//! |----------------------------|---------|
//! | `max_vertex_uniforms`      | `1024`  |
//! | `vertex_textures`          | `true`  |
//! | `float_vertex_textures`    | `true`  |
//! | `logarithmic_depth_buffer` | `false` |
//! | `max_precision`            | `High`  |

use serde::{Deserialize, Serialize};

/// Shader arithmetic precision, ordered from lowest to highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Precision {
    #[serde(rename = "lowp", alias = "low")]
    Low,
    #[serde(rename = "mediump", alias = "medium")]
    Medium,
    #[default]
    #[serde(rename = "highp", alias = "high")]
    High,
}

impl Precision {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "lowp",
            Self::Medium => "mediump",
            Self::High => "highp",
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability queries used during parameter derivation.
pub trait GpuCapabilities {
    /// Number of 4-component uniform vectors available to the vertex stage.
    fn max_vertex_uniforms(&self) -> u32;

    /// Whether the vertex stage can sample textures at all.
    fn vertex_textures(&self) -> bool;

    /// Whether the vertex stage can sample floating-point textures, which
    /// allows bone matrices to be stored in a texture.
    fn float_vertex_textures(&self) -> bool;

    fn logarithmic_depth_buffer(&self) -> bool;

    /// Highest supported precision not above `requested`.
    fn max_precision(&self, requested: Precision) -> Precision;
}

/// Concrete capability record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub max_vertex_uniforms: u32,
    pub vertex_textures: bool,
    pub float_vertex_textures: bool,
    pub logarithmic_depth_buffer: bool,
    /// Highest precision the device supports.
    pub max_precision: Precision,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            max_vertex_uniforms: 1024,
            vertex_textures: true,
            float_vertex_textures: true,
            logarithmic_depth_buffer: false,
            max_precision: Precision::High,
        }
    }
}

impl Capabilities {
    /// Derives capabilities from a set of `wgpu` limits.
    ///
    /// Uniform vectors are counted as 16-byte slots of the largest uniform
    /// binding. Bones go through a float texture whenever the vertex stage
    /// can sample textures, since every `wgpu` backend filters `f32` formats.
    #[must_use]
    pub fn from_wgpu_limits(limits: &wgpu::Limits) -> Self {
        let binding_size = u64::from(limits.max_uniform_buffer_binding_size);
        let max_vertex_uniforms = u32::try_from(binding_size / 16).unwrap_or(u32::MAX);
        let vertex_textures = limits.max_sampled_textures_per_shader_stage > 0;

        Self {
            max_vertex_uniforms,
            vertex_textures,
            float_vertex_textures: vertex_textures,
            logarithmic_depth_buffer: true,
            max_precision: Precision::High,
        }
    }
}

impl GpuCapabilities for Capabilities {
    fn max_vertex_uniforms(&self) -> u32 {
        self.max_vertex_uniforms
    }

    fn vertex_textures(&self) -> bool {
        self.vertex_textures
    }

    fn float_vertex_textures(&self) -> bool {
        self.float_vertex_textures
    }

    fn logarithmic_depth_buffer(&self) -> bool {
        self.logarithmic_depth_buffer
    }

    fn max_precision(&self, requested: Precision) -> Precision {
        requested.min(self.max_precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_is_clamped_to_device_maximum() {
        let caps = Capabilities {
            max_precision: Precision::Medium,
            ..Default::default()
        };

        assert_eq!(caps.max_precision(Precision::High), Precision::Medium);
        assert_eq!(caps.max_precision(Precision::Medium), Precision::Medium);
        assert_eq!(caps.max_precision(Precision::Low), Precision::Low);
    }

    #[test]
    fn from_default_wgpu_limits() {
        let caps = Capabilities::from_wgpu_limits(&wgpu::Limits::default());

        assert!(caps.max_vertex_uniforms >= 1024);
        assert!(caps.vertex_textures);
        assert!(caps.float_vertex_textures);
    }

    #[test]
    fn no_sampled_textures_disables_vertex_textures() {
        let mut limits = wgpu::Limits::default();
        limits.max_sampled_textures_per_shader_stage = 0;
        let caps = Capabilities::from_wgpu_limits(&limits);

        assert!(!caps.vertex_textures);
        assert!(!caps.float_vertex_textures);
    }
}
