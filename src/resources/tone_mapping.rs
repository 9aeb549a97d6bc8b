//! Tone Mapping Configuration
//!
//! Tone mapping mode selection as pure data. Placed in the resources layer so
//! both renderer settings and program parameters can refer to it.

use serde::{Deserialize, Serialize};

/// Tone mapping algorithm applied at the end of the fragment shader.
///
/// - [`None`](ToneMapping::None): No tone mapping
/// - [`Linear`](ToneMapping::Linear): Exposure scale only
/// - [`Reinhard`](ToneMapping::Reinhard): Classic operator, soft highlight rolloff
/// - [`Uncharted2`](ToneMapping::Uncharted2): Filmic curve from Uncharted 2
/// - [`Cineon`](ToneMapping::Cineon): Film emulation with extended range
/// - [`ACESFilmic`](ToneMapping::ACESFilmic): Industry standard filmic curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneMapping {
    #[default]
    None,
    Linear,
    Reinhard,
    Uncharted2,
    Cineon,
    #[serde(rename = "aces_filmic")]
    ACESFilmic,
}

impl ToneMapping {
    /// Stable token used in program keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Linear => "linear",
            Self::Reinhard => "reinhard",
            Self::Uncharted2 => "uncharted2",
            Self::Cineon => "cineon",
            Self::ACESFilmic => "aces_filmic",
        }
    }
}
