//! Scene-side inputs to variant selection
//!
//! - Light: light components and the per-frame [`LightState`] summary
//! - Fog: scene fog
//! - RenderObject: the drawable (skinning, shadow reception)

pub mod fog;
pub mod light;
pub mod object;

pub use fog::Fog;
pub use light::{Light, LightKind, LightState};
pub use object::{RenderObject, Skeleton};
