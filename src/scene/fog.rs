use glam::Vec3;

/// Scene fog. Only its presence and kind affect shader variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Fog {
    /// Fog that grows linearly between `near` and `far`.
    Linear { color: Vec3, near: f32, far: f32 },
    /// Exponential squared fog.
    Exp2 { color: Vec3, density: f32 },
}

impl Fog {
    #[must_use]
    pub fn linear(color: Vec3, near: f32, far: f32) -> Self {
        Self::Linear { color, near, far }
    }

    #[must_use]
    pub fn exp2(color: Vec3, density: f32) -> Self {
        Self::Exp2 { color, density }
    }

    #[inline]
    #[must_use]
    pub fn is_exp2(&self) -> bool {
        matches!(self, Self::Exp2 { .. })
    }
}
