// High-level abstraction: light component in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Ambient,
    Directional,
    Point,
    Spot,
    Hemisphere,
    RectArea,
}

/// A scene light as seen by variant selection: its kind and whether it
/// was asked to cast shadows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Light {
    pub kind: LightKind,
    pub cast_shadows: bool,
}

impl Light {
    #[must_use]
    pub fn new(kind: LightKind) -> Self {
        Self {
            kind,
            cast_shadows: false,
        }
    }

    #[must_use]
    pub fn with_shadows(mut self) -> Self {
        self.cast_shadows = true;
        self
    }

    /// Only directional, point and spot lights render shadow maps.
    #[must_use]
    pub fn casts_shadow_map(&self) -> bool {
        self.cast_shadows
            && matches!(
                self.kind,
                LightKind::Directional | LightKind::Point | LightKind::Spot
            )
    }
}

/// Per-type light counts for the current frame.
///
/// Only the counts matter for variant selection, so the lights themselves are
/// bucketed once per frame and this summary is handed to the deriver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightState {
    pub directional: u32,
    pub point: u32,
    pub spot: u32,
    pub rect_area: u32,
    pub hemi: u32,
    /// Number of lights that render a shadow map.
    pub shadows: u32,
}

impl LightState {
    #[must_use]
    pub fn from_lights<'a>(lights: impl IntoIterator<Item = &'a Light>) -> Self {
        let mut state = Self::default();
        for light in lights {
            match light.kind {
                LightKind::Ambient => {}
                LightKind::Directional => state.directional += 1,
                LightKind::Point => state.point += 1,
                LightKind::Spot => state.spot += 1,
                LightKind::Hemisphere => state.hemi += 1,
                LightKind::RectArea => state.rect_area += 1,
            }
            if light.casts_shadow_map() {
                state.shadows += 1;
            }
        }
        state
    }
}
