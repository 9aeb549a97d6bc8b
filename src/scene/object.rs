/// Skeleton attached to a skinned drawable.
///
/// Only the bone count matters here: it bounds how many bone matrices a
/// program variant has to reserve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    pub name: String,
    pub bone_count: u32,
}

impl Skeleton {
    #[must_use]
    pub fn new(name: &str, bone_count: u32) -> Self {
        Self {
            name: name.to_string(),
            bone_count,
        }
    }
}

/// The drawable being prepared for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderObject {
    /// Present only for skinned meshes.
    pub skeleton: Option<Skeleton>,
    pub receive_shadow: bool,
}

impl RenderObject {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn skinned(skeleton: Skeleton) -> Self {
        Self {
            skeleton: Some(skeleton),
            receive_shadow: false,
        }
    }

    #[must_use]
    pub fn with_receive_shadow(mut self, receive_shadow: bool) -> Self {
        self.receive_shadow = receive_shadow;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_skinned(&self) -> bool {
        self.skeleton.is_some()
    }
}
