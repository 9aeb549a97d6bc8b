//! Material kind → shader family table.
//!
//! Several material kinds share one family: standard and physical materials
//! both compile the `physical` shader, toon reuses `phong`, and line-basic
//! reuses `basic`. Kinds missing from the table have no family and are
//! compiled from the material's own source.

use rustc_hash::FxHashMap;

use crate::resources::material::MaterialKind;
use crate::utils::interner::{self, Symbol};

/// Interned shader family identifier (`"physical"`, `"phong"`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(Symbol);

impl ShaderId {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(interner::intern(name))
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        interner::resolve(self.0)
    }
}

impl std::fmt::Display for ShaderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const BUILTIN_SHADER_IDS: [(MaterialKind, &str); 11] = [
    (MaterialKind::MeshDepth, "depth"),
    (MaterialKind::MeshNormal, "normal"),
    (MaterialKind::MeshBasic, "basic"),
    (MaterialKind::MeshLambert, "lambert"),
    (MaterialKind::MeshPhong, "phong"),
    (MaterialKind::MeshToon, "phong"),
    (MaterialKind::MeshStandard, "physical"),
    (MaterialKind::MeshPhysical, "physical"),
    (MaterialKind::LineBasic, "basic"),
    (MaterialKind::LineDashed, "dashed"),
    (MaterialKind::Points, "points"),
];

/// Extensible mapping from material kind to shader family.
#[derive(Debug, Clone)]
pub struct ShaderLibrary {
    ids: FxHashMap<MaterialKind, ShaderId>,
}

impl Default for ShaderLibrary {
    fn default() -> Self {
        interner::preload_shader_ids();

        let mut library = Self::empty();
        for (kind, name) in BUILTIN_SHADER_IDS {
            library.insert(kind, ShaderId::new(name));
        }
        library
    }
}

impl ShaderLibrary {
    /// A table with no entries; every material falls back to raw source.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            ids: FxHashMap::default(),
        }
    }

    /// Registers (or replaces) the family for `kind`.
    pub fn insert(&mut self, kind: MaterialKind, id: ShaderId) -> Option<ShaderId> {
        self.ids.insert(kind, id)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, kind: MaterialKind) -> Option<ShaderId> {
        self.ids.get(&kind).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
