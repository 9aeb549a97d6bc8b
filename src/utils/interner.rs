//! Global String Interner
//!
//! Maps strings to compact integer [`Symbol`]s so that shader family ids and
//! macro names compare and hash as integers. Backed by a process-wide
//! [`ThreadedRodeo`]; interned strings live for the rest of the process.

use lasso::{Spur, ThreadedRodeo};
use once_cell::sync::Lazy;

static INTERNER: Lazy<ThreadedRodeo> = Lazy::new(ThreadedRodeo::new);

/// Compact interned string identifier.
pub type Symbol = Spur;

/// Interns a string, returning the existing symbol if already present.
#[inline]
pub fn intern(s: &str) -> Symbol {
    INTERNER.get_or_intern(s)
}

/// Looks up a string without interning it.
#[inline]
pub fn get(s: &str) -> Option<Symbol> {
    INTERNER.get(s)
}

/// Resolves a symbol back to its string.
#[inline]
pub fn resolve(sym: Symbol) -> &'static str {
    INTERNER.resolve(&sym)
}

/// Pre-interns the built-in shader family ids.
///
/// Called when a [`ShaderLibrary`](crate::ShaderLibrary) is built so that
/// the hot path never allocates for them.
pub fn preload_shader_ids() {
    let common = [
        "depth", "normal", "basic", "lambert", "phong", "physical", "dashed", "points",
    ];

    for name in common {
        intern(name);
    }
}
