//! Material Macro Definitions
//!
//! Custom `(name, value)` macro pairs declared on a material. They are part of
//! the program key, so they must serialize identically every time they are
//! visited.
//!
//! # Ordering
//!
//! Definitions keep their **declaration order**: the first `set` of a name
//! fixes its position, later `set`s of the same name update the value in
//! place. Two materials that declare the same macros in a different order
//! therefore produce different keys, exactly as their generated source would
//! differ.
//!
//! Names and values are interned [`Symbol`]s, so cloning and comparing
//! defines never touches string data.
//!
//! ```rust,ignore
//! use myth_programs::ShaderDefines;
//!
//! let mut defines = ShaderDefines::new();
//! defines.set("NUM_SAMPLES", "16");
//! defines.set("USE_RIM_LIGHT", "1");
//! ```

use crate::utils::interner::{self, Symbol};

/// Ordered collection of material macro definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ShaderDefines {
    defines: Vec<(Symbol, Symbol)>,
}

impl ShaderDefines {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            defines: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            defines: Vec::with_capacity(capacity),
        }
    }

    /// Sets a define. Existing names keep their position.
    pub fn set(&mut self, key: &str, value: &str) {
        let key_sym = interner::intern(key);
        let value_sym = interner::intern(value);
        self.set_symbol(key_sym, value_sym);
    }

    #[inline]
    pub fn set_symbol(&mut self, key: Symbol, value: Symbol) {
        match self.defines.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.defines.push((key, value)),
        }
    }

    /// Removes a define, preserving the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(key_sym) = interner::get(key) else {
            return false;
        };
        match self.defines.iter().position(|&(k, _)| k == key_sym) {
            Some(idx) => {
                self.defines.remove(idx);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        interner::get(key).is_some_and(|key_sym| self.defines.iter().any(|&(k, _)| k == key_sym))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'static str> {
        let key_sym = interner::get(key)?;
        self.defines
            .iter()
            .find(|&&(k, _)| k == key_sym)
            .map(|&(_, v)| interner::resolve(v))
    }

    #[inline]
    pub fn clear(&mut self) {
        self.defines.clear();
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.defines.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defines.is_empty()
    }

    /// Iterates defines as strings, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.defines
            .iter()
            .map(|&(k, v)| (interner::resolve(k), interner::resolve(v)))
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[(Symbol, Symbol)] {
        &self.defines
    }
}

impl From<&[(&str, &str)]> for ShaderDefines {
    fn from(defines: &[(&str, &str)]) -> Self {
        let mut result = Self::with_capacity(defines.len());
        for (k, v) in defines {
            result.set(k, v);
        }
        result
    }
}
