//! Utility Module
//!
//! - [`interner`]: String interning for shader family ids and macro names
//!
//! ```rust,ignore
//! use myth_programs::utils::interner;
//!
//! let sym1 = interner::intern("USE_SKINNING");
//! let sym2 = interner::intern("USE_SKINNING");
//! assert_eq!(sym1, sym2); // O(1) comparison
//! ```

pub mod interner;

pub use interner::Symbol;
