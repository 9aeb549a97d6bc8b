//! Error Types
//!
//! This module defines the error types used by the program pool.
//!
//! # Overview
//!
//! Only *fatal* conditions are represented here:
//! - GPU program compilation failures
//! - Shader source that fails validation before reaching the driver
//! - Caller misuse of the pool (releasing an untracked program)
//!
//! Recoverable conditions (precision downgrade, bone budget overflow,
//! render targets sampled as textures) never surface as errors; they are
//! reported through `log::warn!` and resolved with a fallback value.
//!
//! # Usage
//!
//! ```rust,ignore
//! use myth_programs::errors::{ProgramError, Result};
//!
//! fn compile() -> Result<()> {
//!     Err(ProgramError::CompilationFailed {
//!         label: "basic".into(),
//!         message: "driver rejected program".into(),
//!     })
//! }
//! ```

use thiserror::Error;

use crate::renderer::programs::ProgramHandle;

/// Shader pipeline stage, used to attribute validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// The main error type for program pooling.
#[derive(Error, Debug)]
pub enum ProgramError {
    // ========================================================================
    // Compilation Errors
    // ========================================================================
    /// The compile routine failed to produce a program.
    #[error("Failed to compile program '{label}': {message}")]
    CompilationFailed {
        /// Short label identifying the variant (derived from its key)
        label: String,
        /// Backend-provided diagnostic
        message: String,
    },

    /// A shader stage failed parsing or validation.
    #[error("Invalid {stage} shader: {message}")]
    InvalidShader {
        /// Stage whose source was rejected
        stage: ShaderStage,
        /// Formatted parser/validator diagnostic
        message: String,
    },

    // ========================================================================
    // Pool Misuse
    // ========================================================================
    /// The handle does not refer to a live program in this pool.
    ///
    /// Either it was never acquired from this pool, or it has already been
    /// released as many times as it was acquired.
    #[error("Program {0:?} is not tracked by this pool")]
    UnknownProgram(ProgramHandle),
}

/// Alias for `Result<T, ProgramError>`.
pub type Result<T> = std::result::Result<T, ProgramError>;
