//! Renderer-side state consumed by program selection.
//!
//! - [`capabilities`]: what the device can do
//! - [`settings`]: what the renderer has been configured to do
//! - [`programs`]: variant derivation, keys and the program pool

pub mod capabilities;
pub mod programs;
pub mod settings;
