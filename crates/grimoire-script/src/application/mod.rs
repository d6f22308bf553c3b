//! Script loading and rendering.

pub mod loader;
pub mod summary;
