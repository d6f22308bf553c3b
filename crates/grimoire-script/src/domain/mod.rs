//! Script domain model.

pub(crate) mod raw;
pub mod script;
