//! Storyteller domain model.

pub mod allocator;
pub mod dealing;
pub mod grimoire;
