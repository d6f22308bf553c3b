//! Grimoire — Turn Orchestration context.
//!
//! Responsible for the night/day phase scheduler, the per-role conversation
//! loop between the decision oracle and the storyteller, and session
//! termination.

pub mod application;
pub mod domain;

pub use application::engine::GameEngine;
pub use domain::config::EngineConfig;
pub use domain::outcome::{ConversationOutcome, SessionOutcome};
