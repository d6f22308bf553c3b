//! Grimoire Core — shared domain types and collaborator traits.
//!
//! This crate defines the vocabulary every other crate speaks: seats and
//! players, script entries, ops, conversation contexts, and the traits for
//! the game state, the decision oracle and the storyteller. It contains no
//! infrastructure code.

pub mod allocation;
pub mod clock;
pub mod context;
pub mod error;
pub mod op;
pub mod oracle;
pub mod player;
pub mod rng;
pub mod role;
pub mod state;
pub mod storyteller;
