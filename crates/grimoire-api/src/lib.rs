//! Grimoire — runnable session host.
//!
//! Configuration, session bootstrap and the HTTP surface used to watch a
//! session and answer the storyteller's questions.

pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
