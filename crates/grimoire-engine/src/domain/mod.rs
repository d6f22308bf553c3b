//! Engine domain model.

pub mod config;
pub mod events;
pub mod outcome;
pub mod state;
pub mod table;
