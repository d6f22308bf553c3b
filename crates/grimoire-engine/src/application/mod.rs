//! Engine orchestration and observers.

pub mod engine;
pub mod observation;

mod conversation;
