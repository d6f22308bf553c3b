//! Storyteller services and transports.

pub mod channel;
pub mod cli;
pub mod storyteller;
pub mod transport;
