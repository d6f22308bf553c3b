//! Grimoire — Decision Oracle adapter.
//!
//! Turns role conversations into chat-completion requests against an
//! OpenAI-compatible endpoint and decodes the model's answer into ops.

pub mod client;
pub mod decode;
pub mod oracle;
pub mod prompts;

pub use client::{ChatClient, ChatCompletion, ChatConfig, ChatError};
pub use decode::decode_ops;
pub use oracle::LlmOracle;
