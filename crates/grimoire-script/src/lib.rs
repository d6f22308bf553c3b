//! Grimoire — Script context.
//!
//! Turns a raw role list into the playable role set and the two night-order
//! sequences the engine walks, and loads script files from disk.

pub mod application;
pub mod domain;

pub use domain::script::{NightOrder, Script, ScriptMeta, parse_script};
