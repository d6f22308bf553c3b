//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Default number of Day/OtherNight cycles before the session is abandoned.
pub const DEFAULT_MAX_CYCLES: u32 = 20;

/// Default number of oracle steps a single role conversation may take.
pub const DEFAULT_MAX_CONVERSATION_STEPS: u32 = 10;

/// Loop bounds. Both are runaway protection, not success conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Day/OtherNight cycles after the first night.
    pub max_cycles: u32,
    /// Oracle invocations per role conversation.
    pub max_conversation_steps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_cycles: DEFAULT_MAX_CYCLES,
            max_conversation_steps: DEFAULT_MAX_CONVERSATION_STEPS,
        }
    }
}
