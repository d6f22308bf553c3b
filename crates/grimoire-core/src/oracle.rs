//! Decision oracle abstraction.

use async_trait::async_trait;

use crate::context::{ChatMessage, DayCheckContext, RoleContext};
use crate::error::DomainError;
use crate::op::Op;

/// External decision service that turns a conversation into ops.
#[async_trait]
pub trait DecisionOracle: Send + Sync {
    /// Builds the opening message history for a role conversation.
    fn build_role_messages(&self, context: &RoleContext) -> Vec<ChatMessage>;

    /// Builds the message history for the end-of-day win-condition check.
    fn build_day_check_messages(&self, context: &DayCheckContext) -> Vec<ChatMessage>;

    /// Asks the oracle for the next batch of ops. An empty batch means the
    /// oracle made no decision.
    async fn invoke_role_ops(&self, messages: &[ChatMessage]) -> Result<Vec<Op>, DomainError>;
}
