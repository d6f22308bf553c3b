//! Test oracles — `DecisionOracle` doubles.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use grimoire_core::context::{ChatMessage, DayCheckContext, RoleContext};
use grimoire_core::error::DomainError;
use grimoire_core::op::Op;
use grimoire_core::oracle::DecisionOracle;

use crate::journal::{Call, CallJournal};

/// An oracle that answers from a queue of op batches and records every call
/// in a [`CallJournal`]. Once the queue is drained it answers with no ops.
#[derive(Debug)]
pub struct ScriptedOracle {
    journal: CallJournal,
    batches: Mutex<VecDeque<Vec<Op>>>,
}

impl ScriptedOracle {
    /// Creates an oracle that never decides anything.
    #[must_use]
    pub fn new(journal: CallJournal) -> Self {
        Self::with_batches(journal, Vec::new())
    }

    /// Creates an oracle that answers with `batches`, one per invocation.
    #[must_use]
    pub fn with_batches(journal: CallJournal, batches: Vec<Vec<Op>>) -> Self {
        Self {
            journal,
            batches: Mutex::new(batches.into()),
        }
    }
}

#[async_trait]
impl DecisionOracle for ScriptedOracle {
    fn build_role_messages(&self, context: &RoleContext) -> Vec<ChatMessage> {
        self.journal.record(Call::BuildRoleMessages {
            role_id: context.role.id.clone(),
            seat: context.target_seat,
        });
        vec![
            ChatMessage::system(format!("act as storyteller for {}", context.role.id)),
            ChatMessage::user(format!(
                "{} {} seat={:?}",
                context.time_label, context.phase, context.target_seat
            )),
        ]
    }

    fn build_day_check_messages(&self, context: &DayCheckContext) -> Vec<ChatMessage> {
        self.journal
            .record(Call::BuildDayCheckMessages { day: context.day });
        vec![ChatMessage::system(format!("check win after {}", context.time_label))]
    }

    async fn invoke_role_ops(&self, messages: &[ChatMessage]) -> Result<Vec<Op>, DomainError> {
        self.journal.record(Call::InvokeRoleOps {
            messages: messages.to_vec(),
        });
        Ok(self
            .batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}

/// An oracle whose decision endpoint always fails. Useful for testing the
/// fail-fast path.
#[derive(Debug)]
pub struct FailingOracle;

#[async_trait]
impl DecisionOracle for FailingOracle {
    fn build_role_messages(&self, _context: &RoleContext) -> Vec<ChatMessage> {
        Vec::new()
    }

    fn build_day_check_messages(&self, _context: &DayCheckContext) -> Vec<ChatMessage> {
        Vec::new()
    }

    async fn invoke_role_ops(&self, _messages: &[ChatMessage]) -> Result<Vec<Op>, DomainError> {
        Err(DomainError::Oracle("model unavailable".into()))
    }
}
