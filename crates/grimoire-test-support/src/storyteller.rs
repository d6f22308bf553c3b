//! Test storyteller — records calls and replays scripted results.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use grimoire_core::error::DomainError;
use grimoire_core::op::{Op, OpKind};
use grimoire_core::storyteller::{ApplyResult, PlayerResponse, Storyteller};

use crate::journal::{Call, CallJournal};

/// A storyteller that records every call in a [`CallJournal`] and never
/// touches any game state.
///
/// `apply_ops` returns queued results first; once the queue is empty the
/// result is inferred from the batch (`gameover` ends, `prompt_player`
/// pauses). `await_response` returns queued responses, then empty answers.
#[derive(Debug)]
pub struct RecordingStoryteller {
    journal: CallJournal,
    results: Mutex<VecDeque<ApplyResult>>,
    responses: Mutex<VecDeque<PlayerResponse>>,
}

impl RecordingStoryteller {
    /// Creates a storyteller that infers every result from the ops.
    #[must_use]
    pub fn new(journal: CallJournal) -> Self {
        Self {
            journal,
            results: Mutex::new(VecDeque::new()),
            responses: Mutex::new(VecDeque::new()),
        }
    }

    /// Queues explicit `apply_ops` results.
    #[must_use]
    pub fn with_results(self, results: Vec<ApplyResult>) -> Self {
        *self.results.lock().unwrap() = results.into();
        self
    }

    /// Queues `await_response` answers.
    #[must_use]
    pub fn with_responses(self, responses: Vec<PlayerResponse>) -> Self {
        *self.responses.lock().unwrap() = responses.into();
        self
    }
}

#[async_trait]
impl Storyteller for RecordingStoryteller {
    async fn start_night(&self, night: u32) -> Result<(), DomainError> {
        self.journal.record(Call::StartNight(night));
        Ok(())
    }

    async fn start_day(&self, day: u32) -> Result<(), DomainError> {
        self.journal.record(Call::StartDay(day));
        Ok(())
    }

    async fn await_response(&self) -> Result<PlayerResponse, DomainError> {
        self.journal.record(Call::AwaitResponse);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(PlayerResponse {
                seat: None,
                text: String::new(),
                context: None,
            }))
    }

    async fn apply_ops(&self, ops: &[Op]) -> Result<ApplyResult, DomainError> {
        self.journal.record(Call::ApplyOps(ops.to_vec()));
        let scripted = self.results.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or_else(|| ApplyResult {
            ended: ops.iter().any(|op| op.kind() == OpKind::Gameover),
            paused: ops.iter().any(|op| op.kind() == OpKind::PromptPlayer),
        }))
    }

    async fn end_conversation(&self) -> Result<(), DomainError> {
        self.journal.record(Call::EndConversation);
        Ok(())
    }
}
