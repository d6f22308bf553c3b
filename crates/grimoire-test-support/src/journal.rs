//! Shared, ordered record of every collaborator call made during a test.

use std::sync::{Arc, Mutex};

use grimoire_core::context::ChatMessage;
use grimoire_core::op::Op;
use grimoire_core::player::Seat;

/// One call made by the engine to a test double.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `DecisionOracle::build_role_messages`.
    BuildRoleMessages {
        /// Acting role id.
        role_id: String,
        /// Seat holding the role.
        seat: Option<Seat>,
    },
    /// `DecisionOracle::build_day_check_messages`.
    BuildDayCheckMessages {
        /// The day being checked.
        day: u32,
    },
    /// `DecisionOracle::invoke_role_ops`, with the history it received.
    InvokeRoleOps {
        /// Message history at the time of the call.
        messages: Vec<ChatMessage>,
    },
    /// `Storyteller::start_night`.
    StartNight(u32),
    /// `Storyteller::start_day`.
    StartDay(u32),
    /// `Storyteller::await_response`.
    AwaitResponse,
    /// `Storyteller::apply_ops`.
    ApplyOps(Vec<Op>),
    /// `Storyteller::end_conversation`.
    EndConversation,
}

impl Call {
    /// Returns `true` for calls that reach the oracle's decision endpoint.
    #[must_use]
    pub fn is_invocation(&self) -> bool {
        matches!(self, Self::InvokeRoleOps { .. })
    }

    /// Returns `true` for calls made to the storyteller.
    #[must_use]
    pub fn is_storyteller(&self) -> bool {
        matches!(
            self,
            Self::StartNight(_)
                | Self::StartDay(_)
                | Self::AwaitResponse
                | Self::ApplyOps(_)
                | Self::EndConversation
        )
    }
}

/// Cloneable handle to a shared call log. Hand the same journal to the oracle
/// and the storyteller doubles to assert on cross-collaborator ordering.
#[derive(Debug, Clone, Default)]
pub struct CallJournal {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallJournal {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    /// Returns a snapshot of every call so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls matching `predicate`.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    /// Message histories of every oracle invocation, in order.
    #[must_use]
    pub fn invocations(&self) -> Vec<Vec<ChatMessage>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::InvokeRoleOps { messages } => Some(messages),
                _ => None,
            })
            .collect()
    }

    /// Every batch handed to `apply_ops`, in order.
    #[must_use]
    pub fn applied_batches(&self) -> Vec<Vec<Op>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::ApplyOps(ops) => Some(ops),
                _ => None,
            })
            .collect()
    }
}
