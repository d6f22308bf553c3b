//! The game engine: phase scheduler and per-role conversation loop.
//!
//! The engine is the only component with control flow. It walks the night
//! order, runs one bounded conversation per acting seat, hands every op batch
//! to the storyteller, and stops the whole session as soon as a result says
//! the game has ended. It never writes to the game state itself.

use std::sync::Arc;

use grimoire_core::context::{ChatMessage, DayCheckContext, Phase, RoleContext};
use grimoire_core::error::DomainError;
use grimoire_core::op::{AllowedOps, Op};
use grimoire_core::oracle::DecisionOracle;
use grimoire_core::player::Seat;
use grimoire_core::role::ScriptEntry;
use grimoire_core::state::GameState;
use grimoire_core::storyteller::Storyteller;
use grimoire_script::Script;
use grimoire_script::application::summary::render_summary;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::conversation::{
    EMPTY_DECISION_PROMPT, conversation_label, ops_message, player_response_message, time_label,
};
use crate::domain::config::EngineConfig;
use crate::domain::events::{Observer, SessionEvent};
use crate::domain::outcome::{ConversationOutcome, SessionOutcome};
use crate::domain::state::EngineState;
use crate::domain::table::render_state_table;

/// Runs one game session.
pub struct GameEngine {
    session_id: Uuid,
    script: Script,
    script_summary: String,
    state: Arc<dyn GameState>,
    oracle: Arc<dyn DecisionOracle>,
    storyteller: Arc<dyn Storyteller>,
    observer: Arc<dyn Observer>,
    config: EngineConfig,
    engine_state: EngineState,
}

impl GameEngine {
    /// Creates an engine for a fresh session.
    #[must_use]
    pub fn new(
        script: Script,
        state: Arc<dyn GameState>,
        oracle: Arc<dyn DecisionOracle>,
        storyteller: Arc<dyn Storyteller>,
        observer: Arc<dyn Observer>,
        config: EngineConfig,
    ) -> Self {
        let script_summary = render_summary(&script);
        Self {
            session_id: Uuid::new_v4(),
            script,
            script_summary,
            state,
            oracle,
            storyteller,
            observer,
            config,
            engine_state: EngineState::default(),
        }
    }

    /// The session identifier.
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Current counters and terminal flag.
    #[must_use]
    pub fn engine_state(&self) -> EngineState {
        self.engine_state
    }

    /// Runs the first night, then alternates day and night until the game
    /// ends or the cycle bound is reached.
    ///
    /// # Errors
    ///
    /// Propagates any oracle or storyteller failure; the session is aborted.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn run_session(&mut self) -> Result<SessionOutcome, DomainError> {
        info!(max_cycles = self.config.max_cycles, "session started");
        self.observer.observe(&SessionEvent::SessionStarted {
            session_id: self.session_id,
        });

        self.run_first_night().await?;
        let mut cycles = 0;
        while !self.engine_state.ended && cycles < self.config.max_cycles {
            self.run_day().await?;
            if self.engine_state.ended {
                break;
            }
            self.run_other_night().await?;
            cycles += 1;
        }

        let outcome = if self.engine_state.ended {
            info!(
                nights = self.engine_state.night,
                days = self.engine_state.day,
                "session ended"
            );
            SessionOutcome::Ended {
                nights: self.engine_state.night,
                days: self.engine_state.day,
            }
        } else {
            warn!(cycles, "cycle bound exhausted without a result");
            SessionOutcome::CycleBoundExhausted { cycles }
        };
        self.observer
            .observe(&SessionEvent::SessionFinished { outcome });
        Ok(outcome)
    }

    /// Runs night 1 using the first-night order.
    ///
    /// # Errors
    ///
    /// Propagates any oracle or storyteller failure.
    pub async fn run_first_night(&mut self) -> Result<(), DomainError> {
        if self.engine_state.ended {
            return Ok(());
        }
        self.engine_state.night = 1;
        self.run_night(Phase::FirstNight).await
    }

    /// Runs the next night using the other-night order.
    ///
    /// # Errors
    ///
    /// Propagates any oracle or storyteller failure.
    pub async fn run_other_night(&mut self) -> Result<(), DomainError> {
        if self.engine_state.ended {
            return Ok(());
        }
        self.engine_state.night += 1;
        self.run_night(Phase::OtherNight).await
    }

    #[instrument(skip(self), fields(session_id = %self.session_id, night = self.engine_state.night))]
    async fn run_night(&mut self, phase: Phase) -> Result<(), DomainError> {
        let night = self.engine_state.night;
        self.storyteller.start_night(night).await?;
        self.observer.observe(&SessionEvent::NightStarted { night });
        info!(%phase, "night started");

        let wake_order = self.script.night_order.for_phase(phase).to_vec();
        for role in &wake_order {
            for seat in self.state.seats_by_role(&role.id) {
                self.run_conversation(phase, role, Some(seat)).await?;
                if self.engine_state.ended {
                    return Ok(());
                }
            }
        }

        let table = render_state_table(&self.state.snapshot());
        self.observer
            .observe(&SessionEvent::NightEnded { night, table });
        info!("night ended");
        Ok(())
    }

    /// Runs the next day: announces it, waits for the day's interaction, then
    /// asks the oracle once whether the game is decided. An empty answer is
    /// not retried.
    ///
    /// # Errors
    ///
    /// Propagates any oracle or storyteller failure.
    #[instrument(skip(self), fields(session_id = %self.session_id, day = self.engine_state.day + 1))]
    pub async fn run_day(&mut self) -> Result<(), DomainError> {
        if self.engine_state.ended {
            return Ok(());
        }
        self.engine_state.day += 1;
        let day = self.engine_state.day;
        let time_label = time_label(Phase::Day, self.engine_state.night, day);

        self.storyteller.start_day(day).await?;
        self.observer.observe(&SessionEvent::DayStarted { day });
        info!("day started");

        let response = self.storyteller.await_response().await?;
        self.observer.observe(&SessionEvent::PlayerResponded {
            label: time_label.clone(),
            response,
        });

        let context = DayCheckContext {
            day,
            time_label: time_label.clone(),
            snapshot: self.state.snapshot(),
            script_summary: self.script_summary.clone(),
        };
        let label = conversation_label(&time_label, "win check", None);
        let messages = self.oracle.build_day_check_messages(&context);
        let ops = self.oracle.invoke_role_ops(&messages).await?;
        let ops = self.admit(AllowedOps::DAY_CHECK, ops, &label);
        if ops.is_empty() {
            debug!("win check returned no ops");
            return Ok(());
        }

        let result = self.storyteller.apply_ops(&ops).await?;
        info!(ops = ops.len(), ended = result.ended, "win check applied");
        self.observer
            .observe(&SessionEvent::OpsApplied { label, ops, result });
        if result.ended {
            self.engine_state.ended = true;
        }
        Ok(())
    }

    /// Runs the conversation for one acting seat.
    ///
    /// Each step invokes the oracle once. An empty answer is met with a
    /// corrective message and costs a step. A non-empty batch is applied:
    /// `ended` stops the session, `paused` waits for the human answer and
    /// takes another step, anything else completes the turn after this single
    /// round, with or without an `end_role` op. Unless the game ended, the
    /// storyteller is told the conversation is over.
    ///
    /// # Errors
    ///
    /// Propagates any oracle or storyteller failure.
    #[instrument(
        skip(self, role),
        fields(
            session_id = %self.session_id,
            %phase,
            role = %role.id,
            seat = ?seat,
            correlation_id = %Uuid::new_v4(),
        )
    )]
    pub async fn run_conversation(
        &mut self,
        phase: Phase,
        role: &ScriptEntry,
        seat: Option<Seat>,
    ) -> Result<ConversationOutcome, DomainError> {
        if self.engine_state.ended {
            return Ok(ConversationOutcome::Ended { steps: 0 });
        }

        let outcome = self.converse(phase, role, seat).await?;
        if !matches!(outcome, ConversationOutcome::Ended { .. }) {
            self.storyteller.end_conversation().await?;
        }
        Ok(outcome)
    }

    async fn converse(
        &mut self,
        phase: Phase,
        role: &ScriptEntry,
        seat: Option<Seat>,
    ) -> Result<ConversationOutcome, DomainError> {
        let time_label = time_label(phase, self.engine_state.night, self.engine_state.day);
        let label = conversation_label(&time_label, &role.id, seat);
        let context = RoleContext {
            phase,
            role: role.clone(),
            target_seat: seat,
            time_label,
            snapshot: self.state.snapshot(),
            script_summary: self.script_summary.clone(),
        };
        let mut messages: Vec<ChatMessage> = self.oracle.build_role_messages(&context);

        let max_steps = self.config.max_conversation_steps;
        let mut applied_rounds = 0;
        for step in 1..=max_steps {
            debug!(step, history = messages.len(), "invoking oracle");
            let ops = self.oracle.invoke_role_ops(&messages).await?;
            let ops = self.admit(AllowedOps::ROLE_CONVERSATION, ops, &label);
            if ops.is_empty() {
                warn!(step, "oracle made no decision; re-prompting");
                messages.push(ChatMessage::user(EMPTY_DECISION_PROMPT));
                continue;
            }

            messages.push(ops_message(&ops)?);
            let result = self.storyteller.apply_ops(&ops).await?;
            applied_rounds += 1;
            info!(
                step,
                ops = ops.len(),
                ended = result.ended,
                paused = result.paused,
                "ops applied"
            );
            self.observer.observe(&SessionEvent::OpsApplied {
                label: label.clone(),
                ops,
                result,
            });

            if result.ended {
                self.engine_state.ended = true;
                return Ok(ConversationOutcome::Ended { steps: step });
            }
            if result.paused {
                let response = self.storyteller.await_response().await?;
                messages.push(player_response_message(&response, &self.state.snapshot())?);
                self.observer.observe(&SessionEvent::PlayerResponded {
                    label: label.clone(),
                    response,
                });
                continue;
            }
            return Ok(ConversationOutcome::Completed { steps: step });
        }

        warn!(
            steps = max_steps,
            applied_rounds, "conversation step bound exhausted"
        );
        self.observer.observe(&SessionEvent::ConversationExhausted {
            label,
            steps: max_steps,
        });
        Ok(ConversationOutcome::StepBoundExhausted {
            steps: max_steps,
            applied_rounds,
        })
    }

    /// Applies the context's allowlist, reporting anything removed.
    fn admit(&self, allowed: AllowedOps, ops: Vec<Op>, label: &str) -> Vec<Op> {
        let filtered = allowed.filter(ops);
        if !filtered.rejected.is_empty() {
            let kinds: Vec<&str> = filtered.rejected.iter().map(|op| op.kind().as_str()).collect();
            warn!(?kinds, "ops rejected by allowlist");
            self.observer.observe(&SessionEvent::OpsRejected {
                label: label.to_owned(),
                ops: filtered.rejected,
            });
        }
        filtered.allowed
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("session_id", &self.session_id)
            .field("config", &self.config)
            .field("engine_state", &self.engine_state)
            .finish_non_exhaustive()
    }
}
