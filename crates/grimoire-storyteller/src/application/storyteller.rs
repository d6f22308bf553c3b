//! The reference storyteller: applies op batches to the grimoire and relays
//! text through a transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use grimoire_core::error::DomainError;
use grimoire_core::op::Op;
use grimoire_core::player::{GameOutcome, Seat};
use grimoire_core::storyteller::{ApplyResult, PlayerResponse, Storyteller};
use tracing::{debug, info, instrument, warn};

use super::transport::Transport;
use crate::domain::grimoire::SharedGrimoire;

/// Question put to the table when no player prompt is pending.
pub const OPEN_QUESTION: &str =
    "The table may speak: nominations, executions or anything the storyteller should know.";

#[derive(Debug, Clone)]
struct QueuedPrompt {
    seat: Seat,
    text: String,
}

/// Applies ops to a [`SharedGrimoire`] and talks to players over a
/// [`Transport`].
///
/// `prompt_player` questions are queued rather than asked immediately; the
/// batch result is `paused` while any are outstanding, and `await_response`
/// asks them oldest first. Questions still queued when a conversation ends
/// are dropped.
pub struct GrimoireStoryteller {
    grimoire: SharedGrimoire,
    transport: Arc<dyn Transport>,
    prompts: Mutex<VecDeque<QueuedPrompt>>,
}

impl GrimoireStoryteller {
    /// Creates a storyteller writing to `grimoire`.
    #[must_use]
    pub fn new(grimoire: SharedGrimoire, transport: Arc<dyn Transport>) -> Self {
        Self {
            grimoire,
            transport,
            prompts: Mutex::new(VecDeque::new()),
        }
    }

    /// Number of prompts still waiting to be asked.
    #[must_use]
    pub fn pending_prompts(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn is_seated(&self, seat: Seat) -> bool {
        self.grimoire.read(|g| g.player(seat).is_some())
    }

    fn next_prompt(&self) -> Option<QueuedPrompt> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    async fn announce_outcome(&self, outcome: &GameOutcome) -> Result<(), DomainError> {
        let mut text = match &outcome.winner {
            Some(winner) => format!("Game over: {winner} wins."),
            None => "Game over.".to_owned(),
        };
        if let Some(reason) = &outcome.reason {
            text.push(' ');
            text.push_str(reason);
        }
        self.transport.broadcast(&text).await
    }
}

impl std::fmt::Debug for GrimoireStoryteller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrimoireStoryteller")
            .field("grimoire", &self.grimoire)
            .field("pending_prompts", &self.pending_prompts())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Storyteller for GrimoireStoryteller {
    async fn start_night(&self, night: u32) -> Result<(), DomainError> {
        info!(night, "night announced");
        self.transport.broadcast(&format!("Night {night} falls.")).await
    }

    async fn start_day(&self, day: u32) -> Result<(), DomainError> {
        info!(day, "day announced");
        self.transport.broadcast(&format!("Day {day} dawns.")).await
    }

    async fn await_response(&self) -> Result<PlayerResponse, DomainError> {
        match self.next_prompt() {
            Some(prompt) => {
                let text = self.transport.ask(Some(prompt.seat), &prompt.text).await?;
                Ok(PlayerResponse {
                    seat: Some(prompt.seat),
                    text,
                    context: Some(prompt.text),
                })
            }
            None => {
                let text = self.transport.ask(None, OPEN_QUESTION).await?;
                Ok(PlayerResponse {
                    seat: None,
                    text,
                    context: None,
                })
            }
        }
    }

    #[instrument(skip(self, ops), fields(ops = ops.len()))]
    async fn apply_ops(&self, ops: &[Op]) -> Result<ApplyResult, DomainError> {
        let mut result = ApplyResult::default();
        for op in ops {
            if let Some(seat) = op.seat()
                && !self.is_seated(seat)
            {
                warn!(kind = %op.kind(), %seat, "op names an empty seat; skipped");
                continue;
            }
            match op {
                Op::PromptPlayer { seat, text } => {
                    self.prompts
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push_back(QueuedPrompt {
                            seat: *seat,
                            text: text.clone(),
                        });
                }
                Op::SendToPlayer { seat, text } => self.transport.send(*seat, text).await?,
                Op::Broadcast { text } => self.transport.broadcast(text).await?,
                Op::AddToken { seat, token } => {
                    let added = self.grimoire.update(|g| g.add_token(*seat, token))?;
                    if !added {
                        debug!(%seat, token, "token already present");
                    }
                }
                Op::RemoveToken { seat, token } => {
                    let removed = self.grimoire.update(|g| g.remove_token(*seat, token))?;
                    if !removed {
                        warn!(%seat, token, "token to remove was not present");
                    }
                }
                Op::EndRole { reason } => debug!(?reason, "role ended"),
                Op::Gameover { winner, reason } => {
                    let outcome = GameOutcome {
                        winner: winner.clone(),
                        reason: reason.clone(),
                    };
                    self.grimoire.update(|g| g.record_outcome(outcome.clone()));
                    info!(?winner, "game over recorded");
                    self.announce_outcome(&outcome).await?;
                    result.ended = true;
                    break;
                }
            }
        }
        result.paused = !result.ended && self.pending_prompts() > 0;
        Ok(result)
    }

    async fn end_conversation(&self) -> Result<(), DomainError> {
        let dropped: Vec<QueuedPrompt> = self
            .prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        if !dropped.is_empty() {
            let seats: Vec<Seat> = dropped.iter().map(|p| p.seat).collect();
            warn!(?seats, "conversation ended with unanswered prompts; dropped");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::channel::{ChannelTransport, Delivery, PendingQuestion, TransportHandle};
    use crate::domain::grimoire::Grimoire;
    use grimoire_core::player::Player;
    use grimoire_core::state::GameState;

    fn setup() -> (GrimoireStoryteller, SharedGrimoire, TransportHandle) {
        let grimoire = SharedGrimoire::new(Grimoire::new(vec![
            Player::new(Seat(1), "monk"),
            Player::new(Seat(2), "poisoner"),
            Player::new(Seat(3), "imp"),
        ]));
        let (transport, handle) = ChannelTransport::connected();
        let storyteller = GrimoireStoryteller::new(grimoire.clone(), Arc::new(transport));
        (storyteller, grimoire, handle)
    }

    fn token(seat: u32, token: &str) -> Op {
        Op::AddToken {
            seat: Seat(seat),
            token: token.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_tokens_mutate_grimoire_and_repeat_add_is_noop() {
        // Arrange
        let (storyteller, grimoire, _handle) = setup();

        // Act
        let result = storyteller
            .apply_ops(&[token(3, "poisoned"), token(3, "poisoned"), token(1, "safe")])
            .await
            .unwrap();
        storyteller
            .apply_ops(&[Op::RemoveToken {
                seat: Seat(1),
                token: "safe".to_owned(),
            }])
            .await
            .unwrap();

        // Assert
        assert_eq!(result, ApplyResult::default());
        assert_eq!(grimoire.tokens(Seat(3)), vec!["poisoned"]);
        assert!(grimoire.tokens(Seat(1)).is_empty());
    }

    #[tokio::test]
    async fn test_messages_go_through_transport() {
        // Arrange
        let (storyteller, _grimoire, handle) = setup();

        // Act
        storyteller
            .apply_ops(&[
                Op::SendToPlayer {
                    seat: Seat(1),
                    text: "You learn a 2".to_owned(),
                },
                Op::Broadcast {
                    text: "Dawn".to_owned(),
                },
            ])
            .await
            .unwrap();

        // Assert
        assert_eq!(
            handle.deliveries(),
            vec![
                Delivery {
                    seat: Some(Seat(1)),
                    text: "You learn a 2".to_owned()
                },
                Delivery {
                    seat: None,
                    text: "Dawn".to_owned()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_seat_is_skipped() {
        let (storyteller, grimoire, handle) = setup();

        let result = storyteller
            .apply_ops(&[
                token(9, "ghost"),
                Op::SendToPlayer {
                    seat: Seat(9),
                    text: "hello?".to_owned(),
                },
            ])
            .await
            .unwrap();

        assert_eq!(result, ApplyResult::default());
        assert!(handle.deliveries().is_empty());
        assert!(grimoire.snapshot().players.iter().all(|p| p.tokens.is_empty()));
    }

    #[tokio::test]
    async fn test_prompt_pauses_until_answered() {
        // Arrange
        let (storyteller, _grimoire, handle) = setup();
        let result = storyteller
            .apply_ops(&[Op::PromptPlayer {
                seat: Seat(2),
                text: "Who do you poison?".to_owned(),
            }])
            .await
            .unwrap();
        let answerer = tokio::spawn(async move {
            let question = handle.next_question().await;
            handle.respond("seat 1").unwrap();
            question
        });

        // Act
        let response = storyteller.await_response().await.unwrap();

        // Assert
        assert!(result.paused);
        assert!(!result.ended);
        let question = answerer.await.unwrap();
        assert_eq!(question.seat, Some(Seat(2)));
        assert_eq!(response.seat, Some(Seat(2)));
        assert_eq!(response.text, "seat 1");
        assert_eq!(response.context.as_deref(), Some("Who do you poison?"));
        assert_eq!(storyteller.pending_prompts(), 0);
    }

    fn prompt(seat: u32, text: &str) -> Op {
        Op::PromptPlayer {
            seat: Seat(seat),
            text: text.to_owned(),
        }
    }

    /// Answers the next question with `text` and hands back what was asked.
    fn answer_next(
        handle: TransportHandle,
        text: &'static str,
    ) -> tokio::task::JoinHandle<PendingQuestion> {
        tokio::spawn(async move {
            let question = handle.next_question().await;
            handle.respond(text).unwrap();
            question
        })
    }

    #[tokio::test]
    async fn test_unanswered_prompt_does_not_pause_next_conversation() {
        // Arrange: two questions queued, only one answered before the
        // conversation gives up.
        let (storyteller, grimoire, handle) = setup();
        storyteller
            .apply_ops(&[prompt(2, "Who do you poison?"), prompt(3, "Who do you kill?")])
            .await
            .unwrap();
        let answerer = answer_next(handle, "seat 1");
        storyteller.await_response().await.unwrap();
        answerer.await.unwrap();
        assert_eq!(storyteller.pending_prompts(), 1);

        // Act
        storyteller.end_conversation().await.unwrap();
        let result = storyteller.apply_ops(&[token(1, "safe")]).await.unwrap();

        // Assert
        assert_eq!(storyteller.pending_prompts(), 0);
        assert!(!result.paused);
        assert_eq!(grimoire.tokens(Seat(1)), vec!["safe"]);
    }

    #[tokio::test]
    async fn test_day_response_asks_the_table_after_abandoned_prompt() {
        // Arrange
        let (storyteller, _grimoire, handle) = setup();
        storyteller
            .apply_ops(&[prompt(2, "Who do you poison?")])
            .await
            .unwrap();
        storyteller.end_conversation().await.unwrap();
        let answerer = answer_next(handle, "I nominate seat 3");

        // Act
        let response = storyteller.await_response().await.unwrap();

        // Assert
        let question = answerer.await.unwrap();
        assert_eq!(question.seat, None);
        assert_eq!(question.prompt, OPEN_QUESTION);
        assert_eq!(response.context, None);
    }

    #[tokio::test]
    async fn test_await_without_prompt_asks_the_table() {
        let (storyteller, _grimoire, handle) = setup();
        let answerer = tokio::spawn(async move {
            let question = handle.next_question().await;
            handle.respond("I nominate seat 3").unwrap();
            question
        });

        let response = storyteller.await_response().await.unwrap();

        let question = answerer.await.unwrap();
        assert_eq!(question.seat, None);
        assert_eq!(question.prompt, OPEN_QUESTION);
        assert_eq!(response.seat, None);
        assert_eq!(response.text, "I nominate seat 3");
    }

    #[tokio::test]
    async fn test_gameover_records_outcome_and_skips_rest_of_batch() {
        // Arrange
        let (storyteller, grimoire, handle) = setup();

        // Act
        let result = storyteller
            .apply_ops(&[
                Op::Gameover {
                    winner: Some("good".to_owned()),
                    reason: Some("The demon is dead.".to_owned()),
                },
                token(1, "after the end"),
            ])
            .await
            .unwrap();

        // Assert
        assert!(result.ended);
        assert!(!result.paused);
        let snapshot = grimoire.snapshot();
        assert_eq!(snapshot.outcome.unwrap().winner.as_deref(), Some("good"));
        assert!(snapshot.players[0].tokens.is_empty());
        assert_eq!(
            handle.deliveries().last().map(|d| d.text.clone()),
            Some("Game over: good wins. The demon is dead.".to_owned())
        );
    }

    #[tokio::test]
    async fn test_phase_starts_are_broadcast() {
        let (storyteller, _grimoire, handle) = setup();

        storyteller.start_night(1).await.unwrap();
        storyteller.start_day(1).await.unwrap();

        let texts: Vec<String> = handle.deliveries().into_iter().map(|d| d.text).collect();
        assert_eq!(texts, vec!["Night 1 falls.", "Day 1 dawns."]);
    }
}
