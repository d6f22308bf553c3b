//! In-process transport. The storyteller side asks; a [`TransportHandle`]
//! (held by the HTTP surface or a test) reads deliveries and answers.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use grimoire_core::error::DomainError;
use grimoire_core::player::Seat;
use serde::Serialize;
use tokio::sync::{Notify, oneshot};
use tracing::debug;

use super::transport::Transport;

/// A text delivered to one seat or, when `seat` is `None`, the whole table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    /// Recipient seat; `None` for a broadcast.
    pub seat: Option<Seat>,
    /// The delivered text.
    pub text: String,
}

/// The question currently waiting for an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingQuestion {
    /// Asked seat; `None` for an open question to the table.
    pub seat: Option<Seat>,
    /// The question text.
    pub prompt: String,
}

struct Outstanding {
    question: PendingQuestion,
    reply: oneshot::Sender<String>,
}

#[derive(Default)]
struct Shared {
    deliveries: Mutex<Vec<Delivery>>,
    outstanding: Mutex<Option<Outstanding>>,
    asked: Notify,
}

impl Shared {
    fn pending(&self) -> Option<PendingQuestion> {
        self.outstanding
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|o| o.question.clone())
    }
}

/// Storyteller side of an in-process transport.
pub struct ChannelTransport {
    shared: Arc<Shared>,
}

/// Player side of an in-process transport.
#[derive(Clone)]
pub struct TransportHandle {
    shared: Arc<Shared>,
}

impl ChannelTransport {
    /// Creates a connected transport and handle.
    #[must_use]
    pub fn connected() -> (Self, TransportHandle) {
        let shared = Arc::new(Shared::default());
        (
            Self {
                shared: Arc::clone(&shared),
            },
            TransportHandle { shared },
        )
    }

    fn deliver(&self, seat: Option<Seat>, text: &str) {
        self.shared
            .deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Delivery {
                seat,
                text: text.to_owned(),
            });
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&self, seat: Seat, text: &str) -> Result<(), DomainError> {
        self.deliver(Some(seat), text);
        Ok(())
    }

    async fn broadcast(&self, text: &str) -> Result<(), DomainError> {
        self.deliver(None, text);
        Ok(())
    }

    async fn ask(&self, seat: Option<Seat>, prompt: &str) -> Result<String, DomainError> {
        let (reply, answer) = oneshot::channel();
        {
            let mut outstanding = self
                .shared
                .outstanding
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if outstanding.is_some() {
                return Err(DomainError::Transport(
                    "a question is already waiting for an answer".into(),
                ));
            }
            *outstanding = Some(Outstanding {
                question: PendingQuestion {
                    seat,
                    prompt: prompt.to_owned(),
                },
                reply,
            });
        }
        self.shared.asked.notify_waiters();
        debug!(?seat, "question posted");

        answer
            .await
            .map_err(|_| DomainError::Transport("question abandoned before an answer".into()))
    }
}

impl TransportHandle {
    /// Every delivery so far, oldest first.
    #[must_use]
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.shared
            .deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Deliveries after the first `seen`, oldest first. Pollers pass the
    /// number of deliveries they already hold.
    #[must_use]
    pub fn deliveries_after(&self, seen: usize) -> Vec<Delivery> {
        self.shared
            .deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(seen..)
            .map(<[Delivery]>::to_vec)
            .unwrap_or_default()
    }

    /// The question waiting for an answer, if any.
    #[must_use]
    pub fn pending(&self) -> Option<PendingQuestion> {
        self.shared.pending()
    }

    /// Waits until a question is posted and returns it.
    pub async fn next_question(&self) -> PendingQuestion {
        loop {
            let posted = self.shared.asked.notified();
            if let Some(question) = self.pending() {
                return question;
            }
            posted.await;
        }
    }

    /// Answers the pending question.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no question is pending, or
    /// `DomainError::Transport` if the asking side has gone away.
    pub fn respond(&self, text: impl Into<String>) -> Result<PendingQuestion, DomainError> {
        let outstanding = self
            .shared
            .outstanding
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| DomainError::Validation("no question is pending".into()))?;
        outstanding
            .reply
            .send(text.into())
            .map_err(|_| DomainError::Transport("the asking side has gone away".into()))?;
        Ok(outstanding.question)
    }
}

impl std::fmt::Debug for ChannelTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelTransport").finish_non_exhaustive()
    }
}

impl std::fmt::Debug for TransportHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportHandle")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}
