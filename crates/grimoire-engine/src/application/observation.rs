//! Observers for the session's observation channel.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use grimoire_core::clock::Clock;
use serde::Serialize;

use crate::domain::events::{Observer, SessionEvent};
use crate::domain::outcome::SessionOutcome;

/// A timestamped, sequence-numbered session event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationRecord {
    /// Position in the log, starting at 1.
    pub sequence_number: u64,
    /// When the event was observed.
    pub occurred_at: DateTime<Utc>,
    /// The event itself.
    #[serde(flatten)]
    pub event: SessionEvent,
}

/// Progress summary derived from the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    /// Last night started.
    pub night: u32,
    /// Last day started.
    pub day: u32,
    /// Whether the session loop has returned.
    pub finished: bool,
    /// The outcome, once finished.
    pub outcome: Option<SessionOutcome>,
}

/// In-memory observation log.
pub struct ObservationLog {
    clock: Arc<dyn Clock>,
    records: Mutex<Vec<ObservationRecord>>,
}

impl ObservationLog {
    /// Creates an empty log stamping records with `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Every record so far, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<ObservationRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Records with a sequence number greater than `after`.
    #[must_use]
    pub fn records_after(&self, after: u64) -> Vec<ObservationRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.sequence_number > after)
            .cloned()
            .collect()
    }

    /// Folds the log into a progress summary.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records
            .iter()
            .fold(SessionProgress::default(), |mut progress, record| {
                match &record.event {
                    SessionEvent::NightStarted { night } => progress.night = *night,
                    SessionEvent::DayStarted { day } => progress.day = *day,
                    SessionEvent::SessionFinished { outcome } => {
                        progress.finished = true;
                        progress.outcome = Some(*outcome);
                    }
                    _ => {}
                }
                progress
            })
    }
}

impl std::fmt::Debug for ObservationLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservationLog")
            .field("records", &self.records().len())
            .finish_non_exhaustive()
    }
}

impl Observer for ObservationLog {
    fn observe(&self, event: &SessionEvent) {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let sequence_number = records.len() as u64 + 1;
        records.push(ObservationRecord {
            sequence_number,
            occurred_at: self.clock.now(),
            event: event.clone(),
        });
    }
}

/// Writes a human-readable transcript to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleObserver;

impl ConsoleObserver {
    /// Renders `event` as transcript text; `None` for events with no
    /// transcript line.
    #[must_use]
    pub fn render(event: &SessionEvent) -> Option<String> {
        let text = match event {
            SessionEvent::SessionStarted { .. } => return None,
            SessionEvent::NightStarted { night } => format!("== Night {night} =="),
            SessionEvent::DayStarted { day } => format!("== Day {day} =="),
            SessionEvent::OpsApplied { label, ops, .. } => {
                let mut lines = vec![format!("Ops ({label}):")];
                for op in ops {
                    let line = serde_json::to_value(op).map_or_else(
                        |_| format!("- {}", op.kind()),
                        |v| format!("- {} {}", op.kind(), v.get("payload").cloned().unwrap_or_default()),
                    );
                    lines.push(line);
                }
                lines.join("\n")
            }
            SessionEvent::OpsRejected { label, ops } => {
                let kinds: Vec<String> = ops.iter().map(|op| op.kind().to_string()).collect();
                format!("Rejected ops ({label}): {}", kinds.join(", "))
            }
            SessionEvent::PlayerResponded { label, response } => match response.seat {
                Some(seat) => format!("Seat {seat} answered ({label}): {}", response.text),
                None => format!("Answer ({label}): {}", response.text),
            },
            SessionEvent::NightEnded { night, table } => format!("Night {night} ended\n{table}"),
            SessionEvent::ConversationExhausted { label, steps } => {
                format!("Conversation gave up after {steps} steps ({label})")
            }
            SessionEvent::SessionFinished { outcome } => match outcome {
                SessionOutcome::Ended { nights, days } => {
                    format!("Game over after {nights} nights and {days} days")
                }
                SessionOutcome::CycleBoundExhausted { cycles } => {
                    format!("Session stopped undecided after {cycles} cycles")
                }
            },
        };
        Some(text)
    }
}

impl Observer for ConsoleObserver {
    fn observe(&self, event: &SessionEvent) {
        if let Some(text) = Self::render(event) {
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "{text}");
        }
    }
}

/// Fans every event out to several observers, in order.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Arc<dyn Observer>>,
}

impl ObserverSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observer.
    #[must_use]
    pub fn with(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }
}

impl Observer for ObserverSet {
    fn observe(&self, event: &SessionEvent) {
        for observer in &self.observers {
            observer.observe(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grimoire_core::op::Op;
    use grimoire_core::player::Seat;
    use grimoire_core::storyteller::ApplyResult;
    use grimoire_test_support::FixedClock;

    fn log() -> Arc<ObservationLog> {
        Arc::new(ObservationLog::new(Arc::new(FixedClock::standard())))
    }

    #[test]
    fn test_log_numbers_and_timestamps_records() {
        // Arrange
        let log = log();

        // Act
        log.observe(&SessionEvent::NightStarted { night: 1 });
        log.observe(&SessionEvent::DayStarted { day: 1 });

        // Assert
        let records = log.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sequence_number, 1);
        assert_eq!(records[1].sequence_number, 2);
        assert_eq!(records[1].occurred_at, FixedClock::standard().0);
        assert_eq!(log.records_after(1).len(), 1);
    }

    #[test]
    fn test_progress_tracks_latest_counters_and_outcome() {
        // Arrange
        let log = log();
        log.observe(&SessionEvent::NightStarted { night: 1 });
        log.observe(&SessionEvent::DayStarted { day: 1 });
        log.observe(&SessionEvent::NightStarted { night: 2 });

        // Act
        let running = log.progress();
        log.observe(&SessionEvent::SessionFinished {
            outcome: SessionOutcome::Ended { nights: 2, days: 1 },
        });
        let finished = log.progress();

        // Assert
        assert_eq!(running.night, 2);
        assert_eq!(running.day, 1);
        assert!(!running.finished);
        assert!(finished.finished);
        assert_eq!(finished.outcome, Some(SessionOutcome::Ended { nights: 2, days: 1 }));
    }

    #[test]
    fn test_record_serializes_event_inline() {
        let log = log();
        log.observe(&SessionEvent::NightStarted { night: 3 });

        let json = serde_json::to_value(&log.records()[0]).unwrap();

        assert_eq!(json["event"], "night_started");
        assert_eq!(json["night"], 3);
        assert_eq!(json["sequence_number"], 1);
    }

    #[test]
    fn test_console_renders_ops_with_payloads() {
        let event = SessionEvent::OpsApplied {
            label: "Night 1 / monk @ seat 4".to_owned(),
            ops: vec![Op::AddToken {
                seat: Seat(2),
                token: "safe".to_owned(),
            }],
            result: ApplyResult::default(),
        };

        let text = ConsoleObserver::render(&event).unwrap();

        assert_eq!(
            text,
            "Ops (Night 1 / monk @ seat 4):\n- add_token {\"seat\":2,\"token\":\"safe\"}"
        );
    }

    #[test]
    fn test_observer_set_forwards_to_every_observer() {
        let first = log();
        let second = log();
        let set = ObserverSet::new().with(first.clone()).with(second.clone());

        set.observe(&SessionEvent::DayStarted { day: 4 });

        assert_eq!(first.records().len(), 1);
        assert_eq!(second.records().len(), 1);
    }
}
