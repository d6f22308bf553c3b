//! Messages the engine appends to a conversation's history.

use grimoire_core::context::{ChatMessage, Phase};
use grimoire_core::error::DomainError;
use grimoire_core::op::Op;
use grimoire_core::player::{GameSnapshot, Seat};
use grimoire_core::storyteller::PlayerResponse;
use serde::Serialize;

/// Sent back to the oracle when it answered with no ops.
pub(crate) const EMPTY_DECISION_PROMPT: &str = "You made no decision. If no interaction with the \
current player is needed, call end_role in ops to finish the current role; otherwise respond with \
suitable ops (prompt_player/send_to_player/broadcast/add_token/remove_token).";

#[derive(Serialize)]
struct OpsEnvelope<'a> {
    ops: &'a [Op],
}

#[derive(Serialize)]
struct PlayerResponseEvent<'a> {
    event: &'static str,
    seat: Option<Seat>,
    text: &'a str,
    context: Option<&'a str>,
    state: &'a GameSnapshot,
}

/// The oracle's own batch, echoed back as an assistant turn.
pub(crate) fn ops_message(ops: &[Op]) -> Result<ChatMessage, DomainError> {
    let body = serde_json::to_string(&OpsEnvelope { ops })
        .map_err(|e| DomainError::Infrastructure(format!("op serialization failed: {e}")))?;
    Ok(ChatMessage::assistant(body))
}

/// A human answer plus the state it was given in.
pub(crate) fn player_response_message(
    response: &PlayerResponse,
    snapshot: &GameSnapshot,
) -> Result<ChatMessage, DomainError> {
    let body = serde_json::to_string(&PlayerResponseEvent {
        event: "player_response",
        seat: response.seat,
        text: &response.text,
        context: response.context.as_deref(),
        state: snapshot,
    })
    .map_err(|e| DomainError::Infrastructure(format!("response serialization failed: {e}")))?;
    Ok(ChatMessage::user(body))
}

/// Human-readable time for prompts, e.g. `Night 2` or `Day 3`.
pub(crate) fn time_label(phase: Phase, night: u32, day: u32) -> String {
    if phase.is_night() {
        format!("Night {night}")
    } else {
        format!("Day {day}")
    }
}

/// Label identifying one conversation in the observation channel.
pub(crate) fn conversation_label(time_label: &str, role_id: &str, seat: Option<Seat>) -> String {
    match seat {
        Some(seat) => format!("{time_label} / {role_id} @ seat {seat}"),
        None => format!("{time_label} / {role_id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grimoire_core::context::MessageRole;
    use grimoire_core::player::Player;
    use serde_json::Value;

    #[test]
    fn test_ops_message_wraps_batch_in_ops_field() {
        let ops = vec![Op::Broadcast {
            text: "dawn".to_owned(),
        }];

        let message = ops_message(&ops).unwrap();

        assert_eq!(message.role, MessageRole::Assistant);
        let body: Value = serde_json::from_str(&message.content).unwrap();
        assert_eq!(body["ops"][0]["type"], "broadcast");
        assert_eq!(body["ops"][0]["payload"]["text"], "dawn");
    }

    #[test]
    fn test_player_response_message_carries_answer_and_state() {
        // Arrange
        let response = PlayerResponse {
            seat: Some(Seat(2)),
            text: "seat 5".to_owned(),
            context: Some("Who do you poison?".to_owned()),
        };
        let snapshot = GameSnapshot {
            players: vec![Player::new(Seat(2), "poisoner")],
            outcome: None,
        };

        // Act
        let message = player_response_message(&response, &snapshot).unwrap();

        // Assert
        assert_eq!(message.role, MessageRole::User);
        let body: Value = serde_json::from_str(&message.content).unwrap();
        assert_eq!(body["event"], "player_response");
        assert_eq!(body["seat"], 2);
        assert_eq!(body["text"], "seat 5");
        assert_eq!(body["context"], "Who do you poison?");
        assert_eq!(body["state"]["players"][0]["true_role"], "poisoner");
    }

    #[test]
    fn test_labels() {
        assert_eq!(time_label(Phase::FirstNight, 1, 0), "Night 1");
        assert_eq!(time_label(Phase::Day, 3, 2), "Day 2");
        assert_eq!(
            conversation_label("Night 1", "monk", Some(Seat(4))),
            "Night 1 / monk @ seat 4"
        );
        assert_eq!(conversation_label("Day 1", "win check", None), "Day 1 / win check");
    }
}
