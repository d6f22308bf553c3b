//! Decoding a model answer into ops.

use grimoire_core::op::Op;
use serde_json::{Map, Value};
use tracing::warn;

/// Decodes `{"ops": [...]}` (or a bare op array) into ops.
///
/// Decoding is lenient: an op without a `payload` gets an empty one, ops
/// that still fail to decode are dropped with a warning, and an answer that
/// is not JSON at all yields no ops.
#[must_use]
pub fn decode_ops(content: &str) -> Vec<Op> {
    let body = strip_fence(content);
    if body.is_empty() {
        return Vec::new();
    }
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "oracle answer is not JSON");
            return Vec::new();
        }
    };

    let raw_ops = match value {
        Value::Object(mut object) => match object.remove("ops") {
            Some(Value::Array(ops)) => ops,
            Some(_) | None => {
                warn!("oracle answer has no ops array");
                return Vec::new();
            }
        },
        Value::Array(ops) => ops,
        _ => return Vec::new(),
    };

    raw_ops.into_iter().filter_map(decode_op).collect()
}

fn decode_op(mut raw: Value) -> Option<Op> {
    if let Value::Object(object) = &mut raw
        && !object.get("payload").is_some_and(Value::is_object)
    {
        object.insert("payload".to_owned(), Value::Object(Map::new()));
    }
    match serde_json::from_value::<Op>(raw.clone()) {
        Ok(op) => Some(op),
        Err(e) => {
            warn!(error = %e, op = %raw, "dropping undecodable op");
            None
        }
    }
}

/// Strips a surrounding markdown code fence, which some models add even in
/// JSON mode.
fn strip_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grimoire_core::player::Seat;

    #[test]
    fn test_decodes_ops_object() {
        // Arrange
        let content = r#"{"ops": [
            {"type": "add_token", "payload": {"seat": 3, "token": "poisoned"}},
            {"type": "end_role", "payload": {"reason": "done"}}
        ]}"#;

        // Act
        let ops = decode_ops(content);

        // Assert
        assert_eq!(
            ops,
            vec![
                Op::AddToken {
                    seat: Seat(3),
                    token: "poisoned".to_owned()
                },
                Op::EndRole {
                    reason: Some("done".to_owned())
                },
            ]
        );
    }

    #[test]
    fn test_seat_given_as_string_is_accepted() {
        let content = r#"{"ops": [
            {"type": "send_to_player", "payload": {"seat": "2", "text": "You learn a 1"}}
        ]}"#;

        let ops = decode_ops(content);

        assert_eq!(
            ops,
            vec![Op::SendToPlayer {
                seat: Seat(2),
                text: "You learn a 1".to_owned()
            }]
        );
    }

    #[test]
    fn test_missing_payload_is_treated_as_empty() {
        let ops = decode_ops(r#"{"ops": [{"type": "end_role"}, {"type": "gameover"}]}"#);

        assert_eq!(
            ops,
            vec![
                Op::EndRole { reason: None },
                Op::Gameover {
                    winner: None,
                    reason: None
                },
            ]
        );
    }

    #[test]
    fn test_unknown_or_incomplete_ops_are_dropped() {
        let content = r#"{"ops": [
            {"type": "kill_player", "payload": {"seat": 1}},
            {"type": "send_to_player", "payload": {"text": "no seat"}},
            {"type": "broadcast", "payload": {"text": "dusk"}}
        ]}"#;

        let ops = decode_ops(content);

        assert_eq!(
            ops,
            vec![Op::Broadcast {
                text: "dusk".to_owned()
            }]
        );
    }

    #[test]
    fn test_non_json_answer_yields_no_ops() {
        assert!(decode_ops("I think the poisoner should wait.").is_empty());
        assert!(decode_ops("").is_empty());
        assert!(decode_ops(r#"{"decision": "none"}"#).is_empty());
    }

    #[test]
    fn test_fenced_answer_is_accepted() {
        let content = "```json\n{\"ops\": [{\"type\": \"end_role\"}]}\n```";

        let ops = decode_ops(content);

        assert_eq!(ops, vec![Op::EndRole { reason: None }]);
    }
}
