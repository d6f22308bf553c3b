//! Prompt construction for role conversations and day checks.

use grimoire_core::context::{ChatMessage, DayCheckContext, RoleContext};
use grimoire_core::player::{GameSnapshot, Seat};
use serde::Serialize;
use serde_json::json;

/// Explains the op protocol. Sent as the first system message of every
/// role conversation.
pub const ROLE_SYSTEM_PROMPT: &str = "You are the storyteller of a social deduction game played \
in seats around a table. You run one role's turn at a time. Answer with a single JSON object of \
the form {\"ops\": [...]}, where every op is {\"type\": <kind>, \"payload\": {...}}. Kinds:
- prompt_player {seat, text}: ask a seat a question; the player's answer is sent back to you.
- send_to_player {seat, text}: tell a seat something privately.
- broadcast {text}: tell the whole table something.
- add_token {seat, token} / remove_token {seat, token}: mark or unmark a seat in the grimoire.
- end_role {reason?}: this role has nothing more to do.
- gameover {winner?, reason?}: the game is decided.
Only act for the role and seat you are given. If nothing needs to happen, answer with end_role.";

/// Restricts the end-of-day check to a verdict.
pub const DAY_CHECK_SYSTEM_PROMPT: &str = "You are the storyteller of a social deduction game. \
The day has ended. Decide from the grimoire whether a win condition is met. Answer with a single \
JSON object {\"ops\": [...]}. Only two op kinds are allowed: gameover {winner, reason} if the game \
is decided, otherwise end_role {reason}.";

#[derive(Serialize)]
struct RoleTurn<'a> {
    phase: String,
    time_label: &'a str,
    role: RoleCard<'a>,
    target_seat: Option<Seat>,
    state: &'a GameSnapshot,
}

#[derive(Serialize)]
struct RoleCard<'a> {
    id: &'a str,
    name: &'a str,
    team: String,
    ability: &'a str,
}

fn with_summary(prompt: &str, summary: &str) -> String {
    if summary.is_empty() {
        prompt.to_owned()
    } else {
        format!("{prompt}\n\n{summary}")
    }
}

/// Opening messages for a role conversation: protocol plus script, then the
/// turn itself as JSON.
#[must_use]
pub fn role_messages(context: &RoleContext) -> Vec<ChatMessage> {
    let turn = RoleTurn {
        phase: context.phase.to_string(),
        time_label: &context.time_label,
        role: RoleCard {
            id: &context.role.id,
            name: &context.role.name,
            team: context.role.team.to_string(),
            ability: &context.role.ability,
        },
        target_seat: context.target_seat,
        state: &context.snapshot,
    };
    vec![
        ChatMessage::system(with_summary(ROLE_SYSTEM_PROMPT, &context.script_summary)),
        ChatMessage::user(serde_json::to_string(&turn).unwrap_or_default()),
    ]
}

/// Messages for the end-of-day win check.
#[must_use]
pub fn day_check_messages(context: &DayCheckContext) -> Vec<ChatMessage> {
    let check = json!({
        "phase": "day",
        "day": context.day,
        "time_label": context.time_label,
        "state": context.snapshot,
    });
    vec![
        ChatMessage::system(with_summary(DAY_CHECK_SYSTEM_PROMPT, &context.script_summary)),
        ChatMessage::user(check.to_string()),
    ]
}
