//! Markdown summary of a script, used as background for the oracle.

use std::fmt::Write as _;

use crate::domain::script::Script;

/// Heading of the rendered summary.
pub const SUMMARY_HEADING: &str = "# Script roles (including roles not in play)";

/// Renders every non-meta role on the script, travelers included.
#[must_use]
pub fn render_summary(script: &Script) -> String {
    let mut out = String::from(SUMMARY_HEADING);
    for role in script.roles.iter().chain(&script.travelers) {
        let _ = write!(out, "\n- Name: {} | Team: {}", role.name, role.team);
        if !role.ability.is_empty() {
            let _ = write!(out, "\n  Ability: {}", role.ability);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::script::parse_script;
    use serde_json::json;

    #[test]
    fn test_render_summary_lists_roles_and_travelers() {
        // Arrange
        let script = parse_script(&[
            json!({ "id": "_meta", "name": "Custom" }),
            json!({ "id": "imp", "name": "Imp", "team": "demon", "ability": "Kill each night." }),
            json!({ "id": "beggar", "name": "Beggar", "team": "traveler" }),
        ]);

        // Act
        let summary = render_summary(&script);

        // Assert
        let expected = format!(
            "{SUMMARY_HEADING}\n- Name: Imp | Team: demon\n  Ability: Kill each night.\n- Name: Beggar | Team: traveler"
        );
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_render_summary_of_empty_script_is_just_the_heading() {
        assert_eq!(render_summary(&Script::default()), SUMMARY_HEADING);
    }
}
