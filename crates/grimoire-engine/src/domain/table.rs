//! Tab-separated rendering of the game state.

use grimoire_core::player::GameSnapshot;

/// Header row of the state table.
pub const TABLE_HEADER: &str = "Seat\tStatus\tKnown role\tTrue role\tTokens";

/// Renders one row per player: seat, alive/dead, known role, true role and
/// comma-separated tokens.
#[must_use]
pub fn render_state_table(snapshot: &GameSnapshot) -> String {
    let rows = snapshot.players.iter().map(|p| {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            p.seat,
            if p.alive { "alive" } else { "dead" },
            p.known_role.as_deref().unwrap_or(""),
            p.true_role.as_deref().unwrap_or(""),
            p.tokens.join(", ")
        )
    });
    std::iter::once(TABLE_HEADER.to_owned())
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use grimoire_core::player::{Player, Seat};

    #[test]
    fn test_render_state_table_lists_every_player() {
        // Arrange
        let mut drunk = Player::new(Seat(2), "drunk");
        drunk.known_role = Some("chef".to_owned());
        drunk.tokens = vec!["is the drunk".to_owned(), "poisoned".to_owned()];
        let mut dead = Player::new(Seat(3), "imp");
        dead.alive = false;
        let snapshot = GameSnapshot {
            players: vec![Player::new(Seat(1), "monk"), drunk, dead],
            outcome: None,
        };

        // Act
        let table = render_state_table(&snapshot);

        // Assert
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], TABLE_HEADER);
        assert_eq!(lines[1], "1\talive\tmonk\tmonk\t");
        assert_eq!(lines[2], "2\talive\tchef\tdrunk\tis the drunk, poisoned");
        assert_eq!(lines[3], "3\tdead\timp\timp\t");
    }

    #[test]
    fn test_render_state_table_with_no_players_is_header_only() {
        assert_eq!(render_state_table(&GameSnapshot::default()), TABLE_HEADER);
    }
}
