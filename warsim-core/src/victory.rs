//! Victory checking.
//!
//! Walks the player store and evaluates each assigned mission against the
//! current territory snapshot. Stateless: results reflect only the snapshot
//! they were computed from, so callers re-run the check after every attack.

use crate::mission::evaluate;
use crate::state::{Player, Territory};
use serde::Serialize;
use tracing::instrument;

/// One player's mission result, in player-store order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissionStatus {
    /// Index into the player store.
    pub player: usize,
    pub satisfied: bool,
}

/// Evaluate every player's mission against the current territory state.
#[instrument(skip_all, name = "victory")]
pub fn check_victory(players: &[Player], territories: &[Territory]) -> Vec<MissionStatus> {
    players
        .iter()
        .enumerate()
        .map(|(index, player)| {
            let satisfied = evaluate(&player.mission, territories, &player.faction);
            if satisfied {
                log::info!(
                    "{} ({}) has completed their mission: {}",
                    player.name,
                    player.faction,
                    player.mission.description
                );
            }
            MissionStatus {
                player: index,
                satisfied,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::MissionKind;
    use crate::testing::GameStateBuilder;

    #[test]
    fn test_check_victory_reports_every_player() {
        let state = GameStateBuilder::new()
            .with_territory("Brasil", "azul", 45)
            .with_territory("Chile", "verde", 2)
            .with_player("Ana", "azul", MissionKind::TotalTroopSum)
            .with_player("Bruno", "verde", MissionKind::TotalTroopSum)
            .build();

        let results = check_victory(&state.players, &state.territories);

        assert_eq!(results.len(), 2);
        assert!(results[0].satisfied); // 45 troops held by azul
        assert!(!results[1].satisfied); // verde holds 2
        assert_eq!(results[0].player, 0);
        assert_eq!(results[1].player, 1);
    }

    #[test]
    fn test_check_victory_is_idempotent() {
        let state = GameStateBuilder::new()
            .with_territory("Brasil", "azul", 10)
            .with_territory("Bahia", "verde", 31)
            .with_player("Ana", "azul", MissionKind::NamePrefixDomination)
            .with_player("Bruno", "verde", MissionKind::MaxSingleTerritoryTroops)
            .build();

        let first = check_victory(&state.players, &state.territories);
        let second = check_victory(&state.players, &state.territories);

        assert_eq!(first, second);
    }

    #[test]
    fn test_check_victory_reflects_mutation() {
        let mut state = GameStateBuilder::new()
            .with_territory("Brasil", "verde", 5)
            .with_player("Ana", "azul", MissionKind::NamePrefixDomination)
            .build();

        assert!(!check_victory(&state.players, &state.territories)[0].satisfied);

        state.territories[0].faction = "azul".to_string();
        assert!(check_victory(&state.players, &state.territories)[0].satisfied);
    }
}
