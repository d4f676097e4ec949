//! Action layer: validates player selections before handing them to the
//! combat system. Rejected actions leave the state completely untouched.

use crate::state::{GameState, TerritoryId};
use crate::systems::combat::{resolve_attack, AttackOutcome, MIN_ATTACK_TROOPS};
use thiserror::Error;
use tracing::instrument;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("no territory at index {index}")]
    UnknownTerritory { index: usize },
    #[error("a territory cannot attack itself")]
    SelfAttack,
    #[error("{name} needs at least 2 troops to attack, has {troops}")]
    NotEnoughTroops { name: String, troops: u32 },
    #[error("{attacker} cannot attack {defender}: both belong to the {faction} faction")]
    SameFaction {
        attacker: String,
        defender: String,
        faction: String,
    },
}

/// Check the legality of an attacker/defender selection without touching
/// the state.
pub fn validate_attack(
    state: &GameState,
    attacker: TerritoryId,
    defender: TerritoryId,
) -> Result<(), ActionError> {
    let atk = state
        .territories
        .get(attacker)
        .ok_or(ActionError::UnknownTerritory { index: attacker })?;
    let def = state
        .territories
        .get(defender)
        .ok_or(ActionError::UnknownTerritory { index: defender })?;

    if attacker == defender {
        return Err(ActionError::SelfAttack);
    }
    if atk.troops < MIN_ATTACK_TROOPS {
        return Err(ActionError::NotEnoughTroops {
            name: atk.name.clone(),
            troops: atk.troops,
        });
    }
    if atk.faction == def.faction {
        return Err(ActionError::SameFaction {
            attacker: atk.name.clone(),
            defender: def.name.clone(),
            faction: atk.faction.clone(),
        });
    }

    Ok(())
}

/// Validate and resolve one attack between two territories, advancing the
/// turn counter on success.
#[instrument(skip_all, name = "attack")]
pub fn attack(
    state: &mut GameState,
    attacker: TerritoryId,
    defender: TerritoryId,
) -> Result<AttackOutcome, ActionError> {
    validate_attack(state, attacker, defender)?;

    let (atk, def) = pair_mut(&mut state.territories, attacker, defender);
    let outcome = resolve_attack(atk, def, &mut state.rng);
    state.turn += 1;

    Ok(outcome)
}

/// Two non-aliasing mutable borrows out of the territory store. Validation
/// guarantees `a != b` and that both indices are in bounds.
fn pair_mut<T>(slice: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = slice.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = slice.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::combat::CombatWinner;
    use crate::testing::GameStateBuilder;

    fn two_territory_state(seed: u64) -> GameState {
        GameStateBuilder::new()
            .seed(seed)
            .with_territory("Brasil", "azul", 9)
            .with_territory("Chile", "verde", 3)
            .build()
    }

    #[test]
    fn test_attack_out_of_bounds_rejected() {
        let mut state = two_territory_state(0);
        let before = state.checksum();

        let err = attack(&mut state, 0, 7).unwrap_err();
        assert_eq!(err, ActionError::UnknownTerritory { index: 7 });
        assert_eq!(state.checksum(), before, "rejected attack must not mutate");
    }

    #[test]
    fn test_self_attack_rejected() {
        let mut state = two_territory_state(0);
        let before = state.checksum();

        assert_eq!(attack(&mut state, 1, 1).unwrap_err(), ActionError::SelfAttack);
        assert_eq!(state.checksum(), before);
    }

    #[test]
    fn test_understrength_attacker_rejected() {
        let mut state = GameStateBuilder::new()
            .with_territory("Brasil", "azul", 1)
            .with_territory("Chile", "verde", 3)
            .build();
        let before = state.checksum();

        let err = attack(&mut state, 0, 1).unwrap_err();
        assert_eq!(
            err,
            ActionError::NotEnoughTroops {
                name: "Brasil".to_string(),
                troops: 1,
            }
        );
        assert_eq!(state.checksum(), before);
    }

    #[test]
    fn test_same_faction_attack_rejected() {
        let mut state = GameStateBuilder::new()
            .with_territory("Brasil", "azul", 9)
            .with_territory("Bahia", "azul", 3)
            .build();
        let before = state.checksum();

        let err = attack(&mut state, 0, 1).unwrap_err();
        assert!(matches!(err, ActionError::SameFaction { .. }));
        assert_eq!(state.checksum(), before);
    }

    #[test]
    fn test_attack_advances_turn_and_rng() {
        // Seed 0 rolls 2 then 1: attacker wins.
        let mut state = two_territory_state(0);
        let rng_before = state.rng;

        let outcome = attack(&mut state, 0, 1).unwrap();

        assert_eq!(outcome.winner, CombatWinner::Attacker);
        assert_eq!(state.turn, 2);
        assert_ne!(state.rng, rng_before);
        assert_eq!(state.territories[1].faction, "azul");
    }

    #[test]
    fn test_attack_with_higher_index_attacker() {
        // Seed 3 rolls 4 then 4: defender (index 0) holds.
        let mut state = GameStateBuilder::new()
            .seed(3)
            .with_territory("Chile", "verde", 3)
            .with_territory("Brasil", "azul", 9)
            .build();

        let outcome = attack(&mut state, 1, 0).unwrap();

        assert_eq!(outcome.winner, CombatWinner::Defender);
        assert_eq!(state.territories[1].troops, 8);
        assert_eq!(state.territories[0].troops, 3);
    }

    #[test]
    fn test_validate_reports_bounds_before_legality() {
        let state = two_territory_state(0);
        assert_eq!(
            validate_attack(&state, 5, 5).unwrap_err(),
            ActionError::UnknownTerritory { index: 5 }
        );
    }
}
