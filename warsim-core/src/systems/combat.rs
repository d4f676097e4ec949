//! Combat system - dice roll attack resolution.
//!
//! One attack pits two territories of different factions against each other:
//! - Each side rolls 1d6 from the shared random source.
//! - Attacker rolls higher: the territory changes hands. Half the attacking
//!   garrison (at least 1 troop) moves in and *replaces* the defending one.
//! - Tie or defender rolls higher: the attack is repelled and the attacker
//!   loses 1 troop, but never drops below 1.

use crate::state::{GameRng, Territory};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Minimum garrison required to launch an attack (caller-enforced).
pub const MIN_ATTACK_TROOPS: u32 = 2;

/// Sides of a single attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatWinner {
    Attacker,
    Defender,
}

/// Everything the caller needs to report one resolved attack without
/// re-deriving state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub attacker_roll: u8,
    pub defender_roll: u8,
    pub winner: CombatWinner,
    /// True when the defending territory changed hands.
    pub conquered: bool,
    /// Troops that moved into the conquered territory (0 on a repelled attack).
    pub troops_transferred: u32,
    /// Final garrison of the attacking territory.
    pub attacker_troops: u32,
    /// Final garrison of the defending territory.
    pub defender_troops: u32,
}

/// Resolve one attack between two territories, mutating both in place.
///
/// Preconditions are the caller's responsibility (see [`crate::step`]):
/// distinct slots, opposing factions, and at least [`MIN_ATTACK_TROOPS`]
/// at the attacker. Violations are programming errors, not runtime ones.
#[instrument(skip_all, name = "combat")]
pub fn resolve_attack(
    attacker: &mut Territory,
    defender: &mut Territory,
    rng: &mut GameRng,
) -> AttackOutcome {
    debug_assert!(attacker.troops >= MIN_ATTACK_TROOPS);
    debug_assert_ne!(attacker.faction, defender.faction);

    let attacker_roll = roll_die(rng);
    let defender_roll = roll_die(rng);

    let outcome = if attacker_roll > defender_roll {
        // Conquest replaces the garrison: the defender keeps none of its
        // surviving troops.
        defender.faction = attacker.faction.clone();
        let transferred = (attacker.troops / 2).max(1);
        defender.troops = transferred;
        attacker.troops -= transferred;

        AttackOutcome {
            attacker_roll,
            defender_roll,
            winner: CombatWinner::Attacker,
            conquered: true,
            troops_transferred: transferred,
            attacker_troops: attacker.troops,
            defender_troops: defender.troops,
        }
    } else {
        // Repelled. The attacker pays 1 troop but a territory never empties.
        if attacker.troops > 1 {
            attacker.troops -= 1;
        }

        AttackOutcome {
            attacker_roll,
            defender_roll,
            winner: CombatWinner::Defender,
            conquered: false,
            troops_transferred: 0,
            attacker_troops: attacker.troops,
            defender_troops: defender.troops,
        }
    };

    log::info!(
        "Attack {} -> {}: rolled {} vs {}, {:?} wins{}",
        attacker.name,
        defender.name,
        attacker_roll,
        defender_roll,
        outcome.winner,
        if outcome.conquered {
            format!(", {} troops move in", outcome.troops_transferred)
        } else {
            String::new()
        }
    );

    outcome
}

/// Roll a 1d6 combat die.
fn roll_die(rng: &mut GameRng) -> u8 {
    (rng.next_u64() % 6 + 1) as u8
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pair(attacker_troops: u32, defender_troops: u32) -> (Territory, Territory) {
        (
            Territory::new("Brasil", "azul", attacker_troops),
            Territory::new("Chile", "verde", defender_troops),
        )
    }

    #[test]
    fn test_attacker_win_transfers_half() {
        // Seed 0 rolls 2 then 1: attacker wins.
        let (mut atk, mut def) = pair(9, 3);
        let mut rng = GameRng::new(0);

        let outcome = resolve_attack(&mut atk, &mut def, &mut rng);

        assert_eq!(outcome.attacker_roll, 2);
        assert_eq!(outcome.defender_roll, 1);
        assert_eq!(outcome.winner, CombatWinner::Attacker);
        assert!(outcome.conquered);
        assert_eq!(outcome.troops_transferred, 4); // 9 / 2
        assert_eq!(def.troops, 4);
        assert_eq!(atk.troops, 5);
        assert_eq!(def.faction, "azul");
    }

    #[test]
    fn test_two_troop_attacker_transfers_at_least_one() {
        // Seed 79 rolls 6 then 1.
        let (mut atk, mut def) = pair(2, 10);
        let mut rng = GameRng::new(79);

        let outcome = resolve_attack(&mut atk, &mut def, &mut rng);

        assert_eq!((outcome.attacker_roll, outcome.defender_roll), (6, 1));
        assert_eq!(outcome.troops_transferred, 1);
        assert_eq!(atk.troops, 1);
        assert_eq!(def.troops, 1);
        assert_eq!(def.faction, "azul");
    }

    #[test]
    fn test_tie_goes_to_defender() {
        // Seed 3 rolls 4 then 4.
        let (mut atk, mut def) = pair(5, 3);
        let mut rng = GameRng::new(3);

        let outcome = resolve_attack(&mut atk, &mut def, &mut rng);

        assert_eq!((outcome.attacker_roll, outcome.defender_roll), (4, 4));
        assert_eq!(outcome.winner, CombatWinner::Defender);
        assert!(!outcome.conquered);
        assert_eq!(atk.troops, 4);
        assert_eq!(def.troops, 3);
        assert_eq!(def.faction, "verde");
    }

    #[test]
    fn test_repelled_attacker_never_drops_below_one() {
        // Seed 5 rolls 3 then 5: defender wins, attacker at the minimum.
        let (mut atk, mut def) = pair(2, 7);
        let mut rng = GameRng::new(5);

        let outcome = resolve_attack(&mut atk, &mut def, &mut rng);

        assert_eq!(outcome.winner, CombatWinner::Defender);
        assert_eq!(atk.troops, 1);
        assert_eq!(def.troops, 7);
    }

    proptest! {
        #[test]
        fn prop_attack_invariants(
            seed in any::<u64>(),
            attacker_troops in 2u32..200,
            defender_troops in 0u32..200,
        ) {
            let (mut atk, mut def) = pair(attacker_troops, defender_troops);
            let mut rng = GameRng::new(seed);

            let outcome = resolve_attack(&mut atk, &mut def, &mut rng);

            prop_assert!((1..=6).contains(&outcome.attacker_roll));
            prop_assert!((1..=6).contains(&outcome.defender_roll));
            prop_assert!(atk.troops >= 1);

            if outcome.attacker_roll > outcome.defender_roll {
                prop_assert_eq!(outcome.winner, CombatWinner::Attacker);
                prop_assert!(outcome.conquered);
                prop_assert_eq!(def.faction.as_str(), "azul");
                prop_assert_eq!(def.troops, (attacker_troops / 2).max(1));
                prop_assert_eq!(atk.troops, attacker_troops - def.troops);
            } else {
                prop_assert_eq!(outcome.winner, CombatWinner::Defender);
                prop_assert!(!outcome.conquered);
                prop_assert_eq!(def.faction.as_str(), "verde");
                prop_assert_eq!(def.troops, defender_troops);
                prop_assert_eq!(atk.troops, attacker_troops - 1);
            }

            prop_assert_eq!(atk.troops, outcome.attacker_troops);
            prop_assert_eq!(def.troops, outcome.defender_troops);
        }
    }
}
