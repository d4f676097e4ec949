//! Simulation systems.

pub mod combat;

pub use combat::{resolve_attack, AttackOutcome, CombatWinner, MIN_ATTACK_TROOPS};
