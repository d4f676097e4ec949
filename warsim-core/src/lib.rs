//! # warsim core
//!
//! Deterministic engine for a turn-based territory-conquest game.
//!
//! The engine owns the decision logic only: dice-resolved attacks between
//! territories, a closed catalog of victory missions, and mission
//! evaluation against the territory store. Registration, menus and
//! rendering live in the `warsim` binary and talk to this crate through
//! plain function calls.
//!
//! ```text
//! ┌────────────┐    ┌──────────────┐    ┌───────────────┐
//! │  CLI menu  │───▶│ step::attack │───▶│ combat system │
//! │ (selection)│    │ (validation) │    │ (dice + state │
//! └────────────┘    └──────────────┘    │   mutation)   │
//!        │                              └───────────────┘
//!        │          ┌────────────────┐    ┌─────────────┐
//!        └─────────▶│ check_victory  │───▶│  evaluate   │
//!                   │ (per player)   │    │ (pure fn)   │
//!                   └────────────────┘    └─────────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`GameState`] | Territory store, player store, turn counter, RNG |
//! | [`AttackOutcome`] | Both rolls, winner, transfers, final garrisons |
//! | [`Mission`] / [`MissionKind`] | A player's private victory condition |
//! | [`MissionStatus`] | Per-player result of a victory check |
//!
//! All randomness flows through the single [`GameRng`] embedded in the
//! state: identical seeds replay identical games.

pub mod mission;
pub mod state;
pub mod step;
pub mod systems;
pub mod testing;
pub mod victory;

pub use mission::{assign_mission, evaluate, Mission, MissionKind};
pub use state::{Faction, GameRng, GameState, Player, Territory, TerritoryId};
pub use step::{attack, validate_attack, ActionError};
pub use systems::combat::{resolve_attack, AttackOutcome, CombatWinner, MIN_ATTACK_TROOPS};
pub use victory::{check_victory, MissionStatus};
