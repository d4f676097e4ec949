//! Mission catalog and evaluation.
//!
//! Missions pair a fixed display text with a predicate over the territory
//! store. Dispatch is always on [`MissionKind`], never on the text: the
//! description exists purely for rendering.

use crate::state::{Faction, GameRng, Territory};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Longest store-order run of player-held territories required.
pub const CONSECUTIVE_RUN_TARGET: u32 = 3;
/// Territories a player must hold at the same time.
pub const CONTROLLED_COUNT_TARGET: u32 = 5;
/// Troops required in a single player-held territory.
pub const SINGLE_TERRITORY_TROOPS_TARGET: u32 = 30;
/// Distinct faction strings required among the player's holdings.
pub const DISTINCT_FACTIONS_TARGET: usize = 3;
/// Total troops required across all player-held territories.
pub const TOTAL_TROOP_SUM_TARGET: u32 = 40;
/// Name prefix for the domination mission, matched case-insensitively.
pub const DOMINATION_PREFIX: char = 'B';

/// Faction names whose troops the elimination mission targets. Matched
/// case-insensitively so "Red" and "VERMELHA" count too.
const ELIMINATION_TARGETS: [&str; 2] = ["red", "vermelha"];

/// The closed set of victory conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionKind {
    ConsecutiveHoldings,
    EliminateFaction,
    MinControlledCount,
    MaxSingleTerritoryTroops,
    DistinctFactionsControlled,
    NamePrefixDomination,
    TotalTroopSum,
}

impl MissionKind {
    /// The full catalog, in draw order.
    pub const ALL: [MissionKind; 7] = [
        MissionKind::ConsecutiveHoldings,
        MissionKind::EliminateFaction,
        MissionKind::MinControlledCount,
        MissionKind::MaxSingleTerritoryTroops,
        MissionKind::DistinctFactionsControlled,
        MissionKind::NamePrefixDomination,
        MissionKind::TotalTroopSum,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            MissionKind::ConsecutiveHoldings => "Conquer 3 territories in a row on the board",
            MissionKind::EliminateFaction => "Eliminate every troop of the red faction",
            MissionKind::MinControlledCount => "Control at least 5 territories at the same time",
            MissionKind::MaxSingleTerritoryTroops => {
                "Amass 30 or more troops in a single territory"
            }
            MissionKind::DistinctFactionsControlled => {
                "Conquer territories of at least 3 different factions"
            }
            MissionKind::NamePrefixDomination => {
                "Dominate every territory whose name starts with 'B'"
            }
            MissionKind::TotalTroopSum => "Hold territories totalling 40 troops",
        }
    }
}

/// A player's private victory condition.
///
/// Owned by value: the description is copied out of the catalog at draw
/// time, so later players and catalog changes can never alias it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub kind: MissionKind,
    pub description: String,
}

impl Mission {
    pub fn new(kind: MissionKind) -> Self {
        Self {
            kind,
            description: kind.description().to_string(),
        }
    }
}

/// Draw one mission uniformly from the catalog using the shared random
/// source.
pub fn assign_mission(rng: &mut GameRng) -> Mission {
    let index = (rng.next_u64() % MissionKind::ALL.len() as u64) as usize;
    Mission::new(MissionKind::ALL[index])
}

/// Aggregates a single pass over the territory store, relative to one
/// player's faction. Everything the mission predicates need.
#[derive(Debug, Default)]
struct Survey {
    /// Territories held by the player.
    controlled: u32,
    /// Troop total across player-held territories.
    total_troops: u32,
    /// Largest garrison among player-held territories.
    max_troops: u32,
    /// Longest store-order run of player-held territories.
    longest_run: u32,
    /// Distinct faction strings among the player's own holdings. By
    /// construction this is 1 whenever the player holds anything at all,
    /// which makes the distinct-factions mission effectively unreachable;
    /// the rule is kept literal rather than reinterpreted.
    distinct_held: usize,
    /// Troops still fielded by the elimination-target faction, map-wide.
    target_troops: u32,
    /// Territories whose name starts with the domination prefix.
    prefixed: u32,
    /// Prefixed territories held by the player.
    prefixed_controlled: u32,
}

fn survey(territories: &[Territory], faction: &str) -> Survey {
    let mut s = Survey::default();
    let mut run = 0u32;
    let mut held_factions: FxHashSet<&str> = FxHashSet::default();

    for territory in territories {
        let held = territory.faction == faction;

        if held {
            s.controlled += 1;
            s.total_troops += territory.troops;
            s.max_troops = s.max_troops.max(territory.troops);
            held_factions.insert(territory.faction.as_str());
            run += 1;
            s.longest_run = s.longest_run.max(run);
        } else {
            run = 0;
        }

        if ELIMINATION_TARGETS
            .iter()
            .any(|t| territory.faction.eq_ignore_ascii_case(t))
        {
            s.target_troops += territory.troops;
        }

        let starts_with_prefix = territory
            .name
            .chars()
            .next()
            .is_some_and(|c| c.eq_ignore_ascii_case(&DOMINATION_PREFIX));
        if starts_with_prefix {
            s.prefixed += 1;
            if held {
                s.prefixed_controlled += 1;
            }
        }
    }

    s.distinct_held = held_factions.len();
    s
}

/// Decide whether a mission is currently satisfied by the territory state.
///
/// Pure and deterministic: no mutation, no randomness. Call again after
/// every attack; results are only valid for the snapshot they were computed
/// from.
pub fn evaluate(mission: &Mission, territories: &[Territory], faction: &Faction) -> bool {
    let s = survey(territories, faction);

    match mission.kind {
        MissionKind::ConsecutiveHoldings => s.longest_run >= CONSECUTIVE_RUN_TARGET,
        MissionKind::EliminateFaction => s.target_troops == 0,
        MissionKind::MinControlledCount => s.controlled >= CONTROLLED_COUNT_TARGET,
        MissionKind::MaxSingleTerritoryTroops => s.max_troops >= SINGLE_TERRITORY_TROOPS_TARGET,
        MissionKind::DistinctFactionsControlled => s.distinct_held >= DISTINCT_FACTIONS_TARGET,
        MissionKind::NamePrefixDomination => {
            s.prefixed > 0 && s.prefixed_controlled == s.prefixed
        }
        MissionKind::TotalTroopSum => s.total_troops >= TOTAL_TROOP_SUM_TARGET,
    }
}

// ============================================================================
// Tests
// ============================================================================
