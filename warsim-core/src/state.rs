use crate::mission::Mission;
use serde::{Deserialize, Serialize};

/// The "color" string identifying which side controls a territory or player.
pub type Faction = String;

/// Index into the territory store. Store order is registration order and
/// doubles as the adjacency proxy for "consecutive" missions.
pub type TerritoryId = usize;

/// A map cell: name, controlling faction, garrison size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub name: String,
    pub faction: Faction,
    /// Never drops below 1 once the territory has been fought over.
    pub troops: u32,
}

impl Territory {
    pub fn new(name: impl Into<String>, faction: impl Into<Faction>, troops: u32) -> Self {
        Self {
            name: name.into(),
            faction: faction.into(),
            troops,
        }
    }
}

/// A participant holding one private victory mission.
///
/// The mission is owned by value: every player gets an independent copy at
/// registration and it is never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub faction: Faction,
    pub mission: Mission,
}

/// Deterministic random source embedded in the game state.
///
/// SplitMix64 over a single state word: the whole stream is reproducible
/// from the seed, and a serialized snapshot resumes it exactly. Seeded once
/// at startup and never reseeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRng {
    pub seed: u64,
    /// Current stream position (advanced by every draw).
    pub state: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

/// Complete simulation state: territory store, player store, turn counter
/// and the shared random source.
///
/// Territories and players are registered once at startup; afterwards the
/// territory store is mutated only through [`crate::step::attack`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub turn: u32,
    pub rng: GameRng,
    pub territories: Vec<Territory>,
    pub players: Vec<Player>,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            turn: 1,
            rng: GameRng::new(seed),
            territories: Vec::new(),
            players: Vec::new(),
        }
    }

    /// Compute a deterministic checksum of the game state.
    ///
    /// Identical states produce identical checksums; used by tests to prove
    /// that rejected actions leave the state untouched.
    pub fn checksum(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();

        self.turn.hash(&mut hasher);
        // RNG position (not seed, as seed is constant)
        self.rng.state.hash(&mut hasher);

        // Both stores are Vecs, so iteration order is already deterministic.
        for t in &self.territories {
            t.name.hash(&mut hasher);
            t.faction.hash(&mut hasher);
            t.troops.hash(&mut hasher);
        }
        for p in &self.players {
            p.name.hash(&mut hasher);
            p.faction.hash(&mut hasher);
            p.mission.kind.hash(&mut hasher);
            p.mission.description.hash(&mut hasher);
        }

        hasher.finish()
    }
}
