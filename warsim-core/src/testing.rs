use crate::mission::{Mission, MissionKind};
use crate::state::{GameState, Player, Territory};

pub struct GameStateBuilder {
    state: GameState,
}

impl GameStateBuilder {
    pub fn new() -> Self {
        Self {
            state: GameState::new(0),
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.state = GameState::new(seed);
        self
    }

    pub fn with_territory(mut self, name: &str, faction: &str, troops: u32) -> Self {
        self.state
            .territories
            .push(Territory::new(name, faction, troops));
        self
    }

    pub fn with_player(mut self, name: &str, faction: &str, kind: MissionKind) -> Self {
        self.state.players.push(Player {
            name: name.to_string(),
            faction: faction.to_string(),
            mission: Mission::new(kind),
        });
        self
    }

    pub fn build(self) -> GameState {
        self.state
    }
}

impl Default for GameStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
