//! Ways to watch a game. The rules never call into these, only the game driver does.

use pacman_game_types::WorldState;
use tracing::info;

pub trait GameDisplay {
    fn initialize(&mut self, state: &WorldState);
    fn update(&mut self, state: &WorldState);
    fn finish(&mut self) {}
}

/// Shows nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDisplay;

impl GameDisplay for NullDisplay {
    fn initialize(&mut self, _state: &WorldState) {}
    fn update(&mut self, _state: &WorldState) {}
}

/// Logs the board as text through [tracing], every `frame_interval` moves
#[derive(Debug, Clone, Copy)]
pub struct TextDisplay {
    frame_interval: usize,
    moves: usize,
}

impl TextDisplay {
    pub fn new(frame_interval: usize) -> Self {
        Self {
            frame_interval: frame_interval.max(1),
            moves: 0,
        }
    }

    /// How many updates this display has seen
    pub fn moves(&self) -> usize {
        self.moves
    }
}

impl Default for TextDisplay {
    fn default() -> Self {
        Self::new(1)
    }
}

impl GameDisplay for TextDisplay {
    fn initialize(&mut self, state: &WorldState) {
        self.moves = 0;
        info!("\n{}", state);
    }

    fn update(&mut self, state: &WorldState) {
        self.moves += 1;

        if self.moves % self.frame_interval == 0 || state.is_over() {
            info!(moves = self.moves, "\n{}", state);
        }
    }

    fn finish(&mut self) {
        info!(moves = self.moves, "display finished");
    }
}
