use pacman_game_types::{Direction, GhostIndex, WorldState};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{Agent, AgentFactory, AgentOptions, BoxedAgent};

/// A ghost that picks uniformly among its legal actions
#[derive(Debug, Clone)]
pub struct RandomGhost {
    index: usize,
    rng: StdRng,
}

impl RandomGhost {
    pub fn new(index: usize, seed: u64) -> Self {
        Self {
            index,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomGhost {
    fn index(&self) -> usize {
        self.index
    }

    fn get_action(
        &mut self,
        state: &WorldState,
    ) -> Result<Direction, Box<dyn std::error::Error + Send + Sync>> {
        let ghost = GhostIndex::new(self.index, state.num_agents())?;
        let legal = state.legal_actions(ghost.as_usize())?;
        let action = legal
            .choose(&mut self.rng)
            .ok_or_else(|| format!("ghost {} has no legal actions", self.index))?;

        Ok(*action)
    }
}

#[derive(Debug)]
pub struct RandomGhostFactory;

impl AgentFactory for RandomGhostFactory {
    fn name(&self) -> String {
        "random-ghost".to_owned()
    }

    fn plays_pacman(&self) -> bool {
        false
    }

    fn build(&self, index: usize, options: &AgentOptions) -> BoxedAgent {
        Box::new(RandomGhost::new(index, options.seed))
    }
}
