use pacman_game_types::{Direction, RulesError, WorldState, PACMAN_INDEX};
use pacman_minimax::{
    paranoid::{MinMaxReturn, MinimaxSearch, SearchOptions},
    MinimaxError,
};
use tracing::info;

use crate::{evaluation::score_evaluation, Agent, AgentFactory, AgentOptions, BoxedAgent};

type ScoreSearch =
    MinimaxSearch<WorldState, i64, &'static (dyn Fn(&WorldState) -> i64 + Send + Sync)>;

fn search(state: &WorldState, depth: usize) -> ScoreSearch {
    MinimaxSearch::from_fn(
        state.clone(),
        &score_evaluation,
        "minimax-agent",
        SearchOptions { depth },
    )
}

/// The best action for pacman looking `depth` full rounds ahead, scoring leaves by the game score
///
/// Asking about a state that is already won or lost is an error.
pub fn choose_action(
    state: &WorldState,
    depth: usize,
) -> Result<Direction, MinimaxError<RulesError>> {
    search(state, depth).choose_action().map(|(action, _)| action)
}

/// The whole tree [choose_action] looks at, for debugging
pub fn explain_action(
    state: &WorldState,
    depth: usize,
) -> Result<MinMaxReturn<Direction, i64>, MinimaxError<RulesError>> {
    search(state, depth).single_minimax()
}

#[derive(Debug, Clone, Copy)]
pub struct MinimaxAgent {
    depth: usize,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        Self { depth }
    }
}

impl Agent for MinimaxAgent {
    fn index(&self) -> usize {
        PACMAN_INDEX
    }

    fn get_action(
        &mut self,
        state: &WorldState,
    ) -> Result<Direction, Box<dyn std::error::Error + Send + Sync>> {
        Ok(choose_action(state, self.depth)?)
    }

    fn end(&self) {
        info!(depth = self.depth, "MinimaxAgent has ended");
    }
}

#[derive(Debug)]
pub struct MinimaxAgentFactory;

impl AgentFactory for MinimaxAgentFactory {
    fn name(&self) -> String {
        "minimax".to_owned()
    }

    fn plays_pacman(&self) -> bool {
        true
    }

    fn build(&self, _index: usize, options: &AgentOptions) -> BoxedAgent {
        Box::new(MinimaxAgent::new(options.depth))
    }
}
