use decorum::N64;
use itertools::Itertools;
use pacman_game_types::{
    types::SimulableGame, Direction, RulesError, WorldState, PACMAN_INDEX,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::debug;

use crate::{evaluation::reflex_evaluation, Agent, AgentFactory, AgentOptions, BoxedAgent};

/// Looks a single move ahead with [reflex_evaluation]
///
/// Ties are broken at random, with a generator the agent owns so a seed reproduces the same game.
#[derive(Debug, Clone)]
pub struct ReflexAgent {
    rng: StdRng,
}

impl ReflexAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for ReflexAgent {
    fn index(&self) -> usize {
        PACMAN_INDEX
    }

    fn get_action(
        &mut self,
        state: &WorldState,
    ) -> Result<Direction, Box<dyn std::error::Error + Send + Sync>> {
        state.ensure_in_progress()?;

        let scored = state
            .legal_pacman_actions()?
            .into_iter()
            .map(|action| -> Result<_, RulesError> {
                Ok((action, N64::from(reflex_evaluation(state, action)?)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let best_score = scored
            .iter()
            .map(|(_, score)| *score)
            .max()
            .ok_or("pacman has no legal actions")?;

        let best_actions = scored
            .iter()
            .filter(|(_, score)| *score == best_score)
            .map(|(action, _)| *action)
            .collect_vec();
        debug!(?best_actions, ?best_score, "reflex scores");

        let chosen = best_actions
            .choose(&mut self.rng)
            .ok_or("pacman has no legal actions")?;

        Ok(*chosen)
    }
}

#[derive(Debug)]
pub struct ReflexAgentFactory;

impl AgentFactory for ReflexAgentFactory {
    fn name(&self) -> String {
        "reflex".to_owned()
    }

    fn plays_pacman(&self) -> bool {
        true
    }

    fn build(&self, _index: usize, options: &AgentOptions) -> BoxedAgent {
        Box::new(ReflexAgent::new(options.seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacman_game_types::Layout;

    fn state_for(layout: &str) -> WorldState {
        let layout: Layout = layout.parse().unwrap();
        WorldState::from_layout(layout)
    }

    #[test]
    fn test_takes_the_clear_best() {
        let state = state_for("%%%%%%\n%.P  %\n%%%%%%");
        let mut agent = ReflexAgent::new(0);

        assert_eq!(agent.get_action(&state).unwrap(), Direction::West);
    }

    #[test]
    fn test_ties_are_reproducible_per_seed() {
        // Both ways eat a pellet and leave the other one two cells away
        let state = state_for("%%%%%\n%.P.%\n%%%%%");

        let mut seen = vec![];
        for seed in 0..64 {
            let first = ReflexAgent::new(seed).get_action(&state).unwrap();
            let second = ReflexAgent::new(seed).get_action(&state).unwrap();

            assert_eq!(first, second);
            assert!(first == Direction::East || first == Direction::West);
            seen.push(first);
        }

        assert!(seen.contains(&Direction::East));
        assert!(seen.contains(&Direction::West));
    }

    #[test]
    fn test_finished_game_is_an_error() {
        let state = state_for("%%%%\n%P.%\n%%%%");
        let state = state.generate_pacman_successor(Direction::East).unwrap();
        assert!(state.is_win());

        let err = ReflexAgent::new(0).get_action(&state).unwrap_err();
        assert_eq!(err.downcast_ref::<RulesError>(), Some(&RulesError::TerminalState));

        // The minimax agent reports a finished game the same way
        let err = crate::minimax_agent::MinimaxAgent::new(2)
            .get_action(&state)
            .unwrap_err();
        assert_eq!(err.to_string(), RulesError::TerminalState.to_string());

        // A finished game has no legal actions rather than failing outright
        assert_eq!(state.legal_pacman_actions(), Ok(vec![]));
        assert_eq!(
            reflex_evaluation(&state, Direction::West),
            Err(RulesError::TerminalState)
        );
    }
}
