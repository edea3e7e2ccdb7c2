//! A hand built tree for three agents, where one round is three plies deep

use pacman_game_types::types::{AgentCountableGame, SimulableGame, VictorDeterminableGame};
use pacman_minimax::paranoid::{MinimaxSearch, SearchOptions};
use thiserror::Error;

/// Agent 0 picks A or B at the root, agent 1 has a single move, then agent 2 picks a leaf
///
/// ```text
///          root
///       A        B
///       |        |
///      A'       B'      <- scored 10 and 0 if the search stopped here
///    1    9   5    6
/// ```
const CHILDREN: [&[usize]; 9] = [&[1, 2], &[3], &[4], &[5, 6], &[7, 8], &[], &[], &[], &[]];

const STATIC_SCORES: [i64; 9] = [0, 2, 3, 10, 0, 1, 9, 5, 6];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ThreeAgentGame {
    node: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
enum ThreeAgentError {
    #[error("the game is over")]
    Over,
    #[error("no branch {0}")]
    NoSuchBranch(usize),
}

impl AgentCountableGame for ThreeAgentGame {
    fn num_agents(&self) -> usize {
        3
    }
}

impl VictorDeterminableGame for ThreeAgentGame {
    fn is_over(&self) -> bool {
        CHILDREN[self.node].is_empty()
    }

    fn is_victor(&self) -> bool {
        false
    }
}

impl SimulableGame for ThreeAgentGame {
    type Action = usize;
    type Error = ThreeAgentError;

    fn ensure_in_progress(&self) -> Result<(), ThreeAgentError> {
        if self.is_over() {
            return Err(ThreeAgentError::Over);
        }
        Ok(())
    }

    fn legal_actions(&self, _agent_index: usize) -> Result<Vec<usize>, ThreeAgentError> {
        Ok((0..CHILDREN[self.node].len()).collect())
    }

    fn simulate(&self, _agent_index: usize, action: usize) -> Result<Self, ThreeAgentError> {
        let node = *CHILDREN[self.node]
            .get(action)
            .ok_or(ThreeAgentError::NoSuchBranch(action))?;

        Ok(ThreeAgentGame { node })
    }
}

fn static_score(game: &ThreeAgentGame) -> i64 {
    STATIC_SCORES[game.node]
}

fn search(depth: usize) -> MinimaxSearch<ThreeAgentGame, i64, fn(&ThreeAgentGame) -> i64> {
    MinimaxSearch::new(
        ThreeAgentGame { node: 0 },
        static_score as fn(&ThreeAgentGame) -> i64,
        "three-agents",
        SearchOptions { depth },
    )
}

#[test]
fn test_one_round_reaches_the_third_agent() {
    let search = search(1);

    // Agent 2 leaves A at 1 and B at 5, the ply 2 scores of 10 and 0 never count
    assert_eq!(search.scored_root_actions(), Ok(vec![(0, 1), (1, 5)]));
    assert_eq!(search.choose_action(), Ok((1, 5)));
}

#[test]
fn test_one_round_tree_covers_every_ply() {
    let tree = search(1).single_minimax().unwrap();

    assert_eq!(tree.node_count(), 9);
    assert_eq!(*tree.score(), 5);
    assert_eq!(tree.chosen_route(), vec![(0, 1), (1, 0), (2, 0)]);
}

#[test]
fn test_depth_zero_stops_after_our_move() {
    let search = search(0);

    assert_eq!(search.scored_root_actions(), Ok(vec![(0, 2), (1, 3)]));
    assert_eq!(search.single_minimax().unwrap().node_count(), 3);
}
