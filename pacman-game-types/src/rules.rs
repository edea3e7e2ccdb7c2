//! How agents move, what they eat, and who dies
//!
//! Pacman and the ghosts play by different rules, so each gets its own set. Both only ever
//! touch a freshly cloned [WorldState] inside [WorldState::generate_successor].

use std::sync::Arc;

use tracing::trace;

use crate::{
    agent::{AgentIndex, GhostIndex},
    error::RulesError,
    AgentState, Cell, Direction, Position, WorldState,
};

/// How long ghosts stay edible after pacman eats a capsule
pub const SCARED_TIME: u32 = 40;
/// Pacman and a ghost collide when they are at most this far apart
pub const COLLISION_TOLERANCE: f64 = 0.7;
/// Charged on every pacman move
pub const TIME_PENALTY: i64 = 1;

pub const FOOD_SCORE: i64 = 10;
pub const WIN_SCORE: i64 = 500;
pub const GHOST_EATEN_SCORE: i64 = 200;
pub const DEATH_PENALTY: i64 = 500;

struct PacmanRules;

impl PacmanRules {
    const SPEED: f64 = 1.0;

    fn legal_actions(state: &WorldState) -> Vec<Direction> {
        let mut possible = state
            .pacman_state()
            .configuration
            .possible_actions(&state.layout);
        possible.retain(|&d| d != Direction::Stop);

        possible
    }

    fn apply_action(state: &mut WorldState, action: Direction) -> Result<(), RulesError> {
        if !Self::legal_actions(state).contains(&action) {
            return Err(RulesError::IllegalAction {
                agent_index: AgentIndex::Pacman.as_usize(),
                action,
            });
        }

        let pacman = &mut state.agents[AgentIndex::Pacman.as_usize()];
        pacman.configuration = pacman.configuration.moved(action, Self::SPEED);

        let next = pacman.position();
        if next.is_settled() {
            Self::consume(next.nearest_cell(), state);
        }

        Ok(())
    }

    fn consume(cell: Cell, state: &mut WorldState) {
        if state.food.is_set(cell) {
            state.score_change += FOOD_SCORE;
            Arc::make_mut(&mut state.food).set(cell, false);
            state.food_eaten = Some(cell);

            if state.food.count() == 0 && !state.lose {
                state.score_change += WIN_SCORE;
                state.win = true;
            }
        }

        if let Some(i) = state.capsules.iter().position(|&c| c == cell) {
            Arc::make_mut(&mut state.capsules).remove(i);
            state.capsule_eaten = Some(cell);

            for ghost in state.agents.iter_mut().skip(1) {
                ghost.scared_timer = SCARED_TIME;
            }
        }
    }
}

struct GhostRules;

impl GhostRules {
    const SPEED: f64 = 1.0;

    /// Ghosts can't stop, and they only turn around when they hit a dead end
    fn legal_actions(state: &WorldState, ghost: GhostIndex) -> Vec<Direction> {
        let config = state.agents[ghost.as_usize()].configuration;
        let mut possible = config.possible_actions(&state.layout);
        possible.retain(|&d| d != Direction::Stop);

        let reverse = config.direction.reverse();
        if possible.len() > 1 {
            possible.retain(|&d| d != reverse);
        }

        possible
    }

    fn apply_action(
        state: &mut WorldState,
        action: Direction,
        ghost: GhostIndex,
    ) -> Result<(), RulesError> {
        if !Self::legal_actions(state, ghost).contains(&action) {
            return Err(RulesError::IllegalAction {
                agent_index: ghost.as_usize(),
                action,
            });
        }

        let ghost_state = &mut state.agents[ghost.as_usize()];
        let speed = if ghost_state.is_scared() {
            Self::SPEED / 2.0
        } else {
            Self::SPEED
        };
        ghost_state.configuration = ghost_state.configuration.moved(action, speed);

        Ok(())
    }

    /// Ticks the scared timer down. A ghost that stops being scared snaps back onto the grid.
    fn decrement_timer(ghost_state: &mut AgentState) {
        let timer = ghost_state.scared_timer;
        if timer == 1 {
            let snapped: Position = ghost_state.position().nearest_cell().into();
            ghost_state.configuration.position = snapped;
        }
        ghost_state.scared_timer = timer.saturating_sub(1);
    }

    fn check_death(state: &mut WorldState, moved: AgentIndex) {
        let pacman_position = state.pacman_position();

        match moved {
            AgentIndex::Pacman => {
                for index in 1..state.agents.len() {
                    if Self::can_kill(pacman_position, state.agents[index].position()) {
                        Self::collide(state, index);
                    }
                }
            }
            AgentIndex::Ghost(ghost) => {
                let index = ghost.as_usize();
                if Self::can_kill(pacman_position, state.agents[index].position()) {
                    Self::collide(state, index);
                }
            }
        }
    }

    fn collide(state: &mut WorldState, index: usize) {
        let ghost_state = &mut state.agents[index];

        if ghost_state.is_scared() {
            ghost_state.configuration = ghost_state.start;
            ghost_state.scared_timer = 0;
            state.score_change += GHOST_EATEN_SCORE;
            state.eaten[index] = true;
        } else if !state.win {
            state.score_change -= DEATH_PENALTY;
            state.lose = true;
        }
    }

    fn can_kill(pacman_position: Position, ghost_position: Position) -> bool {
        ghost_position.manhattan_distance(&pacman_position) <= COLLISION_TOLERANCE
    }
}

impl WorldState {
    /// Every action `agent_index` may take right now, in North, South, East, West order
    ///
    /// A finished game has no legal actions for anyone.
    pub fn legal_actions(&self, agent_index: usize) -> Result<Vec<Direction>, RulesError> {
        let agent = AgentIndex::resolve(agent_index, self.num_agents())?;

        if self.is_over() {
            return Ok(vec![]);
        }

        Ok(match agent {
            AgentIndex::Pacman => PacmanRules::legal_actions(self),
            AgentIndex::Ghost(ghost) => GhostRules::legal_actions(self, ghost),
        })
    }

    pub fn legal_pacman_actions(&self) -> Result<Vec<Direction>, RulesError> {
        self.legal_actions(AgentIndex::Pacman.as_usize())
    }

    /// The state after `agent_index` takes `action`. `self` is left untouched.
    pub fn generate_successor(
        &self,
        agent_index: usize,
        action: Direction,
    ) -> Result<WorldState, RulesError> {
        let agent = AgentIndex::resolve(agent_index, self.num_agents())?;

        if self.is_over() {
            return Err(RulesError::TerminalState);
        }

        let mut state = self.clone();
        state.score_change = 0;
        state.food_eaten = None;
        state.capsule_eaten = None;

        match agent {
            AgentIndex::Pacman => {
                state.eaten = vec![false; state.num_agents()];
                PacmanRules::apply_action(&mut state, action)?;
                state.score_change -= TIME_PENALTY;
            }
            AgentIndex::Ghost(ghost) => {
                GhostRules::apply_action(&mut state, action, ghost)?;
                GhostRules::decrement_timer(&mut state.agents[ghost.as_usize()]);
            }
        }

        GhostRules::check_death(&mut state, agent);

        state.last_agent_moved = Some(agent_index);
        state.score += state.score_change;

        trace!(
            agent_index,
            %action,
            score = state.score,
            score_change = state.score_change,
            "generated successor"
        );

        Ok(state)
    }

    pub fn generate_pacman_successor(&self, action: Direction) -> Result<WorldState, RulesError> {
        self.generate_successor(AgentIndex::Pacman.as_usize(), action)
    }
}
