//! Traits describing what a turn based game has to offer for searches to run over it
//!
//! [WorldState] implements all of them, but nothing in a search needs to know that.

use std::fmt::Debug;

use crate::{error::RulesError, Direction, WorldState};

/// A game with a fixed number of agents that take turns in index order
pub trait AgentCountableGame {
    /// How many agents take turns, the maximizing agent being index 0
    fn num_agents(&self) -> usize;
}

/// A game that can tell when it has ended
pub trait VictorDeterminableGame {
    /// Won or lost
    fn is_over(&self) -> bool;

    /// Did the agent at index 0 win
    fn is_victor(&self) -> bool;
}

/// A game where any state can produce the state after an agent moves, without changing itself
pub trait SimulableGame: AgentCountableGame + VictorDeterminableGame + Sized {
    /// What an agent picks on its turn
    type Action: Copy + Debug + PartialEq;
    /// What goes wrong when a caller asks for something the game doesn't allow
    type Error: std::error::Error + 'static;

    /// Errors when the state is already over
    fn ensure_in_progress(&self) -> Result<(), Self::Error>;

    /// Legal actions of `agent_index`, in a stable order
    fn legal_actions(&self, agent_index: usize) -> Result<Vec<Self::Action>, Self::Error>;

    /// The state after `agent_index` takes `action`
    fn simulate(&self, agent_index: usize, action: Self::Action) -> Result<Self, Self::Error>;
}

impl AgentCountableGame for WorldState {
    fn num_agents(&self) -> usize {
        WorldState::num_agents(self)
    }
}

impl VictorDeterminableGame for WorldState {
    fn is_over(&self) -> bool {
        WorldState::is_over(self)
    }

    fn is_victor(&self) -> bool {
        self.is_win()
    }
}

impl SimulableGame for WorldState {
    type Action = Direction;
    type Error = RulesError;

    fn ensure_in_progress(&self) -> Result<(), RulesError> {
        if WorldState::is_over(self) {
            return Err(RulesError::TerminalState);
        }

        Ok(())
    }

    fn legal_actions(&self, agent_index: usize) -> Result<Vec<Direction>, RulesError> {
        WorldState::legal_actions(self, agent_index)
    }

    fn simulate(&self, agent_index: usize, action: Direction) -> Result<Self, RulesError> {
        self.generate_successor(agent_index, action)
    }
}
