use crate::{error::RulesError, Configuration, Direction, Position};

/// The index pacman always plays at
pub const PACMAN_INDEX: usize = 0;

/// Everything that changes about a single agent over the course of a game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentState {
    pub configuration: Configuration,
    /// Where the agent respawns after being eaten
    pub start: Configuration,
    pub is_pacman: bool,
    /// Only ever non-zero for ghosts. Zero means dangerous, anything higher means edible.
    pub scared_timer: u32,
}

impl AgentState {
    pub fn new(start: Configuration, is_pacman: bool) -> Self {
        Self {
            configuration: start,
            start,
            is_pacman,
            scared_timer: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.configuration.position
    }

    pub fn direction(&self) -> Direction {
        self.configuration.direction
    }

    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

/// A validated ghost index, always in `1..num_agents`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GhostIndex(usize);

impl GhostIndex {
    pub fn new(index: usize, num_agents: usize) -> Result<Self, RulesError> {
        if index == PACMAN_INDEX || index >= num_agents {
            return Err(RulesError::InvalidAgentIndex { index, num_agents });
        }

        Ok(Self(index))
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

/// Which side of the game a raw agent index plays for
///
/// The rules treat pacman and the ghosts differently (who eats, who may stop, who may turn
/// around), so every raw index goes through here before anything is simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentIndex {
    Pacman,
    Ghost(GhostIndex),
}

impl AgentIndex {
    pub fn resolve(index: usize, num_agents: usize) -> Result<Self, RulesError> {
        if index >= num_agents {
            return Err(RulesError::InvalidAgentIndex { index, num_agents });
        }

        if index == PACMAN_INDEX {
            Ok(AgentIndex::Pacman)
        } else {
            GhostIndex::new(index, num_agents).map(AgentIndex::Ghost)
        }
    }

    pub fn as_usize(&self) -> usize {
        match self {
            AgentIndex::Pacman => PACMAN_INDEX,
            AgentIndex::Ghost(g) => g.as_usize(),
        }
    }
}
