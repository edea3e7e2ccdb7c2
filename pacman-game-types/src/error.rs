use thiserror::Error;

use crate::Direction;

/// Errors raised by the rules when a caller asks for something the game doesn't allow
///
/// None of these are transient. They describe a caller bug (or a finished game) and are
/// always handed back to whoever asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RulesError {
    /// The action isn't in the legal set for this agent in this state
    #[error("illegal action {action} for agent {agent_index}")]
    IllegalAction {
        /// The agent that tried to move
        agent_index: usize,
        /// The rejected action
        action: Direction,
    },
    /// The state is already won or lost
    #[error("can't generate a successor of a terminal state")]
    TerminalState,
    /// Index out of range, or pacman's index passed where a ghost is required
    #[error("invalid agent index {index} for a game with {num_agents} agents")]
    InvalidAgentIndex {
        /// The index we were given
        index: usize,
        /// How many agents the game actually has
        num_agents: usize,
    },
}

/// Errors from parsing a layout out of its text form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} is {found} wide but the layout is {expected} wide")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown layout character {character:?} at row {row}, column {column}")]
    UnknownCharacter {
        character: char,
        row: usize,
        column: usize,
    },
    #[error("layout has no pacman start")]
    MissingPacman,
    #[error("layout has {0} pacman starts, expected exactly one")]
    MultiplePacmen(usize),
}

/// Returned when a string isn't one of the five action names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0:?} is not a direction")]
pub struct ParseDirectionError(pub String);
