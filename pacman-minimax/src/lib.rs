#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements the minimax algorithm for turn based games where one agent plays against
//! all the others. You provide a 'scoring' function that turns a given state into anything that
//! implements the `Ord` trait.
//!
//! The game logic lives elsewhere. Anything implementing
//! [pacman_game_types::types::SimulableGame] can be searched, and the pacman [WorldState] from
//! `pacman-game-types` is the main one.
//!
//! [WorldState]: pacman_game_types::WorldState

use thiserror::Error;

pub mod paranoid;

/// Why a search couldn't pick an action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinimaxError<E>
where
    E: std::error::Error + 'static,
{
    /// The root state is still in progress, but the maximizing agent has nothing it can do
    #[error("agent {agent_index} has no legal actions")]
    NoLegalActions {
        /// Who was supposed to move
        agent_index: usize,
    },
    /// The game itself refused, most often because the root state is already over
    #[error(transparent)]
    Game(#[from] E),
}
