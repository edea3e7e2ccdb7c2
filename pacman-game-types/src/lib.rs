//! The rules of pacman: layouts, immutable world states, and the transitions between them
//!
//! A [Layout] is parsed once and shared. The opening [WorldState] is built from it, and every
//! later state comes from [WorldState::generate_successor], which never touches its input.
//!
//! ```
//! use pacman_game_types::{Direction, Layout, WorldState};
//!
//! let layout: Layout = "%%%%%%\n%P..G%\n%%%%%%".parse().unwrap();
//! let state = WorldState::from_layout(layout);
//!
//! assert_eq!(state.legal_pacman_actions(), Ok(vec![Direction::East]));
//!
//! let next = state.generate_pacman_successor(Direction::East).unwrap();
//! assert_eq!(next.score(), 9);
//! assert_eq!(state.score(), 0);
//! ```

mod agent;
mod direction;
mod error;
mod layout;
mod position;
pub mod rules;
mod state;
pub mod types;

pub use agent::{AgentIndex, AgentState, GhostIndex, PACMAN_INDEX};
pub use direction::Direction;
pub use error::{LayoutError, ParseDirectionError, RulesError};
pub use layout::{AgentStart, FoodGrid, Grid, Layout};
pub use position::{Cell, Configuration, Position};
pub use state::WorldState;
