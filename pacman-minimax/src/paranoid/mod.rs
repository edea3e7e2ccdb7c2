//! There are multiple multiplayer variations to minimax, this module is for the `paranoid`
//! variant. [This is currently the only variant supported by this crate]
//!
//! This variant assumes all your opponents are working together to minimize your score.
//!
//! This variant works by always scoring nodes as 'yourself', the agent at index 0.
//! When propagating scores up the tree, it chooses the highest score when its your turn
//! and the lowest score when its an opponent's turn. Agents take turns in index order, and the
//! depth counts whole rounds, so a depth of 2 in a game with 3 agents looks 6 moves ahead.
//!
//! ```rust
//! use pacman_game_types::{Direction, Layout, WorldState};
//! use pacman_minimax::paranoid::{MinimaxSearch, SearchOptions};
//!
//! let layout: Layout = "%%%%%%%%\n%.P . G%\n%%%%%%%%".parse().unwrap();
//! let state = WorldState::from_layout(layout);
//!
//! // This is the scoring function that we will use to evaluate the game states
//! // Here it just uses the current score but it could contain any logic to decide which
//! // states are better than others
//! fn score_function(state: &WorldState) -> i64 {
//!     state.score()
//! }
//!
//! let search = MinimaxSearch::from_fn(state, &score_function, "docs", SearchOptions { depth: 1 });
//!
//! let (action, score) = search.choose_action().unwrap();
//! assert_eq!(action, Direction::West);
//! assert_eq!(score, 9);
//! ```

mod score;
pub use score::{Scorable, WrappedScorable};

mod minimax_return;
pub use minimax_return::MinMaxReturn;

mod eval;
pub use eval::{MinimaxSearch, SearchOptions};
