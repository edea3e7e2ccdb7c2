use std::fmt::Debug;

use pacman_game_types::types::VictorDeterminableGame;

/// This trait is used to control something that can return a score from a game state
///
/// We use this trait to be able to layer in different scoring approaches
pub trait Scorable<GameType, ScoreType> {
    /// Convert the given GameType into a ScoreType
    fn score(&self, game: &GameType) -> ScoreType;
}

impl<GameType, ScoreType, FnLike: Fn(&GameType) -> ScoreType> Scorable<GameType, ScoreType>
    for FnLike
{
    fn score(&self, game: &GameType) -> ScoreType {
        (self)(game)
    }
}

/// Provides an implementation for `wrapped_score` if the implementer implements the `score`
/// function.
///
/// `wrapped_score` decides whether a node is a leaf of the search, so that the underlying
/// scoring functions don't need to worry about this
pub trait WrappedScorable<GameType, ScoreType>
where
    ScoreType: PartialOrd + Ord + Copy + Debug,
    GameType: VictorDeterminableGame,
{
    /// This is the the scoring function for the search
    ///
    /// Every leaf, finished games included, is scored by this
    fn score(&self, node: &GameType) -> ScoreType;

    /// Returns the score of `node` if it is a leaf in our Minimax tree, `None` if the search has
    /// to keep going
    ///
    /// A node is a leaf when the game is over or when `ply` has reached `max_ply`.
    fn wrapped_score(&self, node: &GameType, ply: usize, max_ply: usize) -> Option<ScoreType> {
        if node.is_over() || ply >= max_ply {
            return Some(self.score(node));
        }

        None
    }
}
