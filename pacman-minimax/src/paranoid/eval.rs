use std::{fmt::Debug, marker::PhantomData};

use derivative::Derivative;
use pacman_game_types::types::SimulableGame;
use tracing::{debug, info_span};

use crate::MinimaxError;

use super::{score::Scorable, MinMaxReturn, WrappedScorable};

#[derive(Derivative, Clone)]
#[derivative(Debug(bound = "GameType: Debug"))]
/// This is the struct that wraps a game state and a scoring function and can be used to run
/// minimax
///
/// It also outputs traces using the [tracing] crate.
pub struct MinimaxSearch<GameType, ScoreType, ScorableType>
where
    ScorableType: Scorable<GameType, ScoreType>,
{
    /// The root of the search
    pub game: GameType,
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    /// Shows up in traces, so searches from different agents can be told apart
    pub name: &'static str,
    options: SearchOptions,
    #[derivative(Debug = "ignore")]
    _phantom: PhantomData<ScoreType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Optional properties that can be defined for a [MinimaxSearch]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use pacman_minimax::paranoid::SearchOptions;
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.depth, 2);
/// ```
pub struct SearchOptions {
    /// How many full rounds to look ahead, where a round is one move from every agent
    ///
    /// Zero still looks at the immediate result of each of our own actions
    ///
    /// Defaults to 2
    pub depth: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { depth: 2 }
    }
}

impl<GameType, ScoreType, ScorableType> WrappedScorable<GameType, ScoreType>
    for MinimaxSearch<GameType, ScoreType, ScorableType>
where
    ScoreType: Debug + PartialOrd + Ord + Copy,
    GameType: SimulableGame,
    ScorableType: Scorable<GameType, ScoreType>,
{
    fn score(&self, node: &GameType) -> ScoreType {
        self.score_function.score(node)
    }
}

impl<GameType, ScoreType>
    MinimaxSearch<GameType, ScoreType, &'static (dyn Fn(&GameType) -> ScoreType + Send + Sync)>
where
    GameType: SimulableGame,
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy,
{
    /// Construct a new `MinimaxSearch` from a plain scoring function
    ///
    /// See the [module docs](crate::paranoid) for an example
    pub fn from_fn(
        game: GameType,
        score_function: &'static (dyn Fn(&GameType) -> ScoreType + Send + Sync),
        name: &'static str,
        options: SearchOptions,
    ) -> Self {
        Self {
            game,
            score_function,
            name,
            options,
            _phantom: Default::default(),
        }
    }
}

impl<GameType, ScoreType, ScorableType> MinimaxSearch<GameType, ScoreType, ScorableType>
where
    GameType: SimulableGame,
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy,
    ScorableType: Scorable<GameType, ScoreType>,
{
    /// Construct a new `MinimaxSearch`
    pub fn new(
        game: GameType,
        score_function: ScorableType,
        name: &'static str,
        options: SearchOptions,
    ) -> Self {
        Self {
            game,
            score_function,
            name,
            options,
            _phantom: Default::default(),
        }
    }

    /// The options this search was built with
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    fn max_ply(&self) -> usize {
        self.options.depth * self.game.num_agents()
    }

    /// Pick the action for agent 0
    ///
    /// Every legal root action is scored with [MinimaxSearch::scored_root_actions] and the first
    /// one with the highest score wins, so the same state always gets the same answer.
    pub fn choose_action(
        &self,
    ) -> Result<(GameType::Action, ScoreType), MinimaxError<GameType::Error>> {
        let span = info_span!(
            "minimax",
            search_name = self.name,
            depth = self.options.depth,
            agents = self.game.num_agents(),
            chosen_action = tracing::field::Empty,
            chosen_score = tracing::field::Empty,
        );

        span.in_scope(|| {
            let mut best: Option<(GameType::Action, ScoreType)> = None;
            for (action, score) in self.scored_root_actions()? {
                match best {
                    Some((_, best_score)) if best_score >= score => {}
                    _ => best = Some((action, score)),
                }
            }

            let (action, score) = best.ok_or(MinimaxError::NoLegalActions { agent_index: 0 })?;

            let current_span = tracing::Span::current();
            current_span.record("chosen_action", format!("{:?}", action).as_str());
            current_span.record("chosen_score", format!("{:?}", score).as_str());

            Ok((action, score))
        })
    }

    /// The minimax value of every legal root action, in the order the game lists them
    ///
    /// Errors if the root is already over or if agent 0 has nothing it can do.
    pub fn scored_root_actions(
        &self,
    ) -> Result<Vec<(GameType::Action, ScoreType)>, MinimaxError<GameType::Error>> {
        let root = &self.game;
        root.ensure_in_progress()?;

        let legal = root.legal_actions(0)?;
        if legal.is_empty() {
            return Err(MinimaxError::NoLegalActions { agent_index: 0 });
        }

        let max_ply = self.max_ply();
        let next_agent = 1 % root.num_agents();

        legal
            .into_iter()
            .map(|action| -> Result<_, MinimaxError<GameType::Error>> {
                let successor = root.simulate(0, action)?;
                let score = self.value(&successor, next_agent, 1, max_ply)?;
                debug!(?action, ?score, "scored root action");

                Ok((action, score))
            })
            .collect()
    }

    fn value(
        &self,
        node: &GameType,
        agent_index: usize,
        ply: usize,
        max_ply: usize,
    ) -> Result<ScoreType, GameType::Error> {
        if let Some(s) = self.wrapped_score(node, ply, max_ply) {
            return Ok(s);
        }

        let legal = node.legal_actions(agent_index)?;
        if legal.is_empty() {
            return Ok(self.score(node));
        }

        let next_agent = (agent_index + 1) % node.num_agents();
        let is_maximizing = agent_index == 0;

        let mut chosen: Option<ScoreType> = None;
        for action in legal {
            let successor = node.simulate(agent_index, action)?;
            let value = self.value(&successor, next_agent, ply + 1, max_ply)?;

            chosen = Some(match chosen {
                None => value,
                Some(c) if is_maximizing => std::cmp::max(c, value),
                Some(c) => std::cmp::min(c, value),
            });
        }

        // `legal` was not empty so the loop ran at least once
        Ok(chosen.unwrap_or_else(|| self.score(node)))
    }

    /// This runs the minimax algorithm to the configured depth, returning a struct that
    /// contains all the information about the 'tree' we searched.
    ///
    /// The return value is a recursive struct that tells you the score of the current node, and
    /// the score of all its children nodes. The root is always expanded, even at depth 0.
    ///
    /// This can/is also be used as a benchmark entry point
    pub fn single_minimax(
        &self,
    ) -> Result<MinMaxReturn<GameType::Action, ScoreType>, MinimaxError<GameType::Error>> {
        let root = &self.game;
        root.ensure_in_progress()?;

        let tree = self.expand(root, 0, 0, self.max_ply())?;
        match tree {
            MinMaxReturn::Leaf { .. } => Err(MinimaxError::NoLegalActions { agent_index: 0 }),
            node => Ok(node),
        }
    }

    fn minimax(
        &self,
        node: &GameType,
        agent_index: usize,
        ply: usize,
        max_ply: usize,
    ) -> Result<MinMaxReturn<GameType::Action, ScoreType>, GameType::Error> {
        if let Some(s) = self.wrapped_score(node, ply, max_ply) {
            return Ok(MinMaxReturn::Leaf { score: s });
        }

        self.expand(node, agent_index, ply, max_ply)
    }

    fn expand(
        &self,
        node: &GameType,
        agent_index: usize,
        ply: usize,
        max_ply: usize,
    ) -> Result<MinMaxReturn<GameType::Action, ScoreType>, GameType::Error> {
        let legal = node.legal_actions(agent_index)?;
        if legal.is_empty() {
            return Ok(MinMaxReturn::Leaf {
                score: self.score(node),
            });
        }

        let next_agent = (agent_index + 1) % node.num_agents();
        let is_maximizing = agent_index == 0;

        let mut options = legal
            .into_iter()
            .map(|action| -> Result<_, GameType::Error> {
                let successor = node.simulate(agent_index, action)?;
                let result = self.minimax(&successor, next_agent, ply + 1, max_ply)?;
                Ok((action, result))
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Stable sorts, ties stay in generation order
        if is_maximizing {
            options.sort_by(|(_, a), (_, b)| b.score().cmp(a.score()));
        } else {
            options.sort_by(|(_, a), (_, b)| a.score().cmp(b.score()));
        }
        let chosen_score = *options[0].1.score();

        Ok(MinMaxReturn::Node {
            options,
            is_maximizing,
            moving_agent: agent_index,
            score: chosen_score,
        })
    }
}
