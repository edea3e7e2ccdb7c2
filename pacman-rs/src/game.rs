use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{anyhow, bail, Context, Result};
use itertools::Itertools;
use pacman_game_types::{Direction, Layout, RulesError, WorldState, PACMAN_INDEX};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use crate::{
    all_factories, display::GameDisplay, factory_by_name, AgentOptions, BoxedAgent, BoxedFactory,
};

/// The knobs of a classic game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    /// Total compute time each agent gets over the whole game
    pub timeout: Duration,
    /// Stop the game after this many moves, won or not
    pub max_moves: Option<usize>,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_moves: None,
        }
    }
}

impl GameRules {
    /// Sets up a game on `layout`
    ///
    /// The layout decides how many ghosts play. Extra ghost agents are dropped, and ghost starts
    /// without an agent stay empty.
    pub fn new_game(&self, layout: Arc<Layout>, pacman: BoxedAgent, ghosts: Vec<BoxedAgent>) -> Game {
        let ghosts = ghosts.into_iter().take(layout.num_ghosts()).collect_vec();
        let state = WorldState::new(layout, ghosts.len());

        let mut agents = Vec::with_capacity(ghosts.len() + 1);
        agents.push(pacman);
        agents.extend(ghosts);

        Game {
            rules: *self,
            total_time: vec![Duration::ZERO; agents.len()],
            agents,
            initial_food: state.num_food(),
            state,
            move_history: vec![],
        }
    }

    /// Fraction of the starting food still on the board
    pub fn progress(&self, game: &Game) -> f64 {
        if game.initial_food == 0 {
            return 0.0;
        }

        game.state.num_food() as f64 / game.initial_food as f64
    }
}

/// One move as it was played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedMove {
    pub agent_index: usize,
    pub action: Direction,
}

/// Everything needed to watch a finished game again
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// The layout in its text form
    pub layout: String,
    pub num_ghosts: usize,
    pub moves: Vec<RecordedMove>,
}

impl GameRecord {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("couldn't serialize the game record")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("couldn't parse the game record")
    }

    /// Plays the recorded moves again from the opening state of the recorded layout
    pub fn replay(&self, display: &mut dyn GameDisplay) -> Result<WorldState> {
        let layout: Layout = self.layout.parse().context("recorded layout is invalid")?;

        Ok(replay(Arc::new(layout), self.num_ghosts, &self.moves, display)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub score: i64,
    pub win: bool,
    pub lose: bool,
    pub moves: usize,
}

pub struct Game {
    rules: GameRules,
    agents: Vec<BoxedAgent>,
    state: WorldState,
    initial_food: usize,
    move_history: Vec<RecordedMove>,
    total_time: Vec<Duration>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("rules", &self.rules)
            .field("num_agents", &self.agents.len())
            .field("state", &self.state)
            .field("moves", &self.move_history.len())
            .finish()
    }
}

fn agent_name(agent_index: usize) -> String {
    if agent_index == 0 {
        "pacman".to_owned()
    } else {
        format!("ghost {}", agent_index)
    }
}

impl Game {
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn move_history(&self) -> &[RecordedMove] {
        &self.move_history
    }

    /// Compute time used so far by each agent
    pub fn total_time(&self) -> &[Duration] {
        &self.total_time
    }

    /// Asks the agents for moves in turn until the game is won or lost
    ///
    /// An agent that errors, picks an illegal action or runs over its time budget crashes the
    /// game, and the error says which agent it was.
    pub fn run(&mut self, display: &mut dyn GameDisplay) -> Result<GameOutcome> {
        let num_agents = self.agents.len();
        display.initialize(&self.state);

        let mut agent_index = 0;
        while !self.state.is_over() {
            if let Some(max_moves) = self.rules.max_moves {
                if self.move_history.len() >= max_moves {
                    info!(max_moves, score = self.state.score(), "Move limit reached");
                    break;
                }
            }

            let action = self
                .ask_agent(agent_index)
                .with_context(|| format!("{} crashed", agent_name(agent_index)))?;

            let next = self
                .state
                .generate_successor(agent_index, action)
                .with_context(|| format!("{} crashed", agent_name(agent_index)))?;
            debug!(agent_index, %action, score = next.score(), "applied action");

            self.move_history.push(RecordedMove {
                agent_index,
                action,
            });
            self.state = next;
            display.update(&self.state);
            self.process();

            agent_index = (agent_index + 1) % num_agents;
        }

        for agent in &self.agents {
            agent.end();
        }
        display.finish();

        Ok(self.outcome())
    }

    fn ask_agent(&mut self, agent_index: usize) -> Result<Direction> {
        let started_at = Instant::now();
        let action = self.agents[agent_index]
            .get_action(&self.state)
            .map_err(|e| anyhow!(e))?;

        let total = &mut self.total_time[agent_index];
        *total += started_at.elapsed();
        if *total > self.rules.timeout {
            warn!(agent_index, total_time = ?*total, "Agent ran out of time");
            bail!("out of time after {:?}", *total);
        }

        Ok(action)
    }

    fn process(&self) {
        if self.state.is_win() {
            info!(score = self.state.score(), "Pacman emerges victorious!");
        }
        if self.state.is_lose() {
            info!(score = self.state.score(), "Pacman died!");
        }
    }

    pub fn outcome(&self) -> GameOutcome {
        GameOutcome {
            score: self.state.score(),
            win: self.state.is_win(),
            lose: self.state.is_lose(),
            moves: self.move_history.len(),
        }
    }

    pub fn record(&self) -> GameRecord {
        GameRecord {
            layout: self.state.layout().to_string(),
            num_ghosts: self.agents.len() - 1,
            moves: self.move_history.clone(),
        }
    }
}

/// Scores and results of a batch of games
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GamesSummary {
    pub outcomes: Vec<GameOutcome>,
}

impl GamesSummary {
    pub fn average_score(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }

        self.outcomes.iter().map(|o| o.score).sum::<i64>() as f64 / self.outcomes.len() as f64
    }

    pub fn wins(&self) -> usize {
        self.outcomes.iter().filter(|o| o.win).count()
    }

    pub fn win_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }

        self.wins() as f64 / self.outcomes.len() as f64
    }
}

impl fmt::Display for GamesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average Score: {}", self.average_score())?;
        writeln!(
            f,
            "Scores:        {}",
            self.outcomes.iter().map(|o| o.score).join(", ")
        )?;
        writeln!(
            f,
            "Win Rate:      {}/{} ({:.2})",
            self.wins(),
            self.outcomes.len(),
            self.win_rate()
        )?;
        writeln!(
            f,
            "Record:        {}",
            self.outcomes
                .iter()
                .map(|o| if o.win { "Win" } else { "Loss" })
                .join(", ")
        )
    }
}

/// What to play when running a batch of games
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub num_games: usize,
    /// Upper bound on the ghosts that play, the layout may have fewer starts
    pub max_ghosts: usize,
    /// Every agent of every game gets its own seed, all drawn from this one
    pub seed: u64,
    pub depth: usize,
    /// Factory name for pacman
    pub pacman: String,
    /// Factory name for every ghost
    pub ghost: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            num_games: 1,
            max_ghosts: 4,
            seed: 0,
            depth: 2,
            pacman: "minimax".to_owned(),
            ghost: "random-ghost".to_owned(),
        }
    }
}

fn lookup(name: &str) -> Result<BoxedFactory> {
    factory_by_name(name).ok_or_else(|| {
        anyhow!(
            "no agent named {}, try one of: {}",
            name,
            all_factories().iter().map(|f| f.name()).join(", ")
        )
    })
}

/// Plays `options.num_games` games with agents fresh from the named factories
pub fn run_games(
    rules: &GameRules,
    layout: &Arc<Layout>,
    options: &RunOptions,
    display: &mut dyn GameDisplay,
) -> Result<Vec<Game>> {
    let pacman = lookup(&options.pacman)?;
    let ghost = lookup(&options.ghost)?;
    if !pacman.plays_pacman() {
        bail!("{} can't play pacman", pacman.name());
    }
    if ghost.plays_pacman() {
        bail!("{} can't play a ghost", ghost.name());
    }

    let num_ghosts = layout.num_ghosts().min(options.max_ghosts);
    let mut seeds = StdRng::seed_from_u64(options.seed);
    let mut agent_options = || AgentOptions {
        depth: options.depth,
        seed: seeds.gen(),
    };
    let mut games = Vec::with_capacity(options.num_games);

    for game_number in 0..options.num_games {
        let span = info_span!("game", game_number, pacman = %pacman.name(), ghost = %ghost.name());
        let _guard = span.enter();

        let pacman_agent = pacman.build(PACMAN_INDEX, &agent_options());
        let ghost_agents = (1..=num_ghosts)
            .map(|index| ghost.build(index, &agent_options()))
            .collect_vec();

        let mut game = rules.new_game(layout.clone(), pacman_agent, ghost_agents);
        let outcome = game
            .run(display)
            .with_context(|| format!("game {} failed", game_number))?;
        info!(?outcome, "Game finished");

        games.push(game);
    }

    Ok(games)
}

impl From<&[Game]> for GamesSummary {
    fn from(games: &[Game]) -> Self {
        Self {
            outcomes: games.iter().map(Game::outcome).collect(),
        }
    }
}

/// Applies a recorded move history to the opening state of `layout`
///
/// The display sees every state along the way. A history that doesn't fit the layout fails
/// with the rules error of the first move that can't be applied.
pub fn replay(
    layout: Arc<Layout>,
    num_ghosts: usize,
    moves: &[RecordedMove],
    display: &mut dyn GameDisplay,
) -> Result<WorldState, RulesError> {
    let mut state = WorldState::new(layout, num_ghosts);
    display.initialize(&state);

    for m in moves {
        state = state.generate_successor(m.agent_index, m.action)?;
        display.update(&state);
    }

    display.finish();
    Ok(state)
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, thread};

    use super::*;
    use crate::{display::NullDisplay, Agent};
    use pacman_game_types::Position;

    #[derive(Debug)]
    struct Scripted {
        index: usize,
        moves: VecDeque<Direction>,
    }

    impl Scripted {
        fn boxed(index: usize, moves: &[Direction]) -> BoxedAgent {
            Box::new(Self {
                index,
                moves: moves.iter().copied().collect(),
            })
        }
    }

    impl Agent for Scripted {
        fn index(&self) -> usize {
            self.index
        }

        fn get_action(
            &mut self,
            _state: &WorldState,
        ) -> Result<Direction, Box<dyn std::error::Error + Send + Sync>> {
            Ok(self.moves.pop_front().ok_or("script ran out")?)
        }
    }

    #[derive(Debug)]
    struct Slow;

    impl Agent for Slow {
        fn index(&self) -> usize {
            0
        }

        fn get_action(
            &mut self,
            _state: &WorldState,
        ) -> Result<Direction, Box<dyn std::error::Error + Send + Sync>> {
            thread::sleep(Duration::from_millis(20));
            Ok(Direction::East)
        }
    }

    fn corridor() -> Arc<Layout> {
        Arc::new("%%%%%%\n%P..G%\n%%%%%%".parse().unwrap())
    }

    #[test]
    fn test_progress_counts_remaining_food() {
        let rules = GameRules {
            max_moves: Some(1),
            ..Default::default()
        };
        let mut game = rules.new_game(
            corridor(),
            Scripted::boxed(0, &[Direction::East]),
            vec![Scripted::boxed(1, &[])],
        );
        assert_eq!(rules.progress(&game), 1.0);

        let outcome = game.run(&mut NullDisplay).unwrap();
        assert_eq!(
            outcome,
            GameOutcome {
                score: 9,
                win: false,
                lose: false,
                moves: 1
            }
        );
        assert_eq!(rules.progress(&game), 0.5);
    }

    #[test]
    fn test_extra_ghosts_are_dropped() {
        let game = GameRules::default().new_game(
            corridor(),
            Scripted::boxed(0, &[]),
            vec![
                Scripted::boxed(1, &[]),
                Scripted::boxed(2, &[]),
                Scripted::boxed(3, &[]),
            ],
        );

        assert_eq!(game.state().num_agents(), 2);
        assert_eq!(game.record().num_ghosts, 1);
    }

    #[test]
    fn test_game_plays_out_to_a_loss() {
        let layout = Arc::new("%%%%%%%\n%.P..G%\n%%%%%%%".parse().unwrap());
        let mut game = GameRules::default().new_game(
            layout,
            Scripted::boxed(0, &[Direction::East, Direction::East]),
            vec![Scripted::boxed(1, &[Direction::West])],
        );

        let outcome = game.run(&mut NullDisplay).unwrap();

        // two pellets eaten, and the ghost is waiting on the second
        assert!(outcome.lose);
        assert_eq!(outcome.score, 9 + 9 - 500);
        assert_eq!(outcome.moves, 3);
        assert_eq!(
            game.move_history(),
            &[
                RecordedMove {
                    agent_index: 0,
                    action: Direction::East
                },
                RecordedMove {
                    agent_index: 1,
                    action: Direction::West
                },
                RecordedMove {
                    agent_index: 0,
                    action: Direction::East
                },
            ]
        );
    }

    #[test]
    fn test_agent_errors_name_the_agent() {
        let mut game = GameRules::default().new_game(
            corridor(),
            Scripted::boxed(0, &[]),
            vec![Scripted::boxed(1, &[])],
        );

        let err = game.run(&mut NullDisplay).unwrap_err();
        assert_eq!(err.to_string(), "pacman crashed");
        assert_eq!(err.root_cause().to_string(), "script ran out");
    }

    #[test]
    fn test_illegal_ghost_move_crashes_the_game() {
        let mut game = GameRules::default().new_game(
            corridor(),
            Scripted::boxed(0, &[Direction::East]),
            vec![Scripted::boxed(1, &[Direction::East])],
        );

        let err = game.run(&mut NullDisplay).unwrap_err();
        assert_eq!(err.to_string(), "ghost 1 crashed");
        assert_eq!(
            err.downcast_ref::<RulesError>(),
            Some(&RulesError::IllegalAction {
                agent_index: 1,
                action: Direction::East
            })
        );
        assert_eq!(game.move_history().len(), 1);
    }

    #[test]
    fn test_running_out_of_time() {
        let rules = GameRules {
            timeout: Duration::from_millis(5),
            ..Default::default()
        };
        let mut game = rules.new_game(corridor(), Box::new(Slow), vec![Scripted::boxed(1, &[])]);

        let err = game.run(&mut NullDisplay).unwrap_err();
        assert_eq!(err.to_string(), "pacman crashed");
        assert!(format!("{:#}", err).contains("out of time"));
        assert!(game.total_time()[0] >= Duration::from_millis(20));
    }

    #[test]
    fn test_record_keeps_numbered_ghosts_apart() {
        let layout = Arc::new("%%%%%%%%%\n%2 P 1 .%\n%%%%%%%%%".parse().unwrap());
        let rules = GameRules {
            max_moves: Some(4),
            ..Default::default()
        };
        let mut game = rules.new_game(
            layout,
            Scripted::boxed(0, &[Direction::East, Direction::West]),
            vec![
                Scripted::boxed(1, &[Direction::East]),
                Scripted::boxed(2, &[Direction::East]),
            ],
        );
        game.run(&mut NullDisplay).unwrap();
        assert_eq!(game.state().ghost_position(1), Ok(Position::new(6.0, 1.0)));
        assert_eq!(game.state().ghost_position(2), Ok(Position::new(2.0, 1.0)));

        let record = GameRecord::from_json(&game.record().to_json().unwrap()).unwrap();
        let replayed = record.replay(&mut NullDisplay).unwrap();

        assert_eq!(&replayed, game.state());
    }

    #[test]
    fn test_summary_display() {
        let summary = GamesSummary {
            outcomes: vec![
                GameOutcome {
                    score: 509,
                    win: true,
                    lose: false,
                    moves: 1,
                },
                GameOutcome {
                    score: -501,
                    win: false,
                    lose: true,
                    moves: 3,
                },
            ],
        };

        assert_eq!(summary.average_score(), 4.0);
        assert_eq!(summary.win_rate(), 0.5);
        assert_eq!(
            summary.to_string(),
            "Average Score: 4\nScores:        509, -501\nWin Rate:      1/2 (0.50)\nRecord:        Win, Loss\n"
        );
    }

    #[test]
    fn test_empty_summary() {
        let summary = GamesSummary::default();

        assert_eq!(summary.average_score(), 0.0);
        assert_eq!(summary.win_rate(), 0.0);
    }

    #[test]
    fn test_factories_must_fit_their_seats() {
        let options = RunOptions {
            pacman: "random-ghost".to_owned(),
            ghost: "reflex".to_owned(),
            ..Default::default()
        };

        let err = run_games(&GameRules::default(), &corridor(), &options, &mut NullDisplay)
            .unwrap_err();
        assert_eq!(err.to_string(), "random-ghost can't play pacman");
    }

    #[test]
    fn test_unknown_agents_list_the_known_ones() {
        let options = RunOptions {
            pacman: "keyboard".to_owned(),
            ..Default::default()
        };

        let err = run_games(&GameRules::default(), &corridor(), &options, &mut NullDisplay)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "no agent named keyboard, try one of: minimax, reflex, random-ghost"
        );
    }
}
