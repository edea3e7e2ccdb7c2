use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use color_eyre::eyre::{Result, WrapErr};
use colored::Colorize;
use pacman_rs::{
    display::{GameDisplay, NullDisplay, TextDisplay},
    game::{run_games, GameRules, GamesSummary, RunOptions},
};

use super::{from_anyhow, read_layout};

#[derive(clap::Args, Debug)]
pub(crate) struct Play {
    /// Layout file to play on
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    /// How many games to play
    #[clap(short, long, value_parser, default_value_t = 1)]
    num_games: usize,

    /// The most ghosts to play with, layouts may have fewer
    #[clap(short = 'k', long, value_parser, default_value_t = 4)]
    max_ghosts: usize,

    /// Seed for every agent's randomness
    #[clap(short, long, value_parser, default_value_t = 0)]
    seed: u64,

    /// Rounds the searching agents look ahead
    #[clap(short, long, value_parser, default_value_t = 2)]
    depth: usize,

    /// Agent that plays pacman
    #[clap(short, long, value_parser, default_value = "minimax")]
    pacman: String,

    /// Agent that plays every ghost
    #[clap(short, long, value_parser, default_value = "random-ghost")]
    ghost: String,

    /// Seconds of compute each agent gets per game
    #[clap(long, value_parser, default_value_t = 30)]
    timeout: u64,

    /// End games after this many moves
    #[clap(long, value_parser)]
    max_moves: Option<usize>,

    /// Log the board every this many moves
    #[clap(long, value_parser, default_value_t = 1)]
    frame_interval: usize,

    /// Don't log the board at all
    #[clap(short, long, action)]
    quiet: bool,

    /// Write each game's record here, for `replay`. With several games the game number is
    /// added to the file name
    #[clap(long, value_parser)]
    record: Option<PathBuf>,
}

/// `games.json` stays as is for a single game, and becomes `games-0.json`, `games-1.json`, ...
/// for more
fn record_path(path: &Path, game_number: usize, num_games: usize) -> PathBuf {
    if num_games <= 1 {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{game_number}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{game_number}"),
    };

    path.with_file_name(name)
}

impl Play {
    pub(crate) fn run(self) -> Result<()> {
        let layout = read_layout(&self.layout)?;
        let rules = GameRules {
            timeout: Duration::from_secs(self.timeout),
            max_moves: self.max_moves,
        };
        let options = RunOptions {
            num_games: self.num_games,
            max_ghosts: self.max_ghosts,
            seed: self.seed,
            depth: self.depth,
            pacman: self.pacman,
            ghost: self.ghost,
        };

        let mut display: Box<dyn GameDisplay> = if self.quiet {
            Box::new(NullDisplay)
        } else {
            Box::new(TextDisplay::new(self.frame_interval))
        };

        let games = run_games(&rules, &layout, &options, display.as_mut()).map_err(from_anyhow)?;

        if let Some(path) = &self.record {
            for (game_number, game) in games.iter().enumerate() {
                let path = record_path(path, game_number, games.len());
                let json = game.record().to_json().map_err(from_anyhow)?;
                let mut file = File::create(&path)
                    .wrap_err_with(|| format!("couldn't create {}", path.display()))?;
                file.write_all(json.as_bytes())?;

                println!("{}", format!("📼 Recorded game {game_number} to {}", path.display()).yellow());
            }
        }

        let summary = GamesSummary::from(games.as_slice());
        for game in &games {
            let progress = rules.progress(game);
            println!("{:.0}% of the food was left", progress * 100.0);
        }

        let text = summary.to_string();
        if summary.wins() == summary.outcomes.len() {
            print!("{}", text.green());
        } else if summary.wins() == 0 {
            print!("{}", text.red());
        } else {
            print!("{}", text);
        }

        Ok(())
    }
}
