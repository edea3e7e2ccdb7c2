use std::{fs::read_to_string, path::PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use pacman_rs::{display::TextDisplay, game::GameRecord};

use super::from_anyhow;

#[derive(clap::Args, Debug)]
pub(crate) struct Replay {
    /// Record written by `play --record`
    #[clap(value_parser)]
    file: PathBuf,

    /// Log the board every this many moves
    #[clap(long, value_parser, default_value_t = 1)]
    frame_interval: usize,
}

impl Replay {
    pub(crate) fn run(self) -> Result<()> {
        let json = read_to_string(&self.file)
            .wrap_err_with(|| format!("couldn't read {}", self.file.display()))?;
        let record = GameRecord::from_json(&json).map_err(from_anyhow)?;

        let mut display = TextDisplay::new(self.frame_interval);
        let state = record.replay(&mut display).map_err(from_anyhow)?;

        println!(
            "Replayed {} moves, final score {}",
            record.moves.len(),
            state.score()
        );
        if state.is_win() {
            println!("Pacman won");
        } else if state.is_lose() {
            println!("Pacman lost");
        }

        Ok(())
    }
}
