pub mod play;
pub mod replay;
pub mod solve;

use std::{fs::read_to_string, path::Path, sync::Arc};

use clap::Subcommand;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use pacman_game_types::Layout;

use play::Play;
use replay::Replay;
use solve::Solve;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Play games between the chosen agents and print how pacman did
    Play(Play),
    /// Show the search tree behind pacman's first move on a layout
    Solve(Solve),
    /// Watch a recorded game again
    Replay(Replay),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Play(p) => p.run()?,
            Command::Solve(s) => s.run()?,
            Command::Replay(r) => r.run()?,
        }

        Ok(())
    }
}

pub(crate) fn read_layout(path: &Path) -> Result<Arc<Layout>> {
    let text = read_to_string(path)
        .wrap_err_with(|| format!("couldn't read layout {}", path.display()))?;
    let layout: Layout = text
        .parse()
        .wrap_err_with(|| format!("{} is not a valid layout", path.display()))?;

    Ok(Arc::new(layout))
}

/// The game driver reports with `anyhow`, this keeps its whole chain of causes
pub(crate) fn from_anyhow(e: anyhow::Error) -> Report {
    eyre!(Box::<dyn std::error::Error + Send + Sync>::from(e))
}
