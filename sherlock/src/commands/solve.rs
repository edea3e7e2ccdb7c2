use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use color_eyre::eyre::{eyre, Result};
use colored::Colorize;
use itertools::Itertools;
use pacman_game_types::{Direction, WorldState};
use pacman_minimax::paranoid::MinMaxReturn;
use pacman_rs::minimax_agent::explain_action;

use super::read_layout;

#[derive(clap::Args, Debug)]
pub(crate) struct Solve {
    /// Layout file to search from
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    /// Rounds to look ahead
    #[clap(short, long, value_parser, default_value_t = 2)]
    depth: usize,

    /// The most ghosts to play with, layouts may have fewer
    #[clap(short = 'k', long, value_parser, default_value_t = 4)]
    max_ghosts: usize,

    /// Print the whole search tree, not just the chosen route
    #[clap(short, long, action)]
    tree: bool,
}

fn print_route(result: &MinMaxReturn<Direction, i64>) {
    let route = result.chosen_route();
    let agents = route.iter().map(|(agent, _)| *agent).unique().collect_vec();

    let mut paths_per_agent: BTreeMap<usize, Vec<Direction>> = BTreeMap::new();
    for &agent in &agents {
        let path = route
            .iter()
            .filter(|(a, _)| *a == agent)
            .map(|(_, action)| *action)
            .collect_vec();
        paths_per_agent.insert(agent, path);
    }

    println!(
        "The chosen route looks {} moves ahead:",
        route.len() / agents.len().max(1)
    );
    for (agent, path) in paths_per_agent {
        let name = if agent == 0 {
            "pacman".to_owned()
        } else {
            format!("ghost {agent}")
        };
        println!("{name}: {}", path.iter().join(", "));
    }
    println!()
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        let layout = read_layout(&self.layout)?;
        let num_ghosts = layout.num_ghosts().min(self.max_ghosts);
        let state = WorldState::new(Arc::clone(&layout), num_ghosts);

        println!("{}", state);

        let result = explain_action(&state, self.depth)?;
        let best = result
            .best_action()
            .ok_or_else(|| eyre!("pacman had nothing to choose from"))?;

        if let MinMaxReturn::Node { options, .. } = &result {
            for (action, option) in options {
                let line = format!("{action}: {}", option.score());
                if *action == best {
                    println!("{}", line.green());
                } else {
                    println!("{line}");
                }
            }
        }
        println!(
            "Searched {} nodes at depth {}, pacman goes {}",
            result.node_count(),
            self.depth,
            best
        );
        println!();

        print_route(&result);

        if self.tree {
            if let Some(tree) = result.to_text_tree() {
                println!("{tree}");
            }
        }

        Ok(())
    }
}
