use std::fmt::Debug;

pub use pacman_game_types::{Direction, Layout, RulesError, WorldState};

pub mod display;
pub mod evaluation;
pub mod game;
pub mod minimax_agent;
pub mod random_ghost;
pub mod reflex_agent;

use crate::{
    minimax_agent::MinimaxAgentFactory, random_ghost::RandomGhostFactory,
    reflex_agent::ReflexAgentFactory,
};

pub type BoxedAgent = Box<dyn Agent + Send>;
pub type BoxedFactory = Box<dyn AgentFactory + Send + Sync>;

/// Something that can take a turn in a game, pacman or ghost
pub trait Agent {
    /// The agent index this agent plays as
    fn index(&self) -> usize;

    fn get_action(
        &mut self,
        state: &WorldState,
    ) -> Result<Direction, Box<dyn std::error::Error + Send + Sync>>;

    fn end(&self) {}
}

/// Settings every factory gets when building an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentOptions {
    /// How many rounds searching agents look ahead
    pub depth: usize,
    /// Seeds any randomness the agent uses, so games can be reproduced
    pub seed: u64,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self { depth: 2, seed: 0 }
    }
}

pub trait AgentFactory: Debug {
    fn name(&self) -> String;

    /// Whether the agents this builds play pacman (index 0) rather than a ghost
    fn plays_pacman(&self) -> bool;

    fn build(&self, index: usize, options: &AgentOptions) -> BoxedAgent;
}

pub fn all_factories() -> Vec<BoxedFactory> {
    vec![
        Box::new(MinimaxAgentFactory {}),
        Box::new(ReflexAgentFactory {}),
        Box::new(RandomGhostFactory {}),
    ]
}

pub fn factory_by_name(name: &str) -> Option<BoxedFactory> {
    all_factories().into_iter().find(|f| f.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_names_are_unique() {
        let names: Vec<String> = all_factories().iter().map(|f| f.name()).collect();
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();

        assert_eq!(names.len(), deduped.len());
    }

    #[test]
    fn test_factory_lookup() {
        assert!(factory_by_name("minimax").unwrap().plays_pacman());
        assert!(factory_by_name("reflex").unwrap().plays_pacman());
        assert!(!factory_by_name("random-ghost").unwrap().plays_pacman());
        assert!(factory_by_name("keyboard").is_none());
    }

    #[test]
    fn test_built_agents_keep_their_index() {
        let options = AgentOptions::default();

        assert_eq!(factory_by_name("minimax").unwrap().build(0, &options).index(), 0);
        assert_eq!(
            factory_by_name("random-ghost").unwrap().build(3, &options).index(),
            3
        );
    }
}
