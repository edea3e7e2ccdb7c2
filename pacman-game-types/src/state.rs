use std::{fmt, sync::Arc};

use crate::{
    agent::{GhostIndex, PACMAN_INDEX},
    error::RulesError,
    layout::{FoodGrid, Layout},
    AgentState, Cell, Configuration, Direction, Position,
};

/// A snapshot of everything that can change during a game
///
/// States are never edited once handed out. Every move produces a brand new state through
/// [WorldState::generate_successor], so any number of hypothetical futures can be built from
/// the same ancestor without stepping on each other. The [Layout] is shared between every state
/// of a game, and the food and capsules are only copied the first time a successor writes to
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldState {
    pub(crate) layout: Arc<Layout>,
    pub(crate) agents: Vec<AgentState>,
    pub(crate) food: Arc<FoodGrid>,
    pub(crate) capsules: Arc<Vec<Cell>>,
    pub(crate) score: i64,
    pub(crate) score_change: i64,
    pub(crate) win: bool,
    pub(crate) lose: bool,
    pub(crate) last_agent_moved: Option<usize>,
    pub(crate) food_eaten: Option<Cell>,
    pub(crate) capsule_eaten: Option<Cell>,
    pub(crate) eaten: Vec<bool>,
}

impl WorldState {
    /// The opening state of a game on `layout`
    ///
    /// Only the first `max_ghosts` ghosts of the layout take part.
    pub fn new(layout: Arc<Layout>, max_ghosts: usize) -> Self {
        let mut num_ghosts = 0;
        let agents: Vec<AgentState> = layout
            .agent_starts()
            .iter()
            .filter(|start| {
                if start.is_pacman {
                    return true;
                }
                if num_ghosts == max_ghosts {
                    return false;
                }
                num_ghosts += 1;
                true
            })
            .map(|start| {
                AgentState::new(
                    Configuration::new(start.cell.into(), Direction::Stop),
                    start.is_pacman,
                )
            })
            .collect();

        Self {
            food: Arc::new(layout.food().clone()),
            capsules: Arc::new(layout.capsules().to_vec()),
            eaten: vec![false; agents.len()],
            agents,
            layout,
            score: 0,
            score_change: 0,
            win: false,
            lose: false,
            last_agent_moved: None,
            food_eaten: None,
            capsule_eaten: None,
        }
    }

    /// Opening state with every ghost the layout has
    pub fn from_layout(layout: Layout) -> Self {
        let num_ghosts = layout.num_ghosts();
        Self::new(Arc::new(layout), num_ghosts)
    }

    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }

    pub fn num_agents(&self) -> usize {
        self.agents.len()
    }

    pub fn agent_states(&self) -> &[AgentState] {
        &self.agents
    }

    pub fn pacman_state(&self) -> &AgentState {
        &self.agents[PACMAN_INDEX]
    }

    pub fn pacman_position(&self) -> Position {
        self.pacman_state().position()
    }

    pub fn ghost_states(&self) -> &[AgentState] {
        &self.agents[1..]
    }

    pub fn ghost_state(&self, agent_index: usize) -> Result<&AgentState, RulesError> {
        let ghost = GhostIndex::new(agent_index, self.num_agents())?;
        Ok(&self.agents[ghost.as_usize()])
    }

    pub fn ghost_position(&self, agent_index: usize) -> Result<Position, RulesError> {
        self.ghost_state(agent_index).map(AgentState::position)
    }

    pub fn ghost_positions(&self) -> Vec<Position> {
        self.ghost_states().iter().map(AgentState::position).collect()
    }

    pub fn food(&self) -> &FoodGrid {
        &self.food
    }

    pub fn num_food(&self) -> usize {
        self.food.count()
    }

    pub fn has_food(&self, x: usize, y: usize) -> bool {
        self.food.is_set(Cell::new(x, y))
    }

    pub fn has_wall(&self, x: usize, y: usize) -> bool {
        self.layout.is_wall(Cell::new(x, y))
    }

    pub fn capsules(&self) -> &[Cell] {
        &self.capsules
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// How much the move that produced this state changed the score
    pub fn score_change(&self) -> i64 {
        self.score_change
    }

    pub fn is_win(&self) -> bool {
        self.win
    }

    pub fn is_lose(&self) -> bool {
        self.lose
    }

    /// A won or lost state. Nobody can move in one.
    pub fn is_over(&self) -> bool {
        self.win || self.lose
    }

    pub fn last_agent_moved(&self) -> Option<usize> {
        self.last_agent_moved
    }

    /// The pellet eaten by the move that produced this state, for displays
    pub fn food_eaten(&self) -> Option<Cell> {
        self.food_eaten
    }

    /// The capsule eaten by the move that produced this state, for displays
    pub fn capsule_eaten(&self) -> Option<Cell> {
        self.capsule_eaten
    }

    /// Which ghosts got eaten since pacman last moved, for displays
    pub fn eaten(&self) -> &[bool] {
        &self.eaten
    }
}

fn pacman_char(direction: Direction) -> char {
    match direction {
        Direction::North => 'v',
        Direction::South => '^',
        Direction::East => '<',
        Direction::West => '>',
        Direction::Stop => 'P',
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.layout.width();
        let height = self.layout.height();

        let mut rows: Vec<Vec<char>> = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        let cell = Cell::new(x, y);
                        if self.layout.is_wall(cell) {
                            '%'
                        } else if self.food.is_set(cell) {
                            '.'
                        } else if self.capsules.contains(&cell) {
                            'o'
                        } else {
                            ' '
                        }
                    })
                    .collect()
            })
            .collect();

        // Ghosts are drawn after pacman so they cover him when they share a cell
        for agent in &self.agents {
            let Cell { x, y } = agent.position().nearest_cell();
            let c = if agent.is_pacman {
                pacman_char(agent.direction())
            } else if agent.is_scared() {
                'S'
            } else {
                'G'
            };
            if let Some(slot) = rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                *slot = c;
            }
        }

        for row in rows.iter().rev() {
            writeln!(f, "{}", row.iter().collect::<String>())?;
        }
        writeln!(f, "Score: {}", self.score)
    }
}
