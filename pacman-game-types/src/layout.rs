use std::{fmt, str::FromStr};

use itertools::Itertools;

use crate::{error::LayoutError, Cell};

/// A fixed size `width x height` grid, indexed by [Cell]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// One bit per cell, set where a pellet is still waiting to be eaten
pub type FoodGrid = Grid<bool>;

impl<T: Clone> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index_of(&self, cell: Cell) -> Option<usize> {
        (cell.x < self.width && cell.y < self.height).then(|| cell.x * self.height + cell.y)
    }

    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.index_of(cell).map(|i| &self.cells[i])
    }

    /// Overwrites the value at `cell`. Out of bounds writes are ignored.
    pub fn set(&mut self, cell: Cell, value: T) {
        if let Some(i) = self.index_of(cell) {
            self.cells[i] = value;
        }
    }
}

impl Grid<bool> {
    pub fn is_set(&self, cell: Cell) -> bool {
        self.get(cell).copied().unwrap_or(false)
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&b| b).count()
    }

    /// Every set cell, column by column from the bottom left
    pub fn as_list(&self) -> Vec<Cell> {
        (0..self.width)
            .cartesian_product(0..self.height)
            .map(|(x, y)| Cell::new(x, y))
            .filter(|&c| self.is_set(c))
            .collect()
    }
}

/// One agent's spawn point as read from the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentStart {
    pub is_pacman: bool,
    pub cell: Cell,
}

/// The static part of the board: walls, where the pellets start, and where everyone spawns
///
/// A layout never changes once parsed. Every [crate::WorldState] of a game shares the same one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    walls: Grid<bool>,
    food: FoodGrid,
    capsules: Vec<Cell>,
    agent_starts: Vec<AgentStart>,
}

impl Layout {
    pub fn width(&self) -> usize {
        self.walls.width()
    }

    pub fn height(&self) -> usize {
        self.walls.height()
    }

    pub fn walls(&self) -> &Grid<bool> {
        &self.walls
    }

    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.get(cell).copied().unwrap_or(true)
    }

    /// Anything off the edge of the board counts as wall
    pub fn is_wall_at(&self, x: i64, y: i64) -> bool {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) => self.is_wall(Cell::new(x, y)),
            _ => true,
        }
    }

    pub fn food(&self) -> &FoodGrid {
        &self.food
    }

    pub fn capsules(&self) -> &[Cell] {
        &self.capsules
    }

    /// Pacman first, then the ghosts in their numbered order
    pub fn agent_starts(&self) -> &[AgentStart] {
        &self.agent_starts
    }

    pub fn num_ghosts(&self) -> usize {
        self.agent_starts.iter().filter(|a| !a.is_pacman).count()
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .collect();

        let height = rows.len();
        let width = rows.first().ok_or(LayoutError::Empty)?.chars().count();

        let mut walls = Grid::new(width, height, false);
        let mut food = Grid::new(width, height, false);
        let mut capsules = vec![];
        // (order, cell) where pacman is 0 and ghosts use their number, `G` counting as 1
        let mut starts: Vec<(u32, Cell)> = vec![];

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }

            let y = height - 1 - row;
            for (x, character) in line.chars().enumerate() {
                let cell = Cell::new(x, y);
                match character {
                    '%' => walls.set(cell, true),
                    '.' => food.set(cell, true),
                    'o' => capsules.push(cell),
                    'P' => starts.push((0, cell)),
                    'G' => starts.push((1, cell)),
                    '1'..='9' => starts.push((character.to_digit(10).unwrap_or(1), cell)),
                    ' ' => {}
                    _ => {
                        return Err(LayoutError::UnknownCharacter {
                            character,
                            row,
                            column: x,
                        })
                    }
                }
            }
        }

        match starts.iter().filter(|(order, _)| *order == 0).count() {
            0 => return Err(LayoutError::MissingPacman),
            1 => {}
            n => return Err(LayoutError::MultiplePacmen(n)),
        }

        starts.sort_by_key(|&(order, cell)| (order, cell.x, cell.y));
        let agent_starts = starts
            .into_iter()
            .map(|(order, cell)| AgentStart {
                is_pacman: order == 0,
                cell,
            })
            .collect();

        Ok(Layout {
            walls,
            food,
            capsules,
            agent_starts,
        })
    }
}

/// Ghosts are written with their number so that parsing the text again keeps their order
impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height()).rev() {
            let row: String = (0..self.width())
                .map(|x| {
                    let cell = Cell::new(x, y);
                    match self.agent_starts.iter().position(|a| a.cell == cell) {
                        Some(i) if self.agent_starts[i].is_pacman => 'P',
                        Some(i) => char::from_digit(i as u32, 10).unwrap_or('G'),
                        None if self.is_wall(cell) => '%',
                        None if self.food.is_set(cell) => '.',
                        None if self.capsules.contains(&cell) => 'o',
                        None => ' ',
                    }
                })
                .collect();
            writeln!(f, "{}", row)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CLASSIC: &str = include_str!("../fixtures/test_classic.lay");

    #[test]
    fn test_parses_test_classic() {
        let layout: Layout = TEST_CLASSIC.parse().unwrap();

        assert_eq!(layout.width(), 5);
        assert_eq!(layout.height(), 10);
        assert_eq!(layout.num_ghosts(), 1);
        assert_eq!(layout.food().count(), 8);
        assert!(layout.capsules().is_empty());

        // The bottom row of text is y = 0
        assert!(layout.agent_starts()[0].is_pacman);
        assert_eq!(layout.agent_starts()[0].cell, Cell::new(1, 1));
        assert_eq!(layout.agent_starts()[1].cell, Cell::new(2, 7));
    }

    #[test]
    fn test_off_the_board_is_wall() {
        let layout: Layout = "P .".parse().unwrap();

        assert!(layout.is_wall_at(-1, 0));
        assert!(layout.is_wall_at(3, 0));
        assert!(layout.is_wall_at(0, 1));
        assert!(!layout.is_wall_at(1, 0));
    }

    #[test]
    fn test_ghosts_are_ordered_by_number() {
        let layout: Layout = "%%%%%%\n%2P1G%\n%%%%%%".parse().unwrap();

        let cells = layout
            .agent_starts()
            .iter()
            .map(|a| a.cell.x)
            .collect::<Vec<_>>();

        // P, then G and 1 by position, then 2
        assert_eq!(cells, vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_rejects_bad_layouts() {
        assert_eq!("".parse::<Layout>(), Err(LayoutError::Empty));
        assert_eq!(
            "%%%\n%P\n%%%".parse::<Layout>(),
            Err(LayoutError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            "%%%\n%x%\n%%%".parse::<Layout>(),
            Err(LayoutError::UnknownCharacter {
                character: 'x',
                row: 1,
                column: 1
            })
        );
        assert_eq!("%%%\n%.%\n%%%".parse::<Layout>(), Err(LayoutError::MissingPacman));
        assert_eq!(
            "%%%%\n%PP%\n%%%%".parse::<Layout>(),
            Err(LayoutError::MultiplePacmen(2))
        );
    }

    #[test]
    fn test_display_round_trips() {
        let layout: Layout = TEST_CLASSIC.parse().unwrap();
        let reparsed: Layout = layout.to_string().parse().unwrap();

        assert_eq!(layout, reparsed);
    }

    #[test]
    fn test_display_keeps_ghost_numbers() {
        let layout: Layout = "%%%%%%%%%\n%2 P 1 .%\n%%%%%%%%%".parse().unwrap();
        let ghost_cells = |l: &Layout| {
            l.agent_starts()
                .iter()
                .skip(1)
                .map(|a| a.cell)
                .collect::<Vec<_>>()
        };
        assert_eq!(ghost_cells(&layout), vec![Cell::new(5, 1), Cell::new(1, 1)]);

        assert_eq!(layout.to_string(), "%%%%%%%%%\n%2 P 1 .%\n%%%%%%%%%\n");
        let reparsed: Layout = layout.to_string().parse().unwrap();
        assert_eq!(ghost_cells(&reparsed), ghost_cells(&layout));
        assert_eq!(reparsed, layout);
    }

    #[test]
    fn test_food_list_is_column_major() {
        let layout: Layout = "%%%%\n%..%\n%P.%\n%%%%".parse().unwrap();

        assert_eq!(
            layout.food().as_list(),
            vec![Cell::new(1, 2), Cell::new(2, 1), Cell::new(2, 2)]
        );
    }
}
