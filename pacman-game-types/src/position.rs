use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{layout::Layout, Direction};

/// Agents further than this from a grid point are between cells
const BETWEEN_CELLS_TOLERANCE: f64 = 0.001;

/// A cell on the board. `(0, 0)` is the bottom left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(&self, other: &Cell) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A continuous position. Agents can sit between cells while moving at fractional speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(&self, other: &Position) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The grid cell this position rounds to
    pub fn nearest_cell(&self) -> Cell {
        Cell {
            x: (self.x + 0.5).floor() as usize,
            y: (self.y + 0.5).floor() as usize,
        }
    }

    /// Close enough to a cell for cell based effects (eating, mostly) to apply
    pub fn is_settled(&self) -> bool {
        self.manhattan_distance(&self.nearest_cell().into()) <= 0.5
    }

    fn is_between_cells(&self) -> bool {
        self.manhattan_distance(&self.nearest_cell().into()) > BETWEEN_CELLS_TOLERANCE
    }
}

impl From<Cell> for Position {
    fn from(cell: Cell) -> Self {
        Position::new(cell.x as f64, cell.y as f64)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Where an agent is and which way it is facing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub position: Position,
    pub direction: Direction,
}

impl Configuration {
    pub const fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Moves `speed` units towards `direction`
    ///
    /// Stopping keeps the previous heading, there is no 'facing stop'
    pub fn moved(&self, direction: Direction, speed: f64) -> Self {
        let (dx, dy) = direction.scaled_vector(speed);
        let direction = if direction == Direction::Stop {
            self.direction
        } else {
            direction
        };

        Self {
            position: Position::new(self.position.x + dx, self.position.y + dy),
            direction,
        }
    }

    /// Every direction that doesn't run into a wall, `Stop` included
    ///
    /// An agent between two cells has to keep going the way it was heading.
    pub fn possible_actions(&self, layout: &Layout) -> Vec<Direction> {
        if self.position.is_between_cells() {
            return vec![self.direction];
        }

        let Cell { x, y } = self.position.nearest_cell();

        Direction::all()
            .into_iter()
            .filter(|d| {
                let (dx, dy) = d.as_vector();
                !layout.is_wall_at(x as i64 + dx, y as i64 + dy)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_cell_rounds_half_up() {
        assert_eq!(Position::new(3.5, 1.0).nearest_cell(), Cell::new(4, 1));
        assert_eq!(Position::new(3.4, 1.6).nearest_cell(), Cell::new(3, 2));
        assert_eq!(Position::new(2.0, 0.0).nearest_cell(), Cell::new(2, 0));
    }

    #[test]
    fn test_half_step_is_still_settled() {
        assert!(Position::new(3.5, 1.0).is_settled());
        assert!(Position::new(3.5, 1.0).is_between_cells());
        assert!(!Position::new(3.0, 1.0).is_between_cells());
    }

    #[test]
    fn test_stop_keeps_heading() {
        let config = Configuration::new(Position::new(1.0, 1.0), Direction::East);

        let stopped = config.moved(Direction::Stop, 1.0);
        assert_eq!(stopped.direction, Direction::East);
        assert_eq!(stopped.position, Position::new(1.0, 1.0));

        let moved = config.moved(Direction::North, 0.5);
        assert_eq!(moved.direction, Direction::North);
        assert_eq!(moved.position, Position::new(1.0, 1.5));
    }
}
