use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseDirectionError;

/// The five actions an agent can take. `Stop` means no movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// Every direction, in the order legal actions are enumerated
    pub const fn all() -> [Direction; 5] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Stop,
        ]
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Stop => Direction::Stop,
        }
    }

    /// Unit vector for this direction, `y` grows to the north
    pub fn as_vector(self) -> (i64, i64) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }

    /// The vector travelled in one move at `speed`
    pub fn scaled_vector(self, speed: f64) -> (f64, f64) {
        let (dx, dy) = self.as_vector();

        (dx as f64 * speed, dy as f64 * speed)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
            Direction::Stop => "Stop",
        };

        write!(f, "{}", name)
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::all()
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDirectionError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_is_an_involution() {
        for d in Direction::all() {
            assert_eq!(d.reverse().reverse(), d);
        }

        assert_eq!(Direction::Stop.reverse(), Direction::Stop);
        assert_eq!(Direction::North.reverse(), Direction::South);
        assert_eq!(Direction::East.reverse(), Direction::West);
    }

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!("north".parse::<Direction>(), Ok(Direction::North));
        assert_eq!("WEST".parse::<Direction>(), Ok(Direction::West));
        assert_eq!(" Stop ".parse::<Direction>(), Ok(Direction::Stop));
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn test_scaled_vector_halves() {
        assert_eq!(Direction::West.scaled_vector(0.5), (-0.5, 0.0));
        assert_eq!(Direction::North.scaled_vector(1.0), (0.0, 1.0));
    }

    #[test]
    fn test_serializes_by_name() {
        assert_eq!(serde_json::to_string(&Direction::North).unwrap(), "\"North\"");
        assert_eq!(
            serde_json::from_str::<Vec<Direction>>("[\"East\", \"Stop\"]").unwrap(),
            vec![Direction::East, Direction::Stop]
        );
    }
}
