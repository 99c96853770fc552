use serde::{Deserialize, Serialize};

/// A cell coordinate on the board.
///
/// Coordinates are signed so that a step off the board edge is representable;
/// bounds are checked when the point is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring point one cell away in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the direction that leads from `from` to `self` when the two
    /// points are orthogonal neighbours.
    #[must_use]
    pub fn direction_from(self, from: Point) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| from.step(*d) == self)
    }
}

/// Absolute movement direction of the snake head.
///
/// The declaration order is significant: [`Direction::from_index`] maps
/// `0..4` onto `Up`, `Right`, `Down`, `Left`, and evolved programs depend on
/// that mapping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Returns the direction with the given ordinal, wrapping modulo 4.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::LEN]
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Unit step `(dx, dy)`; `y` grows downwards.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}
