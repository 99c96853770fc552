use serde::{Deserialize, Serialize};

use super::point::Point;

/// Content of a single board cell as seen by the snake.
///
/// The ordinal of each variant is what sensing nodes report to evolved
/// programs, so the declaration order is part of the program contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum FieldContent {
    /// Free cell.
    #[default]
    Nothing,
    /// Wall; entering it ends the game.
    Wall,
    /// Any snake segment behind the head.
    SnakeTail,
    /// The snake head.
    SnakeHead,
    /// Food; entering it scores a point.
    Food,
}

impl FieldContent {
    pub const LEN: usize = 5;
    pub const ALL: [Self; Self::LEN] = [
        Self::Nothing,
        Self::Wall,
        Self::SnakeTail,
        Self::SnakeHead,
        Self::Food,
    ];

    /// Ordinal position of this content among all contents.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == FieldContent::Nothing
    }

    /// Whether moving the head onto this cell ends the game.
    #[must_use]
    pub fn is_deadly(self) -> bool {
        matches!(self, Self::Wall | Self::SnakeTail | Self::SnakeHead)
    }

    /// Three-character glyph used by the text rendering.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Nothing => "   ",
            Self::Wall => "[=]",
            Self::SnakeTail => "[-]",
            Self::SnakeHead => "[+]",
            Self::Food => "[*]",
        }
    }
}

/// Static board grid: walls, food and free cells.
///
/// The board never contains the snake; [`GameState`](crate::GameState)
/// overlays it when cells are queried. Boards are immutable once built and
/// shared between all states of a run.
///
/// # Example
///
/// ```
/// use snakegp_engine::{Board, FieldContent};
///
/// let board = Board::walled(10, 10);
/// assert_eq!(board.get(0, 0), Some(FieldContent::Wall));
/// assert_eq!(board.get(4, 4), Some(FieldContent::Nothing));
/// assert_eq!(board.get(10, 4), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size_x: usize,
    size_y: usize,
    cells: Vec<FieldContent>,
}

impl Board {
    /// Creates a board with no walls at all.
    #[must_use]
    pub fn empty(size_x: usize, size_y: usize) -> Self {
        Self {
            size_x,
            size_y,
            cells: vec![FieldContent::Nothing; size_x * size_y],
        }
    }

    /// Creates a board surrounded by a ring of walls.
    #[must_use]
    pub fn walled(size_x: usize, size_y: usize) -> Self {
        let mut board = Self::empty(size_x, size_y);
        for y in 0..size_y {
            for x in 0..size_x {
                if x == 0 || y == 0 || x == size_x - 1 || y == size_y - 1 {
                    board.cells[y * size_x + x] = FieldContent::Wall;
                }
            }
        }
        board
    }

    /// Creates a walled board with four wall stubs, one next to the middle of
    /// each border, and two food cells in the upper third.
    #[must_use]
    pub fn arena(size_x: usize, size_y: usize) -> Self {
        let mut board = Self::walled(size_x, size_y);
        let (mid_x, mid_y) = (size_x / 2, size_y / 2);
        let third_y = size_y / 3;
        for (x, y) in [
            (1, mid_y),
            (size_x.saturating_sub(2), mid_y),
            (mid_x, 1),
            (mid_x, size_y.saturating_sub(2)),
        ] {
            board.set(x, y, FieldContent::Wall);
        }
        board.set(1, third_y, FieldContent::Food);
        board.set(size_x / 3, third_y, FieldContent::Food);
        board
    }

    /// Fills a single cell; coordinates outside the board are ignored.
    pub fn set(&mut self, x: usize, y: usize, content: FieldContent) {
        if x < self.size_x && y < self.size_y {
            self.cells[y * self.size_x + x] = content;
        }
    }

    #[must_use]
    pub fn size_x(&self) -> usize {
        self.size_x
    }

    #[must_use]
    pub fn size_y(&self) -> usize {
        self.size_y
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        usize::try_from(point.x).is_ok_and(|x| x < self.size_x)
            && usize::try_from(point.y).is_ok_and(|y| y < self.size_y)
    }

    /// Returns the static content at `(x, y)`, or `None` outside the board.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<FieldContent> {
        if !self.contains(Point::new(x, y)) {
            return None;
        }
        #[expect(clippy::cast_sign_loss)]
        let (x, y) = (x as usize, y as usize);
        Some(self.cells[y * self.size_x + x])
    }

    /// Returns an iterator over the rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[FieldContent]> {
        self.cells.chunks(self.size_x.max(1)).take(self.size_y)
    }
}
