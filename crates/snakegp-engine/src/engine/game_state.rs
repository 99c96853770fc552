use std::{fmt, sync::Arc};

use crate::{
    FieldOutOfBoundsError, InvalidSnakeError,
    core::{Board, Direction, FieldContent, Point},
};

/// Snapshot of a running game: the shared board, the snake and the score.
///
/// States are values; [`GameState::apply_move`] returns a new state and never
/// modifies the receiver. The board is shared between all states derived
/// from the same initial state.
///
/// A `GameState` always holds a well-formed snake (at least two segments, all
/// on the board, consecutive segments orthogonally adjacent), so the head and
/// the heading are always defined.
///
/// # Example
///
/// ```
/// use snakegp_engine::{Board, Direction, FieldContent, GameState};
///
/// let state = GameState::initial(Board::walled(10, 20), 5).unwrap();
/// assert_eq!(state.field(5, 10), Ok(FieldContent::SnakeHead));
/// assert_eq!(state.field(5, 6), Ok(FieldContent::SnakeTail));
/// assert_eq!(state.heading(), Direction::Down);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Arc<Board>,
    snake: Vec<Point>,
    score: usize,
    game_over: bool,
}

impl GameState {
    /// Creates a state from a board and snake segments ordered head first.
    pub fn new(board: impl Into<Arc<Board>>, snake: Vec<Point>) -> Result<Self, InvalidSnakeError> {
        let board = board.into();
        if snake.len() < 2 {
            return Err(InvalidSnakeError::TooShort(snake.len()));
        }
        if let Some((index, p)) = snake.iter().enumerate().find(|(_, p)| !board.contains(**p)) {
            return Err(InvalidSnakeError::OutOfBounds {
                index,
                x: p.x,
                y: p.y,
            });
        }
        if let Some(index) = snake
            .windows(2)
            .position(|w| w[0].direction_from(w[1]).is_none())
        {
            return Err(InvalidSnakeError::Disconnected { index });
        }
        Ok(Self {
            board,
            snake,
            score: 0,
            game_over: false,
        })
    }

    /// Creates the standard starting state: the head in the middle of the
    /// board (rounding half up) and the tail extending straight up, so the
    /// snake initially heads down.
    pub fn initial(board: impl Into<Arc<Board>>, snake_length: usize) -> Result<Self, InvalidSnakeError> {
        let board = board.into();
        let head_x = i32::try_from(board.size_x().div_ceil(2)).unwrap_or(i32::MAX);
        let head_y = i32::try_from(board.size_y().div_ceil(2)).unwrap_or(i32::MAX);
        let snake = (0..snake_length)
            .map(|dy| Point::new(head_x, head_y - i32::try_from(dy).unwrap_or(i32::MAX)))
            .collect();
        Self::new(board, snake)
    }

    #[must_use]
    pub fn size_x(&self) -> usize {
        self.board.size_x()
    }

    #[must_use]
    pub fn size_y(&self) -> usize {
        self.board.size_y()
    }

    /// Snake segments, head first.
    #[must_use]
    pub fn snake(&self) -> &[Point] {
        &self.snake
    }

    #[must_use]
    pub fn head(&self) -> Point {
        self.snake[0]
    }

    /// Direction the head moved in on its last step.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.snake[0]
            .direction_from(self.snake[1])
            .expect("snake segments are validated to be adjacent")
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Returns what occupies `(x, y)`, with the snake drawn over the board.
    pub fn field(&self, x: i32, y: i32) -> Result<FieldContent, FieldOutOfBoundsError> {
        let content = self.board.get(x, y).ok_or(FieldOutOfBoundsError {
            x,
            y,
            size_x: self.size_x(),
            size_y: self.size_y(),
        })?;
        let p = Point::new(x, y);
        if self.snake[0] == p {
            return Ok(FieldContent::SnakeHead);
        }
        if self.snake[1..].contains(&p) {
            return Ok(FieldContent::SnakeTail);
        }
        Ok(content)
    }

    pub fn field_at(&self, point: Point) -> Result<FieldContent, FieldOutOfBoundsError> {
        self.field(point.x, point.y)
    }

    /// Moves the head one cell in `direction` and returns the resulting state.
    ///
    /// Entering a wall, the snake itself or leaving the board ends the game:
    /// the returned state keeps the snake where it was and is flagged as game
    /// over. Otherwise the whole snake advances by one cell, keeping its
    /// length; entering food scores a point. Moving a finished game returns
    /// it unchanged.
    #[must_use]
    pub fn apply_move(&self, direction: Direction) -> Self {
        if self.game_over {
            return self.clone();
        }
        let new_head = self.head().step(direction);
        let content = match self.field_at(new_head) {
            Ok(content) if !content.is_deadly() => content,
            _ => {
                return Self {
                    game_over: true,
                    ..self.clone()
                };
            }
        };

        let mut snake = Vec::with_capacity(self.snake.len());
        snake.push(new_head);
        snake.extend_from_slice(&self.snake[..self.snake.len() - 1]);
        let score = if content == FieldContent::Food {
            self.score + 1
        } else {
            self.score
        };
        Self {
            board: Arc::clone(&self.board),
            snake,
            score,
            game_over: false,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size_y() {
            for x in 0..self.size_x() {
                let content = i32::try_from(x)
                    .ok()
                    .zip(i32::try_from(y).ok())
                    .and_then(|(x, y)| self.field(x, y).ok())
                    .unwrap_or_default();
                f.write_str(content.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
