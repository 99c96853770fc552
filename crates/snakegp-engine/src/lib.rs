//! Grid game engine for the snake agent.
//!
//! This crate holds everything the evolved programs play against: a static
//! [`Board`], a [`GameState`] that overlays the snake on the board, pure move
//! transitions and the [`simulate`] driver that runs a [`Controller`] until the
//! game ends or a round limit is reached.
//!
//! ```
//! use snakegp_engine::{Board, Direction, FixedDirection, GameState, simulate};
//!
//! let state = GameState::initial(Board::walled(10, 10), 3).unwrap();
//! let result = simulate(&state, &FixedDirection(Direction::Down), 30).unwrap();
//!
//! assert_eq!(result.rounds(), 3);
//! assert!(result.final_state().is_game_over());
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("field ({x}, {y}) is outside of the {size_x}x{size_y} board")]
pub struct FieldOutOfBoundsError {
    pub x: i32,
    pub y: i32,
    pub size_x: usize,
    pub size_y: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidSnakeError {
    #[display("snake needs at least 2 segments, got {_0}")]
    TooShort(#[error(not(source))] usize),
    #[display("snake segment {index} at ({x}, {y}) is outside of the board")]
    OutOfBounds { index: usize, x: i32, y: i32 },
    #[display("snake segment {index} is not adjacent to the segment after it")]
    Disconnected { index: usize },
}
