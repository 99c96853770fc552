//! Game logic on top of the core data structures.
//!
//! - [`GameState`] - Snake overlaid on a board, with pure move transitions
//! - [`Controller`] - Anything that can pick a [`Direction`](crate::Direction) for a state
//! - [`simulate`] - Runs a controller until game over or a round limit
//!
//! # Example
//!
//! ```
//! use snakegp_engine::{Board, Direction, GameState};
//!
//! let state = GameState::initial(Board::walled(10, 10), 5).unwrap();
//! let moved = state.apply_move(Direction::Right);
//!
//! assert!(!moved.is_game_over());
//! assert_eq!(moved.heading(), Direction::Right);
//! ```

pub use self::{game_state::*, simulation::*};

mod game_state;
mod simulation;
