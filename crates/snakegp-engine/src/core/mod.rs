//! Static game data: coordinates, directions and the board grid.

pub use self::{board::*, point::*};

pub(crate) mod board;
pub(crate) mod point;
