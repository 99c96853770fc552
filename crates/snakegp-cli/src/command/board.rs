use anyhow::Context;
use snakegp_engine::{Board, GameState};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum Layout {
    /// Plain ring of walls
    Walled,
    /// Ring of walls with four inner wall stubs and two food cells
    #[default]
    Arena,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BoardArg {
    /// Board layout: walled or arena
    #[arg(long, default_value = "arena")]
    pub(crate) layout: Layout,
    /// Board width in cells, walls included
    #[arg(long, default_value_t = 10)]
    pub(crate) width: usize,
    /// Board height in cells, walls included
    #[arg(long, default_value_t = 10)]
    pub(crate) height: usize,
    /// Number of snake segments, head included
    #[arg(long, default_value_t = 5)]
    pub(crate) snake_length: usize,
}

impl BoardArg {
    pub(crate) fn initial_state(&self) -> anyhow::Result<GameState> {
        let board = match self.layout {
            Layout::Walled => Board::walled(self.width, self.height),
            Layout::Arena => Board::arena(self.width, self.height),
        };
        GameState::initial(board, self.snake_length).with_context(|| {
            format!(
                "Failed to place a snake of length {} on a {}x{} board",
                self.snake_length, self.width, self.height
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use snakegp_engine::{FieldContent, Point};

    use super::*;

    #[test]
    fn test_default_arena() {
        let arg = BoardArg {
            layout: Layout::Arena,
            width: 10,
            height: 10,
            snake_length: 5,
        };
        let state = arg.initial_state().unwrap();
        assert_eq!(state.snake().len(), 5);
        assert_eq!(state.head(), Point::new(5, 5));
        assert_eq!(state.field(1, 3), Ok(FieldContent::Food));
    }

    #[test]
    fn test_snake_too_long_for_board() {
        let arg = BoardArg {
            layout: Layout::Walled,
            width: 6,
            height: 6,
            snake_length: 8,
        };
        let err = arg.initial_state().unwrap_err();
        assert!(format!("{err:#}").contains("length 8 on a 6x6 board"));
    }
}
