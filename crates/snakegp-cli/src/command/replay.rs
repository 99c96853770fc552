use std::{
    io::{self, Write as _},
    path::PathBuf,
};

use anyhow::Context;
use snakegp_engine::{GameState, simulate, simulate_trace};

use super::board::BoardArg;
use crate::model::trained_program::TrainedProgram;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Trained model or serialized program file
    pub(crate) model: PathBuf,
    #[clap(flatten)]
    pub(crate) board: BoardArg,
    /// Round limit of the game
    #[arg(long, default_value_t = 100)]
    pub(crate) max_rounds: usize,
    /// Render every state of the game, not only the last one
    #[arg(long)]
    pub(crate) trace: bool,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let program = TrainedProgram::open_program(&arg.model)?;
    let initial = arg.board.initial_state()?;
    log::info!("replaying {program}");

    let mut stdout = io::stdout().lock();
    let result = if arg.trace {
        let (result, trace) = simulate_trace(&initial, &program, arg.max_rounds)
            .context("Program evaluation failed")?;
        for (round, state) in trace.iter().enumerate() {
            write_state(&mut stdout, &format!("Round #{round}"), state)?;
        }
        result
    } else {
        let result = simulate(&initial, &program, arg.max_rounds)
            .context("Program evaluation failed")?;
        write_state(&mut stdout, "Final state", result.final_state())?;
        result
    };

    let rounds = result.rounds();
    writeln!(stdout, "{}", summary(rounds, &result.into_final_state()))?;
    Ok(())
}

fn summary(rounds: usize, final_state: &GameState) -> String {
    let outcome = if final_state.is_game_over() {
        "Game over"
    } else {
        "Round limit reached"
    };
    format!("{outcome} after {rounds} rounds with score {}", final_state.score())
}

fn write_state<W>(writer: &mut W, title: &str, state: &GameState) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(writer, "{title} (score {}):", state.score())?;
    write!(writer, "{state}")?;
    writeln!(writer)
}
