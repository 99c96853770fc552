use std::convert::Infallible;

use crate::core::Direction;

use super::game_state::GameState;

/// Decides the next move of the snake for a game state.
///
/// Implementations must be pure functions of the state: the simulation may
/// call them any number of times and from any thread.
pub trait Controller {
    /// Error raised when no decision can be made for a state.
    type Error;

    /// Returns the direction to move in from `state`.
    fn decide(&self, state: &GameState) -> Result<Direction, Self::Error>;
}

impl<C> Controller for &C
where
    C: Controller + ?Sized,
{
    type Error = C::Error;

    fn decide(&self, state: &GameState) -> Result<Direction, Self::Error> {
        (**self).decide(state)
    }
}

/// Controller that always moves in the same absolute direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDirection(pub Direction);

impl Controller for FixedDirection {
    type Error = Infallible;

    fn decide(&self, _state: &GameState) -> Result<Direction, Self::Error> {
        Ok(self.0)
    }
}

/// Outcome of a single simulated game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    rounds: usize,
    final_state: GameState,
}

impl RunResult {
    /// Number of moves completed before the game ended, or the round limit
    /// if the snake survived all rounds.
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    #[must_use]
    pub fn final_state(&self) -> &GameState {
        &self.final_state
    }

    #[must_use]
    pub fn into_final_state(self) -> GameState {
        self.final_state
    }
}

/// Runs `controller` from `initial` until the game is over or `max_rounds`
/// moves have been made.
///
/// The round counter starts at zero; when the move made in round `r` ends the
/// game, the result reports `r` rounds.
pub fn simulate<C>(
    initial: &GameState,
    controller: &C,
    max_rounds: usize,
) -> Result<RunResult, C::Error>
where
    C: Controller + ?Sized,
{
    simulate_with(initial, controller, max_rounds, |_| {})
}

/// Like [`simulate`], but also returns every state visited, starting with
/// `initial` and ending with the final state.
pub fn simulate_trace<C>(
    initial: &GameState,
    controller: &C,
    max_rounds: usize,
) -> Result<(RunResult, Vec<GameState>), C::Error>
where
    C: Controller + ?Sized,
{
    let mut trace = vec![initial.clone()];
    let result = simulate_with(initial, controller, max_rounds, |state| {
        trace.push(state.clone());
    })?;
    Ok((result, trace))
}

fn simulate_with<C, F>(
    initial: &GameState,
    controller: &C,
    max_rounds: usize,
    mut on_move: F,
) -> Result<RunResult, C::Error>
where
    C: Controller + ?Sized,
    F: FnMut(&GameState),
{
    let mut state = initial.clone();
    for round in 0..max_rounds {
        let direction = controller.decide(&state)?;
        state = state.apply_move(direction);
        on_move(&state);
        if state.is_game_over() {
            return Ok(RunResult {
                rounds: round,
                final_state: state,
            });
        }
    }
    Ok(RunResult {
        rounds: max_rounds,
        final_state: state,
    })
}
