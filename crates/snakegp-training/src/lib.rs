//! Genetic programming for snake agent programs.
//!
//! # How Training Works
//!
//! 1. **Seed** - [`TreeGenerator`] creates random programs
//! 2. **Evaluate** - each program plays one game; a
//!    [`RunEvaluator`](snakegp_program::RunEvaluator) turns the run into fitness
//! 3. **Select** - a [`ParentSelection`] strategy picks parents
//! 4. **Reproduce** - an [`Evolver`] recombines and mutates them
//! 5. **Merge** - the fittest of parents and offspring survive
//!
//! See the [`genetic`] module for the loop itself and its reproducibility
//! guarantees.
//!
//! # Random Sources
//!
//! Everything that consumes randomness takes the random source as an
//! argument; nothing reaches for a global generator. The tree operators draw
//! one unit value per decision, so tests can force every choice with a fixed
//! sequence of numbers.

pub use self::{
    evolver::{Evolver, SubtreeEvolver},
    generator::TreeGenerator,
    genetic::{
        EvaluatedIndividual, EvaluatedPopulation, GenerationReport, Population, SimulationParams,
        simulate_population, simulate_population_with_callback,
    },
    selection::{FittestSelection, ParentSelection, TournamentSelection},
    statistics::FitnessStats,
    subtree::{random_subtree, set_random_subtree},
};

use snakegp_program::EvalError;

mod draw;
pub mod evolver;
pub mod generator;
pub mod genetic;
pub mod selection;
pub mod statistics;
pub mod subtree;
#[cfg(test)]
mod test_util;

/// Invalid training parameters, detected before the loop starts.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("maximum rounds must be at least 1")]
    ZeroMaxRounds,
    #[display("mutation rate must be within [0, 1], got {_0}")]
    InvalidMutationRate(#[error(not(source))] f64),
    #[display("tournament size must be at least 1")]
    EmptyTournament,
    #[display("cannot select {count} individuals from a population of {population_size}")]
    SelectionExceedsPopulation {
        count: usize,
        population_size: usize,
    },
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TrainingError {
    #[display("invalid training configuration")]
    Config(ConfigError),
    #[display("program evaluation failed")]
    Evaluation(EvalError),
    #[display("parent selection returned {returned} individuals instead of {requested}")]
    #[from(skip)]
    ParentCount { requested: usize, returned: usize },
}
