//! Fitness functions: turn the outcome of one simulated game into a score.
//!
//! ```text
//! rounds: fitness = rounds survived
//! score:  fitness = rounds survived + food_weight × food eaten
//! ```
//!
//! Higher is better. The genetic algorithm only compares fitness values, so
//! their scale is irrelevant.

use std::fmt;

use snakegp_engine::RunResult;

/// Scores a finished run.
pub trait RunEvaluator: fmt::Debug + Send + Sync {
    fn evaluate_run(&self, result: &RunResult) -> f64;
}

/// Fitness is the number of rounds survived.
#[derive(Default, Debug, Clone, Copy)]
pub struct RoundsEvaluator {}

impl RoundsEvaluator {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl RunEvaluator for RoundsEvaluator {
    #[expect(clippy::cast_precision_loss)]
    fn evaluate_run(&self, result: &RunResult) -> f64 {
        result.rounds() as f64
    }
}

/// Fitness rewards both survival and eating: rounds survived plus
/// `food_weight` per food entered.
#[derive(Debug, Clone, Copy)]
pub struct ScoreEvaluator {
    pub food_weight: f64,
}

impl ScoreEvaluator {
    pub const DEFAULT_FOOD_WEIGHT: f64 = 10.0;

    #[must_use]
    pub const fn new(food_weight: f64) -> Self {
        Self { food_weight }
    }
}

impl Default for ScoreEvaluator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FOOD_WEIGHT)
    }
}

impl RunEvaluator for ScoreEvaluator {
    #[expect(clippy::cast_precision_loss)]
    fn evaluate_run(&self, result: &RunResult) -> f64 {
        result.rounds() as f64 + self.food_weight * result.final_state().score() as f64
    }
}
