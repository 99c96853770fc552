//! Parent selection strategies.
//!
//! A strategy picks `count` individuals from an evaluated population; the
//! same individual may be picked more than once. The generational loop asks
//! for two parents per offspring.

use std::fmt;

use rand::{Rng, RngCore};

use crate::{ConfigError, genetic::EvaluatedIndividual};

/// Chooses parents from an evaluated population.
pub trait ParentSelection: fmt::Debug + Send + Sync {
    /// Returns `count` individuals of `population`.
    fn select<'a>(
        &self,
        population: &'a [EvaluatedIndividual],
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<&'a EvaluatedIndividual>;

    /// Verifies that [`select`](Self::select) can serve `count` individuals
    /// from populations of `population_size`.
    fn check(&self, population_size: usize, count: usize) -> Result<(), ConfigError>;
}

/// Deterministic selection of the `count` fittest individuals.
///
/// Ties keep the population order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FittestSelection;

impl ParentSelection for FittestSelection {
    fn select<'a>(
        &self,
        population: &'a [EvaluatedIndividual],
        count: usize,
        _rng: &mut dyn RngCore,
    ) -> Vec<&'a EvaluatedIndividual> {
        let mut ranked: Vec<_> = population.iter().collect();
        ranked.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
        ranked.truncate(count);
        ranked
    }

    fn check(&self, population_size: usize, count: usize) -> Result<(), ConfigError> {
        if count > population_size {
            return Err(ConfigError::SelectionExceedsPopulation {
                count,
                population_size,
            });
        }
        Ok(())
    }
}

/// Tournament selection: each pick draws `size` individuals uniformly with
/// replacement and keeps the fittest of them.
#[derive(Debug, Clone, Copy)]
pub struct TournamentSelection {
    pub size: usize,
}

impl TournamentSelection {
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self { size }
    }

    fn tournament<'a>(
        &self,
        population: &'a [EvaluatedIndividual],
        rng: &mut dyn RngCore,
    ) -> &'a EvaluatedIndividual {
        let mut best = &population[rng.random_range(0..population.len())];
        for _ in 1..self.size {
            let contender = &population[rng.random_range(0..population.len())];
            if contender.fitness() > best.fitness() {
                best = contender;
            }
        }
        best
    }
}

impl ParentSelection for TournamentSelection {
    fn select<'a>(
        &self,
        population: &'a [EvaluatedIndividual],
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<&'a EvaluatedIndividual> {
        if population.is_empty() {
            return vec![];
        }
        (0..count).map(|_| self.tournament(population, rng)).collect()
    }

    fn check(&self, population_size: usize, _count: usize) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::EmptyTournament);
        }
        if population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        Ok(())
    }
}
