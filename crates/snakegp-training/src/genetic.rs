//! Generational loop evolving agent programs.
//!
//! # Algorithm
//!
//! 1. **Seed** - generate `population_size` random programs
//! 2. **Evaluate** - every program plays one game from the initial state,
//!    capped at `max_rounds`; a [`RunEvaluator`] turns the run into fitness
//! 3. **Reproduce** - for every offspring slot, select two parents, recombine
//!    them and mutate the child with probability `mutation_rate`
//! 4. **Evaluate offspring**
//! 5. **Merge** - keep the `population_size` fittest of parents and offspring
//!
//! Steps 3 to 5 repeat `max_generations` times. Since the merge keeps the
//! current population as candidates, the best fitness never decreases.
//!
//! # Reproducibility
//!
//! Evaluation runs in parallel, but simulating a program consumes no
//! randomness. All random draws happen on the calling thread, from the
//! single random source passed in, in a fixed order: seeding, then per
//! generation and per offspring slot the parent selection, recombination,
//! the mutation decision and the mutation. The same seed therefore always
//! yields the same final population.

use rand::{Rng, RngCore};
use rayon::prelude::*;
use snakegp_engine::{GameState, simulate};
use snakegp_program::{EvalError, Program, RunEvaluator};

use crate::{
    ConfigError, TrainingError, draw, evolver::Evolver, selection::ParentSelection,
    statistics::FitnessStats,
};

/// A program together with the outcome of its evaluation.
#[derive(Debug, Clone)]
pub struct EvaluatedIndividual {
    program: Program,
    fitness: f64,
    rounds: usize,
}

impl EvaluatedIndividual {
    #[must_use]
    pub fn new(program: Program, fitness: f64, rounds: usize) -> Self {
        Self {
            program,
            fitness,
            rounds,
        }
    }

    #[must_use]
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Higher is better.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Rounds survived in the evaluation run.
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

/// Programs not evaluated yet.
#[derive(Debug, Clone)]
pub struct Population {
    programs: Vec<Program>,
}

impl Population {
    #[must_use]
    pub fn new(programs: Vec<Program>) -> Self {
        Self { programs }
    }

    /// Creates `count` programs with the generator of `evolver`.
    pub fn random<R, E>(rng: &mut R, evolver: &E, count: usize) -> Self
    where
        R: Rng + ?Sized,
        E: Evolver + ?Sized,
    {
        Self::new((0..count).map(|_| evolver.generate(rng)).collect())
    }

    #[must_use]
    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    /// Plays one game per program, in parallel, and scores each run.
    ///
    /// The result keeps the order of the programs.
    pub fn evaluate<E>(
        &self,
        initial: &GameState,
        max_rounds: usize,
        evaluator: &E,
    ) -> Result<EvaluatedPopulation, EvalError>
    where
        E: RunEvaluator + ?Sized,
    {
        let individuals = self
            .programs
            .par_iter()
            .map(|program| -> Result<_, EvalError> {
                let run = simulate(initial, program, max_rounds)?;
                let fitness = evaluator.evaluate_run(&run);
                log::trace!("fitness {fitness:.1} after {} rounds: {program}", run.rounds());
                Ok(EvaluatedIndividual::new(program.clone(), fitness, run.rounds()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EvaluatedPopulation { individuals })
    }
}

/// Programs with their fitness.
#[derive(Debug, Clone)]
pub struct EvaluatedPopulation {
    individuals: Vec<EvaluatedIndividual>,
}

impl EvaluatedPopulation {
    #[must_use]
    pub fn individuals(&self) -> &[EvaluatedIndividual] {
        &self.individuals
    }

    /// The fittest individual; the earliest one wins ties.
    #[must_use]
    pub fn best(&self) -> Option<&EvaluatedIndividual> {
        self.individuals
            .iter()
            .reduce(|best, ind| if ind.fitness > best.fitness { ind } else { best })
    }

    #[must_use]
    pub fn fitness_stats(&self) -> Option<FitnessStats> {
        FitnessStats::new(self.individuals.iter().map(EvaluatedIndividual::fitness))
    }

    /// Concatenates `self` and `offspring` and keeps the `keep` fittest,
    /// sorted by descending fitness. Ties keep the concatenation order, so
    /// existing individuals win over equally fit offspring.
    #[must_use]
    pub fn merge(self, offspring: Self, keep: usize) -> Self {
        let mut individuals = self.individuals;
        individuals.extend(offspring.individuals);
        individuals.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        individuals.truncate(keep);
        Self { individuals }
    }

    /// Breeds `count` offspring: two parents per slot, recombined and
    /// possibly mutated.
    ///
    /// Fails when `selection` does not return exactly two parents.
    pub fn breed<R, E>(
        &self,
        rng: &mut R,
        count: usize,
        selection: &dyn ParentSelection,
        evolver: &E,
        mutation_rate: f64,
    ) -> Result<Population, TrainingError>
    where
        R: RngCore,
        E: Evolver + ?Sized,
    {
        let programs = (0..count)
            .map(|_| {
                let parents = selection.select(&self.individuals, 2, rng);
                let [a, b] = parents.as_slice() else {
                    return Err(TrainingError::ParentCount {
                        requested: 2,
                        returned: parents.len(),
                    });
                };
                let child = evolver.recombine(rng, a.program(), b.program());
                if draw::chance(rng, mutation_rate) {
                    Ok(evolver.mutate(rng, &child))
                } else {
                    Ok(child)
                }
            })
            .collect::<Result<_, _>>()?;
        Ok(Population::new(programs))
    }
}

/// Numeric parameters of the generational loop.
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub max_generations: usize,
    pub population_size: usize,
    /// Round limit of each evaluation run.
    pub max_rounds: usize,
    /// Probability that an offspring is mutated after recombination.
    pub mutation_rate: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            max_generations: 100,
            population_size: 100,
            max_rounds: 100,
            mutation_rate: 0.15,
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::ZeroMaxRounds);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        Ok(())
    }
}

/// Progress of the loop after a generation has been merged.
///
/// Generation 0 is the evaluated seed population.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub generation: usize,
    pub best: EvaluatedIndividual,
    pub stats: FitnessStats,
}

/// Runs the generational loop and returns the final population, sorted by
/// descending fitness once at least one generation has run.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use snakegp_engine::{Board, GameState};
/// use snakegp_program::RoundsEvaluator;
/// use snakegp_training::{SimulationParams, SubtreeEvolver, TournamentSelection, simulate_population};
///
/// let initial = GameState::initial(Board::walled(10, 10), 3).unwrap();
/// let params = SimulationParams {
///     max_generations: 3,
///     population_size: 10,
///     ..SimulationParams::default()
/// };
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let population = simulate_population(
///     &mut rng,
///     &initial,
///     &params,
///     &RoundsEvaluator::new(),
///     &TournamentSelection::new(3),
///     &SubtreeEvolver::default(),
/// )
/// .unwrap();
/// assert_eq!(population.individuals().len(), 10);
/// ```
pub fn simulate_population<R, E>(
    rng: &mut R,
    initial: &GameState,
    params: &SimulationParams,
    evaluator: &dyn RunEvaluator,
    selection: &dyn ParentSelection,
    evolver: &E,
) -> Result<EvaluatedPopulation, TrainingError>
where
    R: RngCore,
    E: Evolver + ?Sized,
{
    simulate_population_with_callback(rng, initial, params, evaluator, selection, evolver, |_| {})
}

/// Like [`simulate_population`], calling `on_generation` after the seed
/// population and after every generation.
pub fn simulate_population_with_callback<R, E, F>(
    rng: &mut R,
    initial: &GameState,
    params: &SimulationParams,
    evaluator: &dyn RunEvaluator,
    selection: &dyn ParentSelection,
    evolver: &E,
    mut on_generation: F,
) -> Result<EvaluatedPopulation, TrainingError>
where
    R: RngCore,
    E: Evolver + ?Sized,
    F: FnMut(&GenerationReport),
{
    params.validate()?;
    selection.check(params.population_size, 2)?;

    log::info!(
        "seeding {} programs, {} generations of up to {} rounds",
        params.population_size,
        params.max_generations,
        params.max_rounds
    );
    let mut population = Population::random(rng, evolver, params.population_size).evaluate(
        initial,
        params.max_rounds,
        evaluator,
    )?;
    report(&population, 0, params, &mut on_generation);

    for generation in 1..=params.max_generations {
        let offspring = population
            .breed(rng, params.population_size, selection, evolver, params.mutation_rate)?
            .evaluate(initial, params.max_rounds, evaluator)?;
        population = population.merge(offspring, params.population_size);
        report(&population, generation, params, &mut on_generation);
    }

    Ok(population)
}

fn report<F>(
    population: &EvaluatedPopulation,
    generation: usize,
    params: &SimulationParams,
    on_generation: &mut F,
) where
    F: FnMut(&GenerationReport),
{
    let (Some(best), Some(stats)) = (population.best(), population.fitness_stats()) else {
        return;
    };
    log::info!(
        "generation {generation}/{}: fitness {stats}",
        params.max_generations
    );
    log::debug!("best program ({} rounds): {}", best.rounds(), best.program());
    on_generation(&GenerationReport {
        generation,
        best: best.clone(),
        stats,
    });
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use snakegp_engine::{Board, Point};
    use snakegp_program::{Expr, RoundsEvaluator, ScoreEvaluator};

    use super::*;
    use crate::{
        evolver::SubtreeEvolver,
        selection::{FittestSelection, TournamentSelection},
    };

    fn initial() -> GameState {
        GameState::initial(Board::arena(10, 10), 3).unwrap()
    }

    fn small_params() -> SimulationParams {
        SimulationParams {
            max_generations: 8,
            population_size: 16,
            max_rounds: 40,
            mutation_rate: 0.3,
        }
    }

    fn run(seed: u64, selection: &dyn ParentSelection) -> (EvaluatedPopulation, Vec<GenerationReport>) {
        let mut reports = vec![];
        let population = simulate_population_with_callback(
            &mut Pcg32::seed_from_u64(seed),
            &initial(),
            &small_params(),
            &ScoreEvaluator::default(),
            selection,
            &SubtreeEvolver::default(),
            |r| reports.push(r.clone()),
        )
        .unwrap();
        (population, reports)
    }

    #[test]
    fn test_evaluate_keeps_order() {
        let programs = [2.0, 1.0, 0.0]
            .into_iter()
            .map(|v| Program::from(Expr::num(v)))
            .collect();
        let state = GameState::initial(Board::walled(10, 10), 3).unwrap();
        let evaluated = Population::new(programs)
            .evaluate(&state, 30, &RoundsEvaluator::new())
            .unwrap();
        // down hits the wall after 3 rounds, right after 3, up runs into the tail at once
        let rounds: Vec<_> = evaluated.individuals().iter().map(EvaluatedIndividual::rounds).collect();
        assert_eq!(rounds, [3, 3, 0]);
        assert_eq!(evaluated.best().unwrap().program().to_string(), "2");
    }

    #[test]
    fn test_evaluate_propagates_errors() {
        let state =
            GameState::new(Board::empty(4, 4), vec![Point::new(3, 1), Point::new(2, 1)]).unwrap();
        let population = Population::new(vec![Program::from(Expr::GetFieldInFront)]);
        assert!(population.evaluate(&state, 10, &RoundsEvaluator::new()).is_err());
    }

    #[test]
    fn test_merge_keeps_fittest() {
        let ind = |v: f64| EvaluatedIndividual::new(Program::from(Expr::num(v)), v, 0);
        let current = EvaluatedPopulation {
            individuals: vec![ind(5.0), ind(1.0), ind(3.0)],
        };
        let offspring = EvaluatedPopulation {
            individuals: vec![ind(4.0), ind(6.0), ind(0.0)],
        };
        let merged = current.merge(offspring, 3);
        let fitness: Vec<_> = merged.individuals().iter().map(EvaluatedIndividual::fitness).collect();
        assert_eq!(fitness, [6.0, 5.0, 4.0]);
    }

    #[derive(Debug)]
    struct FirstOnly;

    impl ParentSelection for FirstOnly {
        fn select<'a>(
            &self,
            population: &'a [EvaluatedIndividual],
            _count: usize,
            _rng: &mut dyn RngCore,
        ) -> Vec<&'a EvaluatedIndividual> {
            population.iter().take(1).collect()
        }

        fn check(&self, _population_size: usize, _count: usize) -> Result<(), ConfigError> {
            Ok(())
        }
    }

    #[test]
    fn test_breed_rejects_wrong_parent_count() {
        let population = Population::new(vec![Program::from(Expr::GetX), Program::from(Expr::GetY)])
            .evaluate(&initial(), 10, &RoundsEvaluator::new())
            .unwrap();
        let result = population.breed(
            &mut Pcg32::seed_from_u64(0),
            4,
            &FirstOnly,
            &SubtreeEvolver::default(),
            0.5,
        );
        assert!(matches!(
            result,
            Err(TrainingError::ParentCount {
                requested: 2,
                returned: 1
            })
        ));

        let result = simulate_population(
            &mut Pcg32::seed_from_u64(0),
            &initial(),
            &small_params(),
            &RoundsEvaluator::new(),
            &FirstOnly,
            &SubtreeEvolver::default(),
        );
        assert!(matches!(result, Err(TrainingError::ParentCount { .. })));
    }

    #[test]
    fn test_best_fitness_never_decreases() {
        for selection in [
            &FittestSelection as &dyn ParentSelection,
            &TournamentSelection::new(3),
        ] {
            let (population, reports) = run(7, selection);
            assert_eq!(reports.len(), 9);
            assert_eq!(population.individuals().len(), 16);
            for (generation, pair) in reports.windows(2).enumerate() {
                assert_eq!(pair[1].generation, generation + 1);
                assert!(pair[1].best.fitness() >= pair[0].best.fitness());
                assert!(pair[1].stats.min >= pair[0].stats.min);
            }
            assert!(
                population
                    .individuals()
                    .is_sorted_by(|a, b| a.fitness() >= b.fitness())
            );
        }
    }

    #[test]
    fn test_same_seed_same_population() {
        let selection = TournamentSelection::new(2);
        let (a, _) = run(21, &selection);
        let (b, _) = run(21, &selection);
        let programs = |p: &EvaluatedPopulation| {
            p.individuals()
                .iter()
                .map(|i| (i.program().clone(), i.fitness()))
                .collect::<Vec<_>>()
        };
        assert_eq!(programs(&a), programs(&b));
    }

    #[test]
    fn test_zero_generations_returns_seed() {
        let params = SimulationParams {
            max_generations: 0,
            ..small_params()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let population = simulate_population(
            &mut rng,
            &initial(),
            &params,
            &RoundsEvaluator::new(),
            &FittestSelection,
            &SubtreeEvolver::default(),
        )
        .unwrap();
        assert_eq!(population.individuals().len(), 16);
    }

    #[test]
    fn test_invalid_configuration_fails_fast() {
        let cases = [
            (
                SimulationParams {
                    population_size: 0,
                    ..small_params()
                },
                &TournamentSelection::new(2) as &dyn ParentSelection,
            ),
            (
                SimulationParams {
                    max_rounds: 0,
                    ..small_params()
                },
                &TournamentSelection::new(2),
            ),
            (
                SimulationParams {
                    mutation_rate: 1.5,
                    ..small_params()
                },
                &TournamentSelection::new(2),
            ),
            (
                SimulationParams {
                    population_size: 1,
                    ..small_params()
                },
                &FittestSelection,
            ),
            (small_params(), &TournamentSelection::new(0)),
        ];
        for (params, selection) in cases {
            let result = simulate_population(
                &mut Pcg32::seed_from_u64(0),
                &initial(),
                &params,
                &RoundsEvaluator::new(),
                selection,
                &SubtreeEvolver::default(),
            );
            assert!(matches!(result, Err(TrainingError::Config(_))), "{params:?}");
        }
    }
}
