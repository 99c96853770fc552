use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use snakegp_engine::simulate;
use snakegp_program::{RoundsEvaluator, RunEvaluator, ScoreEvaluator};
use snakegp_training::{
    FittestSelection, ParentSelection, SimulationParams, SubtreeEvolver, TournamentSelection,
    simulate_population_with_callback,
};

use super::board::BoardArg;
use crate::{model::trained_program::TrainedProgram, util::Output};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum SelectionKind {
    Fittest,
    #[default]
    Tournament,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum FitnessKind {
    #[default]
    Rounds,
    Score,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of generations to evolve
    #[arg(long, default_value_t = 100)]
    pub(crate) generations: usize,
    /// Number of programs per generation
    #[arg(long, default_value_t = 100)]
    pub(crate) population: usize,
    /// Round limit of each evaluation game
    #[arg(long, default_value_t = 100)]
    pub(crate) max_rounds: usize,
    /// Probability that an offspring is mutated
    #[arg(long, default_value_t = 0.15)]
    pub(crate) mutation_rate: f64,
    /// Parent selection: fittest or tournament
    #[arg(long, default_value = "tournament")]
    pub(crate) selection: SelectionKind,
    /// Programs drawn per tournament
    #[arg(long, default_value_t = 3)]
    pub(crate) tournament_size: usize,
    /// Fitness function: rounds or score
    #[arg(long, default_value = "rounds")]
    pub(crate) fitness: FitnessKind,
    #[clap(flatten)]
    pub(crate) board: BoardArg,
    /// Seed for a reproducible run
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let initial = arg.board.initial_state()?;
    let params = SimulationParams {
        max_generations: arg.generations,
        population_size: arg.population,
        max_rounds: arg.max_rounds,
        mutation_rate: arg.mutation_rate,
    };
    let evaluator = match arg.fitness {
        FitnessKind::Rounds => &RoundsEvaluator::new() as &dyn RunEvaluator,
        FitnessKind::Score => &ScoreEvaluator::default() as &dyn RunEvaluator,
    };
    let selection = match arg.selection {
        SelectionKind::Fittest => &FittestSelection as &dyn ParentSelection,
        SelectionKind::Tournament => {
            &TournamentSelection::new(arg.tournament_size) as &dyn ParentSelection
        }
    };

    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("random seed: {seed}");
    let mut rng = Pcg32::seed_from_u64(seed);

    let mut best_fitness = f64::NEG_INFINITY;
    let population = simulate_population_with_callback(
        &mut rng,
        &initial,
        &params,
        evaluator,
        selection,
        &SubtreeEvolver::default(),
        |report| {
            if report.best.fitness() > best_fitness {
                best_fitness = report.best.fitness();
                log::info!(
                    "generation {}: new best fitness {:.1}: {}",
                    report.generation,
                    best_fitness,
                    report.best.program()
                );
            }
        },
    )
    .context("Training failed")?;

    let best = population
        .best()
        .context("Training produced an empty population")?;
    let run = simulate(&initial, best.program(), params.max_rounds)
        .context("Failed to replay the best program")?;

    eprintln!("Best program:");
    eprintln!("  {}", best.program());
    eprintln!("  {}", snakegp_program::to_json(best.program().root())?);
    eprintln!(
        "Best run: {} rounds, score {}{}",
        run.rounds(),
        run.final_state().score(),
        if run.final_state().is_game_over() { ", game over" } else { "" }
    );
    eprint!("{}", run.final_state());

    let model_name = match (arg.fitness, arg.selection) {
        (FitnessKind::Rounds, SelectionKind::Fittest) => "rounds-fittest",
        (FitnessKind::Rounds, SelectionKind::Tournament) => "rounds-tournament",
        (FitnessKind::Score, SelectionKind::Fittest) => "score-fittest",
        (FitnessKind::Score, SelectionKind::Tournament) => "score-tournament",
    };
    let model = TrainedProgram {
        name: model_name.to_owned(),
        trained_at: Utc::now(),
        final_fitness: best.fitness(),
        rounds: best.rounds(),
        program: best.program().clone(),
    };
    Output::save_json(&model, arg.output.as_deref())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Final fitness: {:.1}", model.final_fitness);
    eprintln!("  Nodes: {}", model.program.root().node_count());

    Ok(())
}
