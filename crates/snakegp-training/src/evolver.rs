use rand::Rng;
use snakegp_program::Program;

use crate::{
    generator::TreeGenerator,
    subtree::{random_subtree, set_random_subtree},
};

/// Genetic operators producing new programs from existing ones.
pub trait Evolver {
    /// Creates a fresh program for the initial population.
    fn generate<R>(&self, rng: &mut R) -> Program
    where
        R: Rng + ?Sized;

    /// Combines two parents into one child.
    fn recombine<R>(&self, rng: &mut R, a: &Program, b: &Program) -> Program
    where
        R: Rng + ?Sized;

    /// Returns a randomly altered copy of `program`.
    fn mutate<R>(&self, rng: &mut R, program: &Program) -> Program
    where
        R: Rng + ?Sized;
}

/// Subtree crossover and subtree mutation.
///
/// - recombination takes a random subtree of the first parent and splices it
///   into a random position of the second parent
/// - mutation splices a freshly generated tree into a random position
#[derive(Debug, Clone, Default)]
pub struct SubtreeEvolver {
    pub generator: TreeGenerator,
}

impl SubtreeEvolver {
    #[must_use]
    pub fn new(generator: TreeGenerator) -> Self {
        Self { generator }
    }
}

impl Evolver for SubtreeEvolver {
    fn generate<R>(&self, rng: &mut R) -> Program
    where
        R: Rng + ?Sized,
    {
        Program::new(self.generator.generate(rng, 0))
    }

    fn recombine<R>(&self, rng: &mut R, a: &Program, b: &Program) -> Program
    where
        R: Rng + ?Sized,
    {
        let donor = random_subtree(rng, a.root());
        Program::new(set_random_subtree(rng, b.root(), donor))
    }

    fn mutate<R>(&self, rng: &mut R, program: &Program) -> Program
    where
        R: Rng + ?Sized,
    {
        let fresh = self.generator.generate(rng, 0);
        Program::new(set_random_subtree(rng, program.root(), fresh))
    }
}
