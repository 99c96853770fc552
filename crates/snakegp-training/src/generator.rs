//! Random expression trees.
//!
//! The generator seeds the initial population and produces the fresh
//! subtrees that mutation splices into existing programs.
//!
//! At an eligible depth every node kind is equally likely, leaves and
//! internal nodes alike. Below [`TreeGenerator::max_depth`] only number
//! literals are produced, which bounds the depth of a generated tree to
//! `max_depth + 2` nodes.

use std::{ops::Range, sync::Arc};

use rand::Rng;
use snakegp_program::{BinaryOperation, Expr, NodeKind};

use crate::draw;

/// Builds random trees.
#[derive(Debug, Clone)]
pub struct TreeGenerator {
    /// Deepest level (root is 0) at which non-literal nodes may appear.
    pub max_depth: usize,
    /// Range number literals are drawn from.
    pub literal_range: Range<f64>,
}

impl Default for TreeGenerator {
    fn default() -> Self {
        Self {
            max_depth: 1,
            literal_range: -999.0..999.0,
        }
    }
}

impl TreeGenerator {
    /// Generates a tree whose root sits at `depth`.
    ///
    /// # Example
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use snakegp_training::TreeGenerator;
    ///
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    /// let tree = TreeGenerator::default().generate(&mut rng, 0);
    /// assert!(tree.depth() <= 3);
    /// ```
    pub fn generate<R>(&self, rng: &mut R, depth: usize) -> Arc<Expr>
    where
        R: Rng + ?Sized,
    {
        if depth > self.max_depth {
            return Arc::new(self.literal(rng));
        }
        let kind = NodeKind::ALL[draw::index(rng, NodeKind::LEN)];
        let node = match kind {
            NodeKind::NumberLiteral => self.literal(rng),
            NodeKind::BinaryOp => {
                let operation = BinaryOperation::ALL[draw::index(rng, BinaryOperation::LEN)];
                let left = self.generate(rng, depth + 1);
                let right = self.generate(rng, depth + 1);
                Expr::binary(operation, left, right)
            }
            NodeKind::If => {
                let condition = self.generate(rng, depth + 1);
                let then = self.generate(rng, depth + 1);
                let otherwise = self.generate(rng, depth + 1);
                Expr::if_else(condition, then, otherwise)
            }
            NodeKind::GetField => {
                let x = self.generate(rng, depth + 1);
                let y = self.generate(rng, depth + 1);
                Expr::get_field(x, y)
            }
            NodeKind::GetFieldInFront => Expr::GetFieldInFront,
            NodeKind::GetX => Expr::GetX,
            NodeKind::GetY => Expr::GetY,
        };
        Arc::new(node)
    }

    fn literal<R>(&self, rng: &mut R) -> Expr
    where
        R: Rng + ?Sized,
    {
        Expr::num(draw::in_range(
            rng,
            self.literal_range.start,
            self.literal_range.end,
        ))
    }
}
