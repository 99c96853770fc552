use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use snakegp_engine::{Controller, Direction, GameState};

use crate::{eval::EvalError, expr::Expr};

/// An evolved agent program: a shared expression tree that drives the snake.
///
/// Cloning a program is cheap; the tree itself is never copied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program(Arc<Expr>);

impl Program {
    #[must_use]
    pub fn new(root: impl Into<Arc<Expr>>) -> Self {
        Self(root.into())
    }

    #[must_use]
    pub fn root(&self) -> &Arc<Expr> {
        &self.0
    }
}

impl From<Expr> for Program {
    fn from(expr: Expr) -> Self {
        Self::new(expr)
    }
}

impl From<Arc<Expr>> for Program {
    fn from(root: Arc<Expr>) -> Self {
        Self(root)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Controller for Program {
    type Error = EvalError;

    fn decide(&self, state: &GameState) -> Result<Direction, Self::Error> {
        self.0.decide(state)
    }
}
