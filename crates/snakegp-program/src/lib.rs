//! Agent programs for the snake game.
//!
//! An agent program is a single expression tree over one numeric type. Every
//! round the tree is evaluated against the current [`GameState`] and the
//! result is mapped to a direction (`|round(n)| mod 4`, in the order `Up`,
//! `Right`, `Down`, `Left`).
//!
//! # Modules
//!
//! - [`expr`] - the tree itself: node kinds, operators, structural helpers
//! - [`eval`] - evaluation semantics and the direction decision
//! - [`controller`] - [`Program`], the tree packaged as an engine [`Controller`](snakegp_engine::Controller)
//! - [`serialization`] - JSON form of trees
//! - [`run_evaluator`] - fitness functions scoring a finished run
//!
//! # Example
//!
//! ```
//! use snakegp_engine::{Board, GameState, simulate};
//! use snakegp_program::{BinaryOperation, Expr, Program};
//!
//! // go down while the cell in front is free, turn right otherwise
//! let program = Program::from(Expr::if_else(
//!     Expr::binary(BinaryOperation::Equals, Expr::GetFieldInFront, Expr::num(0.0)),
//!     Expr::num(2.0),
//!     Expr::num(1.0),
//! ));
//! assert_eq!(program.to_string(), "if((field_in_front == 0), 2, 1)");
//!
//! let state = GameState::initial(Board::walled(10, 10), 3).unwrap();
//! let result = simulate(&state, &program, 100).unwrap();
//! assert!(result.final_state().is_game_over());
//! ```
//!
//! [`GameState`]: snakegp_engine::GameState

pub use self::{
    controller::Program,
    eval::{EQUALITY_TOLERANCE, EvalError, FALSE, TRUE},
    expr::{BinaryOperation, Expr, NodeKind},
    run_evaluator::{RoundsEvaluator, RunEvaluator, ScoreEvaluator},
    serialization::{SerializationError, from_json, to_json},
};

pub mod controller;
pub mod eval;
pub mod expr;
pub mod run_evaluator;
pub mod serialization;
