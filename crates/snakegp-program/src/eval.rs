//! Expression evaluation against a game state.
//!
//! The language has a single numeric type. Comparisons and logical operators
//! return [`TRUE`] or [`FALSE`], and equality is tolerant: two numbers closer
//! than [`EQUALITY_TOLERANCE`] compare equal. `&&` and `||` test whether each
//! operand equals [`TRUE`] under that tolerance, not whether it is non-zero,
//! and evolved programs rely on exactly this contract.
//!
//! Both operands of a binary operation are always evaluated. `If` evaluates
//! its condition and then only the selected branch.

use snakegp_engine::{Direction, FieldContent, FieldOutOfBoundsError, GameState};

use crate::expr::{BinaryOperation, Expr};

pub const FALSE: f64 = 0.0;
pub const TRUE: f64 = 1.0;

/// Two numbers closer than this are considered equal.
pub const EQUALITY_TOLERANCE: f64 = 0.1;

/// Failure while evaluating a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EvalError {
    #[display("GetFieldInFront looked past the board edge: {_0}")]
    FieldOutOfBounds(FieldOutOfBoundsError),
}

fn tolerant_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EQUALITY_TOLERANCE
}

fn truth(value: bool) -> f64 {
    if value { TRUE } else { FALSE }
}

/// Wraps an arbitrary number into `0..modulus` as `|round(n)| mod modulus`.
///
/// Halves round toward positive infinity, so `-1.5` rounds to `-1`.
/// Non-finite numbers normalize to 0.
#[must_use]
pub fn normalize(n: f64, modulus: usize) -> usize {
    assert!(modulus > 0, "modulus must be positive");
    #[expect(clippy::cast_precision_loss)]
    let wrapped = round_half_up(n).abs() % modulus as f64;
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = wrapped as usize;
    index
}

fn round_half_up(n: f64) -> f64 {
    let floor = n.floor();
    if n - floor >= 0.5 { floor + 1.0 } else { floor }
}

fn content_value(content: FieldContent) -> f64 {
    #[expect(clippy::cast_precision_loss)]
    let value = content.index() as f64;
    value
}

impl BinaryOperation {
    /// Applies this operator to already evaluated operands.
    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Multiply => left * right,
            Self::Equals => truth(tolerant_eq(left, right)),
            Self::Less => truth(left < right),
            Self::LessEq => truth(left < right || tolerant_eq(left, right)),
            Self::Greater => truth(left > right),
            Self::GreaterEq => truth(left > right || tolerant_eq(left, right)),
            Self::And => truth(tolerant_eq(left, TRUE) && tolerant_eq(right, TRUE)),
            Self::Or => truth(tolerant_eq(left, TRUE) || tolerant_eq(right, TRUE)),
        }
    }
}

impl Expr {
    /// Evaluates this tree to a number for `state`.
    ///
    /// # Example
    ///
    /// ```
    /// use snakegp_engine::{Board, GameState};
    /// use snakegp_program::{BinaryOperation, Expr};
    ///
    /// let state = GameState::initial(Board::walled(10, 10), 3).unwrap();
    /// let expr = Expr::binary(
    ///     BinaryOperation::Add,
    ///     Expr::num(12.0),
    ///     Expr::binary(BinaryOperation::Multiply, Expr::num(3.0), Expr::num(10.0)),
    /// );
    /// assert_eq!(expr.evaluate(&state), Ok(42.0));
    /// ```
    pub fn evaluate(&self, state: &GameState) -> Result<f64, EvalError> {
        match self {
            Self::NumberLiteral { value } => Ok(*value),
            Self::BinaryOp {
                operation,
                left,
                right,
            } => {
                let left = left.evaluate(state)?;
                let right = right.evaluate(state)?;
                Ok(operation.apply(left, right))
            }
            Self::If {
                condition,
                then,
                otherwise,
            } => {
                if condition.evaluate(state)? == FALSE {
                    otherwise.evaluate(state)
                } else {
                    then.evaluate(state)
                }
            }
            Self::GetField { x, y } => {
                let x = normalize(x.evaluate(state)?, state.size_x());
                let y = normalize(y.evaluate(state)?, state.size_y());
                // normalized coordinates are below the board size, which fits in i32
                #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let content = state.field(x as i32, y as i32)?;
                Ok(content_value(content))
            }
            Self::GetFieldInFront => {
                let front = state.head().step(state.heading());
                Ok(content_value(state.field_at(front)?))
            }
            Self::GetX => Ok(f64::from(state.head().x)),
            Self::GetY => Ok(f64::from(state.head().y)),
        }
    }

    /// Evaluates this tree and maps the result to a movement decision:
    /// `|round(n)| mod 4` selects `Up`, `Right`, `Down` or `Left`.
    pub fn decide(&self, state: &GameState) -> Result<Direction, EvalError> {
        let value = self.evaluate(state)?;
        Ok(Direction::from_index(normalize(value, Direction::LEN)))
    }
}
