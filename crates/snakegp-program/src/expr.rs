//! Expression tree data model.
//!
//! Trees are immutable and persistent: children are held in [`Arc`]s, so
//! operators that "replace one child" build a new parent node and share every
//! untouched subtree with the original tree.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// Binary operators of the expression language.
///
/// Comparison and logical operators produce [`TRUE`](crate::TRUE) or
/// [`FALSE`](crate::FALSE). The serialized form of each operator is its
/// symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum BinaryOperation {
    #[serde(rename = "+")]
    #[display("+")]
    Add,
    #[serde(rename = "*")]
    #[display("*")]
    Multiply,
    #[serde(rename = "==")]
    #[display("==")]
    Equals,
    #[serde(rename = "<")]
    #[display("<")]
    Less,
    #[serde(rename = "<=")]
    #[display("<=")]
    LessEq,
    #[serde(rename = ">")]
    #[display(">")]
    Greater,
    #[serde(rename = ">=")]
    #[display(">=")]
    GreaterEq,
    #[serde(rename = "&&")]
    #[display("&&")]
    And,
    #[serde(rename = "||")]
    #[display("||")]
    Or,
}

impl BinaryOperation {
    pub const LEN: usize = 9;
    pub const ALL: [Self; Self::LEN] = [
        Self::Add,
        Self::Multiply,
        Self::Equals,
        Self::Less,
        Self::LessEq,
        Self::Greater,
        Self::GreaterEq,
        Self::And,
        Self::Or,
    ];

    /// Whether swapping the operands never changes the result.
    #[must_use]
    pub const fn is_commutative(self) -> bool {
        match self {
            Self::Add | Self::Multiply | Self::Equals | Self::And | Self::Or => true,
            Self::Less | Self::LessEq | Self::Greater | Self::GreaterEq => false,
        }
    }
}

/// A node of an agent program.
///
/// The serialized form is internally tagged by node kind, e.g.
/// `{"type": "NumberLiteral", "value": 4.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    /// Constant number.
    NumberLiteral { value: f64 },
    /// Arithmetic, comparison or logical operation over two operands.
    BinaryOp {
        operation: BinaryOperation,
        #[serde(alias = "lvalue")]
        left: Arc<Expr>,
        #[serde(alias = "rvalue")]
        right: Arc<Expr>,
    },
    /// Conditional: only the selected branch is evaluated.
    If {
        condition: Arc<Expr>,
        then: Arc<Expr>,
        #[serde(rename = "else")]
        otherwise: Arc<Expr>,
    },
    /// Board content at a computed coordinate, wrapped into the board.
    GetField { x: Arc<Expr>, y: Arc<Expr> },
    /// Board content of the cell in front of the snake head.
    GetFieldInFront,
    /// Column of the snake head.
    GetX,
    /// Row of the snake head.
    GetY,
}

/// Discriminant of an [`Expr`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum NodeKind {
    NumberLiteral,
    BinaryOp,
    If,
    GetField,
    GetFieldInFront,
    GetX,
    GetY,
}

impl NodeKind {
    pub const LEN: usize = 7;
    pub const ALL: [Self; Self::LEN] = [
        Self::NumberLiteral,
        Self::BinaryOp,
        Self::If,
        Self::GetField,
        Self::GetFieldInFront,
        Self::GetX,
        Self::GetY,
    ];

    /// Number of child subtrees a node of this kind has.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::NumberLiteral | Self::GetFieldInFront | Self::GetX | Self::GetY => 0,
            Self::BinaryOp | Self::GetField => 2,
            Self::If => 3,
        }
    }
}

impl Expr {
    #[must_use]
    pub fn num(value: f64) -> Self {
        Self::NumberLiteral { value }
    }

    #[must_use]
    pub fn binary(
        operation: BinaryOperation,
        left: impl Into<Arc<Expr>>,
        right: impl Into<Arc<Expr>>,
    ) -> Self {
        Self::BinaryOp {
            operation,
            left: left.into(),
            right: right.into(),
        }
    }

    #[must_use]
    pub fn if_else(
        condition: impl Into<Arc<Expr>>,
        then: impl Into<Arc<Expr>>,
        otherwise: impl Into<Arc<Expr>>,
    ) -> Self {
        Self::If {
            condition: condition.into(),
            then: then.into(),
            otherwise: otherwise.into(),
        }
    }

    #[must_use]
    pub fn get_field(x: impl Into<Arc<Expr>>, y: impl Into<Arc<Expr>>) -> Self {
        Self::GetField {
            x: x.into(),
            y: y.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::NumberLiteral { .. } => NodeKind::NumberLiteral,
            Self::BinaryOp { .. } => NodeKind::BinaryOp,
            Self::If { .. } => NodeKind::If,
            Self::GetField { .. } => NodeKind::GetField,
            Self::GetFieldInFront => NodeKind::GetFieldInFront,
            Self::GetX => NodeKind::GetX,
            Self::GetY => NodeKind::GetY,
        }
    }

    /// Direct children in evaluation order.
    #[must_use]
    pub fn children(&self) -> Vec<&Arc<Expr>> {
        match self {
            Self::NumberLiteral { .. } | Self::GetFieldInFront | Self::GetX | Self::GetY => vec![],
            Self::BinaryOp { left, right, .. } => vec![left, right],
            Self::If {
                condition,
                then,
                otherwise,
            } => vec![condition, then, otherwise],
            Self::GetField { x, y } => vec![x, y],
        }
    }

    /// Returns a copy of this node with child `index` replaced, sharing all
    /// other children.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below the arity of this node.
    #[must_use]
    pub fn with_child(&self, index: usize, child: Arc<Expr>) -> Self {
        match (self, index) {
            (Self::BinaryOp { operation, right, .. }, 0) => Self::BinaryOp {
                operation: *operation,
                left: child,
                right: Arc::clone(right),
            },
            (Self::BinaryOp { operation, left, .. }, 1) => Self::BinaryOp {
                operation: *operation,
                left: Arc::clone(left),
                right: child,
            },
            (Self::If { then, otherwise, .. }, 0) => Self::If {
                condition: child,
                then: Arc::clone(then),
                otherwise: Arc::clone(otherwise),
            },
            (
                Self::If {
                    condition,
                    otherwise,
                    ..
                },
                1,
            ) => Self::If {
                condition: Arc::clone(condition),
                then: child,
                otherwise: Arc::clone(otherwise),
            },
            (Self::If { condition, then, .. }, 2) => Self::If {
                condition: Arc::clone(condition),
                then: Arc::clone(then),
                otherwise: child,
            },
            (Self::GetField { y, .. }, 0) => Self::GetField {
                x: child,
                y: Arc::clone(y),
            },
            (Self::GetField { x, .. }, 1) => Self::GetField {
                x: Arc::clone(x),
                y: child,
            },
            _ => panic!(
                "{} node has no child at index {index}",
                self.kind()
            ),
        }
    }

    /// Total number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(|c| c.node_count())
            .sum::<usize>()
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(|c| c.depth())
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberLiteral { value } => write!(f, "{value}"),
            Self::BinaryOp {
                operation,
                left,
                right,
            } => write!(f, "({left} {operation} {right})"),
            Self::If {
                condition,
                then,
                otherwise,
            } => write!(f, "if({condition}, {then}, {otherwise})"),
            Self::GetField { x, y } => write!(f, "field({x}, {y})"),
            Self::GetFieldInFront => f.write_str("field_in_front"),
            Self::GetX => f.write_str("x"),
            Self::GetY => f.write_str("y"),
        }
    }
}
