//! JSON form of expression trees.
//!
//! Every node is an object tagged with `"type"`; operators are written as
//! their symbols:
//!
//! ```json
//! {
//!   "type": "BinaryOp",
//!   "operation": "+",
//!   "left": { "type": "NumberLiteral", "value": 12.0 },
//!   "right": { "type": "GetX" }
//! }
//! ```
//!
//! Numbers are written with enough precision to read back bit-for-bit.

use crate::expr::Expr;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
#[display("invalid program JSON: {_0}")]
pub struct SerializationError(serde_json::Error);

/// Writes `expr` as pretty-printed JSON.
pub fn to_json(expr: &Expr) -> Result<String, SerializationError> {
    Ok(serde_json::to_string_pretty(expr)?)
}

/// Reads a tree previously written by [`to_json`].
pub fn from_json(json: &str) -> Result<Expr, SerializationError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use super::*;
    use crate::{controller::Program, expr::BinaryOperation};

    fn arb_expr() -> impl Strategy<Value = Expr> {
        let leaf = prop_oneof![
            (-999.0f64..999.0).prop_map(Expr::num),
            Just(Expr::GetFieldInFront),
            Just(Expr::GetX),
            Just(Expr::GetY),
        ];
        leaf.prop_recursive(4, 32, 3, |inner| {
            prop_oneof![
                (
                    proptest::sample::select(BinaryOperation::ALL.to_vec()),
                    inner.clone(),
                    inner.clone()
                )
                    .prop_map(|(op, l, r)| Expr::binary(op, l, r)),
                (inner.clone(), inner.clone(), inner.clone())
                    .prop_map(|(c, t, e)| Expr::if_else(c, t, e)),
                (inner.clone(), inner).prop_map(|(x, y)| Expr::get_field(x, y)),
            ]
        })
    }

    #[test]
    fn test_json_layout() {
        let expr = Expr::if_else(
            Expr::binary(BinaryOperation::LessEq, Expr::GetX, Expr::num(4.0)),
            Expr::GetFieldInFront,
            Expr::get_field(Expr::GetY, Expr::num(-1.5)),
        );
        let value: serde_json::Value = serde_json::from_str(&to_json(&expr).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "If",
                "condition": {
                    "type": "BinaryOp",
                    "operation": "<=",
                    "left": { "type": "GetX" },
                    "right": { "type": "NumberLiteral", "value": 4.0 },
                },
                "then": { "type": "GetFieldInFront" },
                "else": {
                    "type": "GetField",
                    "x": { "type": "GetY" },
                    "y": { "type": "NumberLiteral", "value": -1.5 },
                },
            })
        );
    }

    #[test]
    fn test_from_json_accepts_integer_literals() {
        let expr = from_json(r#"{"type": "NumberLiteral", "value": 3}"#).unwrap();
        assert_eq!(expr, Expr::num(3.0));
    }

    #[test]
    fn test_from_json_accepts_lvalue_rvalue_operands() {
        let json = r#"{
            "type": "BinaryOp",
            "operation": "*",
            "lvalue": {"type": "GetX"},
            "rvalue": {"type": "NumberLiteral", "value": 2}
        }"#;
        let expr = from_json(json).unwrap();
        assert_eq!(expr, Expr::binary(BinaryOperation::Multiply, Expr::GetX, Expr::num(2.0)));
        let written = to_json(&expr).unwrap();
        assert!(written.contains(r#""left""#) && !written.contains("lvalue"));
    }

    #[test]
    fn test_from_json_rejects_unknown_node() {
        assert!(from_json(r#"{"type": "GetZ"}"#).is_err());
        assert!(from_json(r#"{"type": "BinaryOp", "operation": "-", "left": {"type": "GetX"}, "right": {"type": "GetY"}}"#).is_err());
        assert!(from_json("not json").is_err());
    }

    #[test]
    fn test_program_is_serialized_as_bare_tree() {
        let program = Program::new(Arc::new(Expr::GetX));
        assert_eq!(
            serde_json::to_string(&program).unwrap(),
            r#"{"type":"GetX"}"#
        );
        let back: Program = serde_json::from_str(r#"{"type":"GetY"}"#).unwrap();
        assert_eq!(**back.root(), Expr::GetY);
    }

    proptest! {
        #[test]
        fn prop_json_reads_back_identical_tree(expr in arb_expr()) {
            let json = to_json(&expr).unwrap();
            prop_assert_eq!(from_json(&json).unwrap(), expr);
        }
    }
}
