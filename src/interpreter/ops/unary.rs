//! Unary operator evaluation
//!
//! The only unary operator is `!`, defined for booleans.

use crate::interpreter::errors::VisitErrorKind;
use crate::parser::ast::NodeKind;
use crate::value::Value;

/// Kind of the value `op operand` produces, without computing it.
pub fn result_kind(op: &str, operand: NodeKind) -> Result<NodeKind, VisitErrorKind> {
    match (operand, op) {
        (NodeKind::Boolean, "!") => Ok(NodeKind::Boolean),
        (NodeKind::Boolean, _) => Err(VisitErrorKind::UnknownBooleanUnary(op.to_string())),
        _ => Err(VisitErrorKind::UnknownUnary {
            op: op.to_string(),
            operand,
        }),
    }
}

/// Evaluate `op operand`.
pub fn apply(op: &str, operand: Value) -> Result<Value, VisitErrorKind> {
    match operand {
        Value::Boolean(b) if op == "!" => Ok(Value::Boolean(!b)),
        other => result_kind(op, other.kind()).map(|_| other),
    }
}
