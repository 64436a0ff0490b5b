//! Binary operator evaluation
//!
//! | operands          | operators          |
//! |-------------------|--------------------|
//! | number, number    | `+ - * /` `= <`    |
//! | string, string    | `+` `= <`          |
//! | boolean, boolean  | `&` `= <`          |
//!
//! Arithmetic wraps on overflow and `/` truncates toward zero. Strings compare
//! by code point. For booleans `<` holds only for `false < true`.

use crate::interpreter::errors::VisitErrorKind;
use crate::parser::ast::NodeKind;
use crate::value::Value;

/// Kind of the value `left op right` produces, without computing it.
pub fn result_kind(op: &str, left: NodeKind, right: NodeKind) -> Result<NodeKind, VisitErrorKind> {
    use NodeKind::*;

    let kind = match (left, right, op) {
        (Number, Number, "+" | "-" | "*" | "/") => Number,
        (String, String, "+") => String,
        (Boolean, Boolean, "&") => Boolean,
        (Number, Number, "=" | "<")
        | (String, String, "=" | "<")
        | (Boolean, Boolean, "=" | "<") => Boolean,
        (Number | String | Boolean, _, _) if left == right => {
            return Err(unknown_operator(op, left));
        }
        _ => return Err(mismatched_operands(op, left, right)),
    };
    Ok(kind)
}

/// Evaluate `left op right`.
pub fn apply(op: &str, left: Value, right: Value) -> Result<Value, VisitErrorKind> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => apply_numbers(op, l, r),
        (Value::String(l), Value::String(r)) => match op {
            "+" => Ok(Value::String(l + &r)),
            "=" => Ok(Value::Boolean(l == r)),
            "<" => Ok(Value::Boolean(l < r)),
            _ => Err(unknown_operator(op, NodeKind::String)),
        },
        (Value::Boolean(l), Value::Boolean(r)) => match op {
            "&" => Ok(Value::Boolean(l && r)),
            "=" => Ok(Value::Boolean(l == r)),
            "<" => Ok(Value::Boolean(!l && r)),
            _ => Err(unknown_operator(op, NodeKind::Boolean)),
        },
        (l, r) => Err(mismatched_operands(op, l.kind(), r.kind())),
    }
}

fn apply_numbers(op: &str, l: i32, r: i32) -> Result<Value, VisitErrorKind> {
    let value = match op {
        "+" => Value::Number(l.wrapping_add(r)),
        "-" => Value::Number(l.wrapping_sub(r)),
        "*" => Value::Number(l.wrapping_mul(r)),
        "/" => {
            if r == 0 {
                return Err(VisitErrorKind::DivisionByZero);
            }
            Value::Number(l.wrapping_div(r))
        }
        "=" => Value::Boolean(l == r),
        "<" => Value::Boolean(l < r),
        _ => return Err(unknown_operator(op, NodeKind::Number)),
    };
    Ok(value)
}

fn unknown_operator(op: &str, operands: NodeKind) -> VisitErrorKind {
    VisitErrorKind::UnknownBinary {
        op: op.to_string(),
        operands,
    }
}

fn mismatched_operands(op: &str, left: NodeKind, right: NodeKind) -> VisitErrorKind {
    VisitErrorKind::MismatchedOperands {
        op: op.to_string(),
        left,
        right,
    }
}
