//! Runtime value representation
//!
//! [`Value`] is the payload of the terminal "variable-value" nodes: number,
//! string and boolean literals, and every result produced by evaluating an
//! expression. Values are immutable; evaluation always builds new ones.

use std::fmt;

use crate::parser::ast::NodeKind;

/// A Mini-PL value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Number(i32),
    String(String),
    Boolean(bool),
}

impl Value {
    /// The node kind this value reports in diagnostics.
    pub fn kind(&self) -> NodeKind {
        match self {
            Value::Number(_) => NodeKind::Number,
            Value::String(_) => NodeKind::String,
            Value::Boolean(_) => NodeKind::Boolean,
        }
    }

    /// Zero value of a value kind: `0`, `""` or `false`.
    ///
    /// Returns `None` for kinds that are not variable-values.
    pub fn zero(kind: NodeKind) -> Option<Value> {
        match kind {
            NodeKind::Number => Some(Value::Number(0)),
            NodeKind::String => Some(Value::String(String::new())),
            NodeKind::Boolean => Some(Value::Boolean(false)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Typed extraction of a [`Value`] payload, used by the traversal helpers to
/// turn "expected type X" checks into a single generic call.
pub trait FromValue: Sized {
    const KIND: NodeKind;

    fn from_value(value: Value) -> Result<Self, Value>;
}

impl FromValue for i32 {
    const KIND: NodeKind = NodeKind::Number;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Number(n) => Ok(n),
            other => Err(other),
        }
    }
}

impl FromValue for String {
    const KIND: NodeKind = NodeKind::String;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl FromValue for bool {
    const KIND: NodeKind = NodeKind::Boolean;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(other),
        }
    }
}
