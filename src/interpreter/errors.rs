//! Semantic and runtime error types
//!
//! This module defines [`VisitError`], the single error type raised by every
//! tree traversal (semantic analysis, interpretation, expression printing).
//! Each error carries a [`VisitErrorKind`] describing what went wrong and an
//! [`Origin`] naming the node it is attributed to.
//!
//! The analyzer reports errors per statement and keeps going; the interpreter
//! turns the first one into [`Aborted`] and stops.

use thiserror::Error;

use crate::io::Io;
use crate::parser::ast::{Node, NodeKind};
use crate::parser::lexer::Lexeme;

/// Node an error is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub kind: NodeKind,
    pub lexeme: Option<Lexeme>,
}

impl Origin {
    pub fn of(node: &dyn Node) -> Self {
        Origin {
            kind: node.kind(),
            lexeme: node.lexeme().cloned(),
        }
    }
}

/// What went wrong during a traversal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisitErrorKind {
    #[error("expected type {expected}, got {got}")]
    TypeMismatch { expected: NodeKind, got: NodeKind },

    #[error("return value expected to be null, got {0}")]
    UnexpectedValue(NodeKind),

    #[error("return value expected not to be null")]
    MissingValue,

    #[error("using undefined identifier {0}")]
    UndefinedIdentifier(String),

    #[error("trying to change immutable variable {0}")]
    ImmutableVariable(String),

    #[error("unrecognized boolean unary operator {0}")]
    UnknownBooleanUnary(String),

    #[error("unrecognized unary operator {op} for operand type {operand}")]
    UnknownUnary { op: String, operand: NodeKind },

    /// Operator not defined for two operands of the same kind
    #[error("unknown {} binary operator {op}", operand_family(.operands))]
    UnknownBinary { op: String, operands: NodeKind },

    /// Operands of different kinds
    #[error("unknown binary operator {op} for operand types left: {left}, right: {right}")]
    MismatchedOperands {
        op: String,
        left: NodeKind,
        right: NodeKind,
    },

    #[error("variable {name} type {declared} does not match value type {value}")]
    ValueMismatch {
        name: String,
        declared: NodeKind,
        value: NodeKind,
    },

    #[error("unknown identifier type name {0}")]
    UnknownTypeName(String),

    #[error("variable {0} already defined")]
    AlreadyDefined(String),

    #[error("variable {name} has unsupported type {kind} to read from input")]
    UnreadableType { name: String, kind: NodeKind },

    #[error("assertion failed with condition {0}")]
    AssertionFailed(String),

    /// Assertion failed and its condition could not be rendered
    #[error("assertion failed")]
    AssertionFailedUnrendered,

    #[error("division by zero")]
    DivisionByZero,

    #[error("{0} cannot be rendered as an expression")]
    Unrenderable(NodeKind),
}

fn operand_family(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::Number => "integer",
        NodeKind::String => "string",
        NodeKind::Boolean => "boolean",
        _ => "unsupported",
    }
}

impl VisitErrorKind {
    /// Attribute this error to `node`.
    pub fn at(self, node: &dyn Node) -> VisitError {
        VisitError {
            kind: self,
            origin: Origin::of(node),
        }
    }
}

/// Error raised while visiting the tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct VisitError {
    pub kind: VisitErrorKind,
    pub origin: Origin,
}

impl VisitError {
    /// Print this error as a diagnostic of the traversal called `visitor`.
    pub fn report(&self, visitor: &str, io: &mut dyn Io) {
        match &self.origin.lexeme {
            Some(lexeme) => writeln!(
                io,
                "{} error at {} token {} in node {}:",
                visitor,
                lexeme.position(),
                lexeme,
                self.origin.kind
            ),
            None => writeln!(
                io,
                "{} error at <runtime generated code> in node {}:",
                visitor, self.origin.kind
            ),
        }
        writeln!(io, "{}", self.kind);
    }
}

/// The interpreter stopped at its first error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("execution aborted: {0}")]
pub struct Aborted(#[source] pub VisitError);
