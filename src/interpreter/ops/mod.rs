//! Operator tables shared by semantic analysis and interpretation
//!
//! Each submodule offers `result_kind`, which the analyzer uses to type an
//! operation without evaluating it, and `apply`, which the interpreter uses to
//! compute the value. Errors come back as a bare [`VisitErrorKind`]; callers
//! attribute them to the operator node.
//!
//! [`VisitErrorKind`]: crate::interpreter::errors::VisitErrorKind

pub mod binary;
pub mod unary;
