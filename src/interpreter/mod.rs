//! Mini-PL semantic analysis and execution
//!
//! This module provides every pass that walks a parsed program:
//! - [`traversal`]: the [`traversal::Visitor`] trait, variable bindings and the
//!   rules shared between passes
//! - [`analysis`]: static checking that reports every error it finds
//! - [`engine`]: the [`engine::Interpreter`], extended by `statements`,
//!   `expressions` and `loops`
//! - [`printer`]: renders expressions back to source text
//! - [`ops`]: operator tables
//! - [`errors`]: error types shared by all passes
//!
//! # Execution Model
//!
//! All variables live in one global table. The analyzer and the interpreter
//! apply the same rules, but the analyzer substitutes zero values for every
//! computed result and keeps going after an error, while the interpreter
//! stops at the first one.

pub mod analysis;
pub mod engine;
pub mod errors;
mod expressions;
mod loops;
pub mod ops;
pub mod printer;
mod statements;
pub mod traversal;
