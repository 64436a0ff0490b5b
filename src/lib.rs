//! # Introduction
//!
//! minipl lexes, parses, checks and executes programs written in Mini-PL, a
//! small teaching language with integers, strings and booleans, a single
//! global scope, `for` loops, `read`, `print` and `assert`.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → InputBuffer → Lexer → Parser → AST → Analyzer → Interpreter
//! ```
//!
//! 1. [`parser`]: buffered character input, tokenization and a recursive
//!    descent parser with statement-level error recovery.
//! 2. [`interpreter`]: the tree traversal framework, semantic analysis, the
//!    interpreter and the expression printer used by `assert`.
//! 3. [`driver`]: runs the stages in order and stops at the first stage that
//!    reported errors.
//! 4. [`io`]: the injected input/output capability every stage writes
//!    through, with console and in-memory implementations.
//!
//! ## Example
//!
//! ```
//! use minipl::config::Config;
//! use minipl::driver::{run_source, Outcome};
//! use minipl::io::StringIo;
//!
//! let mut io = StringIo::new("");
//! let outcome = run_source(&mut io, "var X : int := 4 + (6 * 2);\nprint X;", &Config::default());
//! assert_eq!(outcome, Ok(Outcome::Completed));
//! assert_eq!(io.output(), "16");
//! ```

pub mod config;
pub mod driver;
pub mod interpreter;
pub mod io;
pub mod parser;
pub mod value;
