//! Mini-PL source code front end
//!
//! This module transforms program text into an Abstract Syntax Tree (AST):
//! - [`reader`]: Buffered character input with a fixed lookahead window
//! - [`lexer`]: Tokenization (characters → lexemes)
//! - [`parse`]: Parsing (lexemes → AST), extended by `statements`,
//!   `declarations` and `expressions`
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! - Types: `int`, `string`, `bool`
//! - Statements: `var`, assignment, `for .. in .. do .. end for`, `read`,
//!   `print`, `assert`, each terminated by `;`
//! - Expressions: one unary or binary operator per expression, no
//!   precedence, parentheses for nesting
//! - Comments: `// line` and nestable `/* block */`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead and
//! statement-level error recovery. No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod reader;
mod statements;

pub use parse::{ParseError, Parser};
