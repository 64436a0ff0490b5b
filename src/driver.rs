//! Pipeline driver
//!
//! Runs a program through every stage in order, stopping at the first stage
//! that reported errors:
//!
//! ```text
//! lex all → parse → [semantic analysis] → interpret
//! ```
//!
//! The whole input is tokenized before parsing so every lexical error is
//! reported, even when parsing would have stopped earlier.

use std::io::Read;

use tracing::info;

use crate::config::Config;
use crate::interpreter::analysis::Analyzer;
use crate::interpreter::engine::Interpreter;
use crate::io::Io;
use crate::parser::lexer::Lexer;
use crate::parser::reader::{InputBuffer, ReaderError};
use crate::parser::Parser;

/// How far a run got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The program ran to completion.
    Completed,
    /// Lexical or syntax errors; nothing was analyzed or executed.
    Rejected,
    /// Semantic errors; nothing was executed.
    AnalysisFailed,
    /// Execution stopped at a runtime error.
    Aborted,
}

/// Run the program read from `input`, writing all output and diagnostics to
/// `io`.
pub fn run<R: Read>(io: &mut dyn Io, input: InputBuffer<R>, semantic_analysis: bool) -> Outcome {
    let (program, rejected) = {
        let mut lexer = Lexer::new(input, &mut *io);
        lexer.lex_all();
        let mut parser = Parser::new(lexer);
        let program = parser.parse();
        (program, parser.lexer_errored() || parser.errored())
    };

    let program = match program {
        Some(program) if !rejected => program,
        _ => {
            info!("program rejected by the front end");
            return Outcome::Rejected;
        }
    };

    if semantic_analysis {
        info!("running semantic analysis");
        if !Analyzer::new(&mut *io).analyze(&program) {
            return Outcome::AnalysisFailed;
        }
    }

    let mut interpreter = Interpreter::new(&mut *io);
    match interpreter.run(&program) {
        Ok(()) => Outcome::Completed,
        Err(_) => {
            io.write_line("Interpreter terminated with errors");
            Outcome::Aborted
        }
    }
}

/// Run an in-memory program text with the given configuration.
pub fn run_source(io: &mut dyn Io, source: &str, config: &Config) -> Result<Outcome, ReaderError> {
    let input = InputBuffer::from_text(source, config.window_size)?;
    Ok(run(io, input, config.semantic_analysis))
}
