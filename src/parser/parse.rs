//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, token helpers, error recovery and the main parse
//! entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent parser over the lexer's token stream with
//! the following organization:
//! - This module: Parser struct, helper methods, recovery and coordination
//! - `statements`: statement lists and the statement forms
//! - `declarations`: `var` declarations and type names
//! - `expressions`: expressions and operands
//!
//! # Error Recovery
//!
//! A syntax error is reported through the injected I/O immediately, the tokens
//! up to and including the next `;` are discarded and parsing resumes with the
//! following statement. The error flag is sticky, so a caller can parse the
//! whole program and then decide whether the tree is usable.

use std::io::Read;

use thiserror::Error;
use tracing::{debug, trace};

use crate::parser::ast::Statements;
use crate::parser::lexer::{Lexeme, Lexer, TokenKind};

/// Parser error type
///
/// `lexeme` is the offending token, or `None` when input ended.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub lexeme: Option<Lexeme>,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, lexeme: Option<Lexeme>) -> Self {
        ParseError {
            message: message.into(),
            lexeme,
        }
    }
}

pub(crate) type PResult<T> = Result<T, ParseError>;

/// Recursive descent parser for Mini-PL
pub struct Parser<'io, R> {
    lexer: Lexer<'io, R>,
    pub(crate) current: Option<Lexeme>,
    errored: bool,
}

impl<'io, R: Read> Parser<'io, R> {
    pub fn new(lexer: Lexer<'io, R>) -> Self {
        Self {
            lexer,
            current: None,
            errored: false,
        }
    }

    /// True once any syntax error has been reported.
    pub fn errored(&self) -> bool {
        self.errored
    }

    /// True if the underlying lexer reported a lexical error.
    pub fn lexer_errored(&self) -> bool {
        self.lexer.errored()
    }

    /// Parse the whole token stream into a program.
    ///
    /// Every syntax error is reported on the way. The returned tree is only
    /// meaningful when [`Parser::errored`] is false.
    pub fn parse(&mut self) -> Option<Statements> {
        self.advance();
        let program = self.statements();

        if program.is_none() || self.current.is_some() {
            self.report(&ParseError::new("statement expected", self.current.clone()));
            let _ = self.recover();
            while self.current.is_some() {
                self.report(&ParseError::new("statement expected", self.current.clone()));
                let _ = self.recover();
            }
        }

        debug!(errored = self.errored, "parsing finished");
        program
    }

    /// A statement list that recovers from syntax errors.
    ///
    /// After an error the rest of the list is parsed for further diagnostics;
    /// what it yields replaces the failed list.
    pub(crate) fn statements(&mut self) -> Option<Statements> {
        match self.statement_list() {
            Ok(block) => block,
            Err(err) => {
                self.report(&err);
                self.recover()
            }
        }
    }

    /// Keep parsing statement lists until one completes without an error.
    fn recover(&mut self) -> Option<Statements> {
        loop {
            match self.statement_list() {
                Ok(block) => return block,
                Err(err) => self.report(&err),
            }
        }
    }

    /// Record and print a syntax error, then skip past the next `;`.
    fn report(&mut self, err: &ParseError) {
        self.errored = true;
        trace!(message = %err.message, "syntax error");
        let io = self.lexer.io();
        match &err.lexeme {
            Some(lexeme) => writeln!(
                io,
                "Parser error at {}: {}, got token: {}",
                lexeme.position(),
                err.message,
                lexeme
            ),
            None => writeln!(io, "Parser error at <end of file>: {}, got no token", err.message),
        }
        self.skip_to_next_statement();
    }

    fn skip_to_next_statement(&mut self) {
        while self.current.is_some() && !self.check(";", TokenKind::Separator) {
            self.advance();
        }
        self.advance();
    }

    pub(crate) fn advance(&mut self) {
        self.current = self.lexer.next_lexeme();
    }

    /// True if the current token is `text` of the given kind.
    pub(crate) fn check(&self, text: &str, kind: TokenKind) -> bool {
        self.current.as_ref().is_some_and(|l| l.is(text, kind))
    }

    /// True if the current token is of the given kind.
    pub(crate) fn check_kind(&self, kind: TokenKind) -> bool {
        self.current.as_ref().is_some_and(|l| l.kind() == kind)
    }

    /// Consume a token of the given kind.
    pub(crate) fn consume_kind(&mut self, kind: TokenKind) -> PResult<Lexeme> {
        if !self.check_kind(kind) {
            return Err(ParseError::new(
                format!("expected token of type {}", kind),
                self.current.clone(),
            ));
        }
        self.take_current()
    }

    /// Consume exactly `text` of the given kind.
    pub(crate) fn consume(&mut self, text: &str, kind: TokenKind) -> PResult<Lexeme> {
        if !self.check(text, kind) {
            return Err(ParseError::new(
                format!("expected token {{{}, \"{}\"}}", kind, text),
                self.current.clone(),
            ));
        }
        self.take_current()
    }

    fn take_current(&mut self) -> PResult<Lexeme> {
        let lexeme = self.current.take();
        self.advance();
        lexeme.ok_or_else(|| ParseError::new("unexpected end of input", None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::StringIo;
    use crate::parser::ast::{AstNode, Node, NodeKind};
    use crate::parser::reader::InputBuffer;
    use pretty_assertions::assert_eq;

    /// Parse `source`, returning the tree, the error flag and the diagnostics.
    fn parse_source(source: &str) -> (Option<Statements>, bool, String) {
        let mut io = StringIo::default();
        let (program, errored) = {
            let input = InputBuffer::from_text(source, 2).unwrap();
            let mut parser = Parser::new(Lexer::new(input, &mut io));
            let program = parser.parse();
            (program, parser.errored())
        };
        (program, errored, io.into_output())
    }

    fn assert_syntax_error(source: &str) {
        let (_, errored, output) = parse_source(source);
        assert!(errored, "expected a syntax error in {:?}", source);
        assert!(output.contains("error"), "no diagnostic for {:?}", source);
    }

    #[test]
    fn test_error_flag_false_initially() {
        let mut io = StringIo::default();
        let input = InputBuffer::from_text("", 2).unwrap();
        let parser = Parser::new(Lexer::new(input, &mut io));
        assert!(!parser.errored());
    }

    #[test]
    fn test_empty_program_errors() {
        let (program, errored, output) = parse_source("");
        assert!(program.is_none());
        assert!(errored);
        assert_eq!(
            output,
            "Parser error at <end of file>: statement expected, got no token\n"
        );
    }

    #[test]
    fn test_unexpected_token_type() {
        let (_, errored, output) = parse_source("assert 0;");
        assert!(errored);
        assert!(output.starts_with(
            "Parser error at 1:8: expected token {SEPARATOR, \"(\"}, got token: {NUMBER \"0\"}\n"
        ));
    }

    #[test]
    fn test_syntax_errors() {
        for source in [
            "assert );",
            ";",
            "var X :",
            "assert (1=1);123",
            "print 1;end;print 2;",
            "print ;",
            "for i in 0..1 do end for;",
            "var x : int := ;",
            "print (1 + 2;",
        ] {
            assert_syntax_error(source);
        }
    }

    #[test]
    fn test_recovery_reports_every_statement() {
        let (_, errored, output) = parse_source("print ;\nprint 1;\nvar : int;\nprint 2;");
        assert!(errored);
        assert_eq!(output.lines().count(), 2);
        assert!(output.lines().all(|line| line.starts_with("Parser error at ")));
    }

    #[test]
    fn test_trailing_tokens_reported() {
        let (_, _, output) = parse_source("print 1; 2; 3");
        assert_eq!(
            output,
            "Parser error at 1:10: statement expected, got token: {NUMBER \"2\"}\n\
             Parser error at 1:13: statement expected, got token: {NUMBER \"3\"}\n"
        );
    }

    #[test]
    fn test_simple_program() {
        let (program, errored, output) = parse_source("var X : int := 4 + (6 * 2);\nprint X;");
        assert!(!errored);
        assert_eq!(output, "");
        let program = program.unwrap();
        let kinds: Vec<NodeKind> = program.iter().map(Node::kind).collect();
        assert_eq!(kinds, vec![NodeKind::Declaration, NodeKind::Print]);
    }

    #[test]
    fn test_for_loop_body() {
        let source = "for i in 0..2 do\n  print i;\n  print \" \";\nend for;";
        let (program, errored, _) = parse_source(source);
        assert!(!errored);
        let program = program.unwrap();
        let AstNode::ForLoop(for_loop) = &program.statement else {
            panic!("expected a for loop, got {:?}", program.statement);
        };
        assert_eq!(for_loop.control.name(), "i");
        assert_eq!(for_loop.body.iter().count(), 2);
    }
}
