//! Statement parsing implementation
//!
//! This module handles parsing of the Mini-PL statement forms:
//!
//! - Output: `print expr`
//! - Input: `read ident`
//! - Checks: `assert ( expr )`
//! - Loops: `for ident in expr .. expr do statements end for`
//! - Assignments: `ident := expr`
//!
//! Declarations live in `declarations`.
//!
//! # Grammar
//!
//! ```text
//! statements ::= (statement ";")*
//! statement  ::= var_decl | print_stmt | read_stmt | assert_stmt
//!              | for_stmt | assignment
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use std::io::Read;

use tracing::trace;

use crate::parser::ast::{self, Assert, Assignment, AstNode, ForLoop, Identifier, Node, Print, Statements};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{PResult, ParseError, Parser};

impl<'io, R: Read> Parser<'io, R> {
    /// Parse `statement ";"` pairs until no statement starts at the current
    /// token. Does not recover; the first error ends the list.
    pub(crate) fn statement_list(&mut self) -> PResult<Option<Statements>> {
        let mut list = Vec::new();
        while let Some(statement) = self.parse_statement()? {
            self.consume(";", TokenKind::Separator)?;
            trace!(kind = %statement.kind(), "parsed statement");
            list.push(statement);
        }
        Ok(Statements::from_list(list))
    }

    /// Parse one statement, or return `None` if the current token cannot
    /// start one.
    pub(crate) fn parse_statement(&mut self) -> PResult<Option<AstNode>> {
        let Some(current) = &self.current else {
            return Ok(None);
        };
        let (kind, text) = (current.kind(), current.text().to_owned());

        let statement = match (kind, text.as_str()) {
            (TokenKind::Keyword, "read") => self.parse_read()?,
            (TokenKind::Keyword, "assert") => self.parse_assert()?,
            (TokenKind::Keyword, "print") => self.parse_print()?,
            (TokenKind::Keyword, "var") => self.parse_declaration()?,
            (TokenKind::Keyword, "for") => self.parse_for_loop()?,
            (TokenKind::Identifier, _) => self.parse_assignment()?,
            _ => return Ok(None),
        };
        Ok(Some(statement))
    }

    fn parse_print(&mut self) -> PResult<AstNode> {
        let lexeme = self.consume("print", TokenKind::Keyword)?;
        let value = self.parse_expression()?;
        Ok(AstNode::Print(Print {
            value: Box::new(value),
            lexeme,
        }))
    }

    fn parse_read(&mut self) -> PResult<AstNode> {
        let lexeme = self.consume("read", TokenKind::Keyword)?;
        let target = self.parse_identifier()?;
        Ok(AstNode::Read(ast::Read { target, lexeme }))
    }

    fn parse_assert(&mut self) -> PResult<AstNode> {
        let lexeme = self.consume("assert", TokenKind::Keyword)?;
        self.consume("(", TokenKind::Separator)?;
        let condition = self.parse_expression()?;
        self.consume(")", TokenKind::Separator)?;
        Ok(AstNode::Assert(Assert {
            condition: Box::new(condition),
            lexeme,
        }))
    }

    fn parse_assignment(&mut self) -> PResult<AstNode> {
        let identifier = self.parse_identifier()?;
        let lexeme = self.consume(":=", TokenKind::Separator)?;
        let value = self.parse_expression()?;
        Ok(AstNode::Assignment(Assignment {
            identifier,
            value: Box::new(value),
            lexeme,
        }))
    }

    /// Parse `for ident in expr .. expr do statements end for`.
    ///
    /// The body recovers from its own syntax errors, but an empty body is an
    /// error of the loop itself.
    fn parse_for_loop(&mut self) -> PResult<AstNode> {
        let lexeme = self.consume("for", TokenKind::Keyword)?;
        let control = self.parse_identifier()?;
        self.consume("in", TokenKind::Keyword)?;
        let begin = self.parse_expression()?;
        self.consume("..", TokenKind::Separator)?;
        let end = self.parse_expression()?;
        self.consume("do", TokenKind::Keyword)?;

        let Some(body) = self.statements() else {
            return Err(ParseError::new(
                "no statements in for loop",
                self.current.clone(),
            ));
        };

        self.consume("end", TokenKind::Keyword)?;
        self.consume("for", TokenKind::Keyword)?;

        Ok(AstNode::ForLoop(ForLoop {
            control,
            begin: Box::new(begin),
            end: Box::new(end),
            body: Box::new(body),
            lexeme,
        }))
    }

    pub(crate) fn parse_identifier(&mut self) -> PResult<Identifier> {
        let lexeme = self.consume_kind(TokenKind::Identifier)?;
        Ok(Identifier { lexeme })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::StringIo;
    use crate::parser::ast::NodeKind;
    use crate::parser::lexer::Lexer;
    use crate::parser::reader::InputBuffer;
    use pretty_assertions::assert_eq;

    fn parse_one(source: &str) -> AstNode {
        let mut io = StringIo::default();
        let input = InputBuffer::from_text(source, 2).unwrap();
        let mut parser = Parser::new(Lexer::new(input, &mut io));
        parser.advance();
        parser.parse_statement().unwrap().unwrap()
    }

    #[test]
    fn test_print() {
        let AstNode::Print(print) = parse_one("print \"hi\"") else {
            panic!("expected print");
        };
        assert_eq!(print.lexeme.text(), "print");
        assert_eq!(print.value.kind(), NodeKind::Expression);
    }

    #[test]
    fn test_read() {
        let AstNode::Read(read) = parse_one("read n") else {
            panic!("expected read");
        };
        assert_eq!(read.target.name(), "n");
    }

    #[test]
    fn test_assignment_anchored_at_separator() {
        let AstNode::Assignment(assignment) = parse_one("x := x + 1") else {
            panic!("expected assignment");
        };
        assert_eq!(assignment.identifier.name(), "x");
        assert_eq!(assignment.lexeme.text(), ":=");
        assert_eq!(assignment.lexeme.position().to_string(), "1:3");
    }

    #[test]
    fn test_nested_for_loops() {
        let source = "for i in 1..2 do for j in 1..2 do print j; end for; end for";
        let AstNode::ForLoop(outer) = parse_one(source) else {
            panic!("expected for loop");
        };
        assert_eq!(outer.control.name(), "i");
        let AstNode::ForLoop(inner) = &outer.body.statement else {
            panic!("expected nested for loop");
        };
        assert_eq!(inner.control.name(), "j");
        assert!(outer.body.tail.is_none());
    }

    #[test]
    fn test_non_statement_token() {
        let mut io = StringIo::default();
        let input = InputBuffer::from_text("123;", 2).unwrap();
        let mut parser = Parser::new(Lexer::new(input, &mut io));
        parser.advance();
        assert_eq!(parser.parse_statement(), Ok(None));
    }
}
