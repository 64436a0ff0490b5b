//! Declaration parsing implementation
//!
//! This module handles parsing of variable declarations:
//!
//! - Bare declarations: `var x : int`
//! - Initialized declarations: `var x : string := "text"`
//!
//! # Grammar
//!
//! ```text
//! var_decl  ::= "var" identifier ":" type_name [":=" expr]
//! type_name ::= keyword
//! ```
//!
//! Any keyword is accepted as a type name here. Whether it names a real type
//! is decided when the declaration is checked or executed, so `var x : print`
//! is a semantic error rather than a syntax error.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use std::io::Read;

use crate::parser::ast::{AstNode, Declaration, TypeName};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{PResult, Parser};

impl<'io, R: Read> Parser<'io, R> {
    pub(crate) fn parse_declaration(&mut self) -> PResult<AstNode> {
        let lexeme = self.consume("var", TokenKind::Keyword)?;
        let identifier = self.parse_identifier()?;
        self.consume(":", TokenKind::Separator)?;
        let type_name = self.parse_type_name()?;

        let init = if self.check(":=", TokenKind::Separator) {
            self.advance();
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };

        Ok(AstNode::Declaration(Declaration {
            identifier,
            type_name,
            init,
            lexeme,
        }))
    }

    fn parse_type_name(&mut self) -> PResult<TypeName> {
        let lexeme = self.consume_kind(TokenKind::Keyword)?;
        Ok(TypeName { lexeme })
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

    fn parse_declaration(source: &str) -> Declaration {
        let mut io = StringIo::default();
        let input = InputBuffer::from_text(source, 2).unwrap();
        let mut parser = Parser::new(Lexer::new(input, &mut io));
        parser.advance();
        match parser.parse_declaration() {
            Ok(AstNode::Declaration(declaration)) => declaration,
            other => panic!("expected a declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_declaration() {
        let declaration = parse_declaration("var nTimes : int");
        assert_eq!(declaration.identifier.name(), "nTimes");
        assert_eq!(declaration.type_name.declared_kind(), Some(NodeKind::Number));
        assert!(declaration.init.is_none());
    }

    #[test]
    fn test_initialized_declaration() {
        let declaration = parse_declaration("var s : string := \"a\" + \"b\"");
        assert_eq!(declaration.type_name.name(), "string");
        assert!(declaration.init.is_some());
    }

    #[test]
    fn test_any_keyword_is_a_type_name() {
        let declaration = parse_declaration("var a : print");
        assert_eq!(declaration.type_name.name(), "print");
        assert_eq!(declaration.type_name.declared_kind(), None);
    }

    #[test]
    fn test_identifier_type_name_rejected() {
        let mut io = StringIo::default();
        let input = InputBuffer::from_text("var a : b", 2).unwrap();
        let mut parser = Parser::new(Lexer::new(input, &mut io));
        parser.advance();
        let err = parser.parse_declaration().unwrap_err();
        assert_eq!(err.message, "expected token of type KEYWORD");
        assert_eq!(err.lexeme.map(|l| l.text().to_string()), Some("b".to_string()));
    }
}
