//! Expression parsing implementation
//!
//! Mini-PL expressions have no precedence: an expression is either a unary
//! operator applied to one operand, or an operand optionally followed by one
//! binary operator and a second operand. Anything longer needs parentheses.
//!
//! # Grammar
//!
//! ```text
//! expr    ::= unary_op operand
//!           | operand [binary_op operand]
//! operand ::= "(" expr ")" | number | string | identifier
//! ```
//!
//! A parenthesized operand yields the inner expression node directly.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use std::io::Read;

use crate::parser::ast::{AstNode, BinaryOperator, Expression, Literal, UnaryOperator};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{PResult, ParseError, Parser};
use crate::value::Value;

impl<'io, R: Read> Parser<'io, R> {
    pub(crate) fn parse_expression(&mut self) -> PResult<AstNode> {
        if self.check_kind(TokenKind::Operator) {
            return self.parse_unary();
        }

        let Some(lexeme) = self.current.clone() else {
            return Err(ParseError::new("operand expected", None));
        };
        let left = self.parse_operand()?;

        let binary = if self.check_kind(TokenKind::Operator) {
            let operator = self.consume_kind(TokenKind::Operator)?;
            let right = self.parse_operand()?;
            Some(BinaryOperator {
                right: Box::new(right),
                lexeme: operator,
            })
        } else {
            None
        };

        Ok(AstNode::Expression(Expression {
            left: Box::new(left),
            binary,
            lexeme,
        }))
    }

    fn parse_unary(&mut self) -> PResult<AstNode> {
        let lexeme = self.consume_kind(TokenKind::Operator)?;
        let operand = self.parse_operand()?;
        Ok(AstNode::UnaryOperator(UnaryOperator {
            operand: Box::new(operand),
            lexeme,
        }))
    }

    fn parse_operand(&mut self) -> PResult<AstNode> {
        let Some(current) = &self.current else {
            return Err(ParseError::new("operand expected", None));
        };

        match current.kind() {
            TokenKind::Separator => {
                self.consume("(", TokenKind::Separator)?;
                let inner = self.parse_expression()?;
                self.consume(")", TokenKind::Separator)?;
                Ok(inner)
            }
            TokenKind::Number => {
                let lexeme = self.consume_kind(TokenKind::Number)?;
                // The lexer only emits numbers that fit
                let n = lexeme.text().parse::<i32>().map_err(|_| {
                    ParseError::new("too high constant value", Some(lexeme.clone()))
                })?;
                Ok(AstNode::Literal(Literal {
                    value: Value::Number(n),
                    lexeme,
                }))
            }
            TokenKind::String => {
                let lexeme = self.consume_kind(TokenKind::String)?;
                Ok(AstNode::Literal(Literal {
                    value: Value::String(lexeme.text().to_string()),
                    lexeme,
                }))
            }
            TokenKind::Identifier => Ok(AstNode::Identifier(self.parse_identifier()?)),
            _ => Err(ParseError::new("operand expected", self.current.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::StringIo;
    use crate::parser::ast::{Node, NodeKind};
    use crate::parser::lexer::Lexer;
    use crate::parser::reader::InputBuffer;
    use pretty_assertions::assert_eq;

    fn parse_expr(source: &str) -> PResult<AstNode> {
        let mut io = StringIo::default();
        let input = InputBuffer::from_text(source, 2).unwrap();
        let mut parser = Parser::new(Lexer::new(input, &mut io));
        parser.advance();
        parser.parse_expression()
    }

    #[test]
    fn test_binary_expression() {
        let AstNode::Expression(expr) = parse_expr("4 + (6 * 2)").unwrap() else {
            panic!("expected expression");
        };
        assert_eq!(expr.lexeme.text(), "4");
        assert_eq!(expr.left.kind(), NodeKind::Number);

        let binary = expr.binary.unwrap();
        assert_eq!(binary.operator(), "+");
        // Parenthesized operand is the inner expression itself
        let AstNode::Expression(inner) = *binary.right else {
            panic!("expected grouped expression");
        };
        assert_eq!(inner.binary.map(|b| b.operator().to_string()), Some("*".to_string()));
    }

    #[test]
    fn test_unary_expression() {
        let AstNode::UnaryOperator(unary) = parse_expr("!flag").unwrap() else {
            panic!("expected unary operator");
        };
        assert_eq!(unary.operator(), "!");
        assert_eq!(unary.operand.kind(), NodeKind::Identifier);
    }

    #[test]
    fn test_grouped_expression_anchored_at_paren() {
        let AstNode::Expression(expr) = parse_expr("(1 = 2)").unwrap() else {
            panic!("expected expression");
        };
        assert_eq!(expr.lexeme.text(), "(");
        assert!(expr.binary.is_none());
        assert_eq!(expr.left.kind(), NodeKind::Expression);
    }

    #[test]
    fn test_string_operand() {
        let AstNode::Expression(expr) = parse_expr("\"x\"").unwrap() else {
            panic!("expected expression");
        };
        let AstNode::Literal(literal) = *expr.left else {
            panic!("expected literal");
        };
        assert_eq!(literal.value, Value::String("x".to_string()));
    }

    #[test]
    fn test_operand_expected() {
        let err = parse_expr("").unwrap_err();
        assert_eq!(err.message, "operand expected");
        assert!(err.lexeme.is_none());

        let err = parse_expr("print").unwrap_err();
        assert_eq!(err.message, "operand expected");

        let err = parse_expr(";").unwrap_err();
        assert_eq!(err.message, "expected token {SEPARATOR, \"(\"}");
    }

    #[test]
    fn test_no_chained_binary_operators() {
        let AstNode::Expression(expr) = parse_expr("1 + 2 + 3").unwrap() else {
            panic!("expected expression");
        };
        let binary = expr.binary.unwrap();
        assert_eq!(binary.right.kind(), NodeKind::Number);
    }
}
