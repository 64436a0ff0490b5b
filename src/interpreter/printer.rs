//! Expression printer
//!
//! Reconstructs the source text of an expression subtree from the lexemes its
//! nodes were built from. Binary expressions are wrapped in parentheses and no
//! whitespace is emitted, so `4 + (6 * 2)` renders as `(4+(6*2))`. A unary
//! operator is followed by its operand's own token only. Used to describe the
//! condition of a failed assertion.

use crate::interpreter::errors::{VisitError, VisitErrorKind};
use crate::interpreter::traversal::{VisitResult, Visitor};
use crate::io::{Io, StringIo};
use crate::parser::ast::*;

pub struct ExpressionPrinter<'a> {
    out: &'a mut dyn Io,
}

impl<'a> ExpressionPrinter<'a> {
    pub fn new(out: &'a mut dyn Io) -> Self {
        Self { out }
    }

    fn token(&mut self, node: &dyn Node) {
        if let Some(lexeme) = node.lexeme() {
            self.out.write(lexeme.text());
        }
    }
}

/// Render an expression subtree as text.
pub fn render(node: &AstNode) -> Result<String, VisitError> {
    let mut out = StringIo::default();
    ExpressionPrinter::new(&mut out).visit(node)?;
    Ok(out.into_output())
}

fn unrenderable(node: &dyn Node) -> VisitResult {
    Err(VisitErrorKind::Unrenderable(node.kind()).at(node))
}

impl Visitor for ExpressionPrinter<'_> {
    const NAME: &'static str = "Printer";

    fn visit_literal(&mut self, node: &Literal) -> VisitResult {
        self.token(node);
        Ok(None)
    }

    fn visit_identifier(&mut self, node: &Identifier) -> VisitResult {
        self.token(node);
        Ok(None)
    }

    fn visit_expression(&mut self, node: &Expression) -> VisitResult {
        let Some(operator) = &node.binary else {
            return self.visit(&node.left);
        };

        self.out.write("(");
        self.visit(&node.left)?;
        self.token(operator);
        self.visit(&operator.right)?;
        self.out.write(")");
        Ok(None)
    }

    fn visit_unary(&mut self, node: &UnaryOperator) -> VisitResult {
        self.token(node);
        self.token(node.operand.as_ref());
        Ok(None)
    }

    fn visit_print(&mut self, node: &Print) -> VisitResult {
        unrenderable(node)
    }

    fn visit_read(&mut self, node: &Read) -> VisitResult {
        unrenderable(node)
    }

    fn visit_assert(&mut self, node: &Assert) -> VisitResult {
        unrenderable(node)
    }

    fn visit_declaration(&mut self, node: &Declaration) -> VisitResult {
        unrenderable(node)
    }

    fn visit_assignment(&mut self, node: &Assignment) -> VisitResult {
        unrenderable(node)
    }

    fn visit_for_loop(&mut self, node: &ForLoop) -> VisitResult {
        unrenderable(node)
    }

    fn visit_statements(&mut self, node: &Statements) -> VisitResult {
        unrenderable(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::{Lexeme, Lexer, TokenKind};
    use crate::parser::reader::{InputBuffer, Position};
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;

    fn render_expression(source: &str) -> String {
        let mut io = StringIo::default();
        let program = {
            let text = format!("print {};", source);
            let input = InputBuffer::from_text(&text, 2).unwrap();
            let mut parser = Parser::new(Lexer::new(input, &mut io));
            parser.parse().unwrap()
        };
        let AstNode::Print(print) = &program.statement else {
            panic!("expected print");
        };
        render(&print.value).unwrap()
    }

    #[test]
    fn test_outputs_node_token() {
        let node = AstNode::Identifier(Identifier {
            lexeme: Lexeme::new(TokenKind::Identifier, "x", Position::default()),
        });
        let mut io = StringIo::default();
        let result = ExpressionPrinter::new(&mut io).visit(&node);
        assert_eq!(result, Ok(None));
        assert_eq!(io.output(), "x");
    }

    #[test]
    fn test_binary_and_grouping() {
        assert_eq!(render_expression("4 + (6 * 2)"), "(4+(6*2))");
        assert_eq!(render_expression("(x = 3)"), "(x=3)");
        assert_eq!(render_expression("\"a\" + b"), "(a+b)");
    }

    #[test]
    fn test_unary_prints_operand_token() {
        assert_eq!(render_expression("!b"), "!b");
        // a grouped operand contributes only its first token
        assert_eq!(render_expression("!(1 = 2)"), "!1");
    }

    #[test]
    fn test_statement_not_renderable() {
        let mut io = StringIo::default();
        let program = {
            let input = InputBuffer::from_text("print 1;", 2).unwrap();
            let mut parser = Parser::new(Lexer::new(input, &mut io));
            parser.parse().unwrap()
        };
        let err = render(&program.statement).unwrap_err();
        assert_eq!(err.to_string(), "PRINT cannot be rendered as an expression");
    }
}
