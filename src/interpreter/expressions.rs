//! Expression evaluation implementation
//!
//! Operands are evaluated left to right, then the operator is applied through
//! the shared tables in [`ops`](crate::interpreter::ops). Operator errors are
//! attributed to the operator node.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::VisitError;
use crate::interpreter::ops::{binary, unary};
use crate::interpreter::traversal::Visitor;
use crate::parser::ast::{Expression, UnaryOperator};
use crate::value::Value;

impl Interpreter<'_> {
    pub(crate) fn evaluate_expression(&mut self, node: &Expression) -> Result<Value, VisitError> {
        let left = self.evaluate(&node.left)?;
        let Some(operator) = &node.binary else {
            return Ok(left);
        };

        let right = self.evaluate(&operator.right)?;
        binary::apply(operator.operator(), left, right).map_err(|err| err.at(operator))
    }

    pub(crate) fn evaluate_unary(&mut self, node: &UnaryOperator) -> Result<Value, VisitError> {
        let operand = self.evaluate(&node.operand)?;
        unary::apply(node.operator(), operand).map_err(|err| err.at(node))
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::engine::Interpreter;
    use crate::io::StringIo;
    use crate::parser::lexer::Lexer;
    use crate::parser::reader::InputBuffer;
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;

    fn output_of(source: &str) -> String {
        let mut io = StringIo::default();
        let program = {
            let input = InputBuffer::from_text(source, 2).unwrap();
            let mut parser = Parser::new(Lexer::new(input, &mut io));
            parser.parse().unwrap()
        };
        let _ = Interpreter::new(&mut io).run(&program);
        io.into_output()
    }

    #[test]
    fn test_grouping() {
        assert_eq!(output_of("print 4 + (6 * 2);"), "16");
        assert_eq!(output_of("print (4 + 6) * 2;"), "20");
        assert_eq!(output_of("print ((1 - 2) - 3);"), "-4");
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(output_of("print \"ab\" + \"cd\";"), "abcd");
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(output_of("print 1 < 2;"), "true");
        assert_eq!(output_of("print \"b\" < \"a\";"), "false");
        assert_eq!(output_of("print !(1 = 1);"), "false");
    }

    #[test]
    fn test_division_by_zero_aborts() {
        let output = output_of("print 1 / 0;");
        assert_eq!(
            output,
            "Interpreter error at 1:9 token {OPERATOR \"/\"} in node BINARYOPERATOR:\n\
             division by zero\n"
        );
    }
}
