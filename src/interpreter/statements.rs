//! Statement execution implementation
//!
//! This module handles the execution of the Mini-PL statements that touch the
//! outside world or stop the program:
//!
//! - `print`: writes the value of an expression
//! - `read`: reads one whitespace-delimited token into a variable
//! - `assert`: aborts the run when its condition is false
//! - statement blocks, executed in order until one fails
//!
//! Declarations and assignments follow the rules shared with semantic
//! analysis (see [`Scoped`]); loops live in `loops`.
//!
//! # Implementation
//!
//! All statement execution methods are implemented as `pub(crate)` methods
//! on the [`Interpreter`] struct.
//!
//! [`Scoped`]: crate::interpreter::traversal::Scoped

use tracing::{trace, warn};

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::{VisitError, VisitErrorKind};
use crate::interpreter::printer;
use crate::interpreter::traversal::{expect_null, Visitor};
use crate::parser::ast::{Assert, Node, NodeKind, Print, Read, Statements};
use crate::value::Value;

impl Interpreter<'_> {
    /// Execute every statement of `block` in order, stopping at the first error.
    pub(crate) fn execute_block(&mut self, block: &Statements) -> Result<(), VisitError> {
        for statement in block {
            trace!(kind = %statement.kind(), "executing statement");
            let result = self.visit(statement)?;
            expect_null(result, statement)?;
        }
        Ok(())
    }

    pub(crate) fn execute_print(&mut self, node: &Print) -> Result<(), VisitError> {
        let value = self.evaluate(&node.value)?;
        write!(self.io, "{}", value);
        Ok(())
    }

    /// Read into a number or string variable.
    ///
    /// A number read retries token by token until one parses. If input ends
    /// first, the variable keeps its value.
    pub(crate) fn execute_read(&mut self, node: &Read) -> Result<(), VisitError> {
        let name = node.target.name();
        let kind = self.bindings.lookup_mutable(&node.target)?.value.kind();

        match kind {
            NodeKind::Number => loop {
                let (token, exhausted) = self.read_token();
                if let Ok(n) = token.parse::<i32>() {
                    self.bindings.bind(name, Value::Number(n));
                    break;
                }
                if exhausted {
                    warn!(variable = name, "input ended before an integer was read");
                    break;
                }
                trace!(token = %token, "discarding non-integer input");
            },
            NodeKind::String => {
                let (token, _) = self.read_token();
                self.bindings.bind(name, Value::String(token));
            }
            _ => {
                return Err(VisitErrorKind::UnreadableType {
                    name: name.to_string(),
                    kind,
                }
                .at(&node.target));
            }
        }
        Ok(())
    }

    /// Fail with the rendered condition when it evaluates to false.
    pub(crate) fn execute_assert(&mut self, node: &Assert) -> Result<(), VisitError> {
        if self.evaluate_as::<bool>(&node.condition)? {
            return Ok(());
        }

        let kind = match printer::render(&node.condition) {
            Ok(condition) => VisitErrorKind::AssertionFailed(condition),
            Err(_) => VisitErrorKind::AssertionFailedUnrendered,
        };
        Err(kind.at(node))
    }

    /// Characters up to the next whitespace or the end of input, and whether
    /// input ended.
    fn read_token(&mut self) -> (String, bool) {
        let mut token = String::new();
        loop {
            match self.io.read_char() {
                Some(ch) if ch.is_whitespace() => return (token, false),
                Some(ch) => token.push(ch),
                None => return (token, true),
            }
        }
    }
}
