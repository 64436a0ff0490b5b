//! `for` loop execution
//!
//! Both bounds are evaluated once before the first iteration and are
//! inclusive. While the body runs the control variable is rebound as an
//! immutable number on every iteration; afterwards it is left mutable and
//! holds one past the last value, or the start value if the body never ran.

use tracing::trace;

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::VisitError;
use crate::interpreter::traversal::{Scoped, Visitor};
use crate::parser::ast::ForLoop;
use crate::value::Value;

impl Interpreter<'_> {
    pub(crate) fn execute_for(&mut self, node: &ForLoop) -> Result<(), VisitError> {
        let (begin, end) = self.loop_bounds(node)?;
        let name = node.control.name();
        trace!(control = name, begin, end, "entering for loop");

        // Counted in i64 so an end bound of i32::MAX still terminates
        let mut i = i64::from(begin);
        while i <= i64::from(end) {
            self.bindings.bind_immutable(name, Value::Number(i as i32));
            if let Err(err) = self.visit_statements(&node.body) {
                self.bindings.set_immutable(name, false);
                return Err(err);
            }
            i += 1;
        }

        // One past i32::MAX wraps, as the arithmetic operators do
        self.bindings.bind(name, Value::Number(i as i32));
        Ok(())
    }
}
