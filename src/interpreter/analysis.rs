//! Semantic analysis
//!
//! [`Analyzer`] walks the program once without performing any I/O or
//! arithmetic. Expressions evaluate to the zero value of their result type, so
//! type agreement, operator applicability, declarations, assignments, `read`
//! targets and for-loop control variables are all checked before anything
//! runs.
//!
//! Every statement's error is reported on its own and analysis continues with
//! the next statement, so one run lists all problems in the program.

use tracing::debug;

use crate::interpreter::errors::{VisitError, VisitErrorKind};
use crate::interpreter::ops::{binary, unary};
use crate::interpreter::traversal::{
    expect_kind, expect_null, Bindings, Scoped, VisitResult, Visitor,
};
use crate::io::Io;
use crate::parser::ast::*;
use crate::value::Value;

pub struct Analyzer<'io> {
    io: &'io mut dyn Io,
    bindings: Bindings,
    errored: bool,
}

impl<'io> Analyzer<'io> {
    pub fn new(io: &'io mut dyn Io) -> Self {
        Self {
            io,
            bindings: Bindings::new(),
            errored: false,
        }
    }

    /// Check `program`, reporting every error found.
    ///
    /// Returns true if the program is free of semantic errors.
    pub fn analyze(&mut self, program: &Statements) -> bool {
        if let Err(err) = self.visit_statements(program) {
            self.errored = true;
            err.report(Self::NAME, self.io);
        }
        debug!(errored = self.errored, "semantic analysis finished");
        !self.errored
    }

    pub fn errored(&self) -> bool {
        self.errored
    }
}

/// Placeholder for a value of `kind`.
fn placeholder(kind: NodeKind, origin: &dyn Node) -> Result<Value, VisitError> {
    Value::zero(kind).ok_or_else(|| VisitErrorKind::MissingValue.at(origin))
}

impl Visitor for Analyzer<'_> {
    const NAME: &'static str = "Semantic analysis";

    fn visit_literal(&mut self, node: &Literal) -> VisitResult {
        Ok(Some(node.value.clone()))
    }

    fn visit_identifier(&mut self, node: &Identifier) -> VisitResult {
        self.resolve(node)
    }

    fn visit_expression(&mut self, node: &Expression) -> VisitResult {
        let Some(operator) = &node.binary else {
            return self.evaluate(&node.left).map(Some);
        };

        let left = self.evaluate(&node.left)?;
        let right = self.evaluate(&operator.right)?;
        let kind = binary::result_kind(operator.operator(), left.kind(), right.kind())
            .map_err(|err| err.at(operator))?;
        placeholder(kind, operator).map(Some)
    }

    fn visit_unary(&mut self, node: &UnaryOperator) -> VisitResult {
        let operand = self.evaluate(&node.operand)?;
        let kind = unary::result_kind(node.operator(), operand.kind())
            .map_err(|err| err.at(node))?;
        placeholder(kind, node).map(Some)
    }

    fn visit_print(&mut self, node: &Print) -> VisitResult {
        self.evaluate(&node.value)?;
        Ok(None)
    }

    fn visit_read(&mut self, node: &Read) -> VisitResult {
        let name = node.target.name();
        let kind = self.bindings.lookup_mutable(&node.target)?.value.kind();
        match kind {
            NodeKind::Number | NodeKind::String => {
                let value = placeholder(kind, &node.target)?;
                self.bindings.bind(name, value);
                Ok(None)
            }
            _ => Err(VisitErrorKind::UnreadableType {
                name: name.to_string(),
                kind,
            }
            .at(&node.target)),
        }
    }

    fn visit_assert(&mut self, node: &Assert) -> VisitResult {
        let condition = self.evaluate(&node.condition)?;
        expect_kind::<bool>(condition, node.condition.as_ref())?;
        Ok(None)
    }

    fn visit_declaration(&mut self, node: &Declaration) -> VisitResult {
        self.declare(node)
    }

    fn visit_assignment(&mut self, node: &Assignment) -> VisitResult {
        self.assign(node)
    }

    /// The control variable is immutable while the body is checked, so any
    /// attempt to change it inside the loop is reported.
    fn visit_for_loop(&mut self, node: &ForLoop) -> VisitResult {
        self.loop_bounds(node)?;

        let name = node.control.name();
        self.bindings.set_immutable(name, true);
        let body = self.visit_statements(&node.body);
        self.bindings.set_immutable(name, false);

        expect_null(body?, node.body.as_ref())?;
        Ok(None)
    }

    fn visit_statements(&mut self, node: &Statements) -> VisitResult {
        for statement in node {
            let checked = self
                .visit(statement)
                .and_then(|result| expect_null(result, statement));
            if let Err(err) = checked {
                self.errored = true;
                err.report(Self::NAME, self.io);
            }
        }
        Ok(None)
    }
}

impl Scoped for Analyzer<'_> {
    fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }
}
