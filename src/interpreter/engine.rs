// Execution engine for Mini-PL programs

use tracing::{debug, info};

use crate::interpreter::errors::Aborted;
use crate::interpreter::traversal::{Bindings, Scoped, VisitResult, Visitor};
use crate::io::Io;
use crate::parser::ast::*;
use crate::value::Value;

/// The interpreter that executes a Mini-PL program
///
/// Program output goes to the injected [`Io`], which also supplies the
/// characters consumed by `read`. The first semantic or runtime error aborts
/// the run.
pub struct Interpreter<'io> {
    /// Program input and output
    pub(crate) io: &'io mut dyn Io,

    /// Global variables
    pub(crate) bindings: Bindings,

    /// Whether the run was aborted
    errored: bool,
}

impl<'io> Interpreter<'io> {
    pub fn new(io: &'io mut dyn Io) -> Self {
        Interpreter {
            io,
            bindings: Bindings::new(),
            errored: false,
        }
    }

    /// Run the program from start to finish
    ///
    /// The error that stopped execution has already been reported when this
    /// returns `Err`.
    pub fn run(&mut self, program: &Statements) -> Result<(), Aborted> {
        info!("executing program");
        match self.visit_statements(program) {
            Ok(_) => {
                debug!("program finished");
                Ok(())
            }
            Err(err) => {
                self.errored = true;
                err.report(Self::NAME, self.io);
                Err(Aborted(err))
            }
        }
    }

    pub fn errored(&self) -> bool {
        self.errored
    }

    /// Value bound to `name`, if any.
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name).map(|variable| &variable.value)
    }
}

impl Visitor for Interpreter<'_> {
    const NAME: &'static str = "Interpreter";

    fn visit_literal(&mut self, node: &Literal) -> VisitResult {
        Ok(Some(node.value.clone()))
    }

    fn visit_identifier(&mut self, node: &Identifier) -> VisitResult {
        self.resolve(node)
    }

    fn visit_expression(&mut self, node: &Expression) -> VisitResult {
        self.evaluate_expression(node).map(Some)
    }

    fn visit_unary(&mut self, node: &UnaryOperator) -> VisitResult {
        self.evaluate_unary(node).map(Some)
    }

    fn visit_print(&mut self, node: &Print) -> VisitResult {
        self.execute_print(node)?;
        Ok(None)
    }

    fn visit_read(&mut self, node: &Read) -> VisitResult {
        self.execute_read(node)?;
        Ok(None)
    }

    fn visit_assert(&mut self, node: &Assert) -> VisitResult {
        self.execute_assert(node)?;
        Ok(None)
    }

    fn visit_declaration(&mut self, node: &Declaration) -> VisitResult {
        self.declare(node)
    }

    fn visit_assignment(&mut self, node: &Assignment) -> VisitResult {
        self.assign(node)
    }

    fn visit_for_loop(&mut self, node: &ForLoop) -> VisitResult {
        self.execute_for(node)?;
        Ok(None)
    }

    fn visit_statements(&mut self, node: &Statements) -> VisitResult {
        self.execute_block(node)?;
        Ok(None)
    }
}

impl Scoped for Interpreter<'_> {
    fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }
}
