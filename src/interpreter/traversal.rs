//! Tree traversal framework shared by every pass over the AST
//!
//! [`Visitor`] has one handler per node form and a provided [`Visitor::visit`]
//! that dispatches on [`AstNode`]. A handler returns `Some(value)` for
//! expression-like nodes and `None` for statements.
//!
//! [`Scoped`] adds the variable table that semantic analysis and
//! interpretation both keep, together with the identifier, declaration and
//! assignment rules the two passes have in common.

use rustc_hash::FxHashMap;

use crate::interpreter::errors::{VisitError, VisitErrorKind};
use crate::parser::ast::*;
use crate::value::{FromValue, Value};

pub type VisitResult = Result<Option<Value>, VisitError>;

pub trait Visitor {
    /// Name used in diagnostics ("{NAME} error at ...").
    const NAME: &'static str;

    fn visit_literal(&mut self, node: &Literal) -> VisitResult;
    fn visit_identifier(&mut self, node: &Identifier) -> VisitResult;
    fn visit_expression(&mut self, node: &Expression) -> VisitResult;
    fn visit_unary(&mut self, node: &UnaryOperator) -> VisitResult;
    fn visit_print(&mut self, node: &Print) -> VisitResult;
    fn visit_read(&mut self, node: &Read) -> VisitResult;
    fn visit_assert(&mut self, node: &Assert) -> VisitResult;
    fn visit_declaration(&mut self, node: &Declaration) -> VisitResult;
    fn visit_assignment(&mut self, node: &Assignment) -> VisitResult;
    fn visit_for_loop(&mut self, node: &ForLoop) -> VisitResult;
    fn visit_statements(&mut self, node: &Statements) -> VisitResult;

    fn visit(&mut self, node: &AstNode) -> VisitResult {
        match node {
            AstNode::Literal(n) => self.visit_literal(n),
            AstNode::Identifier(n) => self.visit_identifier(n),
            AstNode::Expression(n) => self.visit_expression(n),
            AstNode::UnaryOperator(n) => self.visit_unary(n),
            AstNode::Print(n) => self.visit_print(n),
            AstNode::Read(n) => self.visit_read(n),
            AstNode::Assert(n) => self.visit_assert(n),
            AstNode::Declaration(n) => self.visit_declaration(n),
            AstNode::Assignment(n) => self.visit_assignment(n),
            AstNode::ForLoop(n) => self.visit_for_loop(n),
        }
    }

    /// Visit `node` and require it to produce a value.
    fn evaluate(&mut self, node: &AstNode) -> Result<Value, VisitError> {
        let result = self.visit(node)?;
        expect_not_null(result, node)
    }

    /// Visit `node` and require it to produce a value of type `T`.
    fn evaluate_as<T: FromValue>(&mut self, node: &AstNode) -> Result<T, VisitError> {
        let value = self.evaluate(node)?;
        expect_kind(value, node)
    }
}

/// Unwrap `value` as `T`, attributing a mismatch to `origin`.
pub fn expect_kind<T: FromValue>(value: Value, origin: &dyn Node) -> Result<T, VisitError> {
    T::from_value(value).map_err(|other| {
        VisitErrorKind::TypeMismatch {
            expected: T::KIND,
            got: other.kind(),
        }
        .at(origin)
    })
}

pub fn expect_null(result: Option<Value>, origin: &dyn Node) -> Result<(), VisitError> {
    match result {
        None => Ok(()),
        Some(value) => Err(VisitErrorKind::UnexpectedValue(value.kind()).at(origin)),
    }
}

pub fn expect_not_null(result: Option<Value>, origin: &dyn Node) -> Result<Value, VisitError> {
    result.ok_or_else(|| VisitErrorKind::MissingValue.at(origin))
}

/// A bound variable: current value plus whether it may be changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub value: Value,
    pub immutable: bool,
}

/// Single global variable table
#[derive(Debug, Default)]
pub struct Bindings {
    variables: FxHashMap<String, Variable>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Variable named by `identifier`, or an undefined-identifier error.
    pub fn lookup(&self, identifier: &Identifier) -> Result<&Variable, VisitError> {
        self.variables.get(identifier.name()).ok_or_else(|| {
            VisitErrorKind::UndefinedIdentifier(identifier.name().to_string()).at(identifier)
        })
    }

    /// Like [`Bindings::lookup`], but the variable must also be mutable.
    pub fn lookup_mutable(&self, identifier: &Identifier) -> Result<&Variable, VisitError> {
        let variable = self.lookup(identifier)?;
        if variable.immutable {
            return Err(
                VisitErrorKind::ImmutableVariable(identifier.name().to_string()).at(identifier)
            );
        }
        Ok(variable)
    }

    /// Bind `name` to a fresh mutable variable, replacing any previous one.
    pub fn bind(&mut self, name: &str, value: Value) {
        self.bind_with(name, value, false);
    }

    pub fn bind_immutable(&mut self, name: &str, value: Value) {
        self.bind_with(name, value, true);
    }

    /// Change the mutability of an existing variable.
    pub fn set_immutable(&mut self, name: &str, immutable: bool) {
        if let Some(variable) = self.variables.get_mut(name) {
            variable.immutable = immutable;
        }
    }

    fn bind_with(&mut self, name: &str, value: Value, immutable: bool) {
        self.variables
            .insert(name.to_string(), Variable { value, immutable });
    }
}

/// A [`Visitor`] that keeps variables.
pub trait Scoped: Visitor {
    fn bindings(&self) -> &Bindings;
    fn bindings_mut(&mut self) -> &mut Bindings;

    /// Current value of an identifier.
    fn resolve(&mut self, node: &Identifier) -> VisitResult {
        let variable = self.bindings().lookup(node)?;
        Ok(Some(variable.value.clone()))
    }

    /// Declare a variable with its zero value or a type-checked initializer.
    fn declare(&mut self, node: &Declaration) -> VisitResult {
        let name = node.identifier.name();
        let unknown_type =
            || VisitErrorKind::UnknownTypeName(node.type_name.name().to_string()).at(&node.type_name);
        let declared = node.type_name.declared_kind().ok_or_else(unknown_type)?;

        if self.bindings().contains(name) {
            return Err(VisitErrorKind::AlreadyDefined(name.to_string()).at(&node.identifier));
        }

        let value = match &node.init {
            None => Value::zero(declared).ok_or_else(unknown_type)?,
            Some(init) => {
                let value = self.evaluate(init)?;
                if value.kind() != declared {
                    return Err(VisitErrorKind::ValueMismatch {
                        name: name.to_string(),
                        declared,
                        value: value.kind(),
                    }
                    .at(&node.identifier));
                }
                value
            }
        };

        self.bindings_mut().bind(name, value);
        Ok(None)
    }

    /// Assign a value of the variable's own type to a mutable variable.
    fn assign(&mut self, node: &Assignment) -> VisitResult {
        let name = node.identifier.name();
        let declared = self.bindings().lookup_mutable(&node.identifier)?.value.kind();

        let value = self.evaluate(&node.value)?;
        if value.kind() != declared {
            return Err(VisitErrorKind::ValueMismatch {
                name: name.to_string(),
                declared,
                value: value.kind(),
            }
            .at(node));
        }

        self.bindings_mut().bind(name, value);
        Ok(None)
    }

    /// Check the parts of a for loop both passes share: the control variable
    /// must be a mutable number and both bounds must be numbers.
    fn loop_bounds(&mut self, node: &ForLoop) -> Result<(i32, i32), VisitError> {
        let control = self.bindings().lookup_mutable(&node.control)?.value.clone();
        expect_kind::<i32>(control, &node.control)?;

        let begin = self.evaluate_as::<i32>(&node.begin)?;
        let end = self.evaluate_as::<i32>(&node.end)?;
        Ok((begin, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::{Lexeme, TokenKind};
    use crate::parser::reader::Position;
    use pretty_assertions::assert_eq;

    fn identifier(name: &str) -> Identifier {
        Identifier {
            lexeme: Lexeme::new(TokenKind::Identifier, name, Position::default()),
        }
    }

    #[test]
    fn test_lookup() {
        let mut bindings = Bindings::new();
        let x = identifier("x");
        assert_eq!(
            bindings.lookup(&x).unwrap_err().to_string(),
            "using undefined identifier x"
        );

        bindings.bind("x", Value::Number(3));
        assert_eq!(bindings.lookup(&x).unwrap().value, Value::Number(3));
        assert!(bindings.lookup_mutable(&x).is_ok());
    }

    #[test]
    fn test_immutability() {
        let mut bindings = Bindings::new();
        let i = identifier("i");
        bindings.bind_immutable("i", Value::Number(0));
        let err = bindings.lookup_mutable(&i).unwrap_err();
        assert_eq!(err.to_string(), "trying to change immutable variable i");
        assert_eq!(err.origin.kind, NodeKind::Identifier);

        bindings.set_immutable("i", false);
        assert!(bindings.lookup_mutable(&i).is_ok());
    }

    #[test]
    fn test_expect_helpers() {
        let x = identifier("x");
        assert_eq!(expect_kind::<bool>(Value::Boolean(true), &x), Ok(true));
        assert_eq!(
            expect_kind::<bool>(Value::Number(5), &x).unwrap_err().to_string(),
            "expected type BOOLEAN, got NUMBER"
        );
        assert!(expect_null(None, &x).is_ok());
        assert_eq!(
            expect_null(Some(Value::Number(1)), &x).unwrap_err().to_string(),
            "return value expected to be null, got NUMBER"
        );
        assert_eq!(
            expect_not_null(None, &x).unwrap_err().to_string(),
            "return value expected not to be null"
        );
    }
}
