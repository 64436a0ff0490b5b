// AST (Abstract Syntax Tree) definitions for Mini-PL

use std::fmt;

use super::lexer::Lexeme;
use crate::value::Value;

/// Node kind names used in diagnostics
///
/// `Variable` is the umbrella kind of the three value kinds (`Number`,
/// `String`, `Boolean`) and only shows up in "expected type" messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Number,
    String,
    Boolean,
    Identifier,
    TypeName,
    Print,
    Variable,
    Assert,
    Read,
    Declaration,
    Assignment,
    ForLoop,
    Expression,
    BinaryOperator,
    UnaryOperator,
    Statement,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Number => "NUMBER",
            NodeKind::String => "STRING",
            NodeKind::Boolean => "BOOLEAN",
            NodeKind::Identifier => "IDENTIFIER",
            NodeKind::TypeName => "TYPENAME",
            NodeKind::Print => "PRINT",
            NodeKind::Variable => "VARIABLE",
            NodeKind::Assert => "ASSERT",
            NodeKind::Read => "READ",
            NodeKind::Declaration => "DECLARATION",
            NodeKind::Assignment => "ASSIGNMENT",
            NodeKind::ForLoop => "FORLOOP",
            NodeKind::Expression => "EXPRESSION",
            NodeKind::BinaryOperator => "BINARYOPERATOR",
            NodeKind::UnaryOperator => "UNARYOPERATOR",
            NodeKind::Statement => "STATEMENT",
        };
        f.write_str(name)
    }
}

/// Common view of every tree node, used to attribute errors.
pub trait Node {
    fn kind(&self) -> NodeKind;

    /// Source token this node was built from, if any.
    fn lexeme(&self) -> Option<&Lexeme>;
}

/// Number or string constant (booleans have no literal syntax).
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
    pub lexeme: Lexeme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub lexeme: Lexeme,
}

impl Identifier {
    pub fn name(&self) -> &str {
        self.lexeme.text()
    }
}

/// Type name in a declaration. Any keyword parses as a type name; only
/// `int`, `string` and `bool` resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeName {
    pub lexeme: Lexeme,
}

impl TypeName {
    pub fn name(&self) -> &str {
        self.lexeme.text()
    }

    /// Value kind named by this type, or `None` for an unknown type name.
    pub fn declared_kind(&self) -> Option<NodeKind> {
        match self.name() {
            "int" => Some(NodeKind::Number),
            "string" => Some(NodeKind::String),
            "bool" => Some(NodeKind::Boolean),
            _ => None,
        }
    }
}

/// Operator and right operand of a binary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperator {
    pub right: Box<AstNode>,
    pub lexeme: Lexeme,
}

impl BinaryOperator {
    pub fn operator(&self) -> &str {
        self.lexeme.text()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperator {
    pub operand: Box<AstNode>,
    pub lexeme: Lexeme,
}

impl UnaryOperator {
    pub fn operator(&self) -> &str {
        self.lexeme.text()
    }
}

/// Operand with an optional binary tail; the lexeme is the first token of the
/// left operand (an opening parenthesis for grouped operands).
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub left: Box<AstNode>,
    pub binary: Option<BinaryOperator>,
    pub lexeme: Lexeme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    pub value: Box<AstNode>,
    pub lexeme: Lexeme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Read {
    pub target: Identifier,
    pub lexeme: Lexeme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assert {
    pub condition: Box<AstNode>,
    pub lexeme: Lexeme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub identifier: Identifier,
    pub type_name: TypeName,
    pub init: Option<Box<AstNode>>,
    pub lexeme: Lexeme,
}

/// `ident := expr`; the lexeme is the `:=` separator.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub identifier: Identifier,
    pub value: Box<AstNode>,
    pub lexeme: Lexeme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub control: Identifier,
    pub begin: Box<AstNode>,
    pub end: Box<AstNode>,
    pub body: Box<Statements>,
    pub lexeme: Lexeme,
}

/// Any node that can appear as an operand or a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Literal(Literal),
    Identifier(Identifier),
    Expression(Expression),
    UnaryOperator(UnaryOperator),
    Print(Print),
    Read(Read),
    Assert(Assert),
    Declaration(Declaration),
    Assignment(Assignment),
    ForLoop(ForLoop),
}

/// Right-leaning list of statements: one statement and the rest of the block.
#[derive(Debug, Clone, PartialEq)]
pub struct Statements {
    pub statement: AstNode,
    pub tail: Option<Box<Statements>>,
}

impl Statements {
    /// Chain `list` in order. Returns `None` for an empty list.
    pub fn from_list(list: Vec<AstNode>) -> Option<Self> {
        let mut chain: Option<Box<Statements>> = None;
        for statement in list.into_iter().rev() {
            chain = Some(Box::new(Statements {
                statement,
                tail: chain,
            }));
        }
        chain.map(|head| *head)
    }

    /// Statements of this block in program order.
    pub fn iter(&self) -> StatementsIter<'_> {
        StatementsIter { next: Some(self) }
    }
}

// Unlinks the chain one node at a time so dropping a long program does not
// recurse once per statement.
impl Drop for Statements {
    fn drop(&mut self) {
        let mut tail = self.tail.take();
        while let Some(mut node) = tail {
            tail = node.tail.take();
        }
    }
}

pub struct StatementsIter<'a> {
    next: Option<&'a Statements>,
}

impl<'a> Iterator for StatementsIter<'a> {
    type Item = &'a AstNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.tail.as_deref();
        Some(&current.statement)
    }
}

impl<'a> IntoIterator for &'a Statements {
    type Item = &'a AstNode;
    type IntoIter = StatementsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

macro_rules! impl_node {
    ($($ty:ident => $kind:expr),* $(,)?) => {
        $(
            impl Node for $ty {
                fn kind(&self) -> NodeKind {
                    $kind
                }

                fn lexeme(&self) -> Option<&Lexeme> {
                    Some(&self.lexeme)
                }
            }
        )*
    };
}

impl_node! {
    Identifier => NodeKind::Identifier,
    TypeName => NodeKind::TypeName,
    BinaryOperator => NodeKind::BinaryOperator,
    UnaryOperator => NodeKind::UnaryOperator,
    Expression => NodeKind::Expression,
    Print => NodeKind::Print,
    Read => NodeKind::Read,
    Assert => NodeKind::Assert,
    Declaration => NodeKind::Declaration,
    Assignment => NodeKind::Assignment,
    ForLoop => NodeKind::ForLoop,
}

impl Node for Literal {
    fn kind(&self) -> NodeKind {
        self.value.kind()
    }

    fn lexeme(&self) -> Option<&Lexeme> {
        Some(&self.lexeme)
    }
}

impl Node for Statements {
    fn kind(&self) -> NodeKind {
        NodeKind::Statement
    }

    fn lexeme(&self) -> Option<&Lexeme> {
        None
    }
}

impl AstNode {
    fn as_node(&self) -> &dyn Node {
        match self {
            AstNode::Literal(node) => node,
            AstNode::Identifier(node) => node,
            AstNode::Expression(node) => node,
            AstNode::UnaryOperator(node) => node,
            AstNode::Print(node) => node,
            AstNode::Read(node) => node,
            AstNode::Assert(node) => node,
            AstNode::Declaration(node) => node,
            AstNode::Assignment(node) => node,
            AstNode::ForLoop(node) => node,
        }
    }
}

impl Node for AstNode {
    fn kind(&self) -> NodeKind {
        self.as_node().kind()
    }

    fn lexeme(&self) -> Option<&Lexeme> {
        self.as_node().lexeme()
    }
}
