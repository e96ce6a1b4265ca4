use std::fmt;

use serde::Serialize;

use crate::token::Span;

/// Complete program: the entry class and the body of its `main` method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    /// Name of the enclosing class (`Main` when absent).
    pub class_name: String,
    /// Name of the `main` parameter (`args` when absent).
    pub args_name: String,
    pub body: Vec<Stmt>,
}

/// Statement inside the entry procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Stmt {
    Declaration(Declaration),
    Assignment(Assignment),
    If(IfStatement),
    For(ForStatement),
    While(WhileStatement),
    Print(PrintStatement),
    /// Token that cannot start a statement.
    Error(ErrorNode),
}

/// `int x;` or `int x = <expr>;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub data_type: DataType,
    pub name: String,
    pub value: Option<Expr>,
    pub span: Span,
}

/// `x = <expr>;` and the desugared forms of `x++`, `x--`, `x += e`, `x -= e`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IfStatement {
    pub condition: Expr,
    pub then_body: Vec<Stmt>,
    pub else_branch: Option<ElseBranch>,
    pub span: Span,
}

/// What follows `else`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ElseBranch {
    /// `else if (...) { ... }`
    If(Box<IfStatement>),
    /// `else { ... }`
    Block(Vec<Stmt>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForStatement {
    pub init: ForInit,
    pub condition: Expr,
    pub update: Option<Assignment>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// Loop variable setup: `int i = 0` or `i = 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ForInit {
    Declaration(Declaration),
    Assignment(Assignment),
}

impl ForInit {
    /// Loop variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Declaration(d) => &d.name,
            Self::Assignment(a) => &a.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhileStatement {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// `System.out.println(...)` or `System.out.print(...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintStatement {
    /// `None` for an empty argument list.
    pub expression: Option<Expr>,
    /// `println` rather than `print`.
    pub newline: bool,
    pub span: Span,
}

/// Placeholder for a token the parser could not use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorNode {
    pub text: String,
    pub span: Span,
}

/// Expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    Binary {
        op: BinaryOp,
        left: Box<Self>,
        right: Box<Self>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Self>,
    },
    /// Parenthesized expression, kept so the output keeps the grouping.
    Group { inner: Box<Self> },
    Literal(Literal),
    Identifier { name: String, span: Span },
    Error(ErrorNode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
    And,
    Or,
}

impl BinaryOp {
    /// Source spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Neg,
}

/// Literal with its source spelling.
///
/// For `Char` and `Str` the value is the text between the quotes with
/// escape sequences left as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Literal {
    pub kind: LiteralKind,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    Int,
    Double,
    Char,
    Str,
    Boolean,
}

/// Declarable primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Int,
    Double,
    Char,
    #[serde(rename = "String")]
    String,
    Boolean,
}

impl DataType {
    /// Map a type keyword to its `DataType`.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "int" => Some(Self::Int),
            "double" => Some(Self::Double),
            "char" => Some(Self::Char),
            "String" => Some(Self::String),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Double => "double",
            Self::Char => "char",
            Self::String => "String",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Expr {
    /// Visit every identifier name referenced by this expression.
    pub fn for_each_identifier<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Self::Binary { left, right, .. } => {
                left.for_each_identifier(f);
                right.for_each_identifier(f);
            }
            Self::Unary { operand, .. } => operand.for_each_identifier(f),
            Self::Group { inner } => inner.for_each_identifier(f),
            Self::Identifier { name, .. } => f(name),
            Self::Literal(_) | Self::Error(_) => {}
        }
    }
}
