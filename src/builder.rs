//! Constructors for building ASTs by hand.
//!
//! Nodes built here carry a default `Span` of `1:1`.

use crate::ast::{
    Assignment, BinaryOp, DataType, Declaration, ElseBranch, Expr, ForInit, ForStatement,
    IfStatement, Literal, LiteralKind, PrintStatement, Program, Stmt, UnaryOp, WhileStatement,
};
use crate::token::Span;

const ORIGIN: Span = Span::new(1, 1);

impl Program {
    /// Create an empty program for class `class_name`.
    #[must_use]
    pub fn new(class_name: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            args_name: "args".to_string(),
            body: Vec::new(),
        }
    }

    /// Append a statement to the entry body.
    #[must_use]
    pub fn statement(mut self, stmt: Stmt) -> Self {
        self.body.push(stmt);
        self
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new("Main")
    }
}

impl Expr {
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::literal(LiteralKind::Int, &value.to_string())
    }

    /// Decimal literal from its source spelling, e.g. `"2.5"`.
    #[must_use]
    pub fn double(value: &str) -> Self {
        Self::literal(LiteralKind::Double, value)
    }

    /// String literal; `value` is the text between the quotes.
    #[must_use]
    pub fn string(value: &str) -> Self {
        Self::literal(LiteralKind::Str, value)
    }

    /// Char literal; `value` is the text between the quotes.
    #[must_use]
    pub fn char(value: &str) -> Self {
        Self::literal(LiteralKind::Char, value)
    }

    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::literal(LiteralKind::Boolean, if value { "true" } else { "false" })
    }

    #[must_use]
    pub fn literal(kind: LiteralKind, value: &str) -> Self {
        Self::Literal(Literal {
            kind,
            value: value.to_string(),
        })
    }

    #[must_use]
    pub fn ident(name: &str) -> Self {
        Self::Identifier {
            name: name.to_string(),
            span: ORIGIN,
        }
    }

    #[must_use]
    pub fn binary(left: Self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    #[must_use]
    pub fn group(inner: Self) -> Self {
        Self::Group {
            inner: Box::new(inner),
        }
    }
}

impl Stmt {
    /// `data_type name;`
    #[must_use]
    pub fn declare(data_type: DataType, name: &str) -> Self {
        Self::Declaration(Declaration {
            data_type,
            name: name.to_string(),
            value: None,
            span: ORIGIN,
        })
    }

    /// `data_type name = value;`
    #[must_use]
    pub fn declare_init(data_type: DataType, name: &str, value: Expr) -> Self {
        Self::Declaration(Declaration {
            data_type,
            name: name.to_string(),
            value: Some(value),
            span: ORIGIN,
        })
    }

    #[must_use]
    pub fn assign(name: &str, value: Expr) -> Self {
        Self::Assignment(Assignment::new(name, value))
    }

    #[must_use]
    pub fn println(expression: Expr) -> Self {
        Self::Print(PrintStatement {
            expression: Some(expression),
            newline: true,
            span: ORIGIN,
        })
    }

    #[must_use]
    pub fn while_loop(condition: Expr, body: Vec<Self>) -> Self {
        Self::While(WhileStatement {
            condition,
            body,
            span: ORIGIN,
        })
    }
}

impl Assignment {
    #[must_use]
    pub fn new(name: &str, value: Expr) -> Self {
        Self {
            name: name.to_string(),
            value,
            span: ORIGIN,
        }
    }

    /// `name = name + step` or `name = name - step` for negative steps.
    #[must_use]
    pub fn step(name: &str, step: i64) -> Self {
        let op = if step < 0 { BinaryOp::Sub } else { BinaryOp::Add };
        Self::new(
            name,
            Expr::binary(Expr::ident(name), op, Expr::int(step.abs())),
        )
    }
}

impl IfStatement {
    #[must_use]
    pub const fn new(condition: Expr, then_body: Vec<Stmt>) -> Self {
        Self {
            condition,
            then_body,
            else_branch: None,
            span: ORIGIN,
        }
    }

    /// Attach `else { body }`.
    #[must_use]
    pub fn otherwise(mut self, body: Vec<Stmt>) -> Self {
        self.else_branch = Some(ElseBranch::Block(body));
        self
    }

    /// Attach `else if`.
    #[must_use]
    pub fn else_if(mut self, next: Self) -> Self {
        self.else_branch = Some(ElseBranch::If(Box::new(next)));
        self
    }
}

impl From<IfStatement> for Stmt {
    fn from(stmt: IfStatement) -> Self {
        Self::If(stmt)
    }
}

impl ForStatement {
    /// `for (int var = start; condition; update) { body }`
    #[must_use]
    pub fn counting(
        var: &str,
        start: Expr,
        condition: Expr,
        update: Assignment,
        body: Vec<Stmt>,
    ) -> Self {
        Self {
            init: ForInit::Declaration(Declaration {
                data_type: DataType::Int,
                name: var.to_string(),
                value: Some(start),
                span: ORIGIN,
            }),
            condition,
            update: Some(update),
            body,
            span: ORIGIN,
        }
    }
}

impl From<ForStatement> for Stmt {
    fn from(stmt: ForStatement) -> Self {
        Self::For(stmt)
    }
}
