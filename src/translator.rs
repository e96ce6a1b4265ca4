//! Code generator that turns a parsed Java program into Python source.
//!
//! Emits one line per statement, four-space indentation by default, and
//! `pass` for every empty block.

use crate::ast::{
    Assignment, BinaryOp, DataType, ElseBranch, Expr, ForInit, ForStatement, IfStatement, Literal,
    LiteralKind, PrintStatement, Program, Stmt, UnaryOp,
};
use crate::token::{Token, TokenKind};

use std::borrow::Cow;

/// Banner emitted when `TranslateOptions::header` is set.
pub const HEADER: &str = "# Translated from Java to Python by javabridge";

/// Python keywords and soft keywords, plus the builtins the output calls.
/// Java names that collide get a trailing `_`.
const PYTHON_RESERVED: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "print", "raise", "range",
    "return", "try", "while", "with", "yield",
];

/// Output settings for the translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Prepend the `HEADER` banner.
    pub header: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            header: false,
        }
    }
}

impl TranslateOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    #[must_use]
    pub const fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

/// Translate `program` to Python with default options.
///
/// Comments found in `tokens` are emitted first, translated to Python
/// comment syntax.
#[must_use]
pub fn translate(program: &Program, tokens: &[Token]) -> String {
    translate_with(program, tokens, &TranslateOptions::default())
}

/// Translate `program` to Python.
///
/// Never fails: error nodes become placeholder comments or `None`.
#[tracing::instrument(skip_all, fields(statements = program.body.len()))]
#[must_use]
pub fn translate_with(program: &Program, tokens: &[Token], options: &TranslateOptions) -> String {
    let mut out = Translator::new(options);

    if options.header {
        out.line(HEADER);
        out.blank();
    }

    let mut has_comments = false;
    for token in tokens.iter().filter(|t| t.kind == TokenKind::Comment) {
        out.line(&translate_comment(&token.text));
        has_comments = true;
    }
    if has_comments {
        out.blank();
    }

    out.body(&program.body);
    out.finish()
}

struct Translator {
    lines: Vec<String>,
    level: usize,
    unit: String,
}

impl Translator {
    fn new(options: &TranslateOptions) -> Self {
        Self {
            lines: Vec::new(),
            level: 0,
            unit: " ".repeat(options.indent_width),
        }
    }

    fn finish(self) -> String {
        debug_assert_eq!(self.level, 0, "unbalanced indentation");
        self.lines.join("\n")
    }

    fn line(&mut self, text: &str) {
        let mut line = self.unit.repeat(self.level);
        line.push_str(text);
        self.lines.push(line);
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn body(&mut self, stmts: &[Stmt]) {
        if stmts.is_empty() {
            self.line("pass");
        }
        for stmt in stmts {
            self.statement(stmt);
        }
    }

    fn indented(&mut self, stmts: &[Stmt]) {
        self.level += 1;
        self.body(stmts);
        self.level -= 1;
    }

    fn statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Declaration(decl) => {
                let value = decl
                    .value
                    .as_ref()
                    .map_or_else(|| default_value(decl.data_type).to_string(), expr);
                self.line(&format!("{} = {value}", python_name(&decl.name)));
            }
            Stmt::Assignment(assign) => self.assignment(assign),
            Stmt::If(stmt) => self.if_chain(stmt, "if"),
            Stmt::For(stmt) => self.for_loop(stmt),
            Stmt::While(stmt) => {
                self.line(&format!("while {}:", expr(&stmt.condition)));
                self.indented(&stmt.body);
            }
            Stmt::Print(stmt) => self.line(&print_call(stmt)),
            Stmt::Error(node) => {
                tracing::debug!(text = %node.text, line = node.span.line, "untranslated statement");
                self.line(&format!("# untranslated statement: {}", node.text));
            }
        }
    }

    fn assignment(&mut self, assign: &Assignment) {
        self.line(&format!(
            "{} = {}",
            python_name(&assign.name),
            expr(&assign.value)
        ));
    }

    fn if_chain(&mut self, stmt: &IfStatement, keyword: &str) {
        self.line(&format!("{keyword} {}:", expr(&stmt.condition)));
        self.indented(&stmt.then_body);

        match &stmt.else_branch {
            Some(ElseBranch::If(next)) => self.if_chain(next, "elif"),
            Some(ElseBranch::Block(body)) => {
                self.line("else:");
                self.indented(body);
            }
            None => {}
        }
    }

    /// Counting loops become `range(start, end[, step])`. Only the
    /// `i < n`, `i <= n`, `i > n`, `i >= n` idiom maps faithfully.
    fn for_loop(&mut self, stmt: &ForStatement) {
        let var = python_name(stmt.init.name());
        let start = match &stmt.init {
            ForInit::Declaration(decl) => decl
                .value
                .as_ref()
                .map_or_else(|| default_value(decl.data_type).to_string(), expr),
            ForInit::Assignment(assign) => expr(&assign.value),
        };
        let end = range_end(&stmt.condition);

        match stmt.update.as_ref().and_then(range_step) {
            Some(step) => self.line(&format!("for {var} in range({start}, {end}, {step}):")),
            None => self.line(&format!("for {var} in range({start}, {end}):")),
        }
        self.indented(&stmt.body);
    }
}

/// Exclusive `range` bound from the loop condition.
fn range_end(condition: &Expr) -> String {
    let Expr::Binary { op, right, .. } = condition else {
        return "0".to_string();
    };
    let bound = expr(right);
    match op {
        BinaryOp::Lt | BinaryOp::Gt => bound,
        BinaryOp::LtEq => format!("{bound} + 1"),
        BinaryOp::GtEq => format!("{bound} - 1"),
        _ => "0".to_string(),
    }
}

/// Explicit `range` step, or `None` for the default step of 1.
fn range_step(update: &Assignment) -> Option<String> {
    let Expr::Binary { op, right, .. } = &update.value else {
        return None;
    };
    let amount = expr(right);
    match op {
        BinaryOp::Sub if is_atom(right) => Some(format!("-{amount}")),
        BinaryOp::Sub => Some(format!("-({amount})")),
        BinaryOp::Add if amount != "1" => Some(amount),
        _ => None,
    }
}

fn print_call(stmt: &PrintStatement) -> String {
    let arg = stmt.expression.as_ref().map(expr).unwrap_or_default();
    match (stmt.newline, arg.is_empty()) {
        (true, _) => format!("print({arg})"),
        (false, true) => "print(end=\"\")".to_string(),
        (false, false) => format!("print({arg}, end=\"\")"),
    }
}

/// Python value for a declaration without initializer.
const fn default_value(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Int => "0",
        DataType::Double => "0.0",
        DataType::Char => "' '",
        DataType::String => "\"\"",
        DataType::Boolean => "False",
    }
}

fn translate_comment(text: &str) -> String {
    if let Some(rest) = text.strip_prefix("//") {
        return format!("#{rest}");
    }
    if text.len() >= 4 && text.starts_with("/*") && text.ends_with("*/") {
        let body = &text[2..text.len() - 2];
        if !body.contains("'''") {
            return format!("'''{body}'''");
        }
    }
    // unterminated, or would close the string early
    text.lines()
        .map(|line| format!("# {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Identifier as it can appear in Python source.
fn python_name(name: &str) -> Cow<'_, str> {
    if PYTHON_RESERVED.contains(&name) {
        Cow::Owned(format!("{name}_"))
    } else {
        Cow::Borrowed(name)
    }
}

fn expr(node: &Expr) -> String {
    match node {
        Expr::Binary { op, left, right } => {
            let parent = precedence(*op);
            let left = operand(left, |child| {
                child < parent || (is_comparison(*op) && child == parent)
            });
            let right = operand(right, |child| child <= parent);
            format!("{left} {} {right}", python_operator(*op))
        }
        Expr::Unary { op, operand } => {
            let inner = match **operand {
                Expr::Binary { .. } => format!("({})", expr(operand)),
                _ => expr(operand),
            };
            match op {
                UnaryOp::Not => format!("not {inner}"),
                UnaryOp::Neg => format!("-{inner}"),
            }
        }
        Expr::Group { inner } => format!("({})", expr(inner)),
        Expr::Literal(lit) => literal(lit),
        Expr::Identifier { name, .. } => python_name(name).into_owned(),
        Expr::Error(node) => {
            tracing::debug!(text = %node.text, line = node.span.line, "untranslated expression");
            "None".to_string()
        }
    }
}

/// Translate a binary operand, adding parentheses when Python would
/// otherwise bind it differently. `needs_parens` receives the operand's
/// precedence.
fn operand(child: &Expr, needs_parens: impl Fn(u8) -> bool) -> String {
    let wrap = match child {
        Expr::Binary { op, .. } => needs_parens(precedence(*op)),
        // `not` binds looser than every Python binary operator
        Expr::Unary {
            op: UnaryOp::Not, ..
        } => true,
        _ => false,
    };
    if wrap {
        format!("({})", expr(child))
    } else {
        expr(child)
    }
}

/// Python binding strength, loosest first. Comparisons share one level.
const fn precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Or => 1,
        BinaryOp::And => 2,
        BinaryOp::Eq
        | BinaryOp::NotEq
        | BinaryOp::Gt
        | BinaryOp::Lt
        | BinaryOp::GtEq
        | BinaryOp::LtEq => 3,
        BinaryOp::Add | BinaryOp::Sub => 4,
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 5,
    }
}

/// Python chains comparisons, so nested comparisons are always wrapped.
const fn is_comparison(op: BinaryOp) -> bool {
    precedence(op) == 3
}

const fn python_operator(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::And => "and",
        BinaryOp::Or => "or",
        BinaryOp::Eq => "==",
        BinaryOp::NotEq => "!=",
        _ => op.as_str(),
    }
}

const fn is_atom(node: &Expr) -> bool {
    matches!(
        node,
        Expr::Literal(_) | Expr::Identifier { .. } | Expr::Group { .. }
    )
}

fn literal(lit: &Literal) -> String {
    match lit.kind {
        LiteralKind::Int | LiteralKind::Double => lit.value.clone(),
        LiteralKind::Char => format!("'{}'", lit.value),
        LiteralKind::Str => format!("\"{}\"", lit.value),
        LiteralKind::Boolean => {
            if lit.value == "true" {
                "True".to_string()
            } else {
                "False".to_string()
            }
        }
    }
}
