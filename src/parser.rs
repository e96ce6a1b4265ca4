use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::ast::{
    Assignment, BinaryOp, DataType, Declaration, ElseBranch, ErrorNode, Expr, ForInit,
    ForStatement, IfStatement, LiteralKind, PrintStatement, Program, Stmt, UnaryOp,
    WhileStatement,
};
use crate::token::{Span, Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// A required token was missing. `expected` names it and its context.
    Expected { expected: &'static str },
    /// Token that cannot start a statement.
    UnrecognizedStatement,
    /// Token that cannot start an expression.
    InvalidExpression,
    /// Second declaration of an existing name.
    Redeclared { name: String },
    /// Use of a name that was never declared.
    Undeclared { name: String },
    /// Tokens after the closing brace of the class.
    TrailingInput,
    /// Expression or block nested deeper than `MAX_NESTING`.
    NestingTooDeep,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected { expected } => write!(f, "expected {expected}"),
            Self::UnrecognizedStatement => write!(f, "unrecognized statement"),
            Self::InvalidExpression => write!(f, "invalid expression"),
            Self::Redeclared { name } => {
                write!(f, "variable '{name}' was already declared")
            }
            Self::Undeclared { name } => {
                write!(f, "variable '{name}' has not been declared")
            }
            Self::TrailingInput => write!(f, "expected end of input after class"),
            Self::NestingTooDeep => {
                write!(f, "nesting exceeds the limit of {MAX_NESTING} levels")
            }
        }
    }
}

/// Error produced during parsing.
///
/// `found` is the lexeme of the offending token (`end of input` at EOF).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}, found '{found}' at line {}, column {}", span.line, span.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub found: String,
    pub span: Span,
}

impl ParseError {
    /// Description without the location, as shown in report tables.
    #[must_use]
    pub fn description(&self) -> String {
        self.kind.to_string()
    }
}

impl Serialize for ParseError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ParseError", 5)?;
        state.serialize_field("found", &self.found)?;
        state.serialize_field("line", &self.span.line)?;
        state.serialize_field("column", &self.span.column)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("description", &self.description())?;
        state.end()
    }
}

/// Declaration site of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeclarationInfo {
    pub data_type: DataType,
    #[serde(flatten)]
    pub span: Span,
}

/// Flat declaration table for the entry procedure, in declaration order.
pub type Declarations = IndexMap<String, DeclarationInfo>;

/// Result of parsing: the program, every syntax error, and the table of
/// declared variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parsed {
    pub program: Program,
    pub errors: Vec<ParseError>,
    pub declarations: Declarations,
}

impl Parsed {
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse a token stream into a `Program`.
///
/// Never fails: mismatches are recorded in `Parsed::errors` and parsing
/// continues. Comment and error tokens are skipped. A stream with no
/// significant tokens yields the empty program without errors.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
#[must_use]
pub fn parse(tokens: &[Token]) -> Parsed {
    let tokens = with_eof(tokens);
    let parsed = Parser::new(&tokens).parse();
    tracing::debug!(
        statements = parsed.program.body.len(),
        errors = parsed.errors.len(),
        declarations = parsed.declarations.len(),
        "parsed program"
    );
    parsed
}

/// Guarantee the stream ends with `Eof` so the cursor never runs off the end.
fn with_eof(tokens: &[Token]) -> Cow<'_, [Token]> {
    if tokens.last().is_some_and(|t| t.kind == TokenKind::Eof) {
        return Cow::Borrowed(tokens);
    }
    let span = tokens.last().map_or(Span::new(1, 1), |t| t.span);
    let mut owned = tokens.to_vec();
    owned.push(Token::new(TokenKind::Eof, String::new(), span));
    Cow::Owned(owned)
}

/// Deepest nesting of blocks, parentheses, unary operators, and binary
/// operands the parser accepts. Keeps recursion within the stack of a
/// spawned thread.
pub const MAX_NESTING: usize = 256;

/// Binary operator levels, loosest first.
const PRECEDENCE: &[&[(TokenKind, BinaryOp)]] = &[
    &[(TokenKind::Or, BinaryOp::Or)],
    &[(TokenKind::And, BinaryOp::And)],
    &[
        (TokenKind::Equal, BinaryOp::Eq),
        (TokenKind::NotEqual, BinaryOp::NotEq),
    ],
    &[
        (TokenKind::Greater, BinaryOp::Gt),
        (TokenKind::Less, BinaryOp::Lt),
        (TokenKind::GreaterEqual, BinaryOp::GtEq),
        (TokenKind::LessEqual, BinaryOp::LtEq),
    ],
    &[(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)],
    &[
        (TokenKind::Star, BinaryOp::Mul),
        (TokenKind::Slash, BinaryOp::Div),
        (TokenKind::Percent, BinaryOp::Rem),
    ],
];

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<ParseError>,
    declarations: Declarations,
    depth: usize,
    too_deep: bool,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            declarations: Declarations::new(),
            depth: 0,
            too_deep: false,
        }
    }

    fn parse(mut self) -> Parsed {
        self.skip_trivia();

        let program = if self.check(TokenKind::Eof) {
            Program::default()
        } else if self.check_word("public") || self.check_word("class") {
            self.parse_class()
        } else {
            self.parse_script()
        };

        Parsed {
            program,
            errors: self.errors,
            declarations: self.declarations,
        }
    }

    // -----------------------------------------------------------
    // Program structure.
    // -----------------------------------------------------------

    /// `public class Name { <main> }`
    fn parse_class(&mut self) -> Program {
        self.expect_word("public", "'public' at start of class");
        self.expect_word("class", "'class' after 'public'");
        let class_name = self
            .expect(TokenKind::Identifier, "class name")
            .map_or_else(|| "Main".to_string(), |t| t.text.clone());
        self.expect(TokenKind::LBrace, "'{' after class name");

        let (args_name, body) = self.parse_main();

        self.expect(TokenKind::RBrace, "'}' at end of class");
        if !self.check(TokenKind::Eof) {
            self.error(ParseErrorKind::TrailingInput);
        }

        Program {
            class_name,
            args_name,
            body,
        }
    }

    /// `public static void main(String[] args) { ... }`
    fn parse_main(&mut self) -> (String, Vec<Stmt>) {
        self.expect_word("public", "'public' before main method");
        self.expect_word("static", "'static' in main method");
        self.expect_word("void", "'void' in main method");
        self.expect_word("main", "'main' as method name");
        self.expect(TokenKind::LParen, "'(' after 'main'");
        self.expect_word("String", "'String' in main parameters");
        self.expect(TokenKind::LBracket, "'[' after 'String'");
        self.expect(TokenKind::RBracket, "']' after '['");
        let args_name = self
            .expect(TokenKind::Identifier, "parameter name")
            .map_or_else(|| "args".to_string(), |t| t.text.clone());
        self.expect(TokenKind::RParen, "')' after main parameters");

        let body = self.parse_block("'{' to open main body", "'}' to close main body");
        (args_name, body)
    }

    /// Bare statement list with no class wrapper.
    fn parse_script(&mut self) -> Program {
        let mut body = Vec::new();
        loop {
            body.extend(self.parse_statements());
            if self.check(TokenKind::Eof) {
                break;
            }
            // stray '}' with nothing to close
            self.error(ParseErrorKind::UnrecognizedStatement);
            self.advance();
        }
        Program {
            body,
            ..Program::default()
        }
    }

    fn parse_block(&mut self, open: &'static str, close: &'static str) -> Vec<Stmt> {
        if !self.enter() {
            self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace);
            return Vec::new();
        }
        self.expect(TokenKind::LBrace, open);
        let body = self.parse_statements();
        self.expect(TokenKind::RBrace, close);
        self.depth -= 1;
        body
    }

    /// Statements up to a closing `}` or end of input.
    fn parse_statements(&mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            let before = self.pos;
            match self.parse_statement() {
                Some(stmt) => stmts.push(stmt),
                None => self.advance(),
            }
            debug_assert!(
                self.pos > before,
                "statement parser stalled at token {}",
                self.tokens[before]
            );
        }

        stmts
    }

    // -----------------------------------------------------------
    // Statements.
    // -----------------------------------------------------------

    fn parse_statement(&mut self) -> Option<Stmt> {
        if let Some(data_type) = self.data_type() {
            return self.parse_declaration(data_type).map(Stmt::Declaration);
        }
        if self.check(TokenKind::Identifier) {
            return self.parse_assignment().map(Stmt::Assignment);
        }
        if self.check_word("if") {
            return Some(Stmt::If(self.parse_if()));
        }
        if self.check_word("for") {
            return self.parse_for().map(Stmt::For);
        }
        if self.check_word("while") {
            return Some(Stmt::While(self.parse_while()));
        }
        if self.check_word("System") {
            return Some(Stmt::Print(self.parse_print()));
        }

        let token = self.current();
        self.error(ParseErrorKind::UnrecognizedStatement);
        self.advance();
        Some(Stmt::Error(ErrorNode {
            text: token.text.clone(),
            span: token.span,
        }))
    }

    /// `<type> name ( = <expr> )? ;` with the current token on the type.
    fn parse_declaration(&mut self, data_type: DataType) -> Option<Declaration> {
        self.advance();
        let ident = self.expect(TokenKind::Identifier, "identifier after type")?;
        self.declare(ident, data_type);

        let value = if self.eat(TokenKind::Assign) {
            Some(self.parse_expression())
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, "';' after declaration");

        Some(Declaration {
            data_type,
            name: ident.text.clone(),
            value,
            span: ident.span,
        })
    }

    /// `name = <expr>;`, `name++;`, `name--;`, `name += <expr>;`, `name -= <expr>;`
    fn parse_assignment(&mut self) -> Option<Assignment> {
        let target = self.current();
        self.check_declared(target);
        self.advance();

        let value = match self.parse_update_value(target, "'=' in assignment") {
            Some(value) => value,
            // nothing left to read a value from
            None if self.check(TokenKind::Semicolon) || self.check(TokenKind::RBrace) => {
                self.error_node()
            }
            None => self.parse_expression(),
        };
        self.expect(TokenKind::Semicolon, "';' after assignment");

        Some(Assignment {
            name: target.text.clone(),
            value,
            span: target.span,
        })
    }

    /// Value assigned by the operator after `target`, desugaring
    /// `++`, `--`, `+=`, `-=` into binary operations on the target.
    fn parse_update_value(&mut self, target: &Token, expected: &'static str) -> Option<Expr> {
        let current = Expr::Identifier {
            name: target.text.clone(),
            span: target.span,
        };
        let one = || Expr::literal(LiteralKind::Int, "1");

        let value = match self.current().kind {
            TokenKind::Assign => {
                self.advance();
                self.parse_expression()
            }
            TokenKind::Increment => {
                self.advance();
                Expr::binary(current, BinaryOp::Add, one())
            }
            TokenKind::Decrement => {
                self.advance();
                Expr::binary(current, BinaryOp::Sub, one())
            }
            TokenKind::PlusAssign => {
                self.advance();
                Expr::binary(current, BinaryOp::Add, self.parse_expression())
            }
            TokenKind::MinusAssign => {
                self.advance();
                Expr::binary(current, BinaryOp::Sub, self.parse_expression())
            }
            _ => {
                self.error(ParseErrorKind::Expected { expected });
                return None;
            }
        };
        Some(value)
    }

    /// `if (<cond>) { ... } ( else if ... | else { ... } )?`
    fn parse_if(&mut self) -> IfStatement {
        let span = self.current().span;
        self.advance();

        self.expect(TokenKind::LParen, "'(' after 'if'");
        let condition = self.parse_expression();
        self.expect(TokenKind::RParen, "')' after if condition");
        let then_body = self.parse_block("'{' to open if block", "'}' to close if block");

        let else_branch = if self.eat_word("else") {
            if self.check_word("if") {
                if self.enter() {
                    let next = self.parse_if();
                    self.depth -= 1;
                    Some(ElseBranch::If(Box::new(next)))
                } else {
                    self.skip_else_chain();
                    None
                }
            } else {
                Some(ElseBranch::Block(self.parse_block(
                    "'{' after 'else'",
                    "'}' to close else block",
                )))
            }
        } else {
            None
        };

        IfStatement {
            condition,
            then_body,
            else_branch,
            span,
        }
    }

    /// `for (<init> <cond>; <update>) { ... }`
    fn parse_for(&mut self) -> Option<ForStatement> {
        let span = self.current().span;
        self.advance();

        self.expect(TokenKind::LParen, "'(' after 'for'");
        let init = if let Some(data_type) = self.data_type() {
            ForInit::Declaration(self.parse_declaration(data_type)?)
        } else if self.check(TokenKind::Identifier) {
            ForInit::Assignment(self.parse_assignment()?)
        } else {
            self.error(ParseErrorKind::Expected {
                expected: "loop variable initializer",
            });
            return None;
        };

        let condition = self.parse_expression();
        self.expect(TokenKind::Semicolon, "';' after for condition");
        let update = self.parse_for_update();
        self.expect(TokenKind::RParen, "')' after for update");
        let body = self.parse_block("'{' to open for body", "'}' to close for body");

        Some(ForStatement {
            init,
            condition,
            update,
            body,
            span,
        })
    }

    /// `name++`, `name--`, `name = <expr>`, `name += <expr>`, `name -= <expr>`
    fn parse_for_update(&mut self) -> Option<Assignment> {
        let target = self.expect(TokenKind::Identifier, "identifier in for update")?;
        self.check_declared(target);
        let value =
            self.parse_update_value(target, "'++', '--', '=', '+=' or '-=' in for update")?;
        Some(Assignment {
            name: target.text.clone(),
            value,
            span: target.span,
        })
    }

    fn parse_while(&mut self) -> WhileStatement {
        let span = self.current().span;
        self.advance();

        self.expect(TokenKind::LParen, "'(' after 'while'");
        let condition = self.parse_expression();
        self.expect(TokenKind::RParen, "')' after while condition");
        let body = self.parse_block("'{' to open while body", "'}' to close while body");

        WhileStatement {
            condition,
            body,
            span,
        }
    }

    /// `System.out.println(<expr>?);` or `System.out.print(<expr>?);`
    fn parse_print(&mut self) -> PrintStatement {
        let span = self.current().span;
        self.advance();

        self.expect(TokenKind::Dot, "'.' after 'System'");
        self.expect_word("out", "'out' after 'System.'");
        self.expect(TokenKind::Dot, "'.' after 'out'");
        let newline = if self.eat_word("println") {
            true
        } else if self.eat_word("print") {
            false
        } else {
            self.error(ParseErrorKind::Expected {
                expected: "'println' or 'print' after 'out.'",
            });
            true
        };

        self.expect(TokenKind::LParen, "'(' after print method");
        let expression = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression())
        };
        self.expect(TokenKind::RParen, "')' after print argument");
        self.expect(TokenKind::Semicolon, "';' after print statement");

        PrintStatement {
            expression,
            newline,
            span,
        }
    }

    // -----------------------------------------------------------
    // Expressions.
    // -----------------------------------------------------------

    fn parse_expression(&mut self) -> Expr {
        if !self.enter() {
            return self.skip_expression();
        }
        let expr = self.parse_binary(0);
        self.depth -= 1;
        expr
    }

    /// Each operator folded into a left-leaning chain counts as one level
    /// of nesting, so long chains are bounded like parentheses.
    fn parse_binary(&mut self, level: usize) -> Expr {
        let Some(ops) = PRECEDENCE.get(level) else {
            return self.parse_unary();
        };

        let outer = self.depth;
        let mut left = self.parse_binary(level + 1);
        while let Some(op) = self.binary_op(ops) {
            if !self.enter() {
                self.skip_expression();
                break;
            }
            self.advance();
            let right = self.parse_binary(level + 1);
            left = Expr::binary(left, op, right);
        }
        self.depth = outer;
        left
    }

    fn binary_op(&self, ops: &[(TokenKind, BinaryOp)]) -> Option<BinaryOp> {
        let kind = self.current().kind;
        ops.iter().find(|(k, _)| *k == kind).map(|&(_, op)| op)
    }

    fn parse_unary(&mut self) -> Expr {
        let op = match self.current().kind {
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_factor(),
        };
        if !self.enter() {
            return self.skip_expression();
        }
        self.advance();
        let operand = self.parse_unary();
        self.depth -= 1;
        Expr::unary(op, operand)
    }

    fn parse_factor(&mut self) -> Expr {
        let token = self.current();
        let text = token.text.as_str();

        let expr = match token.kind {
            TokenKind::Integer => Expr::literal(LiteralKind::Int, text),
            TokenKind::Decimal => Expr::literal(LiteralKind::Double, text),
            TokenKind::Char => Expr::literal(LiteralKind::Char, literal_body(text)),
            TokenKind::String => Expr::literal(LiteralKind::Str, literal_body(text)),
            TokenKind::Keyword if text == "true" || text == "false" => {
                Expr::literal(LiteralKind::Boolean, text)
            }
            TokenKind::Identifier => {
                self.check_declared(token);
                Expr::Identifier {
                    name: token.text.clone(),
                    span: token.span,
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression();
                self.expect(TokenKind::RParen, "')' to close expression");
                return Expr::group(inner);
            }
            _ => {
                self.error(ParseErrorKind::InvalidExpression);
                return self.error_node();
            }
        };

        self.advance();
        expr
    }

    // -----------------------------------------------------------
    // Nesting limit.
    // -----------------------------------------------------------

    /// Enter one level of nesting, or report `NestingTooDeep` when the
    /// limit is reached. The caller restores `depth` when it leaves.
    ///
    /// Reported once per excursion past the limit; the report is re-armed
    /// when the parser is back within half the limit.
    fn enter(&mut self) -> bool {
        if self.depth >= MAX_NESTING {
            if !self.too_deep {
                self.error(ParseErrorKind::NestingTooDeep);
                self.too_deep = true;
            }
            return false;
        }
        if self.depth < MAX_NESTING / 2 {
            self.too_deep = false;
        }
        self.depth += 1;
        true
    }

    /// Skip the rest of an expression that is nested too deeply. Stops
    /// before a `;` or an unmatched closing bracket at the same level.
    fn skip_expression(&mut self) -> Expr {
        let node = self.error_node();
        let mut open = 0usize;
        loop {
            match self.current().kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon if open == 0 => break,
                TokenKind::LParen | TokenKind::LBrace => open += 1,
                TokenKind::RParen | TokenKind::RBrace => {
                    if open == 0 {
                        break;
                    }
                    open -= 1;
                }
                _ => {}
            }
            self.advance();
        }
        node
    }

    /// Skip a bracketed run starting at `open` through its matching `close`.
    /// Does nothing when the current token is not `open`.
    fn skip_balanced(&mut self, open: TokenKind, close: TokenKind) {
        if !self.check(open) {
            return;
        }
        let mut depth = 0usize;
        loop {
            let kind = self.current().kind;
            if kind == TokenKind::Eof {
                return;
            }
            self.advance();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
        }
    }

    /// Skip `if (...) { ... }` and every `else` that follows it.
    fn skip_else_chain(&mut self) {
        loop {
            self.eat_word("if");
            self.skip_balanced(TokenKind::LParen, TokenKind::RParen);
            self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace);
            if !self.eat_word("else") {
                return;
            }
        }
    }

    /// Placeholder expression for the current token.
    fn error_node(&self) -> Expr {
        let token = self.current();
        Expr::Error(ErrorNode {
            text: token.text.clone(),
            span: token.span,
        })
    }

    // -----------------------------------------------------------
    // Declaration table.
    // -----------------------------------------------------------

    /// Record a declaration; a repeated name is an error and the first
    /// binding is kept.
    fn declare(&mut self, ident: &Token, data_type: DataType) {
        if self.declarations.contains_key(&ident.text) {
            self.error_at(
                ParseErrorKind::Redeclared {
                    name: ident.text.clone(),
                },
                ident,
            );
        } else {
            self.declarations.insert(
                ident.text.clone(),
                DeclarationInfo {
                    data_type,
                    span: ident.span,
                },
            );
        }
    }

    fn check_declared(&mut self, ident: &Token) {
        if !self.declarations.contains_key(&ident.text) {
            self.error_at(
                ParseErrorKind::Undeclared {
                    name: ident.text.clone(),
                },
                ident,
            );
        }
    }

    // -----------------------------------------------------------
    // Cursor helpers.
    // -----------------------------------------------------------

    fn current(&self) -> &'a Token {
        &self.tokens[self.pos]
    }

    /// No-op at end of input.
    fn advance(&mut self) {
        if self.current().kind != TokenKind::Eof {
            self.pos += 1;
            self.skip_trivia();
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().kind.is_trivia() {
            self.pos += 1;
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn check_word(&self, word: &str) -> bool {
        self.current().is_word(word)
    }

    fn data_type(&self) -> Option<DataType> {
        let token = self.current();
        if token.kind == TokenKind::Keyword {
            DataType::from_keyword(&token.text)
        } else {
            None
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.advance();
        }
        matched
    }

    fn eat_word(&mut self, word: &str) -> bool {
        let matched = self.check_word(word);
        if matched {
            self.advance();
        }
        matched
    }

    /// Consume a token of `kind`, or record what was expected and leave
    /// the cursor in place.
    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Option<&'a Token> {
        if self.check(kind) {
            let token = self.current();
            self.advance();
            Some(token)
        } else {
            self.error(ParseErrorKind::Expected { expected });
            None
        }
    }

    fn expect_word(&mut self, word: &str, expected: &'static str) -> bool {
        let matched = self.eat_word(word);
        if !matched {
            self.error(ParseErrorKind::Expected { expected });
        }
        matched
    }

    fn error(&mut self, kind: ParseErrorKind) {
        self.error_at(kind, self.current());
    }

    fn error_at(&mut self, kind: ParseErrorKind, token: &Token) {
        let found = if token.kind == TokenKind::Eof {
            TokenKind::Eof.describe().to_string()
        } else {
            token.text.clone()
        };
        tracing::debug!(%kind, %found, line = token.span.line, column = token.span.column, "syntax error");
        self.errors.push(ParseError {
            kind,
            found,
            span: token.span,
        });
    }
}

/// Text between the quotes of a string or char literal. An unterminated
/// literal keeps everything after the opening quote.
fn literal_body(text: &str) -> &str {
    let Some(quote) = text.chars().next() else {
        return text;
    };
    let body = &text[quote.len_utf8()..];
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return &body[..i];
        }
    }
    body
}
