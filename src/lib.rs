//! Lexer, parser, and Python translator for a small subset of Java.
//!
//! The accepted language is a single `public class` holding one
//! `public static void main(String[] args)` method whose body uses
//! primitive declarations, assignments, `if`/`else`, `for`, `while`, and
//! `System.out.println`. A bare list of statements is accepted too.
//!
//! Every stage is total: it always returns a result and collects errors
//! instead of stopping at the first one.
//!
//! # Quick start
//!
//! ```
//! use javabridge::{lex, parse, translate};
//!
//! let source = "int x = 5;\nSystem.out.println(x + 1);";
//! let lexed = lex(source);
//! let parsed = parse(&lexed.tokens);
//! assert!(lexed.errors.is_empty() && parsed.errors.is_empty());
//!
//! let python = translate(&parsed.program, &lexed.tokens);
//! assert_eq!(python, "x = 5\nprint(x + 1)");
//! ```
//!
//! ## Errors travel alongside output
//!
//! ```
//! let analysis = javabridge::analyze("y = 1;");
//! assert!(!analysis.success);
//! assert_eq!(analysis.python, "y = 1");
//! assert!(analysis.diagnostics()[0].to_string().contains("'y' has not been declared"));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod builder;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod translator;

use serde::Serialize;

pub use ast::{
    Assignment, BinaryOp, DataType, Declaration, ElseBranch, ErrorNode, Expr, ForInit,
    ForStatement, IfStatement, Literal, LiteralKind, PrintStatement, Program, Stmt, UnaryOp,
    WhileStatement,
};
pub use lexer::{KEYWORDS, LexError, LexErrorKind, Lexed, is_keyword, lex};
pub use parser::{
    DeclarationInfo, Declarations, MAX_NESTING, ParseError, ParseErrorKind, Parsed, parse,
};
pub use token::{Span, Token, TokenKind};
pub use translator::{HEADER, TranslateOptions, translate, translate_with};

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(e) => e.span,
            Self::Parse(e) => e.span,
        }
    }
}

/// Everything the pipeline produced for one source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// No lexical or syntax errors.
    pub success: bool,
    pub tokens: Vec<Token>,
    pub lexical_errors: Vec<LexError>,
    pub syntax_errors: Vec<ParseError>,
    pub declarations: Declarations,
    pub program: Program,
    /// Generated Python, produced even when errors were found.
    pub python: String,
}

impl Analysis {
    /// Lexical and syntax errors merged in source order.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Error> {
        let mut all: Vec<Error> = self
            .lexical_errors
            .iter()
            .cloned()
            .map(Error::from)
            .chain(self.syntax_errors.iter().cloned().map(Error::from))
            .collect();
        all.sort_by_key(Error::span);
        all
    }
}

/// Lex, parse, and translate `source` in one step.
#[must_use]
pub fn analyze(source: &str) -> Analysis {
    analyze_with(source, &TranslateOptions::default())
}

/// Lex, parse, and translate `source` with the given output options.
#[must_use]
pub fn analyze_with(source: &str, options: &TranslateOptions) -> Analysis {
    let Lexed { tokens, errors } = lex(source);
    let Parsed {
        program,
        errors: syntax_errors,
        declarations,
    } = parse(&tokens);
    let python = translate_with(&program, &tokens, options);

    Analysis {
        success: errors.is_empty() && syntax_errors.is_empty(),
        tokens,
        lexical_errors: errors,
        syntax_errors,
        declarations,
        program,
        python,
    }
}
