use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::token::{Span, Token, TokenKind};

/// Reserved words. Every other identifier-shaped run is an identifier.
pub const KEYWORDS: &[&str] = &[
    "public", "class", "static", "void", "main", "String", "int", "double", "char", "boolean",
    "true", "false", "if", "else", "for", "while", "System", "out", "println",
];

/// Whether `word` is in the reserved-word set.
#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Classifies a lexer error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LexErrorKind {
    /// Character that cannot start any token.
    UnexpectedCharacter,
    /// Double-quoted literal not closed before end of line.
    UnterminatedString,
    /// Single-quoted literal not closed before end of line.
    UnterminatedChar,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter => write!(f, "unexpected character"),
            Self::UnterminatedString => write!(f, "unterminated string literal"),
            Self::UnterminatedChar => write!(f, "unterminated char literal"),
        }
    }
}

/// Error produced during lexing.
///
/// `character` is the offending character, or the opening quote for
/// unterminated literals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} '{character}' at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub character: char,
    pub span: Span,
}

impl LexError {
    /// Description without the location, as shown in report tables.
    #[must_use]
    pub fn description(&self) -> String {
        self.kind.to_string()
    }
}

impl Serialize for LexError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LexError", 5)?;
        state.serialize_field("character", &self.character)?;
        state.serialize_field("line", &self.span.line)?;
        state.serialize_field("column", &self.span.column)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("description", &self.description())?;
        state.end()
    }
}

/// Result of lexing: every token plus every lexical error, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lexed {
    /// Tokens, always terminated by exactly one `Eof`.
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl Lexed {
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Tokenize Java source text.
///
/// Never fails: unknown characters become `Error` tokens with a
/// matching `LexError`, and scanning resumes at the next character.
#[tracing::instrument(skip_all, fields(source_len = input.len()))]
#[must_use]
pub fn lex(input: &str) -> Lexed {
    let lexed = Lexer::new(input).tokenize();
    tracing::debug!(
        tokens = lexed.tokens.len(),
        errors = lexed.errors.len(),
        "lexed source"
    );
    lexed
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    col: usize,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            col: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn tokenize(mut self) -> Lexed {
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' | '\r' | '\n' | '\u{feff}' => self.advance(),
                '/' if self.peek_at(1) == Some('/') => self.read_line_comment(),
                '/' if self.peek_at(1) == Some('*') => self.read_block_comment(),
                '"' => self.read_quoted('"', TokenKind::String, LexErrorKind::UnterminatedString),
                '\'' => self.read_quoted('\'', TokenKind::Char, LexErrorKind::UnterminatedChar),
                c if c.is_ascii_digit() => self.read_number(),
                c if c.is_ascii_alphabetic() || c == '_' => self.read_word(),
                c => self.read_operator(c),
            }
        }

        let eof = Token::new(TokenKind::Eof, String::new(), self.span());
        self.tokens.push(eof);

        Lexed {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    const fn span(&self) -> Span {
        Span::new(self.line, self.col)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize, span: Span) {
        let text = self.input[start..self.pos].to_string();
        self.tokens.push(Token::new(kind, text, span));
    }

    fn push_error(&mut self, kind: LexErrorKind, character: char, span: Span) {
        tracing::debug!(%kind, %character, line = span.line, column = span.column, "lexical error");
        self.errors.push(LexError {
            kind,
            character,
            span,
        });
    }

    fn read_line_comment(&mut self) {
        let (start, span) = (self.pos, self.span());
        self.advance_while(|c| c != '\n');
        self.push(TokenKind::Comment, start, span);
    }

    /// An unterminated block comment runs to end of input without error.
    fn read_block_comment(&mut self) {
        let (start, span) = (self.pos, self.span());
        self.advance(); // skip /
        self.advance(); // skip *
        loop {
            match self.peek() {
                None => break,
                Some('*') if self.peek_at(1) == Some('/') => {
                    self.advance();
                    self.advance();
                    break;
                }
                Some(_) => self.advance(),
            }
        }
        self.push(TokenKind::Comment, start, span);
    }

    fn read_number(&mut self) {
        let (start, span) = (self.pos, self.span());
        self.advance_while(|c| c.is_ascii_digit());

        let kind = if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance(); // skip .
            self.advance_while(|c| c.is_ascii_digit());
            TokenKind::Decimal
        } else {
            TokenKind::Integer
        };
        self.push(kind, start, span);
    }

    /// Quoted literals stop at the closing quote, or at end of line when
    /// unterminated. A backslash escapes the next character on the line.
    fn read_quoted(&mut self, quote: char, kind: TokenKind, unterminated: LexErrorKind) {
        let (start, span) = (self.pos, self.span());
        self.advance(); // skip opening quote

        let closed = loop {
            match self.peek() {
                None | Some('\n') => break false,
                Some('\\') => {
                    self.advance();
                    if self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                Some(c) if c == quote => {
                    self.advance();
                    break true;
                }
                Some(_) => self.advance(),
            }
        };

        self.push(kind, start, span);
        if !closed {
            self.push_error(unterminated, quote, span);
        }
    }

    fn read_word(&mut self) {
        let (start, span) = (self.pos, self.span());
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let kind = if is_keyword(&self.input[start..self.pos]) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.push(kind, start, span);
    }

    fn read_operator(&mut self, ch: char) {
        let (start, span) = (self.pos, self.span());
        let Some((kind, len)) = operator(ch, self.peek_at(1)) else {
            self.advance();
            self.push(TokenKind::Error, start, span);
            self.push_error(LexErrorKind::UnexpectedCharacter, ch, span);
            return;
        };
        for _ in 0..len {
            self.advance();
        }
        self.push(kind, start, span);
    }
}

/// Match the operator or punctuation starting with `ch`, two-character
/// forms first. Returns the kind and its length in characters.
const fn operator(ch: char, next: Option<char>) -> Option<(TokenKind, usize)> {
    let matched = match (ch, next) {
        ('=', Some('=')) => (TokenKind::Equal, 2),
        ('!', Some('=')) => (TokenKind::NotEqual, 2),
        ('>', Some('=')) => (TokenKind::GreaterEqual, 2),
        ('<', Some('=')) => (TokenKind::LessEqual, 2),
        ('+', Some('+')) => (TokenKind::Increment, 2),
        ('-', Some('-')) => (TokenKind::Decrement, 2),
        ('+', Some('=')) => (TokenKind::PlusAssign, 2),
        ('-', Some('=')) => (TokenKind::MinusAssign, 2),
        ('&', Some('&')) => (TokenKind::And, 2),
        ('|', Some('|')) => (TokenKind::Or, 2),
        ('{', _) => (TokenKind::LBrace, 1),
        ('}', _) => (TokenKind::RBrace, 1),
        ('(', _) => (TokenKind::LParen, 1),
        (')', _) => (TokenKind::RParen, 1),
        ('[', _) => (TokenKind::LBracket, 1),
        (']', _) => (TokenKind::RBracket, 1),
        (';', _) => (TokenKind::Semicolon, 1),
        (',', _) => (TokenKind::Comma, 1),
        ('.', _) => (TokenKind::Dot, 1),
        ('=', _) => (TokenKind::Assign, 1),
        ('+', _) => (TokenKind::Plus, 1),
        ('-', _) => (TokenKind::Minus, 1),
        ('*', _) => (TokenKind::Star, 1),
        ('/', _) => (TokenKind::Slash, 1),
        ('%', _) => (TokenKind::Percent, 1),
        ('>', _) => (TokenKind::Greater, 1),
        ('<', _) => (TokenKind::Less, 1),
        ('!', _) => (TokenKind::Not, 1),
        _ => return None,
    };
    Some(matched)
}
