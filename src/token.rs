use std::fmt;

use serde::Serialize;

/// Source location for error reporting.
///
/// Both fields are 1-based; `column` counts code points, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// Reserved word (`int`, `if`, `System`, ...).
    Keyword,
    Identifier,
    /// Integer literal (`42`).
    Integer,
    /// Decimal literal (`3.14`).
    Decimal,
    /// Double-quoted string literal, quotes included in the lexeme.
    String,
    /// Single-quoted char literal, quotes included in the lexeme.
    Char,

    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,

    /// `=`
    Assign,
    /// `+=`
    PlusAssign,
    /// `-=`
    MinusAssign,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    /// `++`
    Increment,
    /// `--`
    Decrement,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `!`
    Not,

    /// Line (`// ...`) or block (`/* ... */`) comment.
    Comment,
    /// Character no rule matched; paired with a `LexError`.
    Error,
    /// End of input. Always the last token.
    Eof,
}

impl TokenKind {
    /// Tokens the parser steps over without treating them as grammar symbols.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Comment | Self::Error)
    }

    /// Human-readable name used in diagnostics.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Identifier => "identifier",
            Self::Integer => "integer literal",
            Self::Decimal => "decimal literal",
            Self::String => "string literal",
            Self::Char => "char literal",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Semicolon => "';'",
            Self::Comma => "','",
            Self::Dot => "'.'",
            Self::Assign => "'='",
            Self::PlusAssign => "'+='",
            Self::MinusAssign => "'-='",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Equal => "'=='",
            Self::NotEqual => "'!='",
            Self::Greater => "'>'",
            Self::Less => "'<'",
            Self::GreaterEqual => "'>='",
            Self::LessEqual => "'<='",
            Self::Increment => "'++'",
            Self::Decrement => "'--'",
            Self::And => "'&&'",
            Self::Or => "'||'",
            Self::Not => "'!'",
            Self::Comment => "comment",
            Self::Error => "invalid character",
            Self::Eof => "end of input",
        }
    }
}

/// A single token with its kind, source text, and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source slice covered by the token. Empty for `Eof`.
    pub text: String,
    #[serde(flatten)]
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, text: String, span: Span) -> Self {
        Self { kind, text, span }
    }

    /// Whether this is the given keyword or identifier spelling.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self.kind, TokenKind::Keyword | TokenKind::Identifier) && self.text == word
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "EOF at {}", self.span),
            _ => write!(f, "{:?}({}) at {}", self.kind, self.text, self.span),
        }
    }
}
