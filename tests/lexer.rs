//! Lexer edge cases and error tests.

use javabridge::{LexErrorKind, TokenKind, is_keyword, lex};

fn kinds(input: &str) -> Vec<TokenKind> {
    lex(input).tokens.iter().map(|t| t.kind).collect()
}

// -----------------------------------------------------------
// Basic lexer behaviour.
// -----------------------------------------------------------

#[test]
fn lex_only_whitespace() {
    let lexed = lex("  \t\r\n\n  ");
    assert_eq!(kinds("  \t\r\n\n  "), vec![TokenKind::Eof]);
    assert!(lexed.errors.is_empty());
    assert_eq!(lexed.tokens[0].span.line, 3);
}

#[test]
fn lex_byte_order_mark_is_whitespace() {
    let lexed = lex("\u{feff}int x;");
    assert!(lexed.errors.is_empty());
    assert_eq!(lexed.tokens[0].text, "int");
    assert_eq!(lexed.tokens[0].span.column, 2);
}

#[test]
fn lex_declaration_scenario() {
    let lexed = lex("int x = 5;");
    assert!(lexed.errors.is_empty());
    let pairs: Vec<(TokenKind, &str)> = lexed
        .tokens
        .iter()
        .map(|t| (t.kind, t.text.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (TokenKind::Keyword, "int"),
            (TokenKind::Identifier, "x"),
            (TokenKind::Assign, "="),
            (TokenKind::Integer, "5"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn lex_print_chain() {
    assert_eq!(
        kinds("System.out.println(\"hi\");"),
        vec![
            TokenKind::Keyword,
            TokenKind::Dot,
            TokenKind::Keyword,
            TokenKind::Dot,
            TokenKind::Keyword,
            TokenKind::LParen,
            TokenKind::String,
            TokenKind::RParen,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lex_print_is_not_reserved() {
    assert!(is_keyword("println"));
    assert!(!is_keyword("print"));
    assert_eq!(lex("print").tokens[0].kind, TokenKind::Identifier);
}

#[test]
fn lex_compound_assignment_and_logic() {
    assert_eq!(
        kinds("a += 1; b -= 2; c && !d || e"),
        vec![
            TokenKind::Identifier,
            TokenKind::PlusAssign,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::MinusAssign,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::And,
            TokenKind::Not,
            TokenKind::Identifier,
            TokenKind::Or,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lex_brackets_in_main_signature() {
    let lexed = lex("String[] args");
    assert_eq!(
        lexed.tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Keyword,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

// -----------------------------------------------------------
// Comments.
// -----------------------------------------------------------

#[test]
fn lex_line_comment_stops_at_newline() {
    let lexed = lex("// note\nx");
    assert_eq!(lexed.tokens[0].kind, TokenKind::Comment);
    assert_eq!(lexed.tokens[0].text, "// note");
    assert_eq!(lexed.tokens[1].span.line, 2);
}

#[test]
fn lex_block_comment_spans_lines() {
    let lexed = lex("/* a\nb */ x");
    assert_eq!(lexed.tokens[0].text, "/* a\nb */");
    assert_eq!(lexed.tokens[1].text, "x");
    assert_eq!(lexed.tokens[1].span.line, 2);
    assert_eq!(lexed.tokens[1].span.column, 6);
}

/// Known heuristic: an unterminated block comment swallows the rest of
/// the input and is not reported.
#[test]
fn lex_unterminated_block_comment_runs_to_end() {
    let lexed = lex("int x;\n/* never closed\nint y;");
    assert!(lexed.errors.is_empty());
    let comment = &lexed.tokens[3];
    assert_eq!(comment.kind, TokenKind::Comment);
    assert_eq!(comment.text, "/* never closed\nint y;");
    assert_eq!(lexed.tokens[4].kind, TokenKind::Eof);
}

// -----------------------------------------------------------
// Errors.
// -----------------------------------------------------------

#[test]
fn lex_unexpected_character_scenario() {
    let lexed = lex("int x = 5;\nint y @ = 2;");
    assert_eq!(lexed.errors.len(), 1);
    let err = &lexed.errors[0];
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter);
    assert_eq!(err.character, '@');
    assert_eq!((err.span.line, err.span.column), (2, 7));

    let error_tokens: Vec<_> = lexed
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Error)
        .collect();
    assert_eq!(error_tokens.len(), 1);
    assert_eq!(error_tokens[0].text, "@");
    assert_eq!(error_tokens[0].span, err.span);

    // scanning resumes after the bad character
    let rest: Vec<&str> = lexed.tokens[8..]
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(rest, vec!["=", "2", ";", ""]);
}

#[test]
fn lex_error_display_includes_position() {
    let lexed = lex("  #");
    assert_eq!(
        lexed.errors[0].to_string(),
        "unexpected character '#' at line 1, column 3"
    );
    assert_eq!(lexed.errors[0].description(), "unexpected character");
}

#[test]
fn lex_lone_ampersand_and_pipe() {
    let lexed = lex("a & b | c");
    assert_eq!(lexed.errors.len(), 2);
    assert_eq!(lexed.errors[0].character, '&');
    assert_eq!(lexed.errors[1].character, '|');
}

#[test]
fn lex_non_ascii_counts_code_points() {
    let lexed = lex("é x");
    assert_eq!(lexed.errors.len(), 1);
    assert_eq!(lexed.tokens[0].kind, TokenKind::Error);
    assert_eq!(lexed.tokens[0].text, "é");
    assert_eq!(lexed.tokens[1].text, "x");
    assert_eq!(lexed.tokens[1].span.column, 3);
}

#[test]
fn lex_unterminated_char_stops_at_line_end() {
    let lexed = lex("char c = 'a;\nint y;");
    assert_eq!(lexed.errors.len(), 1);
    assert_eq!(lexed.errors[0].kind, LexErrorKind::UnterminatedChar);
    assert_eq!(lexed.errors[0].character, '\'');

    let literal = lexed
        .tokens
        .iter()
        .find(|t| t.kind == TokenKind::Char)
        .expect("char token");
    assert_eq!(literal.text, "'a;");
    assert!(lexed.tokens.iter().any(|t| t.text == "y"));
}

#[test]
fn lex_errors_serialize_with_location() {
    let lexed = lex("@");
    let json = serde_json::to_value(&lexed.errors[0]).expect("serialize");
    assert_eq!(json["character"], "@");
    assert_eq!(json["line"], 1);
    assert_eq!(json["column"], 1);
    assert_eq!(json["kind"], "unexpected_character");
    assert_eq!(json["description"], "unexpected character");
}
