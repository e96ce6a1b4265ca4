//! Property-based tests with proptest.
//!
//! Arbitrary text must flow through every stage without panicking, and
//! generated well-formed programs must translate without diagnostics.

mod common;

use std::collections::HashMap;

use javabridge::{TokenKind, analyze, lex, parse, translate};
use proptest::prelude::*;

// -- Source strategies --

/// Printable ASCII plus newlines, tabs, a BOM, and one non-ASCII letter.
fn noisy_text() -> impl Strategy<Value = String> {
    "[ -~\\n\\t\\x{FEFF}é]{0,200}"
}

/// Whitespace-separated soup of the tokens the grammar cares about.
fn token_soup() -> impl Strategy<Value = String> {
    let words = vec![
        "public", "class", "static", "void", "main", "String", "[", "]", "args", "int",
        "double", "boolean", "x", "y", "=", "+=", "++", "--", "1", "2.5", "\"s\"", "'c'", "true",
        ";", "{", "}", "(", ")", "if", "else", "for", "while", "System", ".", "out", "println",
        "print", "+", "-", "*", "<", ">=", "==", "&&", "||", "!", "// c\n", "/* c */", "@",
    ];
    prop::collection::vec(prop::sample::select(words), 0..80).prop_map(|v| v.join(" "))
}

/// Arithmetic over the pre-declared `a` and `b`.
fn expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("a".to_string()),
        Just("b".to_string()),
        (0u32..1000).prop_map(|n| n.to_string()),
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!["+", "-", "*", "/", "%"]),
                inner.clone()
            )
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.prop_map(|e| format!("-({e})")),
        ]
    })
}

fn condition() -> impl Strategy<Value = String> {
    let comparison = (
        expr(),
        prop::sample::select(vec!["<", ">", "<=", ">=", "==", "!="]),
        expr(),
    )
        .prop_map(|(l, op, r)| format!("{l} {op} {r}"));
    let leaf = prop_oneof![4 => comparison, 1 => Just("flag".to_string())];
    leaf.prop_recursive(2, 8, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("{l} && {r}")),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("{l} || {r}")),
            inner.prop_map(|c| format!("!({c})")),
        ]
    })
}

fn statement() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        expr().prop_map(|e| format!("a = {e};")),
        expr().prop_map(|e| format!("b += {e};")),
        Just("a++;".to_string()),
        Just("b--;".to_string()),
        condition().prop_map(|c| format!("flag = {c};")),
        expr().prop_map(|e| format!("System.out.println({e});")),
        "[a-z ]{0,12}".prop_map(|s| format!("System.out.println(\"{s}\");")),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        let body = prop::collection::vec(inner, 0..4).prop_map(|v| v.join("\n"));
        prop_oneof![
            (condition(), body.clone()).prop_map(|(c, b)| format!("if ({c}) {{\n{b}\n}}")),
            (condition(), body.clone(), body.clone())
                .prop_map(|(c, t, e)| format!("if ({c}) {{\n{t}\n}} else {{\n{e}\n}}")),
            (condition(), body.clone()).prop_map(|(c, b)| format!("while ({c}) {{\n{b}\n}}")),
            (
                expr(),
                prop::sample::select(vec!["<", "<=", ">", ">="]),
                expr(),
                prop::sample::select(vec!["++", "--", " += 2", " -= 3"]),
                body,
            )
                .prop_map(|(start, cmp, end, update, b)| {
                    format!("for (a = {start}; a {cmp} {end}; a{update}) {{\n{b}\n}}")
                }),
        ]
    })
}

/// A complete, well-formed program.
fn program() -> impl Strategy<Value = String> {
    prop::collection::vec(statement(), 0..6).prop_map(|stmts| {
        let body = format!(
            "int a = 0;\nint b = 1;\nboolean flag = true;\n{}",
            stmts.join("\n")
        );
        common::wrap_main(&body)
    })
}

// -- Helpers --

/// Byte offset of every `line:column` position in `source`, including
/// the position just past the last character.
fn positions(source: &str) -> HashMap<(usize, usize), usize> {
    let mut map = HashMap::new();
    let (mut line, mut column) = (1, 1);
    for (offset, ch) in source.char_indices() {
        map.insert((line, column), offset);
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    map.insert((line, column), source.len());
    map
}

fn is_lexer_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n' | '\u{feff}')
}

// -- Property tests --

proptest! {
    /// The token stream always ends with exactly one `Eof`.
    #[test]
    fn lex_ends_with_single_eof(source in noisy_text()) {
        let lexed = lex(&source);
        let eofs = lexed.tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        prop_assert_eq!(eofs, 1);
        prop_assert_eq!(lexed.tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    /// Tokens appear in source order, each lexeme is the exact slice at
    /// its recorded position, and only whitespace lies between them.
    #[test]
    fn lex_tokens_cover_source(source in noisy_text()) {
        let lexed = lex(&source);
        let positions = positions(&source);
        let mut cursor = 0;

        for token in &lexed.tokens {
            let key = (token.span.line, token.span.column);
            let Some(&offset) = positions.get(&key) else {
                return Err(TestCaseError::fail(format!("no position {key:?} for {token}")));
            };
            prop_assert!(offset >= cursor, "token {} out of order", token);
            prop_assert!(
                source[cursor..offset].chars().all(is_lexer_whitespace),
                "non-whitespace skipped before {}", token
            );
            prop_assert!(source[offset..].starts_with(&token.text), "lexeme mismatch for {}", token);
            cursor = offset + token.text.len();
        }
        prop_assert_eq!(cursor, source.len());
    }

    /// One error token per unexpected character, each with a diagnostic.
    #[test]
    fn lex_error_tokens_match_errors(source in noisy_text()) {
        let lexed = lex(&source);
        let error_tokens = lexed.tokens.iter().filter(|t| t.kind == TokenKind::Error).count();
        let unexpected = lexed
            .errors
            .iter()
            .filter(|e| e.kind == javabridge::LexErrorKind::UnexpectedCharacter)
            .count();
        prop_assert_eq!(error_tokens, unexpected);
    }

    /// Parsing and translating arbitrary text terminate without panicking.
    #[test]
    fn pipeline_total_on_noise(source in noisy_text()) {
        let analysis = analyze(&source);
        prop_assert!(!analysis.python.is_empty());
    }

    /// Same, over inputs made of the language's own tokens.
    #[test]
    fn pipeline_total_on_token_soup(source in token_soup()) {
        let lexed = lex(&source);
        let parsed = parse(&lexed.tokens);
        let python = translate(&parsed.program, &lexed.tokens);
        prop_assert!(!python.is_empty());
    }

    /// Well-formed programs produce no diagnostics and well-indented
    /// Python with one `print` per `println`.
    #[test]
    fn well_formed_programs_translate_cleanly(source in program()) {
        let analysis = analyze(&source);
        prop_assert!(
            analysis.success,
            "diagnostics: {:?}\n--- source ---\n{}", analysis.diagnostics(), source
        );
        prop_assert_eq!(analysis.declarations.len(), 3);

        for line in analysis.python.lines() {
            let indent = line.len() - line.trim_start_matches(' ').len();
            prop_assert_eq!(indent % 4, 0, "bad indent in {:?}", line);
            prop_assert!(!line.trim().is_empty());
        }
        prop_assert!(!analysis.python.contains("None"));
        prop_assert_eq!(
            analysis.python.matches("print(").count(),
            source.matches("System.out.println(").count()
        );
    }
}
