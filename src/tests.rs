// src/tests.rs

// Crate-level tests exercising the public API: the pull lexer itself,
// signature rendering, and the serialized record shape. Shape-detection
// edge cases live next to the builder in src/signature/tests.rs.

use crate::{parse, Keyword, StatementKind, Token, Tokenizer, TokenKind};
use test_log::test;

// Helper collecting every token of `sql` through the iterator adaptor,
// which drives the same single pass as scan()/token().
fn tokenize(sql: &str) -> Vec<Token<'_>> {
    Tokenizer::new(sql).collect()
}

fn kinds(sql: &str) -> Vec<TokenKind> {
    tokenize(sql).into_iter().map(|token| token.kind).collect()
}

// --- Tokenizer: basic classification ---

#[test]
fn test_empty_input_yields_no_tokens() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("  \t\r\n ").is_empty());
}

#[test]
fn test_keywords_and_identifiers() {
    assert_eq!(
        kinds("SELECT price FROM orders"),
        vec![
            TokenKind::Keyword(Keyword::Select),
            TokenKind::Ident,
            TokenKind::Keyword(Keyword::From),
            TokenKind::Ident,
        ]
    );
}

#[test]
fn test_keyword_classification_preserves_source_casing() {
    let tokens = tokenize("sElEcT");
    assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Select));
    assert_eq!(tokens[0].text, "sElEcT");
}

#[test]
fn test_runs_with_digit_underscore_or_dollar_are_never_keywords() {
    // Identifier-shaped runs that are not pure letter runs skip keyword
    // lookup entirely.
    assert_eq!(kinds("select1"), vec![TokenKind::Ident]);
    assert_eq!(kinds("select_"), vec![TokenKind::Ident]);
    assert_eq!(kinds("order$"), vec![TokenKind::Ident]);
    assert_eq!(kinds("_select"), vec![TokenKind::Ident]);
}

#[test]
fn test_non_ascii_bytes_continue_identifiers() {
    let tokens = tokenize("über_tabelle");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[0].text, "über_tabelle");
}

#[test]
fn test_token_spans_delimit_the_source() {
    let sql = "SELECT x";
    let tokens = tokenize(sql);
    assert_eq!(tokens[0].start, 0);
    assert_eq!(tokens[0].end, 6);
    assert_eq!(tokens[1].start, 7);
    assert_eq!(tokens[1].end, 8);
    assert_eq!(&sql[tokens[1].start..tokens[1].end], "x");
}

#[test]
fn test_punctuation_tokens() {
    assert_eq!(
        kinds("(a, b);"),
        vec![
            TokenKind::LParen,
            TokenKind::Ident,
            TokenKind::Other,
            TokenKind::Ident,
            TokenKind::RParen,
            TokenKind::Other,
        ]
    );
    assert_eq!(kinds("sch.t"), vec![TokenKind::Ident, TokenKind::Period, TokenKind::Ident]);
}

// --- Tokenizer: numeric literals ---

#[test]
fn test_numbers_consume_full_digit_runs() {
    let tokens = tokenize("123456789012345678901234567890");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].text, "123456789012345678901234567890");
}

#[test]
fn test_numbers_with_fraction_and_exponent() {
    let tokens = tokenize("3.25 1e9 6.02e+23 1E-5");
    let texts: Vec<&str> = tokens.iter().map(|token| token.text).collect();
    assert_eq!(texts, vec!["3.25", "1e9", "6.02e+23", "1E-5"]);
    assert!(tokens.iter().all(|token| token.kind == TokenKind::Number));
}

#[test]
fn test_integer_followed_by_period_stays_separate() {
    // "1." with no fraction digit: the dot joins names, not numbers.
    assert_eq!(kinds("1.x"), vec![TokenKind::Number, TokenKind::Period, TokenKind::Ident]);
}

// --- Tokenizer: quoting conventions ---

#[test]
fn test_quoted_identifiers_strip_delimiters() {
    for sql in ["\"order items\"", "`order items`", "[order items]"] {
        let tokens = tokenize(sql);
        assert_eq!(tokens.len(), 1, "input {:?}", sql);
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].text, "order items");
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].end, sql.len());
    }
}

#[test]
fn test_doubled_quote_inside_double_quoted_identifier() {
    let tokens = tokenize("\"a\"\"b\"");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[0].text, "a\"\"b");
}

#[test]
fn test_string_literals() {
    let tokens = tokenize("'hello'");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "hello");
}

#[test]
fn test_string_escapes_do_not_terminate() {
    // Backslash escape and doubled '' both stay inside the literal.
    let tokens = tokenize(r"'it\'s' x");
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[1].text, "x");

    let tokens = tokenize("'it''s' x");
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "it''s");
    assert_eq!(tokens[1].text, "x");
}

#[test]
fn test_dollar_quoted_strings() {
    let tokens = tokenize("$$plain$$");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "plain");

    let tokens = tokenize("$fn$body with 'quotes' and $$ inside$fn$");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "body with 'quotes' and $$ inside");
}

#[test]
fn test_unmatched_dollar_falls_back_to_other() {
    // No closing delimiter: the '$' alone is Other and scanning resumes,
    // where "tag$" is one identifier run since '$' continues identifiers.
    let tokens = tokenize("$tag$ never closes");
    let texts: Vec<&str> = tokens.iter().map(|token| token.text).collect();
    assert_eq!(texts, vec!["$", "tag$", "never", "closes"]);
    assert_eq!(tokens[0].kind, TokenKind::Other);
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    // Positional parameters are not dollar quotes.
    assert_eq!(kinds("$1"), vec![TokenKind::Other, TokenKind::Number]);
}

// --- Tokenizer: comments ---

#[test]
fn test_line_and_block_comments() {
    assert_eq!(
        kinds("a -- rest of line\nb"),
        vec![TokenKind::Ident, TokenKind::Comment, TokenKind::Ident]
    );
    assert_eq!(
        kinds("a /* block */ b"),
        vec![TokenKind::Ident, TokenKind::Comment, TokenKind::Ident]
    );
}

#[test]
fn test_block_comments_nest() {
    let tokens = tokenize("/* outer /* inner */ still outer */ x");
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].text, "/* outer /* inner */ still outer */");
    assert_eq!(tokens[1].text, "x");
}

#[test]
fn test_lone_slash_and_dash_are_other() {
    assert_eq!(
        kinds("a / b - c"),
        vec![
            TokenKind::Ident,
            TokenKind::Other,
            TokenKind::Ident,
            TokenKind::Other,
            TokenKind::Ident,
        ]
    );
}

// --- Tokenizer: robustness on malformed input ---

#[test]
fn test_unterminated_string_terminates_with_best_effort_token() {
    let tokens = tokenize("SELECT 'abc");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].text, "abc");
}

#[test]
fn test_unterminated_comment_and_quoted_identifier() {
    let tokens = tokenize("/* never closed");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Comment);

    let tokens = tokenize("\"never closed");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Ident);
    assert_eq!(tokens[0].text, "never closed");
}

#[test]
fn test_scan_position_is_monotonic() {
    let mut tokens = Tokenizer::new("SELECT ')' -- x\n FROM 1.5e2 $t$s$t$ [q] t");
    let mut last_end = 0;
    while Tokenizer::scan(&mut tokens) {
        let token = tokens.token();
        assert!(token.end > token.start || token.text.is_empty());
        assert!(token.start >= last_end);
        last_end = token.end;
    }
}

// --- Signature rendering and record shape ---

#[test]
fn test_display_renders_canonical_labels() {
    let cases = [
        ("select * from a", "SELECT FROM a"),
        ("insert into a values (1)", "INSERT INTO a"),
        ("update a set x = 1", "UPDATE a"),
        ("delete from a", "DELETE FROM a"),
    ];
    for (sql, expected) in cases {
        let signature = parse(sql).expect(sql);
        assert_eq!(signature.to_string(), expected);
    }
}

#[test]
fn test_signature_serializes_to_a_stable_record() {
    let signature = parse("SELECT * FROM orders").expect("signature");
    assert_eq!(signature.kind, StatementKind::Select);
    assert_eq!(
        serde_json::to_value(&signature).expect("serialize"),
        serde_json::json!({"kind": "select", "table": "orders"})
    );
}
