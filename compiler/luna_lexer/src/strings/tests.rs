use luna_diagnostic::{ErrorCode, SyntaxOffset};
use luna_ir::{Dialect, LanguageVersion, ParseOptions, SourceText, SyntaxKind};
use luna_syntax::{GreenToken, TokenValue};
use pretty_assertions::assert_eq;

use crate::{lex_to_end, Lexer, LexerMode};

fn first(text: &str, options: ParseOptions) -> GreenToken {
    let source = SourceText::new(text);
    Lexer::new(&source, &options).lex(LexerMode::Syntax).token
}

fn string_value(token: &GreenToken) -> &str {
    match token.value() {
        Some(TokenValue::String(value)) => value.as_str(),
        other => panic!("expected a string value, got {other:?}"),
    }
}

fn codes(token: &GreenToken) -> Vec<ErrorCode> {
    token.diagnostics().iter().map(|d| d.code()).collect()
}

#[test]
fn simple_escapes() {
    let token = first(r#""a\tb\n\\\"\'""#, ParseOptions::default());
    assert_eq!(token.kind(), SyntaxKind::StringLiteralToken);
    assert_eq!(string_value(&token), "a\tb\n\\\"'");
    assert!(token.diagnostics().is_empty());
}

#[test]
fn numeric_escapes() {
    let token = first(r"'\65\x42\u{263A}\z
        !'", ParseOptions::default());
    assert_eq!(string_value(&token), "AB\u{263A}!");
    assert!(token.diagnostics().is_empty());
}

#[test]
fn escaped_line_break_continues_the_string() {
    let token = first("'a\\\nb'", ParseOptions::default());
    assert_eq!(string_value(&token), "a\nb");
    assert_eq!(token.text(), "'a\\\nb'");
}

#[test]
fn invalid_escape_keeps_going() {
    let token = first(r"'a\qb'", ParseOptions::default());
    assert_eq!(token.kind(), SyntaxKind::StringLiteralToken);
    assert_eq!(token.text(), r"'a\qb'");
    assert_eq!(codes(&token), vec![ErrorCode::InvalidEscape]);
    assert_eq!(token.diagnostics()[0].args(), [r"\q".to_owned()]);
    assert_eq!(token.diagnostics()[0].syntax_offset(), Some(SyntaxOffset::new(2, 2)));
    assert_eq!(string_value(&token), "ab");
}

#[test]
fn decimal_escape_out_of_range() {
    let token = first(r"'\256'", ParseOptions::default());
    assert_eq!(codes(&token), vec![ErrorCode::InvalidEscape]);
}

#[test]
fn extended_escapes_are_version_gated() {
    let lua51 = ParseOptions::default().with_version(LanguageVersion::Lua51);
    let token = first(r"'\x41'", lua51);
    assert_eq!(string_value(&token), "A");
    assert_eq!(codes(&token), vec![ErrorCode::FeatureNotAvailable]);

    let lua52 = ParseOptions::default().with_version(LanguageVersion::Lua52);
    let token = first(r"'\u{41}'", lua52);
    assert_eq!(codes(&token), vec![ErrorCode::FeatureNotAvailable]);
    assert_eq!(token.diagnostics()[0].args()[1], "5.2");
}

#[test]
fn unterminated_short_string_stops_at_line_end() {
    let source = SourceText::new("'abc\nx");
    let tokens = lex_to_end(&source, &ParseOptions::default());
    let string = &tokens[0].token;
    assert_eq!(string.kind(), SyntaxKind::StringLiteralToken);
    assert_eq!(string.text(), "'abc");
    assert_eq!(codes(string), vec![ErrorCode::UnterminatedString]);
    assert_eq!(tokens[1].token.text(), "x");
    assert!(tokens[1].token.has_newline_before());
}

#[test]
fn moonscript_strings_span_lines() {
    let moon = ParseOptions::new(Dialect::MoonScript);
    let token = first("'a\nb'", moon);
    assert_eq!(string_value(&token), "a\nb");
    assert!(token.diagnostics().is_empty());
}

#[test]
fn long_strings() {
    let options = ParseOptions::default();
    let token = first("[[\nline1\r\nline2]]", options);
    assert_eq!(token.kind(), SyntaxKind::StringLiteralToken);
    assert_eq!(string_value(&token), "line1\nline2");

    let token = first("[==[a]]b]==]", options);
    assert_eq!(string_value(&token), "a]]b");
    assert_eq!(token.text(), "[==[a]]b]==]");
}

#[test]
fn unterminated_long_string_reports_its_line() {
    let source = SourceText::new("x =\n[[abc");
    let tokens = lex_to_end(&source, &ParseOptions::default());
    let string = &tokens[2].token;
    assert_eq!(string.text(), "[[abc");
    assert_eq!(codes(string), vec![ErrorCode::UnterminatedLongString]);
    assert_eq!(string.diagnostics()[0].args(), ["2".to_owned()]);
    // The offset counts from the token's full start, before the newline.
    assert_eq!(string.diagnostics()[0].syntax_offset(), Some(SyntaxOffset::new(1, 5)));
    assert_eq!(tokens[3].kind(), SyntaxKind::EndOfFileToken);
}

#[test]
fn invalid_long_bracket() {
    let token = first("[=x", ParseOptions::default());
    assert_eq!(token.kind(), SyntaxKind::BadToken);
    assert_eq!(token.text(), "[=");
    assert_eq!(codes(&token), vec![ErrorCode::InvalidLongBracket]);
}

#[test]
fn interpolated_string_pieces() {
    let source = SourceText::new(r#"x = "a #{b} c""#);
    let tokens = lex_to_end(&source, &ParseOptions::new(Dialect::MoonScript));
    let pieces: Vec<_> = tokens
        .iter()
        .map(|t| (t.kind(), source.slice(t.full_span()).unwrap_or_default().to_owned()))
        .collect();
    assert_eq!(
        pieces,
        vec![
            (SyntaxKind::IdentifierToken, "x ".to_owned()),
            (SyntaxKind::EqualsToken, "= ".to_owned()),
            (SyntaxKind::InterpolatedStringStartToken, "\"".to_owned()),
            (SyntaxKind::InterpolatedStringTextToken, "a ".to_owned()),
            (SyntaxKind::HashOpenBraceToken, "#{".to_owned()),
            (SyntaxKind::IdentifierToken, "b".to_owned()),
            (SyntaxKind::CloseBraceToken, "}".to_owned()),
            (SyntaxKind::InterpolatedStringTextToken, " c".to_owned()),
            (SyntaxKind::InterpolatedStringEndToken, "\"".to_owned()),
            (SyntaxKind::EndOfFileToken, String::new()),
        ]
    );
    assert_eq!(string_value(&tokens[3].token), "a ");
}

#[test]
fn nested_braces_inside_interpolation() {
    let source = SourceText::new(r##""#{ {1} }x""##);
    let tokens = lex_to_end(&source, &ParseOptions::new(Dialect::MoonScript));
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::InterpolatedStringStartToken,
            SyntaxKind::HashOpenBraceToken,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::NumericLiteralToken,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::InterpolatedStringTextToken,
            SyntaxKind::InterpolatedStringEndToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn unterminated_interpolated_string() {
    let source = SourceText::new(r#""a #{b}"#);
    let tokens = lex_to_end(&source, &ParseOptions::new(Dialect::MoonScript));
    let end = &tokens[tokens.len() - 2].token;
    assert_eq!(end.kind(), SyntaxKind::InterpolatedStringEndToken);
    assert!(end.is_missing());
    assert_eq!(codes(end), vec![ErrorCode::UnterminatedString]);
    assert_eq!(tokens[tokens.len() - 1].kind(), SyntaxKind::EndOfFileToken);
}

#[test]
fn lua_has_no_interpolation() {
    let token = first(r#""a #{b}""#, ParseOptions::default());
    assert_eq!(token.kind(), SyntaxKind::StringLiteralToken);
    assert_eq!(string_value(&token), "a #{b}");
}
