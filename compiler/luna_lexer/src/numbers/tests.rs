use luna_diagnostic::{ErrorCode, SyntaxOffset};
use luna_ir::{Dialect, Feature, LanguageVersion, ParseOptions, SourceText, SyntaxKind};
use luna_syntax::{GreenToken, TokenValue};
use pretty_assertions::assert_eq;

use crate::{Lexer, LexerMode};

fn number(text: &str, options: ParseOptions) -> GreenToken {
    let source = SourceText::new(text);
    let token = Lexer::new(&source, &options).lex(LexerMode::Syntax).token;
    assert_eq!(token.kind(), SyntaxKind::NumericLiteralToken, "{text}");
    token
}

fn value(text: &str, options: ParseOptions) -> Option<TokenValue> {
    number(text, options).value().cloned()
}

fn codes(token: &GreenToken) -> Vec<ErrorCode> {
    token.diagnostics().iter().map(|d| d.code()).collect()
}

fn lua(version: LanguageVersion) -> ParseOptions {
    ParseOptions::default().with_version(version)
}

#[test]
fn decimal_integers_and_floats() {
    let options = ParseOptions::default();
    assert_eq!(value("42", options), Some(TokenValue::Integer(42)));
    assert_eq!(value("3.", options), Some(TokenValue::Float(3.0)));
    assert_eq!(value(".5", options), Some(TokenValue::Float(0.5)));
    assert_eq!(value("1e3", options), Some(TokenValue::Float(1000.0)));
    assert_eq!(value("2.5E-1", options), Some(TokenValue::Float(0.25)));
    assert_eq!(
        value("9223372036854775807", options),
        Some(TokenValue::Integer(i64::MAX))
    );
}

#[test]
fn older_versions_read_floats() {
    assert_eq!(value("42", lua(LanguageVersion::Lua52)), Some(TokenValue::Float(42.0)));
    assert_eq!(value("0x10", lua(LanguageVersion::Lua51)), Some(TokenValue::Float(16.0)));
}

#[test]
fn hex_literals() {
    let options = ParseOptions::default();
    assert_eq!(value("0xFF", options), Some(TokenValue::Integer(255)));
    assert_eq!(value("0Xff", options), Some(TokenValue::Integer(255)));
    assert_eq!(value("0xA.8p1", options), Some(TokenValue::Float(21.0)));
    assert_eq!(value("0x1p-2", options), Some(TokenValue::Float(0.25)));
}

#[test]
fn hex_floats_need_lua_52() {
    let token = number("0x.8", lua(LanguageVersion::Lua51));
    assert_eq!(token.value(), Some(&TokenValue::Float(0.5)));
    assert_eq!(codes(&token), vec![ErrorCode::FeatureNotAvailable]);
}

#[test]
fn decimal_overflow_reads_a_float_and_reports_the_exact_value() {
    let text = "9".repeat(25);
    let token = number(&text, ParseOptions::default());
    let Some(TokenValue::Float(read)) = token.value() else {
        panic!("expected a float value, got {:?}", token.value());
    };
    assert!((read - 1e25).abs() / 1e25 < 1e-12, "{read}");

    let diagnostics = token.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), ErrorCode::IntegerLiteralOverflow);
    assert_eq!(diagnostics[0].args(), [text.clone()]);
    assert_eq!(diagnostics[0].syntax_offset(), Some(SyntaxOffset::new(0, 25)));
}

#[test]
fn hex_overflow_reads_a_float() {
    let token = number("0x10000000000000000", ParseOptions::default());
    assert_eq!(token.value(), Some(&TokenValue::Float(18_446_744_073_709_551_616.0)));
    assert_eq!(codes(&token), vec![ErrorCode::IntegerLiteralOverflow]);
}

#[test]
fn malformed_numbers() {
    let options = ParseOptions::default();
    for text in ["1e", "0x", "12abc", "1..2", "3e+"] {
        let token = number(text, options);
        assert_eq!(token.text(), text);
        assert_eq!(token.value(), None, "{text}");
        assert_eq!(codes(&token), vec![ErrorCode::InvalidNumber], "{text}");
        assert_eq!(token.diagnostics()[0].args(), [text.to_owned()]);
    }
}

#[test]
fn binary_literals_are_a_preview_feature() {
    let enabled = ParseOptions::default().with_feature(Feature::BinaryNumbers);
    let token = number("0b1010", enabled);
    assert_eq!(token.value(), Some(&TokenValue::Integer(10)));
    assert!(token.diagnostics().is_empty());

    let token = number("0b1010", ParseOptions::default());
    assert_eq!(token.value(), Some(&TokenValue::Integer(10)));
    assert_eq!(codes(&token), vec![ErrorCode::FeatureNotAvailable]);
    assert_eq!(token.diagnostics()[0].args()[0], "binary literals");
}

#[test]
fn moonscript_has_integers() {
    let moon = ParseOptions::new(Dialect::MoonScript).with_version(LanguageVersion::Lua51);
    assert_eq!(value("7", moon), Some(TokenValue::Integer(7)));
}

#[test]
fn numeral_stops_at_operators() {
    let source = SourceText::new("1+2");
    let options = ParseOptions::default();
    let mut lexer = Lexer::new(&source, &options);
    let kinds: Vec<_> = (0..4).map(|_| lexer.lex(LexerMode::Syntax).kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::NumericLiteralToken,
            SyntaxKind::PlusToken,
            SyntaxKind::NumericLiteralToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
}
