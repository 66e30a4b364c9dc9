use luna_ir::{Dialect, Span};
use pretty_assertions::assert_eq;

use super::*;
use crate::{messages_for, DiagnosticInfo, ErrorCode, Location};

fn overflow_at(span: Span) -> Diagnostic {
    Diagnostic::new(
        DiagnosticInfo::new(ErrorCode::IntegerLiteralOverflow, ["99999999999999999999"]),
        Location::source(span),
    )
}

#[test]
fn render_with_position() {
    let source = SourceText::new("local a = 1\nlocal b = 99999999999999999999\n").with_path("main.lua");
    let line = render(&overflow_at(Span::new(22, 42)), &source, messages_for(Dialect::Lua));
    assert_eq!(
        line,
        "main.lua:2:11: error[LUA1007]: integer literal 99999999999999999999 does not fit in 64 bits and is read as a float"
    );
}

#[test]
fn render_counts_unicode_line_separators() {
    let source = SourceText::new("a\u{2028}$").with_path("main.lua");
    let diagnostic = Diagnostic::new(
        DiagnosticInfo::new(ErrorCode::BadCharacter, ["$"]),
        Location::source(Span::new(4, 5)),
    );
    assert!(render(&diagnostic, &source, messages_for(Dialect::Lua)).starts_with("main.lua:2:1:"));
}

#[test]
fn render_without_location() {
    let source = SourceText::new("");
    let diagnostic = Diagnostic::new(
        DiagnosticInfo::new(ErrorCode::MissingAssembly, ["print", "base"]),
        Location::None,
    );
    assert_eq!(
        render(&diagnostic, &source, messages_for(Dialect::MoonScript)),
        "error[MOON3001]: 'print' is defined in assembly 'base' which could not be loaded"
    );
}

#[test]
fn render_prefers_location_path() {
    let source = SourceText::new("x").with_path("a.lua");
    let diagnostic = Diagnostic::new(
        DiagnosticInfo::new(ErrorCode::BadCharacter, ["$"]),
        Location::source_in(Span::new(0, 1), "b.lua"),
    );
    assert!(render(&diagnostic, &source, messages_for(Dialect::Lua)).starts_with("b.lua:1:1:"));
}

#[test]
fn emitter_writes_lines_and_summary() {
    let source = SourceText::new("$");
    let diagnostic = Diagnostic::new(
        DiagnosticInfo::new(ErrorCode::BadCharacter, ["$"]),
        Location::source(Span::new(0, 1)),
    );
    let mut emitter = PlainTextEmitter::new(Vec::new(), &source, messages_for(Dialect::Lua));
    emitter.emit_all([&diagnostic]);
    emitter.emit_summary(1, 0);
    emitter.flush();
    let out = String::from_utf8(emitter.into_inner()).unwrap_or_default();
    assert_eq!(
        out,
        "<input>:1:1: error[LUA1001]: unexpected character '$'\n1 error, 0 warnings\n"
    );
}

#[test]
fn colors_wrap_the_line() {
    let source = SourceText::new("$");
    let diagnostic = Diagnostic::new(
        DiagnosticInfo::new(ErrorCode::BadCharacter, ["$"]),
        Location::None,
    );
    let mut emitter = PlainTextEmitter::new(Vec::new(), &source, messages_for(Dialect::Lua))
        .with_color_mode(ColorMode::Always, false);
    emitter.emit(&diagnostic);
    let out = String::from_utf8(emitter.into_inner()).unwrap_or_default();
    assert!(out.starts_with("\x1b[1;31merror[LUA1001]"));
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Never.should_use_colors(true));
}
