//! Debug commands: `lex` and `parse` for inspecting front-end output.

use std::io::{self, Write};

use luna_diagnostic::emitter::render;
use luna_diagnostic::messages_for;
use luna_ir::{ParseOptions, SourceText};
use luna_lexer::lex_to_end;

/// Print every token with its span, text and the codes of any diagnostics
/// it carries.
pub fn lex_source<W: Write>(source: &SourceText, options: &ParseOptions, out: &mut W) -> io::Result<()> {
    let messages = messages_for(options.dialect);
    let tokens = lex_to_end(source, options);
    writeln!(
        out,
        "Tokens for '{}' ({} tokens):",
        source.path().unwrap_or("<input>"),
        tokens.len()
    )?;
    for token in &tokens {
        let span = token.span();
        write!(
            out,
            "  {}@{}..{} {:?}",
            token.kind().name(),
            span.start,
            span.end,
            token.token.text()
        )?;
        let codes: Vec<String> = token
            .token
            .diagnostics()
            .iter()
            .map(|info| messages.code_string(info.code()))
            .collect();
        if codes.is_empty() {
            writeln!(out)?;
        } else {
            writeln!(out, " [{}]", codes.join(", "))?;
        }
    }
    Ok(())
}

/// Print the syntax tree followed by its diagnostics. Returns whether the
/// tree is free of errors.
pub fn parse_source<W: Write>(source: &SourceText, options: &ParseOptions, out: &mut W) -> io::Result<bool> {
    let tree = luna_parse::parse(source.clone(), options);
    out.write_all(tree.root().debug_tree().as_bytes())?;

    let diagnostics = tree.diagnostics();
    if !diagnostics.is_empty() {
        let messages = messages_for(options.dialect);
        writeln!(out)?;
        writeln!(out, "Diagnostics:")?;
        for diagnostic in &diagnostics {
            writeln!(out, "  {}", render(diagnostic, source, messages))?;
        }
    }
    Ok(!tree.has_errors())
}
