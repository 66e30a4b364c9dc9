//! The `check` command: report every diagnostic in a file.

use std::io::{self, Write};

use luna_diagnostic::emitter::{DiagnosticEmitter, PlainTextEmitter};
use luna_diagnostic::{messages_for, Severity};
use luna_ir::{ParseOptions, SourceText};

/// Parse `source` and write its diagnostics, one per line, followed by a
/// summary. Returns the number of errors.
pub fn check_source<W: Write>(source: &SourceText, options: &ParseOptions, out: &mut W) -> io::Result<usize> {
    let tree = luna_parse::parse(source.clone(), options);
    let diagnostics = tree.diagnostics();
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    let warnings = diagnostics
        .iter()
        .filter(|d| d.severity() == Severity::Warning)
        .count();

    let mut emitter = PlainTextEmitter::new(&mut *out, source, messages_for(options.dialect));
    emitter.emit_all(&diagnostics);
    emitter.emit_summary(errors, warnings);
    emitter.flush();
    tracing::debug!(errors, warnings, "checked");
    Ok(errors)
}
