//! Plain-text diagnostic output.
//!
//! One line per diagnostic:
//!
//! ```text
//! path:line:col: severity[PREFIX0000]: message
//! ```
//!
//! Diagnostics without a source location drop the position prefix. Colors
//! are ANSI and off unless requested.

use std::io::{self, Write};

use luna_ir::SourceText;

use crate::{Diagnostic, MessageProvider, Severity};

/// Path shown when neither the diagnostic nor the source has one.
const ANONYMOUS_SOURCE: &str = "<input>";

mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const INFO: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Sink for diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all<'a>(&mut self, diagnostics: impl IntoIterator<Item = &'a Diagnostic>) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }

    fn flush(&mut self);

    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Render one diagnostic as a single line, without a trailing newline.
///
/// Hidden, void and suppressed diagnostics render like any other; filtering
/// is the caller's decision.
pub fn render(diagnostic: &Diagnostic, source: &SourceText, messages: &dyn MessageProvider) -> String {
    let mut line = String::new();
    if let Some(span) = diagnostic.span() {
        let (row, col) = source.line_col(span.start);
        let path = diagnostic
            .location
            .path()
            .or_else(|| source.path())
            .unwrap_or(ANONYMOUS_SOURCE);
        line.push_str(&format!("{path}:{row}:{col}: "));
    }
    line.push_str(&format!(
        "{}[{}]: {}",
        diagnostic.severity(),
        messages.code_string(diagnostic.code()),
        messages.format_message(&diagnostic.info)
    ));
    line
}

/// Line-per-diagnostic emitter over any writer.
pub struct PlainTextEmitter<'s, W: Write> {
    writer: W,
    source: &'s SourceText,
    messages: &'static dyn MessageProvider,
    colors: bool,
}

impl<'s, W: Write> PlainTextEmitter<'s, W> {
    pub fn new(writer: W, source: &'s SourceText, messages: &'static dyn MessageProvider) -> Self {
        PlainTextEmitter {
            writer,
            source,
            messages,
            colors: false,
        }
    }

    #[must_use]
    pub fn with_color_mode(mut self, mode: ColorMode, is_tty: bool) -> Self {
        self.colors = mode.should_use_colors(is_tty);
        self
    }

    /// Consume the emitter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            _ => colors::INFO,
        }
    }
}

impl<'s> PlainTextEmitter<'s, io::Stderr> {
    pub fn stderr(source: &'s SourceText, messages: &'static dyn MessageProvider) -> Self {
        PlainTextEmitter::new(io::stderr(), source, messages)
    }
}

impl<W: Write> DiagnosticEmitter for PlainTextEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let line = render(diagnostic, self.source, self.messages);
        if self.colors {
            let color = Self::severity_color(diagnostic.severity());
            let _ = writeln!(self.writer, "{color}{line}{}", colors::RESET);
        } else {
            let _ = writeln!(self.writer, "{line}");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count == 0 && warning_count == 0 {
            return;
        }
        let summary = format!(
            "{error_count} error{}, {warning_count} warning{}",
            plural_s(error_count),
            plural_s(warning_count)
        );
        if self.colors {
            let _ = writeln!(self.writer, "{}{summary}{}", colors::BOLD, colors::RESET);
        } else {
            let _ = writeln!(self.writer, "{summary}");
        }
    }
}

#[cfg(test)]
mod tests;
