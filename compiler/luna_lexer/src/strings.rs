//! String literals: short strings and their escapes, long brackets, and
//! the text runs of interpolated strings.
//!
//! Escapes producing a single byte (`\xXX`, `\ddd`) map it to the Unicode
//! scalar of the same number, so the decoded value stays a `str`.

use luna_diagnostic::ErrorCode;
use luna_ir::{Dialect, SyntaxKind};
use luna_lexer_core::char_class::{
    dec_value, hex_value, is_dec_digit, is_hex_digit, is_new_line, is_whitespace,
};
use luna_syntax::{GreenToken, TokenValue, TriviaList};

use crate::lexer::{Lexer, Scanned};

/// What stopped a run of string characters.
enum StringStop {
    Quote,
    Interpolation,
    LineBreak,
    EndOfFile,
}

impl Lexer<'_> {
    /// `'...'` or `"..."`, starting at the opening quote.
    ///
    /// A MoonScript double-quoted string containing `#{` is interpolated:
    /// only the opening quote is returned here and the rest of the string is
    /// lexed in [`crate::LexerMode::InterpolatedStringText`].
    pub(crate) fn scan_short_string(&mut self, start: usize, quote: char) -> Scanned {
        self.cursor.bump();
        let interpolates = quote == '"' && self.profile.supports_interpolation();
        let mark = self.pending_mark();
        let mut value = String::new();
        match self.scan_string_chars(quote, interpolates, &mut value) {
            StringStop::Quote => {
                self.cursor.bump();
            }
            StringStop::Interpolation => {
                self.cursor.set_pos(start + quote.len_utf8());
                self.rewind_pending(mark);
                self.in_string_text = true;
                tracing::trace!(position = start, "interpolated string");
                return Scanned::new(SyntaxKind::InterpolatedStringStartToken)
                    .without_trailing_trivia();
            }
            StringStop::LineBreak | StringStop::EndOfFile => {
                let end = self.cursor.pos();
                self.report(start, end, ErrorCode::UnterminatedString, std::iter::empty::<&str>());
            }
        }
        Scanned::new(SyntaxKind::StringLiteralToken).with_value(TokenValue::String(value.into()))
    }

    /// Decode characters up to the closing quote, `#{` (when `interpolates`),
    /// a line break (Lua only) or the end of the text. The stopping
    /// character is not consumed.
    fn scan_string_chars(&mut self, quote: char, interpolates: bool, value: &mut String) -> StringStop {
        let multiline = self.options.dialect == Dialect::MoonScript;
        loop {
            match self.cursor.peek() {
                None => return StringStop::EndOfFile,
                Some(c) if c == quote => return StringStop::Quote,
                Some('#') if interpolates && self.cursor.peek_second() == Some('{') => {
                    return StringStop::Interpolation;
                }
                Some(c) if is_new_line(c) && !multiline => return StringStop::LineBreak,
                Some('\\') => self.scan_escape(value),
                Some(c) => {
                    self.cursor.bump();
                    value.push(c);
                }
            }
        }
    }

    fn scan_escape(&mut self, value: &mut String) {
        let start = self.cursor.pos();
        self.cursor.bump();
        let Some(c) = self.cursor.peek() else {
            return;
        };
        let simple = match c {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'a' => Some('\u{7}'),
            'b' => Some('\u{8}'),
            'f' => Some('\u{c}'),
            'v' => Some('\u{b}'),
            '\\' | '"' | '\'' => Some(c),
            _ => None,
        };
        if let Some(decoded) = simple {
            self.cursor.bump();
            value.push(decoded);
            return;
        }
        if self.cursor.eat_newline() {
            value.push('\n');
            return;
        }
        let lua = self.options.dialect == Dialect::Lua;
        match c {
            'x' => {
                self.cursor.bump();
                if lua && !self.options.version.has_extended_escapes() {
                    self.report_unavailable(start, self.cursor.pos(), "'\\x' escapes");
                }
                let mut byte = 0u8;
                for _ in 0..2 {
                    match self.cursor.peek() {
                        Some(d) if is_hex_digit(d) => {
                            self.cursor.bump();
                            byte = byte * 16 + hex_value(d);
                        }
                        _ => return self.invalid_escape(start),
                    }
                }
                value.push(char::from(byte));
            }
            'z' => {
                self.cursor.bump();
                if lua && !self.options.version.has_extended_escapes() {
                    self.report_unavailable(start, self.cursor.pos(), "'\\z' escapes");
                }
                self.cursor.eat_while(|c| is_whitespace(c) || is_new_line(c));
            }
            'u' => {
                self.cursor.bump();
                if lua && !self.options.version.has_unicode_escapes() {
                    self.report_unavailable(start, self.cursor.pos(), "'\\u' escapes");
                }
                self.scan_unicode_escape(start, value);
            }
            d if is_dec_digit(d) => {
                let mut number = 0u32;
                let mut digits = 0;
                while digits < 3 {
                    match self.cursor.peek() {
                        Some(d) if is_dec_digit(d) => {
                            self.cursor.bump();
                            number = number * 10 + u32::from(dec_value(d));
                            digits += 1;
                        }
                        _ => break,
                    }
                }
                match u8::try_from(number) {
                    Ok(byte) => value.push(char::from(byte)),
                    Err(_) => self.invalid_escape(start),
                }
            }
            _ => {
                self.cursor.bump();
                self.invalid_escape(start);
            }
        }
    }

    /// `\u{XXX}` after the `u`.
    fn scan_unicode_escape(&mut self, start: usize, value: &mut String) {
        if !self.cursor.eat('{') {
            return self.invalid_escape(start);
        }
        let digits_start = self.cursor.pos();
        self.cursor.eat_while(is_hex_digit);
        let digits = self.cursor.slice_from(digits_start);
        let code = (!digits.is_empty() && digits.len() <= 8)
            .then(|| u32::from_str_radix(digits, 16).ok())
            .flatten();
        if !self.cursor.eat('}') {
            return self.invalid_escape(start);
        }
        match code.and_then(char::from_u32) {
            Some(decoded) => value.push(decoded),
            None => self.invalid_escape(start),
        }
    }

    fn invalid_escape(&mut self, start: usize) {
        let text = self.cursor.slice_from(start);
        self.report(start, self.cursor.pos(), ErrorCode::InvalidEscape, [text]);
    }

    /// Consume `[`, any number of `=`, `[` at the cursor and return the
    /// number of `=`. Leaves the cursor alone when there is no opener.
    pub(crate) fn eat_long_bracket_open(&mut self) -> Option<usize> {
        let after = self.cursor.rest().strip_prefix('[')?;
        let level = after.len() - after.trim_start_matches('=').len();
        if !after.get(level..)?.starts_with('[') {
            return None;
        }
        self.cursor.advance(level + 2);
        Some(level)
    }

    /// Skip to just past the closer of a level-`level` long bracket and
    /// return the offset where the content ends. Without a closer the
    /// cursor moves to the end of the text and `None` is returned.
    pub(crate) fn close_long_bracket(&mut self, level: usize) -> Option<usize> {
        let closer = format!("]{}]", "=".repeat(level));
        let rest = self.cursor.rest();
        match rest.find(&closer) {
            Some(at) => {
                let content_end = self.cursor.pos() + at;
                self.cursor.advance(at + closer.len());
                Some(content_end)
            }
            None => {
                self.cursor.advance(rest.len());
                None
            }
        }
    }

    /// `[[ ... ]]` or `[==[ ... ]==]`, starting at the first `[`.
    pub(crate) fn scan_long_string(&mut self, start: usize) -> Scanned {
        let Some(level) = self.eat_long_bracket_open() else {
            return Scanned::new(SyntaxKind::BadToken);
        };
        let content_start = self.cursor.pos();
        let content_end = match self.close_long_bracket(level) {
            Some(end) => end,
            None => {
                let line = self.line_of(start);
                self.report(start, self.cursor.pos(), ErrorCode::UnterminatedLongString, [line]);
                self.cursor.pos()
            }
        };
        let content = self.cursor.slice_from(content_start);
        let content = content.get(..content_end - content_start).unwrap_or(content);
        Scanned::new(SyntaxKind::StringLiteralToken)
            .with_value(TokenValue::String(long_string_value(content).into()))
    }

    /// One token inside an interpolated string.
    pub(crate) fn lex_string_text(&mut self, start: usize) -> GreenToken {
        if self.cursor.is_eof() {
            self.in_string_text = false;
            self.report(start, start, ErrorCode::UnterminatedString, std::iter::empty::<&str>());
            let diagnostics = self.take_diagnostics(start);
            return GreenToken::missing(SyntaxKind::InterpolatedStringEndToken).with_diagnostics(diagnostics);
        }
        if self.cursor.eat('"') {
            self.in_string_text = false;
            let scanned = Scanned::new(SyntaxKind::InterpolatedStringEndToken);
            return self.finish_token(start, start, scanned, TriviaList::new());
        }
        if self.cursor.rest().starts_with("#{") {
            self.cursor.advance(2);
            self.in_string_text = false;
            self.interpolations.push(0);
            tracing::trace!(position = start, "interpolation opened");
            let scanned = Scanned::new(SyntaxKind::HashOpenBraceToken);
            return self.finish_token(start, start, scanned, TriviaList::new());
        }
        let mut value = String::new();
        self.scan_string_chars('"', true, &mut value);
        if self.cursor.pos() == start {
            // A line break in a dialect without multi-line strings.
            value.extend(self.cursor.bump());
        }
        let scanned = Scanned::new(SyntaxKind::InterpolatedStringTextToken)
            .with_value(TokenValue::String(value.into()))
            .without_trailing_trivia();
        self.finish_token(start, start, scanned, TriviaList::new())
    }
}

/// Long-string content as a value: a first line break is dropped and every
/// line break reads as `\n`.
fn long_string_value(content: &str) -> String {
    let content = ["\r\n", "\n\r", "\n", "\r"]
        .iter()
        .find_map(|newline| content.strip_prefix(newline))
        .unwrap_or(content);
    let mut value = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            chars.next_if_eq(&'\n');
            value.push('\n');
        } else {
            value.push(c);
        }
    }
    value
}

#[cfg(test)]
mod tests;
