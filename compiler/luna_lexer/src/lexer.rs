//! Token production: trivia attachment, dispatch and punctuation cooking.
//!
//! Each `lex` call scans leading trivia, one token, then trailing trivia up
//! to (not including) the first trivia that contains a line break.
//! Diagnostics raised while scanning are collected as pending entries with
//! absolute byte ranges and attached to the token, relative to its full
//! start, when the token is built.

use luna_diagnostic::{DiagnosticInfo, ErrorCode};
use luna_ir::{facts, Dialect, DialectProfile, ParseOptions, SourceText, Span, SyntaxKind};
use luna_lexer_core::char_class::{is_identifier_start, is_new_line, is_whitespace};
use luna_syntax::{GreenToken, GreenTrivia, TokenValue, TriviaList};

use crate::cursor::Cursor;
use crate::raw_token::RawToken;

/// What the next `lex` call should scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LexerMode {
    /// Ordinary tokens with trivia.
    #[default]
    Syntax,
    /// The inside of an interpolated string: text runs, `#{` and the
    /// closing quote.
    InterpolatedStringText,
}

/// A token together with the absolute offset of its full start.
#[derive(Clone, Debug)]
pub struct LexedToken {
    pub token: GreenToken,
    pub start: u32,
}

impl LexedToken {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.token.kind()
    }

    /// Span including leading and trailing trivia.
    pub fn full_span(&self) -> Span {
        Span::from_len(self.start, self.token.full_width())
    }

    /// Span of the token text alone.
    pub fn span(&self) -> Span {
        Span::from_len(self.start + self.token.leading_width(), self.token.width())
    }
}

/// A diagnostic raised during the current `lex` call.
struct PendingDiagnostic {
    start: usize,
    end: usize,
    info: DiagnosticInfo,
}

/// Token being cooked: everything except its text and trivia.
pub(crate) struct Scanned {
    pub(crate) kind: SyntaxKind,
    pub(crate) value: Option<TokenValue>,
    pub(crate) contextual_kind: Option<SyntaxKind>,
    /// Interpolation boundaries leave the following text to the string.
    pub(crate) takes_trailing_trivia: bool,
}

impl Scanned {
    pub(crate) fn new(kind: SyntaxKind) -> Self {
        Scanned {
            kind,
            value: None,
            contextual_kind: None,
            takes_trailing_trivia: true,
        }
    }

    pub(crate) fn with_value(mut self, value: TokenValue) -> Self {
        self.value = Some(value);
        self
    }

    pub(crate) fn without_trailing_trivia(mut self) -> Self {
        self.takes_trailing_trivia = false;
        self
    }
}

/// Saturating conversion of a byte offset into a source position.
#[inline]
pub(crate) fn offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}

/// Pull-based lexer over one source text.
///
/// The lexer is total: every call returns a token, and calls at the end of
/// the text keep returning end-of-file tokens.
pub struct Lexer<'a> {
    pub(crate) source: &'a SourceText,
    pub(crate) cursor: Cursor<'a>,
    pub(crate) options: ParseOptions,
    pub(crate) profile: &'static dyn DialectProfile,
    pending: Vec<PendingDiagnostic>,
    /// Brace depth inside each open `#{ ... }`, innermost last.
    pub(crate) interpolations: Vec<u32>,
    /// The next token is interpolated string text.
    pub(crate) in_string_text: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a SourceText, options: &ParseOptions) -> Self {
        Lexer {
            source,
            cursor: Cursor::new(source.as_str()),
            options: *options,
            profile: options.dialect.profile(),
            pending: Vec::new(),
            interpolations: Vec::new(),
            in_string_text: false,
        }
    }

    /// Byte offset of the next unread character.
    #[inline]
    pub fn position(&self) -> u32 {
        offset(self.cursor.pos())
    }

    /// Restart scanning at `position` with no open interpolations.
    ///
    /// Callers reset to token boundaries of a previous lex (the incremental
    /// parser resumes at statement starts).
    pub fn reset_to(&mut self, position: u32) {
        self.cursor.set_pos(position as usize);
        self.pending.clear();
        self.interpolations.clear();
        self.in_string_text = false;
    }

    /// The mode the previous token asks for.
    ///
    /// After an interpolated string start, or the `}` closing an
    /// interpolation, this is [`LexerMode::InterpolatedStringText`].
    pub fn next_mode(&self) -> LexerMode {
        if self.in_string_text {
            LexerMode::InterpolatedStringText
        } else {
            LexerMode::Syntax
        }
    }

    /// Whether an interpolated string is still open: inside its text, or
    /// inside one of its `#{ ... }` expressions.
    pub fn in_interpolation(&self) -> bool {
        self.in_string_text || !self.interpolations.is_empty()
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn lex(&mut self, mode: LexerMode) -> LexedToken {
        self.pending.clear();
        let full_start = self.cursor.pos();
        let token = match mode {
            LexerMode::Syntax => self.lex_syntax(full_start),
            LexerMode::InterpolatedStringText => self.lex_string_text(full_start),
        };
        LexedToken {
            token,
            start: offset(full_start),
        }
    }

    fn lex_syntax(&mut self, full_start: usize) -> GreenToken {
        let leading = self.scan_trivia(false);
        let start = self.cursor.pos();
        let scanned = if self.cursor.is_eof() {
            Scanned::new(SyntaxKind::EndOfFileToken).without_trailing_trivia()
        } else {
            self.scan_token(start)
        };
        self.finish_token(full_start, start, scanned, leading)
    }

    /// Build the green token for `scanned`, whose text runs from `start` to
    /// the cursor, scanning trailing trivia if it takes any.
    pub(crate) fn finish_token(
        &mut self,
        full_start: usize,
        start: usize,
        scanned: Scanned,
        leading: TriviaList,
    ) -> GreenToken {
        let text = self.cursor.slice_from(start);
        let trailing = if scanned.takes_trailing_trivia {
            self.scan_trivia(true)
        } else {
            TriviaList::new()
        };
        let mut token = GreenToken::new(scanned.kind, text, leading, trailing);
        if let Some(value) = scanned.value {
            token = token.with_value(value);
        }
        if let Some(kind) = scanned.contextual_kind {
            token = token.with_contextual_kind(kind);
        }
        let diagnostics = self.take_diagnostics(full_start);
        token.with_diagnostics(diagnostics)
    }

    /// Drain pending diagnostics, located relative to `full_start`.
    pub(crate) fn take_diagnostics(&mut self, full_start: usize) -> Vec<DiagnosticInfo> {
        self.pending
            .drain(..)
            .map(|pending| {
                pending.info.with_location(
                    offset(pending.start.saturating_sub(full_start)),
                    offset(pending.end.saturating_sub(pending.start)),
                )
            })
            .collect()
    }

    /// Record a diagnostic over the absolute byte range `start..end`.
    pub(crate) fn report<I, S>(&mut self, start: usize, end: usize, code: ErrorCode, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pending.push(PendingDiagnostic {
            start,
            end,
            info: DiagnosticInfo::new(code, args),
        });
    }

    /// Report `what` as unavailable in the configured language version.
    pub(crate) fn report_unavailable(&mut self, start: usize, end: usize, what: &str) {
        let version = self.options.version.as_str();
        self.report(start, end, ErrorCode::FeatureNotAvailable, [what, version]);
    }

    /// 1-based line of a byte offset, as a message argument.
    pub(crate) fn line_of(&self, pos: usize) -> String {
        self.source.line_col(offset(pos)).0.to_string()
    }

    /// Number of pending diagnostics, for rewinding speculative scans.
    pub(crate) fn pending_mark(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn rewind_pending(&mut self, mark: usize) {
        self.pending.truncate(mark);
    }

    fn scan_trivia(&mut self, trailing: bool) -> TriviaList {
        let mut list = TriviaList::new();
        loop {
            let start = self.cursor.pos();
            let mark = self.pending_mark();
            let Some(kind) = self.scan_one_trivia() else {
                break;
            };
            let trivia = GreenTrivia::new(kind, self.cursor.slice_from(start));
            if trailing && trivia.contains_newline() {
                self.cursor.set_pos(start);
                self.rewind_pending(mark);
                break;
            }
            list.push(trivia);
        }
        list
    }

    fn scan_one_trivia(&mut self) -> Option<SyntaxKind> {
        let start = self.cursor.pos();
        let c = self.cursor.peek()?;
        if start == 0 && self.cursor.rest().starts_with("#!") {
            self.cursor.eat_while(|c| !is_new_line(c));
            return Some(SyntaxKind::ShebangTrivia);
        }
        if is_whitespace(c) {
            self.cursor.eat_while(is_whitespace);
            return Some(SyntaxKind::WhitespaceTrivia);
        }
        if self.cursor.eat_newline() {
            return Some(SyntaxKind::EndOfLineTrivia);
        }
        if !self.cursor.rest().starts_with("--") {
            return None;
        }
        self.cursor.advance(2);
        if let Some(level) = self.eat_long_bracket_open() {
            if self.close_long_bracket(level).is_none() {
                let line = self.line_of(start);
                self.report(start, self.cursor.pos(), ErrorCode::UnterminatedComment, [line]);
            }
            return Some(SyntaxKind::MultiLineCommentTrivia);
        }
        self.cursor.eat_while(|c| !is_new_line(c));
        Some(SyntaxKind::SingleLineCommentTrivia)
    }

    fn scan_token(&mut self, start: usize) -> Scanned {
        match RawToken::first(self.cursor.rest()) {
            Some((RawToken::Ident, _)) => self.scan_identifier(start),
            Some((RawToken::Number, _)) => self.scan_number(start),
            Some((RawToken::DoubleQuote, _)) => self.scan_short_string(start, '"'),
            Some((RawToken::SingleQuote, _)) => self.scan_short_string(start, '\''),
            Some((RawToken::LongBracket, _)) => self.scan_long_string(start),
            Some((RawToken::InvalidLongBracket, len)) => {
                self.cursor.advance(len);
                let text = self.cursor.slice_from(start);
                self.report(start, self.cursor.pos(), ErrorCode::InvalidLongBracket, [text]);
                Scanned::new(SyntaxKind::BadToken)
            }
            Some((raw, len)) => match raw.punctuation_kind() {
                Some(kind) => self.cook_punctuation(start, kind, len),
                None => self.scan_bad_character(start),
            },
            None if self.cursor.peek().is_some_and(is_identifier_start) => {
                self.scan_identifier(start)
            }
            None => self.scan_bad_character(start),
        }
    }

    fn scan_bad_character(&mut self, start: usize) -> Scanned {
        let c = self.cursor.bump().unwrap_or_default();
        self.report(start, self.cursor.pos(), ErrorCode::BadCharacter, [c.to_string()]);
        Scanned::new(SyntaxKind::BadToken)
    }

    fn cook_punctuation(&mut self, start: usize, kind: SyntaxKind, len: usize) -> Scanned {
        use SyntaxKind as K;
        if !self.profile.supports_moon_operators() {
            match kind {
                // `a->b` and `a=>b` are not arrows in Lua.
                K::MinusGreaterThanToken => {
                    self.cursor.advance(1);
                    return Scanned::new(K::MinusToken);
                }
                K::EqualsGreaterThanToken => {
                    self.cursor.advance(1);
                    return Scanned::new(K::EqualsToken);
                }
                K::AtToken
                | K::AtAtToken
                | K::BackslashToken
                | K::ExclamationToken
                | K::ExclamationEqualsToken => return self.scan_bad_character(start),
                _ => {}
            }
        }

        self.cursor.advance(len);
        let end = self.cursor.pos();
        if facts::is_compound_assignment(kind) && !self.options.allows_compound_assignment() {
            let what = format!("'{}'", self.cursor.slice_from(start));
            self.report_unavailable(start, end, &what);
        } else if self.options.dialect == Dialect::Lua && !self.operator_available(kind) {
            let what = format!("'{}'", self.cursor.slice_from(start));
            self.report_unavailable(start, end, &what);
        }

        match kind {
            K::OpenBraceToken => {
                if let Some(depth) = self.interpolations.last_mut() {
                    *depth += 1;
                }
            }
            K::CloseBraceToken => {
                if self.interpolations.last() == Some(&0) {
                    self.interpolations.pop();
                    self.in_string_text = true;
                    tracing::trace!(position = end, "interpolation closed");
                    return Scanned::new(kind).without_trailing_trivia();
                }
                if let Some(depth) = self.interpolations.last_mut() {
                    *depth -= 1;
                }
            }
            _ => {}
        }
        Scanned::new(kind)
    }

    /// Version gates on Lua operators.
    fn operator_available(&self, kind: SyntaxKind) -> bool {
        use SyntaxKind as K;
        match kind {
            K::SlashSlashToken
            | K::SlashSlashEqualsToken
            | K::AmpersandToken
            | K::PipeToken
            | K::TildeToken
            | K::LessThanLessThanToken
            | K::GreaterThanGreaterThanToken => self.options.version.has_integers(),
            K::ColonColonToken => self.options.version.has_goto(),
            _ => true,
        }
    }
}
