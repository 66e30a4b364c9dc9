//! Immutable source buffer.

use std::fmt;
use std::sync::Arc;

use luna_lexer_core::char_class::is_new_line;

use crate::Span;

/// Immutable source text with an optional path and a line index.
///
/// Cloning is cheap: the text and the line table are shared.
#[derive(Clone)]
pub struct SourceText {
    text: Arc<str>,
    path: Option<Arc<str>>,
    /// Byte offset of the first character of each line.
    line_starts: Arc<[u32]>,
}

impl SourceText {
    /// # Panics
    ///
    /// Debug builds panic if the text is 4 GiB or larger; offsets are `u32`.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text: Arc<str> = text.into();
        debug_assert!(u32::try_from(text.len()).is_ok(), "source exceeds u32 offsets");
        let line_starts = compute_line_starts(&text);
        SourceText {
            text,
            path: None,
            line_starts,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<Arc<str>>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Length in bytes.
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "length checked against u32 on construction"
    )]
    pub fn len(&self) -> u32 {
        self.text.len() as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text covered by `span`, or `None` if it is out of bounds or splits a
    /// character.
    #[inline]
    pub fn slice(&self, span: Span) -> Option<&str> {
        self.text.get(span.to_range())
    }

    /// 1-based line and column (in characters) of a byte offset.
    ///
    /// Offsets past the end clamp to the end of the text.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let column = self
            .text
            .get(line_start as usize..offset as usize)
            .map_or(0, |prefix| prefix.chars().count());
        #[allow(
            clippy::cast_possible_truncation,
            reason = "line and column counts are bounded by the u32 length"
        )]
        let position = (line as u32 + 1, column as u32 + 1);
        position
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Line breaks are whatever the lexer treats as one: a `\r\n` pair or any
/// single [`is_new_line`] character.
fn compute_line_starts(text: &str) -> Arc<[u32]> {
    let mut starts = vec![0u32];
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_new_line(c) {
            continue;
        }
        let mut end = i + c.len_utf8();
        if c == '\r' {
            if let Some((_, '\n')) = chars.peek() {
                chars.next();
                end += 1;
            }
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "length checked against u32 on construction"
        )]
        starts.push(end as u32);
    }
    starts.into()
}

impl fmt::Debug for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceText")
            .field("path", &self.path)
            .field("len", &self.text.len())
            .finish_non_exhaustive()
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        SourceText::new(text)
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        SourceText::new(text)
    }
}
