//! Incremental reparse support.
//!
//! Types for describing a text edit and deciding which regions of an old
//! syntax tree survive it.
//!
//! 1. **Text Change** - an edit operation (insertion, deletion, replacement)
//! 2. **Change Marker** - the region of the old text whose syntax must be rebuilt
//!
//! Green nodes carry no absolute positions, so a node lying wholly outside the
//! affected region can be spliced into the new tree unchanged; only its
//! position (derived from the new parent) moves by [`ChangeMarker::delta`].

use crate::Span;

/// A single text edit: `[start, old_end)` in the old text is replaced by
/// `new_len` bytes of new text.
///
/// # Examples
///
/// ```
/// use luna_ir::incremental::TextChange;
///
/// let insert = TextChange::insert(10, 5);
/// assert_eq!(insert.delta(), 5);
///
/// let delete = TextChange::delete(5, 3);
/// assert_eq!(delete.delta(), -3);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TextChange {
    /// Start byte offset in old text.
    pub start: u32,
    /// End byte offset in old text (exclusive).
    pub old_end: u32,
    /// Length of replacement text in bytes.
    pub new_len: u32,
}

impl TextChange {
    /// Create a new text change.
    #[inline]
    pub const fn new(start: u32, old_end: u32, new_len: u32) -> Self {
        TextChange {
            start,
            old_end,
            new_len,
        }
    }

    /// Create an insertion (no characters removed).
    #[inline]
    pub const fn insert(at: u32, len: u32) -> Self {
        TextChange::new(at, at, len)
    }

    /// Create a deletion (no characters inserted).
    #[inline]
    pub const fn delete(start: u32, len: u32) -> Self {
        TextChange::new(start, start + len, 0)
    }

    /// Create a replacement.
    #[inline]
    pub const fn replace(start: u32, old_len: u32, new_len: u32) -> Self {
        TextChange::new(start, start + old_len, new_len)
    }

    /// Net change in document length (positive = grew, negative = shrank).
    #[inline]
    pub fn delta(&self) -> i64 {
        i64::from(self.new_len) - i64::from(self.old_end - self.start)
    }

    /// Apply this change to `old`, splicing in `inserted`.
    ///
    /// Returns `None` if the change does not fit `old`, does not land on
    /// character boundaries, or `inserted` has the wrong length.
    pub fn apply(&self, old: &str, inserted: &str) -> Option<String> {
        let start = self.start as usize;
        let old_end = self.old_end as usize;
        if inserted.len() != self.new_len as usize
            || !old.is_char_boundary(start)
            || !old.is_char_boundary(old_end)
            || start > old_end
        {
            return None;
        }
        let mut text = String::with_capacity(old.len() - (old_end - start) + inserted.len());
        text.push_str(&old[..start]);
        text.push_str(inserted);
        text.push_str(&old[old_end..]);
        Some(text)
    }
}

/// Tracks which spans of the old text are affected by an edit.
///
/// Spans that end strictly before `affected_start` are reusable as-is.
/// Spans that start at or after `affected_end` are reusable once shifted by
/// `delta`. Everything else must be rebuilt.
///
/// `affected_start` is pulled back to the end of the previous token: the
/// lexer may have looked one character past that token when deciding where
/// it ended, so an edit touching its end can change it.
///
/// # Examples
///
/// ```
/// use luna_ir::incremental::{ChangeMarker, TextChange};
///
/// let change = TextChange::replace(100, 10, 15);
/// let marker = ChangeMarker::from_change(&change, 95);
///
/// assert_eq!(marker.adjust_position(50), 50);
/// assert_eq!(marker.adjust_position(200), 205);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ChangeMarker {
    /// Start of the affected region (may be earlier than the change start).
    pub affected_start: u32,
    /// End of the affected region in the old text.
    pub affected_end: u32,
    /// Position adjustment for positions after the affected region.
    pub delta: i64,
}

impl ChangeMarker {
    /// Create a marker from a text change, extended back to `prev_token_end`.
    #[inline]
    pub fn from_change(change: &TextChange, prev_token_end: u32) -> Self {
        ChangeMarker {
            affected_start: prev_token_end.min(change.start),
            affected_end: change.old_end,
            delta: change.delta(),
        }
    }

    /// Check if a span lies strictly before the affected region.
    ///
    /// Touching does not count: a span ending exactly where the edit begins
    /// may absorb the inserted text.
    #[inline]
    pub fn is_before(&self, span: Span) -> bool {
        span.end < self.affected_start
    }

    /// Check if a span starts at or after the end of the affected region.
    ///
    /// Callers splicing such a span back in must confirm that the rebuilt
    /// text ends exactly at the span's adjusted start.
    #[inline]
    pub fn is_after(&self, span: Span) -> bool {
        span.start >= self.affected_end
    }

    /// Adjust a position from old text to new text.
    ///
    /// - Positions strictly before the affected region: unchanged
    /// - Positions at or after the affected end: shifted by delta
    /// - Positions inside the affected region: returned unchanged, the
    ///   caller must not rely on them
    #[inline]
    pub fn adjust_position(&self, pos: u32) -> u32 {
        if pos < self.affected_end {
            return pos;
        }
        #[allow(
            clippy::cast_sign_loss,
            clippy::cast_possible_truncation,
            reason = "delta is computed from u32 offsets of the same document"
        )]
        let adjusted = (i64::from(pos) + self.delta) as u32;
        adjusted
    }
}
