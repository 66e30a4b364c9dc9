//! Incremental reparse.
//!
//! Works at the granularity of top-level statements:
//!
//! 1. **Prefix** - statements before the edit are pushed as-is, as long as
//!    the statement following them also lies before the edit (its first
//!    token decided where they ended).
//! 2. **Reparse** - the parser resumes at the first statement not reused.
//! 3. **Suffix** - whenever the parser reaches a statement boundary that
//!    is the shifted start of an old statement after the edit, that
//!    statement's green node is spliced in and lexing jumps past it.
//!
//! Green nodes carry no positions, so spliced statements need no copying.

use luna_ir::incremental::{ChangeMarker, TextChange};
use luna_ir::{SourceText, Span};
use luna_syntax::{GreenElement, GreenNode, SyntaxTree};

use crate::parser::Parser;
use crate::parse;

/// A top-level statement of the old tree.
struct OldStatement {
    green: GreenNode,
    span: Span,
}

/// Collect the old tree's top-level statements, in document order.
fn collect_statements(root: &GreenNode) -> Vec<OldStatement> {
    let Some(Some(GreenElement::Node(list))) = root.slots().next() else {
        return Vec::new();
    };
    list.slots()
        .enumerate()
        .filter_map(|(index, slot)| match slot {
            Some(GreenElement::Node(statement)) => Some(OldStatement {
                green: statement.clone(),
                span: Span::from_len(list.slot_offset(index), statement.full_width()),
            }),
            _ => None,
        })
        .collect()
}

/// Navigator over the old tree's statements.
struct SyntaxCursor {
    marker: ChangeMarker,
    statements: Vec<OldStatement>,
    current_index: usize,
}

impl SyntaxCursor {
    fn new(root: &GreenNode, marker: ChangeMarker) -> Self {
        SyntaxCursor {
            marker,
            statements: collect_statements(root),
            current_index: 0,
        }
    }

    /// Number of leading statements that survive unchanged.
    fn reusable_prefix(&self) -> usize {
        self.statements
            .windows(2)
            .take_while(|pair| self.marker.is_before(pair[1].span))
            .count()
    }

    /// Find an old statement after the edit whose shifted start is `pos`.
    ///
    /// Statements starting at offset 0 are never offered: a shebang line is
    /// only trivia at the very start of a file.
    fn find_at(&mut self, pos: u32) -> Option<GreenNode> {
        while let Some(statement) = self.statements.get(self.current_index) {
            let span = statement.span;
            if span.start == 0 || !self.marker.is_after(span) {
                self.current_index += 1;
                continue;
            }
            let start = self.marker.adjust_position(span.start);
            if start > pos {
                return None;
            }
            self.current_index += 1;
            if start == pos {
                return Some(statement.green.clone());
            }
        }
        None
    }
}

/// Statistics for incremental parsing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IncrementalStats {
    /// Number of top-level statements reused from the old tree.
    pub reused_count: usize,
    /// Number of top-level statements that were reparsed.
    pub reparsed_count: usize,
}

impl IncrementalStats {
    /// Calculate reuse rate as a percentage.
    #[allow(clippy::cast_precision_loss, reason = "statement counts stay far below 2^52")]
    pub fn reuse_rate(&self) -> f64 {
        let total = self.reused_count + self.reparsed_count;
        if total == 0 {
            0.0
        } else {
            (self.reused_count as f64 / total as f64) * 100.0
        }
    }
}

fn change_fits(old: &SourceText, change: &TextChange, new: &SourceText) -> bool {
    change.start <= change.old_end
        && change.old_end <= old.len()
        && i64::from(old.len()) + change.delta() == i64::from(new.len())
}

#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(start = change.start, old_end = change.old_end, new_len = change.new_len)
)]
pub(crate) fn reparse(
    old: &SyntaxTree,
    change: &TextChange,
    new_text: SourceText,
) -> (SyntaxTree, IncrementalStats) {
    let options = *old.options();
    if !change_fits(old.text(), change, &new_text) {
        tracing::warn!(
            old_len = old.text().len(),
            new_len = new_text.len(),
            "change does not match the texts, parsing from scratch"
        );
        return (parse(new_text, &options), IncrementalStats::default());
    }

    let marker = ChangeMarker::from_change(change, change.start);
    let mut cursor = SyntaxCursor::new(old.green_root(), marker);
    let mut stats = IncrementalStats::default();

    let prefix = cursor.reusable_prefix();
    let resume = cursor.statements[..prefix]
        .last()
        .map_or(0, |statement| statement.span.end);

    let root = {
        let mut parser = Parser::new(&new_text, &options, resume);
        parser.start_compilation_unit();
        for statement in &cursor.statements[..prefix] {
            tracing::trace!(start = statement.span.start, "reusing prefix statement");
            parser.reuse_prefix(statement.green.clone());
        }
        stats.reused_count += prefix;
        cursor.current_index = prefix;

        while let Some(pos) = parser.next_statement_start() {
            if let Some(statement) = cursor.find_at(pos) {
                tracing::trace!(start = pos, "reusing statement after the edit");
                parser.reuse_statement(statement);
                stats.reused_count += 1;
            } else {
                parser.parse_statement();
                stats.reparsed_count += 1;
            }
        }
        parser.finish_compilation_unit()
    };

    tracing::debug!(
        reused = stats.reused_count,
        reparsed = stats.reparsed_count,
        "reparsed"
    );
    (SyntaxTree::new(root, new_text, options), stats)
}
