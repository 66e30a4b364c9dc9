//! Parser for the Luna front-end.
//!
//! Builds a lossless [`SyntaxTree`] from a [`SourceText`]:
//!
//! ```text
//! CompilationUnit
//!   StatementList
//!     Statement*          tokens, groups, blocks, interpolated strings
//!   EndOfFileToken
//! ```
//!
//! Statements end at a line break unless the line visibly continues
//! (a trailing operator or comma, a leading `.`, `then`, ...), at `;`, and
//! before a token that closes an enclosing construct. Syntax errors never
//! stop the parser: they become diagnostics on the offending token, or on a
//! zero-width missing token standing in for an expected closer.
//!
//! [`reparse`] rebuilds a tree after an edit, splicing in the top-level
//! statements the edit did not touch.

mod incremental;
mod parser;

use luna_ir::incremental::TextChange;
use luna_ir::{ParseOptions, SourceText};
use luna_syntax::SyntaxTree;

pub use incremental::IncrementalStats;

use parser::Parser;

/// Parse a whole text.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len(), dialect = %options.dialect))]
pub fn parse(text: SourceText, options: &ParseOptions) -> SyntaxTree {
    let root = Parser::new(&text, options, 0).parse_compilation_unit();
    let tree = SyntaxTree::new(root, text, *options);
    tracing::debug!(width = tree.green_root().full_width(), "parsed");
    tree
}

/// Parse `new_text`, the text of `old` after `change`, reusing what it can
/// of `old`.
///
/// The result is the tree [`parse`] would build for `new_text` with the
/// options of `old`. A change that does not fit the two texts falls back to
/// a full parse.
pub fn reparse(old: &SyntaxTree, change: &TextChange, new_text: SourceText) -> SyntaxTree {
    incremental::reparse(old, change, new_text).0
}

/// [`reparse`], also reporting how many statements were reused.
pub fn reparse_with_stats(
    old: &SyntaxTree,
    change: &TextChange,
    new_text: SourceText,
) -> (SyntaxTree, IncrementalStats) {
    incremental::reparse(old, change, new_text)
}
