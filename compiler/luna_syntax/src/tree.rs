//! `SyntaxTree`: a green root bound to its source text and parse options.

use std::fmt;
use std::sync::{Arc, Weak};

use luna_diagnostic::{Diagnostic, Location};
use luna_ir::{ParseOptions, SourceText, Span};

use crate::green::{GreenElement, GreenNode};
use crate::red::{RedData, SyntaxNode, SyntaxToken};

pub(crate) struct TreeInner {
    text: SourceText,
    options: ParseOptions,
    root: Arc<RedData>,
}

impl TreeInner {
    pub(crate) fn root_data(&self) -> &Arc<RedData> {
        &self.root
    }
}

/// An immutable parse result. Clones share the same tree.
#[derive(Clone)]
pub struct SyntaxTree {
    inner: Arc<TreeInner>,
}

impl SyntaxTree {
    pub fn new(root: GreenNode, text: SourceText, options: ParseOptions) -> Self {
        debug_assert_eq!(
            root.full_width(),
            text.len(),
            "green root must cover the whole source"
        );
        let root = Arc::new(RedData::new(root, Weak::new(), 0, 0));
        SyntaxTree {
            inner: Arc::new(TreeInner {
                text,
                options,
                root,
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<TreeInner>) -> Self {
        SyntaxTree { inner }
    }

    /// The red root, at position 0.
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::root_of(Arc::clone(&self.inner))
    }

    pub fn green_root(&self) -> &GreenNode {
        self.inner.root.green()
    }

    pub fn text(&self) -> &SourceText {
        &self.inner.text
    }

    pub fn options(&self) -> &ParseOptions {
        &self.inner.options
    }

    /// Tree identity, not structural equality.
    pub fn ptr_eq(&self, other: &SyntaxTree) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Syntax diagnostics of every token, with absolute locations, in
    /// document order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        collect_diagnostics(self.green_root(), 0, self.inner.text.path(), &mut out);
        out
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics().iter().any(|d| d.is_error() && !d.is_suppressed())
    }
}

fn collect_diagnostics(node: &GreenNode, base: u32, path: Option<&str>, out: &mut Vec<Diagnostic>) {
    if !node.contains_diagnostics() {
        return;
    }
    for (index, slot) in node.slots().enumerate() {
        let offset = base + node.slot_offset(index);
        match slot {
            Some(GreenElement::Node(child)) => collect_diagnostics(child, offset, path, out),
            Some(GreenElement::Token(token)) => {
                for info in token.diagnostics() {
                    let span = info.syntax_offset().map_or_else(
                        || Span::from_len(offset, token.full_width()),
                        |relative| relative.to_span(offset),
                    );
                    let location = match path {
                        Some(path) => Location::source_in(span, path),
                        None => Location::source(span),
                    };
                    out.push(Diagnostic::new(info.clone(), location));
                }
            }
            None => {}
        }
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("options", &self.inner.options)
            .field("root", &self.root())
            .finish()
    }
}

/// Width-guided descent from `root` to the token whose full span contains
/// `position`.
///
/// With `at_eof` the caller already knows the position is the end of the
/// file, and the end-of-file token is returned directly.
pub fn find_token_at_position(root: &SyntaxNode, position: u32, at_eof: bool) -> Option<SyntaxToken> {
    if at_eof {
        return root.last_token(true);
    }
    root.find_token(position)
}
