//! Red tree: position-aware views over the green tree.
//!
//! A red node is created the first time it is reached and published into
//! its parent's slot with `OnceLock`, so concurrent readers materialise a
//! child at most once and always observe the same instance. Parents own
//! their materialised children; children point back with `Weak`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock, Weak};

use luna_ir::{Span, SyntaxKind};
use smol_str::SmolStr;

use crate::green::{GreenElement, GreenNode, GreenToken, GreenTrivia, TokenValue};
use crate::tree::{SyntaxTree, TreeInner};

pub(crate) struct RedData {
    green: GreenNode,
    parent: Weak<RedData>,
    offset: u32,
    index: usize,
    children: Box<[OnceLock<Arc<RedData>>]>,
}

impl RedData {
    pub(crate) fn new(green: GreenNode, parent: Weak<RedData>, offset: u32, index: usize) -> Self {
        let children = (0..green.slot_count()).map(|_| OnceLock::new()).collect();
        RedData {
            green,
            parent,
            offset,
            index,
            children,
        }
    }

    pub(crate) fn green(&self) -> &GreenNode {
        &self.green
    }
}

/// A node with an absolute position.
#[derive(Clone)]
pub struct SyntaxNode {
    tree: Arc<TreeInner>,
    data: Arc<RedData>,
}

impl SyntaxNode {
    pub(crate) fn root_of(tree: Arc<TreeInner>) -> Self {
        let data = Arc::clone(tree.root_data());
        SyntaxNode { tree, data }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data.green.kind()
    }

    #[inline]
    pub fn green(&self) -> &GreenNode {
        &self.data.green
    }

    /// The tree this node belongs to.
    pub fn tree(&self) -> SyntaxTree {
        SyntaxTree::from_inner(Arc::clone(&self.tree))
    }

    /// Span including the leading trivia of the first token and the trailing
    /// trivia of the last.
    pub fn full_span(&self) -> Span {
        Span::from_len(self.data.offset, self.data.green.full_width())
    }

    /// Span without the outer trivia.
    pub fn span(&self) -> Span {
        let full = self.full_span();
        let leading = self.data.green.first_token().map_or(0, GreenToken::leading_width);
        let trailing = self.data.green.last_token().map_or(0, GreenToken::trailing_width);
        let end = full.end.saturating_sub(trailing).max(full.start);
        let start = (full.start + leading).min(end);
        Span::new(start, end)
    }

    /// Slot index in the parent; 0 for the root.
    pub fn index(&self) -> usize {
        self.data.index
    }

    pub fn parent(&self) -> Option<SyntaxNode> {
        let data = self.data.parent.upgrade()?;
        Some(SyntaxNode {
            tree: Arc::clone(&self.tree),
            data,
        })
    }

    /// This node and its ancestors, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode> {
        std::iter::successors(Some(self.clone()), SyntaxNode::parent)
    }

    pub fn slot_count(&self) -> usize {
        self.data.green.slot_count()
    }

    /// The element in slot `index`; `None` for empty or out-of-range slots.
    pub fn slot(&self, index: usize) -> Option<SyntaxElement> {
        let green = self.data.green.slot(index)?;
        let offset = self.data.offset + self.data.green.slot_offset(index);
        match green {
            GreenElement::Node(node) => {
                let cell = self.data.children.get(index)?;
                let data = cell.get_or_init(|| {
                    Arc::new(RedData::new(
                        node.clone(),
                        Arc::downgrade(&self.data),
                        offset,
                        index,
                    ))
                });
                Some(SyntaxElement::Node(SyntaxNode {
                    tree: Arc::clone(&self.tree),
                    data: Arc::clone(data),
                }))
            }
            GreenElement::Token(token) => Some(SyntaxElement::Token(SyntaxToken {
                tree: Arc::clone(&self.tree),
                parent: Arc::clone(&self.data),
                index,
                offset,
                green: token.clone(),
            })),
        }
    }

    /// Child nodes, tokens skipped.
    pub fn children(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.children_with_tokens().filter_map(SyntaxElement::into_node)
    }

    /// Child nodes and tokens in order, empty slots skipped.
    pub fn children_with_tokens(&self) -> impl Iterator<Item = SyntaxElement> + '_ {
        (0..self.slot_count()).filter_map(move |index| self.slot(index))
    }

    pub fn first_token(&self, include_zero_width: bool) -> Option<SyntaxToken> {
        self.first_token_from(0, include_zero_width)
    }

    pub fn last_token(&self, include_zero_width: bool) -> Option<SyntaxToken> {
        self.last_token_before(self.slot_count(), include_zero_width)
    }

    fn first_token_from(&self, start: usize, include_zero_width: bool) -> Option<SyntaxToken> {
        (start..self.slot_count()).find_map(|index| match self.slot(index)? {
            SyntaxElement::Node(node) => node.first_token(include_zero_width),
            SyntaxElement::Token(token) => {
                (include_zero_width || token.green.width() > 0).then_some(token)
            }
        })
    }

    fn last_token_before(&self, end: usize, include_zero_width: bool) -> Option<SyntaxToken> {
        (0..end).rev().find_map(|index| match self.slot(index)? {
            SyntaxElement::Node(node) => node.last_token(include_zero_width),
            SyntaxElement::Token(token) => {
                (include_zero_width || token.green.width() > 0).then_some(token)
            }
        })
    }

    /// Every token in the subtree in document order, missing ones included.
    pub fn descendant_tokens(&self) -> impl Iterator<Item = SyntaxToken> {
        let mut tokens = Vec::new();
        self.collect_tokens(&mut tokens);
        tokens.into_iter()
    }

    fn collect_tokens(&self, out: &mut Vec<SyntaxToken>) {
        for element in self.children_with_tokens() {
            match element {
                SyntaxElement::Node(node) => node.collect_tokens(out),
                SyntaxElement::Token(token) => out.push(token),
            }
        }
    }

    /// Text of [`SyntaxNode::span`].
    pub fn text(&self) -> String {
        let full_text = self.full_text();
        let full = self.full_span();
        let span = self.span();
        let start = (span.start - full.start) as usize;
        let end = (span.end - full.start) as usize;
        full_text.get(start..end).unwrap_or_default().to_owned()
    }

    /// Text of [`SyntaxNode::full_span`], trivia included.
    pub fn full_text(&self) -> String {
        self.data.green.to_full_string()
    }

    /// The token whose full span contains `position`.
    ///
    /// A position inside trivia resolves to the token owning that trivia.
    /// The end of the root resolves to its last token (end of file).
    pub fn find_token(&self, position: u32) -> Option<SyntaxToken> {
        let full = self.full_span();
        if !full.contains(position) {
            if position == full.end && self.data.parent.upgrade().is_none() {
                return self.last_token(true);
            }
            return None;
        }
        let mut node = self.clone();
        loop {
            let index = node.green().slot_at_offset(position - node.data.offset)?;
            match node.slot(index)? {
                SyntaxElement::Node(child) => node = child,
                SyntaxElement::Token(token) => return Some(token),
            }
        }
    }

    /// The trivia piece containing `position`, if it falls in trivia.
    pub fn find_trivia(&self, position: u32) -> Option<SyntaxTrivia> {
        let token = self.find_token(position)?;
        let found = token
            .leading_trivia()
            .chain(token.trailing_trivia())
            .find(|trivia| trivia.span().contains(position));
        found
    }

    /// Indented `Kind@start..end` dump of the subtree, tokens with text.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        self.write_debug(&mut out, 0);
        out
    }

    fn write_debug(&self, out: &mut String, depth: usize) {
        use std::fmt::Write as _;
        let _ = writeln!(out, "{:indent$}{self:?}", "", indent = depth * 2);
        for element in self.children_with_tokens() {
            match element {
                SyntaxElement::Node(node) => node.write_debug(out, depth + 1),
                SyntaxElement::Token(token) => {
                    let _ = writeln!(out, "{:indent$}{token:?}", "", indent = (depth + 1) * 2);
                }
            }
        }
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl Eq for SyntaxNode {}

impl Hash for SyntaxNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.data).hash(state);
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = self.full_span();
        write!(f, "{}@{}..{}", self.kind().name(), span.start, span.end)
    }
}

/// A token with an absolute position. Created on demand; not cached.
#[derive(Clone)]
pub struct SyntaxToken {
    tree: Arc<TreeInner>,
    parent: Arc<RedData>,
    index: usize,
    /// Absolute full start.
    offset: u32,
    green: GreenToken,
}

impl SyntaxToken {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    #[inline]
    pub fn contextual_kind(&self) -> Option<SyntaxKind> {
        self.green.contextual_kind()
    }

    pub fn text(&self) -> &str {
        self.green.text()
    }

    pub fn value(&self) -> Option<&TokenValue> {
        self.green.value()
    }

    #[inline]
    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    pub fn is_missing(&self) -> bool {
        self.green.is_missing()
    }

    pub fn has_newline_before(&self) -> bool {
        self.green.has_newline_before()
    }

    pub fn full_span(&self) -> Span {
        Span::from_len(self.offset, self.green.full_width())
    }

    pub fn span(&self) -> Span {
        Span::from_len(self.offset + self.green.leading_width(), self.green.width())
    }

    /// Slot index in the parent node.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn parent(&self) -> SyntaxNode {
        SyntaxNode {
            tree: Arc::clone(&self.tree),
            data: Arc::clone(&self.parent),
        }
    }

    pub fn whitespace_indent(&self) -> u32 {
        self.green.whitespace_indent()
    }

    pub fn leading_trivia(&self) -> impl Iterator<Item = SyntaxTrivia> + '_ {
        positioned(self.green.leading_trivia(), self.offset)
    }

    pub fn trailing_trivia(&self) -> impl Iterator<Item = SyntaxTrivia> + '_ {
        positioned(self.green.trailing_trivia(), self.span().end)
    }

    /// The next token in document order. Zero-width tokens (missing ones,
    /// end of file) are skipped unless asked for.
    pub fn next_token(&self, include_zero_width: bool) -> Option<SyntaxToken> {
        let mut node = self.parent();
        let mut start = self.index + 1;
        loop {
            if let Some(token) = node.first_token_from(start, include_zero_width) {
                return Some(token);
            }
            start = node.index() + 1;
            node = node.parent()?;
        }
    }

    pub fn previous_token(&self, include_zero_width: bool) -> Option<SyntaxToken> {
        let mut node = self.parent();
        let mut end = self.index;
        loop {
            if let Some(token) = node.last_token_before(end, include_zero_width) {
                return Some(token);
            }
            end = node.index();
            node = node.parent()?;
        }
    }
}

impl PartialEq for SyntaxToken {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.parent, &other.parent) && self.index == other.index
    }
}

impl Eq for SyntaxToken {}

impl Hash for SyntaxToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.parent).hash(state);
        self.index.hash(state);
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = self.span();
        write!(f, "{}@{}..{}", self.kind().name(), span.start, span.end)?;
        if self.is_missing() {
            f.write_str(" (missing)")
        } else {
            write!(f, " {:?}", self.text())
        }
    }
}

fn positioned(list: &[GreenTrivia], start: u32) -> impl Iterator<Item = SyntaxTrivia> + '_ {
    list.iter().scan(start, |position, trivia| {
        let span = Span::from_len(*position, trivia.width());
        *position = span.end;
        Some(SyntaxTrivia {
            kind: trivia.kind(),
            text: SmolStr::new(trivia.text()),
            span,
        })
    })
}

/// A trivia piece with its absolute span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxTrivia {
    kind: SyntaxKind,
    text: SmolStr,
    span: Span,
}

impl SyntaxTrivia {
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// A node or a token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxElement::Node(node) => node.kind(),
            SyntaxElement::Token(token) => token.kind(),
        }
    }

    pub fn full_span(&self) -> Span {
        match self {
            SyntaxElement::Node(node) => node.full_span(),
            SyntaxElement::Token(token) => token.full_span(),
        }
    }

    pub fn into_node(self) -> Option<SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<SyntaxToken> {
        match self {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        }
    }
}

#[cfg(test)]
mod tests;
