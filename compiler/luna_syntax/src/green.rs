//! Green tree: immutable, position-independent tokens, trivia and nodes.
//!
//! Green elements know their width but not their position, so one `Arc`
//! can sit in several trees at once (incremental reparse relies on this).
//! Absolute positions are added by the red layer in [`crate::red`].

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use luna_diagnostic::DiagnosticInfo;
use luna_ir::{facts, SyntaxKind};
use luna_lexer_core::char_class::is_new_line;
use smallvec::SmallVec;
use smol_str::SmolStr;

/// Byte width of a piece of source text.
///
/// Source texts are bounded by `u32` offsets, so saturation never triggers
/// for text that came from a `SourceText`.
#[inline]
pub(crate) fn text_width(text: &str) -> u32 {
    u32::try_from(text.len()).unwrap_or(u32::MAX)
}

/// Whitespace, newline, comment or skipped text attached to a token.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenTrivia {
    kind: SyntaxKind,
    text: SmolStr,
}

impl GreenTrivia {
    pub fn new(kind: SyntaxKind, text: impl Into<SmolStr>) -> Self {
        debug_assert!(kind.is_trivia(), "{kind:?} is not a trivia kind");
        GreenTrivia {
            kind,
            text: text.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn width(&self) -> u32 {
        text_width(&self.text)
    }

    /// End-of-line trivia, or a comment / skipped run spanning a line break.
    pub fn contains_newline(&self) -> bool {
        self.kind == SyntaxKind::EndOfLineTrivia || self.text.chars().any(is_new_line)
    }
}

impl fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind.name(), self.text.as_str())
    }
}

/// Trivia attached to one side of a token. Most tokens carry at most one
/// whitespace run per side.
pub type TriviaList = SmallVec<[GreenTrivia; 2]>;

fn trivia_width(list: &[GreenTrivia]) -> u32 {
    list.iter().map(GreenTrivia::width).sum()
}

bitflags! {
    /// Per-token facts cached at construction.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u8 {
        /// Inserted by the parser; no source text.
        const MISSING = 1 << 0;
        /// Carries at least one syntax diagnostic.
        const HAS_DIAGNOSTICS = 1 << 1;
        /// Leading trivia contains a line break.
        const NEWLINE_BEFORE = 1 << 2;
    }
}

/// Literal value of a token.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    Integer(i64),
    Float(f64),
    String(SmolStr),
    Boolean(bool),
    Nil,
}

#[derive(Clone, PartialEq)]
struct GreenTokenData {
    kind: SyntaxKind,
    contextual_kind: Option<SyntaxKind>,
    flags: TokenFlags,
    /// `None` when the spelling is `facts::kind_text(kind)`.
    text: Option<SmolStr>,
    value: Option<TokenValue>,
    leading: TriviaList,
    trailing: TriviaList,
    full_width: u32,
    /// Offsets are relative to the token's full start.
    diagnostics: Box<[DiagnosticInfo]>,
}

/// An immutable token with its trivia. Cheap to clone.
#[derive(Clone, PartialEq)]
pub struct GreenToken(Arc<GreenTokenData>);

impl GreenToken {
    pub fn new(kind: SyntaxKind, text: &str, leading: TriviaList, trailing: TriviaList) -> Self {
        debug_assert!(
            !kind.is_node() && !kind.is_trivia(),
            "{kind:?} is not a token kind"
        );
        let stored = match facts::kind_text(kind) {
            Some(fixed) if fixed == text => None,
            _ => Some(SmolStr::new(text)),
        };
        let mut flags = TokenFlags::empty();
        flags.set(
            TokenFlags::NEWLINE_BEFORE,
            leading.iter().any(GreenTrivia::contains_newline),
        );
        let full_width = trivia_width(&leading) + text_width(text) + trivia_width(&trailing);
        GreenToken(Arc::new(GreenTokenData {
            kind,
            contextual_kind: None,
            flags,
            text: stored,
            value: None,
            leading,
            trailing,
            full_width,
            diagnostics: Box::default(),
        }))
    }

    /// A zero-width placeholder for a token the parser expected.
    pub fn missing(kind: SyntaxKind) -> Self {
        GreenToken(Arc::new(GreenTokenData {
            kind,
            contextual_kind: None,
            flags: TokenFlags::MISSING,
            text: None,
            value: None,
            leading: TriviaList::new(),
            trailing: TriviaList::new(),
            full_width: 0,
            diagnostics: Box::default(),
        }))
    }

    #[must_use]
    pub fn with_value(mut self, value: TokenValue) -> Self {
        Arc::make_mut(&mut self.0).value = Some(value);
        self
    }

    #[must_use]
    pub fn with_contextual_kind(mut self, kind: SyntaxKind) -> Self {
        Arc::make_mut(&mut self.0).contextual_kind = Some(kind);
        self
    }

    /// Attach syntax diagnostics, offsets relative to the token's full start.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Vec<DiagnosticInfo>) -> Self {
        if diagnostics.is_empty() {
            return self;
        }
        let data = Arc::make_mut(&mut self.0);
        let mut all = std::mem::take(&mut data.diagnostics).into_vec();
        all.extend(diagnostics);
        data.diagnostics = all.into_boxed_slice();
        data.flags.insert(TokenFlags::HAS_DIAGNOSTICS);
        self
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    #[inline]
    pub fn contextual_kind(&self) -> Option<SyntaxKind> {
        self.0.contextual_kind
    }

    #[inline]
    pub fn flags(&self) -> TokenFlags {
        self.0.flags
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.0.flags.contains(TokenFlags::MISSING)
    }

    #[inline]
    pub fn has_newline_before(&self) -> bool {
        self.0.flags.contains(TokenFlags::NEWLINE_BEFORE)
    }

    #[inline]
    pub fn has_diagnostics(&self) -> bool {
        self.0.flags.contains(TokenFlags::HAS_DIAGNOSTICS)
    }

    /// Token text without trivia. Empty for missing tokens.
    pub fn text(&self) -> &str {
        if self.is_missing() {
            return "";
        }
        self.0
            .text
            .as_deref()
            .or_else(|| facts::kind_text(self.0.kind))
            .unwrap_or("")
    }

    pub fn value(&self) -> Option<&TokenValue> {
        self.0.value.as_ref()
    }

    pub fn leading_trivia(&self) -> &[GreenTrivia] {
        &self.0.leading
    }

    pub fn trailing_trivia(&self) -> &[GreenTrivia] {
        &self.0.trailing
    }

    pub fn leading_width(&self) -> u32 {
        trivia_width(&self.0.leading)
    }

    pub fn trailing_width(&self) -> u32 {
        trivia_width(&self.0.trailing)
    }

    /// Width of the token text alone.
    pub fn width(&self) -> u32 {
        text_width(self.text())
    }

    /// Width including trivia.
    #[inline]
    pub fn full_width(&self) -> u32 {
        self.0.full_width
    }

    pub fn diagnostics(&self) -> &[DiagnosticInfo] {
        &self.0.diagnostics
    }

    /// Column of the token on its line, measured in leading whitespace.
    ///
    /// Walks the leading trivia: a newline resets the count, whitespace adds
    /// to it, and anything else (a comment) stops accumulation until the next
    /// newline. A block comment spanning lines leaves the token after text
    /// that is not indentation, so it resets and stops.
    pub fn whitespace_indent(&self) -> u32 {
        let mut indent = 0;
        let mut stopped = false;
        for trivia in &self.0.leading {
            match trivia.kind {
                SyntaxKind::EndOfLineTrivia => {
                    indent = 0;
                    stopped = false;
                }
                SyntaxKind::WhitespaceTrivia => {
                    if !stopped {
                        indent += trivia.width();
                    }
                }
                _ if trivia.contains_newline() => {
                    indent = 0;
                    stopped = true;
                }
                _ => stopped = true,
            }
        }
        indent
    }

    /// Append the full text (trivia included).
    pub fn write_to(&self, out: &mut String) {
        for trivia in &self.0.leading {
            out.push_str(trivia.text());
        }
        out.push_str(self.text());
        for trivia in &self.0.trailing {
            out.push_str(trivia.text());
        }
    }

    #[inline]
    pub fn ptr_eq(&self, other: &GreenToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            write!(f, "{} (missing)", self.kind().name())
        } else {
            write!(f, "{} {:?}", self.kind().name(), self.text())
        }
    }
}

/// A node or a token.
#[derive(Clone, Debug, PartialEq)]
pub enum GreenElement {
    Node(GreenNode),
    Token(GreenToken),
}

impl GreenElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            GreenElement::Node(node) => node.kind(),
            GreenElement::Token(token) => token.kind(),
        }
    }

    pub fn full_width(&self) -> u32 {
        match self {
            GreenElement::Node(node) => node.full_width(),
            GreenElement::Token(token) => token.full_width(),
        }
    }

    fn contains_diagnostics(&self) -> bool {
        match self {
            GreenElement::Node(node) => node.contains_diagnostics(),
            GreenElement::Token(token) => token.has_diagnostics(),
        }
    }

    fn write_to(&self, out: &mut String) {
        match self {
            GreenElement::Node(node) => node.write_to(out),
            GreenElement::Token(token) => token.write_to(out),
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        GreenElement::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        GreenElement::Token(token)
    }
}

#[derive(PartialEq)]
struct GreenNodeData {
    kind: SyntaxKind,
    slots: Box<[Option<GreenElement>]>,
    /// Start of each slot relative to the node's full start.
    offsets: Box<[u32]>,
    full_width: u32,
    contains_diagnostics: bool,
}

/// An immutable interior node. Empty slots stand for absent optional
/// children. Cheap to clone.
#[derive(Clone, PartialEq)]
pub struct GreenNode(Arc<GreenNodeData>);

impl GreenNode {
    pub fn new(kind: SyntaxKind, slots: impl IntoIterator<Item = Option<GreenElement>>) -> Self {
        let slots: Box<[Option<GreenElement>]> = slots.into_iter().collect();
        let mut offsets = Vec::with_capacity(slots.len());
        let mut full_width = 0u32;
        let mut contains_diagnostics = false;
        for slot in &*slots {
            offsets.push(full_width);
            if let Some(element) = slot {
                full_width += element.full_width();
                contains_diagnostics |= element.contains_diagnostics();
            }
        }
        GreenNode(Arc::new(GreenNodeData {
            kind,
            slots,
            offsets: offsets.into_boxed_slice(),
            full_width,
            contains_diagnostics,
        }))
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    #[inline]
    pub fn full_width(&self) -> u32 {
        self.0.full_width
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.0.slots.len()
    }

    pub fn slot(&self, index: usize) -> Option<&GreenElement> {
        self.0.slots.get(index)?.as_ref()
    }

    pub fn slots(&self) -> impl Iterator<Item = Option<&GreenElement>> {
        self.0.slots.iter().map(Option::as_ref)
    }

    /// Start of a slot relative to this node's full start; the full width
    /// for an index past the end.
    pub fn slot_offset(&self, index: usize) -> u32 {
        self.0.offsets.get(index).copied().unwrap_or(self.0.full_width)
    }

    /// The non-empty slot whose full range contains `offset` (relative).
    pub fn slot_at_offset(&self, offset: u32) -> Option<usize> {
        let candidates = self.0.offsets.partition_point(|&start| start <= offset);
        for index in (0..candidates).rev() {
            let width = self.slot(index).map_or(0, GreenElement::full_width);
            if width == 0 {
                continue;
            }
            let start = self.0.offsets[index];
            return (offset < start + width).then_some(index);
        }
        None
    }

    pub fn contains_diagnostics(&self) -> bool {
        self.0.contains_diagnostics
    }

    /// First token in document order, empty nodes skipped.
    pub fn first_token(&self) -> Option<&GreenToken> {
        self.slots().flatten().find_map(|element| match element {
            GreenElement::Token(token) => Some(token),
            GreenElement::Node(node) => node.first_token(),
        })
    }

    pub fn last_token(&self) -> Option<&GreenToken> {
        self.0
            .slots
            .iter()
            .rev()
            .flatten()
            .find_map(|element| match element {
                GreenElement::Token(token) => Some(token),
                GreenElement::Node(node) => node.last_token(),
            })
    }

    pub fn write_to(&self, out: &mut String) {
        for element in self.slots().flatten() {
            element.write_to(out);
        }
    }

    /// Full source text of the subtree.
    pub fn to_full_string(&self) -> String {
        let mut out = String::with_capacity(self.0.full_width as usize);
        self.write_to(&mut out);
        out
    }

    #[inline]
    pub fn ptr_eq(&self, other: &GreenNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.kind().name())
            .field("width", &self.full_width())
            .field("slots", &self.0.slots)
            .finish()
    }
}

/// Bottom-up builder with a stack of open nodes.
///
/// ```text
/// start_node(Statement)
///   token(local) token(x)
/// finish_node()
/// ```
#[derive(Default)]
pub struct GreenNodeBuilder {
    parents: Vec<(SyntaxKind, usize)>,
    children: Vec<Option<GreenElement>>,
}

impl GreenNodeBuilder {
    pub fn new() -> Self {
        GreenNodeBuilder::default()
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        debug_assert!(kind.is_node(), "{kind:?} is not a node kind");
        self.parents.push((kind, self.children.len()));
    }

    pub fn token(&mut self, token: GreenToken) {
        self.children.push(Some(GreenElement::Token(token)));
    }

    /// Push an already built node, e.g. one reused from a previous tree.
    pub fn node(&mut self, node: GreenNode) {
        self.children.push(Some(GreenElement::Node(node)));
    }

    /// Push an empty slot.
    pub fn empty_slot(&mut self) {
        self.children.push(None);
    }

    pub fn finish_node(&mut self) {
        debug_assert!(!self.parents.is_empty(), "finish_node without start_node");
        let Some((kind, first)) = self.parents.pop() else {
            return;
        };
        let slots: Vec<_> = self.children.drain(first..).collect();
        self.children
            .push(Some(GreenElement::Node(GreenNode::new(kind, slots))));
    }

    /// Depth of currently open nodes.
    pub fn depth(&self) -> usize {
        self.parents.len()
    }

    /// The single finished root.
    ///
    /// An unbalanced builder is a caller bug; in release builds the leftover
    /// children are wrapped in a `None`-kind node so nothing is lost.
    pub fn finish(mut self) -> GreenNode {
        debug_assert!(self.parents.is_empty(), "unfinished nodes remain");
        while !self.parents.is_empty() {
            self.finish_node();
        }
        let single_root = matches!(self.children.as_slice(), [Some(GreenElement::Node(_))]);
        debug_assert!(single_root, "builder must produce exactly one root node");
        if let [Some(GreenElement::Node(root))] = self.children.as_slice() {
            return root.clone();
        }
        GreenNode::new(SyntaxKind::None, self.children)
    }
}

#[cfg(test)]
mod tests;
