//! Syntax trees for the Luna front-end.
//!
//! The green tree ([`GreenNode`], [`GreenToken`], [`GreenTrivia`]) is
//! immutable, position-independent and shared by `Arc`; the parser builds it
//! with [`GreenNodeBuilder`]. The red tree ([`SyntaxNode`], [`SyntaxToken`])
//! adds absolute positions and parent links on demand. A [`SyntaxTree`] ties
//! a green root to its [`luna_ir::SourceText`] and [`luna_ir::ParseOptions`].

mod green;
mod red;
mod tree;

pub use green::{
    GreenElement, GreenNode, GreenNodeBuilder, GreenToken, GreenTrivia, TokenFlags, TokenValue,
    TriviaList,
};
pub use red::{SyntaxElement, SyntaxNode, SyntaxToken, SyntaxTrivia};
pub use tree::{find_token_at_position, SyntaxTree};
