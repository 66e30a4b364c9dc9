//! Errors for semantic model queries.
//!
//! These are API misuse, never source problems: a bad position or a node
//! from another tree is the caller's mistake and is reported as `Err`.

/// Error answering a semantic model query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SemanticError {
    #[error("syntax node is not within this model's syntax tree")]
    NodeNotInTree,
    #[error("position {position} is outside the syntax tree ({start}..{end})")]
    PositionOutOfRange { position: u32, start: u32, end: u32 },
    #[error("operation was cancelled")]
    Cancelled,
}
