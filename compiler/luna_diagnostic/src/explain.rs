//! Embedded error documentation for `lunac explain`.
//!
//! Each code has a markdown file in `explain/` named after its number,
//! embedded at compile time.

use crate::ErrorCode;

/// Registry of embedded error documentation.
pub struct ErrorDocs;

impl ErrorDocs {
    /// Markdown documentation for a code, if any.
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        DOCS.iter().find(|(c, _)| *c == code).map(|(_, doc)| *doc)
    }

    /// Every documented code.
    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        DOCS.iter().map(|(code, _)| *code)
    }

    pub fn has_docs(code: ErrorCode) -> bool {
        DOCS.iter().any(|(c, _)| *c == code)
    }
}

static DOCS: &[(ErrorCode, &str)] = &[
    // Lexer
    (ErrorCode::BadCharacter, include_str!("explain/1001.md")),
    (ErrorCode::UnterminatedString, include_str!("explain/1002.md")),
    (ErrorCode::UnterminatedLongString, include_str!("explain/1003.md")),
    (ErrorCode::UnterminatedComment, include_str!("explain/1004.md")),
    (ErrorCode::InvalidEscape, include_str!("explain/1005.md")),
    (ErrorCode::InvalidNumber, include_str!("explain/1006.md")),
    (ErrorCode::IntegerLiteralOverflow, include_str!("explain/1007.md")),
    (ErrorCode::FeatureNotAvailable, include_str!("explain/1008.md")),
    (ErrorCode::InvalidLongBracket, include_str!("explain/1009.md")),
    // Parser
    (ErrorCode::UnexpectedToken, include_str!("explain/2001.md")),
    (ErrorCode::MissingBlockEnd, include_str!("explain/2002.md")),
    (ErrorCode::UnclosedDelimiter, include_str!("explain/2003.md")),
    // Binding
    (ErrorCode::MissingAssembly, include_str!("explain/3001.md")),
    (ErrorCode::UnsupportedSymbol, include_str!("explain/3002.md")),
    (ErrorCode::ObsoleteSymbol, include_str!("explain/3003.md")),
];
