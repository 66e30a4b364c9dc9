use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Severity;

/// Error codes for all front-end diagnostics.
///
/// The numeric code's first digit is the phase that raises it:
/// - 1xxx: Lexer
/// - 2xxx: Parser
/// - 3xxx: Binding / use-site
///
/// Rendered codes carry the dialect's prefix (`LUA1007`, `MOON1007`); the
/// number itself is shared across dialects.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum ErrorCode {
    // Lexer (1xxx)
    /// Character that cannot start any token
    BadCharacter,
    /// Short string literal missing its closing quote
    UnterminatedString,
    /// Long string `[[ ... ]]` missing its closing bracket
    UnterminatedLongString,
    /// Long comment `--[[ ... ]]` missing its closing bracket
    UnterminatedComment,
    /// Unknown or malformed escape sequence
    InvalidEscape,
    /// Malformed numeric literal (`1e`, `0x`)
    InvalidNumber,
    /// Integer literal that does not fit in 64 bits
    IntegerLiteralOverflow,
    /// Syntax used with a language version or dialect that lacks it
    FeatureNotAvailable,
    /// `[=` not followed by `[`
    InvalidLongBracket,

    // Parser (2xxx)
    /// Token that cannot appear here
    UnexpectedToken,
    /// Keyword block without its closing keyword
    MissingBlockEnd,
    /// Bracket, paren or brace without its closer
    UnclosedDelimiter,

    // Binding (3xxx)
    /// Symbol comes from an assembly that could not be loaded
    MissingAssembly,
    /// Symbol the current language cannot consume
    UnsupportedSymbol,
    /// Symbol marked obsolete
    ObsoleteSymbol,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::BadCharacter,
        ErrorCode::UnterminatedString,
        ErrorCode::UnterminatedLongString,
        ErrorCode::UnterminatedComment,
        ErrorCode::InvalidEscape,
        ErrorCode::InvalidNumber,
        ErrorCode::IntegerLiteralOverflow,
        ErrorCode::FeatureNotAvailable,
        ErrorCode::InvalidLongBracket,
        ErrorCode::UnexpectedToken,
        ErrorCode::MissingBlockEnd,
        ErrorCode::UnclosedDelimiter,
        ErrorCode::MissingAssembly,
        ErrorCode::UnsupportedSymbol,
        ErrorCode::ObsoleteSymbol,
    ];

    /// The numeric code.
    pub const fn number(self) -> u16 {
        match self {
            ErrorCode::BadCharacter => 1001,
            ErrorCode::UnterminatedString => 1002,
            ErrorCode::UnterminatedLongString => 1003,
            ErrorCode::UnterminatedComment => 1004,
            ErrorCode::InvalidEscape => 1005,
            ErrorCode::InvalidNumber => 1006,
            ErrorCode::IntegerLiteralOverflow => 1007,
            ErrorCode::FeatureNotAvailable => 1008,
            ErrorCode::InvalidLongBracket => 1009,
            ErrorCode::UnexpectedToken => 2001,
            ErrorCode::MissingBlockEnd => 2002,
            ErrorCode::UnclosedDelimiter => 2003,
            ErrorCode::MissingAssembly => 3001,
            ErrorCode::UnsupportedSymbol => 3002,
            ErrorCode::ObsoleteSymbol => 3003,
        }
    }

    /// Look a code up by number, ignoring any alphabetic prefix
    /// (`"1007"`, `"LUA1007"`, `"moon1007"`).
    pub fn from_code_str(text: &str) -> Option<ErrorCode> {
        let digits = text.trim_start_matches(|c: char| c.is_ascii_alphabetic());
        let number: u16 = digits.parse().ok()?;
        ErrorCode::ALL.iter().copied().find(|code| code.number() == number)
    }

    /// Severity a diagnostic with this code gets unless overridden.
    pub const fn default_severity(self) -> Severity {
        match self {
            ErrorCode::ObsoleteSymbol => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub const fn is_lexer_error(self) -> bool {
        self.number() / 1000 == 1
    }

    pub const fn is_parser_error(self) -> bool {
        self.number() / 1000 == 2
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.number())
    }
}
