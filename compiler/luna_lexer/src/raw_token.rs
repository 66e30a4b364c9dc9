//! Raw scanner for fixed-spelling tokens and identifier heads.
//!
//! Logos handles longest-match for punctuation and operators. Constructs
//! that need context (numerals, strings, long brackets) are only recognised
//! by their first characters here; the lexer scans their bodies itself.

use logos::Logos;
use luna_ir::SyntaxKind;

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RawToken {
    /// ASCII identifier; non-ASCII continuation is picked up by the lexer.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
    /// First digit of a numeral.
    #[regex(r"[0-9]")]
    #[regex(r"\.[0-9]")]
    Number,
    #[token("\"")]
    DoubleQuote,
    #[token("'")]
    SingleQuote,
    /// `[[` or `[==[`
    #[regex(r"\[=*\[")]
    LongBracket,
    /// `[=` not followed by a second `[`
    #[regex(r"\[=+")]
    InvalidLongBracket,

    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    DotDotDot,
    #[token("..")]
    DotDot,
    #[token("..=")]
    DotDotEquals,
    #[token("@")]
    At,
    #[token("@@")]
    AtAt,
    #[token("\\")]
    Backslash,
    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("//")]
    SlashSlash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("#")]
    Hash,
    #[token("&")]
    Ampersand,
    #[token("~")]
    Tilde,
    #[token("|")]
    Pipe,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("==")]
    EqualsEquals,
    #[token("~=")]
    TildeEquals,
    #[token("!=")]
    BangEquals,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEquals,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEquals,
    #[token("=")]
    Equals,
    #[token("!")]
    Bang,
    #[token("+=")]
    PlusEquals,
    #[token("-=")]
    MinusEquals,
    #[token("*=")]
    StarEquals,
    #[token("/=")]
    SlashEquals,
    #[token("//=")]
    SlashSlashEquals,
    #[token("%=")]
    PercentEquals,
    #[token("^=")]
    CaretEquals,
}

impl RawToken {
    /// The first raw token of `text` and its byte length; `None` when no
    /// pattern matches the first character.
    pub(crate) fn first(text: &str) -> Option<(RawToken, usize)> {
        let mut lexer = RawToken::lexer(text);
        match lexer.next()? {
            Ok(raw) => Some((raw, lexer.span().end)),
            Err(()) => None,
        }
    }

    /// Kind of a fixed-spelling raw token.
    pub(crate) fn punctuation_kind(self) -> Option<SyntaxKind> {
        use SyntaxKind as K;
        let kind = match self {
            RawToken::Ident
            | RawToken::Number
            | RawToken::DoubleQuote
            | RawToken::SingleQuote
            | RawToken::LongBracket
            | RawToken::InvalidLongBracket => return None,
            RawToken::OpenParen => K::OpenParenToken,
            RawToken::CloseParen => K::CloseParenToken,
            RawToken::OpenBracket => K::OpenBracketToken,
            RawToken::CloseBracket => K::CloseBracketToken,
            RawToken::OpenBrace => K::OpenBraceToken,
            RawToken::CloseBrace => K::CloseBraceToken,
            RawToken::Semicolon => K::SemicolonToken,
            RawToken::Colon => K::ColonToken,
            RawToken::ColonColon => K::ColonColonToken,
            RawToken::Comma => K::CommaToken,
            RawToken::Dot => K::DotToken,
            RawToken::DotDotDot => K::DotDotDotToken,
            RawToken::DotDot => K::DotDotToken,
            RawToken::DotDotEquals => K::DotDotEqualsToken,
            RawToken::At => K::AtToken,
            RawToken::AtAt => K::AtAtToken,
            RawToken::Backslash => K::BackslashToken,
            RawToken::Arrow => K::MinusGreaterThanToken,
            RawToken::FatArrow => K::EqualsGreaterThanToken,
            RawToken::Plus => K::PlusToken,
            RawToken::Minus => K::MinusToken,
            RawToken::Star => K::StarToken,
            RawToken::Slash => K::SlashToken,
            RawToken::SlashSlash => K::SlashSlashToken,
            RawToken::Percent => K::PercentToken,
            RawToken::Caret => K::CaretToken,
            RawToken::Hash => K::HashToken,
            RawToken::Ampersand => K::AmpersandToken,
            RawToken::Tilde => K::TildeToken,
            RawToken::Pipe => K::PipeToken,
            RawToken::Shl => K::LessThanLessThanToken,
            RawToken::Shr => K::GreaterThanGreaterThanToken,
            RawToken::EqualsEquals => K::EqualsEqualsToken,
            RawToken::TildeEquals => K::TildeEqualsToken,
            RawToken::BangEquals => K::ExclamationEqualsToken,
            RawToken::Less => K::LessThanToken,
            RawToken::LessEquals => K::LessThanEqualsToken,
            RawToken::Greater => K::GreaterThanToken,
            RawToken::GreaterEquals => K::GreaterThanEqualsToken,
            RawToken::Equals => K::EqualsToken,
            RawToken::Bang => K::ExclamationToken,
            RawToken::PlusEquals => K::PlusEqualsToken,
            RawToken::MinusEquals => K::MinusEqualsToken,
            RawToken::StarEquals => K::StarEqualsToken,
            RawToken::SlashEquals => K::SlashEqualsToken,
            RawToken::SlashSlashEquals => K::SlashSlashEqualsToken,
            RawToken::PercentEquals => K::PercentEqualsToken,
            RawToken::CaretEquals => K::CaretEqualsToken,
        };
        Some(kind)
    }
}
