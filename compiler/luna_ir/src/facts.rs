//! Static facts about syntax kinds.
//!
//! Text for fixed-spelling kinds, operator and block classification, and the
//! coarse highlighting classes tooling consumes. Everything here is a pure
//! function of the kind; dialect-dependent keyword tables live in
//! [`crate::profile`].

use crate::SyntaxKind;

/// Fixed spelling of a kind, if it has one.
///
/// Punctuation, operators, keywords, contextual keywords and metamethod
/// names have a single spelling. Identifiers, literals, trivia and nodes
/// return `None`: their text lives on the token.
pub const fn kind_text(kind: SyntaxKind) -> Option<&'static str> {
    use SyntaxKind as K;
    let text = match kind {
        K::OpenParenToken => "(",
        K::CloseParenToken => ")",
        K::OpenBracketToken => "[",
        K::CloseBracketToken => "]",
        K::OpenBraceToken => "{",
        K::CloseBraceToken => "}",
        K::SemicolonToken => ";",
        K::ColonToken => ":",
        K::ColonColonToken => "::",
        K::CommaToken => ",",
        K::DotToken => ".",
        K::DotDotDotToken => "...",
        K::AtToken => "@",
        K::AtAtToken => "@@",
        K::BackslashToken => "\\",
        K::MinusGreaterThanToken => "->",
        K::EqualsGreaterThanToken => "=>",
        K::HashOpenBraceToken => "#{",

        K::PlusToken => "+",
        K::MinusToken => "-",
        K::StarToken => "*",
        K::SlashToken => "/",
        K::SlashSlashToken => "//",
        K::PercentToken => "%",
        K::CaretToken => "^",
        K::HashToken => "#",
        K::AmpersandToken => "&",
        K::TildeToken => "~",
        K::PipeToken => "|",
        K::LessThanLessThanToken => "<<",
        K::GreaterThanGreaterThanToken => ">>",
        K::DotDotToken => "..",
        K::EqualsEqualsToken => "==",
        K::TildeEqualsToken => "~=",
        K::ExclamationEqualsToken => "!=",
        K::LessThanToken => "<",
        K::LessThanEqualsToken => "<=",
        K::GreaterThanToken => ">",
        K::GreaterThanEqualsToken => ">=",
        K::EqualsToken => "=",
        K::ExclamationToken => "!",
        K::PlusEqualsToken => "+=",
        K::MinusEqualsToken => "-=",
        K::StarEqualsToken => "*=",
        K::SlashEqualsToken => "/=",
        K::SlashSlashEqualsToken => "//=",
        K::PercentEqualsToken => "%=",
        K::CaretEqualsToken => "^=",
        K::DotDotEqualsToken => "..=",

        K::AndKeyword => "and",
        K::BreakKeyword => "break",
        K::DoKeyword => "do",
        K::ElseKeyword => "else",
        K::ElseIfKeyword => "elseif",
        K::EndKeyword => "end",
        K::FalseKeyword => "false",
        K::ForKeyword => "for",
        K::FunctionKeyword => "function",
        K::GotoKeyword => "goto",
        K::IfKeyword => "if",
        K::InKeyword => "in",
        K::LocalKeyword => "local",
        K::NilKeyword => "nil",
        K::NotKeyword => "not",
        K::OrKeyword => "or",
        K::RepeatKeyword => "repeat",
        K::ReturnKeyword => "return",
        K::ThenKeyword => "then",
        K::TrueKeyword => "true",
        K::UntilKeyword => "until",
        K::WhileKeyword => "while",
        K::ClassKeyword => "class",
        K::ExtendsKeyword => "extends",
        K::WithKeyword => "with",
        K::SwitchKeyword => "switch",
        K::WhenKeyword => "when",
        K::UnlessKeyword => "unless",
        K::ImportKeyword => "import",
        K::FromKeyword => "from",
        K::ExportKeyword => "export",
        K::UsingKeyword => "using",
        K::ContinueKeyword => "continue",
        K::SuperKeyword => "super",

        K::ConstKeyword => "const",
        K::CloseKeyword => "close",
        K::SelfKeyword => "self",

        K::IndexMetamethod => "__index",
        K::NewIndexMetamethod => "__newindex",
        K::CallMetamethod => "__call",
        K::ConcatMetamethod => "__concat",
        K::UnmMetamethod => "__unm",
        K::AddMetamethod => "__add",
        K::SubMetamethod => "__sub",
        K::MulMetamethod => "__mul",
        K::DivMetamethod => "__div",
        K::ModMetamethod => "__mod",
        K::PowMetamethod => "__pow",
        K::IDivMetamethod => "__idiv",
        K::BAndMetamethod => "__band",
        K::BOrMetamethod => "__bor",
        K::BXorMetamethod => "__bxor",
        K::ShlMetamethod => "__shl",
        K::ShrMetamethod => "__shr",
        K::BNotMetamethod => "__bnot",
        K::EqMetamethod => "__eq",
        K::LtMetamethod => "__lt",
        K::LeMetamethod => "__le",
        K::LenMetamethod => "__len",
        K::ToStringMetamethod => "__tostring",
        K::MetatableMetamethod => "__metatable",
        K::NameMetamethod => "__name",
        K::ModeMetamethod => "__mode",
        K::GcMetamethod => "__gc",
        K::CloseMetamethod => "__close",
        K::PairsMetamethod => "__pairs",
        K::IPairsMetamethod => "__ipairs",

        _ => return None,
    };
    Some(text)
}

/// Fixed spelling for a raw kind value, or `""` for kinds without one
/// and for raw values that name no kind.
pub fn get_kind_text(raw: u16) -> &'static str {
    SyntaxKind::from_raw(raw)
        .and_then(kind_text)
        .unwrap_or("")
}

/// Look up a metamethod name (`__index`, `__add`, ...).
///
/// Exact, case-sensitive match: metamethod lookup in Lua is by string key.
pub fn metamethod_kind(text: &str) -> Option<SyntaxKind> {
    use SyntaxKind as K;
    let name = text.strip_prefix("__")?;
    let kind = match name {
        "index" => K::IndexMetamethod,
        "newindex" => K::NewIndexMetamethod,
        "call" => K::CallMetamethod,
        "concat" => K::ConcatMetamethod,
        "unm" => K::UnmMetamethod,
        "add" => K::AddMetamethod,
        "sub" => K::SubMetamethod,
        "mul" => K::MulMetamethod,
        "div" => K::DivMetamethod,
        "mod" => K::ModMetamethod,
        "pow" => K::PowMetamethod,
        "idiv" => K::IDivMetamethod,
        "band" => K::BAndMetamethod,
        "bor" => K::BOrMetamethod,
        "bxor" => K::BXorMetamethod,
        "shl" => K::ShlMetamethod,
        "shr" => K::ShrMetamethod,
        "bnot" => K::BNotMetamethod,
        "eq" => K::EqMetamethod,
        "lt" => K::LtMetamethod,
        "le" => K::LeMetamethod,
        "len" => K::LenMetamethod,
        "tostring" => K::ToStringMetamethod,
        "metatable" => K::MetatableMetamethod,
        "name" => K::NameMetamethod,
        "mode" => K::ModeMetamethod,
        "gc" => K::GcMetamethod,
        "close" => K::CloseMetamethod,
        "pairs" => K::PairsMetamethod,
        "ipairs" => K::IPairsMetamethod,
        _ => return None,
    };
    Some(kind)
}

/// Coarse token class for syntax highlighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Keyword,
    Identifier,
    Number,
    String,
    Operator,
    Punctuation,
    Comment,
    Whitespace,
    /// Bad tokens and skipped text.
    Error,
    /// End of file and node kinds.
    Other,
}

/// Classify a kind for highlighting.
pub const fn token_class(kind: SyntaxKind) -> TokenClass {
    use SyntaxKind as K;
    if kind.is_keyword() {
        return TokenClass::Keyword;
    }
    if kind.is_operator() {
        return TokenClass::Operator;
    }
    if kind.is_punctuation() {
        return TokenClass::Punctuation;
    }
    match kind {
        K::IdentifierToken => TokenClass::Identifier,
        K::NumericLiteralToken => TokenClass::Number,
        K::StringLiteralToken
        | K::InterpolatedStringStartToken
        | K::InterpolatedStringTextToken
        | K::InterpolatedStringEndToken => TokenClass::String,
        K::SingleLineCommentTrivia | K::MultiLineCommentTrivia | K::ShebangTrivia => {
            TokenClass::Comment
        }
        K::WhitespaceTrivia | K::EndOfLineTrivia => TokenClass::Whitespace,
        K::BadToken | K::SkippedTokensTrivia => TokenClass::Error,
        _ => TokenClass::Other,
    }
}

/// Classify a raw kind value. `None` for raw values that name no kind.
pub fn token_class_raw(raw: u16) -> Option<TokenClass> {
    SyntaxKind::from_raw(raw).map(token_class)
}

/// Operators that take two operands.
///
/// `-` and `~` are both unary and binary.
pub const fn is_binary_operator(kind: SyntaxKind) -> bool {
    use SyntaxKind as K;
    matches!(
        kind,
        K::PlusToken
            | K::MinusToken
            | K::StarToken
            | K::SlashToken
            | K::SlashSlashToken
            | K::PercentToken
            | K::CaretToken
            | K::AmpersandToken
            | K::TildeToken
            | K::PipeToken
            | K::LessThanLessThanToken
            | K::GreaterThanGreaterThanToken
            | K::DotDotToken
            | K::EqualsEqualsToken
            | K::TildeEqualsToken
            | K::ExclamationEqualsToken
            | K::LessThanToken
            | K::LessThanEqualsToken
            | K::GreaterThanToken
            | K::GreaterThanEqualsToken
            | K::AndKeyword
            | K::OrKeyword
    )
}

pub const fn is_unary_operator(kind: SyntaxKind) -> bool {
    use SyntaxKind as K;
    matches!(
        kind,
        K::MinusToken | K::NotKeyword | K::HashToken | K::TildeToken
    )
}

/// `+=`, `-=`, ... `..=`.
pub const fn is_compound_assignment(kind: SyntaxKind) -> bool {
    matches!(kind.raw(), 73..=80)
}

/// Bitwise operators, which need integer support (Lua 5.3+).
pub const fn is_bitwise_operator(kind: SyntaxKind) -> bool {
    use SyntaxKind as K;
    matches!(
        kind,
        K::AmpersandToken
            | K::PipeToken
            | K::LessThanLessThanToken
            | K::GreaterThanGreaterThanToken
    )
}

/// A token after which a newline does not end the statement.
pub const fn is_statement_continuation(kind: SyntaxKind) -> bool {
    use SyntaxKind as K;
    is_binary_operator(kind)
        || is_unary_operator(kind)
        || is_compound_assignment(kind)
        || matches!(
            kind,
            K::CommaToken
                | K::EqualsToken
                | K::DotToken
                | K::ColonToken
                | K::BackslashToken
                | K::OpenParenToken
                | K::OpenBracketToken
                | K::OpenBraceToken
                | K::LocalKeyword
                | K::ReturnKeyword
                | K::UntilKeyword
                | K::IfKeyword
                | K::ElseIfKeyword
                | K::WhileKeyword
                | K::ForKeyword
                | K::InKeyword
                | K::GotoKeyword
        )
}

/// A token that continues the previous line's statement when it begins a
/// new line.
///
/// Excludes operators that can also start an expression (`-`, `~`).
pub const fn is_statement_continuation_start(kind: SyntaxKind) -> bool {
    use SyntaxKind as K;
    (is_binary_operator(kind) && !is_unary_operator(kind))
        || is_compound_assignment(kind)
        || matches!(
            kind,
            K::CommaToken
                | K::EqualsToken
                | K::DotToken
                | K::ColonToken
                | K::BackslashToken
                | K::ThenKeyword
                | K::DoKeyword
                | K::InKeyword
        )
}

/// Keywords that open a keyword-delimited block in Lua.
///
/// `else` both closes the preceding block and opens the next one.
pub const fn is_block_opener(kind: SyntaxKind) -> bool {
    use SyntaxKind as K;
    matches!(
        kind,
        K::DoKeyword | K::ThenKeyword | K::FunctionKeyword | K::RepeatKeyword | K::ElseKeyword
    )
}

/// Keywords that close a keyword-delimited block in Lua.
pub const fn is_block_closer(kind: SyntaxKind) -> bool {
    use SyntaxKind as K;
    matches!(
        kind,
        K::EndKeyword | K::UntilKeyword | K::ElseIfKeyword | K::ElseKeyword
    )
}

/// The closer expected for an opening delimiter.
pub const fn closing_delimiter(open: SyntaxKind) -> Option<SyntaxKind> {
    use SyntaxKind as K;
    match open {
        K::OpenParenToken => Some(K::CloseParenToken),
        K::OpenBracketToken => Some(K::CloseBracketToken),
        K::OpenBraceToken | K::HashOpenBraceToken => Some(K::CloseBraceToken),
        _ => None,
    }
}

pub const fn is_closing_delimiter(kind: SyntaxKind) -> bool {
    use SyntaxKind as K;
    matches!(
        kind,
        K::CloseParenToken | K::CloseBracketToken | K::CloseBraceToken
    )
}

#[cfg(test)]
mod tests;
