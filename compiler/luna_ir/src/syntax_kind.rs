//! Dense kind tag shared by tokens, trivia and nodes.

/// Defines `SyntaxKind` together with its raw-value tables.
///
/// Every kind gets an explicit discriminant so ranges stay stable when
/// variants are added.
macro_rules! define_syntax_kinds {
    ($( $(#[$meta:meta])* $name:ident = $value:literal, )*) => {
        /// Kind tag for every token, trivia and node, with semantic range layout.
        ///
        /// | Range   | Category              |
        /// |---------|-----------------------|
        /// | 0       | `None`                |
        /// | 1-49    | Punctuation           |
        /// | 50-99   | Operators             |
        /// | 100-149 | Keywords              |
        /// | 150-179 | Contextual keywords   |
        /// | 180-229 | Metamethod names      |
        /// | 230-259 | Literal / text tokens |
        /// | 260-279 | Trivia                |
        /// | 300-399 | Nodes                 |
        ///
        /// # Invariant
        ///
        /// Ranges never overlap, so a kind's category is a range test on its
        /// discriminant. Gaps inside a range are reserved for future kinds.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $( $(#[$meta])* $name = $value, )*
        }

        impl SyntaxKind {
            /// Every kind, in discriminant order.
            pub const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$name,)*];

            /// Recover a kind from its raw value. Gaps yield `None`.
            pub const fn from_raw(raw: u16) -> Option<SyntaxKind> {
                match raw {
                    $( $value => Some(SyntaxKind::$name), )*
                    _ => None,
                }
            }

            /// The variant name, for debug dumps.
            pub const fn name(self) -> &'static str {
                match self {
                    $( SyntaxKind::$name => stringify!($name), )*
                }
            }
        }
    };
}

define_syntax_kinds! {
    None = 0,

    // === Punctuation (1-49) ===
    /// `(`
    OpenParenToken = 1,
    /// `)`
    CloseParenToken = 2,
    /// `[`
    OpenBracketToken = 3,
    /// `]`
    CloseBracketToken = 4,
    /// `{`
    OpenBraceToken = 5,
    /// `}`
    CloseBraceToken = 6,
    /// `;`
    SemicolonToken = 7,
    /// `:`
    ColonToken = 8,
    /// `::`
    ColonColonToken = 9,
    /// `,`
    CommaToken = 10,
    /// `.`
    DotToken = 11,
    /// `...`
    DotDotDotToken = 12,
    /// `@` (MoonScript self access)
    AtToken = 13,
    /// `@@` (MoonScript class access)
    AtAtToken = 14,
    /// `\` (MoonScript method call)
    BackslashToken = 15,
    /// `->` (MoonScript function)
    MinusGreaterThanToken = 16,
    /// `=>` (MoonScript fat-arrow function)
    EqualsGreaterThanToken = 17,
    /// `#{` opening a string interpolation
    HashOpenBraceToken = 18,

    // === Operators (50-99) ===
    PlusToken = 50,
    MinusToken = 51,
    StarToken = 52,
    SlashToken = 53,
    /// `//` floor division (Lua 5.3+)
    SlashSlashToken = 54,
    PercentToken = 55,
    CaretToken = 56,
    /// `#` length
    HashToken = 57,
    AmpersandToken = 58,
    TildeToken = 59,
    PipeToken = 60,
    LessThanLessThanToken = 61,
    GreaterThanGreaterThanToken = 62,
    /// `..` concatenation
    DotDotToken = 63,
    EqualsEqualsToken = 64,
    /// `~=`
    TildeEqualsToken = 65,
    /// `!=` (MoonScript)
    ExclamationEqualsToken = 66,
    LessThanToken = 67,
    LessThanEqualsToken = 68,
    GreaterThanToken = 69,
    GreaterThanEqualsToken = 70,
    EqualsToken = 71,
    /// `!` (MoonScript call without arguments)
    ExclamationToken = 72,
    PlusEqualsToken = 73,
    MinusEqualsToken = 74,
    StarEqualsToken = 75,
    SlashEqualsToken = 76,
    SlashSlashEqualsToken = 77,
    PercentEqualsToken = 78,
    CaretEqualsToken = 79,
    DotDotEqualsToken = 80,

    // === Keywords (100-149) ===
    AndKeyword = 100,
    BreakKeyword = 101,
    DoKeyword = 102,
    ElseKeyword = 103,
    ElseIfKeyword = 104,
    EndKeyword = 105,
    FalseKeyword = 106,
    ForKeyword = 107,
    FunctionKeyword = 108,
    GotoKeyword = 109,
    IfKeyword = 110,
    InKeyword = 111,
    LocalKeyword = 112,
    NilKeyword = 113,
    NotKeyword = 114,
    OrKeyword = 115,
    RepeatKeyword = 116,
    ReturnKeyword = 117,
    ThenKeyword = 118,
    TrueKeyword = 119,
    UntilKeyword = 120,
    WhileKeyword = 121,
    // MoonScript keywords (130-149)
    ClassKeyword = 130,
    ExtendsKeyword = 131,
    WithKeyword = 132,
    SwitchKeyword = 133,
    WhenKeyword = 134,
    UnlessKeyword = 135,
    ImportKeyword = 136,
    FromKeyword = 137,
    ExportKeyword = 138,
    UsingKeyword = 139,
    ContinueKeyword = 140,
    SuperKeyword = 141,

    // === Contextual keywords (150-179) ===
    /// `const` attribute (Lua 5.4 `local x <const>`)
    ConstKeyword = 150,
    /// `close` attribute (Lua 5.4 `local x <close>`)
    CloseKeyword = 151,
    /// `self`
    SelfKeyword = 152,

    // === Metamethod names (180-229) ===
    IndexMetamethod = 180,
    NewIndexMetamethod = 181,
    CallMetamethod = 182,
    ConcatMetamethod = 183,
    UnmMetamethod = 184,
    AddMetamethod = 185,
    SubMetamethod = 186,
    MulMetamethod = 187,
    DivMetamethod = 188,
    ModMetamethod = 189,
    PowMetamethod = 190,
    IDivMetamethod = 191,
    BAndMetamethod = 192,
    BOrMetamethod = 193,
    BXorMetamethod = 194,
    ShlMetamethod = 195,
    ShrMetamethod = 196,
    BNotMetamethod = 197,
    EqMetamethod = 198,
    LtMetamethod = 199,
    LeMetamethod = 200,
    LenMetamethod = 201,
    ToStringMetamethod = 202,
    MetatableMetamethod = 203,
    NameMetamethod = 204,
    ModeMetamethod = 205,
    GcMetamethod = 206,
    CloseMetamethod = 207,
    PairsMetamethod = 208,
    IPairsMetamethod = 209,

    // === Literal / text tokens (230-259) ===
    IdentifierToken = 230,
    NumericLiteralToken = 231,
    StringLiteralToken = 232,
    /// Opening `"` of an interpolated string.
    InterpolatedStringStartToken = 233,
    /// Literal text between interpolations.
    InterpolatedStringTextToken = 234,
    /// Closing `"` of an interpolated string.
    InterpolatedStringEndToken = 235,
    /// Unrecognised or malformed input.
    BadToken = 236,
    EndOfFileToken = 237,

    // === Trivia (260-279) ===
    WhitespaceTrivia = 260,
    EndOfLineTrivia = 261,
    SingleLineCommentTrivia = 262,
    MultiLineCommentTrivia = 263,
    /// `#!` line at the very start of a file.
    ShebangTrivia = 264,
    SkippedTokensTrivia = 265,

    // === Nodes (300-399) ===
    CompilationUnit = 300,
    StatementList = 301,
    Statement = 302,
    /// Keyword-delimited block (`do ... end`, `then ... end`, ...).
    Block = 303,
    ParenthesizedGroup = 304,
    BracketedGroup = 305,
    BracedGroup = 306,
    InterpolatedString = 307,
    Interpolation = 308,
}

impl SyntaxKind {
    /// Raw discriminant.
    #[inline]
    pub const fn raw(self) -> u16 {
        self as u16
    }

    #[inline]
    pub const fn is_punctuation(self) -> bool {
        matches!(self.raw(), 1..=49)
    }

    #[inline]
    pub const fn is_operator(self) -> bool {
        matches!(self.raw(), 50..=99)
    }

    /// Reserved keyword (never an identifier).
    #[inline]
    pub const fn is_reserved_keyword(self) -> bool {
        matches!(self.raw(), 100..=149)
    }

    #[inline]
    pub const fn is_contextual_keyword(self) -> bool {
        matches!(self.raw(), 150..=179)
    }

    #[inline]
    pub const fn is_keyword(self) -> bool {
        self.is_reserved_keyword() || self.is_contextual_keyword()
    }

    #[inline]
    pub const fn is_metamethod(self) -> bool {
        matches!(self.raw(), 180..=229)
    }

    /// Identifier, literal, interpolation piece, bad token or end of file.
    #[inline]
    pub const fn is_literal_or_text(self) -> bool {
        matches!(self.raw(), 230..=259)
    }

    /// Kinds a green token may carry.
    ///
    /// Contextual keywords and metamethod names are never token kinds on
    /// their own: they ride on identifier tokens as a contextual kind.
    #[inline]
    pub const fn is_token(self) -> bool {
        self.is_punctuation()
            || self.is_operator()
            || self.is_reserved_keyword()
            || self.is_literal_or_text()
    }

    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(self.raw(), 260..=279)
    }

    #[inline]
    pub const fn is_node(self) -> bool {
        matches!(self.raw(), 300..=399)
    }

    #[inline]
    pub const fn is_comment(self) -> bool {
        matches!(
            self,
            SyntaxKind::SingleLineCommentTrivia | SyntaxKind::MultiLineCommentTrivia
        )
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::SyntaxKind;
    crate::static_assert_size!(SyntaxKind, 2);
}

#[cfg(test)]
mod tests;
