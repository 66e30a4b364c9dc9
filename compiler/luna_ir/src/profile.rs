//! Dialect profiles.
//!
//! One lexer and one parser serve both Lua and MoonScript. Everything that
//! differs between the two is asked of a [`DialectProfile`]: which words are
//! reserved, which are contextual, and which surface features exist.
//!
//! # Keyword lookup
//!
//! Reserved words are resolved with a length-bucketed `match`: the length of
//! the identifier rejects most candidates before any string comparison.
//! Lookup is exact. Case folding, when enabled, is the caller's job.

use std::fmt;
use std::str::FromStr;

use crate::{LanguageVersion, OptionsError, SyntaxKind};

/// Source dialect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    #[default]
    Lua,
    MoonScript,
}

impl Dialect {
    /// The profile implementing this dialect's lexical rules.
    pub fn profile(self) -> &'static dyn DialectProfile {
        match self {
            Dialect::Lua => &LUA_PROFILE,
            Dialect::MoonScript => &MOONSCRIPT_PROFILE,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Dialect::Lua => "lua",
            Dialect::MoonScript => "moonscript",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lua" | "Lua" => Ok(Dialect::Lua),
            "moon" | "moonscript" | "MoonScript" => Ok(Dialect::MoonScript),
            _ => Err(OptionsError::UnknownDialect(s.to_owned())),
        }
    }
}

/// Lexical rules of one dialect.
///
/// Implementations are stateless and shared as `&'static dyn DialectProfile`.
pub trait DialectProfile: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Reserved keyword spelled exactly `text`, if any.
    fn keyword_kind(&self, text: &str, version: LanguageVersion) -> Option<SyntaxKind>;

    /// Contextual keyword spelled exactly `text`.
    ///
    /// Contextual keywords are lexed as identifiers; the kind returned here
    /// rides along as the token's contextual kind.
    fn contextual_keyword_kind(&self, text: &str, version: LanguageVersion) -> Option<SyntaxKind>;

    /// Blocks are delimited by keywords (`do ... end`) rather than indentation.
    fn has_keyword_blocks(&self) -> bool;

    /// `"...#{expr}..."` strings.
    fn supports_interpolation(&self) -> bool;

    /// MoonScript-only punctuation: `!=`, `!`, `->`, `=>`, `@`, `@@`, `\`.
    fn supports_moon_operators(&self) -> bool;
}

/// Lua 5.1 - 5.4.
#[derive(Clone, Copy, Debug, Default)]
pub struct LuaProfile;

/// MoonScript.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoonScriptProfile;

static LUA_PROFILE: LuaProfile = LuaProfile;
static MOONSCRIPT_PROFILE: MoonScriptProfile = MoonScriptProfile;

impl DialectProfile for LuaProfile {
    fn dialect(&self) -> Dialect {
        Dialect::Lua
    }

    fn keyword_kind(&self, text: &str, version: LanguageVersion) -> Option<SyntaxKind> {
        match lua_keyword(text)? {
            SyntaxKind::GotoKeyword if !version.has_goto() => None,
            kind => Some(kind),
        }
    }

    fn contextual_keyword_kind(&self, text: &str, version: LanguageVersion) -> Option<SyntaxKind> {
        match text {
            "const" => Some(SyntaxKind::ConstKeyword),
            "close" => Some(SyntaxKind::CloseKeyword),
            "self" => Some(SyntaxKind::SelfKeyword),
            // 5.1 code may use `goto` as a name; flag it for tooling.
            "goto" if !version.has_goto() => Some(SyntaxKind::GotoKeyword),
            _ => None,
        }
    }

    fn has_keyword_blocks(&self) -> bool {
        true
    }

    fn supports_interpolation(&self) -> bool {
        false
    }

    fn supports_moon_operators(&self) -> bool {
        false
    }
}

impl DialectProfile for MoonScriptProfile {
    fn dialect(&self) -> Dialect {
        Dialect::MoonScript
    }

    fn keyword_kind(&self, text: &str, _version: LanguageVersion) -> Option<SyntaxKind> {
        if let Some(kind) = moonscript_keyword(text) {
            return Some(kind);
        }
        match lua_keyword(text)? {
            // Block keywords MoonScript replaced with indentation are names.
            SyntaxKind::EndKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::GotoKeyword
            | SyntaxKind::RepeatKeyword
            | SyntaxKind::UntilKeyword => None,
            kind => Some(kind),
        }
    }

    fn contextual_keyword_kind(&self, text: &str, _version: LanguageVersion) -> Option<SyntaxKind> {
        match text {
            "self" => Some(SyntaxKind::SelfKeyword),
            _ => None,
        }
    }

    fn has_keyword_blocks(&self) -> bool {
        false
    }

    fn supports_interpolation(&self) -> bool {
        true
    }

    fn supports_moon_operators(&self) -> bool {
        true
    }
}

/// Lua reserved words, all versions. `goto` is gated by the caller.
fn lua_keyword(text: &str) -> Option<SyntaxKind> {
    use SyntaxKind as K;
    let bytes = text.as_bytes();
    // Guard: all keywords are 2-8 lowercase ASCII chars
    if !(2..=8).contains(&bytes.len()) || !bytes[0].is_ascii_lowercase() {
        return None;
    }
    match bytes.len() {
        2 => match text {
            "do" => Some(K::DoKeyword),
            "if" => Some(K::IfKeyword),
            "in" => Some(K::InKeyword),
            "or" => Some(K::OrKeyword),
            _ => None,
        },
        3 => match text {
            "and" => Some(K::AndKeyword),
            "end" => Some(K::EndKeyword),
            "for" => Some(K::ForKeyword),
            "nil" => Some(K::NilKeyword),
            "not" => Some(K::NotKeyword),
            _ => None,
        },
        4 => match text {
            "else" => Some(K::ElseKeyword),
            "goto" => Some(K::GotoKeyword),
            "then" => Some(K::ThenKeyword),
            "true" => Some(K::TrueKeyword),
            _ => None,
        },
        5 => match text {
            "break" => Some(K::BreakKeyword),
            "false" => Some(K::FalseKeyword),
            "local" => Some(K::LocalKeyword),
            "until" => Some(K::UntilKeyword),
            "while" => Some(K::WhileKeyword),
            _ => None,
        },
        6 => match text {
            "elseif" => Some(K::ElseIfKeyword),
            "repeat" => Some(K::RepeatKeyword),
            "return" => Some(K::ReturnKeyword),
            _ => None,
        },
        8 => match text {
            "function" => Some(K::FunctionKeyword),
            _ => None,
        },
        _ => None,
    }
}

/// Words MoonScript reserves on top of Lua's.
fn moonscript_keyword(text: &str) -> Option<SyntaxKind> {
    use SyntaxKind as K;
    match text.len() {
        4 => match text {
            "from" => Some(K::FromKeyword),
            "when" => Some(K::WhenKeyword),
            "with" => Some(K::WithKeyword),
            _ => None,
        },
        5 => match text {
            "class" => Some(K::ClassKeyword),
            "super" => Some(K::SuperKeyword),
            "using" => Some(K::UsingKeyword),
            _ => None,
        },
        6 => match text {
            "export" => Some(K::ExportKeyword),
            "import" => Some(K::ImportKeyword),
            "switch" => Some(K::SwitchKeyword),
            "unless" => Some(K::UnlessKeyword),
            _ => None,
        },
        7 => match text {
            "extends" => Some(K::ExtendsKeyword),
            _ => None,
        },
        8 => match text {
            "continue" => Some(K::ContinueKeyword),
            _ => None,
        },
        _ => None,
    }
}
