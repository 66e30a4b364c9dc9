//! Per-dialect message providers.
//!
//! A provider turns a [`DiagnosticInfo`] into text: it owns the code prefix
//! and the message templates. Providers are read-only statics selected with
//! [`messages_for`] and passed explicitly to whatever renders diagnostics.
//!
//! Templates use positional placeholders `{0}`, `{1}`, ... filled from the
//! diagnostic's arguments. A placeholder with no matching argument is left
//! as written.

use luna_ir::Dialect;

use crate::{DiagnosticInfo, ErrorCode};

/// Source of diagnostic text for one dialect.
pub trait MessageProvider: Send + Sync {
    /// Language name used in messages ("Lua", "MoonScript").
    fn language_name(&self) -> &'static str;

    /// Prefix rendered before the numeric code (`LUA`, `MOON`).
    fn code_prefix(&self) -> &'static str;

    /// Message template for a code.
    fn message_template(&self, code: ErrorCode) -> &'static str;

    /// Prefixed code, e.g. `LUA1007`.
    fn code_string(&self, code: ErrorCode) -> String {
        format!("{}{code}", self.code_prefix())
    }

    /// Fully formatted message for a diagnostic.
    fn format_message(&self, info: &DiagnosticInfo) -> String {
        format_template(self.message_template(info.code()), info.args())
    }
}

/// Lua message provider.
#[derive(Clone, Copy, Debug, Default)]
pub struct LuaMessages;

/// MoonScript message provider.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoonScriptMessages;

static LUA_MESSAGES: LuaMessages = LuaMessages;
static MOONSCRIPT_MESSAGES: MoonScriptMessages = MoonScriptMessages;

/// The provider for a dialect.
pub fn messages_for(dialect: Dialect) -> &'static dyn MessageProvider {
    match dialect {
        Dialect::Lua => &LUA_MESSAGES,
        Dialect::MoonScript => &MOONSCRIPT_MESSAGES,
    }
}

impl MessageProvider for LuaMessages {
    fn language_name(&self) -> &'static str {
        "Lua"
    }

    fn code_prefix(&self) -> &'static str {
        "LUA"
    }

    fn message_template(&self, code: ErrorCode) -> &'static str {
        shared_template(code)
    }
}

impl MessageProvider for MoonScriptMessages {
    fn language_name(&self) -> &'static str {
        "MoonScript"
    }

    fn code_prefix(&self) -> &'static str {
        "MOON"
    }

    fn message_template(&self, code: ErrorCode) -> &'static str {
        match code {
            ErrorCode::FeatureNotAvailable => "{0} is not available in MoonScript",
            ErrorCode::MissingBlockEnd => "block opened by '{0}' is not closed",
            _ => shared_template(code),
        }
    }
}

fn shared_template(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::BadCharacter => "unexpected character '{0}'",
        ErrorCode::UnterminatedString => "unfinished string",
        ErrorCode::UnterminatedLongString => "unfinished long string (starting at line {0})",
        ErrorCode::UnterminatedComment => "unfinished long comment (starting at line {0})",
        ErrorCode::InvalidEscape => "invalid escape sequence '{0}'",
        ErrorCode::InvalidNumber => "malformed number near '{0}'",
        ErrorCode::IntegerLiteralOverflow => {
            "integer literal {0} does not fit in 64 bits and is read as a float"
        }
        ErrorCode::FeatureNotAvailable => "{0} is not available in Lua {1}",
        ErrorCode::InvalidLongBracket => "invalid long string delimiter near '{0}'",
        ErrorCode::UnexpectedToken => "unexpected symbol near '{0}'",
        ErrorCode::MissingBlockEnd => "'{1}' expected to close '{0}'",
        ErrorCode::UnclosedDelimiter => "'{1}' expected to close '{0}'",
        ErrorCode::MissingAssembly => "'{0}' is defined in assembly '{1}' which could not be loaded",
        ErrorCode::UnsupportedSymbol => "'{0}' is not supported by the language",
        ErrorCode::ObsoleteSymbol => "'{0}' is obsolete",
    }
}

/// Substitute `{N}` placeholders with `args[N]`.
pub fn format_template(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let arg = args.get(index)?;
            Some((arg, close))
        });
        match substituted {
            Some((arg, close)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
