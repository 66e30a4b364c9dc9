//! Diagnostic model for the Luna front-end.
//!
//! - [`DiagnosticInfo`]: code, severity, message arguments, related
//!   symbols, optional syntax offset. Immutable; `with_*` returns copies.
//! - [`Diagnostic`]: an info bound to a [`Location`].
//! - [`DiagnosticBag`]: append-only, order-preserving accumulator, plus a
//!   [`DiagnosticBagPool`] for reuse.
//! - [`MessageProvider`]: per-dialect text, selected with [`messages_for`]
//!   and passed explicitly.
//! - [`emitter`]: plain-text rendering; [`codec`]: binary persistence.
//!
//! Source problems are diagnostics. API misuse is an `Err` or a debug
//! assertion and never enters a bag.

mod bag;
pub mod codec;
mod diagnostic;
pub mod emitter;
mod error_code;
mod explain;
mod messages;

pub use bag::{DiagnosticBag, DiagnosticBagPool};
pub use codec::CodecError;
pub use diagnostic::{
    Diagnostic, DiagnosticArgs, DiagnosticInfo, Location, Severity, SymbolKind, SymbolRef,
    SyntaxOffset,
};
pub use error_code::ErrorCode;
pub use explain::ErrorDocs;
pub use messages::{
    format_template, messages_for, LuaMessages, MessageProvider, MoonScriptMessages,
};
