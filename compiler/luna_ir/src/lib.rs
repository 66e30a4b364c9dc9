//! Luna IR - shared syntax vocabulary.
//!
//! This crate contains the position and classification types every other
//! front-end crate speaks:
//! - Spans for source locations and text-change markers for incremental reparse
//! - `SyntaxKind`, the dense kind enumeration, and the facts tables over it
//! - Dialect profiles (Lua, MoonScript) selecting keyword tables
//! - `ParseOptions` (dialect, language version, preview features)
//! - `SourceText`, the immutable character buffer the lexer consumes
//!
//! Its only `luna_*` dependency is `luna_lexer_core`, for the newline
//! predicate shared with the lexer.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod facts;
pub mod incremental;
mod options;
mod profile;
mod source_text;
mod span;
mod syntax_kind;

pub use facts::TokenClass;
pub use options::{Feature, FeatureSet, LanguageVersion, OptionsError, ParseOptions};
pub use profile::{Dialect, DialectProfile, LuaProfile, MoonScriptProfile};
pub use source_text::SourceText;
pub use span::Span;
pub use syntax_kind::SyntaxKind;
