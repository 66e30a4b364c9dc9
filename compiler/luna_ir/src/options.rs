//! Parse options: dialect, language version, preview features.
//!
//! Options are immutable value objects handed to the lexer and parser. The
//! language version is an opaque, ordered gate: the front-end only asks
//! "is feature X available", never "what does version Y mean".

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::Dialect;

/// Error parsing an option value from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("unknown dialect `{0}` (expected `lua` or `moonscript`)")]
    UnknownDialect(String),
    #[error("unknown language version `{0}` (expected 5.1, 5.2, 5.3 or 5.4)")]
    UnknownVersion(String),
    #[error("unknown preview feature `{0}`")]
    UnknownFeature(String),
}

/// Lua language version, ordered oldest to newest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LanguageVersion {
    Lua51,
    Lua52,
    Lua53,
    #[default]
    Lua54,
}

impl LanguageVersion {
    /// Native 64-bit integers, `//` and bitwise operators.
    #[inline]
    pub fn has_integers(self) -> bool {
        self >= LanguageVersion::Lua53
    }

    /// `goto` statements and `::label::`.
    #[inline]
    pub fn has_goto(self) -> bool {
        self >= LanguageVersion::Lua52
    }

    /// `\x` and `\z` escapes.
    #[inline]
    pub fn has_extended_escapes(self) -> bool {
        self >= LanguageVersion::Lua52
    }

    /// Hexadecimal floats with a fraction or binary exponent (`0xA.8p1`).
    #[inline]
    pub fn has_hex_floats(self) -> bool {
        self >= LanguageVersion::Lua52
    }

    /// `\u{XXX}` escapes.
    #[inline]
    pub fn has_unicode_escapes(self) -> bool {
        self >= LanguageVersion::Lua53
    }

    /// `<const>` and `<close>` local attributes.
    #[inline]
    pub fn has_attributes(self) -> bool {
        self >= LanguageVersion::Lua54
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            LanguageVersion::Lua51 => "5.1",
            LanguageVersion::Lua52 => "5.2",
            LanguageVersion::Lua53 => "5.3",
            LanguageVersion::Lua54 => "5.4",
        }
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageVersion {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches("lua").trim_start_matches("Lua") {
            "5.1" | "51" => Ok(LanguageVersion::Lua51),
            "5.2" | "52" => Ok(LanguageVersion::Lua52),
            "5.3" | "53" => Ok(LanguageVersion::Lua53),
            "5.4" | "54" | "latest" => Ok(LanguageVersion::Lua54),
            _ => Err(OptionsError::UnknownVersion(s.to_owned())),
        }
    }
}

bitflags! {
    /// Enabled preview features.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FeatureSet: u8 {
        /// `0b1010` binary integer literals.
        const BINARY_NUMBERS = 1 << 0;
        /// `+=`, `-=`, ... in Lua (always on in MoonScript).
        const COMPOUND_ASSIGNMENT = 1 << 1;
    }
}

/// A single preview feature, as named on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    BinaryNumbers,
    CompoundAssignment,
}

impl Feature {
    pub const fn name(self) -> &'static str {
        match self {
            Feature::BinaryNumbers => "binary-numbers",
            Feature::CompoundAssignment => "compound-assignment",
        }
    }

    pub const fn flag(self) -> FeatureSet {
        match self {
            Feature::BinaryNumbers => FeatureSet::BINARY_NUMBERS,
            Feature::CompoundAssignment => FeatureSet::COMPOUND_ASSIGNMENT,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary-numbers" => Ok(Feature::BinaryNumbers),
            "compound-assignment" => Ok(Feature::CompoundAssignment),
            _ => Err(OptionsError::UnknownFeature(s.to_owned())),
        }
    }
}

/// Immutable configuration for lexing and parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    pub dialect: Dialect,
    pub version: LanguageVersion,
    pub features: FeatureSet,
    /// Keywords match case-insensitively when false.
    pub case_sensitive: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            dialect: Dialect::Lua,
            version: LanguageVersion::default(),
            features: FeatureSet::empty(),
            case_sensitive: true,
        }
    }
}

impl ParseOptions {
    /// Default options for a dialect.
    pub fn new(dialect: Dialect) -> Self {
        ParseOptions {
            dialect,
            ..ParseOptions::default()
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: LanguageVersion) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features |= feature.flag();
        self
    }

    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    #[inline]
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(feature.flag())
    }

    /// Integer literals are parsed as `i64` (Lua 5.3+ and MoonScript).
    #[inline]
    pub fn has_integers(&self) -> bool {
        self.dialect == Dialect::MoonScript || self.version.has_integers()
    }

    #[inline]
    pub fn allows_compound_assignment(&self) -> bool {
        self.dialect == Dialect::MoonScript || self.has_feature(Feature::CompoundAssignment)
    }
}
