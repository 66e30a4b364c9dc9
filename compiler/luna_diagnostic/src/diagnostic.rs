use std::fmt;
use std::sync::Arc;

use luna_ir::Span;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// Not shown to the user, available to tooling.
    Hidden,
    Info,
    Warning,
    Error,
    /// Carries no information; filtered before reporting.
    Void,
    /// Severity could not be determined.
    Unknown,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Hidden => write!(f, "hidden"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Void => write!(f, "void"),
            Severity::Unknown => write!(f, "unknown"),
        }
    }
}

/// Kind of a symbol a diagnostic refers to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum SymbolKind {
    Assembly,
    Module,
    Namespace,
    NamedType,
    Method,
    Parameter,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolKind::Assembly => "assembly",
            SymbolKind::Module => "module",
            SymbolKind::Namespace => "namespace",
            SymbolKind::NamedType => "type",
            SymbolKind::Method => "method",
            SymbolKind::Parameter => "parameter",
        };
        f.write_str(name)
    }
}

/// A symbol referenced by a diagnostic, by display name.
///
/// Diagnostics outlive binding, so they keep names rather than handles.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct SymbolRef {
    pub name: String,
    pub kind: SymbolKind,
}

impl SymbolRef {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        SymbolRef {
            name: name.into(),
            kind,
        }
    }
}

/// Offset and width of a diagnostic raised before its final location is
/// known.
///
/// Lexer diagnostics are relative to the start of the token that carries
/// them (including its leading trivia).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct SyntaxOffset {
    pub offset: u32,
    pub width: u32,
}

impl SyntaxOffset {
    pub const fn new(offset: u32, width: u32) -> Self {
        SyntaxOffset { offset, width }
    }

    /// Absolute span, given the start the offset is relative to.
    pub const fn to_span(self, base: u32) -> Span {
        Span::from_len(base + self.offset, self.width)
    }
}

/// Message arguments. Most messages take at most two.
pub type DiagnosticArgs = SmallVec<[String; 2]>;

/// Location-free diagnostic payload.
///
/// Immutable value: the `with_*` methods return modified copies.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticInfo {
    code: ErrorCode,
    severity: Severity,
    args: DiagnosticArgs,
    symbols: Vec<SymbolRef>,
    syntax_offset: Option<SyntaxOffset>,
    is_suppressed: bool,
}

impl DiagnosticInfo {
    /// Create a diagnostic with the code's default severity.
    pub fn new<I, S>(code: ErrorCode, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DiagnosticInfo {
            code,
            severity: code.default_severity(),
            args: args.into_iter().map(Into::into).collect(),
            symbols: Vec::new(),
            syntax_offset: None,
            is_suppressed: false,
        }
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[inline]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[inline]
    pub fn symbols(&self) -> &[SymbolRef] {
        &self.symbols
    }

    #[inline]
    pub fn syntax_offset(&self) -> Option<SyntaxOffset> {
        self.syntax_offset
    }

    #[inline]
    pub fn is_suppressed(&self) -> bool {
        self.is_suppressed
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    #[must_use]
    pub fn with_severity(&self, severity: Severity) -> Self {
        DiagnosticInfo {
            severity,
            ..self.clone()
        }
    }

    /// Copy with a syntax offset and width.
    #[must_use]
    pub fn with_location(&self, offset: u32, width: u32) -> Self {
        DiagnosticInfo {
            syntax_offset: Some(SyntaxOffset::new(offset, width)),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_is_suppressed(&self, is_suppressed: bool) -> Self {
        DiagnosticInfo {
            is_suppressed,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: SymbolRef) -> Self {
        self.symbols.push(symbol);
        self
    }
}

/// Where a diagnostic points.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Location {
    /// Not tied to source (command-line or metadata problems).
    #[default]
    None,
    InSource {
        span: Span,
        path: Option<Arc<str>>,
    },
}

impl Location {
    pub fn source(span: Span) -> Self {
        Location::InSource { span, path: None }
    }

    pub fn source_in(span: Span, path: impl Into<Arc<str>>) -> Self {
        Location::InSource {
            span,
            path: Some(path.into()),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Location::None => None,
            Location::InSource { span, .. } => Some(*span),
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Location::None => None,
            Location::InSource { path, .. } => path.as_deref(),
        }
    }
}

/// A [`DiagnosticInfo`] bound to a [`Location`].
///
/// Equality covers the info (including its suppressed flag) and the
/// location.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub info: DiagnosticInfo,
    pub location: Location,
}

impl Diagnostic {
    pub fn new(info: DiagnosticInfo, location: Location) -> Self {
        Diagnostic { info, location }
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.info.code()
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.info.severity()
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.info.is_error()
    }

    #[inline]
    pub fn is_suppressed(&self) -> bool {
        self.info.is_suppressed()
    }

    #[inline]
    pub fn span(&self) -> Option<Span> {
        self.location.span()
    }
}
