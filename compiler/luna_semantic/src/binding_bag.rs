//! Diagnostics and assembly dependencies gathered while binding.
//!
//! Either half can be switched off. [`BindingDiagnosticBag::DISCARDED`]
//! keeps nothing, which is what speculative binding wants; callers still
//! learn whether a use-site problem was an error.

use luna_diagnostic::{DiagnosticBag, DiagnosticInfo, ErrorCode, Location};
use rustc_hash::FxHashSet;

use crate::symbols::{AssemblyRef, NamespaceExtent, Symbol};

#[derive(Debug)]
pub struct BindingDiagnosticBag {
    diagnostics: Option<DiagnosticBag>,
    dependencies: Option<FxHashSet<AssemblyRef>>,
}

impl BindingDiagnosticBag {
    /// A bag that drops everything added to it.
    pub const DISCARDED: BindingDiagnosticBag = BindingDiagnosticBag {
        diagnostics: None,
        dependencies: None,
    };

    /// Accumulates diagnostics and dependencies.
    pub fn new() -> Self {
        BindingDiagnosticBag {
            diagnostics: Some(DiagnosticBag::new()),
            dependencies: Some(FxHashSet::default()),
        }
    }

    pub fn with_diagnostics_only() -> Self {
        BindingDiagnosticBag {
            diagnostics: Some(DiagnosticBag::new()),
            dependencies: None,
        }
    }

    pub fn accumulates_diagnostics(&self) -> bool {
        self.diagnostics.is_some()
    }

    pub fn accumulates_dependencies(&self) -> bool {
        self.dependencies.is_some()
    }

    /// Create a diagnostic, keep it if diagnostics are accumulated, and
    /// return it either way.
    pub fn add<I, S>(&mut self, code: ErrorCode, location: Location, args: I) -> DiagnosticInfo
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let info = DiagnosticInfo::new(code, args);
        self.add_info(info.clone(), location);
        info
    }

    pub fn add_info(&mut self, info: DiagnosticInfo, location: Location) {
        if let Some(diagnostics) = &mut self.diagnostics {
            diagnostics.add_info(info, location);
        }
    }

    /// Record the assembly `symbol` comes from.
    ///
    /// A compilation-extent namespace contributes the assemblies of its
    /// constituents. Missing assemblies are never recorded.
    pub fn add_dependencies(&mut self, symbol: &dyn Symbol) {
        if let Some(dependencies) = &mut self.dependencies {
            collect_dependencies(symbol, dependencies);
        }
    }

    /// Report `symbol`'s use-site diagnostic at `location`, if it has one.
    ///
    /// Returns whether that diagnostic is an error, even when this bag
    /// discards diagnostics.
    pub fn report_use_site(&mut self, symbol: &dyn Symbol, location: &Location) -> bool {
        let Some(info) = symbol.use_site_diagnostic() else {
            return false;
        };
        let is_error = info.is_error();
        tracing::trace!(symbol = symbol.name(), code = %info.code(), is_error, "use-site diagnostic");
        self.add_info(info, location.clone());
        is_error
    }

    /// Move everything `other` holds into this bag, keeping order. Halves
    /// this bag does not accumulate are dropped.
    pub fn add_range(&mut self, other: BindingDiagnosticBag) {
        let (diagnostics, dependencies) = other.into_parts();
        if let (Some(mine), Some(theirs)) = (&mut self.diagnostics, diagnostics) {
            mine.extend(theirs);
        }
        if let (Some(mine), Some(theirs)) = (&mut self.dependencies, dependencies) {
            mine.extend(theirs);
        }
    }

    pub fn diagnostics(&self) -> Option<&DiagnosticBag> {
        self.diagnostics.as_ref()
    }

    pub fn dependencies(&self) -> Option<&FxHashSet<AssemblyRef>> {
        self.dependencies.as_ref()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.as_ref().is_some_and(DiagnosticBag::has_errors)
    }

    pub fn into_parts(self) -> (Option<DiagnosticBag>, Option<FxHashSet<AssemblyRef>>) {
        (self.diagnostics, self.dependencies)
    }
}

impl Default for BindingDiagnosticBag {
    fn default() -> Self {
        BindingDiagnosticBag::new()
    }
}

fn collect_dependencies(symbol: &dyn Symbol, out: &mut FxHashSet<AssemblyRef>) {
    if let Some(namespace) = symbol.as_namespace() {
        if namespace.extent() == NamespaceExtent::Compilation {
            for constituent in namespace.constituents() {
                collect_dependencies(constituent.as_ref(), out);
            }
            return;
        }
    }
    if let Some(assembly) = symbol.containing_assembly() {
        if !assembly.is_missing() {
            out.insert(AssemblyRef(assembly));
        }
    }
}
