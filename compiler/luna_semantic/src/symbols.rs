//! Symbol skeleton.
//!
//! Symbols form a containment tree:
//!
//! ```text
//! AssemblySymbol
//!   ModuleSymbol
//!     NamespaceSymbol (global, then nested)
//!       NamedTypeSymbol
//!         MethodSymbol
//!           ParameterSymbol
//! ```
//!
//! Parents own their children through `Arc`; children point back through
//! `Weak`, so dropping an assembly frees everything below it and a symbol
//! outliving its container simply reports no container. Child lists sit
//! behind `parking_lot` locks so a shared tree can still grow.
//!
//! Binding proper lives elsewhere. These shapes anchor diagnostics and carry
//! use-site errors; [`Symbol`] is open for other symbol kinds.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock, Weak};

use luna_diagnostic::{DiagnosticInfo, ErrorCode, SymbolKind, SymbolRef};
use parking_lot::RwLock;
use smol_str::SmolStr;

/// A named entity in the containment tree.
pub trait Symbol: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    fn kind(&self) -> SymbolKind;

    /// The symbol this one is declared in.
    ///
    /// `None` for assemblies and merged namespaces, and once the container
    /// has been dropped.
    fn containing_symbol(&self) -> Option<Arc<dyn Symbol>>;

    /// The assembly this symbol is declared in. `None` for assemblies
    /// themselves and merged namespaces.
    fn containing_assembly(&self) -> Option<Arc<AssemblySymbol>>;

    /// The diagnostic to report wherever this symbol is referenced, if
    /// referencing it is a problem.
    fn use_site_diagnostic(&self) -> Option<DiagnosticInfo>;

    fn as_namespace(&self) -> Option<&NamespaceSymbol> {
        None
    }

    /// Name and kind, for diagnostics that outlive the symbol.
    fn to_ref(&self) -> SymbolRef {
        SymbolRef::new(self.name(), self.kind())
    }
}

/// State shared by every symbol kind.
#[derive(Debug)]
struct SymbolData {
    name: SmolStr,
    containing: Option<Weak<dyn Symbol>>,
    assembly: Weak<AssemblySymbol>,
    use_site: OnceLock<DiagnosticInfo>,
}

impl SymbolData {
    fn new(name: &str, containing: Option<Weak<dyn Symbol>>, assembly: Weak<AssemblySymbol>) -> Self {
        SymbolData {
            name: SmolStr::new(name),
            containing,
            assembly,
            use_site: OnceLock::new(),
        }
    }

    /// An attached diagnostic, or `MissingAssembly` when the symbol comes
    /// from an assembly that failed to load.
    fn use_site_diagnostic(&self, symbol: &dyn Symbol) -> Option<DiagnosticInfo> {
        if let Some(info) = self.use_site.get() {
            return Some(info.clone());
        }
        let assembly = self.assembly.upgrade()?;
        assembly.is_missing().then(|| {
            DiagnosticInfo::new(ErrorCode::MissingAssembly, [symbol.name(), assembly.name()])
                .with_symbol(symbol.to_ref())
        })
    }
}

/// The `Symbol` methods every kind implements the same way.
macro_rules! symbol_common {
    ($kind:expr) => {
        fn name(&self) -> &str {
            &self.data.name
        }

        fn kind(&self) -> SymbolKind {
            $kind
        }

        fn containing_symbol(&self) -> Option<Arc<dyn Symbol>> {
            self.data.containing.as_ref()?.upgrade()
        }

        fn containing_assembly(&self) -> Option<Arc<AssemblySymbol>> {
            self.data.assembly.upgrade()
        }

        fn use_site_diagnostic(&self) -> Option<DiagnosticInfo> {
            self.data.use_site_diagnostic(self)
        }
    };
}

/// `set_use_site_diagnostic` for a symbol type.
macro_rules! use_site_setter {
    () => {
        /// Attach the diagnostic reported wherever this symbol is used.
        ///
        /// The first diagnostic attached wins; returns whether this one was.
        pub fn set_use_site_diagnostic(&self, info: DiagnosticInfo) -> bool {
            self.data.use_site.set(info).is_ok()
        }
    };
}

#[derive(Debug)]
pub struct AssemblySymbol {
    /// `assembly` points at the assembly itself.
    data: SymbolData,
    is_missing: bool,
    modules: RwLock<Vec<Arc<ModuleSymbol>>>,
}

impl AssemblySymbol {
    pub fn new(name: &str) -> Arc<Self> {
        AssemblySymbol::create(name, false)
    }

    /// Placeholder for an assembly that could not be loaded.
    ///
    /// Symbols declared in it carry a `MissingAssembly` use-site diagnostic
    /// and are never recorded as dependencies.
    pub fn missing(name: &str) -> Arc<Self> {
        AssemblySymbol::create(name, true)
    }

    fn create(name: &str, is_missing: bool) -> Arc<Self> {
        Arc::new_cyclic(|me| AssemblySymbol {
            data: SymbolData::new(name, None, me.clone()),
            is_missing,
            modules: RwLock::default(),
        })
    }

    pub fn is_missing(&self) -> bool {
        self.is_missing
    }

    pub fn add_module(&self, name: &str) -> Arc<ModuleSymbol> {
        let module = ModuleSymbol::new(name, self.data.assembly.clone());
        self.modules.write().push(Arc::clone(&module));
        module
    }

    pub fn modules(&self) -> Vec<Arc<ModuleSymbol>> {
        self.modules.read().clone()
    }

    use_site_setter!();
}

impl Symbol for AssemblySymbol {
    fn name(&self) -> &str {
        &self.data.name
    }

    fn kind(&self) -> SymbolKind {
        SymbolKind::Assembly
    }

    fn containing_symbol(&self) -> Option<Arc<dyn Symbol>> {
        None
    }

    /// An assembly is not contained in one.
    fn containing_assembly(&self) -> Option<Arc<AssemblySymbol>> {
        None
    }

    fn use_site_diagnostic(&self) -> Option<DiagnosticInfo> {
        self.data.use_site.get().cloned()
    }
}

#[derive(Debug)]
pub struct ModuleSymbol {
    data: SymbolData,
    global_namespace: Arc<NamespaceSymbol>,
}

impl ModuleSymbol {
    fn new(name: &str, assembly: Weak<AssemblySymbol>) -> Arc<Self> {
        Arc::new_cyclic(|me: &Weak<ModuleSymbol>| {
            let module: Weak<dyn Symbol> = me.clone();
            let container: Weak<dyn Symbol> = assembly.clone();
            ModuleSymbol {
                global_namespace: NamespaceSymbol::new("", module, assembly.clone()),
                data: SymbolData::new(name, Some(container), assembly),
            }
        })
    }

    /// The unnamed namespace at the root of the module.
    pub fn global_namespace(&self) -> &Arc<NamespaceSymbol> {
        &self.global_namespace
    }

    use_site_setter!();
}

impl Symbol for ModuleSymbol {
    symbol_common!(SymbolKind::Module);
}

/// Which declarations a namespace symbol covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamespaceExtent {
    /// The declarations of one module.
    Module,
    /// A merged view over same-named namespaces of several assemblies.
    Compilation,
}

#[derive(Debug)]
pub struct NamespaceSymbol {
    data: SymbolData,
    me: Weak<NamespaceSymbol>,
    extent: NamespaceExtent,
    members: RwLock<Vec<Arc<dyn Symbol>>>,
    /// The merged namespaces of a compilation-extent namespace.
    constituents: Vec<Arc<NamespaceSymbol>>,
}

impl NamespaceSymbol {
    fn new(name: &str, containing: Weak<dyn Symbol>, assembly: Weak<AssemblySymbol>) -> Arc<Self> {
        Arc::new_cyclic(|me| NamespaceSymbol {
            data: SymbolData::new(name, Some(containing), assembly),
            me: me.clone(),
            extent: NamespaceExtent::Module,
            members: RwLock::default(),
            constituents: Vec::new(),
        })
    }

    /// A compilation-extent namespace merging `constituents`.
    ///
    /// It belongs to no assembly; its constituents do.
    pub fn merged(name: &str, constituents: Vec<Arc<NamespaceSymbol>>) -> Arc<Self> {
        Arc::new_cyclic(|me| NamespaceSymbol {
            data: SymbolData::new(name, None, Weak::new()),
            me: me.clone(),
            extent: NamespaceExtent::Compilation,
            members: RwLock::default(),
            constituents,
        })
    }

    pub fn extent(&self) -> NamespaceExtent {
        self.extent
    }

    pub fn constituents(&self) -> &[Arc<NamespaceSymbol>] {
        &self.constituents
    }

    pub fn add_namespace(&self, name: &str) -> Arc<NamespaceSymbol> {
        let containing: Weak<dyn Symbol> = self.me.clone();
        let namespace = NamespaceSymbol::new(name, containing, self.data.assembly.clone());
        self.members.write().push(namespace.clone());
        namespace
    }

    pub fn add_type(&self, name: &str) -> Arc<NamedTypeSymbol> {
        let containing: Weak<dyn Symbol> = self.me.clone();
        let ty = NamedTypeSymbol::new(name, containing, self.data.assembly.clone());
        self.members.write().push(ty.clone());
        ty
    }

    pub fn members(&self) -> Vec<Arc<dyn Symbol>> {
        self.members.read().clone()
    }

    use_site_setter!();
}

impl Symbol for NamespaceSymbol {
    symbol_common!(SymbolKind::Namespace);

    fn as_namespace(&self) -> Option<&NamespaceSymbol> {
        Some(self)
    }
}

#[derive(Debug)]
pub struct NamedTypeSymbol {
    data: SymbolData,
    me: Weak<NamedTypeSymbol>,
    methods: RwLock<Vec<Arc<MethodSymbol>>>,
}

impl NamedTypeSymbol {
    fn new(name: &str, containing: Weak<dyn Symbol>, assembly: Weak<AssemblySymbol>) -> Arc<Self> {
        Arc::new_cyclic(|me| NamedTypeSymbol {
            data: SymbolData::new(name, Some(containing), assembly),
            me: me.clone(),
            methods: RwLock::default(),
        })
    }

    pub fn add_method(&self, name: &str) -> Arc<MethodSymbol> {
        let containing: Weak<dyn Symbol> = self.me.clone();
        let method = MethodSymbol::new(name, containing, self.data.assembly.clone());
        self.methods.write().push(Arc::clone(&method));
        method
    }

    pub fn methods(&self) -> Vec<Arc<MethodSymbol>> {
        self.methods.read().clone()
    }

    use_site_setter!();
}

impl Symbol for NamedTypeSymbol {
    symbol_common!(SymbolKind::NamedType);
}

#[derive(Debug)]
pub struct MethodSymbol {
    data: SymbolData,
    me: Weak<MethodSymbol>,
    parameters: RwLock<Vec<Arc<ParameterSymbol>>>,
}

impl MethodSymbol {
    fn new(name: &str, containing: Weak<dyn Symbol>, assembly: Weak<AssemblySymbol>) -> Arc<Self> {
        Arc::new_cyclic(|me| MethodSymbol {
            data: SymbolData::new(name, Some(containing), assembly),
            me: me.clone(),
            parameters: RwLock::default(),
        })
    }

    /// Append a parameter; its ordinal is its position in the list.
    pub fn add_parameter(&self, name: &str) -> Arc<ParameterSymbol> {
        let containing: Weak<dyn Symbol> = self.me.clone();
        let mut parameters = self.parameters.write();
        let parameter = Arc::new(ParameterSymbol {
            data: SymbolData::new(name, Some(containing), self.data.assembly.clone()),
            ordinal: parameters.len(),
        });
        parameters.push(Arc::clone(&parameter));
        parameter
    }

    pub fn parameters(&self) -> Vec<Arc<ParameterSymbol>> {
        self.parameters.read().clone()
    }

    use_site_setter!();
}

impl Symbol for MethodSymbol {
    symbol_common!(SymbolKind::Method);
}

#[derive(Debug)]
pub struct ParameterSymbol {
    data: SymbolData,
    ordinal: usize,
}

impl ParameterSymbol {
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    use_site_setter!();
}

impl Symbol for ParameterSymbol {
    symbol_common!(SymbolKind::Parameter);
}

/// An assembly compared and hashed by identity, for dependency sets.
#[derive(Clone, Debug)]
pub struct AssemblyRef(pub Arc<AssemblySymbol>);

impl PartialEq for AssemblyRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for AssemblyRef {}

impl Hash for AssemblyRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}
