//! Semantic shell for the Luna front-end.
//!
//! - [`symbols`]: the symbol containment skeleton and use-site diagnostics.
//! - [`BindingDiagnosticBag`]: diagnostics plus the assemblies a binding
//!   depended on, either half optional.
//! - [`SemanticModel`]: node membership and position adjustment over one
//!   [`luna_syntax::SyntaxTree`].
//! - [`CancellationToken`]: cooperative cancellation for model queries.
//!
//! Name binding and type checking are not part of this crate.

mod binding_bag;
mod cancellation;
mod error;
mod model;
pub mod symbols;

pub use binding_bag::BindingDiagnosticBag;
pub use cancellation::CancellationToken;
pub use error::SemanticError;
pub use model::SemanticModel;
