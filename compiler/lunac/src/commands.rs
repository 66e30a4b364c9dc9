//! Command handlers for the `lunac` CLI.
//!
//! Handlers take an already-read [`SourceText`] and a writer; reading files
//! and choosing stdout or stderr is left to [`crate::run`].

use luna_ir::SourceText;

use crate::CliError;

mod check;
mod debug;
mod explain;

pub use check::check_source;
pub use debug::{lex_source, parse_source};
pub use explain::explain_code;

/// Read a file as source text carrying its path for diagnostics.
pub fn read_source(path: &str) -> Result<SourceText, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })?;
    Ok(SourceText::new(content).with_path(path))
}
