//! The `explain` command: display documentation for diagnostic codes.

use std::io::Write;

use luna_diagnostic::{ErrorCode, ErrorDocs};

use crate::CliError;

/// Print the documentation for a code such as `LUA2002`, `MOON1001` or
/// plain `2002`.
pub fn explain_code<W: Write>(code_str: &str, out: &mut W) -> Result<(), CliError> {
    let code = ErrorCode::from_code_str(code_str)
        .ok_or_else(|| CliError::UnknownCode(code_str.to_owned()))?;
    let doc = ErrorDocs::get(code).ok_or_else(|| CliError::NoDocs(code_str.to_owned()))?;
    writeln!(out, "{doc}")?;
    Ok(())
}
