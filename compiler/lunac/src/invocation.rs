//! Command-line flags shared by `lex`, `parse` and `check`.

use luna_ir::{Dialect, Feature, LanguageVersion, ParseOptions};

use crate::CliError;

/// A file to process and the options to process it with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub path: String,
    pub options: ParseOptions,
}

/// Parse `[options] <file>`.
///
/// Flags may come before or after the path. Without `--dialect`, a `.moon`
/// file is MoonScript and anything else is Lua.
pub fn parse_invocation(args: &[String]) -> Result<Invocation, CliError> {
    let mut path: Option<&str> = None;
    let mut dialect: Option<Dialect> = None;
    let mut version = LanguageVersion::default();
    let mut features = Vec::new();
    let mut case_sensitive = true;

    for arg in args {
        if let Some(value) = arg.strip_prefix("--dialect=") {
            dialect = Some(value.parse()?);
        } else if let Some(value) = arg.strip_prefix("--lang-version=") {
            version = value.parse()?;
        } else if let Some(value) = arg.strip_prefix("--feature=") {
            features.push(value.parse::<Feature>()?);
        } else if arg == "--case-insensitive" {
            case_sensitive = false;
        } else if arg.starts_with('-') {
            return Err(CliError::UnknownFlag(arg.clone()));
        } else if path.is_none() {
            path = Some(arg);
        } else {
            return Err(CliError::UnexpectedArgument(arg.clone()));
        }
    }

    let path = path.ok_or(CliError::MissingPath)?;
    let dialect = dialect.unwrap_or_else(|| dialect_for_path(path));
    let options = features.into_iter().fold(
        ParseOptions::new(dialect)
            .with_version(version)
            .with_case_sensitive(case_sensitive),
        ParseOptions::with_feature,
    );
    Ok(Invocation {
        path: path.to_owned(),
        options,
    })
}

fn dialect_for_path(path: &str) -> Dialect {
    let is_moon = std::path::Path::new(path)
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("moon"));
    if is_moon {
        Dialect::MoonScript
    } else {
        Dialect::Lua
    }
}
