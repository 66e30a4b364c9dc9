use luna_ir::OptionsError;

/// A problem with how `lunac` was invoked. Problems in the source being
/// processed are diagnostics instead.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("unknown option `{0}`")]
    UnknownFlag(String),
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
    #[error("missing file path")]
    MissingPath,
    #[error("missing error code")]
    MissingCode,
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("unknown error code `{0}`")]
    UnknownCode(String),
    #[error("no documentation available for {0}")]
    NoDocs(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
