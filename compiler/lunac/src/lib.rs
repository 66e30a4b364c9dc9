//! Luna command-line driver.
//!
//! `main.rs` collects arguments and picks the exit code. Everything else
//! lives here so the commands can be driven from tests: each one writes its
//! report to a caller-supplied writer.

pub mod commands;
mod error;
mod invocation;

use std::io::Write;
use std::sync::Once;

pub use error::CliError;
pub use invocation::{parse_invocation, Invocation};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=luna_parse=debug`.
/// `LUNA_LOG_TREE=1` prints spans as an indented tree instead of flat lines.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var("LUNA_LOG_TREE").is_ok_and(|value| value == "1") {
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}

/// Run the command in `args` (program name excluded).
///
/// Reports go to `out`, diagnostics to `err`. Returns whether the input was
/// free of errors; `Err` is for problems with the invocation itself.
pub fn run<O: Write, E: Write>(args: &[String], out: &mut O, err: &mut E) -> Result<bool, CliError> {
    let Some((command, rest)) = args.split_first() else {
        print_usage(out)?;
        return Ok(true);
    };
    tracing::debug!(command = command.as_str(), "running");

    match command.as_str() {
        "lex" => {
            let invocation = parse_invocation(rest)?;
            let source = commands::read_source(&invocation.path)?;
            commands::lex_source(&source, &invocation.options, out)?;
            Ok(true)
        }
        "parse" => {
            let invocation = parse_invocation(rest)?;
            let source = commands::read_source(&invocation.path)?;
            Ok(commands::parse_source(&source, &invocation.options, out)?)
        }
        "check" => {
            let invocation = parse_invocation(rest)?;
            let source = commands::read_source(&invocation.path)?;
            let errors = commands::check_source(&source, &invocation.options, err)?;
            Ok(errors == 0)
        }
        "explain" | "--explain" => {
            let code = rest.first().ok_or(CliError::MissingCode)?;
            commands::explain_code(code, out)?;
            Ok(true)
        }
        "help" | "--help" | "-h" => {
            print_usage(out)?;
            Ok(true)
        }
        other => Err(CliError::UnknownCommand(other.to_owned())),
    }
}

pub fn print_usage<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Luna - Lua and MoonScript front-end")?;
    writeln!(out)?;
    writeln!(out, "Usage: lunac <command> [options] <file>")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  lex <file>           Print the token stream")?;
    writeln!(out, "  parse <file>         Print the syntax tree and its diagnostics")?;
    writeln!(out, "  check <file>         Report diagnostics; fails if there are errors")?;
    writeln!(out, "  explain <code>       Explain a diagnostic code (e.g. LUA2002)")?;
    writeln!(out)?;
    writeln!(out, "Options:")?;
    writeln!(out, "  --dialect=<name>       lua or moonscript (default: from the file extension)")?;
    writeln!(out, "  --lang-version=<ver>   5.1, 5.2, 5.3 or 5.4 (default: 5.4)")?;
    writeln!(out, "  --feature=<name>       Enable a preview feature (repeatable)")?;
    writeln!(out, "  --case-insensitive     Match keywords regardless of case")?;
    writeln!(out)?;
    writeln!(out, "Environment:")?;
    writeln!(out, "  RUST_LOG=<filter>      Enable tracing (e.g. luna_parse=debug)")?;
    writeln!(out, "  LUNA_LOG_TREE=1        Print tracing spans as a tree")
}
