//! CLI execution and command dispatch logic.
//!
//! This module keeps `main` minimal by providing a single entry point that
//! loads the requested conventions and writes command output to stdout.

use crate::cli::{Cli, Commands};
use crate::convention::ConventionSet;
use crate::scanner::{Classification, StepScanner};
use crate::title;
use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::debug;

/// Execute the parsed [`Cli`] command.
///
/// # Errors
///
/// Returns an error if the convention file cannot be loaded or stdout
/// cannot be written.
pub fn run(cli: &Cli) -> Result<()> {
    let conventions = load_conventions(cli)?;
    let scanner = StepScanner::new(conventions);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Classify { names } => {
            let borrowed: Vec<&str> = names.iter().map(String::as_str).collect();
            write_classifications(&mut out, &scanner.classify(&borrowed))
        }
        Commands::Conventions => write_conventions(&mut out, scanner.conventions()),
    }
}

fn load_conventions(cli: &Cli) -> Result<ConventionSet> {
    cli.conventions.as_ref().map_or_else(
        || Ok(ConventionSet::default()),
        |path| {
            debug!(path = %path, "loading conventions");
            ConventionSet::from_path(path)
                .with_context(|| format!("loading conventions from {path}"))
        },
    )
}

/// Write one tab-separated line per classified name.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_classifications(
    out: &mut impl Write,
    classified: &[Classification<'_>],
) -> Result<()> {
    for entry in classified {
        match entry.convention {
            Some(convention) => writeln!(
                out,
                "{}\t{}\torder={}\tasserts={}\treport={}\t{}",
                entry.name,
                convention.label(),
                convention.execution_order(),
                convention.asserts(),
                convention.should_report(),
                title::from_method_name(entry.name),
            )?,
            None => writeln!(out, "{}\tunmatched", entry.name)?,
        }
    }
    Ok(())
}

/// Write one tab-separated line per convention in evaluation order.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_conventions(out: &mut impl Write, conventions: &ConventionSet) -> Result<()> {
    for convention in conventions {
        writeln!(
            out,
            "{}\t{:?}\tpriority={}\torder={}\tasserts={}\treport={}",
            convention.label(),
            convention.rule(),
            convention.priority(),
            convention.execution_order(),
            convention.asserts(),
            convention.should_report(),
        )?;
    }
    Ok(())
}
