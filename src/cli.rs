//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure and its subcommands. The CLI is
//! a diagnostic companion to the library: it shows how a convention set
//! classifies method names without needing a compiled scenario.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Classify scenario method names into Given/When/Then steps.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML file describing the naming conventions to apply.
    ///
    /// The built-in Given/When/Then vocabulary is used when omitted.
    #[arg(short, long, value_name = "FILE", global = true)]
    pub conventions: Option<Utf8PathBuf>,

    /// Enable verbose diagnostic logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available top-level commands for Stepscan.
#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// Report the convention, ordering and title each method name receives.
    Classify {
        /// Method names in declaration order.
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },
    /// List the conventions in evaluation order.
    Conventions,
}
