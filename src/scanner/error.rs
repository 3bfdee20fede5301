//! Error types for the scanner.
//!
//! This submodule isolates derive-macro-affected code to scope lint
//! suppressions narrowly.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros. The unused_assignments lint fires in some
// Rust versions but not others, and `#[expect]` fails when it does not.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use crate::title::TemplateError;
use miette::Diagnostic;
use thiserror::Error;

/// Failures that abort a scan.
///
/// Failures raised while executing a step are not scan errors; they are
/// returned by [`crate::ExecutionStep::execute`].
#[derive(Debug, Error, Diagnostic)]
pub enum ScanError {
    /// A self-reporting method failed before producing its title.
    #[error(
        "the signature of method '{method}' indicates that it returns its step title, \
         but the code failed before a title was returned"
    )]
    #[diagnostic(
        code(stepscan::scan::title_resolution),
        help("self-reporting methods run once to resolve the title and again when executed")
    )]
    TitleResolution {
        /// Name of the offending method.
        method: String,
        /// The failure raised by the method.
        #[source]
        source: anyhow::Error,
    },
    /// A parameter set's title template could not be filled.
    #[error("failed to format the title template of method '{method}'")]
    #[diagnostic(code(stepscan::scan::template))]
    Template {
        /// Name of the method declaring the template.
        method: String,
        /// The formatting failure.
        #[source]
        source: TemplateError,
    },
}

impl ScanError {
    /// Name of the method that caused the failure.
    #[must_use]
    pub fn method(&self) -> &str {
        match self {
            Self::TitleResolution { method, .. } | Self::Template { method, .. } => method,
        }
    }
}
