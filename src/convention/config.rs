//! Loading convention sets from YAML.
//!
//! A convention file lists matchers under a `conventions` key. Each entry
//! names its rule through exactly one of `starts_with`, `ends_with` or
//! `equals`:
//!
//! ```yaml
//! conventions:
//!   - label: given
//!     starts_with: Given
//!     execution_order: 2
//!   - label: then
//!     starts_with: Then
//!     asserts: true
//!     execution_order: 6
//! ```
//!
//! Entries without an explicit `priority` rank by their position in the
//! file.
//
// Module-level suppression for version-dependent lint false positives from
// miette/thiserror derive macros. The unused_assignments lint fires in some
// Rust versions but not others, and `#[expect]` fails when it does not.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use super::{ConventionMatcher, ConventionSet, ExecutionOrder, NameRule};
use camino::{Utf8Path, Utf8PathBuf};
use miette::Diagnostic;
use serde::Deserialize;
use std::fs;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a convention file.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read convention file {path}")]
    #[diagnostic(code(stepscan::config::read))]
    Read {
        /// Path that was attempted.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The YAML is malformed or does not describe a convention set.
    #[error("failed to parse convention file {name}")]
    #[diagnostic(
        code(stepscan::config::parse),
        help(
            "each entry needs a label, an execution_order and one of \
             starts_with, ends_with or equals"
        )
    )]
    Parse {
        /// Label of the source being parsed.
        name: String,
        /// Underlying parser failure.
        #[source]
        source: serde_saphyr::Error,
    },
    /// The file parsed but declares no conventions.
    #[error("convention file {name} declares no conventions")]
    #[diagnostic(code(stepscan::config::empty))]
    Empty {
        /// Label of the source being parsed.
        name: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConventionFile {
    conventions: Vec<ConventionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(try_from = "RawEntry")]
struct ConventionEntry {
    label: String,
    rule: NameRule,
    asserts: bool,
    execution_order: ExecutionOrder,
    should_report: bool,
    priority: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    label: String,
    starts_with: Option<String>,
    ends_with: Option<String>,
    equals: Option<String>,
    #[serde(default)]
    asserts: bool,
    execution_order: ExecutionOrder,
    #[serde(default = "default_should_report")]
    should_report: bool,
    priority: Option<u32>,
}

const fn default_should_report() -> bool {
    true
}

impl TryFrom<RawEntry> for ConventionEntry {
    type Error = String;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        let rule = match (raw.starts_with, raw.ends_with, raw.equals) {
            (Some(prefix), None, None) => NameRule::StartsWith(prefix),
            (None, Some(suffix), None) => NameRule::EndsWith(suffix),
            (None, None, Some(text)) => NameRule::Equals(text),
            (None, None, None) => {
                return Err(format!(
                    "convention '{}' is missing one of starts_with, ends_with, or equals",
                    raw.label
                ));
            }
            _ => {
                return Err(format!(
                    "convention '{}': starts_with, ends_with, and equals are mutually exclusive",
                    raw.label
                ));
            }
        };
        Ok(Self {
            label: raw.label,
            rule,
            asserts: raw.asserts,
            execution_order: raw.execution_order,
            should_report: raw.should_report,
            priority: raw.priority,
        })
    }
}

impl ConventionEntry {
    fn into_matcher(self, position: usize) -> ConventionMatcher {
        let priority = self
            .priority
            .unwrap_or_else(|| u32::try_from(position).unwrap_or(u32::MAX));
        ConventionMatcher::new(self.label, self.rule, self.execution_order)
            .asserting(self.asserts)
            .reported(self.should_report)
            .with_priority(priority)
    }
}

impl ConventionSet {
    /// Parse a convention set from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed input and
    /// [`ConfigError::Empty`] when no conventions are declared.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::from_yaml_named(yaml, "<inline>")
    }

    /// Read and parse a convention set from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors of [`ConventionSet::from_yaml_str`].
    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_named(&yaml, path.as_str())
    }

    fn from_yaml_named(yaml: &str, name: &str) -> Result<Self, ConfigError> {
        let file: ConventionFile =
            serde_saphyr::from_str(yaml).map_err(|source| ConfigError::Parse {
                name: name.to_owned(),
                source,
            })?;
        if file.conventions.is_empty() {
            return Err(ConfigError::Empty {
                name: name.to_owned(),
            });
        }
        let matchers: Vec<_> = file
            .conventions
            .into_iter()
            .enumerate()
            .map(|(position, entry)| entry.into_matcher(position))
            .collect();
        debug!(source = name, count = matchers.len(), "loaded conventions");
        Ok(Self::new(matchers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail, ensure};
    use rstest::rstest;

    const VOCABULARY: &str = "\
conventions:
  - label: then
    starts_with: Then
    asserts: true
    execution_order: 6
    priority: 50
  - label: given
    starts_with: Given
    execution_order: 2
  - label: cleanup
    equals: Cleanup
    execution_order: 8
    should_report: false
";

    #[test]
    fn parses_entries_and_orders_by_priority() -> Result<()> {
        let set = ConventionSet::from_yaml_str(VOCABULARY)?;
        let labels: Vec<_> = set.iter().map(ConventionMatcher::label).collect();
        ensure!(labels == ["given", "cleanup", "then"], "unexpected order {labels:?}");

        let then = set.first_match("ThenItWorks");
        ensure!(
            then.is_some_and(|m| m.asserts() && m.execution_order() == ExecutionOrder::ASSERTION),
            "then convention should assert at the assertion order"
        );
        let cleanup = set.first_match("cleanup");
        ensure!(
            cleanup.is_some_and(|m| !m.should_report()),
            "cleanup convention should not be reported"
        );
        Ok(())
    }

    #[rstest]
    #[case("conventions:\n  - label: x\n    execution_order: 1\n")]
    #[case(
        "conventions:\n  - label: x\n    starts_with: A\n    equals: B\n    execution_order: 1\n"
    )]
    #[case(
        "conventions:\n  - label: x\n    starts_with: A\n    execution_order: 1\n    colour: red\n"
    )]
    #[case("rules: []\n")]
    fn rejects_invalid_entries(#[case] yaml: &str) -> Result<()> {
        match ConventionSet::from_yaml_str(yaml) {
            Err(ConfigError::Parse { .. }) => Ok(()),
            other => bail!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_sets() -> Result<()> {
        match ConventionSet::from_yaml_str("conventions: []\n") {
            Err(ConfigError::Empty { name }) => {
                ensure!(name == "<inline>", "unexpected source name {name}");
                Ok(())
            }
            other => bail!("expected empty error, got {other:?}"),
        }
    }

    #[test]
    fn reports_missing_files() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = Utf8PathBuf::from_path_buf(dir.path().join("missing.yml"))
            .map_err(|path| anyhow::anyhow!("non UTF-8 temp path {}", path.display()))?;
        match ConventionSet::from_path(&path) {
            Err(ConfigError::Read { path: reported, .. }) => {
                ensure!(reported == path, "unexpected path {reported}");
                Ok(())
            }
            other => bail!("expected read error, got {other:?}"),
        }
    }
}
