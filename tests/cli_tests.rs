//! Integration tests for the `stepscan` binary using `assert_cmd`.
//!
//! These tests run the compiled binary and check what it writes to stdout
//! for the `classify` and `conventions` subcommands.

use anyhow::{Context, Result};
use assert_cmd::Command;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use tempfile::tempdir;

fn stepscan() -> Result<Command> {
    Command::cargo_bin("stepscan").context("locate stepscan binary")
}

#[test]
fn classify_prints_claims_then_unmatched() -> Result<()> {
    stepscan()?
        .args(["classify", "ThenItWorks", "Helper", "GivenAUser"])
        .assert()
        .success()
        .stdout(
            "GivenAUser\tgiven\torder=2\tasserts=false\treport=true\tGiven a user\n\
             ThenItWorks\tthen\torder=6\tasserts=true\treport=true\tThen it works\n\
             Helper\tunmatched\n",
        );
    Ok(())
}

#[rstest]
#[case("AndGivenMore", "and_given\torder=3")]
#[case("AndWhenRetried", "and_when\torder=5")]
#[case("AndItHolds", "and\torder=7")]
#[case("ShoppingContext", "context\torder=2")]
#[case("TearDown", "tear_down\torder=8")]
fn classify_uses_the_default_vocabulary(#[case] name: &str, #[case] expected: &str) -> Result<()> {
    stepscan()?
        .args(["classify", name])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
    Ok(())
}

#[test]
fn classify_requires_names() -> Result<()> {
    stepscan()?.arg("classify").assert().failure();
    Ok(())
}

#[test]
fn custom_conventions_replace_the_defaults() -> Result<()> {
    stepscan()?
        .args([
            "--conventions",
            "tests/data/custom_conventions.yml",
            "classify",
            "ArrangeCart",
            "GivenAUser",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ArrangeCart\tarrange\torder=2")
                .and(predicate::str::contains("GivenAUser\tunmatched")),
        );
    Ok(())
}

#[test]
fn invalid_conventions_fail_with_a_message() -> Result<()> {
    stepscan()?
        .args([
            "--conventions",
            "tests/data/invalid_conventions.yml",
            "classify",
            "GivenAUser",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid_conventions.yml"));
    Ok(())
}

#[test]
fn missing_convention_file_fails() -> Result<()> {
    let temp = tempdir().context("create temp dir")?;
    let missing = temp.path().join("absent.yml");
    stepscan()?
        .arg("--conventions")
        .arg(&missing)
        .args(["classify", "GivenAUser"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read convention file"));
    Ok(())
}

#[test]
fn conventions_lists_the_loaded_set() -> Result<()> {
    let temp = tempdir().context("create temp dir")?;
    let file = temp.path().join("conventions.yml");
    fs::write(
        &file,
        "conventions:\n  - label: only\n    equals: Run\n    execution_order: 4\n",
    )
    .context("write convention file")?;
    stepscan()?
        .arg("--conventions")
        .arg(&file)
        .arg("conventions")
        .assert()
        .success()
        .stdout("only\tEquals(\"Run\")\tpriority=0\torder=4\tasserts=false\treport=true\n");
    Ok(())
}

#[test]
fn verbose_logging_goes_to_stderr() -> Result<()> {
    stepscan()?
        .args(["--verbose", "classify", "GivenAUser"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("GivenAUser\tgiven"))
        .stderr(predicate::str::contains("method claimed by convention"));
    Ok(())
}
