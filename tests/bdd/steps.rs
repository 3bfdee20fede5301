//! Step definitions for step scanning scenarios.

use crate::bdd::fixtures::ScanWorld;
use anyhow::{Context, Result, ensure};
use rstest_bdd_macros::{given, then, when};

fn split_list(list: &str) -> Vec<&str> {
    list.split('|').map(str::trim).filter(|item| !item.is_empty()).collect()
}

// ---------------------------------------------------------------------------
// Given
// ---------------------------------------------------------------------------

#[given("the default conventions")]
fn default_conventions(scan_world: &mut ScanWorld) -> Result<()> {
    scan_world.use_default_conventions();
    Ok(())
}

#[given("conventions loaded from {path:string}")]
fn conventions_from_file(scan_world: &mut ScanWorld, path: String) -> Result<()> {
    scan_world.load_conventions(&path)
}

#[given("a scenario declaring {names:string}")]
fn scenario_declaring(scan_world: &mut ScanWorld, names: String) -> Result<()> {
    scan_world.declare(&names);
    Ok(())
}

#[given("a method {name:string} with argument sets {sets:string}")]
fn method_with_sets(scan_world: &mut ScanWorld, name: String, sets: String) -> Result<()> {
    scan_world.declare_with_sets(&name, &sets);
    Ok(())
}

#[given("a self-reporting method {name:string}")]
fn self_reporting_method(scan_world: &mut ScanWorld, name: String) -> Result<()> {
    scan_world.declare_reporting(&name);
    Ok(())
}

#[given("a failing self-reporting method {name:string}")]
fn failing_self_reporting_method(scan_world: &mut ScanWorld, name: String) -> Result<()> {
    scan_world.declare_failing(&name);
    Ok(())
}

// ---------------------------------------------------------------------------
// When
// ---------------------------------------------------------------------------

#[when("the scenario is scanned")]
fn scenario_is_scanned(scan_world: &mut ScanWorld) -> Result<()> {
    scan_world.scan();
    Ok(())
}

#[when("every step is executed")]
fn every_step_is_executed(scan_world: &mut ScanWorld) -> Result<()> {
    ensure!(scan_world.error().is_none(), "scan failed: {:?}", scan_world.error());
    scan_world.execute_all()
}

// ---------------------------------------------------------------------------
// Then
// ---------------------------------------------------------------------------

#[then("the step titles are {titles:string}")]
fn step_titles_are(scan_world: &mut ScanWorld, titles: String) -> Result<()> {
    ensure!(scan_world.error().is_none(), "scan failed: {:?}", scan_world.error());
    let expected = split_list(&titles);
    ensure!(
        scan_world.titles() == expected,
        "expected titles {expected:?}, got {:?}",
        scan_world.titles()
    );
    Ok(())
}

#[then("the step conventions are {labels:string}")]
fn step_conventions_are(scan_world: &mut ScanWorld, labels: String) -> Result<()> {
    let expected = split_list(&labels);
    ensure!(
        scan_world.conventions() == expected,
        "expected conventions {expected:?}, got {:?}",
        scan_world.conventions()
    );
    Ok(())
}

#[then("the recorded calls are {calls:string}")]
fn recorded_calls_are(scan_world: &mut ScanWorld, calls: String) -> Result<()> {
    let expected = split_list(&calls);
    ensure!(
        scan_world.calls() == expected.as_slice(),
        "expected calls {expected:?}, got {:?}",
        scan_world.calls()
    );
    Ok(())
}

#[then("scanning fails for method {name:string}")]
fn scanning_fails(scan_world: &mut ScanWorld, name: String) -> Result<()> {
    let error = scan_world.error().context("expected the scan to fail")?;
    ensure!(error.method() == name, "failure named '{}'", error.method());
    ensure!(
        error.to_string().contains("failed before a title was returned"),
        "unexpected message: {error}"
    );
    Ok(())
}
