//! Scenario test functions for step scanning.

use rstest_bdd_macros::scenario;

use crate::bdd::fixtures::*;

#[scenario(
    path = "tests/features/step_scanning.feature",
    name = "Methods are claimed by the most specific convention"
)]
fn methods_are_claimed_once(scan_world: ScanWorld) {
    drop(scan_world);
}

#[scenario(
    path = "tests/features/step_scanning.feature",
    name = "Empty parameter sets are skipped"
)]
fn empty_parameter_sets_are_skipped(scan_world: ScanWorld) {
    drop(scan_world);
}

#[scenario(
    path = "tests/features/step_scanning.feature",
    name = "Executing steps runs every method with its arguments"
)]
fn executing_steps_runs_methods(scan_world: ScanWorld) {
    drop(scan_world);
}

#[scenario(
    path = "tests/features/step_scanning.feature",
    name = "Self-reporting methods supply their own title"
)]
fn self_reporting_titles(scan_world: ScanWorld) {
    drop(scan_world);
}

#[scenario(
    path = "tests/features/step_scanning.feature",
    name = "A failing self-reporting method aborts the scan"
)]
fn failing_self_report_aborts(scan_world: ScanWorld) {
    drop(scan_world);
}

#[scenario(
    path = "tests/features/step_scanning.feature",
    name = "Conventions can be loaded from YAML"
)]
fn conventions_from_yaml(scan_world: ScanWorld) {
    drop(scan_world);
}
