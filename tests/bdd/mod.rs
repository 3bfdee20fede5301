//! BDD test module providing fixtures, step definitions and scenarios.
//!
//! Step definitions are registered via `#[given]`, `#[when]`, and `#[then]`
//! attribute macros from rstest-bdd.

pub mod fixtures;
mod scenarios;
mod steps;
