//! Behaviour tests for step scanning using rstest-bdd.
//!
//! Scenarios live in `tests/features`; each is bound to a test function in
//! `bdd::scenarios` and receives a fresh [`bdd::fixtures::ScanWorld`].

mod bdd;
