//! Stepscan core library.
//!
//! This library turns a scenario object into an ordered list of
//! Given/When/Then steps. A scenario registers its candidate methods in a
//! [`StepTable`]; the [`StepScanner`] matches method names against a
//! [`ConventionSet`], expands parameter sets, derives readable titles and
//! yields [`ExecutionStep`] values the caller runs in
//! [`ExecutionOrder`].

pub mod arg;
pub mod cli;
pub mod convention;
pub mod method;
pub mod runner;
pub mod scanner;
pub mod step;
pub mod title;

pub use arg::StepArg;
pub use convention::{ConventionMatcher, ConventionSet, ExecutionOrder, NameRule};
pub use method::{
    ParameterSet, Scenario, StepBody, StepInvocationError, StepMethod, StepTable, TextSequence,
    text_sequence,
};
pub use scanner::{Classification, Scan, ScanError, StepScanner};
pub use step::ExecutionStep;
