//! Executable step descriptors.
//!
//! An [`ExecutionStep`] binds a scenario method to one argument list and
//! carries the title and convention metadata the runner needs. Steps are
//! immutable; running one re-invokes the method, so self-reporting methods
//! run once when their title is resolved and again when executed.

use crate::arg::StepArg;
use crate::convention::{ConventionMatcher, ExecutionOrder};
use crate::method::{Invocation, ParameterSet, StepMethod};
use crate::scanner::ScanError;
use crate::title;
use anyhow::Result;
use std::fmt;
use tracing::debug;

/// One executable Given/When/Then step.
pub struct ExecutionStep<T> {
    title: String,
    convention: String,
    asserts: bool,
    execution_order: ExecutionOrder,
    should_report: bool,
    invocation: Invocation<T>,
}

impl<T> ExecutionStep<T> {
    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Name of the scenario method the step invokes.
    #[must_use]
    pub fn method(&self) -> &str {
        self.invocation.method()
    }

    /// Label of the convention that claimed the method.
    #[must_use]
    pub fn convention(&self) -> &str {
        &self.convention
    }

    /// Arguments bound to the invocation.
    #[must_use]
    pub fn args(&self) -> &[StepArg] {
        self.invocation.args()
    }

    /// Whether the step represents a validation.
    #[must_use]
    pub const fn asserts(&self) -> bool {
        self.asserts
    }

    /// Relative position of the step within the scenario.
    #[must_use]
    pub const fn execution_order(&self) -> ExecutionOrder {
        self.execution_order
    }

    /// Whether the step is surfaced in reports.
    #[must_use]
    pub const fn should_report(&self) -> bool {
        self.should_report
    }

    /// Invoke the step against `object`.
    ///
    /// Self-reporting methods have their whole title sequence drained so
    /// every side effect runs; the titles themselves are discarded.
    ///
    /// # Errors
    ///
    /// Propagates the method's failure unchanged, or a
    /// [`crate::method::StepInvocationError`] when the argument count does
    /// not match the declared arity.
    pub fn execute(&self, object: &mut T) -> Result<()> {
        self.invocation.execute(object)
    }
}

impl<T> Clone for ExecutionStep<T> {
    fn clone(&self) -> Self {
        Self {
            title: self.title.clone(),
            convention: self.convention.clone(),
            asserts: self.asserts,
            execution_order: self.execution_order,
            should_report: self.should_report,
            invocation: self.invocation.clone(),
        }
    }
}

impl<T> fmt::Debug for ExecutionStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionStep")
            .field("title", &self.title)
            .field("method", &self.method())
            .field("convention", &self.convention)
            .field("args", &self.args())
            .field("asserts", &self.asserts)
            .field("execution_order", &self.execution_order)
            .field("should_report", &self.should_report)
            .field("body", &self.invocation.body())
            .finish()
    }
}

/// Build the step for one (method, parameter set) pair.
///
/// Self-reporting methods are invoked against `object` to obtain their
/// first title; an empty sequence falls back to the name-derived title.
pub(crate) fn build_step<T>(
    object: &mut T,
    matcher: &ConventionMatcher,
    method: &StepMethod<T>,
    set: Option<&ParameterSet>,
) -> Result<ExecutionStep<T>, ScanError> {
    let args = set.map(|s| s.args().to_vec()).unwrap_or_default();
    let invocation = method.invocation(args);
    let title = resolve_title(object, method, &invocation, set)?;
    Ok(ExecutionStep {
        title,
        convention: matcher.label().to_owned(),
        asserts: matcher.asserts(),
        execution_order: matcher.execution_order(),
        should_report: matcher.should_report(),
        invocation,
    })
}

fn resolve_title<T>(
    object: &mut T,
    method: &StepMethod<T>,
    invocation: &Invocation<T>,
    set: Option<&ParameterSet>,
) -> Result<String, ScanError> {
    if method.body().is_self_reporting() {
        let first = invocation
            .first_title(object)
            .map_err(|source| ScanError::TitleResolution {
                method: method.name().to_owned(),
                source,
            })?;
        if let Some(title) = first {
            return Ok(title);
        }
        debug!(
            method = method.name(),
            "self-reporting method produced no title; deriving it from the name"
        );
    }
    title::from_method_name_with(method.name(), set).map_err(|source| ScanError::Template {
        method: method.name().to_owned(),
        source,
    })
}
