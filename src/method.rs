//! Registration tables describing a scenario's candidate methods.
//!
//! Rust has no runtime reflection, so a scenario type declares its steps in
//! a [`StepTable`]: an ordered list of [`StepMethod`] entries mapping a
//! method name to its body, arity and parameter sets. The table order is
//! the declaration order the scanner walks.
//!
//! ```
//! use stepscan::{ParameterSet, StepArg, StepMethod, StepTable, step_args};
//!
//! #[derive(Default)]
//! struct Account {
//!     balance: i64,
//! }
//!
//! impl Account {
//!     fn given_balance(&mut self, args: &[StepArg]) -> anyhow::Result<()> {
//!         self.balance = args.first().and_then(StepArg::as_i64).unwrap_or_default();
//!         Ok(())
//!     }
//! }
//!
//! let table = StepTable::<Account>::new().with(
//!     StepMethod::plain("GivenAccountBalance", Account::given_balance)
//!         .arity(2)
//!         .with_parameter_set(ParameterSet::new(step_args![100, "USD"])),
//! );
//! assert_eq!(table.len(), 1);
//! ```

use crate::arg::StepArg;
use anyhow::Result;
use miette::Diagnostic;
use thiserror::Error;

/// Lazily produced step titles returned by self-reporting methods.
///
/// Each item is either a title or the failure raised while producing it.
pub type TextSequence<'a> = Box<dyn Iterator<Item = Result<String>> + 'a>;

/// Body of an ordinary step method.
pub type PlainFn<T> = fn(&mut T, &[StepArg]) -> Result<()>;

/// Body of a self-reporting step method.
///
/// The returned sequence may borrow the scenario but not the arguments;
/// clone any argument the sequence needs.
pub type SelfReportingFn<T> = for<'a> fn(&'a mut T, &[StepArg]) -> TextSequence<'a>;

/// Box any iterator of titles as a [`TextSequence`].
pub fn text_sequence<'a, I>(titles: I) -> TextSequence<'a>
where
    I: IntoIterator<Item = Result<String>>,
    I::IntoIter: 'a,
{
    Box::new(titles.into_iter())
}

/// How a method is invoked and whether it reports its own title.
pub enum StepBody<T> {
    /// Runs to completion and reports nothing.
    Plain(PlainFn<T>),
    /// Produces a lazy sequence whose first item is the step title.
    SelfReporting(SelfReportingFn<T>),
}

impl<T> StepBody<T> {
    /// Whether the method supplies its own title.
    #[must_use]
    pub const fn is_self_reporting(&self) -> bool {
        matches!(self, Self::SelfReporting(_))
    }
}

impl<T> Clone for StepBody<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StepBody<T> {}

impl<T> std::fmt::Debug for StepBody<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Plain(_) => "Plain",
            Self::SelfReporting(_) => "SelfReporting",
        })
    }
}

/// One group of arguments producing an independent step variant.
///
/// Sets with no arguments are skipped by the scanner, which lets a scenario
/// suppress a variant without deleting it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    args: Vec<StepArg>,
    template: Option<String>,
}

impl ParameterSet {
    /// Create a set from its arguments.
    #[must_use]
    pub const fn new(args: Vec<StepArg>) -> Self {
        Self {
            args,
            template: None,
        }
    }

    /// Attach a title template using `{N}` slots for the flattened arguments.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// The declared arguments.
    #[must_use]
    pub fn args(&self) -> &[StepArg] {
        &self.args
    }

    /// The title template, if any. Empty templates count as absent.
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref().filter(|template| !template.is_empty())
    }

    /// Whether the set carries no arguments.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// A candidate method of a scenario type.
pub struct StepMethod<T> {
    name: String,
    arity: Option<usize>,
    body: StepBody<T>,
    parameter_sets: Vec<ParameterSet>,
}

impl<T> StepMethod<T> {
    /// Register an ordinary method.
    #[must_use]
    pub fn plain(name: impl Into<String>, body: PlainFn<T>) -> Self {
        Self::new(name, StepBody::Plain(body))
    }

    /// Register a method that reports its own title.
    #[must_use]
    pub fn self_reporting(name: impl Into<String>, body: SelfReportingFn<T>) -> Self {
        Self::new(name, StepBody::SelfReporting(body))
    }

    fn new(name: impl Into<String>, body: StepBody<T>) -> Self {
        Self {
            name: name.into(),
            arity: None,
            body,
            parameter_sets: Vec::new(),
        }
    }

    /// Declare how many arguments the method requires.
    ///
    /// Invocations with a different count fail with
    /// [`StepInvocationError::ArityMismatch`]. Methods without a declared
    /// arity accept any argument list.
    #[must_use]
    pub const fn arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    /// Declare a parameter set.
    #[must_use]
    pub fn with_parameter_set(mut self, set: ParameterSet) -> Self {
        self.parameter_sets.push(set);
        self
    }

    /// Declare a parameter set without a template.
    #[must_use]
    pub fn with_args(self, args: Vec<StepArg>) -> Self {
        self.with_parameter_set(ParameterSet::new(args))
    }

    /// The method identifier matched against conventions.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared arity, if any.
    #[must_use]
    pub const fn required_args(&self) -> Option<usize> {
        self.arity
    }

    /// The method body.
    #[must_use]
    pub const fn body(&self) -> StepBody<T> {
        self.body
    }

    /// Declared parameter sets in declaration order.
    #[must_use]
    pub fn parameter_sets(&self) -> &[ParameterSet] {
        &self.parameter_sets
    }

    pub(crate) fn invocation(&self, args: Vec<StepArg>) -> Invocation<T> {
        Invocation {
            method: self.name.clone(),
            arity: self.arity,
            body: self.body,
            args,
        }
    }
}

impl<T> Clone for StepMethod<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            arity: self.arity,
            body: self.body,
            parameter_sets: self.parameter_sets.clone(),
        }
    }
}

impl<T> std::fmt::Debug for StepMethod<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepMethod")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("body", &self.body)
            .field("parameter_sets", &self.parameter_sets)
            .finish()
    }
}

/// Ordered candidate methods of one scenario type.
pub struct StepTable<T> {
    methods: Vec<StepMethod<T>>,
}

impl<T> Clone for StepTable<T> {
    fn clone(&self) -> Self {
        Self {
            methods: self.methods.clone(),
        }
    }
}

impl<T> std::fmt::Debug for StepTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.methods).finish()
    }
}

impl<T> StepTable<T> {
    /// Create an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            methods: Vec::new(),
        }
    }

    /// Append a method, returning the table for chaining.
    #[must_use]
    pub fn with(mut self, method: StepMethod<T>) -> Self {
        self.push(method);
        self
    }

    /// Append a method.
    pub fn push(&mut self, method: StepMethod<T>) {
        self.methods.push(method);
    }

    /// Methods in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[StepMethod<T>] {
        &self.methods
    }

    /// Number of registered methods.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether no methods are registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<T> Default for StepTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<StepMethod<T>> for StepTable<T> {
    fn from_iter<I: IntoIterator<Item = StepMethod<T>>>(iter: I) -> Self {
        Self {
            methods: iter.into_iter().collect(),
        }
    }
}

/// A type that declares its own step table.
///
/// ```
/// use stepscan::{Scenario, StepArg, StepMethod, StepTable};
///
/// #[derive(Default)]
/// struct Login {
///     attempts: u32,
/// }
///
/// impl Login {
///     fn when_the_user_logs_in(&mut self, _args: &[StepArg]) -> anyhow::Result<()> {
///         self.attempts += 1;
///         Ok(())
///     }
/// }
///
/// impl Scenario for Login {
///     fn steps() -> StepTable<Self> {
///         StepTable::new().with(StepMethod::plain(
///             "WhenTheUserLogsIn",
///             Self::when_the_user_logs_in,
///         ))
///     }
/// }
///
/// assert_eq!(Login::steps().len(), 1);
/// ```
pub trait Scenario: Sized {
    /// Build the ordered table of candidate methods.
    fn steps() -> StepTable<Self>;
}

/// Failures raised by the invocation machinery rather than a step body.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum StepInvocationError {
    /// The argument count differs from the declared arity.
    #[error("method '{method}' expects {expected} argument(s) but was invoked with {actual}")]
    #[diagnostic(code(stepscan::invoke::arity_mismatch))]
    ArityMismatch {
        /// Method being invoked.
        method: String,
        /// Declared arity.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },
}

/// A method body bound to its arguments.
pub(crate) struct Invocation<T> {
    method: String,
    arity: Option<usize>,
    body: StepBody<T>,
    args: Vec<StepArg>,
}

impl<T> Invocation<T> {
    pub(crate) fn method(&self) -> &str {
        &self.method
    }

    pub(crate) fn args(&self) -> &[StepArg] {
        &self.args
    }

    pub(crate) const fn body(&self) -> StepBody<T> {
        self.body
    }

    fn check_arity(&self) -> Result<(), StepInvocationError> {
        match self.arity {
            Some(expected) if expected != self.args.len() => {
                Err(StepInvocationError::ArityMismatch {
                    method: self.method.clone(),
                    expected,
                    actual: self.args.len(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Run the method to completion, draining self-reported titles.
    pub(crate) fn execute(&self, object: &mut T) -> Result<()> {
        self.check_arity()?;
        match self.body {
            StepBody::Plain(body) => body(object, &self.args),
            StepBody::SelfReporting(body) => {
                for title in body(object, &self.args) {
                    title?;
                }
                Ok(())
            }
        }
    }

    /// Invoke a self-reporting method and return its first title.
    ///
    /// Plain methods report no title and are not invoked.
    pub(crate) fn first_title(&self, object: &mut T) -> Result<Option<String>> {
        let StepBody::SelfReporting(body) = self.body else {
            return Ok(None);
        };
        self.check_arity()?;
        body(object, &self.args).next().transpose()
    }
}

impl<T> Clone for Invocation<T> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            arity: self.arity,
            body: self.body,
            args: self.args.clone(),
        }
    }
}
