//! Naming conventions that classify scenario methods into step categories.
//!
//! A [`ConventionMatcher`] pairs a [`NameRule`] with the metadata attached to
//! every step it claims: whether the step asserts, its default
//! [`ExecutionOrder`], and whether it is reported. A [`ConventionSet`] keeps
//! matchers sorted by ascending priority so overlapping rules resolve
//! deterministically: a method named `AndGivenX` is claimed by an
//! `AndGiven` rule before a looser `And` rule is consulted.
//!
//! ```
//! use stepscan::convention::{ConventionSet, ExecutionOrder};
//!
//! let set = ConventionSet::default();
//! let matcher = set.first_match("AndGivenAnotherUser").expect("claimed");
//! assert_eq!(matcher.label(), "and_given");
//! assert_eq!(matcher.execution_order(), ExecutionOrder::CONSECUTIVE_SETUP_STATE);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

mod config;

pub use config::ConfigError;

/// Relative position of a step within a scenario.
///
/// Lower values run first. Steps sharing a value keep their discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionOrder(i32);

impl ExecutionOrder {
    /// Initialisation performed before any state is set up.
    pub const INITIALIZE: Self = Self(1);
    /// Establishing the scenario's starting state (`Given`).
    pub const SETUP_STATE: Self = Self(2);
    /// Further setup following a `Given` step (`AndGiven`).
    pub const CONSECUTIVE_SETUP_STATE: Self = Self(3);
    /// The action under test (`When`).
    pub const TRANSITION: Self = Self(4);
    /// Further actions following a `When` step (`AndWhen`).
    pub const CONSECUTIVE_TRANSITION: Self = Self(5);
    /// The first verification (`Then`).
    pub const ASSERTION: Self = Self(6);
    /// Further verifications (`And`).
    pub const CONSECUTIVE_ASSERTION: Self = Self(7);
    /// Cleanup after the scenario (`TearDown`).
    pub const TEAR_DOWN: Self = Self(8);

    /// Wrap a raw ordering value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Return the raw ordering value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for ExecutionOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Predicate deciding whether a method name belongs to a convention.
///
/// The textual rules compare ASCII characters case-insensitively.
#[derive(Clone)]
pub enum NameRule {
    /// The name starts with the given prefix.
    StartsWith(String),
    /// The name ends with the given suffix.
    EndsWith(String),
    /// The name equals the given text.
    Equals(String),
    /// Arbitrary predicate supplied by the host.
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl NameRule {
    /// Match names starting with `prefix`.
    #[must_use]
    pub fn starts_with(prefix: impl Into<String>) -> Self {
        Self::StartsWith(prefix.into())
    }

    /// Match names ending with `suffix`.
    #[must_use]
    pub fn ends_with(suffix: impl Into<String>) -> Self {
        Self::EndsWith(suffix.into())
    }

    /// Match names equal to `text`.
    #[must_use]
    pub fn equals(text: impl Into<String>) -> Self {
        Self::Equals(text.into())
    }

    /// Match names accepted by `predicate`.
    #[must_use]
    pub fn custom(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(predicate))
    }

    /// Test `name` against the rule.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::StartsWith(prefix) => name
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix)),
            Self::EndsWith(suffix) => name
                .len()
                .checked_sub(suffix.len())
                .and_then(|start| name.get(start..))
                .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix)),
            Self::Equals(text) => name.eq_ignore_ascii_case(text),
            Self::Custom(predicate) => predicate(name),
        }
    }
}

impl Debug for NameRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartsWith(prefix) => f.debug_tuple("StartsWith").field(prefix).finish(),
            Self::EndsWith(suffix) => f.debug_tuple("EndsWith").field(suffix).finish(),
            Self::Equals(text) => f.debug_tuple("Equals").field(text).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A naming rule plus the metadata of the step category it recognises.
#[derive(Debug, Clone)]
pub struct ConventionMatcher {
    label: String,
    rule: NameRule,
    asserts: bool,
    execution_order: ExecutionOrder,
    should_report: bool,
    priority: u32,
}

impl ConventionMatcher {
    /// Create a reported, non-asserting matcher with priority zero.
    #[must_use]
    pub fn new(label: impl Into<String>, rule: NameRule, execution_order: ExecutionOrder) -> Self {
        Self {
            label: label.into(),
            rule,
            asserts: false,
            execution_order,
            should_report: true,
            priority: 0,
        }
    }

    /// Set whether claimed steps represent a validation.
    #[must_use]
    pub const fn asserting(mut self, asserts: bool) -> Self {
        self.asserts = asserts;
        self
    }

    /// Set whether claimed steps are surfaced in reports.
    #[must_use]
    pub const fn reported(mut self, should_report: bool) -> Self {
        self.should_report = should_report;
        self
    }

    /// Set the rank used to order matchers; lower ranks are consulted first.
    #[must_use]
    pub const fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Test whether `name` belongs to this convention.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.rule.matches(name)
    }

    /// Category name used in logs and diagnostics.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The naming rule.
    #[must_use]
    pub const fn rule(&self) -> &NameRule {
        &self.rule
    }

    /// Whether claimed steps represent a validation.
    #[must_use]
    pub const fn asserts(&self) -> bool {
        self.asserts
    }

    /// Default relative position of claimed steps.
    #[must_use]
    pub const fn execution_order(&self) -> ExecutionOrder {
        self.execution_order
    }

    /// Whether claimed steps are surfaced in reports.
    #[must_use]
    pub const fn should_report(&self) -> bool {
        self.should_report
    }

    /// Rank used to order matchers.
    #[must_use]
    pub const fn priority(&self) -> u32 {
        self.priority
    }
}

/// Matchers sorted by ascending priority.
///
/// Sorting is stable, so matchers sharing a priority keep the order in which
/// they were supplied.
#[derive(Debug, Clone)]
pub struct ConventionSet {
    matchers: Vec<ConventionMatcher>,
}

impl ConventionSet {
    /// Build a set from `matchers`, ordering them by priority.
    #[must_use]
    pub fn new(mut matchers: Vec<ConventionMatcher>) -> Self {
        matchers.sort_by_key(ConventionMatcher::priority);
        Self { matchers }
    }

    /// Matchers in evaluation order.
    #[must_use]
    pub fn as_slice(&self) -> &[ConventionMatcher] {
        &self.matchers
    }

    /// Iterate matchers in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConventionMatcher> {
        self.matchers.iter()
    }

    /// Number of matchers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Whether the set holds no matchers.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// The first matcher, in evaluation order, accepting `name`.
    ///
    /// This ignores claims made during a scan; use
    /// [`crate::scanner::StepScanner`] to classify a whole scenario.
    #[must_use]
    pub fn first_match(&self, name: &str) -> Option<&ConventionMatcher> {
        self.matchers.iter().find(|matcher| matcher.matches(name))
    }
}

impl Default for ConventionSet {
    /// The built-in Given/When/Then vocabulary.
    fn default() -> Self {
        Self::new(vec![
            ConventionMatcher::new(
                "context",
                NameRule::ends_with("Context"),
                ExecutionOrder::SETUP_STATE,
            )
            .reported(false)
            .with_priority(10),
            ConventionMatcher::new("setup", NameRule::equals("Setup"), ExecutionOrder::SETUP_STATE)
                .reported(false)
                .with_priority(20),
            ConventionMatcher::new(
                "given",
                NameRule::starts_with("Given"),
                ExecutionOrder::SETUP_STATE,
            )
            .with_priority(30),
            ConventionMatcher::new(
                "and_given",
                NameRule::starts_with("AndGiven"),
                ExecutionOrder::CONSECUTIVE_SETUP_STATE,
            )
            .with_priority(40),
            ConventionMatcher::new(
                "when",
                NameRule::starts_with("When"),
                ExecutionOrder::TRANSITION,
            )
            .with_priority(50),
            ConventionMatcher::new(
                "and_when",
                NameRule::starts_with("AndWhen"),
                ExecutionOrder::CONSECUTIVE_TRANSITION,
            )
            .with_priority(60),
            ConventionMatcher::new(
                "then",
                NameRule::starts_with("Then"),
                ExecutionOrder::ASSERTION,
            )
            .asserting(true)
            .with_priority(70),
            ConventionMatcher::new(
                "and",
                NameRule::starts_with("And"),
                ExecutionOrder::CONSECUTIVE_ASSERTION,
            )
            .asserting(true)
            .with_priority(80),
            ConventionMatcher::new(
                "tear_down",
                NameRule::starts_with("TearDown"),
                ExecutionOrder::TEAR_DOWN,
            )
            .reported(false)
            .with_priority(90),
        ])
    }
}

impl<'a> IntoIterator for &'a ConventionSet {
    type Item = &'a ConventionMatcher;
    type IntoIter = std::slice::Iter<'a, ConventionMatcher>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
