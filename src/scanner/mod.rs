//! Convention-driven step scanning.
//!
//! [`StepScanner`] walks a scenario's [`StepTable`] once per matcher, in
//! priority order. Each matcher considers only methods no earlier matcher
//! has claimed, so a method appears under exactly one convention. Claimed
//! methods expand to one step, or one step per non-empty parameter set.
//!
//! Steps are yielded lazily in discovery order (matcher priority, then
//! declaration order). [`StepScanner::scan_ordered`] collects them and
//! stable-sorts by [`crate::ExecutionOrder`].
//!
//! ```
//! use stepscan::{Scenario, StepArg, StepMethod, StepScanner, StepTable};
//!
//! #[derive(Default)]
//! struct Login {
//!     log: Vec<&'static str>,
//! }
//!
//! impl Login {
//!     fn then_welcomed(&mut self, _: &[StepArg]) -> anyhow::Result<()> {
//!         self.log.push("then");
//!         Ok(())
//!     }
//!     fn given_a_user(&mut self, _: &[StepArg]) -> anyhow::Result<()> {
//!         self.log.push("given");
//!         Ok(())
//!     }
//! }
//!
//! impl Scenario for Login {
//!     fn steps() -> StepTable<Self> {
//!         StepTable::new()
//!             .with(StepMethod::plain("ThenTheUserIsWelcomed", Self::then_welcomed))
//!             .with(StepMethod::plain("GivenAUser", Self::given_a_user))
//!     }
//! }
//!
//! let mut login = Login::default();
//! let steps = StepScanner::default().scan_scenario(&mut login)?;
//! let titles: Vec<_> = steps.iter().map(|step| step.title()).collect();
//! assert_eq!(titles, ["Given a user", "Then the user is welcomed"]);
//! for step in &steps {
//!     step.execute(&mut login)?;
//! }
//! assert_eq!(login.log, ["given", "then"]);
//! # Ok::<(), anyhow::Error>(())
//! ```

mod error;

pub use error::ScanError;

use crate::convention::{ConventionMatcher, ConventionSet};
use crate::method::{ParameterSet, Scenario, StepMethod, StepTable};
use crate::step::{ExecutionStep, build_step};
use indexmap::IndexSet;
use tracing::{debug, trace};

/// Anything the scanner can match by name.
pub(crate) trait Named {
    fn candidate_name(&self) -> &str;
}

impl<T> Named for StepMethod<T> {
    fn candidate_name(&self) -> &str {
        self.name()
    }
}

impl Named for &str {
    fn candidate_name(&self) -> &str {
        self
    }
}

/// Walks (matcher, method) pairs, claiming each method at most once.
#[derive(Debug, Default)]
struct ClaimCursor {
    matcher: usize,
    method: usize,
    claimed: IndexSet<usize>,
}

impl ClaimCursor {
    /// Advance to the next claim as `(matcher index, method index)`.
    fn next_claim<N: Named>(
        &mut self,
        matchers: &[ConventionMatcher],
        methods: &[N],
    ) -> Option<(usize, usize)> {
        while let Some(matcher) = matchers.get(self.matcher) {
            while let Some(method) = methods.get(self.method) {
                let index = self.method;
                self.method += 1;
                if self.claimed.contains(&index) || !matcher.matches(method.candidate_name()) {
                    continue;
                }
                self.claimed.insert(index);
                debug!(
                    method = method.candidate_name(),
                    convention = matcher.label(),
                    "method claimed by convention"
                );
                return Some((self.matcher, index));
            }
            self.matcher += 1;
            self.method = 0;
        }
        None
    }

    fn is_claimed(&self, index: usize) -> bool {
        self.claimed.contains(&index)
    }
}

/// Classification of one method name by a convention set.
#[derive(Debug, Clone, Copy)]
pub struct Classification<'a> {
    /// The classified name.
    pub name: &'a str,
    /// The claiming convention, or `None` when no convention matched.
    pub convention: Option<&'a ConventionMatcher>,
}

/// Produces execution steps from scenario objects.
#[derive(Debug, Clone, Default)]
pub struct StepScanner {
    conventions: ConventionSet,
}

impl StepScanner {
    /// Create a scanner applying `conventions`.
    #[must_use]
    pub const fn new(conventions: ConventionSet) -> Self {
        Self { conventions }
    }

    /// The conventions in evaluation order.
    #[must_use]
    pub const fn conventions(&self) -> &ConventionSet {
        &self.conventions
    }

    /// Lazily scan `object` using the methods registered in `table`.
    ///
    /// The iterator stops after yielding the first error.
    pub fn scan<'a, T>(&'a self, table: &'a StepTable<T>, object: &'a mut T) -> Scan<'a, T> {
        Scan {
            matchers: self.conventions.as_slice(),
            methods: table.methods(),
            object,
            cursor: ClaimCursor::default(),
            expansion: None,
            finished: false,
        }
    }

    /// Scan `object`, collecting steps sorted by execution order.
    ///
    /// Sorting is stable: steps sharing an execution order keep discovery
    /// order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScanError`] raised while building steps.
    pub fn scan_ordered<T>(
        &self,
        table: &StepTable<T>,
        object: &mut T,
    ) -> Result<Vec<ExecutionStep<T>>, ScanError> {
        let mut steps = self.scan(table, object).collect::<Result<Vec<_>, _>>()?;
        steps.sort_by_key(ExecutionStep::execution_order);
        Ok(steps)
    }

    /// Scan a [`Scenario`] using its own step table.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScanError`] raised while building steps.
    pub fn scan_scenario<T: Scenario>(
        &self,
        object: &mut T,
    ) -> Result<Vec<ExecutionStep<T>>, ScanError> {
        let table = T::steps();
        self.scan_ordered(&table, object)
    }

    /// Classify method names with the claim rules of a scan.
    ///
    /// Claimed names come first, in discovery order; unmatched names follow
    /// in their original order.
    #[must_use]
    pub fn classify<'a>(&'a self, names: &[&'a str]) -> Vec<Classification<'a>> {
        let matchers = self.conventions.as_slice();
        let mut cursor = ClaimCursor::default();
        let mut classified = Vec::with_capacity(names.len());
        while let Some((matcher_index, name_index)) = cursor.next_claim(matchers, names) {
            if let (Some(&name), Some(convention)) =
                (names.get(name_index), matchers.get(matcher_index))
            {
                classified.push(Classification {
                    name,
                    convention: Some(convention),
                });
            }
        }
        classified.extend(
            names
                .iter()
                .enumerate()
                .filter(|(index, _)| !cursor.is_claimed(*index))
                .map(|(_, &name)| Classification {
                    name,
                    convention: None,
                }),
        );
        classified
    }
}

/// Parameter sets of a claimed method still waiting to become steps.
struct Expansion<'a, T> {
    matcher: &'a ConventionMatcher,
    method: &'a StepMethod<T>,
    sets: std::slice::Iter<'a, ParameterSet>,
}

/// Lazy scan over one scenario object.
///
/// Created by [`StepScanner::scan`].
pub struct Scan<'a, T> {
    matchers: &'a [ConventionMatcher],
    methods: &'a [StepMethod<T>],
    object: &'a mut T,
    cursor: ClaimCursor,
    expansion: Option<Expansion<'a, T>>,
    finished: bool,
}

impl<T> Scan<'_, T> {
    fn next_from_expansion(&mut self) -> Option<Result<ExecutionStep<T>, ScanError>> {
        let expansion = self.expansion.as_mut()?;
        for set in expansion.sets.by_ref() {
            if set.is_empty() {
                debug!(
                    method = expansion.method.name(),
                    "skipping parameter set without arguments"
                );
                continue;
            }
            return Some(build_step(
                self.object,
                expansion.matcher,
                expansion.method,
                Some(set),
            ));
        }
        self.expansion = None;
        None
    }

    fn log_unmatched(&self) {
        for (index, method) in self.methods.iter().enumerate() {
            if !self.cursor.is_claimed(index) {
                trace!(method = method.name(), "no convention matched method");
            }
        }
    }
}

impl<T> Iterator for Scan<'_, T> {
    type Item = Result<ExecutionStep<T>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let item = loop {
            if let Some(item) = self.next_from_expansion() {
                break Some(item);
            }
            let Some((matcher_index, method_index)) =
                self.cursor.next_claim(self.matchers, self.methods)
            else {
                self.log_unmatched();
                break None;
            };
            let (Some(matcher), Some(method)) = (
                self.matchers.get(matcher_index),
                self.methods.get(method_index),
            ) else {
                break None;
            };
            if method.parameter_sets().is_empty() {
                break Some(build_step(self.object, matcher, method, None));
            }
            self.expansion = Some(Expansion {
                matcher,
                method,
                sets: method.parameter_sets().iter(),
            });
        };
        self.finished = !matches!(item, Some(Ok(_)));
        item
    }
}

impl<T> std::iter::FusedIterator for Scan<'_, T> {}
