//! `ScanWorld` fixture holding the state shared by scanning steps.

use anyhow::{Context, Result, anyhow};
use camino::Utf8Path;
use rstest::fixture;
use stepscan::arg::join_flattened;
use stepscan::{
    ConventionSet, ExecutionStep, ParameterSet, ScanError, StepArg, StepMethod, StepScanner,
    StepTable, TextSequence, text_sequence,
};

/// Scenario object whose methods record how they were invoked.
#[derive(Debug, Default)]
pub struct Recorder {
    /// Flattened arguments of every plain invocation, in call order.
    pub calls: Vec<String>,
}

impl Recorder {
    fn record(&mut self, args: &[StepArg]) -> Result<()> {
        self.calls.push(join_flattened(args));
        Ok(())
    }

    fn report(&mut self, _args: &[StepArg]) -> TextSequence<'_> {
        text_sequence([Ok("Reported title".to_owned())])
    }

    fn fail(&mut self, _args: &[StepArg]) -> TextSequence<'_> {
        text_sequence([Err(anyhow!("title could not be computed"))])
    }
}

/// Test world for step scanning scenarios.
#[derive(Debug, Default)]
pub struct ScanWorld {
    conventions: ConventionSet,
    table: StepTable<Recorder>,
    recorder: Recorder,
    steps: Vec<ExecutionStep<Recorder>>,
    error: Option<ScanError>,
}

// rustfmt collapses simple fixtures into one line, which triggers unused_braces.
/// Fresh world for each scenario.
#[rustfmt::skip]
#[fixture]
pub fn scan_world() -> ScanWorld {
    ScanWorld::default()
}

impl ScanWorld {
    /// Use the built-in convention set.
    pub fn use_default_conventions(&mut self) {
        self.conventions = ConventionSet::default();
    }

    /// Load conventions from a YAML file relative to the crate root.
    pub fn load_conventions(&mut self, path: &str) -> Result<()> {
        self.conventions = ConventionSet::from_path(Utf8Path::new(path))
            .with_context(|| format!("load conventions from {path}"))?;
        Ok(())
    }

    /// Declare plain, argument-free methods from a comma-separated list.
    pub fn declare(&mut self, names: &str) {
        let declared = names.split(',').map(str::trim);
        for name in declared.filter(|candidate| !candidate.is_empty()) {
            self.table.push(StepMethod::plain(name, Recorder::record));
        }
    }

    /// Declare a plain method with `;`-separated argument sets.
    ///
    /// Arguments inside a set are separated by `,`; integers become
    /// [`StepArg::Int`] and everything else [`StepArg::Text`].
    pub fn declare_with_sets(&mut self, name: &str, sets: &str) {
        let mut method = StepMethod::plain(name, Recorder::record);
        for set in sets.split(';') {
            method = method.with_parameter_set(ParameterSet::new(parse_args(set)));
        }
        self.table.push(method);
    }

    /// Declare a self-reporting method that titles itself.
    pub fn declare_reporting(&mut self, name: &str) {
        self.table.push(StepMethod::self_reporting(name, Recorder::report));
    }

    /// Declare a self-reporting method that fails before reporting.
    pub fn declare_failing(&mut self, name: &str) {
        self.table.push(StepMethod::self_reporting(name, Recorder::fail));
    }

    /// Scan the declared table, keeping either the steps or the error.
    pub fn scan(&mut self) {
        let scanner = StepScanner::new(self.conventions.clone());
        match scanner.scan_ordered(&self.table, &mut self.recorder) {
            Ok(steps) => self.steps = steps,
            Err(err) => self.error = Some(err),
        }
    }

    /// Execute every scanned step in order.
    pub fn execute_all(&mut self) -> Result<()> {
        for step in &self.steps {
            let context = format!("execute step '{}'", step.title());
            step.execute(&mut self.recorder).context(context)?;
        }
        Ok(())
    }

    /// Titles of the scanned steps.
    pub fn titles(&self) -> Vec<&str> {
        self.steps.iter().map(ExecutionStep::title).collect()
    }

    /// Convention labels of the scanned steps.
    pub fn conventions(&self) -> Vec<&str> {
        self.steps.iter().map(ExecutionStep::convention).collect()
    }

    /// Calls recorded while executing steps.
    pub fn calls(&self) -> &[String] {
        &self.recorder.calls
    }

    /// The scan failure, if any.
    pub const fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }
}

fn parse_args(set: &str) -> Vec<StepArg> {
    set.split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(parse_arg)
        .collect()
}

fn parse_arg(arg: &str) -> StepArg {
    arg.parse::<i64>()
        .map_or_else(|_| StepArg::from(arg), StepArg::from)
}
