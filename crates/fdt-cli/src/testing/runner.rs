//! Test runner - import test modules and execute their tests

use crate::testing::reporter::{TestReporter, TestStatus};
use fdt_runtime::exit::{self, ExitAttempt, ExitGuard};
use fdt_runtime::{
    cwd_base, resolve_specifier, ImportError, ModuleLoader, Registry, TestDefinition, TestFilter,
};
use futures_util::FutureExt;
use std::any::Any;
use std::io::{self, Write};
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, trace};
use url::Url;

/// Why a single test failed
#[derive(Debug, Error)]
pub enum TestFailure {
    /// The body returned an error
    #[error("{0:#}")]
    Error(anyhow::Error),
    /// The body panicked
    #[error("test panicked: {0}")]
    Panicked(String),
    /// The body tried to exit the process
    #[error(transparent)]
    Exit(ExitAttempt),
    /// The body did not settle within the configured timeout
    #[error("Test case timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),
}

impl TestFailure {
    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        if let Some(attempt) = exit::exit_attempt(payload.as_ref()) {
            return TestFailure::Exit(attempt);
        }
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_string()
        };
        TestFailure::Panicked(message)
    }

    /// Full error detail for the failure listing
    pub fn detail(&self) -> String {
        match self {
            TestFailure::Error(error) => format!("{error:?}"),
            other => other.to_string(),
        }
    }
}

/// A test that failed, with its error
#[derive(Debug)]
pub struct Failure {
    pub test: TestDefinition,
    pub error: TestFailure,
}

/// Counters collected over one run
#[derive(Debug, Default)]
pub struct RunStats {
    pub passed: usize,
    pub ignored: usize,
    pub filtered_out: usize,
    /// Failures in the order they occurred
    pub failures: Vec<Failure>,
    /// Some module restricted itself to `only` tests
    pub only_used: bool,
}

/// Outcome of a completed run
#[derive(Debug)]
pub struct RunSummary {
    pub stats: RunStats,
    pub duration: Duration,
}

impl RunSummary {
    /// The run passed: nothing failed and `only` was not used
    pub fn is_ok(&self) -> bool {
        self.stats.failures.is_empty() && !self.stats.only_used
    }
}

/// Errors that abort a whole run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("failed to write test report: {0}")]
    Io(#[from] io::Error),
}

/// Sequential test runner.
///
/// Imports one module at a time, drains the registry, filters, and runs the
/// selected tests in registration order. Test bodies never overlap: the exit
/// guard is a per-thread resource.
pub struct TestRunner<'a, L: ModuleLoader> {
    loader: &'a L,
    registry: &'a Registry,
    filter: TestFilter,
    /// Stop once this many tests have failed
    fail_fast: Option<usize>,
    /// Timeout for individual tests
    timeout: Option<Duration>,
    /// Directory test paths are resolved against (working directory if unset)
    base: Option<Url>,
}

impl<'a, L: ModuleLoader> TestRunner<'a, L> {
    /// Create a runner with no filter, no fail-fast limit and no timeout
    pub fn new(loader: &'a L, registry: &'a Registry) -> Self {
        Self {
            loader,
            registry,
            filter: TestFilter::All,
            fail_fast: None,
            timeout: None,
            base: None,
        }
    }

    pub fn with_filter(mut self, filter: TestFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Stop the run after `limit` failures (`None` for no limit)
    pub fn with_fail_fast(mut self, limit: Option<usize>) -> Self {
        self.fail_fast = limit;
        self
    }

    /// Set the timeout for individual tests
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base(mut self, base: Url) -> Self {
        self.base = Some(base);
        self
    }

    /// Run every test module in `paths`, reporting as it goes
    pub async fn run<W: Write>(
        &self,
        paths: &[String],
        reporter: &mut TestReporter<W>,
    ) -> Result<RunSummary, RunError> {
        let started = Instant::now();
        let base = match &self.base {
            Some(base) => base.clone(),
            None => cwd_base()?,
        };
        let mut stats = RunStats::default();

        'modules: for path in paths {
            let url = resolve_specifier(&base, path)?;
            debug!(%url, "importing test module");
            self.loader.load(&url, self.registry)?;

            let tests = self.select(self.registry.drain_all(), &mut stats);
            reporter.module_started(tests.len(), &url)?;

            for test in tests {
                reporter.test_started(&test.name)?;
                let start = Instant::now();

                if test.is_ignored() {
                    stats.ignored += 1;
                    reporter.test_finished(TestStatus::Ignored, start.elapsed())?;
                    continue;
                }

                trace!(name = %test.name, "running test");
                match self.execute(&test).await {
                    Ok(()) => {
                        stats.passed += 1;
                        reporter.test_finished(TestStatus::Ok, start.elapsed())?;
                    }
                    Err(error) => {
                        debug!(name = %test.name, %error, "test failed");
                        reporter.test_finished(TestStatus::Failed, start.elapsed())?;
                        stats.failures.push(Failure { test, error });
                    }
                }

                if self
                    .fail_fast
                    .is_some_and(|limit| stats.failures.len() >= limit)
                {
                    debug!(failures = stats.failures.len(), "fail-fast limit reached");
                    break 'modules;
                }
            }
        }

        let summary = RunSummary {
            stats,
            duration: started.elapsed(),
        };
        reporter.summary(&summary)?;
        Ok(summary)
    }

    /// Apply the filter and `only` marks to a drained module
    fn select(&self, drained: Vec<TestDefinition>, stats: &mut RunStats) -> Vec<TestDefinition> {
        let registered = drained.len();
        let mut selected: Vec<_> = drained
            .into_iter()
            .filter(|test| self.filter.matches(test))
            .collect();

        if selected.iter().any(TestDefinition::is_only) {
            selected.retain(TestDefinition::is_only);
            stats.only_used = true;
        }

        stats.filtered_out += registered - selected.len();
        debug!(registered, selected = selected.len(), "drained test module");
        selected
    }

    /// Run one test body to completion, catching errors, panics and exit attempts
    async fn execute(&self, test: &TestDefinition) -> Result<(), TestFailure> {
        let body = test.body.clone();
        let sanitize_exit = test.flags.sanitize_exit;
        let guarded = async move {
            let _guard = sanitize_exit.then(ExitGuard::intercept);
            body.call().await
        };
        let caught = AssertUnwindSafe(guarded).catch_unwind();

        let outcome = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, caught)
                .await
                .map_err(|_| TestFailure::TimedOut(limit))?,
            None => caught.await,
        };

        match outcome {
            Ok(Ok(())) => Ok(()),
            Ok(Err(error)) => Err(TestFailure::Error(error)),
            Err(payload) => Err(TestFailure::from_panic(payload)),
        }
    }
}
