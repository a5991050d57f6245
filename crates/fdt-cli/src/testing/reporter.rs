//! Test reporter - line-oriented console output
//!
//! ```text
//! running 2 tests from file:///work/math_test.rs
//! test adds ... ok (0ms)
//! test divides ... FAILED (1ms)
//!
//! failures:
//!
//! divides
//! division by zero
//!
//! test result: FAILED. 1 passed; 1 failed; 0 ignored; 0 filtered out (3ms)
//! ```

use crate::testing::runner::RunSummary;
use colored::{Color, Colorize};
use std::io::{self, Write};
use std::time::Duration;
use url::Url;

/// Status printed at the end of a `test <name> ...` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    Ignored,
    Ok,
    Failed,
}

/// Test reporter with output configuration
pub struct TestReporter<W: Write> {
    out: W,
    /// Disable colored output
    no_color: bool,
}

impl TestReporter<io::Stdout> {
    /// Reporter writing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TestReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            no_color: false,
        }
    }

    /// Disable colored output
    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.color(color).to_string()
        }
    }

    fn timing(&self, duration: Duration) -> String {
        self.paint(&format!(" ({}ms)", duration.as_millis()), Color::BrightBlack)
    }

    pub fn module_started(&mut self, count: usize, url: &Url) -> io::Result<()> {
        writeln!(self.out, "running {count} tests from {url}")
    }

    /// Start a test line; the status is written once the test settles
    pub fn test_started(&mut self, name: &str) -> io::Result<()> {
        write!(self.out, "test {name} ...")?;
        self.out.flush()
    }

    pub fn test_finished(&mut self, status: TestStatus, elapsed: Duration) -> io::Result<()> {
        let status = match status {
            TestStatus::Ignored => self.paint(" ignored", Color::Yellow),
            TestStatus::Ok => self.paint(" ok", Color::Green),
            TestStatus::Failed => self.paint(" FAILED", Color::Red),
        };
        let timing = self.timing(elapsed);
        writeln!(self.out, "{status}{timing}")
    }

    /// Failure listing followed by the result line
    pub fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        let stats = &summary.stats;

        if !stats.failures.is_empty() {
            write!(self.out, "\nfailures:\n")?;
            for failure in &stats.failures {
                write!(
                    self.out,
                    "\n{}\n{}\n",
                    failure.test.name,
                    failure.error.detail()
                )?;
            }
        }

        let status = if summary.is_ok() {
            self.paint(" ok", Color::Green)
        } else {
            self.paint(" FAILED", Color::Red)
        };
        let timing = self.timing(summary.duration);
        writeln!(
            self.out,
            "\ntest result:{status}. {} passed; {} failed; {} ignored; {} filtered out{timing}",
            stats.passed,
            stats.failures.len(),
            stats.ignored,
            stats.filtered_out,
        )?;

        if stats.only_used {
            let note = self.paint(
                "error: Test failed because the \"only\" option was used",
                Color::Red,
            );
            writeln!(self.out, "{note}")?;
        }

        self.out.flush()
    }
}
