//! Test runner infrastructure
//!
//! Imports test modules, runs their tests one at a time and reports
//! results in the `running N tests from <url>` console format.

pub mod reporter;
pub mod runner;

pub use reporter::{TestReporter, TestStatus};
pub use runner::{Failure, RunError, RunStats, RunSummary, TestFailure, TestRunner};
