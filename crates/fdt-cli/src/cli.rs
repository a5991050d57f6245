//! Command-line parsing
//!
//! Parsing goes through clap, but errors are mapped onto fdt's own short
//! diagnostics (`fdt: --bogus: invalid option`) and exit code 2.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, Parser};
use fdt_runtime::FilterError;
use std::ffi::OsString;
use std::time::Duration;
use thiserror::Error;

/// Help text printed by `--help`
pub const HELP: &str = include_str!("../cli_help.txt");

/// Exit code for configuration errors
pub const USAGE_EXIT_CODE: u8 = 2;

/// Runs tests written against the test(name, fn) registration API.
#[derive(Parser, Debug)]
#[command(name = "fdt")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Test files to run, resolved against the working directory
    #[arg(value_name = "TEST_FILE")]
    pub files: Vec<String>,

    /// Run only tests whose name contains this text, or matches /regex/
    #[arg(long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Stop after N failures (1 when given without a value)
    #[arg(
        long,
        value_name = "N",
        num_args = 0..=1,
        require_equals = false,
        default_missing_value = "true",
        value_parser = parse_fail_fast
    )]
    pub fail_fast: Option<usize>,

    /// Fail any test that has not settled after MS milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Print help
    #[arg(short = 'h', long, action = ArgAction::SetTrue)]
    pub help: bool,

    /// Print version
    #[arg(short = 'v', long, short_alias = 'V', action = ArgAction::SetTrue)]
    pub version: bool,
}

impl Cli {
    /// Filter text, empty when `--filter` was not given
    pub fn filter_text(&self) -> &str {
        self.filter.as_deref().unwrap_or_default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_millis)
    }
}

/// Configuration errors; all of them exit with [`USAGE_EXIT_CODE`]
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}: invalid option")]
    InvalidOption(String),

    #[error("--fail-fast: expected a number, got {0:?}")]
    InvalidFailFast(String),

    #[error("--filter: {0}")]
    Filter(#[from] FilterError),

    #[error("{0}")]
    Usage(String),
}

impl CliError {
    fn from_clap(err: clap::Error) -> Self {
        let context = |kind| match err.get(kind) {
            Some(ContextValue::String(value)) => Some(value.clone()),
            _ => None,
        };

        match err.kind() {
            ErrorKind::UnknownArgument => {
                CliError::InvalidOption(context(ContextKind::InvalidArg).unwrap_or_default())
            }
            ErrorKind::ValueValidation | ErrorKind::InvalidValue
                if context(ContextKind::InvalidArg)
                    .is_some_and(|arg| arg.starts_with("--fail-fast")) =>
            {
                CliError::InvalidFailFast(context(ContextKind::InvalidValue).unwrap_or_default())
            }
            _ => {
                let rendered = err.render().to_string();
                let message = rendered.trim_end();
                CliError::Usage(message.strip_prefix("error: ").unwrap_or(message).to_string())
            }
        }
    }
}

/// `--fail-fast` accepts a count, or nothing (parsed from the missing-value default)
fn parse_fail_fast(value: &str) -> Result<usize, String> {
    if value == "true" {
        return Ok(1);
    }
    value
        .parse()
        .map_err(|_| format!("expected a number, got {value:?}"))
}

/// Parse command-line arguments, including the program name
pub fn parse<I, T>(args: I) -> Result<Cli, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(CliError::from_clap)
}
