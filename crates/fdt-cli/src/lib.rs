//! fdt - a console test runner
//!
//! The runner binary links its test modules in through a
//! [`ModuleLoader`](fdt_runtime::ModuleLoader) and hands it to [`main`],
//! which parses the command line, imports each test file in order and
//! reports on stdout.

pub mod cli;
pub mod config;
pub mod logging;
pub mod testing;

use crate::cli::{CliError, USAGE_EXIT_CODE};
use crate::commands::test::TestArgs;
use crate::config::Config;
use crate::testing::TestReporter;
use fdt_runtime::{exit, ModuleLoader, TestFilter};
use std::ffi::OsString;
use std::process::ExitCode;
use tracing::debug;

/// fdt CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the CLI with the process arguments
pub fn main<L: ModuleLoader>(loader: L) -> ExitCode {
    main_with_args(std::env::args_os(), &loader)
}

/// Run the CLI with explicit arguments (the first one is the program name)
pub fn main_with_args<I, T, L>(args: I, loader: &L) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    L: ModuleLoader,
{
    let config = Config::from_env();
    logging::init(&config);
    if config.no_color {
        colored::control::set_override(false);
    }
    exit::quiet_exit_attempts();

    let cli = match cli::parse(args) {
        Ok(cli) => cli,
        Err(err) => return usage_error(err),
    };

    if cli.help {
        print!("{}", cli::HELP);
        return ExitCode::SUCCESS;
    }
    if cli.version {
        println!("fdt v{VERSION}");
        return ExitCode::SUCCESS;
    }

    let filter = match TestFilter::compile(cli.filter_text()) {
        Ok(filter) => filter,
        Err(err) => return usage_error(err.into()),
    };

    debug!(files = cli.files.len(), ?filter, "starting run");
    let timeout = cli.timeout();
    let no_files = cli.files.is_empty();
    let args = TestArgs {
        files: cli.files,
        filter,
        fail_fast: cli.fail_fast,
        timeout,
        base: None,
    };

    let mut reporter = TestReporter::stdout().with_no_color(config.no_color);
    let code = match commands::test::run(args, loader, &mut reporter) {
        Ok(summary) if summary.is_ok() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("fdt: {:#}", anyhow::Error::new(err));
            return ExitCode::FAILURE;
        }
    };

    if no_files {
        eprintln!("fdt: no test files specified. Do you need --help?");
    }
    code
}

fn usage_error(err: CliError) -> ExitCode {
    eprintln!("fdt: {err}");
    ExitCode::from(USAGE_EXIT_CODE)
}
