//! fdt runtime - the test registration shim
//!
//! This crate is what test modules depend on:
//! - [`Registry::test`] registers tests with any of the accepted call shapes
//! - [`TestFilter`] selects tests by name
//! - [`exit`] and [`ExitGuard`] keep test bodies from terminating the runner
//! - [`ModuleTable`] maps test file paths to the modules that register them
//!
//! Running the registered tests is the job of the `fdt` CLI.

/// fdt runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod definition;
pub mod error;
pub mod exit;
pub mod filter;
pub mod loader;
pub mod normalize;
pub mod registry;

pub use definition::{TestDefinition, TestFlags, TestFn, TestOptions, TestResult};
pub use error::{ArgPosition, FilterError, ImportError, RegistrationError};
pub use exit::{exit, ExitAttempt, ExitGuard};
pub use filter::TestFilter;
pub use loader::{cwd_base, resolve_specifier, ModuleFn, ModuleLoader, ModuleTable};
pub use normalize::{classify, normalize, CallShape, TestArg, TestCall};
pub use registry::Registry;
