//! Error types for test registration, filtering and module loading

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Position of an argument in a `test(...)` registration call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgPosition {
    First,
    Second,
    Third,
}

impl fmt::Display for ArgPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgPosition::First => write!(f, "first"),
            ArgPosition::Second => write!(f, "second"),
            ArgPosition::Third => write!(f, "third"),
        }
    }
}

/// A malformed call to the registration API.
///
/// Raised while a test module is being evaluated, before any test runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("The test name can't be empty")]
    EmptyName,

    #[error("Missing test function")]
    MissingTestFunction,

    #[error("Expected 'fn' field in the first argument to be a test function")]
    MissingFnField,

    #[error("The test function must have a name")]
    UnnamedFunction,

    #[error(
        "Unexpected 'fn' field in options, test function is already provided as the {0} argument"
    )]
    UnexpectedFnField(ArgPosition),

    #[error(
        "Unexpected 'name' field in options, test name is already provided as the {0} argument"
    )]
    UnexpectedNameField(ArgPosition),

    #[error("Unexpected {0} argument to test()")]
    UnexpectedArgument(ArgPosition),

    #[error("Expected test options or a test function as the {0} argument")]
    InvalidArgument(ArgPosition),
}

/// A filter string that could not be compiled
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid filter pattern /{pattern}/: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure to resolve or evaluate a test module
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot use {} as a module base directory", .0.display())]
    InvalidBase(PathBuf),

    #[error("invalid module specifier '{specifier}': {source}")]
    InvalidSpecifier {
        specifier: String,
        #[source]
        source: url::ParseError,
    },

    #[error("module not found: {0}")]
    NotFound(Url),

    #[error("error evaluating module {url}")]
    Evaluation {
        url: Url,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
