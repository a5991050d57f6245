//! Test module resolution and evaluation
//!
//! Test files are addressed by path on the command line. Paths are resolved
//! against the working directory into `file://` URLs; a [`ModuleLoader`]
//! then evaluates the module behind that URL, which registers its tests
//! into the shared [`Registry`].

use crate::error::ImportError;
use crate::registry::Registry;
use std::env;
use std::fmt;
use tracing::debug;
use url::Url;

/// Entry point of a test module: registers the module's tests
pub type ModuleFn = fn(&Registry) -> anyhow::Result<()>;

/// Evaluates test modules
pub trait ModuleLoader {
    /// Evaluate the module at `url`, registering its tests into `registry`
    fn load(&self, url: &Url, registry: &Registry) -> Result<(), ImportError>;
}

/// URL of the current working directory, with a trailing slash
pub fn cwd_base() -> Result<Url, ImportError> {
    let cwd = env::current_dir()?;
    Url::from_directory_path(&cwd).map_err(|()| ImportError::InvalidBase(cwd))
}

/// Resolve a test file path against a base directory URL
pub fn resolve_specifier(base: &Url, specifier: &str) -> Result<Url, ImportError> {
    base.join(specifier)
        .map_err(|source| ImportError::InvalidSpecifier {
            specifier: specifier.to_string(),
            source,
        })
}

/// Modules compiled into the runner binary, keyed by their file path
#[derive(Clone, Default)]
pub struct ModuleTable {
    base: Option<Url>,
    modules: Vec<(String, ModuleFn)>,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve module paths against `base` instead of the working directory
    pub fn with_base(mut self, base: Url) -> Self {
        self.base = Some(base);
        self
    }

    /// Add a module under `path` (relative to the base directory, or absolute)
    pub fn module(mut self, path: impl Into<String>, register: ModuleFn) -> Self {
        self.modules.push((path.into(), register));
        self
    }

    /// Paths of every module in the table, in insertion order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|(path, _)| path.as_str())
    }

    fn find(&self, url: &Url) -> Result<Option<ModuleFn>, ImportError> {
        let base = match &self.base {
            Some(base) => base.clone(),
            None => cwd_base()?,
        };
        for (path, register) in &self.modules {
            if resolve_specifier(&base, path)? == *url {
                return Ok(Some(*register));
            }
        }
        Ok(None)
    }
}

impl fmt::Debug for ModuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleTable")
            .field("base", &self.base.as_ref().map(Url::as_str))
            .field("modules", &self.paths().collect::<Vec<_>>())
            .finish()
    }
}

impl ModuleLoader for ModuleTable {
    fn load(&self, url: &Url, registry: &Registry) -> Result<(), ImportError> {
        let register = self
            .find(url)?
            .ok_or_else(|| ImportError::NotFound(url.clone()))?;

        debug!(%url, "evaluating test module");
        register(registry).map_err(|source| ImportError::Evaluation {
            url: url.clone(),
            source,
        })
    }
}
