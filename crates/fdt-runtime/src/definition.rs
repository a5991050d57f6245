//! Test definitions - the records produced by registration
//!
//! A [`TestDefinition`] is the canonical form every registration call is
//! normalized into: a name, a body, and a complete set of [`TestFlags`].

use futures_util::future::{FutureExt, LocalBoxFuture};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

/// Result type returned by test bodies
pub type TestResult = anyhow::Result<()>;

type BoxedBody = Rc<dyn Fn() -> LocalBoxFuture<'static, TestResult>>;

/// A zero-argument test body, synchronous or asynchronous.
///
/// Cloning is cheap; clones share the same closure. The optional identifier
/// plays the role of a function's own name and is used when a registration
/// call does not provide one explicitly.
#[derive(Clone)]
pub struct TestFn {
    name: Option<String>,
    body: BoxedBody,
}

impl TestFn {
    /// Wrap a synchronous body
    pub fn new<F>(body: F) -> Self
    where
        F: Fn() -> TestResult + 'static,
    {
        Self {
            name: None,
            body: Rc::new(move || {
                let result = body();
                async move { result }.boxed_local()
            }),
        }
    }

    /// Wrap a body that returns a future
    pub fn new_async<F, Fut>(body: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = TestResult> + 'static,
    {
        Self {
            name: None,
            body: Rc::new(move || body().boxed_local()),
        }
    }

    /// Attach an identifier to this body
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The body's own identifier, if it has a non-empty one
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Start one invocation of the body
    pub fn call(&self) -> LocalBoxFuture<'static, TestResult> {
        (self.body)()
    }
}

impl fmt::Debug for TestFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestFn")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Build a [`TestFn`] from a function item, named after the function.
///
/// ```ignore
/// fn parses_empty_input() -> fdt_runtime::TestResult { Ok(()) }
/// registry.test(test_fn!(parses_empty_input))?;
/// ```
#[macro_export]
macro_rules! test_fn {
    ($f:ident) => {
        $crate::TestFn::new($f).named(stringify!($f))
    };
}

/// Build an async [`TestFn`] from an `async fn` item, named after the function.
#[macro_export]
macro_rules! async_test_fn {
    ($f:ident) => {
        $crate::TestFn::new_async($f).named(stringify!($f))
    };
}

/// Execution flags carried by every definition
#[derive(Debug, Clone, PartialEq)]
pub struct TestFlags {
    /// Count the test but never run it
    pub ignore: bool,
    /// Restrict the module to tests marked `only`
    pub only: bool,
    /// Declared for compatibility; not enforced
    pub sanitize_ops: bool,
    /// Declared for compatibility; not enforced
    pub sanitize_resources: bool,
    /// Run the body under the exit guard
    pub sanitize_exit: bool,
    /// Opaque permission metadata, passed through untouched
    pub permissions: Value,
}

impl Default for TestFlags {
    fn default() -> Self {
        Self {
            ignore: false,
            only: false,
            sanitize_ops: true,
            sanitize_resources: true,
            sanitize_exit: true,
            permissions: Value::Null,
        }
    }
}

/// Caller-supplied options for a registration call.
///
/// Every field is optional; absent flags fall back to [`TestFlags::default`].
#[derive(Debug, Clone, Default)]
pub struct TestOptions {
    pub name: Option<String>,
    pub body: Option<TestFn>,
    pub ignore: Option<bool>,
    pub only: Option<bool>,
    pub sanitize_ops: Option<bool>,
    pub sanitize_resources: Option<bool>,
    pub sanitize_exit: Option<bool>,
    pub permissions: Option<Value>,
}

impl TestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn body(mut self, body: TestFn) -> Self {
        self.body = Some(body);
        self
    }

    pub fn ignore(mut self, ignore: bool) -> Self {
        self.ignore = Some(ignore);
        self
    }

    pub fn only(mut self, only: bool) -> Self {
        self.only = Some(only);
        self
    }

    pub fn sanitize_ops(mut self, sanitize: bool) -> Self {
        self.sanitize_ops = Some(sanitize);
        self
    }

    pub fn sanitize_resources(mut self, sanitize: bool) -> Self {
        self.sanitize_resources = Some(sanitize);
        self
    }

    pub fn sanitize_exit(mut self, sanitize: bool) -> Self {
        self.sanitize_exit = Some(sanitize);
        self
    }

    pub fn permissions(mut self, permissions: Value) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Shallow-merge these options over the default flags
    pub fn flags(&self) -> TestFlags {
        let defaults = TestFlags::default();
        TestFlags {
            ignore: self.ignore.unwrap_or(defaults.ignore),
            only: self.only.unwrap_or(defaults.only),
            sanitize_ops: self.sanitize_ops.unwrap_or(defaults.sanitize_ops),
            sanitize_resources: self
                .sanitize_resources
                .unwrap_or(defaults.sanitize_resources),
            sanitize_exit: self.sanitize_exit.unwrap_or(defaults.sanitize_exit),
            permissions: self.permissions.clone().unwrap_or(defaults.permissions),
        }
    }
}

/// A normalized test: name, body and a complete set of flags
#[derive(Debug, Clone)]
pub struct TestDefinition {
    pub name: String,
    pub body: TestFn,
    pub flags: TestFlags,
}

impl TestDefinition {
    /// Whether the runner should skip this test
    pub fn is_ignored(&self) -> bool {
        self.flags.ignore
    }

    /// Whether this test is marked `only`
    pub fn is_only(&self) -> bool {
        self.flags.only
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_flags() {
        let flags = TestFlags::default();
        assert!(!flags.ignore);
        assert!(!flags.only);
        assert!(flags.sanitize_ops);
        assert!(flags.sanitize_resources);
        assert!(flags.sanitize_exit);
        assert_eq!(flags.permissions, Value::Null);
    }

    #[test]
    fn test_options_merge_over_defaults() {
        let flags = TestOptions::new()
            .ignore(true)
            .sanitize_exit(false)
            .permissions(json!({ "read": true }))
            .flags();

        assert!(flags.ignore);
        assert!(!flags.sanitize_exit);
        assert!(flags.sanitize_ops);
        assert_eq!(flags.permissions, json!({ "read": true }));
    }

    #[test]
    fn test_fn_name_ignores_empty_identifier() {
        let anonymous = TestFn::new(|| Ok(()));
        assert_eq!(anonymous.name(), None);
        assert_eq!(anonymous.clone().named("").name(), None);
        assert_eq!(anonymous.named("works").name(), Some("works"));
    }

    #[test]
    fn test_fn_macro_uses_function_name() {
        fn checks_things() -> TestResult {
            Ok(())
        }
        let body = crate::test_fn!(checks_things);
        assert_eq!(body.name(), Some("checks_things"));
    }

    #[tokio::test]
    async fn test_sync_body_result_is_surfaced() {
        let body = TestFn::new(|| Err(anyhow::anyhow!("nope")));
        let err = body.call().await.unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }

    #[tokio::test]
    async fn test_async_body_runs_on_each_call() {
        let calls = Rc::new(std::cell::Cell::new(0));
        let counter = calls.clone();
        let body = TestFn::new_async(move || {
            let counter = counter.clone();
            async move {
                counter.set(counter.get() + 1);
                Ok(())
            }
        });

        body.call().await.unwrap();
        body.call().await.unwrap();
        assert_eq!(calls.get(), 2);
    }
}
