//! Registry of test definitions for the module under test

use crate::definition::TestDefinition;
use crate::error::RegistrationError;
use crate::normalize::{self, TestCall};
use std::cell::RefCell;
use tracing::trace;

/// Ordered, append-only holding area for definitions registered since the
/// last drain.
///
/// One registry is created per run and shared by reference between the
/// module loader (which registers) and the runner (which drains).
#[derive(Debug, Default)]
pub struct Registry {
    definitions: RefCell<Vec<TestDefinition>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a test using any of the accepted call shapes.
    ///
    /// ```ignore
    /// registry.test(("adds numbers", TestFn::new(|| Ok(()))))?;
    /// registry.test(("slow", TestOptions::new().ignore(true), body))?;
    /// registry.test(test_fn!(adds_numbers))?;
    /// registry.test(TestOptions::new().name("opts").body(body))?;
    /// registry.test((TestOptions::new().name("opts"), body))?;
    /// ```
    pub fn test(&self, call: impl Into<TestCall>) -> Result<(), RegistrationError> {
        let definition = normalize::definition_from(call)?;
        self.register(definition);
        Ok(())
    }

    /// Append an already-normalized definition
    pub fn register(&self, definition: TestDefinition) {
        trace!(name = %definition.name, "registered test");
        self.definitions.borrow_mut().push(definition);
    }

    /// Take every definition registered since the last drain, leaving the registry empty
    pub fn drain_all(&self) -> Vec<TestDefinition> {
        std::mem::take(&mut *self.definitions.borrow_mut())
    }

    /// Snapshot of the pending definitions, without draining
    pub fn definitions(&self) -> Vec<TestDefinition> {
        self.definitions.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.definitions.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::TestFn;

    fn noop() -> TestFn {
        TestFn::new(|| Ok(()))
    }

    #[test]
    fn test_registration_order_is_kept() {
        let registry = Registry::new();
        registry.test(("first", noop())).unwrap();
        registry.test(("second", noop())).unwrap();
        registry.test(("third", noop())).unwrap();

        let names: Vec<_> = registry.drain_all().into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_drain_twice_is_empty() {
        let registry = Registry::new();
        registry.test(("only one", noop())).unwrap();

        assert_eq!(registry.drain_all().len(), 1);
        assert!(registry.drain_all().is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_failed_registration_leaves_registry_untouched() {
        let registry = Registry::new();
        assert!(registry.test(("", noop())).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_definitions_snapshot_does_not_drain() {
        let registry = Registry::new();
        registry.test(("kept", noop())).unwrap();

        assert_eq!(registry.definitions().len(), 1);
        assert_eq!(registry.len(), 1);
    }
}
