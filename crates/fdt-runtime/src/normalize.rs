//! Overload resolution for `test(...)` registration calls
//!
//! Test files register tests with one of five call shapes:
//!
//! | Shape | Arguments                | Name comes from                    |
//! |-------|--------------------------|------------------------------------|
//! | 1     | `(name, fn)`             | `name`                             |
//! | 2     | `(name, options, fn)`    | `name`                             |
//! | 3     | `(fn)`                   | the function's identifier          |
//! | 4     | `(options)`              | `options.name` or `options.body`'s |
//! | 5     | `(options, fn)`          | `options.name` or `fn`'s           |
//!
//! [`classify`] maps raw arguments onto a [`CallShape`]; [`normalize`] turns
//! a shape into a [`TestDefinition`] with every flag populated.

use crate::definition::{TestDefinition, TestFlags, TestFn, TestOptions};
use crate::error::{ArgPosition, RegistrationError};

/// One argument of a registration call
#[derive(Debug, Clone)]
pub enum TestArg {
    Name(String),
    Body(TestFn),
    Options(TestOptions),
}

impl From<&str> for TestArg {
    fn from(name: &str) -> Self {
        TestArg::Name(name.to_string())
    }
}

impl From<String> for TestArg {
    fn from(name: String) -> Self {
        TestArg::Name(name)
    }
}

impl From<TestFn> for TestArg {
    fn from(body: TestFn) -> Self {
        TestArg::Body(body)
    }
}

impl From<TestOptions> for TestArg {
    fn from(options: TestOptions) -> Self {
        TestArg::Options(options)
    }
}

/// The raw arguments of one registration call, before classification
#[derive(Debug, Clone)]
pub struct TestCall {
    pub first: TestArg,
    pub second: Option<TestArg>,
    pub third: Option<TestArg>,
}

impl TestCall {
    pub fn new(first: TestArg, second: Option<TestArg>, third: Option<TestArg>) -> Self {
        Self {
            first,
            second,
            third,
        }
    }
}

impl From<TestFn> for TestCall {
    fn from(body: TestFn) -> Self {
        TestCall::new(TestArg::Body(body), None, None)
    }
}

impl From<TestOptions> for TestCall {
    fn from(options: TestOptions) -> Self {
        TestCall::new(TestArg::Options(options), None, None)
    }
}

impl<A: Into<TestArg>> From<(A,)> for TestCall {
    fn from((first,): (A,)) -> Self {
        TestCall::new(first.into(), None, None)
    }
}

impl<A: Into<TestArg>, B: Into<TestArg>> From<(A, B)> for TestCall {
    fn from((first, second): (A, B)) -> Self {
        TestCall::new(first.into(), Some(second.into()), None)
    }
}

impl<A: Into<TestArg>, B: Into<TestArg>, C: Into<TestArg>> From<(A, B, C)> for TestCall {
    fn from((first, second, third): (A, B, C)) -> Self {
        TestCall::new(first.into(), Some(second.into()), Some(third.into()))
    }
}

/// A classified registration call; each variant holds exactly what its shape provides
#[derive(Debug, Clone)]
pub enum CallShape {
    /// `(name, fn)`
    NameBody { name: String, body: TestFn },
    /// `(name, options, fn)`
    NameOptionsBody {
        name: String,
        options: TestOptions,
        body: TestFn,
    },
    /// `(fn)` with a named function
    NamedBody { body: TestFn },
    /// `(options)` with `options.body` set
    Options { options: TestOptions },
    /// `(options, fn)`
    OptionsBody { options: TestOptions, body: TestFn },
}

/// Decide which call shape a set of arguments forms
pub fn classify(call: TestCall) -> Result<CallShape, RegistrationError> {
    use ArgPosition::{First, Second, Third};

    match (call.first, call.second, call.third) {
        (TestArg::Name(name), second, third) => {
            if name.is_empty() {
                return Err(RegistrationError::EmptyName);
            }
            match (second, third) {
                (Some(TestArg::Body(body)), None) => Ok(CallShape::NameBody { name, body }),
                (Some(TestArg::Body(_)), Some(_)) => {
                    Err(RegistrationError::UnexpectedArgument(Third))
                }
                (Some(TestArg::Options(options)), Some(TestArg::Body(body))) => {
                    if options.body.is_some() {
                        return Err(RegistrationError::UnexpectedFnField(Third));
                    }
                    if options.name.is_some() {
                        return Err(RegistrationError::UnexpectedNameField(First));
                    }
                    Ok(CallShape::NameOptionsBody {
                        name,
                        options,
                        body,
                    })
                }
                (Some(TestArg::Options(_)), _) | (None, _) => {
                    Err(RegistrationError::MissingTestFunction)
                }
                (Some(TestArg::Name(_)), _) => Err(RegistrationError::InvalidArgument(Second)),
            }
        }
        (TestArg::Body(body), second, third) => {
            if body.name().is_none() {
                return Err(RegistrationError::UnnamedFunction);
            }
            if second.is_some() {
                return Err(RegistrationError::UnexpectedArgument(Second));
            }
            if third.is_some() {
                return Err(RegistrationError::UnexpectedArgument(Third));
            }
            Ok(CallShape::NamedBody { body })
        }
        (TestArg::Options(options), Some(TestArg::Body(body)), third) => {
            if third.is_some() {
                return Err(RegistrationError::UnexpectedArgument(Third));
            }
            if options.body.is_some() {
                return Err(RegistrationError::UnexpectedFnField(Second));
            }
            Ok(CallShape::OptionsBody { options, body })
        }
        (TestArg::Options(options), None, None) => {
            if options.body.is_none() {
                return Err(RegistrationError::MissingFnField);
            }
            Ok(CallShape::Options { options })
        }
        (TestArg::Options(_), None, Some(_)) => Err(RegistrationError::UnexpectedArgument(Third)),
        (TestArg::Options(_), Some(_), _) => Err(RegistrationError::InvalidArgument(Second)),
    }
}

/// Build the canonical definition for a classified call
pub fn normalize(shape: CallShape) -> Result<TestDefinition, RegistrationError> {
    let (name, body, flags) = match shape {
        CallShape::NameBody { name, body } => (Some(name), body, TestFlags::default()),
        CallShape::NameOptionsBody {
            name,
            options,
            body,
        } => (Some(name), body, options.flags()),
        CallShape::NamedBody { body } => {
            let name = body.name().map(str::to_string);
            (name, body, TestFlags::default())
        }
        CallShape::Options { options } => {
            let flags = options.flags();
            let body = options.body.ok_or(RegistrationError::MissingFnField)?;
            let name = options.name.or_else(|| body.name().map(str::to_string));
            (name, body, flags)
        }
        CallShape::OptionsBody { options, body } => {
            let flags = options.flags();
            let name = options.name.or_else(|| body.name().map(str::to_string));
            (name, body, flags)
        }
    };

    match name {
        Some(name) if !name.is_empty() => Ok(TestDefinition { name, body, flags }),
        _ => Err(RegistrationError::EmptyName),
    }
}

/// Classify and normalize in one step
pub fn definition_from(call: impl Into<TestCall>) -> Result<TestDefinition, RegistrationError> {
    normalize(classify(call.into())?)
}
