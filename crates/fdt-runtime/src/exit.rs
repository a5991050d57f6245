//! Process exit and its interception during test bodies
//!
//! Test code terminates the process through [`exit`]. While an
//! [`ExitGuard`] is alive, an exit attempt unwinds with an [`ExitAttempt`]
//! payload instead, which the runner records as a test failure.
//!
//! The interceptor slot is thread-local: guarded bodies must run one at a
//! time on the thread that installed the guard.

use std::cell::RefCell;
use std::panic;
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

type Interceptor = Rc<dyn Fn(i32)>;

thread_local! {
    static INTERCEPTOR: RefCell<Option<Interceptor>> = const { RefCell::new(None) };
}

/// Panic payload raised when a guarded test body tries to exit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Test case attempted to exit with exit code: {code}")]
pub struct ExitAttempt {
    pub code: i32,
}

/// Terminate the process, unless an interceptor is installed on this thread.
///
/// An installed interceptor runs first; if it returns instead of unwinding,
/// the process exits as usual.
pub fn exit(code: i32) -> ! {
    let interceptor = INTERCEPTOR.with(|slot| slot.borrow().clone());
    if let Some(interceptor) = interceptor {
        interceptor(code);
    }
    std::process::exit(code)
}

/// Whether an interceptor is currently installed on this thread
pub fn is_intercepted() -> bool {
    INTERCEPTOR.with(|slot| slot.borrow().is_some())
}

/// The interceptor that was replaced by [`install`]
#[must_use = "pass the token to `restore` to reinstate the previous interceptor"]
pub struct RestoreToken {
    previous: Option<Interceptor>,
}

/// Replace this thread's exit interceptor, returning the one it replaced
pub fn install(interceptor: impl Fn(i32) + 'static) -> RestoreToken {
    let interceptor: Interceptor = Rc::new(interceptor);
    let previous = INTERCEPTOR.with(|slot| slot.borrow_mut().replace(interceptor));
    RestoreToken { previous }
}

/// Reinstate the interceptor captured by `token`
pub fn restore(token: RestoreToken) {
    INTERCEPTOR.with(|slot| *slot.borrow_mut() = token.previous);
}

/// Scoped exit interception.
///
/// Exit attempts made while the guard is alive unwind with [`ExitAttempt`].
/// Dropping the guard restores the previous interceptor, whether the body
/// returned, failed, panicked or was cancelled.
pub struct ExitGuard {
    token: Option<RestoreToken>,
}

impl ExitGuard {
    pub fn intercept() -> Self {
        let token = install(|code| {
            debug!(code, "intercepted exit attempt");
            panic::panic_any(ExitAttempt { code })
        });
        Self { token: Some(token) }
    }
}

impl Drop for ExitGuard {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            restore(token);
        }
    }
}

/// Recover an [`ExitAttempt`] from a caught panic payload
pub fn exit_attempt(payload: &(dyn std::any::Any + Send)) -> Option<ExitAttempt> {
    payload.downcast_ref::<ExitAttempt>().copied()
}

/// Keep intercepted exit attempts from printing a panic message.
///
/// Every other panic is forwarded to the hook that was installed before.
pub fn quiet_exit_attempts() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if info.payload().downcast_ref::<ExitAttempt>().is_none() {
            previous(info);
        }
    }));
}
