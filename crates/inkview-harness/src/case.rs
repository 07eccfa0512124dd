//! The test-case contract.
//!
//! One shape for every scenario: the body takes a [`CaseCx`] and returns a
//! boxed local future. Synchronous scenarios go through [`TestCase::sync`],
//! which wraps them in an already-ready future, so the runner never branches
//! on calling convention.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use inkview_dom::Settled;

use crate::check::Failure;
use crate::env::ViewerEnv;

type CaseBody = Box<dyn FnOnce(CaseCx) -> LocalBoxFuture<'static, Result<(), Failure>>>;

/// Handle a case body uses to reach the shared environment, suspend until
/// updates settle, and signal success.
#[derive(Clone)]
pub struct CaseCx {
    env: Rc<ViewerEnv>,
    passed: Rc<Cell<bool>>,
}

impl CaseCx {
    pub(crate) fn new(env: Rc<ViewerEnv>) -> Self {
        Self {
            env,
            passed: Rc::new(Cell::new(false)),
        }
    }

    pub(crate) fn passed_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.passed)
    }

    /// Shared viewer environment for this run.
    #[must_use]
    pub fn env(&self) -> &Rc<ViewerEnv> {
        &self.env
    }

    /// Suspend until all updates queued before this call are applied.
    #[must_use]
    pub fn settle(&self) -> Settled {
        self.env.scheduler.settle()
    }

    /// Signal explicit success. A case that completes without calling this
    /// is reported as failed, even if every check passed along the way.
    pub fn pass(&self) {
        self.passed.set(true);
    }
}

/// A named, run-once scenario.
pub struct TestCase {
    name: String,
    body: CaseBody,
}

impl TestCase {
    /// Register a suspending scenario.
    pub fn new<F, Fut>(name: impl Into<String>, body: F) -> Self
    where
        F: FnOnce(CaseCx) -> Fut + 'static,
        Fut: Future<Output = Result<(), Failure>> + 'static,
    {
        Self {
            name: name.into(),
            body: Box::new(move |cx| body(cx).boxed_local()),
        }
    }

    /// Register a synchronous scenario; it gets a pre-resolved suspension
    /// handle under the same contract.
    pub fn sync<F>(name: impl Into<String>, body: F) -> Self
    where
        F: FnOnce(CaseCx) -> Result<(), Failure> + 'static,
    {
        Self::new(name, move |cx| futures::future::ready(body(cx)))
    }

    /// Case name, unique within a run.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_parts(self) -> (String, CaseBody) {
        (self.name, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::task::{Context, Poll};

    #[test]
    fn sync_cases_resolve_on_first_poll() {
        let env = ViewerEnv::new();
        let case = TestCase::sync("trivial", |cx| {
            cx.pass();
            Ok(())
        });
        let (_, body) = case.into_parts();
        let cx = CaseCx::new(env);
        let flag = cx.passed_flag();

        let mut future = body(cx);
        let waker = futures::task::noop_waker();
        let mut poll_cx = Context::from_waker(&waker);
        assert_eq!(future.as_mut().poll(&mut poll_cx), Poll::Ready(Ok(())));
        assert!(flag.get());
    }
}
