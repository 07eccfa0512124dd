//! Serial case execution with per-case failure isolation.
//!
//! The runner is the only executor: each case future is polled with a no-op
//! waker, and between polls the runner drains one batch from the shared
//! update scheduler. That loop is what makes `settle().await` deterministic —
//! a settle captured before a mutation's task runs cannot resolve until the
//! batch containing that task has been applied.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;
use std::task::{Context, Poll};

use crate::case::{CaseCx, TestCase};
use crate::check::Failure;
use crate::env::ViewerEnv;
use crate::report::{CaseResult, RunReport};

/// Consecutive fruitless polls (pending case, empty queue) before a case is
/// declared stalled.
const DEFAULT_STALL_LIMIT: u32 = 64;

/// External collector the runner reports each finished case to.
pub trait ResultSink {
    /// Called once per case, in execution order.
    fn case_finished(&mut self, result: &CaseResult);
}

/// Sink that keeps every result; useful default for programmatic runs.
#[derive(Default)]
pub struct CollectSink {
    results: Vec<CaseResult>,
}

impl CollectSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Results collected so far, in execution order.
    #[must_use]
    pub fn results(&self) -> &[CaseResult] {
        &self.results
    }
}

impl ResultSink for CollectSink {
    fn case_finished(&mut self, result: &CaseResult) {
        self.results.push(result.clone());
    }
}

/// Executes cases serially against one shared environment.
pub struct Runner {
    env: Rc<ViewerEnv>,
    stall_limit: u32,
}

impl Runner {
    /// Create a runner over the shared environment.
    #[must_use]
    pub fn new(env: Rc<ViewerEnv>) -> Self {
        Self {
            env,
            stall_limit: DEFAULT_STALL_LIMIT,
        }
    }

    /// Override the stall limit (polls tolerated with nothing to drain).
    #[must_use]
    pub fn with_stall_limit(mut self, stall_limit: u32) -> Self {
        self.stall_limit = stall_limit;
        self
    }

    /// Shared environment the cases run against.
    #[must_use]
    pub fn env(&self) -> &Rc<ViewerEnv> {
        &self.env
    }

    /// Run all cases in order. A failing case never prevents later cases
    /// from running; every outcome is reported to the sink as it happens.
    pub fn run(&self, cases: Vec<TestCase>, sink: &mut dyn ResultSink) -> RunReport {
        let mut results = Vec::with_capacity(cases.len());
        for case in cases {
            let result = self.run_case(case);
            sink.case_finished(&result);
            results.push(result);
        }
        RunReport::from_results(results)
    }

    fn run_case(&self, case: TestCase) -> CaseResult {
        let (name, body) = case.into_parts();
        let cx = CaseCx::new(Rc::clone(&self.env));
        let passed = cx.passed_flag();

        let mut future = match catch_unwind(AssertUnwindSafe(|| body(cx))) {
            Ok(future) => future,
            Err(payload) => {
                return CaseResult::errored(name, panic_message(payload.as_ref()));
            }
        };

        let waker = futures::task::noop_waker();
        let mut poll_cx = Context::from_waker(&waker);
        let mut idle_polls = 0;
        loop {
            let poll = catch_unwind(AssertUnwindSafe(|| future.as_mut().poll(&mut poll_cx)));
            match poll {
                Err(payload) => {
                    return CaseResult::errored(name, panic_message(payload.as_ref()));
                }
                Ok(Poll::Ready(Ok(()))) => {
                    return if passed.get() {
                        CaseResult::passed(name)
                    } else {
                        CaseResult::failed(name, "completed without signaling success")
                    };
                }
                Ok(Poll::Ready(Err(Failure::Assertion { message }))) => {
                    return CaseResult::failed(name, message);
                }
                Ok(Poll::Ready(Err(Failure::Errored { message }))) => {
                    return CaseResult::errored(name, message);
                }
                Ok(Poll::Pending) => {
                    if self.env.scheduler.drain_batch() == 0 {
                        idle_polls += 1;
                        if idle_polls >= self.stall_limit {
                            return CaseResult::errored(
                                name,
                                "stalled: case is suspended but no updates are queued",
                            );
                        }
                    } else {
                        idle_polls = 0;
                    }
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        format!("panic: {text}")
    } else if let Some(text) = payload.downcast_ref::<String>() {
        format!("panic: {text}")
    } else {
        "panic with non-string payload".to_owned()
    }
}
