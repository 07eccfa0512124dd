//! Deferred-update queue with batch draining and a settle-wait future.
//!
//! Components batch property reflection as queued tasks instead of mutating
//! observable state inline. The queue is externally driven: whoever runs the
//! test (the harness runner, or a unit test) calls [`UpdateScheduler::drain_batch`]
//! between polls. [`UpdateScheduler::settle`] returns a future that resolves
//! once every task queued *before* the call has been applied; tasks enqueued
//! afterwards belong to the next settle.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct SchedulerState {
    queue: VecDeque<Task>,
    scheduled: u64,
    applied: u64,
}

/// Single-threaded deferred-update queue shared across components via `Rc`.
#[derive(Default)]
pub struct UpdateScheduler {
    state: RefCell<SchedulerState>,
}

impl UpdateScheduler {
    /// Create a new shared scheduler.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Queue a deferred update task.
    pub fn schedule(&self, task: impl FnOnce() + 'static) {
        let mut state = self.state.borrow_mut();
        state.queue.push_back(Box::new(task));
        state.scheduled += 1;
    }

    /// Number of tasks currently queued.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Apply exactly the tasks queued at the instant of this call.
    ///
    /// Tasks scheduled while the batch runs land in the next batch, so a
    /// settle target captured before this call is never satisfied by work it
    /// did not wait for. Returns the number of tasks applied.
    pub fn drain_batch(&self) -> usize {
        let batch = self.state.borrow().queue.len();
        for _ in 0..batch {
            // The borrow must not be held while the task runs: tasks may
            // schedule follow-up work.
            let task = self.state.borrow_mut().queue.pop_front();
            let Some(task) = task else { break };
            task();
            self.state.borrow_mut().applied += 1;
        }
        batch
    }

    /// Suspension handle resolving once all updates queued before this call
    /// have been applied.
    #[must_use]
    pub fn settle(self: &Rc<Self>) -> Settled {
        let target = self.state.borrow().scheduled;
        Settled {
            scheduler: Rc::clone(self),
            target,
        }
    }
}

/// Future returned by [`UpdateScheduler::settle`].
///
/// Resolves with no value; it carries no waker machinery because the driving
/// loop alternates polling with [`UpdateScheduler::drain_batch`].
pub struct Settled {
    scheduler: Rc<UpdateScheduler>,
    target: u64,
}

impl Future for Settled {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        if self.scheduler.state.borrow().applied >= self.target {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}
