//! Work deferred until in-flight interactions settle.
//!
//! Heavy work triggered from a press (a color change restyles the whole
//! selection) should not compete with the press-release animation. The host
//! owns an [`InteractionQueue`], hands clones to components, and calls
//! [`InteractionQueue::settle`] once its animations are done.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Task = Box<dyn FnOnce() + Send>;

/// FIFO of tasks waiting for the UI to go idle.
#[derive(Clone, Default)]
pub struct InteractionQueue {
    tasks: Arc<Mutex<VecDeque<Task>>>,
}

impl std::fmt::Debug for InteractionQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionQueue")
            .field("pending", &self.pending())
            .finish()
    }
}

impl InteractionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Task>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue `task` to run on the next [`settle`](Self::settle).
    ///
    /// Once queued a task cannot be taken back; tasks that may outlive their
    /// owner should go through [`run_while_alive`](Self::run_while_alive).
    pub fn run_after_interactions(&self, task: impl FnOnce() + Send + 'static) {
        self.lock().push_back(Box::new(task));
    }

    /// Queue `task`, but skip it if `guard` has been dropped by the time the
    /// queue settles.
    pub fn run_while_alive<T>(&self, guard: &Arc<T>, task: impl FnOnce() + Send + 'static)
    where
        T: Send + Sync + 'static,
    {
        let guard: Weak<T> = Arc::downgrade(guard);
        self.run_after_interactions(move || {
            if guard.upgrade().is_some() {
                task();
            } else {
                tracing::trace!("skipping deferred task, owner is gone");
            }
        });
    }

    /// Run every task queued before this call, in order.
    ///
    /// Tasks queued while settling wait for the next call. Returns how many
    /// tasks ran.
    pub fn settle(&self) -> usize {
        let batch: Vec<Task> = self.lock().drain(..).collect();
        let ran = batch.len();
        for task in batch {
            task();
        }
        ran
    }

    pub fn pending(&self) -> usize {
        self.lock().len()
    }
}
