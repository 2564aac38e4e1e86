//! Structured join of spawned traversal tasks.
//!
//! A `TaskGroup` owns the handles of the tasks spawned under one parent and
//! lets the parent wait for all of them before it completes itself, giving
//! the walk its bottom-up join semantics.

use log::error;
use std::future::Future;
use tokio::task::JoinHandle;

/// A set of spawned tasks joined as a unit.
#[derive(Debug, Default)]
pub struct TaskGroup {
    handles: Vec<JoinHandle<()>>,
}

impl TaskGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a child task onto the runtime and tracks its handle.
    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handles.push(tokio::spawn(future));
    }

    /// The number of tasks spawned into this group so far.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Waits for every spawned task to complete.
    ///
    /// A panicked child is logged and does not tear down its siblings or the
    /// parent; listing failures are already handled inside the tasks and are
    /// never escalated through the group.
    pub async fn join_all(self) {
        for handle in self.handles {
            if let Err(err) = handle.await {
                if err.is_panic() {
                    error!("traversal task panicked: {err}");
                }
            }
        }
    }
}
