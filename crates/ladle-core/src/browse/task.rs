//! Fetch lifecycle bookkeeping.
//!
//! Each spawned fetch gets a `TaskId` from a monotonically increasing
//! sequence plus a `CancellationToken`. The reducer records the active id
//! per fetch kind; a completion is applied only if its id is still the
//! active one (`finish_if_active`), which is what makes out-of-order
//! responses harmless.

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

/// Monotonic task id generator.
#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Lifecycle state of one fetch kind (mutated only by the reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Records a newly spawned fetch as the active one.
    pub fn start(&mut self, id: TaskId, cancel: CancellationToken) {
        self.active = Some(id);
        self.cancel = Some(cancel);
    }

    /// Clears the state if `id` is the active task. Returns whether it was,
    /// i.e. whether the caller should apply the completion.
    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }

    /// Takes the cancellation token of the running task, if any.
    pub fn take_cancel(&mut self) -> Option<CancellationToken> {
        self.active = None;
        self.cancel.take()
    }
}

/// Task state per fetch kind. List and favorites fetches are independent and
/// may be in flight concurrently.
#[derive(Debug, Default, Clone)]
pub struct BrowseTasks {
    pub list: TaskState,
    pub favorites: TaskState,
}
