//! Dual-mode recipe browsing state machine.
//!
//! The reducer in `update` is the single place browsing state changes. It
//! never performs I/O: it returns `BrowseEffect` values (route updates,
//! fetches, cancellations) that a runtime executes, posting completion
//! events back in. Each fetch carries a `TaskId`; completions for anything
//! but the active id are discarded, so a slow response for an old page can
//! never overwrite a newer one.

mod effects;
mod route;
mod state;
mod task;
mod update;

pub use effects::{BrowseEffect, ListRequest};
pub use route::Route;
pub use state::{BrowseMode, BrowseState, PAGE_SIZE, SearchState};
pub use task::{BrowseTasks, TaskId, TaskSeq, TaskState};
pub use update::{BrowseEvent, ListOutcome, update};
