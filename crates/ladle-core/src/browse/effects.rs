//! Browse effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer itself never
//! fetches. Cancellation follows the same split: the reducer decides when a
//! fetch is superseded and emits `CancelFetch`, the runtime calls
//! `token.cancel()`.

use tokio_util::sync::CancellationToken;

use super::route::Route;
use super::task::TaskId;

/// The list request reconciliation decided on, matching the current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRequest {
    /// `GET /recipes/all` with fixed page size and name-ascending sort.
    Page { page: u32, elements: u32 },
    /// `GET /recipes/contains/{query}`, unbounded.
    Contains { query: String },
}

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum BrowseEffect {
    /// Apply the new location. Emitted before the fetch for the same
    /// transition, so the address bar reflects intent even if the fetch
    /// fails.
    UpdateRoute { route: Route },

    /// Cancel a superseded in-flight fetch.
    CancelFetch { token: CancellationToken },

    /// Fetch the recipe list for the current mode.
    FetchRecipes {
        task: TaskId,
        request: ListRequest,
        cancel: CancellationToken,
    },

    /// Fetch the favorites overlay (requires a session).
    FetchFavorites {
        task: TaskId,
        cancel: CancellationToken,
    },
}
