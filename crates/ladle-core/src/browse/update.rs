//! Browse reducer.
//!
//! All browsing state mutations happen here. The runtime calls
//! `update(state, event)` and executes the returned effects; fetch
//! completions come back as events carrying the `TaskId` of the fetch they
//! belong to.

use tokio_util::sync::CancellationToken;

use super::effects::{BrowseEffect, ListRequest};
use super::route::Route;
use super::state::{BrowseMode, BrowseState, PAGE_SIZE};
use super::task::TaskId;
use crate::api::{ApiError, Recipe, RecipePage};

/// Successful list fetch payload, shaped by the mode it was issued for.
#[derive(Debug)]
pub enum ListOutcome {
    /// Paginated mode: bounded page with its own page count.
    Page(RecipePage),
    /// Filtered mode: the complete unbounded match list.
    Matches(Vec<Recipe>),
}

/// Events the reducer consumes.
#[derive(Debug)]
pub enum BrowseEvent {
    /// Keystroke buffer changed. Never triggers a fetch.
    InputChanged(String),
    /// The user submitted the search form: commit the buffer, go to page 0.
    SearchSubmitted,
    /// The user cleared the committed query (back to the full catalog).
    QueryCleared,
    /// The user navigated to a page.
    PageRequested(u32),
    /// Initial load (or explicit refresh) of the current state.
    Refreshed,
    /// Authentication signal from the session service.
    SessionChanged { authenticated: bool },
    /// A list fetch finished.
    ListFetched {
        task: TaskId,
        result: Result<ListOutcome, ApiError>,
    },
    /// A favorites fetch finished.
    FavoritesFetched {
        task: TaskId,
        result: Result<Vec<Recipe>, ApiError>,
    },
}

/// The main reducer function.
pub fn update(state: &mut BrowseState, event: BrowseEvent) -> Vec<BrowseEffect> {
    match event {
        BrowseEvent::InputChanged(input) => {
            state.search.raw_input = input;
            vec![]
        }

        BrowseEvent::SearchSubmitted => {
            // One-shot transition: commit, reset page, clear the buffer.
            state.search.confirmed_query = state.search.raw_input.trim().to_string();
            state.search.page = 0;
            state.search.raw_input.clear();
            reconcile(state)
        }

        BrowseEvent::QueryCleared => {
            state.search.confirmed_query.clear();
            state.search.page = 0;
            reconcile(state)
        }

        BrowseEvent::PageRequested(page) => {
            // Pagination controls are suppressed in filtered mode; a page
            // event arriving there is stale UI.
            if state.search.is_filtered() {
                return vec![];
            }
            state.search.page = page;
            reconcile(state)
        }

        BrowseEvent::Refreshed => reconcile(state),

        BrowseEvent::SessionChanged { authenticated } => {
            if authenticated {
                let mut effects = Vec::new();
                if let Some(token) = state.tasks.favorites.take_cancel() {
                    effects.push(BrowseEffect::CancelFetch { token });
                }
                let task = state.task_seq.next_id();
                let cancel = CancellationToken::new();
                state.tasks.favorites.start(task, cancel.clone());
                effects.push(BrowseEffect::FetchFavorites { task, cancel });
                effects
            } else {
                state.favorites.clear();
                match state.tasks.favorites.take_cancel() {
                    Some(token) => vec![BrowseEffect::CancelFetch { token }],
                    None => vec![],
                }
            }
        }

        BrowseEvent::ListFetched { task, result } => {
            if !state.tasks.list.finish_if_active(task) {
                // A newer fetch owns the view now; this response is stale.
                tracing::debug!(?task, "dropping stale list response");
                return vec![];
            }
            match result {
                Ok(ListOutcome::Page(page)) => {
                    state.recipes = page.content;
                    state.total_pages = page.total_pages;
                    state.error = None;
                }
                Ok(ListOutcome::Matches(matches)) => {
                    state.recipes = matches;
                    state.total_pages = 0;
                    state.error = None;
                }
                // Keep the previously rendered list; only the banner changes.
                Err(e) => state.error = Some(e.to_string()),
            }
            vec![]
        }

        BrowseEvent::FavoritesFetched { task, result } => {
            if !state.tasks.favorites.finish_if_active(task) {
                return vec![];
            }
            match result {
                Ok(favorites) => {
                    state.favorites = favorites.iter().map(|r| r.id_recipe).collect();
                }
                Err(e) => {
                    // Graceful degradation: the overlay vanishes, the main
                    // list never learns about it.
                    tracing::debug!(error = %e, "favorites fetch failed");
                    state.favorites.clear();
                }
            }
            vec![]
        }
    }
}

/// Brings the view in line with the current search state: route first, then
/// supersede any in-flight fetch and issue one for the current mode.
fn reconcile(state: &mut BrowseState) -> Vec<BrowseEffect> {
    let mut effects = vec![BrowseEffect::UpdateRoute {
        route: Route::for_search(&state.search),
    }];

    if let Some(token) = state.tasks.list.take_cancel() {
        effects.push(BrowseEffect::CancelFetch { token });
    }

    let request = match state.search.mode() {
        BrowseMode::Paginated { page } => ListRequest::Page {
            page,
            elements: PAGE_SIZE,
        },
        BrowseMode::Filtered { query } => ListRequest::Contains { query },
    };

    let task = state.task_seq.next_id();
    let cancel = CancellationToken::new();
    state.tasks.list.start(task, cancel.clone());
    state.error = None;

    effects.push(BrowseEffect::FetchRecipes {
        task,
        request,
        cancel,
    });
    effects
}
