//! Browsing state composition.
//!
//! ```text
//! BrowseState
//! ├── search: SearchState        (keystroke buffer, confirmed query, page)
//! ├── recipes / total_pages      (the current list view)
//! ├── error                      (view-level error banner, main list only)
//! ├── favorites                  (annotation set, never filters the list)
//! └── tasks / task_seq           (fetch lifecycle, race-safety)
//! ```

use std::collections::HashSet;

use super::task::{BrowseTasks, TaskSeq};
use crate::api::Recipe;

/// Page size for the paginated catalog. Fixed: the server's contains-search
/// is not paginated, so only unfiltered mode uses it.
pub const PAGE_SIZE: u32 = 12;

/// Free-text search and pagination inputs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// Ephemeral keystroke buffer; not applied until submission.
    pub raw_input: String,
    /// Committed query. Non-empty means filtered mode.
    pub confirmed_query: String,
    pub page: u32,
}

impl SearchState {
    pub fn is_filtered(&self) -> bool {
        !self.confirmed_query.trim().is_empty()
    }

    /// Browsing mode is a pure function of search state.
    pub fn mode(&self) -> BrowseMode {
        if self.is_filtered() {
            BrowseMode::Filtered {
                query: self.confirmed_query.trim().to_string(),
            }
        } else {
            BrowseMode::Paginated { page: self.page }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseMode {
    /// One bounded page of the full catalog.
    Paginated { page: u32 },
    /// Unbounded match list for a committed query.
    Filtered { query: String },
}

/// State for the recipe list view.
#[derive(Debug, Default)]
pub struct BrowseState {
    pub search: SearchState,
    pub recipes: Vec<Recipe>,
    /// Page count reported by the server; 0 in filtered mode.
    pub total_pages: u32,
    /// Human-readable error for the main list. A failed fetch sets this but
    /// leaves the previously rendered list in place.
    pub error: Option<String>,
    /// Favorite recipe ids, used purely to annotate rendered rows.
    pub favorites: HashSet<u64>,
    pub tasks: BrowseTasks,
    pub task_seq: TaskSeq,
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a list fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.tasks.list.is_running()
    }

    /// The dedicated "no results for query Q" view: filtered, settled,
    /// error-free and empty. Distinct from empty-because-loading and
    /// empty-because-errored.
    pub fn no_results(&self) -> bool {
        self.search.is_filtered()
            && !self.is_loading()
            && self.error.is_none()
            && self.recipes.is_empty()
    }

    pub fn is_favorite(&self, recipe_id: u64) -> bool {
        self.favorites.contains(&recipe_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selection() {
        let mut search = SearchState::default();
        assert_eq!(search.mode(), BrowseMode::Paginated { page: 0 });

        search.page = 2;
        assert_eq!(search.mode(), BrowseMode::Paginated { page: 2 });

        search.confirmed_query = " chicken ".to_string();
        assert_eq!(
            search.mode(),
            BrowseMode::Filtered {
                query: "chicken".to_string()
            }
        );
    }

    #[test]
    fn test_no_results_requires_settled_filtered_empty() {
        let mut state = BrowseState::new();
        // Unfiltered and empty is just an empty catalog, not "no results".
        assert!(!state.no_results());

        state.search.confirmed_query = "unobtainium".to_string();
        assert!(state.no_results());

        state.error = Some("HTTP 500".to_string());
        assert!(!state.no_results());
    }
}
