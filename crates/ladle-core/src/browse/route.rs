//! Address-bar value for the recipes view.
//!
//! The route is an explicit output of reconciliation, applied by whatever
//! owns navigation (the CLI prints it; a web shell would push it). It never
//! carries the search term: the `page` parameter is present iff the view is
//! not filtered.

use super::state::SearchState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub page: Option<u32>,
}

impl Route {
    /// Derives the route for the current search state.
    pub fn for_search(search: &SearchState) -> Self {
        Self {
            page: if search.is_filtered() {
                None
            } else {
                Some(search.page)
            },
        }
    }

    /// Renders the route as a location string.
    pub fn href(&self) -> String {
        match self.page {
            Some(page) => format!("/recipes?page={page}"),
            None => "/recipes".to_string(),
        }
    }
}
