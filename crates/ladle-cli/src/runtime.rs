//! Effect executor for the browsing orchestrator.
//!
//! The reducer stays pure; this runtime spawns the fetches it asks for and
//! feeds completion events back in. Each spawned fetch races its
//! `CancellationToken`: a cancelled fetch simply never reports, which is
//! fine because the reducer already dropped it from the active set when it
//! emitted the cancellation.

use std::sync::Arc;

use ladle_core::api::ApiClient;
use ladle_core::browse::{
    BrowseEffect, BrowseEvent, BrowseState, ListOutcome, ListRequest, Route, update,
};
use tokio::sync::mpsc;

pub struct BrowseRuntime {
    client: Arc<ApiClient>,
    /// Bearer token for the favorites overlay; absent for anonymous browsing.
    token: Option<String>,
    state: BrowseState,
    route: Option<Route>,
    tx: mpsc::UnboundedSender<BrowseEvent>,
    rx: mpsc::UnboundedReceiver<BrowseEvent>,
}

impl BrowseRuntime {
    pub fn new(client: Arc<ApiClient>, token: Option<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            token,
            state: BrowseState::new(),
            route: None,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    /// The last route the reducer emitted, if any.
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Runs one event through the reducer and executes the effects.
    pub fn dispatch(&mut self, event: BrowseEvent) {
        let effects = update(&mut self.state, event);
        for effect in effects {
            self.execute(effect);
        }
    }

    /// Drains completion events until no fetch is in flight.
    pub async fn settle(&mut self) {
        while self.state.tasks.list.is_running() || self.state.tasks.favorites.is_running() {
            let Some(event) = self.rx.recv().await else {
                break;
            };
            self.dispatch(event);
        }
    }

    fn execute(&mut self, effect: BrowseEffect) {
        match effect {
            BrowseEffect::UpdateRoute { route } => {
                self.route = Some(route);
            }
            BrowseEffect::CancelFetch { token } => {
                tracing::debug!("cancelling superseded fetch");
                token.cancel();
            }
            BrowseEffect::FetchRecipes {
                task,
                request,
                cancel,
            } => {
                tracing::debug!(?task, ?request, "spawning list fetch");
                let client = Arc::clone(&self.client);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let fetch = async {
                        match request {
                            ListRequest::Page { page, elements } => client
                                .recipe_page(page, elements)
                                .await
                                .map(ListOutcome::Page),
                            ListRequest::Contains { query } => client
                                .search_recipes(&query)
                                .await
                                .map(ListOutcome::Matches),
                        }
                    };
                    tokio::select! {
                        () = cancel.cancelled() => {}
                        result = fetch => {
                            let _ = tx.send(BrowseEvent::ListFetched { task, result });
                        }
                    }
                });
            }
            BrowseEffect::FetchFavorites { task, cancel } => {
                let Some(token) = self.token.clone() else {
                    // Favorites require a session; report an empty overlay so
                    // the task still settles.
                    let _ = self.tx.send(BrowseEvent::FavoritesFetched {
                        task,
                        result: Ok(Vec::new()),
                    });
                    return;
                };
                tracing::debug!(?task, "spawning favorites fetch");
                let client = Arc::clone(&self.client);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        () = cancel.cancelled() => {}
                        result = client.favorites(&token) => {
                            let _ = tx.send(BrowseEvent::FavoritesFetched { task, result });
                        }
                    }
                });
            }
        }
    }
}
