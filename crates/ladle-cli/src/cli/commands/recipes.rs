//! Recipe catalog browsing.

use anyhow::Result;
use comfy_table::{ContentArrangement, Table};
use ladle_core::browse::{BrowseEvent, BrowseState};
use ladle_core::config::Config;

use super::bootstrap_session;
use crate::runtime::BrowseRuntime;

pub async fn run(config: &Config, page: u32, search: Option<String>) -> Result<()> {
    let (client, session) = bootstrap_session(config).await?;
    let mut runtime = BrowseRuntime::new(client, session.token().map(String::from));

    if session.is_authenticated() {
        runtime.dispatch(BrowseEvent::SessionChanged {
            authenticated: true,
        });
    }

    match search {
        Some(query) => {
            runtime.dispatch(BrowseEvent::InputChanged(query));
            runtime.dispatch(BrowseEvent::SearchSubmitted);
        }
        None if page > 0 => runtime.dispatch(BrowseEvent::PageRequested(page)),
        None => runtime.dispatch(BrowseEvent::Refreshed),
    }

    runtime.settle().await;

    if let Some(route) = runtime.route() {
        println!("{}", route.href());
    }
    render(runtime.state());
    Ok(())
}

fn render(state: &BrowseState) {
    if let Some(error) = &state.error {
        eprintln!("warning: {error}");
        if state.recipes.is_empty() {
            return;
        }
        // Fall through: a failed fetch keeps the previous list on screen.
    }

    if state.no_results() {
        println!(
            "No recipes found for \"{}\".",
            state.search.confirmed_query.trim()
        );
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "ID", "Name", "Type", "Diet", "Premium"]);
    for recipe in &state.recipes {
        table.add_row(vec![
            if state.is_favorite(recipe.id_recipe) {
                "★".to_string()
            } else {
                String::new()
            },
            recipe.id_recipe.to_string(),
            recipe.name.clone(),
            recipe.recipe_type.clone().unwrap_or_default(),
            recipe.diet.clone().unwrap_or_default(),
            if recipe.is_premium { "yes" } else { "" }.to_string(),
        ]);
    }
    println!("{table}");

    if !state.search.is_filtered() && state.total_pages > 1 {
        println!(
            "Page {} of {}",
            state.search.page.saturating_add(1),
            state.total_pages
        );
    }
}
