//! Recipe creation (professional accounts only).

use anyhow::{Result, bail};
use ladle_core::api::NewRecipe;
use ladle_core::auth::PROFESSIONAL_ROLE;
use ladle_core::config::Config;

use super::bootstrap_session;

#[derive(Debug, clap::Args)]
pub struct CreateArgs {
    /// Recipe name
    #[arg(long)]
    pub name: String,

    /// Preparation time, e.g. "15m"
    #[arg(long)]
    pub prep_time: String,

    /// Cooking time, e.g. "40m"
    #[arg(long)]
    pub cook_time: String,

    /// Total time, e.g. "55m"
    #[arg(long)]
    pub total_time: String,

    /// Number of servings
    #[arg(long)]
    pub servings: u32,

    /// Ingredient list, one string
    #[arg(long)]
    pub ingredients: String,

    /// Preparation steps, one string
    #[arg(long)]
    pub steps: String,

    /// Recipe type, e.g. "main", "dessert"
    #[arg(long = "type")]
    pub recipe_type: String,

    /// Diet label, e.g. "vegetarian"
    #[arg(long)]
    pub diet: String,

    /// Mark the recipe as premium content
    #[arg(long)]
    pub premium: bool,
}

pub async fn run(config: &Config, args: CreateArgs) -> Result<()> {
    let (client, session) = bootstrap_session(config).await?;

    let Some(token) = session.token() else {
        bail!("Not logged in. Run `ladle login <TOKEN>` first.");
    };
    if !session.has_role(PROFESSIONAL_ROLE) {
        bail!("Creating recipes requires a professional account.");
    }

    let payload = NewRecipe {
        name: args.name,
        prep_time: args.prep_time,
        cook_time: args.cook_time,
        total_time: args.total_time,
        servings: args.servings,
        ingredients: args.ingredients,
        steps: args.steps,
        recipe_type: args.recipe_type,
        diet: args.diet,
        is_premium: args.premium,
    };

    let created = client.create_recipe(token, &payload).await?;
    println!("Created recipe {}.", created.id_recipe);
    Ok(())
}
