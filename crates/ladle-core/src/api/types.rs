//! Wire types for the recipe API.
//!
//! Field names mirror the upstream JSON payloads (camelCase), so every type
//! carries a `rename_all` attribute. Deserialization is tolerant: optional
//! fields default rather than fail, since older catalog entries omit them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single recipe as served by the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id_recipe: u64,
    pub name: String,
    #[serde(default)]
    pub prep_time: Option<String>,
    #[serde(default)]
    pub cook_time: Option<String>,
    #[serde(default)]
    pub total_time: Option<String>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub steps: Option<String>,
    #[serde(default, rename = "type")]
    pub recipe_type: Option<String>,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
}

/// One bounded page of the full catalog (`GET /recipes/all`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePage {
    pub content: Vec<Recipe>,
    pub total_pages: u32,
}

/// Raw profile payload from `GET /users/me`.
///
/// `roles` is left as raw JSON values: upstream serializes them in several
/// shapes (bare names, authority objects, role objects) and normalization
/// happens in `auth::roles`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    pub username: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub roles: Vec<Value>,
}

/// Payload for `POST /recipes`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub name: String,
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    pub servings: u32,
    pub ingredients: String,
    pub steps: String,
    #[serde(rename = "type")]
    pub recipe_type: String,
    pub diet: String,
    pub is_premium: bool,
}

/// Response to a successful recipe creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRecipe {
    pub id_recipe: u64,
}
