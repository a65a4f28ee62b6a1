//! HTTP client for the remote recipe API.

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use types::{CreatedRecipe, NewRecipe, RawProfile, Recipe, RecipePage};
