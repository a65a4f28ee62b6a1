//! Request plumbing for the recipe API.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::{ApiError, ApiResult};
use super::types::{CreatedRecipe, NewRecipe, RawProfile, Recipe, RecipePage};
use crate::config::Config;

/// Fixed sort order for the paginated catalog: name ascending.
const SORT_BY: &str = "name";
const SORT_DIRECTION: &str = "ASC";

/// Recipe API client.
///
/// Cheap to clone behind an `Arc`; holds one pooled `reqwest::Client` with a
/// client-level timeout, so a stuck request fails instead of hanging.
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client from the loaded configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(&config.resolve_base_url()?, config.request_timeout())
    }

    /// Creates a client against an explicit base URL (used by tests).
    pub fn with_base_url(base_url: &str, timeout: std::time::Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid API base URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Invalid API base URL: {base_url}");
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { base_url, http })
    }

    /// `GET /users/me` — the authenticated user's profile.
    pub async fn current_user(&self, token: &str) -> ApiResult<RawProfile> {
        let url = self.join(&["users", "me"]);
        self.get_json(url, Some(token)).await
    }

    /// `GET /recipes/all` — one page of the catalog, sorted by name ascending.
    pub async fn recipe_page(&self, page: u32, elements: u32) -> ApiResult<RecipePage> {
        let mut url = self.join(&["recipes", "all"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("elements", &elements.to_string())
            .append_pair("sortBy", SORT_BY)
            .append_pair("sortDirection", SORT_DIRECTION);
        self.get_json(url, None).await
    }

    /// `GET /recipes/contains/{query}` — unbounded substring/ingredient match.
    pub async fn search_recipes(&self, query: &str) -> ApiResult<Vec<Recipe>> {
        let url = self.join(&["recipes", "contains", query]);
        self.get_json(url, None).await
    }

    /// `GET /recipes/favorites` — the authenticated user's favorite recipes.
    pub async fn favorites(&self, token: &str) -> ApiResult<Vec<Recipe>> {
        let url = self.join(&["recipes", "favorites"]);
        self.get_json(url, Some(token)).await
    }

    /// `POST /recipes` — create a recipe (requires a professional account).
    pub async fn create_recipe(&self, token: &str, recipe: &NewRecipe) -> ApiResult<CreatedRecipe> {
        let url = self.join(&["recipes"]);
        self.post_json(url, recipe, token).await
    }

    /// Joins path segments onto the base URL, percent-encoding each segment.
    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .expect("API base URL cannot be a base");
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, token: Option<&str>) -> ApiResult<T> {
        tracing::debug!(%url, "GET");
        let mut request = self.http.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        Self::read_json(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
        token: &str,
    ) -> ApiResult<T> {
        tracing::debug!(%url, "POST");
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http_status(status.as_u16(), &body));
        }
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::malformed(format!("Failed to decode response: {e}")))
    }
}
