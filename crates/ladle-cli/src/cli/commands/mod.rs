//! Command handlers.

pub mod auth;
pub mod create;
pub mod recipes;

use std::sync::Arc;

use anyhow::{Context, Result};
use ladle_core::api::ApiClient;
use ladle_core::auth::{CredentialStore, SessionService};
use ladle_core::config::Config;

/// Builds the API client and a session service with restore already run.
pub async fn bootstrap_session(config: &Config) -> Result<(Arc<ApiClient>, SessionService)> {
    let client = Arc::new(ApiClient::new(config).context("build API client")?);
    let mut session = SessionService::new(Arc::clone(&client), CredentialStore::new());
    session.restore().await;
    Ok((client, session))
}
