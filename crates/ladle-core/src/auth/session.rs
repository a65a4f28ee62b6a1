//! Session lifecycle state machine.
//!
//! One `SessionService` is constructed at application start and injected into
//! whatever needs the authentication signal. States:
//!
//! ```text
//! Anonymous -> Restoring -> Authenticated   (startup restore, login)
//! Authenticated -> Anonymous                (logout, restore failure)
//! ```

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};

use super::credentials::CredentialStore;
use super::roles::normalize_roles;
use crate::api::{ApiClient, ApiResult, RawProfile};

/// The authenticated user's profile with canonical roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
    pub firstname: String,
    pub surname: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    /// Always flat canonical `ROLE_*` strings, never raw upstream objects.
    pub roles: Vec<String>,
}

impl CurrentUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

impl From<RawProfile> for CurrentUser {
    fn from(raw: RawProfile) -> Self {
        let roles = normalize_roles(&raw.roles);
        Self {
            username: raw.username,
            firstname: raw.firstname,
            surname: raw.surname,
            email: raw.email,
            phone_number: raw.phone_number,
            address: raw.address,
            roles,
        }
    }
}

/// Session state. Holds at most one user.
#[derive(Debug, Default)]
pub enum Session {
    #[default]
    Anonymous,
    /// A stored credential is being verified against `/users/me`.
    Restoring,
    Authenticated {
        user: CurrentUser,
        token: String,
    },
}

/// Owns the credential and the session state machine.
pub struct SessionService {
    client: Arc<ApiClient>,
    store: CredentialStore,
    session: Session,
    restore_attempted: bool,
}

impl SessionService {
    pub fn new(client: Arc<ApiClient>, store: CredentialStore) -> Self {
        Self {
            client,
            store,
            session: Session::Anonymous,
            restore_attempted: false,
        }
    }

    /// Attempts a silent restore from the stored credential.
    ///
    /// Runs once per process lifetime; later calls are no-ops. Any failure
    /// (network, 401, malformed payload) discards the stored credential and
    /// leaves the session anonymous without surfacing an error — this is the
    /// self-healing path for expired tokens.
    pub async fn restore(&mut self) {
        if self.restore_attempted {
            return;
        }
        self.restore_attempted = true;

        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored credential");
                let _ = self.store.clear();
                return;
            }
        };

        self.session = Session::Restoring;
        match self.fetch_user(&token).await {
            Ok(user) => {
                tracing::debug!(username = %user.username, "session restored");
                self.session = Session::Authenticated { user, token };
            }
            Err(e) => {
                tracing::debug!(error = %e, "restore failed, discarding stored credential");
                if let Err(e) = self.store.clear() {
                    tracing::warn!(error = %e, "could not discard stored credential");
                }
                self.session = Session::Anonymous;
            }
        }
    }

    /// Logs in with an explicit token.
    ///
    /// The credential is stored before the profile fetch. If the fetch fails
    /// the error propagates, the credential stays stored, and the session
    /// reverts to whatever it was before the attempt: the caller decides
    /// whether to retry or log out. (Deliberate asymmetry with `restore`,
    /// which discards on failure.)
    pub async fn login(&mut self, token: &str) -> Result<&CurrentUser> {
        self.store.save(token).context("store credential")?;
        let previous = std::mem::replace(&mut self.session, Session::Restoring);

        match self.fetch_user(token).await {
            Ok(user) => {
                self.session = Session::Authenticated {
                    user,
                    token: token.to_string(),
                };
                match &self.session {
                    Session::Authenticated { user, .. } => Ok(user),
                    _ => unreachable!(),
                }
            }
            Err(e) => {
                self.session = previous;
                Err(anyhow!("Login failed: {e}"))
            }
        }
    }

    /// Discards the credential and clears the in-memory user.
    /// Idempotent when already anonymous.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "could not remove stored credential");
        }
        self.session = Session::Anonymous;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        match &self.session {
            Session::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    /// The active bearer token, present only when authenticated.
    pub fn token(&self) -> Option<&str> {
        match &self.session {
            Session::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.session, Session::Authenticated { .. })
    }

    /// Capability check for role-gated actions.
    /// Always false for an anonymous session; never panics.
    pub fn has_role(&self, role: &str) -> bool {
        self.user().is_some_and(|u| u.has_role(role))
    }

    async fn fetch_user(&self, token: &str) -> ApiResult<CurrentUser> {
        let raw = self.client.current_user(token).await?;
        Ok(CurrentUser::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{bearer_token, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn service(server: &MockServer, dir: &std::path::Path) -> SessionService {
        let client = Arc::new(
            ApiClient::with_base_url(&format!("{}/api", server.uri()), Duration::from_secs(5))
                .unwrap(),
        );
        SessionService::new(client, CredentialStore::at(dir.join("credentials.json")))
    }

    fn profile_body() -> serde_json::Value {
        serde_json::json!({
            "username": "ana",
            "firstname": "Ana",
            "surname": "García",
            "email": "ana@example.com",
            "phoneNumber": "600000000",
            "address": "Calle Mayor 1",
            "roles": ["USER", {"authority": "ROLE_PROFESSIONAL"}]
        })
    }

    #[tokio::test]
    async fn test_login_fetches_and_normalizes_profile() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .and(bearer_token("tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
            .mount(&server)
            .await;

        let mut service = service(&server, dir.path());
        let user = service.login("tok-1").await.unwrap();
        assert_eq!(user.username, "ana");
        assert_eq!(user.roles, vec!["ROLE_USER", "ROLE_PROFESSIONAL"]);
        assert!(service.is_authenticated());
        assert!(service.has_role("ROLE_PROFESSIONAL"));
        assert_eq!(service.token(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_login_failure_keeps_stored_credential() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let mut service = service(&server, dir.path());
        let err = service.login("tok-bad").await.unwrap_err();
        assert!(err.to_string().contains("Login failed"));
        assert!(!service.is_authenticated());
        // Caller decides whether to retry or discard.
        let store = CredentialStore::at(dir.path().join("credentials.json"));
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-bad"));
    }

    #[tokio::test]
    async fn test_login_failure_keeps_previous_session() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .and(bearer_token("tok-stored"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        CredentialStore::at(dir.path().join("credentials.json"))
            .save("tok-stored")
            .unwrap();

        let mut service = service(&server, dir.path());
        service.restore().await;
        assert!(service.is_authenticated());

        // A failed re-login reverts to the restored session, while the
        // credential file keeps the token the caller just tried.
        assert!(service.login("tok-bad").await.is_err());
        assert!(service.is_authenticated());
        assert_eq!(service.user().unwrap().username, "ana");
        assert_eq!(service.token(), Some("tok-stored"));
        let store = CredentialStore::at(dir.path().join("credentials.json"));
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-bad"));
    }

    #[tokio::test]
    async fn test_restore_success() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .and(bearer_token("tok-stored"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
            .mount(&server)
            .await;

        CredentialStore::at(dir.path().join("credentials.json"))
            .save("tok-stored")
            .unwrap();

        let mut service = service(&server, dir.path());
        service.restore().await;
        assert!(service.is_authenticated());
        assert_eq!(service.user().unwrap().username, "ana");
    }

    #[tokio::test]
    async fn test_restore_with_stale_token_discards_credential() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let store = CredentialStore::at(dir.path().join("credentials.json"));
        store.save("tok-expired").unwrap();

        let mut service = service(&server, dir.path());
        service.restore().await;
        assert!(matches!(service.session(), Session::Anonymous));
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_restore_with_malformed_profile_discards_credential() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let store = CredentialStore::at(dir.path().join("credentials.json"));
        store.save("tok-x").unwrap();

        let mut service = service(&server, dir.path());
        service.restore().await;
        assert!(!service.is_authenticated());
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_restore_runs_once() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
            .expect(1)
            .mount(&server)
            .await;

        CredentialStore::at(dir.path().join("credentials.json"))
            .save("tok-stored")
            .unwrap();

        let mut service = service(&server, dir.path());
        service.restore().await;
        service.restore().await;
        assert!(service.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        let mut service = service(&server, dir.path());
        service.logout();
        service.logout();
        assert!(!service.is_authenticated());
        assert!(!service.has_role("ROLE_PROFESSIONAL"));
    }
}
