//! Authentication client
//!
//! Thin layer over the session store and the accounts endpoint. Local
//! session invalidation is authoritative: logout always clears the store,
//! whatever the backend says.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::{LeadbellError, Result};
use crate::session::{Role, SessionStore, User};

/// Client for login/logout against the accounts endpoints.
pub struct AuthClient {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl AuthClient {
    /// Create a new auth client sharing the given session store.
    ///
    /// # Errors
    ///
    /// Returns [`LeadbellError::Api`] if HTTP client initialization fails.
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("leadbell/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LeadbellError::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Record a successful login in the session store.
    ///
    /// Token format is not validated; the backend is the only judge of a
    /// credential's worth.
    pub fn login(&self, user: User, token: impl Into<String>, role: Option<Role>) {
        let email = user.email.clone();
        self.session.set_auth(user, token, role);
        tracing::info!(email = %email, "Logged in");
    }

    /// Invalidate the session server-side, then clear it locally.
    ///
    /// The local clear happens unconditionally. A backend failure is
    /// returned so the caller can show a transient notice, but by that
    /// point the user is already logged out from this client's point of
    /// view.
    ///
    /// # Errors
    ///
    /// Returns the underlying API error when the backend call fails.
    pub async fn logout(&self) -> Result<()> {
        let outcome = self.send_logout().await;
        self.session.clear_auth();

        match outcome {
            Ok(()) => {
                tracing::info!("Logged out");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Backend logout failed; local session cleared anyway");
                Err(e)
            }
        }
    }

    async fn send_logout(&self) -> Result<()> {
        let url = format!("{}/accounts/logout", self.base_url);
        let request = match self.session.token() {
            Some(token) => self.client.post(&url).bearer_auth(token),
            None => self.client.post(&url),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LeadbellError::Api(format!("logout returned {}: {}", status, body)).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_logout_clears_session_even_when_backend_unreachable() {
        let session = Arc::new(SessionStore::in_memory());
        session.set_auth(User::new(1, "a@b.com"), "t1", None);

        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 1,
            ..Default::default()
        };
        let auth = AuthClient::new(&config, session.clone()).unwrap();

        let result = auth.logout().await;
        assert!(result.is_err());
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_login_records_identity() {
        let session = Arc::new(SessionStore::in_memory());
        let auth = AuthClient::new(&ApiConfig::default(), session.clone()).unwrap();

        auth.login(
            User::new(1, "a@b.com"),
            "t1",
            Some(Role::Single("admin".into())),
        );

        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("t1"));
    }
}
