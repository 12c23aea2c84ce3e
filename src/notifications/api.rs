//! Typed HTTP facade over the notification endpoints
//!
//! One thin method per backend route. The facade reads the bearer token
//! from the injected [`SessionStore`] on every request, maps status codes
//! to typed errors, and stays policy-free: deciding which failures are
//! user-visible is the feed's job, not this layer's.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::{LeadbellError, Result};
use crate::notifications::types::{NotificationPage, UnreadCount};
use crate::session::SessionStore;

/// Client for the backend notification API.
pub struct NotificationApi {
    client: Client,
    base_url: String,
    page_size: u32,
    session: Arc<SessionStore>,
}

impl NotificationApi {
    /// Create a new API facade.
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
            page_size: config.page_size,
            session,
        })
    }

    /// Attach the current bearer token, when one is present.
    ///
    /// Requests without a token go out unauthenticated and let the server
    /// answer 401; staleness is only ever detected server-side.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Map a non-success status to a typed error.
    async fn check(response: Response, what: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("{} rejected as unauthenticated", what);
            return Err(LeadbellError::Authentication(format!(
                "{} rejected: {}",
                what, body
            ))
            .into());
        }

        tracing::warn!(status = %status, "{} failed", what);
        Err(LeadbellError::Api(format!("{} returned {}: {}", what, status, body)).into())
    }

    /// Fetch the most recent page of notifications, newest first.
    pub async fn list_page(&self) -> Result<NotificationPage> {
        let url = format!("{}/notifications", self.base_url);
        tracing::debug!(page_size = self.page_size, "Fetching notification page");

        let response = self
            .authorize(self.client.get(&url))
            .query(&[
                ("page_size", self.page_size.to_string()),
                ("ordering", "-created_at".to_string()),
            ])
            .send()
            .await?;
        let response = Self::check(response, "notification list").await?;

        let page: NotificationPage = response.json().await.map_err(|e| {
            LeadbellError::Api(format!("Failed to parse notification page: {}", e))
        })?;
        Ok(page)
    }

    /// Fetch the authoritative unread count.
    ///
    /// This is the only source of truth for the badge; the visible page is
    /// never counted in its place.
    pub async fn unread_count(&self) -> Result<u64> {
        let url = format!("{}/notifications/unread-count", self.base_url);
        tracing::debug!("Fetching unread count");

        let response = self.authorize(self.client.get(&url)).send().await?;
        let response = Self::check(response, "unread count").await?;

        let count: UnreadCount = response
            .json()
            .await
            .map_err(|e| LeadbellError::Api(format!("Failed to parse unread count: {}", e)))?;
        Ok(count.count)
    }

    /// Mark a single notification as read.
    pub async fn mark_read(&self, id: i64) -> Result<()> {
        let url = format!("{}/notifications/{}/read", self.base_url, id);
        tracing::debug!(id, "Marking notification read");

        let response = self.authorize(self.client.post(&url)).send().await?;
        Self::check(response, "mark-read").await?;
        Ok(())
    }

    /// Mark every unread notification read for the current user scope.
    pub async fn mark_all_read(&self) -> Result<()> {
        let url = format!("{}/notifications/mark-all-read", self.base_url);
        tracing::debug!("Marking all notifications read");

        let response = self.authorize(self.client.post(&url)).send().await?;
        Self::check(response, "mark-all-read").await?;
        Ok(())
    }
}
