//! Leadbell - CRM session and notification client library
//!
//! This library provides the client-side state subsystems of the Leadbell
//! CRM: the persisted login session and the polled notification feed.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: persisted session store (user, token, role)
//! - `auth`: login/logout against the accounts endpoints
//! - `notifications`: wire types, REST facade, cached feed, route lookup
//! - `poller`: cancellable repeating task driving scheduled refreshes
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use leadbell::config::Config;
//! use leadbell::notifications::{NotificationApi, NotificationFeed};
//! use leadbell::session::SessionStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("leadbell.yaml")?;
//!     config.validate()?;
//!
//!     let store = Arc::new(SessionStore::open()?);
//!     let api = Arc::new(NotificationApi::new(&config.api, store)?);
//!     let feed = NotificationFeed::new(api);
//!     feed.refresh().await?;
//!     println!("{} unread", feed.unread_count());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod notifications;
pub mod poller;
pub mod session;

// Re-export commonly used types
pub use auth::AuthClient;
pub use config::Config;
pub use error::{LeadbellError, Result};
pub use notifications::{
    resolve_route, Notification, NotificationApi, NotificationFeed, NotificationKind,
};
pub use session::{Role, Session, SessionStore, User};
