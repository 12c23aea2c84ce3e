/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `session`       - login/logout/whoami against the shared session store
- `notifications` - feed listing, read actions, and watch mode

These handlers are intentionally small and use the library components:
the session store, the auth client, and the notification feed.
*/

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::session::SessionStore;

pub mod notifications;
pub mod session;

/// Open the shared session store for a command invocation.
///
/// The `LEADBELL_SESSION_FILE` environment variable wins over the
/// configured path, which in turn wins over the default data directory.
pub(crate) fn open_store(config: &Config) -> Result<Arc<SessionStore>> {
    let store = match &config.storage.session_file {
        Some(path) if std::env::var(crate::session::SESSION_FILE_ENV).is_err() => {
            SessionStore::open_at(path)?
        }
        _ => SessionStore::open()?,
    };
    Ok(Arc::new(store))
}
