//! Client-side session store
//!
//! Single source of truth for "who is logged in". The store holds the
//! authenticated user, the bearer token, and the user's role(s), and
//! persists the whole record as one JSON document so a restart restores
//! the last known session without a network round-trip.
//!
//! Mutations are pure state transitions: persistence failures are logged
//! and swallowed so a flaky disk can never turn a logout into an error.
//! The store performs no network calls itself.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{LeadbellError, Result};

/// Environment variable overriding the session file location.
///
/// Takes precedence over the configured path and the default data
/// directory, which makes it easy to point the binary at a test session
/// without touching the user's real one.
pub const SESSION_FILE_ENV: &str = "LEADBELL_SESSION_FILE";

/// The authenticated user's identity record.
///
/// Replaced wholesale on every update, never partially mutated. Backend
/// attributes the client does not model explicitly are retained in `extra`
/// so they survive a persist/restore round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Convenience constructor for the common id + email case.
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: None,
            extra: Map::new(),
        }
    }
}

/// A role assignment: either a single role name or an ordered list.
///
/// The backend sends both shapes depending on the organization's setup,
/// so the wire representation is untagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Role {
    Single(String),
    Many(Vec<String>),
}

impl Role {
    /// Role names in order, regardless of shape.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Role::Single(name) => vec![name.as_str()],
            Role::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// The persisted session record.
///
/// `is_authenticated` is derived, recomputed on every mutation as
/// `user.is_some() && token.is_some()`, and stored alongside the inputs so
/// the restored record is self-describing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_authenticated: bool,
}

/// Injectable session state container.
///
/// Methods take `&self`; share the store across API facades with an `Arc`.
/// Every mutation writes the serialized [`Session`] to the backing file
/// (when one is configured) under a single fixed location.
///
/// # Examples
///
/// ```
/// use leadbell::session::{SessionStore, User};
///
/// let store = SessionStore::in_memory();
/// store.set_auth(User::new(1, "a@b.com"), "t1", None);
/// assert!(store.is_authenticated());
/// store.clear_auth();
/// assert!(!store.is_authenticated());
/// ```
pub struct SessionStore {
    path: Option<PathBuf>,
    session: RwLock<Session>,
}

impl SessionStore {
    /// Open the store at the default per-user location.
    ///
    /// Honors [`SESSION_FILE_ENV`] as an override. The file does not need
    /// to exist yet; an empty session is used until the first mutation.
    ///
    /// # Errors
    ///
    /// Returns [`LeadbellError::Session`] if the data directory cannot be
    /// determined or created.
    pub fn open() -> Result<Self> {
        if let Ok(override_path) = std::env::var(SESSION_FILE_ENV) {
            return Self::open_at(override_path);
        }

        let proj_dirs = ProjectDirs::from("com", "leadbell", "leadbell")
            .ok_or_else(|| LeadbellError::Session("Could not determine data directory".into()))?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .map_err(|e| LeadbellError::Session(format!("Failed to create data directory: {}", e)))?;

        Self::open_at(data_dir.join("session.json"))
    }

    /// Open the store at an explicit path.
    ///
    /// Primarily useful for tests that want an isolated session file.
    ///
    /// # Examples
    ///
    /// ```
    /// use leadbell::session::SessionStore;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = SessionStore::open_at(dir.path().join("session.json")).unwrap();
    /// assert!(!store.is_authenticated());
    /// ```
    pub fn open_at<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LeadbellError::Session(format!("Failed to create session directory: {}", e))
            })?;
        }

        let session = Self::load_from(&path);
        Ok(Self {
            path: Some(path),
            session: RwLock::new(session),
        })
    }

    /// Create a store with no backing file.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            session: RwLock::new(Session::default()),
        }
    }

    /// Read the session file, tolerating absence and corruption.
    ///
    /// A malformed file means the last writer crashed mid-write or the
    /// format changed; starting from an empty session is always safe
    /// because the backend remains authoritative.
    fn load_from(path: &std::path::Path) -> Session {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Discarding malformed session file"
                    );
                    Session::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Session::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read session file");
                Session::default()
            }
        }
    }

    /// Write the current record to the backing file, best-effort.
    fn persist(&self, session: &Session) {
        let Some(path) = &self.path else {
            return;
        };
        match serde_json::to_string_pretty(session) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to persist session");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to serialize session"),
        }
    }

    /// Replace user, token, and role in one step and mark the session
    /// authenticated.
    ///
    /// No token format validation is performed; any string is accepted.
    pub fn set_auth(&self, user: User, token: impl Into<String>, role: Option<Role>) {
        if let Ok(mut session) = self.session.write() {
            session.user = Some(user);
            session.token = Some(token.into());
            session.role = role;
            session.is_authenticated = true;
            self.persist(&session);
        }
    }

    /// Replace the user record and recompute `is_authenticated`.
    pub fn set_user(&self, user: Option<User>) {
        if let Ok(mut session) = self.session.write() {
            session.user = user;
            session.is_authenticated = session.user.is_some() && session.token.is_some();
            self.persist(&session);
        }
    }

    /// Replace the bearer token and recompute `is_authenticated`.
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut session) = self.session.write() {
            session.token = token;
            session.is_authenticated = session.user.is_some() && session.token.is_some();
            self.persist(&session);
        }
    }

    /// Replace the role only; does not affect `is_authenticated`.
    pub fn set_role(&self, role: Option<Role>) {
        if let Ok(mut session) = self.session.write() {
            session.role = role;
            self.persist(&session);
        }
    }

    /// Reset the session to its empty state. Idempotent.
    pub fn clear_auth(&self) {
        if let Ok(mut session) = self.session.write() {
            *session = Session::default();
            self.persist(&session);
        }
    }

    /// Snapshot of the current session record.
    pub fn session(&self) -> Session {
        self.session
            .read()
            .map(|session| session.clone())
            .unwrap_or_default()
    }

    /// The current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.session
            .read()
            .map(|session| session.token.clone())
            .unwrap_or_default()
    }

    /// Whether both a user and a token are currently present.
    pub fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .map(|session| session.is_authenticated)
            .unwrap_or(false)
    }
}
