//! Session command handlers: login, logout, whoami.

use crate::auth::AuthClient;
use crate::commands::open_store;
use crate::config::Config;
use crate::error::Result;
use crate::session::{Role, User};

/// Record a login session.
pub fn login(
    config: &Config,
    id: i64,
    email: String,
    name: Option<String>,
    token: String,
    roles: Vec<String>,
) -> Result<()> {
    let store = open_store(config)?;
    let auth = AuthClient::new(&config.api, store.clone())?;

    let mut user = User::new(id, email);
    user.name = name;

    let role = match roles.len() {
        0 => None,
        1 => Some(Role::Single(roles.into_iter().next().unwrap_or_default())),
        _ => Some(Role::Many(roles)),
    };

    auth.login(user, token, role);

    let session = store.session();
    let email = session.user.map(|u| u.email).unwrap_or_default();
    println!("Logged in as {}", email);
    Ok(())
}

/// Invalidate the session server-side, clear it locally either way.
pub async fn logout(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let auth = AuthClient::new(&config.api, store)?;

    match auth.logout().await {
        Ok(()) => println!("Logged out"),
        Err(e) => {
            // Local invalidation already happened; the notice is all that
            // remains of the backend failure.
            eprintln!("Warning: backend logout failed ({}); local session cleared", e);
        }
    }
    Ok(())
}

/// Print the current session.
pub fn whoami(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let session = store.session();

    if !session.is_authenticated {
        println!("Not logged in");
        return Ok(());
    }

    if let Some(user) = &session.user {
        match &user.name {
            Some(name) => println!("{} <{}> (id {})", name, user.email, user.id),
            None => println!("{} (id {})", user.email, user.id),
        }
    }
    if let Some(role) = &session.role {
        println!("Roles: {}", role.names().join(", "));
    }
    Ok(())
}
