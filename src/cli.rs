//! Command-line interface definition for Leadbell
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for session management and the notification feed.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Leadbell - CRM session and notification client
///
/// Manage the local login session and follow the notification feed of a
/// Leadbell CRM backend from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "leadbell")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "leadbell.yaml")]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the session file location
    #[arg(long, env = "LEADBELL_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Leadbell
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Record a login session for subsequent commands
    Login {
        /// User id as known to the backend
        #[arg(long)]
        id: i64,

        /// Account email address
        #[arg(long)]
        email: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Bearer token issued by the backend
        #[arg(long, env = "LEADBELL_TOKEN")]
        token: String,

        /// Role name; repeat for multiple roles
        #[arg(long = "role")]
        roles: Vec<String>,
    },

    /// Invalidate the session server-side and clear it locally
    Logout,

    /// Show the current session
    Whoami,

    /// Work with the notification feed
    Notifications {
        /// Notification subcommand
        #[command(subcommand)]
        command: NotificationCommand,
    },
}

/// Notification feed subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum NotificationCommand {
    /// Fetch and display the most recent notifications
    List {
        /// Override the configured page size
        #[arg(short, long)]
        page_size: Option<u32>,
    },

    /// Show the unread count
    Unread,

    /// Mark one notification read
    MarkRead {
        /// Notification id
        id: i64,
    },

    /// Mark every notification read
    MarkAllRead,

    /// Poll the feed on an interval until interrupted
    Watch {
        /// Override the configured poll interval (seconds)
        #[arg(short, long)]
        interval: Option<u64>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
