//! Leadbell - CRM session and notification client
//!
//! Main entry point for the Leadbell CLI.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use leadbell::cli::{Cli, Commands, NotificationCommand};
use leadbell::commands;
use leadbell::config::Config;
use leadbell::session::SESSION_FILE_ENV;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // If the user supplied a session file on the CLI (or via env), mirror
    // it into LEADBELL_SESSION_FILE so the store initializer picks it up.
    if let Some(path) = &cli.session_file {
        std::env::set_var(SESSION_FILE_ENV, path);
        tracing::info!("Using session file override from CLI: {}", path.display());
    }

    // Load and validate configuration
    let config = Config::load(&cli.config)?;
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Login {
            id,
            email,
            name,
            token,
            roles,
        } => commands::session::login(&config, id, email, name, token, roles),
        Commands::Logout => commands::session::logout(&config).await,
        Commands::Whoami => commands::session::whoami(&config),
        Commands::Notifications { command } => match command {
            NotificationCommand::List { page_size } => {
                commands::notifications::list(&config, page_size).await
            }
            NotificationCommand::Unread => commands::notifications::unread(&config).await,
            NotificationCommand::MarkRead { id } => {
                commands::notifications::mark_read(&config, id).await
            }
            NotificationCommand::MarkAllRead => {
                commands::notifications::mark_all_read(&config).await
            }
            NotificationCommand::Watch { interval } => {
                commands::notifications::watch(&config, interval).await
            }
        },
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug-level
/// logging for this crate.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "leadbell=debug" } else { "leadbell=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
