//! Notification command handlers: list, unread, read actions, watch.

use colored::Colorize;
use prettytable::{cell, row, Table};
use std::sync::Arc;
use std::time::Duration;

use crate::commands::open_store;
use crate::config::Config;
use crate::error::Result;
use crate::notifications::{resolve_route, FeedSnapshot, NotificationApi, NotificationFeed};

fn build_api(config: &Config, page_size: Option<u32>) -> Result<Arc<NotificationApi>> {
    let mut api_config = config.api.clone();
    if let Some(page_size) = page_size {
        api_config.page_size = page_size;
    }
    let store = open_store(config)?;
    Ok(Arc::new(NotificationApi::new(&api_config, store)?))
}

fn render_feed(snapshot: &FeedSnapshot) {
    if snapshot.notifications.is_empty() {
        println!("No notifications");
        return;
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "Type", "Title", "Message", "Created", "Route", "Status"]);

    for n in &snapshot.notifications {
        let status = if n.is_read {
            "read".normal()
        } else {
            "unread".yellow().bold()
        };
        table.add_row(row![
            n.id,
            n.kind,
            n.title,
            n.message,
            n.created_at.format("%Y-%m-%d %H:%M"),
            resolve_route(n).unwrap_or_else(|| "-".to_string()),
            status
        ]);
    }

    table.printstd();
    println!("\nUnread: {}", snapshot.unread_count);
}

/// Fetch and display the most recent page of notifications.
pub async fn list(config: &Config, page_size: Option<u32>) -> Result<()> {
    let feed = NotificationFeed::new(build_api(config, page_size)?);
    feed.refresh().await?;
    render_feed(&feed.snapshot());
    Ok(())
}

/// Show the authoritative unread count.
pub async fn unread(config: &Config) -> Result<()> {
    let api = build_api(config, None)?;
    let count = api.unread_count().await?;
    println!("{}", count);
    Ok(())
}

/// Mark one notification read.
pub async fn mark_read(config: &Config, id: i64) -> Result<()> {
    let api = build_api(config, None)?;
    api.mark_read(id).await?;
    println!("Notification {} marked read", id);
    Ok(())
}

/// Mark every notification read.
pub async fn mark_all_read(config: &Config) -> Result<()> {
    let api = build_api(config, None)?;
    api.mark_all_read().await?;
    println!("All notifications marked read");
    Ok(())
}

/// Poll the feed on an interval until Ctrl-C.
///
/// Refresh failures inside the loop are logged by the feed and leave the
/// last known contents on screen; only startup errors are fatal.
pub async fn watch(config: &Config, interval_override: Option<u64>) -> Result<()> {
    let interval = Duration::from_secs(
        interval_override.unwrap_or(config.feed.poll_interval_seconds).max(1),
    );

    let feed = NotificationFeed::new(build_api(config, None)?);
    let mut poller = feed.start_polling(interval)?;

    println!(
        "Watching notifications every {}s (Ctrl-C to stop)",
        interval.as_secs()
    );

    let mut last_unread: Option<u64> = None;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(Duration::from_secs(1)) => {
                let unread = feed.unread_count();
                if last_unread != Some(unread) {
                    render_feed(&feed.snapshot());
                    last_unread = Some(unread);
                }
            }
        }
    }

    poller.stop().await;
    println!("Stopped");
    Ok(())
}
