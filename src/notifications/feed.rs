//! Locally cached notification feed
//!
//! Keeps an eventually-consistent view of the user's notifications plus
//! the unread count, refreshed on demand or on a fixed interval, with
//! optimistic local updates on read actions.
//!
//! Consistency between overlapping refreshes and local mutations is
//! resolved with a monotonic dispatch sequence: every refresh dispatch and
//! every local mutation advances it, and a completing refresh applies its
//! payload only while its initiating version is still the latest. A poll
//! that was already in flight when the user marked something read can
//! therefore never silently revert that mark.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{LeadbellError, Result};
use crate::notifications::api::NotificationApi;
use crate::notifications::types::Notification;
use crate::poller::{spawn_poller, PollHandle};

/// Lifecycle phase of the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// Nothing in flight; data (possibly empty or stale) is showable.
    Idle,
    /// A refresh is in flight; previous data remains visible.
    Loading,
    /// The last refresh completed successfully.
    Loaded,
}

/// Point-in-time copy of the feed for rendering.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub phase: FeedPhase,
    pub notifications: Vec<Notification>,
    pub unread_count: u64,
}

struct FeedInner {
    phase: FeedPhase,
    notifications: Vec<Notification>,
    unread_count: u64,
}

/// The notification feed owned by one mounted view.
///
/// Cheap to clone; clones share the same state, which is what the polling
/// task relies on.
#[derive(Clone)]
pub struct NotificationFeed {
    api: Arc<NotificationApi>,
    inner: Arc<RwLock<FeedInner>>,
    dispatch_seq: Arc<AtomicU64>,
    polling: Arc<AtomicBool>,
}

impl NotificationFeed {
    pub fn new(api: Arc<NotificationApi>) -> Self {
        Self {
            api,
            inner: Arc::new(RwLock::new(FeedInner {
                phase: FeedPhase::Idle,
                notifications: Vec::new(),
                unread_count: 0,
            })),
            dispatch_seq: Arc::new(AtomicU64::new(0)),
            polling: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Fetch the latest page and the unread count, concurrently, and swap
    /// both into the feed atomically.
    ///
    /// Both fetches must succeed for anything to change; on any failure
    /// the previous contents stay visible and the phase returns to
    /// [`FeedPhase::Idle`]. A result whose initiating version is no longer
    /// the latest dispatched is discarded whole.
    ///
    /// # Errors
    ///
    /// Propagates the underlying API error so explicit callers can react;
    /// scheduled refreshes log it and move on.
    pub async fn refresh(&self) -> Result<()> {
        let version = self.dispatch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut inner) = self.inner.write() {
            inner.phase = FeedPhase::Loading;
        }
        tracing::debug!(version, "Refreshing notification feed");

        let (page, count) = tokio::join!(self.api.list_page(), self.api.unread_count());

        match (page, count) {
            (Ok(page), Ok(count)) => {
                if let Ok(mut inner) = self.inner.write() {
                    if version == self.dispatch_seq.load(Ordering::SeqCst) {
                        inner.notifications = page.results;
                        inner.unread_count = count;
                    } else {
                        tracing::debug!(version, "Discarding refresh result superseded locally");
                    }
                    inner.phase = FeedPhase::Loaded;
                }
                Ok(())
            }
            (Err(e), _) | (Ok(_), Err(e)) => {
                if let Ok(mut inner) = self.inner.write() {
                    inner.phase = FeedPhase::Idle;
                }
                tracing::debug!(version, error = %e, "Feed refresh failed; keeping previous data");
                Err(e)
            }
        }
    }

    /// Optimistically mark one notification read and issue the server
    /// request without waiting for it.
    ///
    /// The local copy flips immediately and the unread count drops by one
    /// (only when an unread record actually flipped, floored at zero). A
    /// failed server call is logged and left for the next poll to
    /// reconcile; it is never rolled back.
    pub fn mark_read(&self, id: i64) {
        let mut flipped = false;
        if let Ok(mut inner) = self.inner.write() {
            if let Some(n) = inner.notifications.iter_mut().find(|n| n.id == id) {
                if !n.is_read {
                    n.is_read = true;
                    flipped = true;
                }
            }
            if flipped {
                inner.unread_count = inner.unread_count.saturating_sub(1);
            }
        }
        if flipped {
            // Local state moved ahead of the server; any refresh already in
            // flight no longer reflects it and must not apply.
            self.dispatch_seq.fetch_add(1, Ordering::SeqCst);
        }

        let api = self.api.clone();
        tokio::spawn(async move {
            if let Err(e) = api.mark_read(id).await {
                tracing::warn!(id, error = %e, "mark-read request failed; next poll reconciles");
            }
        });
    }

    /// Mark every notification read, waiting for server confirmation.
    ///
    /// Unlike [`mark_read`](Self::mark_read) this surfaces failure to the
    /// caller, because it backs an explicit user affordance: on error the
    /// local state is left untouched.
    pub async fn mark_all_read(&self) -> Result<()> {
        self.api.mark_all_read().await?;

        if let Ok(mut inner) = self.inner.write() {
            for n in inner.notifications.iter_mut() {
                n.is_read = true;
            }
            inner.unread_count = 0;
        }
        self.dispatch_seq.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Start the repeating refresh task.
    ///
    /// The first refresh fires immediately, then once per `interval`. The
    /// caller owns the returned [`FeedPoller`] and is responsible for
    /// stopping it; at most one poller may be active per feed.
    ///
    /// # Errors
    ///
    /// Returns [`LeadbellError::Feed`] if polling is already active.
    pub fn start_polling(&self, interval: Duration) -> Result<FeedPoller> {
        if self.polling.swap(true, Ordering::SeqCst) {
            return Err(LeadbellError::Feed("polling is already active for this feed".into()).into());
        }

        let feed = self.clone();
        let handle = spawn_poller(interval, move || {
            let feed = feed.clone();
            async move {
                if let Err(e) = feed.refresh().await {
                    tracing::warn!(error = %e, "Scheduled refresh failed; keeping previous feed");
                }
            }
        });

        Ok(FeedPoller {
            handle,
            active: self.polling.clone(),
        })
    }

    /// Copy of the current feed contents.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.inner
            .read()
            .map(|inner| FeedSnapshot {
                phase: inner.phase,
                notifications: inner.notifications.clone(),
                unread_count: inner.unread_count,
            })
            .unwrap_or_else(|_| FeedSnapshot {
                phase: FeedPhase::Idle,
                notifications: Vec::new(),
                unread_count: 0,
            })
    }

    pub fn unread_count(&self) -> u64 {
        self.inner
            .read()
            .map(|inner| inner.unread_count)
            .unwrap_or(0)
    }

    pub fn phase(&self) -> FeedPhase {
        self.inner
            .read()
            .map(|inner| inner.phase)
            .unwrap_or(FeedPhase::Idle)
    }
}

/// Handle to a running feed poller.
///
/// Stopping (or dropping) it cancels the repeating task and releases the
/// feed's polling slot, after which `start_polling` may be called again.
pub struct FeedPoller {
    handle: PollHandle,
    active: Arc<AtomicBool>,
}

impl FeedPoller {
    /// Cancel the polling task and wait for it to wind down.
    ///
    /// A refresh in flight at this moment is dropped before it can touch
    /// the feed.
    pub async fn stop(&mut self) {
        self.handle.stop().await;
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for FeedPoller {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }
}
