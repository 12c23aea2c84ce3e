//! Repeating background task with an explicit owner
//!
//! A poller is deliberately not ambient: [`spawn_poller`] returns a
//! [`PollHandle`] and the caller is responsible for cancellation, so no
//! background work can outlive the view that scheduled it. Cancellation
//! races the in-flight action, which means an action still running when
//! the handle stops is dropped at its next await point instead of being
//! allowed to complete and mutate disposed state.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Handle to a running poller task.
///
/// Dropping the handle cancels and aborts the task as a leak guard;
/// [`PollHandle::stop`] is the graceful path that also waits for the task
/// to wind down.
pub struct PollHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Cancel the task and wait for it to finish.
    ///
    /// Safe to call more than once; later calls are no-ops.
    pub async fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::warn!(error = %e, "Poller task ended abnormally");
                }
            }
        }
    }

    /// Whether the task has already exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map(JoinHandle::is_finished).unwrap_or(true)
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

/// Spawn a task that runs `action` immediately and then once per
/// `interval` until the returned handle is stopped or dropped.
///
/// Ticks missed while an action runs long are skipped, not bursted, so a
/// slow backend cannot queue up a backlog of refreshes.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use leadbell::poller::spawn_poller;
///
/// # async fn example() {
/// let mut handle = spawn_poller(Duration::from_secs(30), || async {
///     tracing::debug!("tick");
/// });
/// handle.stop().await;
/// # }
/// ```
pub fn spawn_poller<F, Fut>(interval: Duration, mut action: F) -> PollHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    tokio::select! {
                        _ = token.cancelled() => break,
                        _ = action() => {}
                    }
                }
            }
        }
        tracing::debug!("Poller stopped");
    });

    PollHandle {
        cancel,
        task: Some(task),
    }
}
