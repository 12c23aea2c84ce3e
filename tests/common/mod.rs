use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use leadbell::config::ApiConfig;
use leadbell::notifications::{NotificationApi, NotificationFeed};
use leadbell::session::{SessionStore, User};

#[allow(dead_code)]
pub fn notification_json(id: i64, is_read: bool) -> Value {
    json!({
        "id": id,
        "type": "deal_won",
        "title": format!("Deal #{} won", id),
        "message": "Congratulations",
        "entity_type": "deal",
        "entity_id": id,
        "is_read": is_read,
        "created_at": "2026-08-01T12:00:00Z"
    })
}

#[allow(dead_code)]
pub fn page_json(results: Vec<Value>) -> Value {
    json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results
    })
}

/// Feed wired to the given mock server base URL, with a logged-in session.
#[allow(dead_code)]
pub fn feed_against(base_url: &str) -> NotificationFeed {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        page_size: 20,
    };
    let store = Arc::new(SessionStore::in_memory());
    store.set_auth(User::new(1, "a@b.com"), "t1", None);
    let api = NotificationApi::new(&config, store).expect("failed to create api");
    NotificationFeed::new(Arc::new(api))
}

#[allow(dead_code)]
pub fn temp_session_store() -> (Arc<SessionStore>, TempDir) {
    let dir = TempDir::new().expect("failed to create tempdir");
    let store = SessionStore::open_at(dir.path().join("session.json"))
        .expect("failed to create session store");
    (Arc::new(store), dir)
}

/// Wait until the mock server has seen `n` requests matching `predicate`,
/// or panic after a couple of seconds. Used for fire-and-forget calls
/// whose completion the caller does not await.
#[allow(dead_code)]
pub async fn wait_for_requests<F>(server: &wiremock::MockServer, n: usize, predicate: F)
where
    F: Fn(&wiremock::Request) -> bool,
{
    for _ in 0..100 {
        let matched = server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| predicate(r))
            .count();
        if matched >= n {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("expected {} matching requests, none arrived in time", n);
}
