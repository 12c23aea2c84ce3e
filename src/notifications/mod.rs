//! Notification client: wire types, REST facade, cached feed, and route
//! resolution.
//!
//! The split mirrors the trust boundary: [`api`] speaks to the backend and
//! maps failures to typed errors, [`feed`] owns local state and the policy
//! for which failures the user ever sees, [`routes`] is pure lookup.

pub mod api;
pub mod feed;
pub mod routes;
pub mod types;

pub use api::NotificationApi;
pub use feed::{FeedPhase, FeedPoller, FeedSnapshot, NotificationFeed};
pub use routes::resolve_route;
pub use types::{EntityKind, Notification, NotificationKind, NotificationPage, UnreadCount};
