//! Wire types for the notification endpoints
//!
//! Mirrors of backend-authoritative records. Parsing is deliberately
//! forgiving: every non-essential field is defaulted and unknown category
//! tags degrade to [`NotificationKind::Other`], so one odd record cannot
//! take down a whole page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification categories used by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    TaskCreated,
    TaskCompleted,
    DealWon,
    DealLost,
    LeadConverted,
    System,
    /// Categories introduced server-side after this client shipped.
    #[serde(other)]
    Other,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskCreated => write!(f, "task_created"),
            Self::TaskCompleted => write!(f, "task_completed"),
            Self::DealWon => write!(f, "deal_won"),
            Self::DealLost => write!(f, "deal_lost"),
            Self::LeadConverted => write!(f, "lead_converted"),
            Self::System => write!(f, "system"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Business object kinds a notification can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Task,
    Deal,
    Contact,
    Lead,
    /// Entity kinds this client has no view for.
    #[serde(other)]
    Other,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task => write!(f, "task"),
            Self::Deal => write!(f, "deal"),
            Self::Contact => write!(f, "contact"),
            Self::Lead => write!(f, "lead"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A single notification record.
///
/// `is_read` only ever transitions false to true from this client's point
/// of view; the entity reference is either fully present or absent, which
/// [`Notification::entity_ref`] enforces for consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub entity_type: Option<EntityKind>,
    #[serde(default)]
    pub entity_id: Option<i64>,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// The referenced business object, when the reference is complete.
    ///
    /// Both halves are required; a record carrying only one of
    /// `entity_type`/`entity_id` references nothing.
    pub fn entity_ref(&self) -> Option<(EntityKind, i64)> {
        match (self.entity_type, self.entity_id) {
            (Some(kind), Some(id)) => Some((kind, id)),
            _ => None,
        }
    }
}

/// One page of the paginated notification list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationPage {
    /// Total record count across all pages, not just this one.
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<Notification>,
}

/// Response of the dedicated unread-count endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnreadCount {
    #[serde(default)]
    pub count: u64,
}
