//! Navigation targets for notifications
//!
//! Pure lookup from a notification's entity reference to the destination
//! path. The actual view transition belongs to whatever router hosts this
//! client; this module only computes where to go.

use crate::notifications::types::{EntityKind, Notification};

/// Resolve the destination path for a notification.
///
/// Returns `None` when the notification references no business object
/// (either half of the entity reference missing) or references a kind
/// that has no destination in the table.
///
/// # Examples
///
/// ```
/// use leadbell::notifications::{resolve_route, EntityKind, Notification, NotificationKind};
/// use chrono::Utc;
///
/// let n = Notification {
///     id: 1,
///     kind: NotificationKind::DealWon,
///     title: "Deal won".into(),
///     message: String::new(),
///     entity_type: Some(EntityKind::Deal),
///     entity_id: Some(7),
///     is_read: false,
///     created_at: Utc::now(),
/// };
/// assert_eq!(resolve_route(&n), Some("/deals/7".to_string()));
/// ```
pub fn resolve_route(notification: &Notification) -> Option<String> {
    let (kind, id) = notification.entity_ref()?;
    let base = match kind {
        EntityKind::Task => "/tasks",
        EntityKind::Deal => "/deals",
        EntityKind::Contact => "/contacts",
        EntityKind::Lead => "/leads",
        // A kind without a view resolves nowhere.
        EntityKind::Other => return None,
    };
    Some(format!("{}/{}", base, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::types::NotificationKind;
    use chrono::Utc;

    fn notification(entity_type: Option<EntityKind>, entity_id: Option<i64>) -> Notification {
        Notification {
            id: 1,
            kind: NotificationKind::System,
            title: String::new(),
            message: String::new(),
            entity_type,
            entity_id,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_each_entity_kind_has_a_destination() {
        let cases = [
            (EntityKind::Task, "/tasks/3"),
            (EntityKind::Deal, "/deals/7"),
            (EntityKind::Contact, "/contacts/11"),
            (EntityKind::Lead, "/leads/42"),
        ];
        for (kind, expected) in cases {
            let id = expected.rsplit('/').next().unwrap().parse().unwrap();
            assert_eq!(
                resolve_route(&notification(Some(kind), Some(id))).as_deref(),
                Some(expected)
            );
        }
    }

    #[test]
    fn test_no_route_without_entity_reference() {
        assert_eq!(resolve_route(&notification(None, None)), None);
    }

    #[test]
    fn test_no_route_with_partial_reference() {
        assert_eq!(resolve_route(&notification(Some(EntityKind::Deal), None)), None);
        assert_eq!(resolve_route(&notification(None, Some(7))), None);
    }

    #[test]
    fn test_no_route_for_unrecognized_entity_kind() {
        assert_eq!(
            resolve_route(&notification(Some(EntityKind::Other), Some(1))),
            None
        );
    }
}
