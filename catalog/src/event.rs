//! Event registry contract.

use crate::CatalogError;
use podium_types::{BadgeId, EventId};
use serde::{Deserialize, Serialize};

/// An event, owned by the registry and referenced read-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    /// Badges assignable at this event.
    pub badges: Vec<BadgeId>,
}

impl EventRecord {
    /// Whether the given badge may be claimed at this event.
    pub fn assigns(&self, badge: &BadgeId) -> bool {
        self.badges.contains(badge)
    }
}

/// Lookup interface over the event registry.
pub trait EventRegistry: Send + Sync {
    /// Fetch an event record by id.
    fn event(&self, id: &EventId) -> Result<EventRecord, CatalogError>;

    /// All events whose assignable set references the badge.
    ///
    /// Used by the badge-deletion safety check.
    fn events_assigning_badge(&self, badge: &BadgeId) -> Result<Vec<EventId>, CatalogError>;
}
