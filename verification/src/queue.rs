//! Verification queue filtering.

use podium_types::EventId;
use serde::{Deserialize, Serialize};

/// Optional narrowing of the pending-claim queue.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimFilter {
    /// Only claims tied to this event.
    pub event: Option<EventId>,
    /// Only claims whose badge currently carries this category.
    pub category: Option<String>,
}

impl ClaimFilter {
    /// No narrowing — the whole pending queue.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_event(mut self, event: EventId) -> Self {
        self.event = Some(event);
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
