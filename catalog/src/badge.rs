//! Badge catalog contract.

use crate::CatalogError;
use podium_types::BadgeId;
use serde::{Deserialize, Serialize};

/// A badge definition, owned by the catalog and referenced read-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    pub id: BadgeId,
    pub name: String,
    pub icon: String,
    /// Gamification points awarded with this badge. Always positive.
    pub points: u32,
    pub category: String,
    /// Inactive badges cannot be claimed or assigned.
    pub active: bool,
}

/// Lookup interface over the badge catalog.
pub trait BadgeCatalog: Send + Sync {
    /// Fetch a badge definition by id.
    fn badge(&self, id: &BadgeId) -> Result<BadgeDefinition, CatalogError>;

    /// Whether the badge exists and is currently active.
    fn is_active(&self, id: &BadgeId) -> Result<bool, CatalogError> {
        Ok(self.badge(id)?.active)
    }
}
