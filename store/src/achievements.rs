//! Achievement ledger entries and their storage trait.

use crate::StoreError;
use podium_types::{AchievementId, BadgeId, ClaimId, EventId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Denormalized copy of the badge definition taken at award time.
///
/// Deleting a badge definition later never corrupts the historical record:
/// the ledger entry carries its own name, icon and points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeSnapshot {
    pub name: String,
    pub icon: String,
    pub points: u32,
}

/// A permanent record that a user was awarded a badge. Append-only; never
/// deleted by this subsystem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub user_id: UserId,
    pub badge_id: BadgeId,
    pub badge: BadgeSnapshot,
    pub source_event_id: Option<EventId>,
    /// One-to-one back-reference to the awarding claim.
    pub source_claim_id: ClaimId,
    pub awarded_at: Timestamp,
    pub awarded_by: UserId,
}

/// Read surface of the achievement ledger.
///
/// There is deliberately no standalone insert: ledger entries are written
/// only through the compound commits on [`crate::AwardStore`], which is what
/// makes the at-most-once-award invariant structural.
pub trait AchievementStore: Send + Sync {
    /// Fetch an achievement by id.
    fn get_achievement(&self, id: &AchievementId) -> Result<Achievement, StoreError>;

    /// The achievement written for a claim, if the claim was awarded.
    fn achievement_for_claim(&self, claim: &ClaimId) -> Result<Option<Achievement>, StoreError>;

    /// All achievements awarded to a user.
    fn achievements_for_user(&self, user: &UserId) -> Result<Vec<Achievement>, StoreError>;

    /// Total number of ledger entries.
    fn achievement_count(&self) -> Result<u64, StoreError>;
}
