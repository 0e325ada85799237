//! Abstract storage traits for the badge claim workflow.
//!
//! Every storage backend (document DB, in-memory for testing) implements
//! these traits. The rest of the workspace depends only on the traits.
//!
//! The write-time constraints the backend must enforce:
//! - at most one `Pending` claim per `(claimant, badge, event)` triple;
//! - a unique code held by a `Pending` or `Awarded` claim is consumed;
//! - at most one achievement per `source_claim_id`;
//! - decisions apply only while the stored status is still `Pending`.

pub mod achievements;
pub mod claims;
pub mod error;

pub use achievements::{Achievement, AchievementStore, BadgeSnapshot};
pub use claims::{Claim, ClaimMethod, ClaimStatus, ClaimStore, Claimant};
pub use error::StoreError;

/// Unified store interface adding the compound atomic writes.
///
/// The two commit operations pair a claim write with a ledger append and
/// must apply as a single unit: if either side fails its constraint check,
/// neither is visible.
pub trait AwardStore: ClaimStore + AchievementStore {
    /// Transition a stored claim from `Pending` to the given decided record
    /// (status `Awarded`) and append its achievement, atomically.
    ///
    /// Fails with [`StoreError::Conflict`] if the stored claim is no longer
    /// pending, and with [`StoreError::Duplicate`] if an achievement already
    /// references the claim.
    fn commit_award(&self, claim: &Claim, achievement: &Achievement) -> Result<(), StoreError>;

    /// Insert an already-awarded claim (direct assignment) and its
    /// achievement, atomically. No intermediate pending state is ever stored.
    fn commit_direct_award(
        &self,
        claim: &Claim,
        achievement: &Achievement,
    ) -> Result<(), StoreError>;
}
