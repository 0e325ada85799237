//! Claim records and their storage trait.

use crate::StoreError;
use podium_types::{BadgeId, ClaimId, EventId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a claim.
///
/// Approval and award are one atomic transition, so there is no observable
/// approved-but-not-awarded state. `Awarded` and `Rejected` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    Pending,
    Awarded,
    Rejected,
}

/// How a claim came to exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimMethod {
    /// Submitted by the claimant with free-text evidence.
    Manual,
    /// Submitted by the claimant with a one-time scanned code.
    ScannedCode,
    /// Created already-awarded by an authority.
    DirectAssignment,
}

/// The person a claim credits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claimant {
    pub id: UserId,
    pub display_name: String,
    /// Institution identifier (e.g. matrix number).
    pub external_id: String,
}

/// A request that a user be credited with a badge. The central entity of
/// this subsystem; never deleted — claims are an audit trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub claimant: Claimant,
    pub badge_id: BadgeId,
    /// Absent for direct assignments made outside any event.
    pub event_id: Option<EventId>,
    /// Free-text evidence; for direct assignments, the authority's reason.
    pub evidence: String,
    pub method: ClaimMethod,
    pub status: ClaimStatus,
    /// Set at creation, immutable thereafter.
    pub submitted_at: Timestamp,
    /// Stamped exactly once, on the transition out of `Pending`.
    pub decided_at: Option<Timestamp>,
    pub decided_by: Option<UserId>,
    /// Set only when the claim was rejected.
    pub rejection_reason: Option<String>,
    /// Present only for scanned-code claims; drives idempotent resubmission.
    pub unique_code: Option<String>,
}

impl Claim {
    pub fn is_pending(&self) -> bool {
        self.status == ClaimStatus::Pending
    }
}

/// Trait for the durable claim collection.
pub trait ClaimStore: Send + Sync {
    /// Insert a new claim in `Pending` status.
    ///
    /// Enforces, at write time, the pending-triple uniqueness constraint and
    /// the unique-code-not-consumed check; either violation is
    /// [`StoreError::Duplicate`].
    fn insert_pending(&self, claim: &Claim) -> Result<(), StoreError>;

    /// Fetch a claim by id.
    fn get_claim(&self, id: &ClaimId) -> Result<Claim, StoreError>;

    /// Compare-and-set decision write: replace the stored claim with
    /// `decided` only if its status is still `Pending`.
    ///
    /// Fails with [`StoreError::Conflict`] when another decision won.
    fn decide_if_pending(&self, id: &ClaimId, decided: &Claim) -> Result<(), StoreError>;

    /// Read-committed snapshot of all claims in the given status, ordered by
    /// `submitted_at` descending (claim id breaks ties deterministically).
    fn list_claims(&self, status: ClaimStatus) -> Result<Vec<Claim>, StoreError>;

    /// Whether any claim, of any status, references the badge.
    fn badge_has_claims(&self, badge: &BadgeId) -> Result<bool, StoreError>;
}
