use podium_store::StoreError;
use podium_types::{BadgeId, ClaimId, EventId};
use thiserror::Error;

/// Machine-readable classification of a workflow error, so the calling UI
/// can choose retry behavior without matching on variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input is wrong; never retried automatically.
    Validation,
    /// Concurrency or idempotency violation; re-fetch state before retrying.
    Conflict,
    /// Collaborator unreachable; the operation was not applied at all.
    Dependency,
    /// Storage backend failure; the operation was not applied at all.
    Storage,
}

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("badge not found: {0}")]
    BadgeNotFound(BadgeId),

    #[error("badge {0} is not active")]
    BadgeInactive(BadgeId),

    #[error("event not found: {0}")]
    EventNotFound(EventId),

    #[error("badge {badge} is not assignable at event {event}")]
    BadgeNotAssignedToEvent { badge: BadgeId, event: EventId },

    #[error("evidence must not be empty")]
    MissingEvidence,

    #[error("claim not found: {0}")]
    ClaimNotFound(ClaimId),

    #[error("duplicate claim: {0}")]
    DuplicateClaim(String),

    #[error("claim {0} has already been decided")]
    AlreadyDecided(ClaimId),

    #[error("dependency unavailable: {0}")]
    Dependency(String),

    #[error("storage error: {0}")]
    Storage(StoreError),
}

impl VerifyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadgeNotFound(_)
            | Self::BadgeInactive(_)
            | Self::EventNotFound(_)
            | Self::BadgeNotAssignedToEvent { .. }
            | Self::MissingEvidence
            | Self::ClaimNotFound(_) => ErrorKind::Validation,
            Self::DuplicateClaim(_) | Self::AlreadyDecided(_) => ErrorKind::Conflict,
            Self::Dependency(_) => ErrorKind::Dependency,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_the_taxonomy() {
        assert_eq!(
            VerifyError::BadgeNotFound(BadgeId::new("b")).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            VerifyError::DuplicateClaim("code".into()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            VerifyError::AlreadyDecided(ClaimId::new("c")).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            VerifyError::Dependency("offline".into()).kind(),
            ErrorKind::Dependency
        );
        assert_eq!(
            VerifyError::Storage(StoreError::Backend("io".into())).kind(),
            ErrorKind::Storage
        );
    }
}
