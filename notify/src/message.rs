//! Notification request type and the workflow's canned messages.

use podium_types::UserId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// A (user, message) pair to be delivered through whatever channel exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub user: UserId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    /// Claimant's badge claim was approved.
    pub fn claim_approved(user: UserId, badge_name: &str, points: u32) -> Self {
        Self {
            user,
            title: "Badge awarded".into(),
            message: format!("Your claim for \"{badge_name}\" was approved (+{points} points)."),
            kind: NotificationKind::Success,
        }
    }

    /// Claimant's badge claim was rejected.
    pub fn claim_rejected(user: UserId, badge_name: &str, reason: &str) -> Self {
        Self {
            user,
            title: "Claim rejected".into(),
            message: format!("Your claim for \"{badge_name}\" was rejected: {reason}"),
            kind: NotificationKind::Failure,
        }
    }

    /// An authority assigned a badge directly.
    pub fn badge_assigned(user: UserId, badge_name: &str, points: u32) -> Self {
        Self {
            user,
            title: "Badge awarded".into(),
            message: format!("You were awarded \"{badge_name}\" (+{points} points)."),
            kind: NotificationKind::Success,
        }
    }
}
