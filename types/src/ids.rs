//! Entity identifiers.
//!
//! All ids are opaque strings. Ids owned by external collaborators
//! (users, badges, events) arrive from outside and are wrapped as-is;
//! ids owned by this core (claims, achievements) are generated here as
//! 16 random bytes, hex-encoded.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

string_id!(
    /// A user of the platform — claimant or authority.
    UserId
);
string_id!(
    /// A badge definition in the catalog.
    BadgeId
);
string_id!(
    /// An event in the registry.
    EventId
);
string_id!(
    /// A claim record. Generated by this core.
    ClaimId
);
string_id!(
    /// An achievement ledger entry. Generated by this core.
    AchievementId
);

fn random_hex() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}

impl ClaimId {
    /// Generate a fresh, unique claim id.
    pub fn generate() -> Self {
        Self(random_hex())
    }
}

impl AchievementId {
    /// Generate a fresh, unique achievement id.
    pub fn generate() -> Self {
        Self(random_hex())
    }
}
