//! Fundamental types for the podium badge workflow.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: entity identifiers, timestamps, and the clock abstraction.

pub mod ids;
pub mod time;

pub use ids::{AchievementId, BadgeId, ClaimId, EventId, UserId};
pub use time::{Clock, SystemClock, Timestamp};
