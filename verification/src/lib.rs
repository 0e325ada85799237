//! Badge claim verification engine.
//!
//! The one stateful workflow of the talent showcase platform: a claimant
//! (or an authority acting directly) asks that a user be credited with a
//! badge, an authority approves or rejects, and an approval writes a
//! permanent achievement exactly once.
//!
//! The engine holds no mutable state of its own — every invariant rests on
//! the write-time constraints of the [`podium_store`] backend, so any number
//! of callers can share one engine without in-process locking.

pub mod engine;
pub mod error;
pub mod queue;

pub use engine::{Award, BadgeUsage, ClaimSource, Decision, VerificationEngine};
pub use error::{ErrorKind, VerifyError};
pub use queue::ClaimFilter;
