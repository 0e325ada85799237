//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies of the verification engine (clock, badge
//! catalog, event registry, notification dispatcher) are abstracted behind
//! traits. This crate provides test-friendly implementations that return
//! deterministic values, can be controlled programmatically, and never touch
//! the network.
//!
//! Usage: swap real implementations for nullables in tests.

pub mod catalog;
pub mod clock;
pub mod dispatch;

pub use catalog::{NullCatalog, NullRegistry};
pub use clock::NullClock;
pub use dispatch::RecordingDispatcher;
